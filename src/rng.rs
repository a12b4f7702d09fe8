//! Randomness seam for the flip odds.
//!
//! Both odds draws — the scheduled failure delay and the per-tick crash
//! roll — go through `RandomSource`, so tests can script exact
//! sequences instead of fighting global RNG state.

use rand::Rng;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A source of uniform draws in `[0.0, 1.0)`.
pub trait RandomSource: Send + Sync {
    fn next_unit(&mut self) -> f64;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// A scripted source for deterministic tests and simulations.
///
/// Draws are consumed front-to-back; once the script is exhausted every
/// draw returns 0.0 (which never trips the per-tick crash roll).
/// Clones share the same script, so a test can keep pushing values
/// after handing the source to the machine.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource(Arc<Mutex<VecDeque<f64>>>);

impl ScriptedSource {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self(Arc::new(Mutex::new(draws.into_iter().collect())))
    }

    /// Append a draw to the end of the script.
    pub fn push(&self, draw: f64) {
        self.0.lock().unwrap().push_back(draw);
    }

    /// Number of unconsumed draws left in the script.
    pub fn remaining(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        self.0.lock().unwrap().pop_front().unwrap_or(0.0)
    }
}
