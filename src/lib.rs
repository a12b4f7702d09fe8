//! BottleFlip X — crash-style bottle-flip wagering game.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod clock;
pub mod config;
pub mod dashboard;
pub mod game;
pub mod payment;
pub mod rng;
pub mod types;
