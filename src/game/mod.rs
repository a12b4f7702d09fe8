//! Game core — the flip state machine and its async timer driver.

pub mod driver;
pub mod machine;

pub use driver::Game;
pub use machine::{FlipMachine, TickResult};
