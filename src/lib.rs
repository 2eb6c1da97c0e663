//! Streets - turn-based street-fight RPG library
//!
//! Game rules live here so they can be driven by the terminal front-end and
//! exercised by tests without a terminal.

pub mod character;
pub mod combat;
pub mod constants;
pub mod dice;
pub mod encounter;
pub mod logging;
pub mod persistence;
