//! Storage and audio boundaries plus their implementations.

#![allow(unused_imports)]

pub mod json_store;
pub mod leaderboard;
pub mod memory;
pub mod ports;
pub mod settings;

pub use json_store::*;
pub use leaderboard::*;
pub use memory::*;
pub use ports::*;
pub use settings::*;
