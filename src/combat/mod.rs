//! Turn resolution between the player and one enemy.

#![allow(unused_imports)]

pub mod flavor;
pub mod logic;
pub mod types;

pub use flavor::*;
pub use logic::*;
pub use types::*;
