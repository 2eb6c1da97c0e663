//! Character stats, weapons, skills, and leveling.

#![allow(unused_imports)]

pub mod creation;
pub mod model;
pub mod types;

pub use creation::*;
pub use model::*;
pub use types::*;
