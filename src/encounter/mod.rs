//! Stage sequencing, enemy generation and the run state machine.

#![allow(unused_imports)]

pub mod enemies;
pub mod run;
pub mod stage;

pub use enemies::*;
pub use run::*;
pub use stage::*;
