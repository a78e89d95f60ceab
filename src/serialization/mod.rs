//! The line oriented proof script format.
//!
//! ```text
//! # comments and blank lines are ignored
//! theory set_theory
//! law Absorption: (A ∪ B) ∩ A = A
//! prove (A ∪ B) ∩ A = A
//! step Absorption: A
//! ```
//!
//! A `law` holds for every following `prove` until the next `theory` line. Steps name either a
//! rule of the theory or a law.

mod command;
pub mod error;

pub use command::*;
