//! Core types for the Enigma rotor machine simulator.
//!
//! - [`alphabet`] -- ordered symbol set with symbol <-> index mapping
//! - [`permutation`] -- cycle-notation permutations over an alphabet
//! - [`error`] -- the shared error taxonomy (configuration vs. range errors)

pub mod alphabet;
pub mod error;
pub mod permutation;

pub use alphabet::Alphabet;
pub use error::{EnigmaError, ErrorKind};
pub use permutation::Permutation;
