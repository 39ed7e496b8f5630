//! Rotor machine model for the Enigma simulator.
//!
//! # Architecture
//!
//! - [`rotor`] -- rotor specifications and positioned rotor instances
//! - [`catalog`] -- shared, read-only set of available rotor specifications
//! - [`machine`] -- slot assignment, stepping and the signal path
//!
//! The text surface is behind the default `config` feature. Without it the
//! crate is only the machine model, built programmatically from
//! [`RotorSpec`]s and a [`RotorCatalog`].
//!
//! - [`config`] -- configuration text reader
//! - [`settings`] -- settings line parser
//! - [`constants`] -- the built-in Naval M4 rotor set
//! - [`format`] -- grouping of converted messages for output
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "config")]
//! # {
//! use enigma_machine::config::MachineConfig;
//! use enigma_machine::constants::DEFAULT_CONFIG;
//! use enigma_machine::settings::Settings;
//!
//! let config = MachineConfig::parse(DEFAULT_CONFIG).unwrap();
//! let mut machine = config.machine().unwrap();
//! let settings = Settings::parse("* B BETA I II III AAAA (AQ) (EP)", 5).unwrap();
//! settings.apply(&mut machine).unwrap();
//! assert_eq!(machine.convert("HELLOWORLD").unwrap(), "IHBDQQMTQZ");
//! # }
//! ```

pub mod catalog;
pub mod machine;
pub mod rotor;

#[cfg(feature = "config")]
pub mod config;
#[cfg(feature = "config")]
pub mod constants;
#[cfg(feature = "config")]
pub mod format;
#[cfg(feature = "config")]
pub mod settings;

pub use catalog::RotorCatalog;
pub use machine::Machine;
pub use rotor::{Rotor, RotorKind, RotorSpec};
