//! Sky Cargo CLI library.
//!
//! Terminal styling and output formatting shared by the `skycargo-cli`
//! subcommands.

pub mod output;
pub mod terminal;
