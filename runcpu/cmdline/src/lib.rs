//! Reading of the `runcpu` command line.
//!
//! `runcpu [-a <hex mask>] [-d <dir>] -- <payload command line>`
//!
//! [`tokenizer`] splits the raw command line with Windows quoting rules and finds the payload
//! after `--`, [`args`] turns the tokens into a [`LaunchConfig`].

pub mod args;
pub mod error;
pub mod tokenizer;

pub use args::{interpret, AffinityMask, Invocation, LaunchConfig};
pub use error::{UsageError, UsageResult, USAGE};
pub use tokenizer::{tokenize, ArgumentList, PayloadCommandLine, Tokenized};
