//! A module to encapsulate all things related to the reader's operation.
pub mod prelude;

mod trf797x;
pub use trf797x::{commands, mnemonics, registers, DirectModeSession, Trf797x, TrfError};

mod config;
pub use config::ReaderConfig;
