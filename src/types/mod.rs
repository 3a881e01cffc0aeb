//! Tipos compartilhados do memocache.

pub mod config;
pub mod errors;

pub use config::{MemoConfig, Policy};
pub use errors::{MemoError, MemoResult};
