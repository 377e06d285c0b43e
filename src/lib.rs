pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::api::NextDnsClient;
pub use adapters::file::FileLogSource;
pub use config::{CliArgs, FileConfig};
pub use core::engine::AuditEngine;
pub use utils::error::{AuditError, Result};
