pub mod analysis;
pub mod cover;
pub mod engine;
pub mod report;

pub use crate::domain::model::{Analysis, Recommendation};
pub use crate::domain::ports::{BlocklistDirectory, LogSource};
pub use crate::utils::error::Result;
