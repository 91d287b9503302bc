pub mod batch;
pub mod client;
pub mod prompt;
pub mod transform;

pub use crate::domain::model::{BatchReport, CsvRows, FileOutcome};
pub use crate::domain::ports::TextGenerator;
pub use crate::utils::error::Result;
