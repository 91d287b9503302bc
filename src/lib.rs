pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{CliConfig, Settings};
pub use crate::core::batch::BatchDriver;
pub use crate::core::client::GeminiClient;
pub use crate::core::prompt::PromptTemplate;
pub use crate::core::transform::Transformer;
pub use crate::domain::model::{BatchReport, FileOutcome};
pub use crate::utils::error::{EtlError, Result};
