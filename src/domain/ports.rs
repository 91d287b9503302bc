use crate::utils::error::Result;
use async_trait::async_trait;

/// Seam between the transform pipeline and the remote generation endpoint.
/// Tests substitute an identity implementation to isolate the CSV round trip.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
