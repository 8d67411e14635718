use crate::{LlmProvider, ProviderError};

#[derive(Debug, Default)]
pub struct NoopProvider;

#[async_trait::async_trait]
impl LlmProvider for NoopProvider {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, ProviderError> {
        Err(ProviderError::NotImplemented)
    }
}
