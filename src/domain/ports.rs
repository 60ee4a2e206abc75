use crate::domain::model::{CustomQuizRequest, QuizPayload, QuizQuery};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Settings the quiz fallback chain reads.
pub trait ConfigProvider: Send + Sync {
    fn primary_url(&self) -> &str;
    fn secondary_url(&self) -> &str;
    fn use_secondary(&self) -> bool;
    fn endpoint_path(&self) -> &str;
    fn local_fallback_path(&self) -> &str;
    fn timeout_ms(&self) -> u64;
}

#[async_trait]
pub trait QuizProvider: Send + Sync {
    async fn fetch_quiz_data(&self, query: &QuizQuery) -> Result<QuizPayload>;
    async fn fetch_custom_quiz_data(&self, request: &CustomQuizRequest) -> Result<QuizPayload>;
}
