use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes a prepared request on behalf of the cohort loader.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
