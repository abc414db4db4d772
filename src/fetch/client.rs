use async_trait::async_trait;
use reqwest::{Request, Response};

/// Minimal transport seam so credentials and test doubles can wrap requests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
