pub mod cloudfront;

use async_trait::async_trait;

use crate::error::DeployResult;
use crate::response::ServiceResponse;

/// A single batch of paths to evict from a distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationRequest {
    pub distribution_id: String,
    /// Uniqueness token; CloudFront treats two requests with the
    /// same reference as the same invalidation.
    pub caller_reference: String,
    pub paths: Vec<String>,
}

impl InvalidationRequest {
    /// Build a request stamped with the current time in
    /// milliseconds.
    #[must_use]
    pub fn new(distribution_id: &str, paths: &[String]) -> Self {
        Self {
            distribution_id: distribution_id.to_string(),
            caller_reference: chrono::Utc::now().timestamp_millis().to_string(),
            paths: paths.to_vec(),
        }
    }

    /// Number of paths declared in the batch.
    #[must_use]
    pub fn quantity(&self) -> usize {
        self.paths.len()
    }
}

/// A content delivery network that can invalidate cached paths.
#[async_trait]
pub trait Cdn: Send + Sync {
    /// Submit one invalidation batch.
    async fn create_invalidation(
        &self,
        request: &InvalidationRequest,
    ) -> DeployResult<ServiceResponse>;
}
