pub mod s3;

use std::path::Path;

use async_trait::async_trait;

use crate::error::DeployResult;
use crate::response::ServiceResponse;

/// One object to write.
#[derive(Debug, Clone, Copy)]
pub struct PutRequest<'a> {
    pub bucket: &'a str,
    pub key: &'a str,
    /// Local file whose bytes become the object body.
    pub body: &'a Path,
    pub content_type: Option<&'a str>,
}

/// A key-addressed object store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a single object.
    ///
    /// A response the service actually sent, success or not,
    /// is returned as `Ok`; `Err` means no response was
    /// obtained (unreadable file, transport failure).
    async fn put_object(&self, request: PutRequest<'_>) -> DeployResult<ServiceResponse>;
}
