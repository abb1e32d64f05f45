use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::RequestId;
use aws_sdk_s3::primitives::ByteStream;
use serde_json::json;

use crate::error::{DeployError, DeployResult};
use crate::response::ServiceResponse;
use crate::store::{ObjectStore, PutRequest};

/// Amazon S3 backed [`ObjectStore`].
pub struct S3Store {
    client: Client,
}

impl S3Store {
    #[must_use]
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_object(&self, request: PutRequest<'_>) -> DeployResult<ServiceResponse> {
        let upload_error = |reason: String| DeployError::Upload {
            key: request.key.to_string(),
            reason,
        };

        // The file is opened lazily by the body and closed once
        // the request completes.
        let body = ByteStream::from_path(request.body)
            .await
            .map_err(|e| upload_error(format!("{}: {e}", request.body.display())))?;

        let result = self
            .client
            .put_object()
            .bucket(request.bucket)
            .key(request.key)
            .set_content_type(request.content_type.map(String::from))
            .body(body)
            .send()
            .await;

        match result {
            Ok(output) => Ok(ServiceResponse::new(
                200,
                json!({
                    "eTag": output.e_tag(),
                    "versionId": output.version_id(),
                    "requestId": output.request_id(),
                }),
            )),
            Err(SdkError::ServiceError(err)) => Ok(ServiceResponse::new(
                err.raw().status().as_u16(),
                json!({
                    "code": err.err().code(),
                    "message": err.err().message(),
                    "requestId": err.err().request_id(),
                }),
            )),
            Err(err) => Err(upload_error(DisplayErrorContext(&err).to_string())),
        }
    }
}
