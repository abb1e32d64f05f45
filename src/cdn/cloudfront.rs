use async_trait::async_trait;
use aws_sdk_cloudfront::Client;
use aws_sdk_cloudfront::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cloudfront::types::{InvalidationBatch, Paths};
use serde_json::json;

use crate::cdn::{Cdn, InvalidationRequest};
use crate::error::{DeployError, DeployResult};
use crate::response::ServiceResponse;

/// Amazon CloudFront backed [`Cdn`].
pub struct CloudFrontCdn {
    client: Client,
}

impl CloudFrontCdn {
    #[must_use]
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl Cdn for CloudFrontCdn {
    async fn create_invalidation(
        &self,
        request: &InvalidationRequest,
    ) -> DeployResult<ServiceResponse> {
        let quantity = i32::try_from(request.quantity())
            .map_err(|_| DeployError::Invalidation("too many paths".into()))?;

        let paths = Paths::builder()
            .quantity(quantity)
            .set_items(Some(request.paths.clone()))
            .build()
            .map_err(|e| DeployError::Invalidation(e.to_string()))?;

        let batch = InvalidationBatch::builder()
            .caller_reference(&request.caller_reference)
            .paths(paths)
            .build()
            .map_err(|e| DeployError::Invalidation(e.to_string()))?;

        let result = self
            .client
            .create_invalidation()
            .distribution_id(&request.distribution_id)
            .invalidation_batch(batch)
            .send()
            .await;

        match result {
            Ok(output) => {
                let invalidation = output.invalidation();
                Ok(ServiceResponse::new(
                    201,
                    json!({
                        "location": output.location(),
                        "id": invalidation.map(|i| i.id()),
                        "status": invalidation.map(|i| i.status()),
                    }),
                ))
            }
            Err(SdkError::ServiceError(err)) => Ok(ServiceResponse::new(
                err.raw().status().as_u16(),
                json!({
                    "code": err.err().code(),
                    "message": err.err().message(),
                }),
            )),
            Err(err) => Err(DeployError::Invalidation(
                DisplayErrorContext(&err).to_string(),
            )),
        }
    }
}
