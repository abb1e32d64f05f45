use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::config::Credentials as StaticCredentials;

use crate::config::Credentials;

/// Shared SDK configuration for the S3 and CloudFront clients.
///
/// Credentials always come from the step inputs. Without an
/// explicit region the SDK's default region chain applies.
pub async fn load_sdk_config(credentials: &Credentials, region: Option<&str>) -> SdkConfig {
    let provider = StaticCredentials::new(
        &credentials.access_key_id,
        &credentials.secret_access_key,
        None,
        None,
        "s3-deploy-inputs",
    );

    let mut loader = aws_config::defaults(BehaviorVersion::latest()).credentials_provider(provider);
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }
    loader.load().await
}
