//! Upload build artifacts to S3 and invalidate CloudFront.
//!
//! `s3-deploy` is a single pipeline step: it expands a list of
//! glob patterns against the working directory, uploads every
//! matching file to a bucket under a key prefix, then asks a
//! CloudFront distribution to evict a list of cached paths.
//!
//! # Overview
//!
//! A run is a [`Pipeline`] built from:
//!
//! - A [`DeploymentConfig`] parsed from [`Inputs`] (CLI flags
//!   or the `INPUT_*` variables of a GitHub Actions step)
//! - An [`ObjectStore`](store::ObjectStore) for uploads (e.g.
//!   [`S3Store`])
//! - A [`Cdn`](cdn::Cdn) for invalidations (e.g.
//!   [`CloudFrontCdn`])
//!
//! # Architecture
//!
//! The pipeline runs two independent phases, strictly in
//! sequence:
//!
//! 1. **Upload** - enabled when `bucket`, `source-files` and
//!    `target-dir` are all set. Files are resolved, directories
//!    skipped, and each file is uploaded one at a time. A failed
//!    upload is recorded and the remaining files are still
//!    attempted.
//! 2. **Invalidate** - enabled when `distribution-id` and
//!    `invalidation-path` are both set. All paths go out in one
//!    batch.
//!
//! Object keys are the target prefix followed by the file's
//! path relative to the root, always `/`-separated:
//!
//! ```text
//! root        /repo
//! file        /repo/dist/a.txt
//! target-dir  static/
//! key         static/dist/a.txt
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use s3_deploy::aws::load_sdk_config;
//! use s3_deploy::{CloudFrontCdn, DeploymentConfig, Inputs, Pipeline, S3Store};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let inputs = Inputs {
//!         aws_access_key_id: Some("AKIA...".into()),
//!         aws_secret_access_key: Some("...".into()),
//!         aws_region: Some("eu-west-1".into()),
//!         bucket: Some("my-site".into()),
//!         source_files: Some("dist/**".into()),
//!         target_dir: Some("static/".into()),
//!         invalidation_path: Some("/static/*".into()),
//!         distribution_id: Some("E123".into()),
//!         ..Inputs::default()
//!     };
//!     let config = DeploymentConfig::from_inputs(inputs, std::env::current_dir()?)?;
//!     let sdk = load_sdk_config(&config.credentials, config.region.as_deref()).await;
//!
//!     let report = Pipeline::new(config)
//!         .store(S3Store::new(&sdk))
//!         .cdn(CloudFrontCdn::new(&sdk))
//!         .run()
//!         .await;
//!
//!     assert!(report.is_success());
//!     Ok(())
//! }
//! ```

// Allow noisy pedantic lints that don't add value for a
// deployment tool crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod aws;
pub mod cdn;
pub mod config;
pub mod error;
pub mod key;
pub mod pipeline;
pub mod resolve;
pub mod response;
pub mod store;
pub mod workflow;

pub use cdn::InvalidationRequest;
pub use cdn::cloudfront::CloudFrontCdn;
pub use config::{DeploymentConfig, Inputs};
pub use pipeline::Pipeline;
pub use pipeline::RunReport;
pub use response::ServiceResponse;
pub use store::PutRequest;
pub use store::s3::S3Store;
