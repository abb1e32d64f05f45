use std::fmt;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use crate::error::{DeployError, DeployResult};

/// Raw step inputs.
///
/// Every flag can also be supplied through the environment
/// variable the GitHub Actions runner exports for an action
/// input of the same name (`INPUT_<NAME>`).
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "s3-deploy")]
#[command(about = "Upload files to S3 and invalidate CloudFront paths")]
pub struct Inputs {
    /// AWS access key id
    #[arg(long, env = "INPUT_AWS-ACCESS-KEY-ID", hide_env_values = true)]
    pub aws_access_key_id: Option<String>,

    /// AWS secret access key
    #[arg(long, env = "INPUT_AWS-SECRET-ACCESS-KEY", hide_env_values = true)]
    pub aws_secret_access_key: Option<String>,

    /// AWS region
    #[arg(long, env = "INPUT_AWS-REGION")]
    pub aws_region: Option<String>,

    /// Destination bucket
    #[arg(long, env = "INPUT_BUCKET")]
    pub bucket: Option<String>,

    /// Newline-separated glob patterns of files to upload
    #[arg(long, env = "INPUT_SOURCE-FILES")]
    pub source_files: Option<String>,

    /// Key prefix prepended to every uploaded file
    #[arg(long, env = "INPUT_TARGET-DIR")]
    pub target_dir: Option<String>,

    /// Newline-separated CloudFront paths to invalidate
    #[arg(long, env = "INPUT_INVALIDATION-PATH")]
    pub invalidation_path: Option<String>,

    /// CloudFront distribution id
    #[arg(long, env = "INPUT_DISTRIBUTION-ID")]
    pub distribution_id: Option<String>,

    /// Directory that resolved files are made relative to
    #[arg(long, env = "INPUT_WORKING-DIRECTORY")]
    pub working_directory: Option<PathBuf>,

    /// Log what would be uploaded and invalidated without
    /// calling AWS
    #[arg(long, env = "INPUT_DRY-RUN")]
    pub dry_run: bool,
}

/// Static AWS credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Where and what to upload. Present only when the upload
/// phase is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub bucket: String,
    pub source_files: Vec<String>,
    pub target_dir: String,
}

/// What to invalidate. Present only when the invalidation
/// phase is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationTarget {
    pub distribution_id: String,
    pub paths: Vec<String>,
}

/// Validated, immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    pub credentials: Credentials,
    pub region: Option<String>,
    pub root: PathBuf,
    pub upload: Option<UploadTarget>,
    pub invalidation: Option<InvalidationTarget>,
    pub dry_run: bool,
}

impl DeploymentConfig {
    /// Validate raw inputs.
    ///
    /// `default_root` is used when no working directory was
    /// given, normally the process's current directory.
    pub fn from_inputs(inputs: Inputs, default_root: PathBuf) -> DeployResult<Self> {
        let access_key_id = required(inputs.aws_access_key_id, "aws-access-key-id")?;
        let secret_access_key = required(inputs.aws_secret_access_key, "aws-secret-access-key")?;

        let upload = match (
            non_empty(inputs.bucket),
            multiline(inputs.source_files.as_deref()),
            non_empty(inputs.target_dir),
        ) {
            (Some(bucket), source_files, Some(target_dir)) if !source_files.is_empty() => {
                if !target_dir.ends_with('/') {
                    warn!(
                        "target-dir '{target_dir}' has no trailing '/'; \
                         keys will be joined to it verbatim"
                    );
                }
                Some(UploadTarget {
                    bucket,
                    source_files,
                    target_dir,
                })
            }
            _ => {
                info!("bucket, source-files or target-dir not set; upload disabled");
                None
            }
        };

        let invalidation = match (
            non_empty(inputs.distribution_id),
            multiline(inputs.invalidation_path.as_deref()),
        ) {
            (Some(distribution_id), paths) if !paths.is_empty() => Some(InvalidationTarget {
                distribution_id,
                paths,
            }),
            _ => {
                info!("distribution-id or invalidation-path not set; invalidation disabled");
                None
            }
        };

        Ok(Self {
            credentials: Credentials {
                access_key_id,
                secret_access_key,
            },
            region: non_empty(inputs.aws_region),
            root: inputs.working_directory.unwrap_or(default_root),
            upload,
            invalidation,
            dry_run: inputs.dry_run,
        })
    }
}

/// Split a multiline input into trimmed, non-empty lines.
///
/// ```
/// use s3_deploy::config::multiline;
///
/// assert_eq!(multiline(Some("a\n\n  b  \r\n")), vec!["a", "b"]);
/// assert!(multiline(None).is_empty());
/// ```
#[must_use]
pub fn multiline(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, name: &str) -> DeployResult<String> {
    non_empty(value).ok_or_else(|| DeployError::Config(name.to_string()))
}
