use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info};

use crate::cdn::{Cdn, InvalidationRequest};
use crate::config::{DeploymentConfig, InvalidationTarget, UploadTarget};
use crate::error::{DeployError, DeployResult};
use crate::key;
use crate::resolve;
use crate::response::ServiceResponse;
use crate::store::{ObjectStore, PutRequest};

/// A file that will be uploaded, with its destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedUpload {
    pub path: PathBuf,
    pub key: String,
    pub content_type: String,
}

/// Response for one uploaded file.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub path: PathBuf,
    pub key: String,
    pub response: ServiceResponse,
}

impl UploadOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.response.is_success()
    }
}

/// Everything that happened during one run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub planned: Vec<PlannedUpload>,
    pub uploads: Vec<UploadOutcome>,
    pub invalidation: Option<ServiceResponse>,
    pub errors: Vec<DeployError>,
}

impl RunReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    fn fail(&mut self, err: DeployError) {
        error!("{err}");
        self.errors.push(err);
    }
}

/// Two-phase deployment: upload resolved files, then
/// invalidate CDN paths.
///
/// Each phase runs only when its part of the configuration is
/// present and a client for it has been attached.
pub struct Pipeline {
    config: DeploymentConfig,
    store: Option<Box<dyn ObjectStore>>,
    cdn: Option<Box<dyn Cdn>>,
}

impl Pipeline {
    #[must_use]
    pub const fn new(config: DeploymentConfig) -> Self {
        Self {
            config,
            store: None,
            cdn: None,
        }
    }

    #[must_use]
    pub fn store(mut self, store: impl ObjectStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    #[must_use]
    pub fn cdn(mut self, cdn: impl Cdn + 'static) -> Self {
        self.cdn = Some(Box::new(cdn));
        self
    }

    #[must_use]
    pub const fn config(&self) -> &DeploymentConfig {
        &self.config
    }

    /// Run both phases. Failures are collected in the report
    /// rather than returned, so every file is attempted.
    pub async fn run(&self) -> RunReport {
        let mut report = RunReport::default();

        info!("root: {}", self.config.root.display());

        if let Some(target) = &self.config.upload {
            match plan_uploads(&self.config.root, target) {
                Ok(planned) if self.config.dry_run => {
                    log_dry_run(target, &planned);
                    report.planned = planned;
                }
                Ok(planned) => {
                    self.upload_all(target, &planned, &mut report).await;
                    report.planned = planned;
                }
                Err(err) => report.fail(err),
            }
        }

        if let Some(target) = &self.config.invalidation {
            if self.config.dry_run {
                info!(
                    "dry run: would invalidate on {}:\n{}",
                    target.distribution_id,
                    target.paths.join("\n")
                );
            } else {
                self.invalidate(target, &mut report).await;
            }
        }

        report
    }

    async fn upload_all(
        &self,
        target: &UploadTarget,
        planned: &[PlannedUpload],
        report: &mut RunReport,
    ) {
        let Some(store) = &self.store else {
            report.fail(DeployError::Upload {
                key: target.target_dir.clone(),
                reason: "no object store configured".into(),
            });
            return;
        };

        for upload in planned {
            info!("start upload: {} -> {}", upload.path.display(), upload.key);

            let request = PutRequest {
                bucket: &target.bucket,
                key: &upload.key,
                body: &upload.path,
                content_type: Some(upload.content_type.as_str()),
            };

            match store.put_object(request).await {
                Ok(response) => {
                    let outcome = UploadOutcome {
                        path: upload.path.clone(),
                        key: upload.key.clone(),
                        response,
                    };
                    if outcome.is_success() {
                        info!("{} uploaded: {}", outcome.key, outcome.response.metadata);
                    } else {
                        report.fail(DeployError::Upload {
                            key: outcome.key.clone(),
                            reason: format!(
                                "status {}: {}",
                                outcome.response.status, outcome.response.metadata
                            ),
                        });
                    }
                    report.uploads.push(outcome);
                }
                Err(err) => report.fail(err),
            }
        }
    }

    async fn invalidate(&self, target: &InvalidationTarget, report: &mut RunReport) {
        let Some(cdn) = &self.cdn else {
            report.fail(DeployError::Invalidation("no CDN configured".into()));
            return;
        };

        info!("paths to invalidate:\n{}", target.paths.join("\n"));

        let request = InvalidationRequest::new(&target.distribution_id, &target.paths);
        match cdn.create_invalidation(&request).await {
            Ok(response) if response.is_success() => {
                info!("invalidation created: {}", response.metadata);
                report.invalidation = Some(response);
            }
            Ok(response) => {
                let err = DeployError::Invalidation(format!(
                    "status {}: {}",
                    response.status, response.metadata
                ));
                report.invalidation = Some(response);
                report.fail(err);
            }
            Err(err) => report.fail(err),
        }
    }
}

/// Resolve the source patterns and map every non-directory
/// match to its key and content type, in resolution order.
pub fn plan_uploads(root: &Path, target: &UploadTarget) -> DeployResult<Vec<PlannedUpload>> {
    let files = resolve::resolve_files(root, &target.source_files)?;
    info!(
        "files to upload:\n{}",
        files
            .iter()
            .map(|f| f.display().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    );

    let mut planned = Vec::with_capacity(files.len());
    for path in files {
        if path.is_dir() {
            continue;
        }
        planned.push(PlannedUpload {
            key: key::object_key(root, &target.target_dir, &path)?,
            content_type: key::content_type(&path),
            path,
        });
    }
    Ok(planned)
}

fn log_dry_run(target: &UploadTarget, planned: &[PlannedUpload]) {
    info!("dry run: no objects will be written to {}", target.bucket);
    for upload in planned {
        info!(
            "  {} -> s3://{}/{} ({})",
            upload.path.display(),
            target.bucket,
            upload.key,
            upload.content_type
        );
    }
}
