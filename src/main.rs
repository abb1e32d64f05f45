use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use s3_deploy::aws::load_sdk_config;
use s3_deploy::workflow::{annotate_failures, set_failed};
use s3_deploy::{CloudFrontCdn, DeploymentConfig, Inputs, Pipeline, S3Store};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            set_failed(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<bool> {
    let cwd = std::env::current_dir().context("reading current directory")?;
    let config = DeploymentConfig::from_inputs(Inputs::parse(), cwd)?;

    let sdk_config = load_sdk_config(&config.credentials, config.region.as_deref()).await;

    let mut pipeline = Pipeline::new(config);
    if pipeline.config().upload.is_some() {
        pipeline = pipeline.store(S3Store::new(&sdk_config));
    }
    if pipeline.config().invalidation.is_some() {
        pipeline = pipeline.cdn(CloudFrontCdn::new(&sdk_config));
    }

    let report = pipeline.run().await;

    if pipeline.config().dry_run {
        println!("{}", serde_json::to_string_pretty(&report.planned)?);
    }

    annotate_failures(report.errors.iter().map(ToString::to_string));

    Ok(report.is_success())
}
