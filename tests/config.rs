use std::path::PathBuf;

use clap::Parser;
use s3_deploy::config::{DeploymentConfig, Inputs, InvalidationTarget, UploadTarget, multiline};
use s3_deploy::error::DeployError;

fn inputs() -> Inputs {
    Inputs {
        aws_access_key_id: Some("AKIDEXAMPLE".into()),
        aws_secret_access_key: Some("wJalrXUtnFEMI".into()),
        ..Inputs::default()
    }
}

fn load(inputs: Inputs) -> DeploymentConfig {
    DeploymentConfig::from_inputs(inputs, PathBuf::from("/repo")).unwrap()
}

#[test]
fn credentials_only() {
    let config = load(inputs());

    assert_eq!(config.credentials.access_key_id, "AKIDEXAMPLE");
    assert_eq!(config.credentials.secret_access_key, "wJalrXUtnFEMI");
    assert_eq!(config.root, PathBuf::from("/repo"));
    assert!(config.region.is_none());
    assert!(config.upload.is_none());
    assert!(config.invalidation.is_none());
    assert!(!config.dry_run);
}

#[test]
fn missing_access_key_id() {
    let err = DeploymentConfig::from_inputs(
        Inputs {
            aws_access_key_id: None,
            ..inputs()
        },
        PathBuf::from("/repo"),
    )
    .unwrap_err();

    assert!(matches!(err, DeployError::Config(ref name) if name == "aws-access-key-id"));
}

#[test]
fn blank_secret_counts_as_missing() {
    let err = DeploymentConfig::from_inputs(
        Inputs {
            aws_secret_access_key: Some("   ".into()),
            ..inputs()
        },
        PathBuf::from("/repo"),
    )
    .unwrap_err();

    assert!(matches!(err, DeployError::Config(ref name) if name == "aws-secret-access-key"));
}

#[test]
fn upload_enabled_when_all_fields_set() {
    let config = load(Inputs {
        bucket: Some(" my-bucket ".into()),
        source_files: Some("dist/**\n\n  assets/*.png  \n".into()),
        target_dir: Some("static/".into()),
        aws_region: Some("eu-west-1".into()),
        ..inputs()
    });

    assert_eq!(
        config.upload,
        Some(UploadTarget {
            bucket: "my-bucket".into(),
            source_files: vec!["dist/**".into(), "assets/*.png".into()],
            target_dir: "static/".into(),
        })
    );
    assert_eq!(config.region.as_deref(), Some("eu-west-1"));
}

#[test]
fn upload_disabled_when_any_field_missing() {
    let no_bucket = load(Inputs {
        source_files: Some("dist/**".into()),
        target_dir: Some("static/".into()),
        ..inputs()
    });
    assert!(no_bucket.upload.is_none());

    let no_files = load(Inputs {
        bucket: Some("b".into()),
        source_files: Some("\n  \n".into()),
        target_dir: Some("static/".into()),
        ..inputs()
    });
    assert!(no_files.upload.is_none());

    let no_target = load(Inputs {
        bucket: Some("b".into()),
        source_files: Some("dist/**".into()),
        target_dir: Some(String::new()),
        ..inputs()
    });
    assert!(no_target.upload.is_none());
}

#[test]
fn invalidation_enabled_independently_of_upload() {
    let config = load(Inputs {
        distribution_id: Some("E123".into()),
        invalidation_path: Some("/a/*\n/b/*".into()),
        ..inputs()
    });

    assert!(config.upload.is_none());
    assert_eq!(
        config.invalidation,
        Some(InvalidationTarget {
            distribution_id: "E123".into(),
            paths: vec!["/a/*".into(), "/b/*".into()],
        })
    );
}

#[test]
fn invalidation_disabled_without_distribution_or_paths() {
    let no_paths = load(Inputs {
        distribution_id: Some("E123".into()),
        ..inputs()
    });
    assert!(no_paths.invalidation.is_none());

    let no_distribution = load(Inputs {
        invalidation_path: Some("/a/*".into()),
        distribution_id: Some(String::new()),
        ..inputs()
    });
    assert!(no_distribution.invalidation.is_none());
}

#[test]
fn working_directory_overrides_default_root() {
    let config = load(Inputs {
        working_directory: Some(PathBuf::from("/work")),
        ..inputs()
    });
    assert_eq!(config.root, PathBuf::from("/work"));
}

#[test]
fn debug_redacts_secret() {
    let config = load(inputs());
    let debug = format!("{:?}", config.credentials);

    assert!(debug.contains("AKIDEXAMPLE"));
    assert!(!debug.contains("wJalrXUtnFEMI"));
    assert!(debug.contains("<redacted>"));
}

#[test]
fn multiline_trims_and_drops_blank_lines() {
    assert_eq!(
        multiline(Some("  a  \r\n\n\tb\n")),
        vec!["a".to_string(), "b".to_string()]
    );
    assert!(multiline(Some("")).is_empty());
    assert!(multiline(None).is_empty());
}

#[test]
fn parse_cli_flags() {
    let inputs = Inputs::try_parse_from([
        "s3-deploy",
        "--aws-access-key-id",
        "id",
        "--aws-secret-access-key",
        "key",
        "--bucket",
        "b",
        "--source-files",
        "dist/**",
        "--target-dir",
        "static/",
        "--dry-run",
    ])
    .unwrap();

    assert_eq!(inputs.aws_access_key_id.as_deref(), Some("id"));
    assert_eq!(inputs.bucket.as_deref(), Some("b"));
    assert!(inputs.dry_run);

    let config = load(inputs);
    assert!(config.upload.is_some());
    assert!(config.dry_run);
}
