use s3_deploy::error::DeployError;

#[test]
fn display_config() {
    let err = DeployError::Config("aws-access-key-id".into());
    assert_eq!(err.to_string(), "missing required input: aws-access-key-id");
}

#[test]
fn display_pattern() {
    let err = DeployError::Pattern("'../x' escapes /repo".into());
    assert_eq!(err.to_string(), "invalid glob pattern: '../x' escapes /repo");
}

#[test]
fn display_upload() {
    let err = DeployError::Upload {
        key: "static/a.txt".into(),
        reason: "status 500".into(),
    };
    assert_eq!(err.to_string(), "upload of 'static/a.txt' failed: status 500");
}

#[test]
fn display_invalidation() {
    let err = DeployError::Invalidation("access denied".into());
    assert_eq!(err.to_string(), "invalidation failed: access denied");
}

#[test]
fn display_outside_root() {
    let err = DeployError::OutsideRoot {
        path: "/etc/passwd".into(),
        root: "/repo".into(),
    };
    assert_eq!(err.to_string(), "path '/etc/passwd' is not under root '/repo'");
}

#[test]
fn from_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err: DeployError = io_err.into();
    assert!(matches!(err, DeployError::Io(_)));
}

#[test]
fn from_json_error() {
    let json_err = serde_json::from_str::<Vec<u64>>("invalid").unwrap_err();
    let err: DeployError = json_err.into();
    assert!(matches!(err, DeployError::Json(_)));
}

#[test]
fn from_glob_error() {
    let glob_err = globset::Glob::new("a[").unwrap_err();
    let err: DeployError = glob_err.into();
    assert!(matches!(err, DeployError::Glob(_)));
}
