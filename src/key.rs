use std::path::{Component, Path};

use crate::error::{DeployError, DeployResult};

/// Map a resolved file to its object key: the target prefix
/// followed by the file's path relative to `root`, always
/// joined with `/`.
///
/// The prefix is prepended verbatim, so a prefix meant as a
/// directory should end in `/`.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use s3_deploy::key::object_key;
///
/// let key = object_key(
///     Path::new("/repo"),
///     "static/",
///     Path::new("/repo/dist/a.txt"),
/// )
/// .unwrap();
/// assert_eq!(key, "static/dist/a.txt");
/// ```
pub fn object_key(root: &Path, target_dir: &str, path: &Path) -> DeployResult<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| DeployError::OutsideRoot {
            path: path.display().to_string(),
            root: root.display().to_string(),
        })?;
    Ok(format!("{target_dir}{}", normalize(relative)))
}

/// Join the components of a relative path with `/`, whatever
/// the host separator is.
#[must_use]
pub fn normalize(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Best-effort MIME type from the file extension.
#[must_use]
pub fn content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}
