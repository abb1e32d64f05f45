use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::error::{DeployError, DeployResult};
use crate::key::normalize;

const GLOB_CHARS: &[char] = &['*', '?', '[', '{'];

/// Compiled source-file patterns.
///
/// Patterns are relative to the root. A leading `!` turns a
/// line into an exclude pattern and a leading `#` into a
/// comment. A directory that matches a pattern also matches
/// everything beneath it.
pub struct SourcePatterns {
    root: PathBuf,
    includes: Vec<Include>,
    excludes: GlobSet,
}

/// An include pattern and the directory its walk starts from.
struct Include {
    matcher: GlobMatcher,
    search: PathBuf,
}

impl SourcePatterns {
    pub fn new(root: &Path, lines: &[String]) -> DeployResult<Self> {
        let mut includes = Vec::new();
        let mut excludes = GlobSetBuilder::new();

        for line in lines {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(negated) = line.strip_prefix('!') {
                let pattern = relative_pattern(root, negated.trim())?;
                excludes.add(GlobBuilder::new(&pattern).literal_separator(true).build()?);
                continue;
            }

            let pattern = relative_pattern(root, line)?;
            includes.push(Include {
                matcher: GlobBuilder::new(&pattern)
                    .literal_separator(true)
                    .build()?
                    .compile_matcher(),
                search: root.join(literal_prefix(&pattern)),
            });
        }

        Ok(Self {
            root: root.to_path_buf(),
            includes,
            excludes: excludes.build()?,
        })
    }

    /// Whether a root-relative, `/`-separated path is selected.
    #[must_use]
    pub fn is_match(&self, relative: &str) -> bool {
        self.includes
            .iter()
            .any(|include| hits(relative, |p| include.matcher.is_match(p)))
            && !self.is_excluded(relative)
    }

    fn is_excluded(&self, relative: &str) -> bool {
        hits(relative, |p| self.excludes.is_match(p))
    }

    /// Walk the filesystem and return every matching path,
    /// directories included, without duplicates.
    ///
    /// Results follow pattern order; matches of one pattern
    /// follow walk order. Dangling symbolic links and link
    /// cycles are skipped.
    pub fn resolve(&self) -> DeployResult<Vec<PathBuf>> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for include in &self.includes {
            if !include.search.exists() {
                debug!("search path {} does not exist", include.search.display());
                continue;
            }

            let walker = WalkBuilder::new(&include.search)
                .standard_filters(false)
                .follow_links(true)
                .sort_by_file_name(OsStr::cmp)
                .build();

            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) if is_broken_link(&err) => {
                        warn!("skipping {err}");
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                };
                let path = entry.path();
                let Ok(relative) = path.strip_prefix(&self.root) else {
                    continue;
                };
                let relative = normalize(relative);
                if relative.is_empty()
                    || !hits(&relative, |p| include.matcher.is_match(p))
                    || self.is_excluded(&relative)
                {
                    continue;
                }
                if seen.insert(path.to_path_buf()) {
                    files.push(path.to_path_buf());
                }
            }
        }

        Ok(files)
    }
}

/// Whether `relative` or one of its ancestors satisfies `test`.
fn hits(relative: &str, test: impl Fn(&str) -> bool) -> bool {
    Path::new(relative)
        .ancestors()
        .filter(|p| !p.as_os_str().is_empty())
        .any(|p| test(&normalize(p)))
}

/// A symlink cycle, or a link whose target does not exist.
fn is_broken_link(err: &ignore::Error) -> bool {
    match err {
        ignore::Error::Loop { .. } => true,
        ignore::Error::WithPath { err, .. }
        | ignore::Error::WithDepth { err, .. }
        | ignore::Error::WithLineNumber { err, .. } => is_broken_link(err),
        ignore::Error::Io(io) => io.kind() == std::io::ErrorKind::NotFound,
        _ => false,
    }
}

/// Expand `lines` against `root`. See [`SourcePatterns`].
pub fn resolve_files(root: &Path, lines: &[String]) -> DeployResult<Vec<PathBuf>> {
    SourcePatterns::new(root, lines)?.resolve()
}

/// Rewrite a pattern so it is relative to `root`.
///
/// Strips `./` and the root's own absolute prefix, and drops a
/// trailing `/`. Patterns escaping the root are rejected.
pub fn relative_pattern(root: &Path, pattern: &str) -> DeployResult<String> {
    let mut rest = pattern;

    if Path::new(rest).is_absolute() {
        let root_str = root.to_string_lossy();
        rest = rest
            .strip_prefix(root_str.trim_end_matches('/'))
            .filter(|r| r.is_empty() || r.starts_with('/'))
            .ok_or_else(|| {
                DeployError::Pattern(format!("'{pattern}' is outside {}", root.display()))
            })?;
    }

    loop {
        let trimmed = rest.trim_start_matches('/');
        let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
        if trimmed == rest {
            break;
        }
        rest = trimmed;
    }

    let rest = rest.trim_end_matches('/');
    if rest.split('/').any(|segment| segment == "..") {
        return Err(DeployError::Pattern(format!(
            "'{pattern}' escapes {}",
            root.display()
        )));
    }

    if rest.is_empty() || rest == "." {
        Ok("**".to_string())
    } else {
        Ok(rest.to_string())
    }
}

/// Leading path segments that contain no wildcard.
fn literal_prefix(pattern: &str) -> PathBuf {
    pattern
        .split('/')
        .take_while(|segment| !segment.contains(GLOB_CHARS))
        .collect()
}
