//! GitHub Actions workflow commands.

use tracing::error;

/// Whether the process runs inside a GitHub Actions job.
#[must_use]
pub fn is_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// Report a failure message to the hosting pipeline.
///
/// Inside GitHub Actions this emits an `::error::` command so
/// the message shows up as an annotation on the run.
pub fn set_failed(message: &str) {
    if is_github_actions() {
        println!("{}", error_command(message));
    } else {
        error!("{message}");
    }
}

/// Annotate failures that were already logged.
///
/// Only GitHub Actions gets annotations; elsewhere the log
/// line is the report.
pub fn annotate_failures<I, S>(messages: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in annotations(messages, is_github_actions()) {
        println!("{line}");
    }
}

/// `::error::` commands for `messages`, or none outside GitHub
/// Actions.
#[must_use]
pub fn annotations<I, S>(messages: I, in_actions: bool) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if !in_actions {
        return Vec::new();
    }
    messages
        .into_iter()
        .map(|m| error_command(m.as_ref()))
        .collect()
}

/// Format an `::error::` workflow command.
///
/// ```
/// use s3_deploy::workflow::error_command;
///
/// assert_eq!(error_command("50% done\nnope"), "::error::50%25 done%0Anope");
/// ```
#[must_use]
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
