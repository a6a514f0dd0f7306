//! Prefixed console output.
//!
//! Every line carries the package tag (`[entity-cli] ...`) so that messages
//! stay attributable inside a package manager's interleaved install log.

use binwrap_schema::Branding;

/// Tag used before a package descriptor could be loaded.
const FALLBACK_TAG: &str = "[binwrap]";

/// A handle for printing tagged messages.
#[derive(Debug, Clone)]
pub struct Output {
    tag: String,
}

impl Output {
    /// Output tagged with the package's display name.
    pub fn new(branding: &Branding) -> Self {
        Self {
            tag: branding.tag(),
        }
    }

    /// Output for failures that happen before the package is known.
    pub fn anonymous() -> Self {
        Self {
            tag: FALLBACK_TAG.to_string(),
        }
    }

    /// Prints an informational message to stdout.
    pub fn info(&self, msg: &str) {
        println!("{} {msg}", self.tag);
    }

    /// Prints an error message to stderr.
    pub fn error(&self, msg: &str) {
        eprintln!("{} {msg}", self.tag);
    }

    /// Prints an untagged, indented follow-up line (e.g. a command to run) to stderr.
    pub fn hint(&self, msg: &str) {
        eprintln!("  {msg}");
    }
}

/// Flatten an error chain into one line.
///
/// Causes whose text the message already contains are skipped, since most
/// of our error types embed their source in their own message.
pub fn render_error(err: &anyhow::Error) -> String {
    let mut line = String::new();
    for cause in err.chain() {
        let text = cause.to_string();
        if line.contains(&text) {
            continue;
        }
        if !line.is_empty() {
            line.push_str(": ");
        }
        line.push_str(&text);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_tag_from_branding() {
        let desc = binwrap_schema::PackageDescriptor::from_json(
            r#"{"name":"@entityauth/cli","version":"1.0.0"}"#,
        )
        .unwrap();
        let out = Output::new(&Branding::from_descriptor(&desc).unwrap());
        assert_eq!(out.tag, "[@entityauth/cli]");
        assert_eq!(Output::anonymous().tag, "[binwrap]");
    }

    #[test]
    fn test_render_appends_new_causes() {
        let err = Err::<(), _>(std::io::Error::other("permission denied"))
            .context("Could not locate package root")
            .unwrap_err();
        assert_eq!(
            render_error(&err),
            "Could not locate package root: permission denied"
        );
    }

    #[test]
    fn test_render_skips_embedded_causes() {
        let err: anyhow::Error = binwrap_schema::PackageDescriptor::from_json("{")
            .unwrap_err()
            .into();
        let line = render_error(&err);
        let json_msg = err.root_cause().to_string();
        assert!(line.starts_with("Failed to parse package.json"));
        assert_eq!(line.matches(json_msg.as_str()).count(), 1);
    }
}
