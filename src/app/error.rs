use std::path::PathBuf;
use thiserror::Error;

/// Failures that can occur while exporting a tree.
///
/// `Config`, `RootNotFound`, `Provider` and `Write` abort the run.
/// `EntryAccess` and `Decode` are per-entry and only ever cause that entry to be skipped.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Source directory does not exist: {0}")]
    RootNotFound(PathBuf),
    #[error("Failed to acquire repository {url}: {reason}")]
    Provider { url: String, reason: String },
    #[error("Cannot access {0}")]
    EntryAccess(PathBuf, #[source] std::io::Error),
    #[error("File content for {0} is not valid UTF-8")]
    Decode(PathBuf),
    #[error("Failed to write output file {0}")]
    Write(PathBuf, #[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn io_cause_is_reported_once_through_source() {
        let err = ExportError::Write(
            PathBuf::from("out/report.md"),
            io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        );

        assert_eq!(err.to_string(), "Failed to write output file out/report.md");
        assert_eq!(err.source().unwrap().to_string(), "no such directory");

        let chained = format!("{:#}", anyhow::Error::from(err));
        assert_eq!(chained.matches("no such directory").count(), 1);
    }
}
