use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Represents the final configuration after merging the config file and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub max_file_size: u64,
    /// Directory basenames pruned at any depth.
    pub excluded_dirs: BTreeSet<String>,
    /// Dotted extension (e.g. `.py`) to highlight label.
    pub included_extensions: BTreeMap<String, String>,
}

/// Represents a single filesystem entry discovered during the scan.
#[derive(Debug, Clone)]
pub struct CandidateEntry {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub is_dir: bool,
}

impl CandidateEntry {
    /// Relative path with `/` separators, as rendered in the document.
    ///
    /// Joined per component, so a backslash inside a Unix file name stays as it is.
    pub fn display_path(&self) -> String {
        self.relative_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// A candidate that passed the policy and was read as text.
#[derive(Debug)]
pub struct AcceptedFile {
    pub entry: CandidateEntry,
    pub label: String,
    pub content: String,
}

/// Outcome of classifying a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accept(String),
    RejectExtension,
    RejectSize,
    RejectIgnored,
}
