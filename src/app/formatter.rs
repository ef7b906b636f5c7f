use crate::app::error::ExportError;
use crate::app::ignore_rules::IgnoreRuleSet;
use crate::app::models::{AcceptedFile, CandidateEntry, Decision};
use crate::app::policy::InclusionPolicy;
use std::fs;
use std::path::Path;

/// The Markdown export, built one file section at a time.
pub struct Document {
    body: String,
    files: usize,
    total_lines: usize,
}

impl Document {
    pub fn new(root_label: &str) -> Self {
        let mut body = String::from("# Repository Snapshot\n\n");
        body.push_str(&format!("**Source:** `{}`\n\n", root_label));
        body.push_str("---\n\n");
        Self {
            body,
            files: 0,
            total_lines: 0,
        }
    }

    pub fn push_section(&mut self, file: &AcceptedFile) {
        let fence = fence_for(&file.content);

        self.body
            .push_str(&format!("## File: `{}`\n\n", file.entry.display_path()));
        self.body.push_str(&format!("{}{}\n", fence, file.label));
        self.body.push_str(&file.content);
        if !file.content.is_empty() && !file.content.ends_with('\n') {
            self.body.push('\n');
        }
        self.body.push_str(&format!("{}\n\n", fence));

        self.files += 1;
        self.total_lines += count_lines(&file.content);
    }

    pub fn files(&self) -> usize {
        self.files
    }

    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Appends the summary line and returns the rendered Markdown.
    pub fn finish(mut self) -> String {
        self.body.push_str(&format!(
            "**Total:** {}, {}\n",
            plural(self.files, "file"),
            plural(self.total_lines, "line")
        ));
        self.body
    }
}

/// Runs every candidate through the policy and collects the accepted files, in walk order.
pub fn assemble(
    candidates: impl IntoIterator<Item = CandidateEntry>,
    policy: &InclusionPolicy,
    ignore_rules: Option<&IgnoreRuleSet>,
    root_label: &str,
) -> Document {
    let mut document = Document::new(root_label);

    for entry in candidates {
        if entry.is_dir {
            continue;
        }
        match accept(entry, policy, ignore_rules) {
            Ok(Some(file)) => {
                log::debug!("Including file: {}", file.entry.path.display());
                document.push_section(&file);
            }
            Ok(None) => {}
            Err(ExportError::EntryAccess(path, err)) => {
                log::warn!("Skipping entry {}: {}", path.display(), err)
            }
            Err(err) => log::debug!("Excluding file: {}", err),
        }
    }

    document
}

/// `Ok(None)` is a policy rejection; errors are per-entry and never abort the run.
fn accept(
    entry: CandidateEntry,
    policy: &InclusionPolicy,
    ignore_rules: Option<&IgnoreRuleSet>,
) -> Result<Option<AcceptedFile>, ExportError> {
    // Follows symlinks, so a link to a regular file is read like one.
    let metadata =
        fs::metadata(&entry.path).map_err(|e| ExportError::EntryAccess(entry.path.clone(), e))?;
    if !metadata.is_file() {
        log::debug!("Skipping non-regular file: {}", entry.path.display());
        return Ok(None);
    }

    let label = match policy.classify(&entry.relative_path, metadata.len(), ignore_rules) {
        Decision::Accept(label) => label,
        rejection => {
            log::debug!("Excluding file ({:?}): {}", rejection, entry.path.display());
            return Ok(None);
        }
    };

    let content = read_text(&entry.path)?;
    Ok(Some(AcceptedFile {
        entry,
        label,
        content,
    }))
}

fn read_text(path: &Path) -> Result<String, ExportError> {
    let bytes = fs::read(path).map_err(|e| ExportError::EntryAccess(path.to_path_buf(), e))?;
    String::from_utf8(bytes).map_err(|_| ExportError::Decode(path.to_path_buf()))
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Line count that ignores the line-ending convention (`\n` and `\r\n` count the same).
fn count_lines(content: &str) -> usize {
    content.lines().count()
}

/// Three backticks, or one more than the longest backtick run in the content.
fn fence_for(content: &str) -> String {
    let longest_run = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest_run.max(2) + 1)
}
