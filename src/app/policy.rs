use crate::app::ignore_rules::IgnoreRuleSet;
use crate::app::models::{Decision, RuntimeConfig};
use std::path::Path;

/// Decides which directories are entered and which files make it into the document.
#[derive(Debug, Clone)]
pub struct InclusionPolicy {
    config: RuntimeConfig,
}

impl InclusionPolicy {
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    /// False when `dir_name` (a basename) is excluded; the walker then skips the whole subtree.
    pub fn should_descend(&self, dir_name: &str) -> bool {
        !self.config.excluded_dirs.contains(dir_name)
    }

    /// First matching rule wins: ignore rules, then extension, then size.
    pub fn classify(
        &self,
        relative_path: &Path,
        size: u64,
        ignore_rules: Option<&IgnoreRuleSet>,
    ) -> Decision {
        if ignore_rules.is_some_and(|rules| rules.matches(relative_path, false)) {
            return Decision::RejectIgnored;
        }

        let label = match dotted_extension(relative_path)
            .and_then(|ext| self.config.included_extensions.get(&ext))
        {
            Some(label) => label,
            None => return Decision::RejectExtension,
        };

        if size > self.config.max_file_size {
            return Decision::RejectSize;
        }

        Decision::Accept(label.clone())
    }
}

/// `src/main.rs` -> `.rs`. Case is preserved; dotfiles such as `.gitignore` have none.
fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
}
