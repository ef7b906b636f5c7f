use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

const IGNORE_FILE_NAME: &str = ".gitignore";

/// Patterns from the `.gitignore` at the traversal root, matched with git semantics.
///
/// Patterns are rooted at the traversal root: a bare name matches that basename at
/// any depth, a trailing `/` restricts a pattern to directories, and a path is
/// considered matched when any of its ancestor directories is.
pub struct IgnoreRuleSet {
    matcher: Gitignore,
}

impl IgnoreRuleSet {
    /// Reads `<root>/.gitignore`. A missing file yields an empty rule set.
    pub fn load(root: &Path) -> Self {
        let ignore_path = root.join(IGNORE_FILE_NAME);
        if !ignore_path.is_file() {
            log::debug!("No {} found at {}", IGNORE_FILE_NAME, root.display());
            return Self::empty(root);
        }

        let mut builder = GitignoreBuilder::new(root);
        // Unparseable lines are reported but the remaining rules still apply.
        if let Some(err) = builder.add(&ignore_path) {
            log::warn!("Problem reading {}: {}", ignore_path.display(), err);
        }

        match builder.build() {
            Ok(matcher) => {
                log::info!(
                    "Loaded {} rules from {}",
                    matcher.num_ignores(),
                    ignore_path.display()
                );
                Self { matcher }
            }
            Err(err) => {
                log::warn!("Ignoring {}: {}", ignore_path.display(), err);
                Self::empty(root)
            }
        }
    }

    /// Builds a rule set from in-memory lines, as if they were read from the root's ignore file.
    pub fn from_lines<'a>(root: &Path, lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut builder = GitignoreBuilder::new(root);
        for line in lines {
            if let Err(err) = builder.add_line(None, line) {
                log::warn!("Skipping ignore rule {:?}: {}", line, err);
            }
        }
        let matcher = builder.build().unwrap_or_else(|err| {
            log::warn!("Failed to compile ignore rules: {}", err);
            Gitignore::empty()
        });
        Self { matcher }
    }

    fn empty(root: &Path) -> Self {
        Self::from_lines(root, [])
    }

    pub fn is_empty(&self) -> bool {
        self.matcher.is_empty()
    }

    /// True when `relative_path` or one of its parent directories is ignored.
    pub fn matches(&self, relative_path: &Path, is_dir: bool) -> bool {
        if relative_path.as_os_str().is_empty() || relative_path.has_root() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(relative_path, is_dir)
            .is_ignore()
    }
}
