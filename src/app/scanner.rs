use crate::app::models::CandidateEntry;
use crate::app::policy::InclusionPolicy;
use ignore::{DirEntry, WalkBuilder};
use pathdiff::diff_paths;
use std::path::PathBuf;

pub struct Scanner {
    root: PathBuf,
    policy: InclusionPolicy,
}

impl Scanner {
    pub fn new(root: PathBuf, policy: &InclusionPolicy) -> Self {
        Self {
            root,
            policy: policy.clone(),
        }
    }

    /// Lazily walks the tree depth-first, siblings in byte order of their names.
    ///
    /// Excluded directories are pruned before they are read. Symlinked directories are
    /// never entered. Entries that fail to load are logged and skipped. Each call starts
    /// a fresh traversal from the root.
    pub fn walk(&self) -> impl Iterator<Item = CandidateEntry> + '_ {
        let policy = self.policy.clone();

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false) // ignore-file handling is done by the policy
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| keep_entry(&policy, entry))
            .build();

        walker.filter_map(move |result| match result {
            Ok(entry) => self.process_entry(entry),
            Err(err) => {
                log::warn!("Error walking entry: {}", err);
                None
            }
        })
    }

    fn process_entry(&self, entry: DirEntry) -> Option<CandidateEntry> {
        // Skip the root folder itself
        if entry.depth() == 0 {
            return None;
        }

        let relative_path = diff_paths(entry.path(), &self.root)?;
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());

        Some(CandidateEntry {
            path: entry.into_path(),
            relative_path,
            is_dir,
        })
    }
}

fn keep_entry(policy: &InclusionPolicy, entry: &DirEntry) -> bool {
    let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
    if entry.depth() == 0 || !is_dir {
        return true;
    }

    let name = entry.file_name().to_string_lossy();
    let descend = policy.should_descend(&name);
    if !descend {
        log::debug!("Excluding directory (by config): {}", entry.path().display());
    }
    descend
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::RuntimeConfig;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x\n").unwrap();
    }

    fn walked_files(root: &Path, policy: &InclusionPolicy) -> Vec<String> {
        Scanner::new(root.to_path_buf(), policy)
            .walk()
            .filter(|e| !e.is_dir)
            .map(|e| e.display_path())
            .collect()
    }

    #[test]
    fn visits_depth_first_in_name_order() {
        let dir = tempdir().unwrap();
        for rel in ["z.py", "src/utils/helpers.py", "a.py", "src/main.py", "b/c.py"] {
            touch(dir.path(), rel);
        }
        let policy = InclusionPolicy::new(RuntimeConfig::default());

        assert_eq!(
            walked_files(dir.path(), &policy),
            vec!["a.py", "b/c.py", "src/main.py", "src/utils/helpers.py", "z.py"]
        );
    }

    #[test]
    fn yields_directories_but_not_the_root() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "src/lib.rs");
        let policy = InclusionPolicy::new(RuntimeConfig::default());

        let entries: Vec<CandidateEntry> =
            Scanner::new(dir.path().to_path_buf(), &policy).walk().collect();

        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_dir);
        assert_eq!(entries[0].display_path(), "src");
        assert!(!entries[1].is_dir);
        assert_eq!(entries[1].path, dir.path().join("src").join("lib.rs"));
    }

    #[test]
    fn excluded_directories_are_pruned_at_any_depth() {
        let dir = tempdir().unwrap();
        touch(dir.path(), ".git/config.py");
        touch(dir.path(), "web/node_modules/pkg/index.js");
        touch(dir.path(), "web/app.js");
        let policy = InclusionPolicy::new(RuntimeConfig::default());

        let entries: Vec<String> = Scanner::new(dir.path().to_path_buf(), &policy)
            .walk()
            .map(|e| e.display_path())
            .collect();

        assert_eq!(entries, vec!["web", "web/app.js"]);
    }

    #[test]
    fn walk_restarts_from_the_root() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "one.rs");
        touch(dir.path(), "two/three.rs");
        let policy = InclusionPolicy::new(RuntimeConfig::default());
        let scanner = Scanner::new(dir.path().to_path_buf(), &policy);

        let first: Vec<String> = scanner.walk().map(|e| e.display_path()).collect();
        let second: Vec<String> = scanner.walk().map(|e| e.display_path()).collect();
        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn does_not_follow_directory_symlink_cycles() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "pkg/mod.py");
        std::os::unix::fs::symlink(dir.path(), dir.path().join("pkg").join("loop")).unwrap();
        let policy = InclusionPolicy::new(RuntimeConfig::default());

        let entries: Vec<CandidateEntry> =
            Scanner::new(dir.path().to_path_buf(), &policy).walk().collect();
        let paths: Vec<String> = entries.iter().map(|e| e.display_path()).collect();

        assert_eq!(paths, vec!["pkg", "pkg/loop", "pkg/mod.py"]);
        assert!(!entries[1].is_dir);
    }
}
