use crate::app::error::ExportError;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// The directory being exported. A cloned checkout is deleted when this value is dropped.
pub enum Source {
    Local(PathBuf),
    Cloned { url: String, checkout: TempDir },
}

impl Source {
    /// Uses an existing directory, resolved to an absolute path.
    pub fn local(path: &Path) -> Result<Self, ExportError> {
        if !path.is_dir() {
            return Err(ExportError::RootNotFound(path.to_path_buf()));
        }
        let root =
            fs::canonicalize(path).map_err(|_| ExportError::RootNotFound(path.to_path_buf()))?;
        Ok(Source::Local(root))
    }

    /// Clones `url` into a fresh temporary directory with the `git` client.
    pub fn clone_repository(url: &str) -> Result<Self, ExportError> {
        let provider_error = |reason: String| ExportError::Provider {
            url: url.to_string(),
            reason,
        };

        let checkout = TempDir::new()
            .map_err(|e| provider_error(format!("cannot create temporary directory: {}", e)))?;
        log::info!(
            "Cloning repository from {} into {}...",
            url,
            checkout.path().display()
        );

        // On failure `checkout` goes out of scope here, which removes the directory.
        let status = Command::new("git")
            .arg("clone")
            .arg("--quiet")
            .arg(url)
            .arg(checkout.path())
            .status()
            .map_err(|e| provider_error(format!("cannot run git: {}", e)))?;
        if !status.success() {
            return Err(provider_error(format!("git clone exited with {}", status)));
        }

        Ok(Source::Cloned {
            url: url.to_string(),
            checkout,
        })
    }

    pub fn root(&self) -> &Path {
        match self {
            Source::Local(path) => path,
            Source::Cloned { checkout, .. } => checkout.path(),
        }
    }

    /// Name shown in the document header.
    pub fn label(&self) -> String {
        match self {
            Source::Local(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Source::Cloned { url, .. } => url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn local_source_resolves_existing_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("project")).unwrap();

        let source = Source::local(&dir.path().join("project")).unwrap();
        assert!(source.root().is_absolute());
        assert!(source.root().ends_with("project"));
        assert_eq!(source.label(), "project");
    }

    #[test]
    fn missing_or_non_directory_root_is_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.py");
        fs::write(&file, "pass\n").unwrap();

        for path in [dir.path().join("missing"), file] {
            let err = Source::local(&path).err().unwrap();
            assert!(matches!(err, ExportError::RootNotFound(_)));
        }
    }

    #[test]
    fn failed_clone_is_a_provider_error() {
        let dir = tempdir().unwrap();
        let bogus = dir.path().join("not-a-repository");

        let err = Source::clone_repository(&bogus.to_string_lossy()).err().unwrap();
        assert!(matches!(err, ExportError::Provider { .. }));
    }
}
