use crate::app::error::ExportError;
use crate::app::models::RuntimeConfig;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".venv", "node_modules", "__pycache__", ".git"];

const DEFAULT_EXTENSIONS: &[(&str, &str)] = &[
    (".py", "python"),
    (".js", "javascript"),
    (".ts", "typescript"),
    (".tsx", "react"),
    (".jsx", "react"),
    (".html", "html"),
    (".css", "css"),
    (".json", "json"),
    (".yaml", "yaml"),
    (".yml", "yaml"),
    (".md", "markdown"),
    (".sh", "bash"),
    (".sql", "sql"),
    (".java", "java"),
    (".cpp", "cpp"),
    (".c", "c"),
    (".h", "c"),
    (".rs", "rust"),
    (".go", "go"),
];

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Deserialize, Debug, Default)]
struct ConfigFile {
    max_file_size: Option<i64>,
    excluded_dirs: Option<Vec<String>>,
    included_extensions: Option<BTreeMap<String, String>>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            included_extensions: DEFAULT_EXTENSIONS
                .iter()
                .map(|(ext, label)| (ext.to_string(), label.to_string()))
                .collect(),
        }
    }
}

/// Fallback locations, in order of preference, tried when no explicit path is given.
fn fallback_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from("config.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("repo2md").join("config.toml"));
    }
    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".repo2md").join("config.toml"));
    }
    locations.push(PathBuf::from("/etc/repo2md/config.toml"));
    locations
}

/// Finds and parses the first usable config file. `Ok(None)` means "use the defaults".
fn load_config_file(explicit: Option<&Path>) -> Result<Option<ConfigFile>, ExportError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ExportError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
    }

    let candidates = explicit
        .map(Path::to_path_buf)
        .into_iter()
        .chain(fallback_locations());

    for path in candidates {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("Config file not found: {}", path.display());
                continue;
            }
            Err(e) => {
                return Err(ExportError::Config(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        if content.trim().is_empty() {
            log::warn!(
                "Configuration file {} is empty, trying next location.",
                path.display()
            );
            continue;
        }

        let parsed = parse_config(&path, &content)?;
        log::info!("Loaded config from: {}", path.display());
        return Ok(Some(parsed));
    }

    log::info!("No configuration file found, using default settings");
    Ok(None)
}

fn parse_config(path: &Path, content: &str) -> Result<ConfigFile, ExportError> {
    toml::from_str(content)
        .map_err(|e| ExportError::Config(format!("failed to parse {}: {}", path.display(), e)))
}

/// Fills absent keys with defaults, validates, and unions in the extra directories.
fn build_runtime_config(
    file: ConfigFile,
    extra_excluded_dirs: &[String],
) -> Result<RuntimeConfig, ExportError> {
    let defaults = RuntimeConfig::default();

    let max_file_size = match file.max_file_size {
        None => defaults.max_file_size,
        Some(size) if size > 0 => size as u64,
        Some(size) => {
            return Err(ExportError::Config(format!(
                "max_file_size must be a positive number of bytes, got {}",
                size
            )))
        }
    };

    let included_extensions = file
        .included_extensions
        .unwrap_or(defaults.included_extensions);
    if let Some(bad) = included_extensions
        .keys()
        .find(|ext| !ext.starts_with('.') || ext.len() < 2)
    {
        return Err(ExportError::Config(format!(
            "extension keys must look like \".ext\", got {:?}",
            bad
        )));
    }

    let mut excluded_dirs: BTreeSet<String> = file
        .excluded_dirs
        .map(|dirs| dirs.into_iter().collect())
        .unwrap_or(defaults.excluded_dirs);
    excluded_dirs.extend(extra_excluded_dirs.iter().cloned());

    Ok(RuntimeConfig {
        max_file_size,
        excluded_dirs,
        included_extensions,
    })
}

pub fn resolve_config(
    config_path: Option<&Path>,
    extra_excluded_dirs: &[String],
) -> Result<RuntimeConfig, ExportError> {
    let file = load_config_file(config_path)?.unwrap_or_default();
    build_runtime_config(file, extra_excluded_dirs)
}
