// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod ignore_rules;
pub mod models;
pub mod policy;
pub mod scanner;
pub mod source;

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use self::cli::Cli;
use self::config::resolve_config;
use self::error::ExportError;
use self::formatter::assemble;
use self::ignore_rules::IgnoreRuleSet;
use self::policy::InclusionPolicy;
use self::scanner::Scanner;
use self::source::Source;

/// Initializes components and orchestrates data flow.
pub fn run(args: Cli) -> Result<()> {
    // 1. Resolve Configuration
    let config = resolve_config(args.config.as_deref(), &args.exclude_dirs)?;
    log::debug!("Effective configuration: {:?}", config);
    let policy = InclusionPolicy::new(config);

    // 2. Acquire the root (dropping `source` removes a cloned checkout)
    let source = if args.git {
        Source::clone_repository(&args.source)?
    } else {
        Source::local(Path::new(&args.source))?
    };
    let root = source.root().to_path_buf();

    // 3. Ignore rules, only when asked for
    let ignore_rules = args.obey_gitignore.then(|| IgnoreRuleSet::load(&root));
    if ignore_rules.as_ref().is_some_and(IgnoreRuleSet::is_empty) {
        log::warn!("--obey-gitignore given but {} has no ignore rules", root.display());
    }

    // 4. Walk and assemble
    let scanner = Scanner::new(root, &policy);
    let document = assemble(
        scanner.walk(),
        &policy,
        ignore_rules.as_ref(),
        &source.label(),
    );
    log::info!(
        "Collected {} files ({} lines)",
        document.files(),
        document.total_lines()
    );

    // 5. Write Output
    let output_file = output_filename(&args.output);
    fs::write(&output_file, document.finish())
        .map_err(|e| ExportError::Write(output_file.clone(), e))
        .context("Export failed")?;

    println!("Repository content exported to {}", output_file.display());
    Ok(())
}

/// `<base>_<YYYYmmddHHMMSS>.md`
fn output_filename(base_name: &str) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d%H%M%S");
    PathBuf::from(format!("{}_{}.md", base_name, timestamp))
}
