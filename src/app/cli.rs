use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Export files from a local directory or Git repository to a Markdown file"
)]
pub struct Cli {
    /// Path to the local directory or URL of the Git repository
    pub source: String,

    /// Path to the TOML configuration file (default: search ./config.toml, then repo2md/config.toml in the user config dir, ~/.repo2md/, /etc/repo2md/)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base name for the output Markdown file (a timestamp is appended)
    #[arg(short, long, default_value = "repository")]
    pub output: String,

    /// Treat the source as a Git repository URL and clone it first
    #[arg(short, long)]
    pub git: bool,

    /// Additional directory names to exclude from processing
    #[arg(short, long, num_args = 1..)]
    pub exclude_dirs: Vec<String>,

    /// Respect the .gitignore file at the root of the source
    #[arg(short = 'i', long)]
    pub obey_gitignore: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn config_help_names_the_platform_config_dir() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("user config dir"));
        assert!(!help.contains("~/.config/repo2md"));
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "repo2md", "https://example.com/r.git", "-g", "-i", "-v", "-o", "snap", "-e", "dist",
            "vendor",
        ])
        .unwrap();

        assert!(cli.git && cli.obey_gitignore && cli.verbose);
        assert_eq!(cli.output, "snap");
        assert_eq!(cli.exclude_dirs, vec!["dist", "vendor"]);
        assert!(cli.config.is_none());
    }
}
