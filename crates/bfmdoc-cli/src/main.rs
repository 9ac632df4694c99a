//! Command-line interface for BFM documentation comments.
//!
//! Usage:
//!   bfmdoc parse `<FILES..>` [--format json|tree] [--dump-tokens]   - Print the syntax tree
//!   bfmdoc check `<FILES..>` [--deny-warnings]                      - Report diagnostics
//!   bfmdoc init [--force]                                           - Write a default config
//!
//! Without files, both commands read every `.bfm` file under the configured
//! corpus root.

use anyhow::{Context, Result, bail};
use bfmdoc_config::{Config, OutputFormat};
use bfmdoc_syntax::{Parse, parse};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use std::path::{Path, PathBuf};
use std::process;

/// Parse and check BFM documentation comments
#[derive(Parser, Debug)]
#[command(name = "bfmdoc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.config/bfmdoc/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the syntax tree of each file
    Parse {
        #[arg(value_name = "FILES")]
        files: Vec<PathBuf>,
        /// Output format (default from config, else json)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
        /// Log every token the lexer produces
        #[arg(long)]
        dump_tokens: bool,
    },

    /// Print the diagnostics of each file
    Check {
        #[arg(value_name = "FILES")]
        files: Vec<PathBuf>,
        /// Exit with an error status when any diagnostic is reported
        #[arg(long)]
        deny_warnings: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Json,
    Tree,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Tree => OutputFormat::Tree,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse {
            files,
            format,
            dump_tokens,
        } => {
            let config = load_config(cli.config.as_deref())?;
            init_logging(dump_tokens || config.debug.dump_tokens);
            let format = format.map(OutputFormat::from).unwrap_or(config.output.format);
            for (path, source) in read_inputs(&config, files)? {
                let parse = parse(&source);
                println!("{}", render(&path, &parse, format)?);
            }
        }
        Command::Check {
            files,
            deny_warnings,
        } => {
            let config = load_config(cli.config.as_deref())?;
            init_logging(config.debug.dump_tokens);
            let mut total = 0;
            for (path, source) in read_inputs(&config, files)? {
                let parse = parse(&source);
                for line in diagnostic_lines(&path, &source, &parse) {
                    println!("{line}");
                }
                total += parse.diagnostics().len();
            }
            log::info!("{total} diagnostic(s)");
            if deny_warnings && total > 0 {
                process::exit(1);
            }
        }
        Command::Init { force } => {
            init_logging(false);
            let path = init_config(cli.config.as_deref(), force)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file '{}' does not exist", path.display())),
        None => Ok(Config::load()?.unwrap_or_default()),
    }
}

/// Writes the default configuration to `path`, or to the default location.
fn init_config(path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let target = path.map_or_else(Config::config_path, Path::to_path_buf);
    if target.exists() && !force {
        bail!(
            "Config file '{}' already exists, use --force to overwrite it",
            target.display()
        );
    }

    let config = Config::default();
    match path {
        Some(path) => config.save_to_path(path)?,
        None => config.save()?,
    }
    Ok(target)
}

/// `RUST_LOG` when set, else warnings only. Token dumps add lexer tracing.
fn logger(env: Env<'_>, dump_tokens: bool) -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_env(env.default_filter_or("warn"));
    if dump_tokens {
        builder.filter_module("bfmdoc_syntax::lexer", log::LevelFilter::Trace);
    }
    builder
}

fn init_logging(dump_tokens: bool) {
    logger(Env::default(), dump_tokens).init();
}

/// Files to process with their contents, skipping ignored paths.
fn read_inputs(config: &Config, files: Vec<PathBuf>) -> Result<Vec<(PathBuf, String)>> {
    let files = if files.is_empty() {
        config.corpus_files()
    } else {
        files
    };
    if files.is_empty() {
        bail!("No input files given and no corpus_root configured");
    }

    let ignore = config.ignore_set()?;
    let mut inputs = Vec::new();
    for path in files {
        if ignore.is_ignored(&path) {
            log::debug!("Skipping ignored file {}", path.display());
            continue;
        }
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        inputs.push((path, source));
    }
    Ok(inputs)
}

fn render(path: &Path, parse: &Parse, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(&parse.to_json())?,
        OutputFormat::Tree => format!("== {}\n{}", path.display(), parse.debug_tree()),
    })
}

fn diagnostic_lines(path: &Path, source: &str, parse: &Parse) -> Vec<String> {
    parse
        .diagnostics()
        .iter()
        .map(|located| {
            let (line, column) = line_col(source, located.range.start().into());
            format!(
                "{}:{line}:{column}: warning {}",
                path.display(),
                located.diagnostic
            )
        })
        .collect()
}

/// One-based line and column (in chars) of a byte offset.
fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset.min(source.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn line_col_counts_from_one() {
        let source = "# a\n# bé c";
        assert_eq!(line_col(source, 0), (1, 1));
        assert_eq!(line_col(source, 4), (2, 1));
        assert_eq!(line_col(source, source.len()), (2, 7));
    }

    #[test]
    fn diagnostics_are_located() {
        let source = "# ok\n# +";
        let parse = parse(source);
        let lines = diagnostic_lines(Path::new("doc.bfm"), source, &parse);
        assert_eq!(
            lines,
            vec![
                "doc.bfm:2:4: warning BFM1010: missing parameter name".to_string(),
                "doc.bfm:2:4: warning BFM1009: missing '-' token".to_string(),
            ]
        );
    }

    #[test]
    fn tree_output_names_the_file() {
        let parse = parse("# x");
        let out = render(Path::new("a.bfm"), &parse, OutputFormat::Tree).unwrap();
        assert!(out.starts_with("== a.bfm\nDOCUMENTATION@0..3\n"));
    }

    #[test]
    fn logging_defaults_to_warnings() {
        let logger = logger(Env::new().filter("BFMDOC_TEST_LOG_UNSET"), false).build();
        assert_eq!(logger.filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn logging_respects_global_level() {
        unsafe {
            env::set_var("BFMDOC_TEST_LOG_DEBUG", "debug");
        }

        let logger = logger(Env::new().filter("BFMDOC_TEST_LOG_DEBUG"), false).build();
        assert_eq!(logger.filter(), log::LevelFilter::Debug);

        unsafe {
            env::remove_var("BFMDOC_TEST_LOG_DEBUG");
        }
    }

    #[test]
    fn dump_tokens_traces_the_lexer_only() {
        let logger = logger(Env::new().filter("BFMDOC_TEST_LOG_UNSET"), true).build();
        let lexer = log::Metadata::builder()
            .level(log::Level::Trace)
            .target("bfmdoc_syntax::lexer")
            .build();
        let parser = log::Metadata::builder()
            .level(log::Level::Trace)
            .target("bfmdoc_syntax::parser")
            .build();

        assert!(logger.enabled(&lexer));
        assert!(!logger.enabled(&parser));
    }

    #[test]
    fn init_writes_loadable_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bfmdoc/config.toml");

        let written = init_config(Some(&path), false).unwrap();

        assert_eq!(written, path);
        assert_eq!(load_config(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn init_keeps_existing_config_unless_forced() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "ignore = [\"old/*\"]\n").unwrap();

        let err = init_config(Some(&path), false).unwrap_err();
        assert!(err.to_string().contains("already exists"), "{err}");
        assert_eq!(load_config(Some(&path)).unwrap().ignore, vec!["old/*"]);

        init_config(Some(&path), true).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["bfmdoc", "check", "a.bfm", "--deny-warnings"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Check {
                deny_warnings: true,
                ..
            }
        ));

        let cli = Cli::try_parse_from(["bfmdoc", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Command::Init { force: true }));
    }
}
