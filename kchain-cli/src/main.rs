use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

mod config;
mod error;
mod input;

use config::{Config, OutputFormat};
use error::{print_error_and_exit, CliError, CliResult};
use kchain_core::{Aligner, Alignment};

#[derive(Parser)]
#[command(name = "kchain")]
#[command(about = "kchain - seed, extend and chain a DNA query against a reference")]
#[command(version)]
#[command(long_about = "
kchain locates a query sequence on a reference using exact k-mer seeds on
both strands, extends them into anchors, and chains the anchors into a
region list covering the whole query.

Examples:
  kchain
  kchain align --reference ref.txt --query qry.txt
  kchain align -k 14 --format json --output result.json
  kchain config --output kchain.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align the query against the reference (the default command)
    Align(AlignArgs),

    /// Print the default configuration as TOML
    Config {
        /// Write the configuration to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
pub struct AlignArgs {
    /// Reference sequence file (first line is read)
    #[arg(short, long)]
    pub reference: Option<PathBuf>,

    /// Query sequence file (first line is read)
    #[arg(long)]
    pub query: Option<PathBuf>,

    /// K-mer size for primary seeding (adaptive when omitted)
    #[arg(short)]
    pub k: Option<usize>,

    /// Skip re-seeding of uncovered query ranges
    #[arg(long)]
    pub no_secondary: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_secs()
        .init();
}

/// Fold command-line overrides into the loaded configuration.
fn apply_overrides(mut config: Config, args: &AlignArgs, threads: Option<usize>) -> Config {
    if let Some(reference) = &args.reference {
        config.input.reference = reference.clone();
    }
    if let Some(query) = &args.query {
        config.input.query = query.clone();
    }
    if let Some(format) = args.format {
        config.general.format = format;
    }
    if args.k.is_some() {
        config.align.kmer_size = args.k;
    }
    if args.no_secondary {
        config.align.secondary_pass = false;
    }
    if threads.is_some() {
        config.align.threads = threads;
    }
    config
}

fn render(alignment: &Alignment, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Tuples => Ok(alignment.to_tuple_string()),
        OutputFormat::Json => serde_json::to_string_pretty(alignment)
            .map_err(|e| CliError::config(format!("cannot serialize alignment: {}", e))),
    }
}

fn write_output(text: &str, output: Option<&Path>) -> CliResult<()> {
    match output {
        Some(path) => {
            let io_err = |e: io::Error| CliError::io(path.to_path_buf(), e.to_string());
            let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
            writeln!(writer, "{}", text).map_err(io_err)?;
            writer.flush().map_err(io_err)?;
            log::info!("Wrote alignment to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            let io_err = |e: io::Error| CliError::io(PathBuf::from("<stdout>"), e.to_string());
            writeln!(handle, "{}", text).map_err(io_err)?;
            handle.flush().map_err(io_err)?;
        }
    }
    Ok(())
}

fn run_align(config: &Config, output: Option<&Path>) -> CliResult<()> {
    let reference = input::read_sequence(&config.input.reference)?;
    let query = input::read_sequence(&config.input.query)?;
    log::info!(
        "Reference {} ({} bp), query {} ({} bp)",
        config.input.reference.display(),
        reference.len(),
        config.input.query.display(),
        query.len()
    );

    let aligner = Aligner::new(config.align.clone())?;
    let alignment = aligner.align(&query, &reference)?;
    let text = render(&alignment, config.general.format)?;
    write_output(&text, output)
}

/// Write the default configuration to `output`, or print it to stdout.
fn run_config(output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            Config::default().save_to_file(path)?;
            log::info!("Wrote default configuration to {}", path.display());
        }
        None => print!("{}", Config::example_toml()?),
    }
    Ok(())
}

/// Load the configuration, apply command-line overrides and validate the result.
fn resolve_config(
    config_path: Option<&Path>,
    args: &AlignArgs,
    threads: Option<usize>,
) -> Result<Config> {
    let config = apply_overrides(Config::load(config_path)?, args, threads);
    config
        .align
        .validate()
        .context("Invalid alignment parameters")?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Some(Commands::Config { output }) => run_config(output.as_deref())?,
        command => {
            let args = match command {
                Some(Commands::Align(args)) => args,
                _ => AlignArgs::default(),
            };
            let config = resolve_config(cli.config.as_deref(), &args, cli.threads)?;

            if let Err(e) = run_align(&config, args.output.as_deref()) {
                print_error_and_exit(&e);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parses_align_flags() {
        let cli = Cli::parse_from([
            "kchain", "-vv", "--threads", "3", "align", "--reference", "r.txt", "--query", "q.txt",
            "-k", "12", "--format", "json", "--no-secondary",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.threads, Some(3));
        match cli.command {
            Some(Commands::Align(args)) => {
                assert_eq!(args.reference, Some(PathBuf::from("r.txt")));
                assert_eq!(args.k, Some(12));
                assert_eq!(args.format, Some(OutputFormat::Json));
                assert!(args.no_secondary);
            }
            _ => panic!("expected align command"),
        }
    }

    #[test]
    fn test_bare_invocation_has_no_command() {
        let cli = Cli::parse_from(["kchain"]);
        assert!(cli.command.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn test_overrides_win_over_config() {
        let args = AlignArgs {
            query: Some(PathBuf::from("other.txt")),
            k: Some(8),
            no_secondary: true,
            ..Default::default()
        };
        let config = apply_overrides(Config::default(), &args, Some(2));
        assert_eq!(config.input.query, PathBuf::from("other.txt"));
        assert_eq!(config.input.reference, PathBuf::from("reference_2_1.txt"));
        assert_eq!(config.align.kmer_size, Some(8));
        assert_eq!(config.align.threads, Some(2));
        assert!(!config.align.secondary_pass);
    }

    #[test]
    fn test_config_command_writes_loadable_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("kchain.toml");
        run_config(Some(&path))?;

        let loaded = Config::load_from_file(&path)?;
        assert_eq!(loaded.align, kchain_core::AlignParams::default());
        assert_eq!(loaded.general.format, OutputFormat::Tuples);
        Ok(())
    }

    #[test]
    fn test_overrides_are_validated_after_merge() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("kchain.toml");
        std::fs::write(&path, "[align]\nthreads = 0\n")?;

        // the file alone is invalid
        assert!(resolve_config(Some(&path), &AlignArgs::default(), None).is_err());
        // a command-line thread count replaces the bad value
        let config = resolve_config(Some(&path), &AlignArgs::default(), Some(2))?;
        assert_eq!(config.align.threads, Some(2));

        let zero_k = AlignArgs {
            k: Some(0),
            ..Default::default()
        };
        assert!(resolve_config(Some(&path), &zero_k, Some(2)).is_err());
        Ok(())
    }

    #[test]
    fn test_run_align_writes_tuples() {
        let dir = tempdir().unwrap();
        let sequence = "ACGT".repeat(50);
        let reference = dir.path().join("reference.txt");
        let query = dir.path().join("query.txt");
        let output = dir.path().join("out.txt");
        std::fs::write(&reference, format!("{}\n", sequence)).unwrap();
        std::fs::write(&query, sequence.to_lowercase()).unwrap();

        let mut config = Config::default();
        config.input.reference = reference;
        config.input.query = query;
        config.align.threads = Some(2);
        run_align(&config, Some(&output)).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, "[(0,200,0,200)]\n");
    }

    #[test]
    fn test_run_align_reports_missing_input() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.input.reference = dir.path().join("missing_reference.txt");
        config.input.query = dir.path().join("missing_query.txt");

        let err = run_align(&config, None).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_json_output_carries_regions() {
        let sequence = b"ACGT".repeat(50);
        let aligner = Aligner::new(Default::default()).unwrap();
        let alignment = aligner.align(&sequence, &sequence).unwrap();
        let json = render(&alignment, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["regions"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["primary_k"], 10);
    }
}
