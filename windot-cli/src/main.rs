use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use commands::indels::IndelArgs;
use commands::plot::PlotArgs;
use commands::stats::StatsArgs;
use config::Config;
use error::{print_error_and_exit, CliError};

#[derive(Parser)]
#[command(name = "windot")]
#[command(about = "WinDot - windowed dot plots for pairwise sequence alignments")]
#[command(version)]
#[command(long_about = "
WinDot aligns two sequences, marks every grid position where a sliding window
holds enough identical residues, and writes the dot plot as SVG, PNG or
PostScript. It can also list the indel regions of the alignment.

Examples:
  windot plot --input pair.fa --out plot.svg --preset nucleotide
  windot plot --input pair.fa --out plot.eps --window 3 --threshold 2 --report aln.txt
  windot indels --input pair.fa --min-length 3 --out indels.bed
  windot stats --input pair.fa --preset protein
  windot config --example > windot.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a dot plot of the first and last records of a FASTA file
    Plot(PlotArgs),

    /// List gap runs of the alignment as "<id> <start> <stop>" records
    Indels(IndelArgs),

    /// Print match statistics and alignment identity as JSON
    Stats(StatsArgs),

    /// Show or write configuration
    Config {
        /// Print the default configuration
        #[arg(long)]
        example: bool,

        /// Write the configuration to this file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// window 3, threshold 2
    Protein,
    /// window 11, threshold 7
    Nucleotide,
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    // an explicit RUST_LOG wins unless a flag was given
    let mut builder = if std::env::var_os("RUST_LOG").is_some() && verbose == 0 && !quiet {
        env_logger::Builder::from_default_env()
    } else {
        let mut builder = env_logger::Builder::new();
        builder.parse_filters(level);
        builder
    };
    builder.format_timestamp_secs().init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Plot(args) => commands::plot::execute(&config, args)?,
        Commands::Indels(args) => commands::indels::execute(&config, args)?,
        Commands::Stats(args) => commands::stats::execute(&config, args)?,
        Commands::Config { example, output } => {
            let shown = if example { Config::default() } else { config };
            match output {
                Some(path) => {
                    shown.save_to_file(&path)?;
                    log::info!("wrote {}", path.display());
                }
                None if example => print!("{}", Config::example_toml()?),
                None => print!("{}", toml::to_string_pretty(&shown).map_err(CliError::from)?),
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            print_error_and_exit(cli_err);
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
