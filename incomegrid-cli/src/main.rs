use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use incomegrid_core::Axis;
use incomegrid_statement::{CoordinateWalker, Extraction, Record, extract_statement};

mod config;
mod render;

use render::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "incomegrid",
    version,
    about = "Extract investment income from BDC schedules of investments"
)]
struct Cli {
    /// Config file (default: ~/.incomegrid/config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Statement table exported as CSV
    #[arg(long)]
    csv: PathBuf,

    /// Label of the row opening the income section
    #[arg(long)]
    start: Option<String>,

    /// Label of the section's closing total row
    #[arg(long)]
    end: Option<String>,

    /// Fail when a section marker is missing
    #[arg(long)]
    strict: bool,

    /// Treat the first CSV record as data
    #[arg(long)]
    no_headers: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the investment x income records from a statement
    Extract {
        #[command(flatten)]
        table: TableArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Only print records that received values
        #[arg(long)]
        filled: bool,
    },

    /// Show the heading/subheading assigned to every section row
    Coordinates {
        #[command(flatten)]
        table: TableArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Classify a single label the way the walker would
    Classify {
        label: String,

        /// Search this taxonomy as a line item (default: classify as a section heading)
        #[arg(long, value_enum)]
        axis: Option<AxisArg>,
    },

    /// Manage ~/.incomegrid/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AxisArg {
    Investment,
    Income,
}

impl From<AxisArg> for Axis {
    fn from(a: AxisArg) -> Self {
        match a {
            AxisArg::Investment => Axis::Investment,
            AxisArg::Income => Axis::Income,
        }
    }
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Extract {
            table,
            format,
            output,
            filled,
        } => {
            let extraction = run_table(cli.config.as_deref(), &table)?;
            let records: Vec<Record> = if filled {
                extraction.filled().cloned().collect()
            } else {
                extraction.records
            };

            match output {
                Some(p) => {
                    let f = File::create(&p).with_context(|| format!("create {}", p.display()))?;
                    let mut w = BufWriter::new(f);
                    render::write_records(&records, format, &mut w)?;
                    w.flush()?;
                    info!("wrote {} records to {}", records.len(), p.display());
                }
                None => {
                    let stdout = io::stdout();
                    let mut w = stdout.lock();
                    render::write_records(&records, format, &mut w)?;
                }
            }
        }

        Command::Coordinates { table, format } => {
            let extraction = run_table(cli.config.as_deref(), &table)?;
            let stdout = io::stdout();
            let mut w = stdout.lock();
            render::write_coordinates(&extraction.coordinates, format, &mut w)?;
        }

        Command::Classify { label, axis } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            let registry = cfg.registry()?;
            let walker = CoordinateWalker::new(&registry).with_scoring(cfg.scoring);

            let c = match axis {
                // A line item is searched on the axis opposite its heading
                Some(a) => walker.classify_subheading(&label, Axis::from(a).opposite()),
                None => walker.classify_heading(&label),
            };
            println!("{}", c);
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                if cli.config.is_some() {
                    bail!("config init always writes ~/.incomegrid/config.toml; drop --config");
                }
                config::init_config()?;
            }
            ConfigCommand::Show => {
                let cfg = config::load_config(cli.config.as_deref())?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn run_table(config_path: Option<&Path>, table: &TableArgs) -> Result<Extraction> {
    if !table.csv.exists() {
        bail!("CSV not found: {}", table.csv.display());
    }

    let cfg = config::load_config(config_path)?;
    let registry = cfg.registry()?;

    let mut opts = cfg.statement_options(table.strict);
    if let Some(start) = &table.start {
        opts.start_label = start.clone();
    }
    if let Some(end) = &table.end {
        opts.end_label = end.clone();
    }
    if table.no_headers {
        opts.has_headers = false;
    }

    extract_statement(&table.csv, &registry, &opts)
}
