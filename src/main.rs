use std::path::PathBuf;

use clap::{Parser, Subcommand};
use enrolment_checker::clean::{DEFAULT_COURSE_PATTERN, PatternExtractor};
use enrolment_checker::process::{self, RunSummary};
use enrolment_checker::sink::{FileSink, generate_time_string};
use enrolment_checker::{CheckerError, Result, io};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_tracing(&cli.log_level) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|error| CheckerError::Logging(error.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| CheckerError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let summary = match cli.command {
        Command::Compare(args) => execute_compare(args)?,
        Command::Enrolments(args) => execute_enrolments(args)?,
    };
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for file in &summary.exported {
            println!("{file} has been saved");
        }
    }
    Ok(())
}

fn execute_compare(args: CompareArgs) -> Result<RunSummary> {
    let extractor = PatternExtractor::new(&args.output.course_pattern)?;
    let platform = io::load_platform(&args.platform)?;
    let database = io::load_database(&args.database)?;

    let time_string = generate_time_string();
    let mut sink = FileSink::with_time_string(args.output.prepare_dir()?, time_string.as_str());
    process::process_enrolment_dates(&platform, &database, &extractor, &mut sink, &time_string)
}

fn execute_enrolments(args: EnrolmentsArgs) -> Result<RunSummary> {
    let extractor = PatternExtractor::new(&args.output.course_pattern)?;
    let platform = io::load_platform(&args.platform)?;

    let time_string = generate_time_string();
    let mut sink = FileSink::with_time_string(args.output.prepare_dir()?, time_string.as_str());
    process::process_enrolments(&platform, &extractor, &mut sink, &time_string)
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Compare enrolment dates between the learning platform and the student database."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print the run summary as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Command {
    /// Report students whose start or expiry dates differ between the sources.
    Compare(CompareArgs),
    /// Clean the learning platform enrolments and order them by start date.
    Enrolments(EnrolmentsArgs),
}

#[derive(clap::Args)]
struct CompareArgs {
    /// Enrolment Dates export from the learning platform (.csv or .xlsx).
    #[arg(long)]
    platform: PathBuf,

    /// Enrolment Dates export from the student database (.csv or .xlsx).
    #[arg(long)]
    database: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(clap::Args)]
struct EnrolmentsArgs {
    /// Enrolments export from the learning platform (.csv or .xlsx).
    #[arg(long)]
    platform: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Directory receiving the workbooks and log files.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Regular expression locating the course code in a course label.
    #[arg(long, default_value = DEFAULT_COURSE_PATTERN)]
    course_pattern: String,
}

impl OutputArgs {
    fn prepare_dir(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(self.output_dir.clone())
    }
}
