use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use arbor::classifiers::hoeffding_tree::{ClassifierConfig, HoeffdingTreeClassifier};
use arbor::evaluation::Snapshot;
use arbor::streams::SeaGenerator;
use arbor::tasks::PrequentialEvaluator;
use arbor::ui::cli::args::{Cli, Command, RunArgs};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GREEN: &str = "\x1b[32m";
const FG_GREY: &str = "\x1b[90m";

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run(args),
        Command::Schema => print_schema(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: RunArgs) -> Result<()> {
    let config = args.classifier_config()?;
    let max_size = config.tree.max_size;
    let learner = HoeffdingTreeClassifier::new(config).context("failed to build classifier")?;
    let stream = SeaGenerator::new(args.sea_parameters()).context("failed to build stream")?;

    println!("{BOLD}{FG_CYAN}▶ Prequential Evaluation{RESET}");
    println!(
        "{DIM}sea_function={} noise={} max_size={}MB sample_freq={}{RESET}  {}",
        args.function,
        args.noise,
        max_size,
        args.sample_frequency,
        timestamp_now()
    );
    println!("{FG_GREY}{}{RESET}", "─".repeat(72));

    let mut runner = PrequentialEvaluator::new(
        Box::new(learner),
        Box::new(stream),
        Some(args.max_instances),
        args.sample_frequency,
    )
    .context("failed to construct PrequentialEvaluator")?;

    runner.run_with(print_snapshot).context("runner failed")?;

    if let Some(last) = runner.curve().latest() {
        println!(
            "{BOLD}{FG_GREEN}done{RESET} {} instances in {:.3}s CPU",
            last.instances_seen, last.seconds
        );
    }

    if args.describe {
        match runner.learner().get_model_description() {
            Some(text) => print!("{text}"),
            None => println!("(empty model)"),
        }
    }
    Ok(())
}

fn print_snapshot(snapshot: &Snapshot) {
    println!("{snapshot}");
}

fn print_schema() -> Result<()> {
    let schema = schemars::schema_for!(ClassifierConfig);
    let text = serde_json::to_string_pretty(&schema).context("failed to render schema")?;
    println!("{text}");
    Ok(())
}

fn timestamp_now() -> String {
    use chrono::{Local, SecondsFormat};
    let now = Local::now();
    format!(
        "{DIM}{}{}",
        now.to_rfc3339_opts(SecondsFormat::Secs, true),
        RESET
    )
}
