use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueHint};

use crate::classifiers::hoeffding_tree::ClassifierConfig;
use crate::streams::SeaParameters;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Memory-bounded Hoeffding tree runner"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prequential evaluation of a Hoeffding tree on a SEA stream
    Run(RunArgs),
    /// Print the JSON schema of the classifier configuration
    Schema,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// JSON file with classifier settings (defaults when omitted)
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Stop after this many instances
    #[arg(long, default_value_t = 1_000_000, value_name = "N")]
    pub max_instances: u64,

    /// Emit metrics every N instances
    #[arg(
        long,
        default_value_t = 100_000,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    pub sample_frequency: u64,

    /// SEA concept function
    #[arg(
        long,
        default_value_t = 2,
        value_name = "ID",
        value_parser = clap::value_parser!(u8).range(1..=4),
    )]
    pub function: u8,

    /// Fraction of labels flipped (0.0-1.0)
    #[arg(long, default_value_t = 0.0, value_name = "P")]
    pub noise: f64,

    /// PRNG seed of the stream
    #[arg(long, default_value_t = 42, value_name = "SEED")]
    pub seed: u64,

    /// Print the final model description
    #[arg(long)]
    pub describe: bool,
}

impl RunArgs {
    pub fn classifier_config(&self) -> Result<ClassifierConfig> {
        match &self.config {
            Some(path) => ClassifierConfig::from_json_file(path)
                .with_context(|| format!("failed to load config from {}", path.display())),
            None => Ok(ClassifierConfig::default()),
        }
    }

    pub fn sea_parameters(&self) -> SeaParameters {
        SeaParameters {
            function_id: self.function,
            noise_pct: self.noise,
            seed: self.seed,
            ..SeaParameters::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn run_args(argv: &[&str]) -> RunArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Run(args) => args,
            Command::Schema => panic!("expected run"),
        }
    }

    #[test]
    fn run_defaults() {
        let args = run_args(&["arbor", "run"]);
        assert_eq!(args.max_instances, 1_000_000);
        assert_eq!(args.sample_frequency, 100_000);
        assert!(!args.describe);
        assert_eq!(args.sea_parameters(), SeaParameters::default());
        assert_eq!(args.classifier_config().unwrap(), ClassifierConfig::default());
    }

    #[test]
    fn run_overrides() {
        let args = run_args(&[
            "arbor",
            "run",
            "--function",
            "4",
            "--noise",
            "0.1",
            "--seed",
            "7",
            "--max-instances",
            "500",
            "--describe",
        ]);
        let sea = args.sea_parameters();
        assert_eq!(sea.function_id, 4);
        assert_eq!(sea.noise_pct, 0.1);
        assert_eq!(sea.seed, 7);
        assert_eq!(args.max_instances, 500);
        assert!(args.describe);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(Cli::try_parse_from(["arbor", "run", "--function", "5"]).is_err());
        assert!(Cli::try_parse_from(["arbor", "run", "--sample-frequency", "0"]).is_err());
        assert!(Cli::try_parse_from(["arbor"]).is_err());
    }

    #[test]
    fn schema_subcommand() {
        let cli = Cli::try_parse_from(["arbor", "schema"]).unwrap();
        assert!(matches!(cli.command, Command::Schema));
    }

    #[test]
    fn loads_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_size": 2.0, "split_criterion": "gini" }}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = run_args(&["arbor", "run", "--config", &path])
            .classifier_config()
            .unwrap();
        assert_eq!(config.tree.max_size, 2.0);

        let missing = run_args(&["arbor", "run", "--config", "/no/such/file.json"]);
        let err = missing.classifier_config().unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }
}
