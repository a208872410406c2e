use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(name = "calma", version, about = "Guided breathing in your terminal", long_about = None)]
pub struct Cli {
    /// Path to a config file, instead of the platform config directory
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of the platform data directory
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Seed for particle placement
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["calma"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.seed.is_none());
    }

    #[test]
    fn test_config_override() {
        let cli =
            Cli::try_parse_from(["calma", "--config", "/tmp/calma.toml", "--seed", "7"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/calma.toml")));
        assert_eq!(cli.seed, Some(7));
    }
}
