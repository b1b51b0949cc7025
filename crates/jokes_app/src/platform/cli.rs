use std::path::PathBuf;

use clap::Parser;

use super::settings::DEFAULT_CONFIG_FILENAME;

#[derive(Debug, Parser)]
#[command(
    name = "jokes_app",
    about = "Browse, favorite and rate jokes from JokeAPI",
    version
)]
pub struct Cli {
    /// RON settings file; a missing file means defaults.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_local_file() {
        let cli = Cli::try_parse_from(["jokes_app"]).unwrap();
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILENAME));
    }

    #[test]
    fn config_flag_sets_the_path() {
        let cli = Cli::try_parse_from(["jokes_app", "--config", "/tmp/other.ron"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("/tmp/other.ron"));

        let cli = Cli::try_parse_from(["jokes_app", "-c", "short.ron"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("short.ron"));
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["jokes_app", "--verbose"]).is_err());
        assert!(Cli::try_parse_from(["jokes_app", "--config"]).is_err());
    }
}
