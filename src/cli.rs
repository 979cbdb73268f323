use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "confdesk", version, about = "Conference review web front-end")]
pub struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, env = "CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Override the listen port from the configuration file.
    #[arg(long)]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from(["confdesk", "--config", "/etc/confdesk.yaml", "--port", "8080"]);
        assert_eq!(cli.config.as_deref().unwrap().to_str(), Some("/etc/confdesk.yaml"));
        assert_eq!(cli.port, Some(8080));
    }

    #[test]
    fn defaults_to_no_overrides() {
        let cli = Cli::parse_from(["confdesk"]);
        assert!(cli.port.is_none());
    }
}
