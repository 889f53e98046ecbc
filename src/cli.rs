use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command line interface for the application
#[derive(Parser)]
#[command(about = "Schrijft verslagen dagbesteding met een taalmodel")]
pub struct Cli {
    /// Path to an optional YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    /// Default: "info"
    #[arg(long, default_value_t = String::from("info"))]
    pub logging_level: String,

    /// Also write logs to a daily rotating file in ./logs
    #[arg(long)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the report form over HTTP
    Serve {
        /// Port to listen on, overrides the configuration file
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Write reports interactively in the terminal
    Write {
        /// Directory to save the reports in
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Print the report to the console while it is generated
        #[arg(short, long)]
        print: bool,

        /// Sampling temperature, defaults to the first configured one
        #[arg(short, long)]
        temperature: Option<f32>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_with_port() {
        let cli = Cli::try_parse_from(["dagverslag", "serve", "--port", "8080"]).unwrap();
        assert!(matches!(cli.command, Command::Serve { port: Some(8080) }));
        assert_eq!(cli.logging_level, "info");
    }

    #[test]
    fn parses_write_flags() {
        let cli = Cli::try_parse_from([
            "dagverslag",
            "--config",
            "dagverslag.yaml",
            "write",
            "-o",
            "out",
            "--print",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("dagverslag.yaml"));
        match cli.command {
            Command::Write {
                output_dir,
                print,
                temperature,
            } => {
                assert_eq!(output_dir, Some(PathBuf::from("out")));
                assert!(print);
                assert!(temperature.is_none());
            }
            _ => panic!("expected write"),
        }
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["dagverslag"]).is_err());
    }
}
