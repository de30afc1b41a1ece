//! Command-line argument definitions for the usegraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, engine selection, and logging verbosity.

use clap::Parser;

use usegraph::LayoutEngine;

/// Command-line arguments for the usegraph layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input use case JSON file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output graph view JSON file
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Layout engine overriding the configured one (basic, sugiyama)
    #[arg(short, long)]
    pub engine: Option<LayoutEngine>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["usegraph", "usecase.json"]);
        assert_eq!(args.input, "usecase.json");
        assert_eq!(args.output, "out.json");
        assert_eq!(args.config, None);
        assert_eq!(args.engine, None);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_engine_flag() {
        let args = Args::parse_from(["usegraph", "in.json", "--engine", "basic"]);
        assert_eq!(args.engine, Some(LayoutEngine::Basic));

        let result = Args::try_parse_from(["usegraph", "in.json", "--engine", "grid"]);
        assert!(result.is_err());
    }
}
