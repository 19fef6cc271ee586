use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// provider options file (YAML), host port validation is skipped without it
    #[arg(long, env = "GSS_EIP_OPTIONS_PATH")]
    pub options: Option<PathBuf>,
    /// watch pods in a single namespace instead of the whole cluster
    #[arg(short = 'n', long, env = "GSS_EIP_NAMESPACE")]
    pub namespace: Option<String>,
    /// enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose_logging: bool,
}
