use clap::Parser;
use std::path::PathBuf;

// Build version with engine info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Engine: cutline timeline core\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Timeline video editing engine
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Project file to load (JSON) - a default project is created when omitted
    #[arg(value_name = "PROJECT")]
    pub project: Option<PathBuf>,

    /// Save the project to this path before exiting
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Run a headless playback simulation for N seconds
    #[arg(short = 'p', long = "play", value_name = "SECS")]
    pub play: Option<f64>,

    /// Start position for playback/summary (seconds)
    #[arg(long = "seek", value_name = "SECS")]
    pub seek: Option<f64>,

    /// Enable debug logging to file (default: cutline.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}
