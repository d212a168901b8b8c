use clap::Parser;
use std::path::PathBuf;

/// Single-session attendance sidecar. Reads one JSON request per stdin line
/// and writes one JSON response per stdout line.
#[derive(Debug, Clone, Parser)]
#[command(name = "rollcalld", version)]
pub struct Config {
    /// Directory that image and CSV exports are written to
    #[arg(long, env = "ROLLCALLD_EXPORT_DIR", default_value = ".")]
    pub export_dir: PathBuf,

    /// Largest class size accepted at setup
    #[arg(
        long,
        env = "ROLLCALLD_MAX_CLASS_SIZE",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_class_size: u32,

    /// Log filter when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
