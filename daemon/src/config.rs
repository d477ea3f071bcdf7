use clap::Parser;
use std::path::PathBuf;

/// FunPress daemon - watches a folder of photographs for the press
#[derive(Parser, Debug)]
#[command(name = "funpress-daemon")]
pub struct Args {
    /// Folder of photographs to watch (overrides and updates the saved setting)
    #[arg(long)]
    pub folder: Option<PathBuf>,

    /// Seconds between folder rescans
    #[arg(long, default_value_t = 2)]
    pub interval_secs: u64,

    /// Data directory (settings, templates, results)
    #[arg(long, env = "FUNPRESS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}
