use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "rmagnifier")]
#[command(about = "Full-screen magnifier over a snapshot of the whole desktop")]
#[command(version)]
pub struct Args {
    /// Monitor to open on, counted left to right from 0 (default: rightmost)
    #[arg(short, long, value_name = "SPATIAL_INDEX", env = "RMAGNIFIER_MONITOR")]
    pub monitor: Option<String>,

    /// Print the resolved monitor layout and exit
    #[arg(long)]
    pub list_monitors: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Smallest zoom level (overrides the config file)
    #[arg(long, value_name = "ZOOM")]
    pub min_zoom: Option<f64>,

    /// Largest zoom level (overrides the config file)
    #[arg(long, value_name = "ZOOM")]
    pub max_zoom: Option<f64>,

    /// Start in fullscreen mode
    #[arg(short, long)]
    pub fullscreen: bool,

    /// Start with the diagnostic overlay hidden
    #[arg(long)]
    pub no_overlay: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
