// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

use crate::demos::Demo;

#[derive(Parser, Debug, Clone)]
#[command(name = "shader-lab")]
#[command(about = "WGSL shader demos", long_about = None)]
pub struct Cli {
    /// Demo to run
    #[arg(value_enum, default_value = "pattern")]
    pub demo: Demo,

    /// Directory containing models, cubemaps, and textures
    #[arg(long = "assets", default_value = "assets")]
    pub assets: PathBuf,

    /// Disable the control panel and FPS overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}
