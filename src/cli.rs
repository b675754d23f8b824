// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "trailhead")]
#[command(about = "Battle Ground Lake State Park exhibit viewer", long_about = None)]
pub struct Cli {
    /// Page to open on, as shared in a "?page=N" link
    #[arg(long = "page", default_value_t = 0)]
    pub page: u32,

    /// Directory holding the exhibit's .glb assets
    #[arg(long = "assets", default_value = "assets")]
    pub assets: PathBuf,

    /// Viewer options file (JSON); defaults apply without one
    #[arg(long = "options")]
    pub options: Option<PathBuf>,

    /// Hide the text overlay and navigation buttons
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}
