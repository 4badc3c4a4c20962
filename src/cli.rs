use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "acknowledgr",
    about = "Generate an acknowledgments document from installed dependency licenses",
    version
)]
pub struct Cli {
    /// Project root containing package.json and the installed dependencies
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Config file [default: ./.acknowledgr/config.toml, fallback ~/.config/acknowledgr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show where each dependency's license came from
    #[arg(short, long)]
    pub verbose: bool,

    /// Print nothing on success
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
