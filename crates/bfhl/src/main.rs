use crate::prelude::*;
use clap::Parser;

mod classify;
mod config;
mod error;
mod prelude;
mod server;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Classify tokens into odd numbers, even numbers, alphabets and special characters"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "BFHL_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Start the HTTP API server
    Serve(crate::server::ServeOptions),

    /// Classify tokens from the command line
    Classify(crate::classify::ClassifyOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Serve(options) => crate::server::run(options, app.global).await,
        SubCommands::Classify(options) => crate::classify::run(options, app.global).await,
    }
}
