//! WQ CLI - command line tool for rendering daily weather quilts.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "wq-cli",
    version,
    about = "Daily weather quilt toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: wq_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("starting wq-cli");
    wq_cmd::run(cli.command)
}
