use buildshapeify::cli::Cli;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    buildshapeify::run(cli)
}
