use clap::Parser;
use dojo_tui::Cli;
use dojo_tui::run_main;

fn main() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    run_main(cli)
}
