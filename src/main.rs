use clap::Parser;
use lcdc::cli::{Cli, Commands};
use lcdc::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => lcdc::cli::build::run(args, &printer)?,
        Commands::Init(args) => lcdc::cli::init::run(args, &printer)?,
        Commands::Validate(args) => lcdc::cli::validate::run(args, &printer)?,
        Commands::Show(args) => lcdc::cli::show::run(args, &printer)?,
        Commands::Completions(args) => lcdc::cli::completions::run(args)?,
    }

    Ok(())
}
