use clap::Parser;

mod commands;
mod core;

use commands::Commands;
use core::exit_code::ExitCode;
use core::logger::Logger;

#[derive(Parser)]
#[command(name = "bhl")]
#[command(about = "Syntax classification for bithoven contract sources")]
#[command(version)]
struct Args {
    #[arg(short, long, help = "Enable debug logging", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        let exit_code = ExitCode::from(&e);
        std::process::exit(exit_code.code());
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    Logger::init(args.debug);

    match args.command {
        Commands::Tokens(tokens_args) => commands::tokens::execute(&tokens_args),
        Commands::Spans(spans_args) => commands::spans::execute(&spans_args),
        Commands::Tags(tags_args) => commands::tags::execute(&tags_args),
    }
}
