use clap::Parser;

mod cli;
mod config;
mod error;
mod model;
mod session;
mod storage;
mod store;

fn main() {
    let cli = cli::Cli::parse();

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
