use anyhow::Result;
use clap::Parser;
use testscope::{Cargo, CargoCommand, Runner};

fn main() -> Result<()> {
    // Initialize tracing based on RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // `cargo testscope ...` runs us as `cargo-testscope testscope ...`
    let args: Vec<String> = std::env::args().collect();
    let runner = if args.get(1).map(String::as_str) == Some("testscope") {
        let CargoCommand::Testscope(runner) = Cargo::parse().command;
        runner
    } else {
        Runner::parse()
    };

    runner.execute()
}
