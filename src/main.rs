use clap::Parser;
use tracing::info;

use wonkyserver::{config, logger, server};

#[derive(Parser, Debug)]
#[command(version, about = "WonkyServer - A configurable HTTP mock server")]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    file: String,
    /// Port that the server will listen to
    #[arg(short, long, default_value = "8888")]
    port: u16,
    /// Percentage (0-100) likelihood of random error/delay/slow behavior
    #[arg(short, long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=100))]
    wonky: u8,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init_logging();

    let config = match config::load_config(&args.file) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading configuration: {:#}", err);
            std::process::exit(1);
        }
    };

    info!(
        "Configuration loaded successfully with {} endpoints",
        config.endpoints.len()
    );
    if args.wonky > 0 {
        info!("Wonky mode enabled with {}% likelihood", args.wonky);
    }

    println!("Starting server on http://localhost:{}", args.port);
    server::start_server(config, args.port, args.wonky).await;
}
