use ascii_store::cli::{self, Args};
use ascii_store::config::Config;
use clap::Parser;

/// Load .env without overriding variables already set.
fn load_env() {
    // dotenv::dotenv() returns Err if .env doesn't exist, which is fine
    let _ = dotenv::dotenv();
}

fn main() {
    load_env();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let ctx = match cli::Context::new(config, args.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::run(&ctx, args.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
