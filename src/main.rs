use alpharsi::cli::{Cli, Commands};
use alpharsi::config::Config;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {:#}", e);
            eprintln!("Using default configuration");
            Config::from_toml(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    let _guard = alpharsi::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Replay(args) => {
            tracing::info!("Starting replay");
            args.execute(&config.engine)?;
        }
        Commands::Config => {
            println!("Current configuration:");
            print!("{}", toml::to_string_pretty(&config.engine)?);
            println!("  (warm-up: at least {} bars)", config.engine.min_warmup_bars());
        }
    }

    Ok(())
}
