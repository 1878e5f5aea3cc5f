use clap::Parser;
use screen_narration::cli::commands::{cmd_catalog, cmd_replay};
use screen_narration::cli::config::{Cli, Commands, load_config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Replay {
            scenario,
            format,
            output,
            poll_interval_ms,
            debounce_ms,
            disabled,
        } => {
            let passed = cmd_replay(
                &scenario,
                format.as_deref(),
                output.as_deref(),
                poll_interval_ms,
                debounce_ms,
                disabled,
                &config,
            )?;
            if !passed {
                std::process::exit(1);
            }
        }
        Commands::Catalog => {
            print!("{}", cmd_catalog());
        }
    }

    Ok(())
}
