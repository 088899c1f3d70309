//! Culture CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use culture_cli::cli::{load_state_env, Cli};
use culture_cli::commands::{self, Settings};

fn main() {
    // Load .env.local if it exists (for CULTURE_STATE_DIR, CULTURE_LATENCY_MS)
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_path(culture_core::env_file());

    let mut cli = Cli::parse();

    // A custom state dir may carry its own .env.local; reparse so env-backed flags see it
    if let Some(state_dir) = cli.state_dir.clone() {
        if load_state_env(&state_dir) {
            cli = Cli::parse();
        }
    }

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt().with_env_filter(filter).with_target(false).init();

    let settings = Settings::from_cli(&cli);

    let result: commands::Result<()> = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime.block_on(commands::execute(cli.command, &settings)),
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
