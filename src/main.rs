//! Prediction Latency Bench - CLI entry point

use clap::Parser;
use prediction_latency_bench::{
    app::App,
    cli::Cli,
    config::{load_config, EnvManager},
    error::{AppError, Result},
    PKG_NAME, VERSION,
};
use std::{error::Error, process};

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    let cli = Cli::parse();
    let use_color = cli.use_colors();

    if let Err(e) = run_application(cli).await {
        eprintln!("{}", e.format_for_console(use_color));

        if let Some(source) = e.source() {
            eprintln!("Caused by: {}", source);
        }

        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

async fn run_application(cli: Cli) -> Result<()> {
    if cli.debug {
        println!("{} v{} ({})", PKG_NAME, VERSION, build_info());
        println!("{}", cli.get_config_summary());
    }

    let config = load_config(cli)?;
    App::new(config).run().await?;

    Ok(())
}

fn build_info() -> String {
    let commit = option_env!("GIT_COMMIT").unwrap_or("unknown");
    let built = option_env!("BUILD_TIME").unwrap_or("unknown");
    format!("commit {}, built {}", commit, built)
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Validation(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - The endpoint URL must start with http:// or https://");
            eprintln!("  - --case names must exist in the test corpus");
            eprintln!("  - A --cases-file holds a JSON array of {{\"name\", \"message\"}} objects");
            eprintln!();
            eprint!("{}", EnvManager::display_env_help());
        }
        AppError::Network(_) => {
            eprintln!();
            eprintln!("Network troubleshooting:");
            eprintln!("  - Check the TLS setup of this host");
            eprintln!("  - Check that the endpoint URL is correct");
        }
        AppError::Io(_) | AppError::Csv(_) => {
            eprintln!();
            eprintln!("File output help:");
            eprintln!("  - Check that the output directory is writable");
            eprintln!("  - Choose another directory with --output-dir");
        }
        AppError::Render(_) => {
            eprintln!();
            eprintln!("Chart rendering help:");
            eprintln!("  - Install a TrueType font (for example DejaVu Sans or Liberation Sans)");
            eprintln!("  - Or point --font / CHART_FONT at a .ttf file");
            eprintln!("  - The CSV files written before this error are still valid");
        }
        _ => {}
    }
}
