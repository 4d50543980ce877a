use clap::Parser;
use tomb::cli::commands::add_pass::AddPass;
use tomb::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `TOMB_LOG=debug`).
const LOG_ENV: &str = "TOMB_LOG";

fn main() {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => tomb::cli::commands::init::execute(&cli),
        Commands::Export { ref output } => {
            tomb::cli::commands::export::execute(&cli, output.as_deref())
        }
        Commands::Import { ref input, force } => {
            tomb::cli::commands::import_cmd::execute(&cli, input.as_deref(), force)
        }
        Commands::AddPass {
            ref path,
            ref description,
            ref username,
            ref password,
            generate,
        } => tomb::cli::commands::add_pass::execute(
            &cli,
            AddPass {
                path,
                description,
                username,
                password: password.as_deref(),
                generate,
            },
        ),
        Commands::AddFolder {
            ref path,
            ref description,
        } => tomb::cli::commands::add_folder::execute(&cli, path, description),
        Commands::Remove { ref path, force } => {
            tomb::cli::commands::remove::execute(&cli, path, force)
        }
        Commands::Search {
            ref pattern,
            reveal,
        } => tomb::cli::commands::search::execute(&cli, pattern, reveal),
        Commands::List {
            ref folders,
            reveal,
        } => tomb::cli::commands::list::execute(&cli, folders, reveal),
        Commands::RotateKey => tomb::cli::commands::rotate::execute(&cli),
        Commands::Generate { length, count } => {
            tomb::cli::commands::generate::execute(length, count)
        }
        Commands::Completions { shell } => tomb::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        tomb::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays clean for exports and completions.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
