//! goquiz CLI: play GO Quiz from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "goquiz", version, about = "Terminal front end for GO Quiz")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and question bank
    Init,

    /// Check a question bank for problems
    Validate {
        /// Question bank JSON (defaults to the configured one)
        #[arg(long)]
        questions: Option<PathBuf>,
    },

    /// Log in with an existing account
    Login {
        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        password: String,

        #[arg(long, default_value = "")]
        confirm_password: String,
    },

    /// Play the quiz interactively
    Play {
        /// Question bank JSON (defaults to the configured one)
        #[arg(long)]
        questions: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("goquiz=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate { questions } => commands::validate::execute(questions, config),
        Commands::Login { email, password } => {
            commands::auth::login(email, password, config).await
        }
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
        } => commands::auth::register(name, email, password, confirm_password, config).await,
        Commands::Play { questions } => commands::play::execute(questions, config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
