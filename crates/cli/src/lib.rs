pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "retention",
    about = "Retention agent operator CLI",
    long_about = "Exercise the retention dialogue engine offline, inspect customer data, and check runtime readiness.",
    after_help = "Examples:\n  retention classify \"this is too expensive\"\n  retention chat --user-id user_001 \"I want to cancel\"\n  retention doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Print the intent the keyword classifier assigns to a message")]
    Classify { message: String },
    #[command(about = "Answer one message for a customer and print the full dialogue response")]
    Chat {
        #[arg(long, default_value = "user_001", help = "Customer identifier to answer for")]
        user_id: String,
        message: String,
    },
    #[command(about = "Print a customer's profile together with its churn and upsell analysis")]
    Profile { user_id: String },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config and customer/catalog fixture readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Classify { message } => commands::classify::run(&message),
        Command::Chat { user_id, message } => commands::chat::run(&user_id, &message),
        Command::Profile { user_id } => commands::profile::run(&user_id),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => commands::doctor::run(json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
