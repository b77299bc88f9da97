// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renova - renewal and reminder scheduling engine.
//!
//! This is the binary entry point for inspecting and exercising the
//! engine against the local store.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use renova_renewal::Vocabulary;

mod reminders;
mod renewal;
mod sequence;

/// Renova - renewal and reminder scheduling engine.
#[derive(Parser, Debug)]
#[command(name = "renova", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the renewal date for a start date and cycle.
    NextDate {
        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,
        /// Cycle label, e.g. "yearly" or "2-years".
        #[arg(long)]
        cycle: String,
        /// Cycle vocabulary: contract, domain, or workspace.
        #[arg(long, default_value = "contract")]
        vocab: Vocabulary,
    },
    /// Classify how urgent a stored renewal date is.
    Classify {
        /// The stored renewal date (YYYY-MM-DD).
        #[arg(long)]
        target: NaiveDate,
        /// Override "today" for what-if checks.
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Suggest the next free sequence for a parent entity.
    Suggest {
        /// Parent entity id.
        #[arg(long)]
        parent: String,
    },
    /// List reminder schedules that are overdue right now.
    Due,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match renova_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            renova_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    let result = match cli.command {
        Some(Commands::NextDate { start, cycle, vocab }) => {
            renewal::next_date(start, &cycle, vocab)
        }
        Some(Commands::Classify { target, today }) => {
            renewal::classify(target, today, config.engine.near_due_window_days)
        }
        Some(Commands::Suggest { parent }) => sequence::suggest(&config, &parent).await,
        Some(Commands::Due) => reminders::due(&config).await,
        None => {
            println!("renova: use --help for available commands");
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("renova: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
