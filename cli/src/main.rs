//! Tellerbot CLI
//!
//! Answers currency conversion and loan EMI queries from the command line,
//! or routes a chat read from standard input.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tellerbot_assistant::{Assistant, Conversation, UnconfiguredKnowledgeBase};
use tellerbot_common::format_dp;
use tellerbot_fx::ExchangeRateEngine;
use tellerbot_loan::EmiCalculator;

mod config;

use config::{AppConfig, LogFormat};

/// Tellerbot banking calculators
#[derive(Parser, Debug)]
#[command(name = "tellerbot")]
#[command(about = "Currency conversion and loan EMI calculators")]
struct Args {
    /// Path to the JSON rate list
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    /// Currency the rate list is quoted in
    #[arg(long, global = true)]
    reference: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer a currency conversion query, e.g. "100 USD to EUR"
    Convert {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Show the exchange rate between two currencies
    Rate { from: String, to: String },
    /// List the loaded quotes
    Rates,
    /// Answer a loan EMI query, e.g. "500000 at 10% for 5 years"
    Emi {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Chat over standard input, one query per line
    Chat,
}

fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
    );
    let json = format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(io::stderr)))
        .init();
}

fn load_engine(config: &AppConfig) -> anyhow::Result<ExchangeRateEngine> {
    ExchangeRateEngine::from_config(&config.fx).with_context(|| {
        format!(
            "Failed to load exchange rates from {}",
            config.fx.rates_path.display()
        )
    })
}

fn print_rates(engine: &ExchangeRateEngine) {
    println!("Rates in {} per unit:", engine.reference());
    for quote in engine.quotes() {
        let as_of = quote
            .as_of
            .map(|date| format!(" (as of {})", date))
            .unwrap_or_default();
        println!(
            "{:<4} {:<24} {:>12} per {}{}",
            quote.code.code(),
            quote.name,
            format_dp(quote.selling_rate, 2),
            quote.unit,
            as_of
        );
    }
}

fn chat(engine: ExchangeRateEngine) -> anyhow::Result<()> {
    let assistant = Assistant::new(Arc::new(engine), Arc::new(UnconfiguredKnowledgeBase));
    let mut conversation = Conversation::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    write!(stdout, "> ")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let query = line.trim();

        if matches!(query, "exit" | "quit") {
            break;
        }
        if !query.is_empty() {
            writeln!(stdout, "{}\n", assistant.handle(&mut conversation, query))?;
        }

        write!(stdout, "> ")?;
        stdout.flush()?;
    }

    info!(turns = conversation.len(), "Chat ended");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config =
        AppConfig::from_env().with_overrides(args.rates.clone(), args.reference.as_deref());

    init_logging(config.log_format);

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    match args.command {
        Command::Emi { query } => {
            println!("{}", EmiCalculator::new().run(&query.join(" ")));
        }
        Command::Convert { query } => {
            let engine = load_engine(&config)?;
            println!("{}", engine.convert_query(&query.join(" ")));
        }
        Command::Rate { from, to } => {
            let engine = load_engine(&config)?;
            let (from, to) = (engine.resolve(&from), engine.resolve(&to));
            match engine.rate(&from, &to) {
                Ok(rate) => println!("1 {} = {} {}", from, format_dp(rate, 4), to),
                Err(e) => anyhow::bail!(e.user_message()),
            }
        }
        Command::Rates => {
            let engine = load_engine(&config)?;
            print_rates(&engine);
        }
        Command::Chat => {
            let engine = load_engine(&config)?;
            chat(engine)?;
        }
    }

    Ok(())
}
