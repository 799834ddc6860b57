//! signalpool - CLI entry point
//!
//! Loads signals from a file and runs them through the task pool.

use std::fs;
use std::path::Path;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use signalpool::cli::{Cli, Command, OutputFormat, get_log_path};
use signalpool::config::Config;
use signalpool::domain::{Outcome, Signal, load_signals};
use signalpool::pool::{NoopProcessor, PoolStats, Processor, SimulatedProcessor, TaskPool};
use signalpool::validation::{ScoringPolicy, ValidationPolicy};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(
        max_concurrency = config.pool.max_concurrency,
        batch_size = config.pool.batch_size,
        "signalpool loaded config"
    );

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Run {
            file,
            max_concurrency,
            format,
        } => cmd_run(&config, &file, max_concurrency, format).await,
        Command::Batch {
            file,
            batch_size,
            format,
        } => cmd_batch(&config, &file, batch_size, format).await,
        Command::Score { file, format } => cmd_score(&config, &file, format),
    }
}

/// Per-signal line of `batch` and `score` output
#[derive(Debug, Serialize)]
struct ScoreRow {
    id: String,
    symbol: String,
    score: i32,
    valid: bool,
}

fn score_signal(policy: &ScoringPolicy, signal: &Signal) -> ScoreRow {
    let score = policy.score(signal);
    let valid = policy.review(signal, policy.passes(score));
    ScoreRow {
        id: signal.id.clone(),
        symbol: signal.symbol.clone(),
        score,
        valid,
    }
}

async fn cmd_run(config: &Config, file: &Path, max_concurrency: Option<usize>, format: OutputFormat) -> Result<()> {
    debug!(file = %file.display(), ?max_concurrency, ?format, "cmd_run: called");
    let signals = load_signals(file)?;

    let pool = TaskPool::new(
        config.pool.clone(),
        SimulatedProcessor::new(config.simulation.clone()),
        ScoringPolicy::new(config.validation.clone()),
    );
    let limit = max_concurrency.unwrap_or(config.pool.max_concurrency);
    let outcomes = pool.execute_parallel(signals, limit).await;
    let stats = pool.pool_stats().await;

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "outcomes": outcomes,
                "stats": stats,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            print_outcomes(&outcomes);
            println!();
            print_stats(&stats);
        }
    }

    Ok(())
}

async fn cmd_batch(config: &Config, file: &Path, batch_size: Option<usize>, format: OutputFormat) -> Result<()> {
    debug!(file = %file.display(), ?batch_size, ?format, "cmd_batch: called");
    let signals = load_signals(file)?;
    let total = signals.len();

    let pool = TaskPool::new(config.pool.clone(), NoopProcessor, ScoringPolicy::new(config.validation.clone()));
    let simulator = SimulatedProcessor::new(config.simulation.clone());
    let policy = pool.policy();
    let size = batch_size.unwrap_or(config.pool.batch_size);

    let rows = pool
        .batch_process(
            signals,
            |signal| {
                let simulator = &simulator;
                async move {
                    simulator.process(&signal).await?;
                    Ok::<_, eyre::Report>(score_signal(policy, &signal))
                }
            },
            size,
        )
        .await;
    let stats = pool.pool_stats().await;

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "total": total,
                "results": rows,
                "stats": stats,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            print_rows(&rows);
            println!();
            println!("{} of {} signals kept (batch size {})", rows.len(), total, size.max(1));
            print_stats(&stats);
        }
    }

    Ok(())
}

fn cmd_score(config: &Config, file: &Path, format: OutputFormat) -> Result<()> {
    debug!(file = %file.display(), ?format, "cmd_score: called");
    let signals = load_signals(file)?;
    let policy = ScoringPolicy::new(config.validation.clone());
    let rows: Vec<_> = signals.iter().map(|s| score_signal(&policy, s)).collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => print_rows(&rows),
    }

    Ok(())
}

fn verdict(valid: bool) -> colored::ColoredString {
    if valid { "VALID".green() } else { "INVALID".red() }
}

fn print_outcomes(outcomes: &[Outcome<Signal>]) {
    println!("{:<12} {:<12} {:<6} {:>8}  STATUS", "ID", "SYMBOL", "TYPE", "MS");
    for outcome in outcomes {
        let status = match &outcome.failure {
            Some(reason) => reason.as_str().yellow(),
            None => verdict(outcome.valid),
        };
        println!(
            "{:<12} {:<12} {:<6} {:>8}  {}",
            outcome.id,
            outcome.item.symbol,
            outcome.item.direction.to_string(),
            outcome.processing_duration_ms,
            status
        );
    }
}

fn print_rows(rows: &[ScoreRow]) {
    println!("{:<12} {:<12} {:>6}  STATUS", "ID", "SYMBOL", "SCORE");
    for row in rows {
        println!("{:<12} {:<12} {:>6}  {}", row.id, row.symbol, row.score, verdict(row.valid));
    }
}

fn print_stats(stats: &PoolStats) {
    println!("Pool Stats");
    println!("----------");
    println!("Max concurrency: {}", stats.max_concurrency);
    println!("Peak active:     {}", stats.peak_active);
    println!("Completed:       {}", stats.completed_tasks);
    println!("Failed:          {}", stats.failed_tasks);
    println!("Avg time:        {:.1}ms", stats.avg_processing_time_ms);
    println!("Efficiency:      {:.1}%", stats.efficiency_percent);
}
