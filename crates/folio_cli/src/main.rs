//! Folio CLI
//!
//! Simulate the portfolio's scroll reveals, inspect the animation registry,
//! and send contact messages.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_contact::{ContactForm, ContactSubmitter, LogTransport};
use folio_reveal::RevealEngine;
use folio_site::{Page, SiteContent};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod simulate;

use config::FolioConfig;
use simulate::ScrollPlan;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Folio portfolio tooling", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scroll through the page and print the reveal timeline
    Simulate {
        /// Configuration file (defaults to ./folio.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Site content file (defaults to the built-in page)
        #[arg(long)]
        content: Option<PathBuf>,

        /// Viewport width in pixels
        #[arg(long, default_value = "1280")]
        viewport_width: f32,

        /// Viewport height in pixels
        #[arg(long, default_value = "800")]
        viewport_height: f32,

        /// Pixels scrolled per frame
        #[arg(long, default_value = "40")]
        step: f32,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the animation registry as JSON
    Variants {
        /// Configuration file (defaults to ./folio.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate and submit a contact message
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        message: String,

        /// Configuration file (defaults to ./folio.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            config,
            content,
            viewport_width,
            viewport_height,
            step,
            fps,
            json,
        } => {
            let plan = ScrollPlan {
                viewport_width,
                viewport_height,
                step,
                fps,
            };
            cmd_simulate(config, content, plan, json)
        }

        Commands::Variants { config } => cmd_variants(config),

        Commands::Contact {
            name,
            email,
            message,
            config,
        } => cmd_contact(ContactForm::new(name, email, message), config),
    }
}

fn cmd_simulate(
    config: Option<PathBuf>,
    content: Option<PathBuf>,
    plan: ScrollPlan,
    json: bool,
) -> Result<()> {
    let config = FolioConfig::load(config.as_deref())?;
    let content = match content {
        Some(path) => SiteContent::load(&path)?,
        None => SiteContent::default(),
    };

    if !(plan.viewport_height > 0.0) || !(plan.step > 0.0) || plan.fps == 0 {
        anyhow::bail!("viewport height, step, and fps must be positive");
    }

    let registry = Arc::new(config.registry()?);
    let mut engine = RevealEngine::with_settings(registry, config.reveal.clone());
    let page = Page::mount(&mut engine, &content, plan.viewport_width)
        .context("Failed to mount page")?;

    info!(
        "Simulating {}px page in a {}x{} viewport",
        page.height(),
        plan.viewport_width,
        plan.viewport_height
    );
    let report = simulate::run(&mut engine, &page, plan);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for transition in &report.timeline {
        println!(
            "{:>8.3}s  {:<28} {:?} -> {:?}",
            transition.at,
            transition.label.as_deref().unwrap_or("-"),
            transition.from,
            transition.to
        );
    }
    println!();
    println!(
        "{} of {} reveals completed in {:.2}s ({} frames)",
        report.revealed, report.registered, report.duration, report.frames
    );
    Ok(())
}

fn cmd_variants(config: Option<PathBuf>) -> Result<()> {
    let config = FolioConfig::load(config.as_deref())?;
    let registry = config.registry()?;
    println!("{}", serde_json::to_string_pretty(&registry.snapshot())?);
    Ok(())
}

fn cmd_contact(mut form: ContactForm, config: Option<PathBuf>) -> Result<()> {
    let config = FolioConfig::load(config.as_deref())?;
    let email = config.email();

    // Surface the real cause on the terminal; the status stays generic
    form.validate().context("Invalid contact form")?;
    email.credentials().context("Email delivery is not configured")?;

    let mut submitter = ContactSubmitter::new(email, LogTransport);
    let status = submitter.submit(&mut form);
    if !status.is_success() {
        anyhow::bail!("{}", status.message());
    }
    println!("{}", status.message());
    Ok(())
}
