//! Full-screen moon timer.
//!
//! Type a duration into the fields, press space to start or pause, `r` to
//! reset and `q` to quit.

use anyhow::Context;
use bubbletea_moontimer::prelude::*;
use bubbletea_rs::{quit, Cmd, KeyMsg, Model, Msg, Program};
use clap::Parser;
use once_cell::sync::OnceCell;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Crescent-moon countdown timer for the terminal.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
struct Cli {
    /// Moon radius in terminal rows.
    #[arg(long, default_value_t = 6)]
    radius: usize,

    /// Color of the lit part of the moon.
    #[arg(long, default_value = "#FFFFFF")]
    lit_color: String,

    /// Color of the shadowed part of the moon.
    #[arg(long, default_value = "#333333")]
    dark_color: String,

    /// Hide the key help line.
    #[arg(long)]
    no_help: bool,

    /// Write logs to this file. Filter with RUST_LOG.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn options(&self) -> Vec<MoonTimerOption> {
        let mut opts = vec![
            with_radius(self.radius),
            with_lit_color(self.lit_color.as_str()),
            with_dark_color(self.dark_color.as_str()),
        ];
        if self.no_help {
            opts.push(without_help());
        }
        opts
    }
}

// Model::init takes no arguments, so the parsed flags are handed over here.
static CLI: OnceCell<Cli> = OnceCell::new();

struct App {
    timer: MoonTimer,
    quit: Binding,
}

impl Model for App {
    fn init() -> (Self, Option<Cmd>) {
        let opts = CLI.get().map(Cli::options).unwrap_or_default();
        let mut timer = moontimer_new(&opts);
        let cmd = timer.focus();
        let quit = new_binding(vec![
            with_keys_str(&["q", "ctrl+c", "esc"]),
            with_help("q", "quit"),
        ]);
        (Self { timer, quit }, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            if self.quit.matches(key) {
                self.timer.teardown();
                return Some(quit());
            }
        }

        if let Some(done) = msg.downcast_ref::<CountdownTimeoutMsg>() {
            if done.id == self.timer.countdown().id() {
                info!(
                    total = self.timer.countdown().total_seconds(),
                    "countdown finished"
                );
            }
        }

        self.timer.update(msg)
    }

    fn view(&self) -> String {
        let help = self.quit.help();
        format!("\n{}\n\n{} {}\n", self.timer.view(), help.key, help.desc)
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bubbletea_moontimer=info,moontimer=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout belongs to the terminal UI, so logs only go to a file.
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    info!(radius = cli.radius, "starting moon timer");

    CLI.set(cli)
        .map_err(|_| anyhow::anyhow!("command line already initialized"))?;

    let program = Program::<App>::builder()
        .alt_screen(true)
        .build()
        .context("failed to build terminal program")?;
    program.run().await.context("terminal program failed")?;

    info!("moon timer exited");
    Ok(())
}
