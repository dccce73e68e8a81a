//! Command-line driver for EssayDesk core use-cases.
//!
//! # Responsibility
//! - Run the same presenters and services the mobile shell uses.
//! - Print notices the way the shell would show its alerts.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use essaydesk_core::config::{
    normalize_base_url, ENV_BACKEND_URL, ENV_DB_PATH, ENV_HTTP_TIMEOUT_SECS, ENV_LOG_DIR,
    ENV_LOG_LEVEL,
};
use essaydesk_core::db::open_db;
use essaydesk_core::{
    init_logging_with, ArgumentComposer, BackendClient, CoreConfig, EssayListPresenter,
    EssayListView, EssayRecord, EssayStore, ExportService, LogSettings, NoShareSheet,
    ScreenLifecycle, SqliteKvStore, SubmitRejected, TemplatePicker, UserNotice,
};
use log::info;

#[derive(Debug, Parser)]
#[command(name = "essaydesk")]
#[command(about = "Saved essays, templates and argument generation from the terminal")]
struct Cli {
    /// Template/generation backend base URL
    #[arg(long, env = ENV_BACKEND_URL)]
    backend_url: Option<String>,

    /// SQLite file holding saved essays
    #[arg(long, env = ENV_DB_PATH)]
    db_path: Option<PathBuf>,

    /// Backend request timeout in seconds
    #[arg(long, env = ENV_HTTP_TIMEOUT_SECS)]
    http_timeout_secs: Option<u64>,

    /// trace|debug|info|warn|error
    #[arg(long, env = ENV_LOG_LEVEL)]
    log_level: Option<String>,

    /// Absolute directory for rotating log files
    #[arg(long, env = ENV_LOG_DIR)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show saved essays as a two-column grid, newest first
    List,
    /// Print one saved essay
    Show { id: String },
    /// Save a new essay
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        text: String,
        /// Explicit id; generated when omitted
        #[arg(long)]
        id: Option<String>,
    },
    /// Delete a saved essay
    Delete { id: String },
    /// Write `{title}.txt` for a saved essay
    Export {
        id: String,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Fetch writing templates
    Templates {
        /// Viewport width used for the column layout
        #[arg(long, default_value_t = 800.0)]
        width: f64,
    },
    /// Generate an argumentative essay for a theme
    Generate { theme: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli);

    let settings = LogSettings::from_config(&config).map_err(|err| anyhow!(err))?;
    init_logging_with(settings).map_err(|err| anyhow!(err))?;
    info!("event=cli_start module=cli status=ok");

    match &cli.cmd {
        Command::List => cmd_list(&config),
        Command::Show { id } => cmd_show(&config, id),
        Command::Add { title, text, id } => cmd_add(&config, title, text, id.as_deref()),
        Command::Delete { id } => cmd_delete(&config, id),
        Command::Export { id, dir } => cmd_export(&config, id, dir),
        Command::Templates { width } => cmd_templates(&config, *width).await,
        Command::Generate { theme } => cmd_generate(&config, theme).await,
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn resolve_config(cli: &Cli) -> CoreConfig {
    let mut config = CoreConfig::from_env();
    if let Some(url) = cli.backend_url.as_deref() {
        config.backend_base_url = normalize_base_url(url);
    }
    if let Some(path) = &cli.db_path {
        config.db_path = path.clone();
    }
    if let Some(secs) = cli.http_timeout_secs.filter(|secs| *secs > 0) {
        config.http_timeout = Duration::from_secs(secs);
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = dir.clone();
    }
    config
}

fn with_presenter<T>(
    config: &CoreConfig,
    f: impl FnOnce(&mut EssayListPresenter<SqliteKvStore<'_>>) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let conn = open_db(&config.db_path)
        .with_context(|| format!("open essay store {}", config.db_path.display()))?;
    let mut presenter = EssayListPresenter::new(EssayStore::new(SqliteKvStore::new(&conn)));
    presenter.on_focus();
    f(&mut presenter)
}

fn backend(config: &CoreConfig) -> anyhow::Result<BackendClient> {
    BackendClient::from_config(config).context("build backend client")
}

/// Prints a notice; error notices end the command with a failure status.
fn report(notice: UserNotice) -> anyhow::Result<()> {
    if notice.is_error() {
        bail!("{}: {}", notice.title, notice.message);
    }
    println!("{}: {}", notice.title, notice.message);
    Ok(())
}

// ── Commands ────────────────────────────────────────────────────────────────

fn cmd_list(config: &CoreConfig) -> anyhow::Result<()> {
    with_presenter(config, |presenter| {
        match presenter.view() {
            EssayListView::Empty { message } => println!("{message}"),
            EssayListView::Grid { rows } => {
                for row in rows {
                    let right = row
                        .right
                        .map(|card| format!("{} [{}]", card.title, card.id))
                        .unwrap_or_default();
                    println!("{} [{}]\t{}", row.left.title, row.left.id, right);
                }
            }
        }
        Ok(())
    })
}

fn cmd_show(config: &CoreConfig, id: &str) -> anyhow::Result<()> {
    with_presenter(config, |presenter| {
        let request = presenter
            .open(id)
            .ok_or_else(|| anyhow!("essay not found: {id}"))?;
        for (key, value) in &request.params {
            println!("{key}: {value}");
        }
        Ok(())
    })
}

fn cmd_add(config: &CoreConfig, title: &str, text: &str, id: Option<&str>) -> anyhow::Result<()> {
    let record = match id {
        Some(id) => EssayRecord::with_id(id, title, text)?,
        None => EssayRecord::new(title, text),
    };
    let conn = open_db(&config.db_path)
        .with_context(|| format!("open essay store {}", config.db_path.display()))?;
    EssayStore::new(SqliteKvStore::new(&conn))
        .save(&record)
        .context("save essay")?;
    println!("{}", record.id);
    Ok(())
}

fn cmd_delete(config: &CoreConfig, id: &str) -> anyhow::Result<()> {
    with_presenter(config, |presenter| report(presenter.delete(id)))
}

fn cmd_export(config: &CoreConfig, id: &str, dir: &Path) -> anyhow::Result<()> {
    let exporter = ExportService::native(dir, NoShareSheet);
    with_presenter(config, |presenter| report(presenter.export(id, &exporter)))
}

async fn cmd_templates(config: &CoreConfig, width: f64) -> anyhow::Result<()> {
    let backend = backend(config)?;
    let mut picker = TemplatePicker::new();
    picker.mount(&backend).await;
    if let Some(notice) = picker.notice().cloned() {
        return report(notice);
    }
    for row in picker.layout(width) {
        let cells: Vec<String> = row
            .iter()
            .map(|card| format!("{} [{}]", card.title, card.id))
            .collect();
        println!("{}", cells.join("\t"));
    }
    Ok(())
}

async fn cmd_generate(config: &CoreConfig, theme: &str) -> anyhow::Result<()> {
    let backend = backend(config)?;
    let mut composer = ArgumentComposer::new();
    composer.on_focus();
    composer.set_theme(theme);
    match composer.submit(&backend).await {
        Ok(()) => {}
        Err(SubmitRejected::EmptyTheme(notice)) => return report(notice),
        Err(SubmitRejected::Busy) => bail!("a generation request is already running"),
    }
    println!("{}", composer.response());
    Ok(())
}
