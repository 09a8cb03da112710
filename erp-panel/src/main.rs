use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use erp_panel::demo::DemoPage;
use erp_panel::notifications::{
    HttpNotificationBackend, NotificationCenter, NotificationCenterConfig, Poller,
};
use erp_panel::settings::SettingsProvider;
use erp_panel::theme::{Theme, ThemeManager};
use erp_panel::{PanelConfig, paths};
use paneldom::Document;
use panelkit::Component;
use panelkit::toast::{ToastFeed, ToastFeedConfig};
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const NOTIFICATION_BUTTON: &str = "notification-button";
const NOTIFICATIONS_PANEL: &str = "notifications-panel";
const THEME_TOGGLE: &str = "theme-toggle";

#[derive(Parser)]
#[command(name = "erp-panel", version, about = "ERP admin panel")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Backend API base URL
    #[arg(long)]
    api_url: Option<String>,
    /// Bearer token for the backend API
    #[arg(long)]
    token: Option<String>,
    /// Platform color-scheme preference
    #[arg(long, default_value = "light")]
    system_theme: Theme,
    /// Write the rendered page to this file and exit
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// Also log to the terminal
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(level: LevelFilter, verbose: bool) -> anyhow::Result<()> {
    paths::rotate_logs();
    let path = paths::log_file().unwrap_or_else(|| PathBuf::from("erp-panel.log"));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create log directory {}", parent.display()))?;
    }
    let file =
        File::create(&path).with_context(|| format!("cannot create log file {}", path.display()))?;

    let mut loggers: Vec<Box<dyn SharedLogger>> =
        vec![WriteLogger::new(level, Config::default(), file)];
    if verbose {
        loggers.push(TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    CombinedLogger::init(loggers).context("cannot initialize logger")?;
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<PanelConfig> {
    let path = cli.config.clone().or_else(paths::config_file);
    let config = match &path {
        Some(path) => PanelConfig::load(path)?,
        None => PanelConfig::default(),
    };
    let config = config.with_env().with_overrides(|key: &str| match key {
        erp_panel::config::TOKEN_ENV => cli.token.clone(),
        erp_panel::config::API_URL_ENV => cli.api_url.clone(),
        _ => None,
    });
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        config.level()?
    };
    init_logging(level, cli.verbose)?;
    log::info!("starting erp-panel against {}", config.api_url);

    let document = Document::new();
    for container in [NOTIFICATION_BUTTON, NOTIFICATIONS_PANEL, THEME_TOGGLE] {
        document.create_mount(container);
    }

    let toasts = ToastFeed::new(
        &document,
        ToastFeedConfig::default().max_visible(config.toast_max_visible),
    )?;
    let page = DemoPage::build(&document, &toasts)?;

    let backend = HttpNotificationBackend::new(&config.api_url, config.token.clone())?;
    let center = NotificationCenter::new(
        &document,
        Arc::new(backend),
        NotificationCenterConfig {
            badge_container: NOTIFICATION_BUTTON.to_string(),
            panel_container: NOTIFICATIONS_PANEL.to_string(),
            ..Default::default()
        }
        .limit(config.notification_limit)
        .on_navigate(|link| log::info!("navigate to {link}")),
    )?;

    let theme = ThemeManager::new(SettingsProvider::in_memory(), cli.system_theme);
    let active = theme.load().await;
    log::info!("theme: {active}");
    theme.mount_toggle(&document, THEME_TOGGLE)?;

    if let Some(path) = &cli.snapshot {
        center.refresh_count().await;
        let mut html = page.snapshot();
        for id in [THEME_TOGGLE, NOTIFICATION_BUTTON, NOTIFICATIONS_PANEL] {
            if let Some(mount) = document.mount(id) {
                html.push('\n');
                html.push_str(&mount.to_html());
            }
        }
        fs::write(path, html).with_context(|| format!("cannot write {}", path.display()))?;
        log::info!("snapshot written to {}", path.display());
    } else {
        let poller = Poller::start(&center, config.poll_interval());
        tokio::signal::ctrl_c()
            .await
            .context("cannot listen for ctrl-c")?;
        log::info!("shutting down");
        drop(poller);
    }

    center.destroy();
    page.destroy();
    toasts.destroy();
    Ok(())
}
