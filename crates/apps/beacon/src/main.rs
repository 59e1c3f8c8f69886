//! Beacon - headless host for the admin notification bell
//!
//! Mounts the bell onto a static admin navbar, polls the summary endpoint
//! and prints the badge whenever it changes. Commands on stdin drive the
//! dropdown the way clicks would in the browser.
//!
//! Usage: `beacon [CONFIG_FILE]`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use bell::config::ENV_CONFIG_FILE;
use bell::{ClickEvent, HttpSummarySource, StaticPage, Widget, WidgetConfig, WidgetView};
use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

mod commands;

use commands::{Command, HELP};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    // Explicit config file: first argument, else BEACON_CONFIG
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(ENV_CONFIG_FILE).map(PathBuf::from));

    let widget_config = match WidgetConfig::resolve(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) if config_path.is_some() => return Err(e),
        Err(e) => {
            warn!("Failed to load widget config, using defaults: {}", e);
            WidgetConfig::default().with_env()
        }
    };

    let source = Arc::new(HttpSummarySource::from_config(&widget_config)?);
    info!(
        "Polling {} every {:?}",
        source.url(),
        widget_config.poll_interval()
    );

    let page = StaticPage::admin_navbar();
    let widget = Widget::initialize(widget_config, source, &page).await;
    if widget.is_inert() {
        warn!("Notification bell was not mounted, nothing to do");
        return Ok(());
    }

    print_view(&widget.view(), &widget);
    println!("{}", HELP);

    let mut views = widget.watch();
    views.mark_unchanged();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                print_view(&view, &widget);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !run_command(Command::parse(&line), &widget).await {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    widget.dispose();
    info!("Beacon stopped");
    Ok(())
}

/// Apply one command. Returns false when the host should exit.
async fn run_command(command: Command, widget: &Widget) -> bool {
    let root = widget.root_id().to_string();
    match command {
        Command::Toggle => {
            widget.toggle();
        }
        Command::ClickInside => {
            widget.handle_document_click(&ClickEvent::new([format!("{}-content", root), root]));
        }
        Command::ClickOutside => {
            widget.handle_document_click(&ClickEvent::new(["content-wrapper", "body"]));
        }
        Command::Refresh => {
            let outcome = widget.refresh().await;
            info!("Refresh: {:?}", outcome);
        }
        Command::Show => println!("{}", widget.html()),
        Command::Help => println!("{}", HELP),
        Command::Quit => return false,
        Command::Unknown(input) => warn!("Unknown command {:?}, try 'help'", input),
    }
    true
}

fn print_view(view: &WidgetView, widget: &Widget) {
    let badge = if view.badge.hidden {
        "no unreplied messages".to_string()
    } else {
        format!("[{}] {}", view.badge.text, view.badge.header_text)
    };
    println!("bell: {}", badge);
    if view.open {
        println!("{}", view.to_html(widget.root_id()));
    }
}
