use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use serde::Serialize;
use tracing::info;

use crate::catalog::{Catalog, LinkKind};
use crate::clipboard::{SystemClipboard, SystemOpener};
use crate::config;
use crate::logging;
use crate::session::{self, Session};
use crate::ui;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config_file: Option<PathBuf>,
}

fn load_config(opts: &RunOptions) -> Result<config::Config> {
    config::load(config::LoadOptions {
        config_file: opts.config_file.clone(),
        env_prefix: None,
    })
    .context("load config")
}

pub fn run(opts: RunOptions) -> Result<()> {
    let cfg = load_config(&opts)?;
    let config_path = opts.config_file.clone().or_else(config::default_path);
    let display_path = friendly_path(config_path.as_ref());

    if logging::init(&cfg.log).context("init logging")? {
        info!(config = %display_path, "logging to file");
    }

    let catalog = Catalog::from_config(&cfg.catalog);
    info!(templates = catalog.len(), "catalog ready");

    let session = Session::new(session::Options {
        notice_ttl: cfg.status.notice_ttl,
        mail_notice_ttl: cfg.status.mail_notice_ttl,
    });

    let options = ui::Options {
        catalog,
        session,
        clipboard: Box::new(SystemClipboard::new()),
        opener: Box::new(SystemOpener),
        tick_rate: cfg.ui.tick_rate,
        config_path: display_path,
    };

    let mut model = ui::Model::new(options);
    model.run()?;
    info!("ui closed, session discarded");

    Ok(())
}

#[derive(Debug, Serialize)]
struct ListedLink<'a> {
    kind: LinkKind,
    name: &'a str,
    link: &'a str,
}

/// Non-interactive rendering of every generated link for `username`.
pub fn list(opts: &RunOptions, username: &str, json: bool) -> Result<String> {
    let cfg = load_config(opts)?;
    let catalog = Catalog::from_config(&cfg.catalog);

    let mut session = Session::default();
    session.set_username(username);
    ensure!(
        !session.username().is_empty(),
        "a non-empty username is required"
    );
    render_listing(&catalog, session.username(), json)
}

pub fn render_listing(catalog: &Catalog, username: &str, json: bool) -> Result<String> {
    let items = catalog.generate(username);

    if json {
        let listed: Vec<ListedLink> = items
            .iter()
            .map(|item| ListedLink {
                kind: item.kind,
                name: &item.name,
                link: &item.candidate,
            })
            .collect();
        return serde_json::to_string_pretty(&listed).context("serialize listing");
    }

    let name_width = items
        .iter()
        .map(|item| unicode_width::UnicodeWidthStr::width(item.name.as_str()))
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for kind in LinkKind::ALL {
        let mut section = items.iter().filter(|item| item.kind == kind).peekable();
        if section.peek().is_none() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(kind.section_title());
        out.push('\n');
        for item in section {
            let pad = name_width
                .saturating_sub(unicode_width::UnicodeWidthStr::width(item.name.as_str()));
            out.push_str(&format!(
                "  {}{}  {}\n",
                item.name,
                " ".repeat(pad),
                item.candidate
            ));
        }
    }
    Ok(out)
}

fn friendly_path(path: Option<&PathBuf>) -> String {
    if let Some(path) = path {
        if let Some(home) = dirs::home_dir() {
            if let Ok(stripped) = path.strip_prefix(&home) {
                let mut display = String::from("~");
                if !stripped.as_os_str().is_empty() {
                    display.push_str(&format!("/{}", stripped.display()));
                }
                return display;
            }
        }
        path.display().to_string()
    } else {
        "~/.config/namecheck/config.yaml".to_string()
    }
}
