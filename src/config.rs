use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_ENV_PREFIX: &str = "NAMECHECK";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub ui: UIConfig,
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UIConfig {
    #[serde(default = "default_tick_rate", with = "humantime_serde")]
    pub tick_rate: Duration,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            tick_rate: default_tick_rate(),
        }
    }
}

fn default_tick_rate() -> Duration {
    Duration::from_millis(120)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusConfig {
    #[serde(default = "default_notice_ttl", with = "humantime_serde")]
    pub notice_ttl: Duration,
    #[serde(default = "default_mail_notice_ttl", with = "humantime_serde")]
    pub mail_notice_ttl: Duration,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            notice_ttl: default_notice_ttl(),
            mail_notice_ttl: default_mail_notice_ttl(),
        }
    }
}

fn default_notice_ttl() -> Duration {
    Duration::from_secs(2)
}

fn default_mail_notice_ttl() -> Duration {
    Duration::from_secs(3)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub extra_social: Vec<SocialPlatform>,
    #[serde(default)]
    pub extra_domains: Vec<String>,
    #[serde(default)]
    pub extra_email: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialPlatform {
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".into()
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub config_file: Option<PathBuf>,
    pub env_prefix: Option<String>,
}

pub fn load(options: LoadOptions) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(path) = options.config_file.as_ref() {
        if path.exists() {
            let from_file = read_config_file(path)?;
            cfg = merge_config(cfg, from_file);
        }
    } else if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            let from_file = read_config_file(&default_path)?;
            cfg = merge_config(cfg, from_file);
        }
    }

    let prefix = options.env_prefix.as_deref().unwrap_or(DEFAULT_ENV_PREFIX);
    apply_env(&mut cfg, prefix);

    Ok(cfg)
}

fn read_config_file(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&data)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
    Ok(config)
}

fn merge_config(mut base: Config, other: Config) -> Config {
    if !other.ui.tick_rate.is_zero() {
        base.ui.tick_rate = other.ui.tick_rate;
    }

    if !other.status.notice_ttl.is_zero() {
        base.status.notice_ttl = other.status.notice_ttl;
    }
    if !other.status.mail_notice_ttl.is_zero() {
        base.status.mail_notice_ttl = other.status.mail_notice_ttl;
    }

    base.catalog.extra_social.extend(other.catalog.extra_social);
    base.catalog.extra_domains.extend(other.catalog.extra_domains);
    base.catalog.extra_email.extend(other.catalog.extra_email);

    if other.log.file.is_some() {
        base.log.file = other.log.file;
    }
    if !other.log.filter.is_empty() {
        base.log.filter = other.log.filter;
    }

    base
}

/// Env values override the merged file config key by key, so unset keys keep
/// whatever the file provided.
fn apply_env(cfg: &mut Config, prefix: &str) {
    let mut map: HashMap<String, String> = HashMap::new();
    let upper_prefix = format!("{}_", prefix.to_uppercase());

    for (key, value) in env::vars() {
        if let Some(stripped) = key.strip_prefix(&upper_prefix) {
            let normalized = stripped.to_ascii_lowercase().replace("__", ".");
            map.insert(normalized, value);
        }
    }

    for (key, value) in map {
        apply_env_value(cfg, &key, value);
    }
}

fn apply_env_value(cfg: &mut Config, key: &str, value: String) {
    match key {
        "ui.tick_rate" => {
            if let Ok(duration) = humantime::parse_duration(&value) {
                cfg.ui.tick_rate = duration;
            }
        }
        "status.notice_ttl" => {
            if let Ok(duration) = humantime::parse_duration(&value) {
                cfg.status.notice_ttl = duration;
            }
        }
        "status.mail_notice_ttl" => {
            if let Ok(duration) = humantime::parse_duration(&value) {
                cfg.status.mail_notice_ttl = duration;
            }
        }
        "catalog.extra_domains" => cfg.catalog.extra_domains = split_list(&value),
        "catalog.extra_email" => cfg.catalog.extra_email = split_list(&value),
        "catalog.extra_social" => {
            // name=prefix pairs, comma separated
            cfg.catalog.extra_social = split_list(&value)
                .into_iter()
                .filter_map(|pair| {
                    let (name, prefix) = pair.split_once('=')?;
                    Some(SocialPlatform {
                        name: name.trim().to_string(),
                        prefix: prefix.trim().to_string(),
                    })
                })
                .collect();
        }
        "log.file" => cfg.log.file = Some(PathBuf::from(value)),
        "log.filter" => cfg.log.filter = value,
        _ => {}
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn default_path() -> Option<PathBuf> {
    default_config_path()
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("namecheck").join("config.yaml"))
}
