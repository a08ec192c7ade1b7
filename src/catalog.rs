use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::config::CatalogConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Social,
    Domain,
    Email,
}

impl LinkKind {
    pub fn label(self) -> &'static str {
        match self {
            LinkKind::Social => "social",
            LinkKind::Domain => "domain",
            LinkKind::Email => "email",
        }
    }

    pub fn section_title(self) -> &'static str {
        match self {
            LinkKind::Social => "Social Media Links",
            LinkKind::Domain => "Domain Links",
            LinkKind::Email => "Email Addresses",
        }
    }

    pub const ALL: [LinkKind; 3] = [LinkKind::Social, LinkKind::Domain, LinkKind::Email];
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Profile URL: `prefix + username`.
    Prefix(String),
    /// `https://` + username + extension.
    Domain(String),
    /// username + `@` + service.
    Email(String),
}

/// Identity of a generated item. Stable across renders so overrides survive
/// username changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneratedKey {
    pub kind: LinkKind,
    pub template: String,
}

impl GeneratedKey {
    pub fn new(kind: LinkKind, template: impl Into<String>) -> Self {
        Self {
            kind,
            template: template.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub kind: LinkKind,
    pub rule: Rule,
}

impl Template {
    pub fn social(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LinkKind::Social,
            rule: Rule::Prefix(prefix.into()),
        }
    }

    pub fn domain(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            name: extension.clone(),
            kind: LinkKind::Domain,
            rule: Rule::Domain(extension),
        }
    }

    pub fn email(service: impl Into<String>) -> Self {
        let service = service.into();
        Self {
            name: format!("@{service}"),
            kind: LinkKind::Email,
            rule: Rule::Email(service),
        }
    }

    pub fn key(&self) -> GeneratedKey {
        GeneratedKey::new(self.kind, self.name.clone())
    }

    /// Empty output means "no link yet".
    pub fn render(&self, username: &str) -> String {
        let username = username.trim();
        if username.is_empty() {
            return String::new();
        }
        match &self.rule {
            Rule::Prefix(prefix) => format!("{prefix}{username}"),
            Rule::Domain(extension) => format!("https://{username}{extension}"),
            Rule::Email(service) => format!("{username}@{service}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedItem {
    pub key: GeneratedKey,
    pub name: String,
    pub kind: LinkKind,
    pub candidate: String,
}

const SOCIAL_PLATFORMS: [(&str, &str); 8] = [
    ("Facebook", "https://www.facebook.com/"),
    ("YouTube", "https://www.youtube.com/@"),
    ("LinkedIn", "https://www.linkedin.com/in/"),
    ("Instagram", "https://www.instagram.com/"),
    ("Pinterest", "https://www.pinterest.com/"),
    ("X (Twitter)", "https://x.com/"),
    ("TikTok", "https://www.tiktok.com/@"),
    ("GitHub", "https://github.com/"),
];

const DOMAIN_EXTENSIONS: [&str; 8] = [
    ".com", ".net", ".org", ".io", ".dev", ".app", ".xyz", ".info",
];

const EMAIL_SERVICES: [&str; 4] = ["gmail.com", "outlook.com", "yahoo.com", "icloud.com"];

static DEFAULT_TEMPLATES: Lazy<Vec<Template>> = Lazy::new(|| {
    let social = SOCIAL_PLATFORMS
        .iter()
        .map(|(name, prefix)| Template::social(*name, *prefix));
    let domains = DOMAIN_EXTENSIONS.iter().map(|ext| Template::domain(*ext));
    let email = EMAIL_SERVICES.iter().map(|service| Template::email(*service));
    social.chain(domains).chain(email).collect()
});

/// Ordered template set, fixed once built.
#[derive(Debug, Clone)]
pub struct Catalog {
    templates: Vec<Template>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            templates: DEFAULT_TEMPLATES.clone(),
        }
    }
}

impl Catalog {
    pub fn from_config(cfg: &CatalogConfig) -> Self {
        let mut catalog = Self::default();
        for platform in &cfg.extra_social {
            catalog.push(Template::social(
                platform.name.trim(),
                platform.prefix.trim(),
            ));
        }
        for extension in &cfg.extra_domains {
            let extension = extension.trim();
            let extension = if extension.starts_with('.') {
                extension.to_string()
            } else {
                format!(".{extension}")
            };
            catalog.push(Template::domain(extension));
        }
        for service in &cfg.extra_email {
            catalog.push(Template::email(service.trim().trim_start_matches('@')));
        }
        catalog
    }

    fn push(&mut self, template: Template) {
        if template.name.is_empty() || template.name == "." || template.name == "@" {
            return;
        }
        let kind = template.kind;
        let exists = self
            .templates
            .iter()
            .any(|existing| existing.kind == kind && existing.name == template.name);
        if exists {
            return;
        }
        // Keep templates grouped by kind so sections render contiguously.
        let insert_at = self
            .templates
            .iter()
            .rposition(|existing| existing.kind == kind)
            .map(|idx| idx + 1)
            .unwrap_or(self.templates.len());
        self.templates.insert(insert_at, template);
    }

    pub fn of_kind(&self, kind: LinkKind) -> impl Iterator<Item = &Template> {
        self.templates.iter().filter(move |t| t.kind == kind)
    }

    pub fn generate(&self, username: &str) -> Vec<GeneratedItem> {
        self.templates
            .iter()
            .map(|template| GeneratedItem {
                key: template.key(),
                name: template.name.clone(),
                kind: template.kind,
                candidate: template.render(username),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
