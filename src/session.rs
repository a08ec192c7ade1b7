use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::catalog::{GeneratedItem, GeneratedKey, LinkKind};
use crate::clipboard::ClipboardWriter;
use crate::status::Status;

pub const MSG_FAVORITE_ADDED: &str = "Added to favorites!";
pub const MSG_FAVORITE_REMOVED: &str = "Removed from favorites!";
pub const MSG_LINK_UPDATED: &str = "Link updated!";
pub const MSG_FAVORITE_UPDATED: &str = "Favorite link updated!";
pub const MSG_LINK_RESET: &str = "Link reset to default!";
pub const MSG_COPY_FAILED: &str = "Failed to copy.";
pub const MSG_MAIL_CLIENT: &str = "Opening default email client...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FavoriteId(u64);

impl fmt::Display for FavoriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fav-{}", self.0)
    }
}

/// Which surface an item lives on. Generated and favorite identities never
/// collide because they are different variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemId {
    Generated(GeneratedKey),
    Favorite(FavoriteId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteEntry {
    pub id: FavoriteId,
    pub link: String,
    pub kind: LinkKind,
    pub name: String,
    pub saved_at: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added(FavoriteId),
    Removed(FavoriteId),
    Rejected,
}

#[derive(Debug, Clone)]
struct EditSlot<T> {
    target: T,
    draft: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Surface {
    Generated,
    Favorites,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub notice_ttl: Duration,
    pub mail_notice_ttl: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            notice_ttl: Duration::from_secs(2),
            mail_notice_ttl: Duration::from_secs(3),
        }
    }
}

/// In-memory state for one run: the username, saved favorites, per-item
/// overrides and the two edit slots. Nothing here outlives the process.
#[derive(Debug)]
pub struct Session {
    options: Options,
    username: String,
    favorites: Vec<FavoriteEntry>,
    overrides: HashMap<GeneratedKey, String>,
    editing_generated: Option<EditSlot<GeneratedKey>>,
    editing_favorite: Option<EditSlot<FavoriteId>>,
    last_opened: Option<Surface>,
    next_favorite_id: u64,
    status: Status,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Session {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            username: String::new(),
            favorites: Vec::new(),
            overrides: HashMap::new(),
            editing_generated: None,
            editing_favorite: None,
            last_opened: None,
            next_favorite_id: 1,
            status: Status::default(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Whitespace is dropped at capture time, anywhere in the input.
    pub fn set_username(&mut self, raw: &str) {
        self.username = raw.chars().filter(|ch| !ch.is_whitespace()).collect();
    }

    pub fn clear_username(&mut self) {
        self.username.clear();
    }

    pub fn favorites(&self) -> &[FavoriteEntry] {
        &self.favorites
    }

    pub fn favorite(&self, id: FavoriteId) -> Option<&FavoriteEntry> {
        self.favorites.iter().find(|fav| fav.id == id)
    }

    pub fn is_favorited(&self, link: &str) -> bool {
        !link.is_empty() && self.favorites.iter().any(|fav| fav.link == link)
    }

    pub fn toggle_favorite(&mut self, link: &str, kind: LinkKind, name: &str) -> FavoriteToggle {
        if link.is_empty() {
            return FavoriteToggle::Rejected;
        }
        if let Some(existing) = self.favorites.iter().find(|fav| fav.link == link) {
            let id = existing.id;
            self.remove_favorite(id);
            return FavoriteToggle::Removed(id);
        }

        let id = FavoriteId(self.next_favorite_id);
        self.next_favorite_id += 1;
        self.favorites.push(FavoriteEntry {
            id,
            link: link.to_string(),
            kind,
            name: name.to_string(),
            saved_at: Local::now(),
        });
        debug!(%id, link, %kind, "favorite added");
        self.notify(MSG_FAVORITE_ADDED);
        FavoriteToggle::Added(id)
    }

    pub fn remove_favorite(&mut self, id: FavoriteId) {
        let before = self.favorites.len();
        self.favorites.retain(|fav| fav.id != id);
        if self.favorites.len() != before {
            debug!(%id, "favorite removed");
            self.notify(MSG_FAVORITE_REMOVED);
        }
    }

    pub fn start_edit_generated(&mut self, key: GeneratedKey, current: &str) {
        self.editing_generated = Some(EditSlot {
            target: key,
            draft: current.to_string(),
        });
        self.last_opened = Some(Surface::Generated);
    }

    pub fn start_edit_favorite(&mut self, id: FavoriteId, current: &str) {
        self.editing_favorite = Some(EditSlot {
            target: id,
            draft: current.to_string(),
        });
        self.last_opened = Some(Surface::Favorites);
    }

    /// Writes into the most recently opened slot that is still open.
    pub fn update_edit_draft(&mut self, value: &str) {
        if let Some(draft) = self.active_draft_mut() {
            *draft = value.to_string();
        }
    }

    pub fn active_draft(&self) -> Option<&str> {
        let generated = self.editing_generated.as_ref().map(|s| s.draft.as_str());
        let favorite = self.editing_favorite.as_ref().map(|s| s.draft.as_str());
        match self.last_opened {
            Some(Surface::Favorites) => favorite.or(generated),
            _ => generated.or(favorite),
        }
    }

    fn active_draft_mut(&mut self) -> Option<&mut String> {
        if self.last_opened == Some(Surface::Favorites) && self.editing_favorite.is_some() {
            return self.editing_favorite.as_mut().map(|slot| &mut slot.draft);
        }
        if self.editing_generated.is_some() {
            return self.editing_generated.as_mut().map(|slot| &mut slot.draft);
        }
        self.editing_favorite.as_mut().map(|slot| &mut slot.draft)
    }

    pub fn commit_edit_generated(&mut self) {
        let Some(slot) = self.editing_generated.take() else {
            return;
        };
        debug!(kind = %slot.target.kind, template = %slot.target.template, "override stored");
        self.overrides.insert(slot.target, slot.draft);
        self.notify(MSG_LINK_UPDATED);
    }

    pub fn commit_edit_favorite(&mut self) {
        let Some(slot) = self.editing_favorite.take() else {
            return;
        };
        if let Some(fav) = self.favorites.iter_mut().find(|fav| fav.id == slot.target) {
            fav.link = slot.draft;
            debug!(id = %slot.target, "favorite link rewritten");
            self.notify(MSG_FAVORITE_UPDATED);
        }
    }

    /// Commits whichever slot was opened last. Used when the editor loses focus.
    pub fn commit_active_edit(&mut self) {
        match self.last_opened {
            Some(Surface::Favorites) if self.editing_favorite.is_some() => {
                self.commit_edit_favorite()
            }
            _ if self.editing_generated.is_some() => self.commit_edit_generated(),
            _ => self.commit_edit_favorite(),
        }
    }

    pub fn reset_override(&mut self, key: &GeneratedKey) {
        if self.overrides.remove(key).is_some() {
            debug!(kind = %key.kind, template = %key.template, "override cleared");
        }
        self.notify(MSG_LINK_RESET);
    }

    pub fn has_override(&self, key: &GeneratedKey) -> bool {
        self.overrides.contains_key(key)
    }

    pub fn is_editing(&self, item: &ItemId) -> bool {
        match item {
            ItemId::Generated(key) => self
                .editing_generated
                .as_ref()
                .is_some_and(|slot| &slot.target == key),
            ItemId::Favorite(id) => self
                .editing_favorite
                .as_ref()
                .is_some_and(|slot| slot.target == *id),
        }
    }

    pub fn is_any_editing(&self) -> bool {
        self.editing_generated.is_some() || self.editing_favorite.is_some()
    }

    /// Draft > override > computed candidate. Overrides stay hidden while the
    /// username is empty.
    pub fn effective_generated<'a>(&'a self, item: &'a GeneratedItem) -> &'a str {
        if let Some(slot) = &self.editing_generated {
            if slot.target == item.key {
                return &slot.draft;
            }
        }
        if self.username.trim().is_empty() {
            return "";
        }
        self.overrides
            .get(&item.key)
            .map(String::as_str)
            .unwrap_or(&item.candidate)
    }

    pub fn effective_favorite<'a>(&'a self, entry: &'a FavoriteEntry) -> &'a str {
        match &self.editing_favorite {
            Some(slot) if slot.target == entry.id => &slot.draft,
            _ => &entry.link,
        }
    }

    /// Never fails: a refused clipboard becomes a status message.
    pub fn copy_link(
        &mut self,
        clipboard: &mut dyn ClipboardWriter,
        text: &str,
        kind: LinkKind,
    ) -> bool {
        if text.is_empty() {
            return false;
        }
        match clipboard.write_text(text) {
            Ok(()) => {
                self.notify(format!("Copied {kind}!"));
                true
            }
            Err(_) => {
                self.notify(MSG_COPY_FAILED);
                false
            }
        }
    }

    pub fn announce_mail_client(&mut self) {
        let ttl = self.options.mail_notice_ttl;
        self.status.show(MSG_MAIL_CLIENT, ttl, Instant::now());
    }

    /// For messages that do not come from a session transition.
    pub fn notify<S: Into<String>>(&mut self, text: S) {
        let ttl = self.options.notice_ttl;
        self.status.show(text, ttl, Instant::now());
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.text()
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.status.tick(now)
    }
}
