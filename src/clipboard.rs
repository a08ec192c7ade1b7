use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use arboard::Clipboard;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Host clipboard. The handle is opened on first use and kept alive so the
/// contents survive on X11/Wayland, where the owner must stay resident.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard =
                Clipboard::new().map_err(|err| ClipboardError::Unavailable(err.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("no clipboard handle".into()))
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let result = self
            .handle()?
            .set_text(text.to_owned())
            .map_err(|err| ClipboardError::Write(err.to_string()));
        if result.is_err() {
            // Reopen on the next attempt; the owner may have gone away.
            self.inner = None;
        }
        result
    }
}

/// In-memory clipboard that records writes, optionally refusing them.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub writes: Vec<String>,
    pub deny: bool,
}

impl MemoryClipboard {
    pub fn denying() -> Self {
        Self {
            writes: Vec::new(),
            deny: true,
        }
    }

    pub fn last(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }
}

impl ClipboardWriter for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.deny {
            return Err(ClipboardError::Unavailable("access denied".into()));
        }
        self.writes.push(text.to_owned());
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("{0}")]
    Launch(#[from] io::Error),
    #[error("refused")]
    Refused,
}

/// Hands a URL (or `mailto:` target) to whatever the host uses to open it.
pub trait LinkOpener {
    fn open(&mut self, target: &str) -> Result<(), OpenError>;
}

/// Default browser or mail client via `webbrowser`.
#[derive(Debug, Default)]
pub struct SystemOpener;

impl LinkOpener for SystemOpener {
    fn open(&mut self, target: &str) -> Result<(), OpenError> {
        webbrowser::open(target)?;
        Ok(())
    }
}

/// Records targets instead of launching anything. Clones share one log so a
/// caller can hand a copy to the UI and inspect it afterwards.
#[derive(Debug, Default, Clone)]
pub struct MemoryOpener {
    opened: Rc<RefCell<Vec<String>>>,
    deny: bool,
}

impl MemoryOpener {
    pub fn denying() -> Self {
        Self {
            opened: Rc::default(),
            deny: true,
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl LinkOpener for MemoryOpener {
    fn open(&mut self, target: &str) -> Result<(), OpenError> {
        if self.deny {
            return Err(OpenError::Refused);
        }
        self.opened.borrow_mut().push(target.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_records_writes() {
        let mut clipboard = MemoryClipboard::default();
        clipboard.write_text("one").unwrap();
        clipboard.write_text("two").unwrap();
        assert_eq!(clipboard.writes, vec!["one", "two"]);
        assert_eq!(clipboard.last(), Some("two"));
    }

    #[test]
    fn denying_clipboard_reports_error() {
        let mut clipboard = MemoryClipboard::denying();
        let err = clipboard.write_text("x").unwrap_err();
        assert!(matches!(err, ClipboardError::Unavailable(_)));
        assert!(clipboard.writes.is_empty());
    }

    #[test]
    fn memory_opener_clones_share_the_log() {
        let opener = MemoryOpener::default();
        let mut handed_out = opener.clone();
        handed_out.open("https://github.com/johndoe").unwrap();
        handed_out.open("mailto:johndoe@gmail.com").unwrap();
        assert_eq!(
            opener.opened(),
            vec!["https://github.com/johndoe", "mailto:johndoe@gmail.com"]
        );
    }

    #[test]
    fn denying_opener_records_nothing() {
        let mut opener = MemoryOpener::denying();
        assert!(matches!(opener.open("https://x.com/a"), Err(OpenError::Refused)));
        assert!(opener.opened().is_empty());
    }
}
