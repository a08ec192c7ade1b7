use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

use crate::catalog::{Catalog, GeneratedItem, LinkKind};
use crate::clipboard::{ClipboardWriter, LinkOpener};
use crate::session::{FavoriteEntry, ItemId, Session};

const COLOR_BG: Color = Color::Rgb(30, 30, 46);
const COLOR_PANEL_BG: Color = Color::Rgb(24, 24, 36);
const COLOR_PANEL_FOCUSED_BG: Color = Color::Rgb(49, 50, 68);
const COLOR_PANEL_SELECTED_BG: Color = Color::Rgb(69, 71, 90);
const COLOR_BORDER_IDLE: Color = Color::Rgb(49, 50, 68);
const COLOR_BORDER_FOCUSED: Color = Color::Rgb(137, 180, 250);
const COLOR_TEXT_PRIMARY: Color = Color::Rgb(205, 214, 244);
const COLOR_TEXT_SECONDARY: Color = Color::Rgb(166, 173, 200);
const COLOR_ACCENT: Color = Color::Rgb(137, 180, 250);
const COLOR_SUCCESS: Color = Color::Rgb(166, 227, 161);
const COLOR_STAR: Color = Color::Rgb(249, 226, 175);
const COLOR_EDIT_BG: Color = Color::Rgb(88, 91, 112);

const PLACEHOLDER_LINK: &str = "Enter username to generate link.";
const PLACEHOLDER_USERNAME: &str = "e.g., johndoe";
const NAME_COLUMN_WIDTH: usize = 14;
const EDIT_CURSOR: &str = "▏";
const DEFAULT_HINT: &str =
    "Type a username, Tab to browse links. f favorite · e edit · y copy · o open · ? help";

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let percent_x = percent_x.min(100);
    let percent_y = percent_y.min(100);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage(100 - percent_x - (100 - percent_x) / 2),
        ])
        .split(area);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage(100 - percent_y - (100 - percent_y) / 2),
        ])
        .split(horizontal[1]);
    vertical[1]
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Pane {
    Username,
    Links,
    Favorites,
}

impl Pane {
    fn title(self) -> &'static str {
        match self {
            Pane::Username => "Enter Username",
            Pane::Links => "Generated Links",
            Pane::Favorites => "My Favorites",
        }
    }

    fn next(self, has_favorites: bool) -> Self {
        match self {
            Pane::Username => Pane::Links,
            Pane::Links if has_favorites => Pane::Favorites,
            Pane::Links | Pane::Favorites => Pane::Username,
        }
    }
}

pub struct Options {
    pub catalog: Catalog,
    pub session: Session,
    pub clipboard: Box<dyn ClipboardWriter>,
    pub opener: Box<dyn LinkOpener>,
    pub tick_rate: Duration,
    pub config_path: String,
}

pub struct Model {
    catalog: Catalog,
    session: Session,
    clipboard: Box<dyn ClipboardWriter>,
    opener: Box<dyn LinkOpener>,
    tick_rate: Duration,
    config_path: String,
    focused_pane: Pane,
    selected_link: usize,
    selected_favorite: usize,
    help_visible: bool,
    needs_redraw: bool,
}

impl Model {
    pub fn new(opts: Options) -> Self {
        Self {
            catalog: opts.catalog,
            session: opts.session,
            clipboard: opts.clipboard,
            opener: opts.opener,
            tick_rate: opts.tick_rate,
            config_path: opts.config_path,
            focused_pane: Pane::Username,
            selected_link: 0,
            selected_favorite: 0,
            help_visible: false,
            needs_redraw: true,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        info!(templates = self.catalog.len(), "ui started");
        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        terminal.backend_mut().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut last_tick = Instant::now();

        loop {
            if self.needs_redraw {
                terminal.draw(|frame| self.draw(frame))?;
                self.needs_redraw = false;
            }

            let timeout = self
                .tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_millis(16));

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        match self.handle_key(key) {
                            Ok(true) => break,
                            Ok(false) => {}
                            Err(err) => {
                                self.session.notify(format!("Error: {}", err));
                                self.mark_dirty();
                            }
                        }
                    }
                    Event::Resize(_, _) => self.mark_dirty(),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= self.tick_rate {
                last_tick = Instant::now();
                if self.session.tick(last_tick) {
                    self.mark_dirty();
                }
            }
        }

        Ok(())
    }

    fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    fn generated(&self) -> Vec<GeneratedItem> {
        self.catalog.generate(self.session.username())
    }

    fn selected_generated(&self) -> Option<GeneratedItem> {
        self.generated().into_iter().nth(self.selected_link)
    }

    fn selected_favorite_entry(&self) -> Option<FavoriteEntry> {
        self.session
            .favorites()
            .get(self.selected_favorite)
            .cloned()
    }

    fn clamp_favorite_selection(&mut self) {
        let len = self.session.favorites().len();
        if len == 0 {
            self.selected_favorite = 0;
            if self.focused_pane == Pane::Favorites {
                self.focused_pane = Pane::Links;
            }
        } else if self.selected_favorite >= len {
            self.selected_favorite = len - 1;
        }
    }

    /// Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        self.mark_dirty();

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(true);
        }

        if self.session.is_any_editing() {
            self.handle_edit_key(key);
            return Ok(false);
        }

        if self.help_visible {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter
            ) {
                self.help_visible = false;
            }
            return Ok(false);
        }

        match self.focused_pane {
            Pane::Username => Ok(self.handle_username_key(key)),
            Pane::Links => self.handle_links_key(key.code),
            Pane::Favorites => self.handle_favorites_key(key.code),
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let mut draft = self.session.active_draft().unwrap_or_default().to_string();
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => {
                // Leaving the editor saves it, the same as losing focus.
                self.session.commit_active_edit();
            }
            KeyCode::Backspace => {
                draft.pop();
                self.session.update_edit_draft(&draft);
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.session.update_edit_draft("");
            }
            KeyCode::Char(ch) => {
                draft.push(ch);
                self.session.update_edit_draft(&draft);
            }
            _ => {}
        }
    }

    fn handle_username_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.session.clear_username();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut next = self.session.username().to_string();
                next.push(ch);
                self.session.set_username(&next);
            }
            KeyCode::Backspace => {
                let mut next = self.session.username().to_string();
                next.pop();
                self.session.set_username(&next);
            }
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => {
                self.focused_pane = Pane::Links;
            }
            _ => {}
        }
        false
    }

    fn handle_links_key(&mut self, code: KeyCode) -> Result<bool> {
        let total = self.catalog.len();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('?') => self.help_visible = true,
            KeyCode::Tab => self.cycle_focus(),
            KeyCode::Char('/') | KeyCode::Char('i') => self.focused_pane = Pane::Username,
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected_link > 0 {
                    self.selected_link -= 1;
                } else {
                    self.focused_pane = Pane::Username;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_link + 1 < total {
                    self.selected_link += 1;
                }
            }
            KeyCode::Home | KeyCode::Char('g') => self.selected_link = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected_link = total.saturating_sub(1),
            KeyCode::Char('s') => self.jump_to_favorites(),
            KeyCode::Char('f') | KeyCode::Char(' ') => {
                if let Some(item) = self.selected_generated() {
                    let value = self.session.effective_generated(&item).to_string();
                    if !value.is_empty() {
                        self.session.toggle_favorite(&value, item.kind, &item.name);
                        self.clamp_favorite_selection();
                    }
                }
            }
            KeyCode::Char('e') => {
                if let Some(item) = self.selected_generated() {
                    let value = self.session.effective_generated(&item).to_string();
                    if !value.is_empty() {
                        debug!(template = %item.name, "editing generated link");
                        self.session.start_edit_generated(item.key, &value);
                    }
                }
            }
            KeyCode::Char('r') => {
                if let Some(item) = self.selected_generated() {
                    if self.session.has_override(&item.key) {
                        self.session.reset_override(&item.key);
                    }
                }
            }
            KeyCode::Char('y') | KeyCode::Char('c') => {
                if let Some(item) = self.selected_generated() {
                    let value = self.session.effective_generated(&item).to_string();
                    self.session
                        .copy_link(self.clipboard.as_mut(), &value, item.kind);
                }
            }
            KeyCode::Char('o') | KeyCode::Enter => {
                if let Some(item) = self.selected_generated() {
                    let value = self.session.effective_generated(&item).to_string();
                    self.open_link(&value, item.kind, &item.name);
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_favorites_key(&mut self, code: KeyCode) -> Result<bool> {
        let total = self.session.favorites().len();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('?') => self.help_visible = true,
            KeyCode::Tab => self.cycle_focus(),
            KeyCode::Char('/') | KeyCode::Char('i') => self.focused_pane = Pane::Username,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_favorite = self.selected_favorite.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_favorite + 1 < total {
                    self.selected_favorite += 1;
                }
            }
            KeyCode::Char('e') => {
                if let Some(fav) = self.selected_favorite_entry() {
                    self.session.start_edit_favorite(fav.id, &fav.link);
                }
            }
            KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(fav) = self.selected_favorite_entry() {
                    self.session.remove_favorite(fav.id);
                    self.clamp_favorite_selection();
                }
            }
            KeyCode::Char('y') | KeyCode::Char('c') => {
                if let Some(fav) = self.selected_favorite_entry() {
                    self.session
                        .copy_link(self.clipboard.as_mut(), &fav.link, fav.kind);
                }
            }
            KeyCode::Char('o') | KeyCode::Enter => {
                if let Some(fav) = self.selected_favorite_entry() {
                    self.open_link(&fav.link, fav.kind, &fav.name);
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn cycle_focus(&mut self) {
        let has_favorites = !self.session.favorites().is_empty();
        self.focused_pane = self.focused_pane.next(has_favorites);
    }

    /// Terminal stand-in for scrolling the saved links into view.
    fn jump_to_favorites(&mut self) {
        if self.session.favorites().is_empty() {
            self.session.notify("No saved links yet. Press f to favorite one.");
            return;
        }
        self.focused_pane = Pane::Favorites;
        self.clamp_favorite_selection();
    }

    fn open_link(&mut self, value: &str, kind: LinkKind, label: &str) {
        if value.is_empty() {
            return;
        }
        let target = match kind {
            LinkKind::Email => format!("mailto:{value}"),
            LinkKind::Social | LinkKind::Domain => value.to_string(),
        };
        if kind == LinkKind::Email {
            self.session.announce_mail_client();
        }
        match self.opener.open(&target) {
            Ok(_) => {
                if kind != LinkKind::Email {
                    self.session
                        .notify(format!("Opened {label} in your browser."));
                }
            }
            Err(err) => {
                self.session
                    .notify(format!("Failed to open {label}: {err} (URL: {target})"));
            }
        }
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let full = frame.size();
        frame.render_widget(Block::default().style(Style::default().bg(COLOR_BG)), full);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(full);

        self.draw_status(frame, layout[0]);
        self.draw_username(frame, layout[1]);

        if self.session.favorites().is_empty() {
            self.draw_links(frame, layout[2]);
        } else {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(layout[2]);
            self.draw_links(frame, columns[0]);
            self.draw_favorites(frame, columns[1]);
        }

        let footer = Paragraph::new(self.footer_text())
            .style(
                Style::default()
                    .fg(COLOR_TEXT_SECONDARY)
                    .bg(COLOR_PANEL_BG)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(footer, layout[3]);

        if self.help_visible {
            self.draw_help(frame, layout[2]);
        }
    }

    fn draw_status(&self, frame: &mut Frame<'_>, area: Rect) {
        let mut spans = vec![Span::styled(
            " Name Checker ",
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )];
        let saved = self.session.favorites().len();
        if saved > 0 {
            spans.push(Span::styled(
                format!("★ Saved Links ({saved}) "),
                Style::default().fg(COLOR_STAR),
            ));
        }
        match self.session.status_text() {
            Some(text) => spans.push(Span::styled(
                format!(" {text}"),
                Style::default()
                    .fg(COLOR_SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )),
            None => spans.push(Span::styled(
                format!(" {DEFAULT_HINT}"),
                Style::default().fg(COLOR_TEXT_PRIMARY),
            )),
        }
        let status_line =
            Paragraph::new(Line::from(spans)).style(Style::default().bg(COLOR_PANEL_FOCUSED_BG));
        frame.render_widget(status_line, area);
    }

    fn pane_block(&self, pane: Pane, title: String) -> Block<'static> {
        let focused = self.focused_pane == pane;
        let border_style = if focused {
            Style::default().fg(COLOR_BORDER_FOCUSED)
        } else {
            Style::default().fg(COLOR_BORDER_IDLE)
        };
        let title_style = if focused {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_TEXT_SECONDARY)
        };
        Block::default()
            .title(Span::styled(title, title_style))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(COLOR_PANEL_BG))
    }

    fn draw_username(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = self
            .pane_block(Pane::Username, Pane::Username.title().to_string())
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        let username = self.session.username();
        let text = if username.is_empty() {
            Span::styled(
                PLACEHOLDER_USERNAME,
                Style::default()
                    .fg(COLOR_TEXT_SECONDARY)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::styled(
                username.to_string(),
                Style::default().fg(COLOR_TEXT_PRIMARY),
            )
        };
        frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);

        if self.focused_pane == Pane::Username && !self.session.is_any_editing() {
            let offset = UnicodeWidthStr::width(username) as u16;
            let x = inner.x.saturating_add(offset).min(inner.right().saturating_sub(1));
            frame.set_cursor(x, inner.y);
        }
    }

    fn link_row(&self, item: &GeneratedItem) -> ListItem<'static> {
        let value = self.session.effective_generated(item);
        let editing = self.session.is_editing(&ItemId::Generated(item.key.clone()));
        let favorited = self.session.is_favorited(value);

        let mut spans = vec![
            Span::styled(
                if favorited { "★ " } else { "  " },
                Style::default().fg(COLOR_STAR),
            ),
            Span::styled(
                pad_to_width(&item.name, NAME_COLUMN_WIDTH),
                Style::default()
                    .fg(COLOR_TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        spans.push(value_span(value, editing));
        if self.session.has_override(&item.key) {
            spans.push(Span::styled(
                " (edited · r resets)",
                Style::default().fg(COLOR_TEXT_SECONDARY),
            ));
        }
        ListItem::new(Line::from(spans))
    }

    fn draw_links(&self, frame: &mut Frame<'_>, area: Rect) {
        let items = self.generated();
        let mut rows: Vec<ListItem> = Vec::with_capacity(items.len() + LinkKind::ALL.len());
        let mut selected_row = None;

        for kind in LinkKind::ALL {
            let mut header_added = false;
            for (idx, item) in items.iter().enumerate().filter(|(_, i)| i.kind == kind) {
                if !header_added {
                    rows.push(ListItem::new(Line::from(Span::styled(
                        kind.section_title(),
                        Style::default()
                            .fg(COLOR_ACCENT)
                            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    ))));
                    header_added = true;
                }
                if idx == self.selected_link {
                    selected_row = Some(rows.len());
                }
                rows.push(self.link_row(item));
            }
        }

        let list = List::new(rows)
            .block(self.pane_block(Pane::Links, Pane::Links.title().to_string()))
            .highlight_style(
                Style::default()
                    .bg(COLOR_PANEL_SELECTED_BG)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        if self.focused_pane == Pane::Links {
            state.select(selected_row);
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn favorite_row(&self, fav: &FavoriteEntry) -> ListItem<'static> {
        let value = self.session.effective_favorite(fav);
        let editing = self.session.is_editing(&ItemId::Favorite(fav.id));
        let header = Line::from(vec![
            Span::styled(
                fav.name.clone(),
                Style::default()
                    .fg(COLOR_TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} · saved {}", fav.kind, fav.saved_at.format("%H:%M:%S")),
                Style::default().fg(COLOR_TEXT_SECONDARY),
            ),
        ]);
        let link = Line::from(vec![Span::raw("  "), value_span(value, editing)]);
        ListItem::new(vec![header, link, Line::default()])
    }

    fn draw_favorites(&self, frame: &mut Frame<'_>, area: Rect) {
        let favorites = self.session.favorites();
        let rows: Vec<ListItem> = favorites.iter().map(|fav| self.favorite_row(fav)).collect();
        let title = format!("{} ({})", Pane::Favorites.title(), favorites.len());
        let list = List::new(rows)
            .block(self.pane_block(Pane::Favorites, title))
            .highlight_style(
                Style::default()
                    .bg(COLOR_PANEL_SELECTED_BG)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        if self.focused_pane == Pane::Favorites && !favorites.is_empty() {
            state.select(Some(self.selected_favorite.min(favorites.len() - 1)));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_help(&self, frame: &mut Frame<'_>, area: Rect) {
        let popup_area = centered_rect(70, 70, area);
        frame.render_widget(Clear, popup_area);
        let lines: Vec<Line> = help_lines(&self.config_path)
            .into_iter()
            .map(|(keys, action)| {
                Line::from(vec![
                    Span::styled(
                        pad_to_width(keys, 16),
                        Style::default()
                            .fg(COLOR_ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(action, Style::default().fg(COLOR_TEXT_PRIMARY)),
                ])
            })
            .collect();
        let help = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(Span::styled(
                        "Keys",
                        Style::default()
                            .fg(COLOR_ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(COLOR_ACCENT))
                    .style(Style::default().bg(COLOR_PANEL_BG))
                    .padding(Padding::uniform(1)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(help, popup_area);
    }

    fn footer_text(&self) -> &'static str {
        if self.session.is_any_editing() {
            return "Editing · Enter/Esc/Tab save · Backspace delete · Ctrl-U clear";
        }
        if self.help_visible {
            return "Esc/? close help";
        }
        match self.focused_pane {
            Pane::Username => "Type to generate · Ctrl-U clear · Tab/Enter links · Esc quit",
            Pane::Links => {
                "j/k move · f favorite · e edit · r reset · y copy · o open · s saved · / username · q quit"
            }
            Pane::Favorites => "j/k move · e edit · d remove · y copy · o open · Tab next · q quit",
        }
    }
}

fn value_span(value: &str, editing: bool) -> Span<'static> {
    if editing {
        Span::styled(
            format!("{value}{EDIT_CURSOR}"),
            Style::default().fg(COLOR_TEXT_PRIMARY).bg(COLOR_EDIT_BG),
        )
    } else if value.is_empty() {
        Span::styled(
            PLACEHOLDER_LINK,
            Style::default()
                .fg(COLOR_TEXT_SECONDARY)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(
            value.to_string(),
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::UNDERLINED),
        )
    }
}

fn pad_to_width(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    if current >= width {
        format!("{text} ")
    } else {
        format!("{text}{}", " ".repeat(width - current))
    }
}

fn help_lines(config_path: &str) -> Vec<(&'static str, String)> {
    vec![
        ("Tab", "Cycle username / links / favorites".to_string()),
        ("j/k ↑/↓", "Move selection".to_string()),
        ("f, Space", "Add or remove the link from favorites".to_string()),
        ("e", "Edit the selected link in place".to_string()),
        ("r", "Reset an edited link to the generated one".to_string()),
        ("y, c", "Copy to clipboard".to_string()),
        ("o, Enter", "Open in browser (emails open your mail client)".to_string()),
        ("d, x", "Remove a saved link".to_string()),
        ("s", "Jump to saved links".to_string()),
        ("/, i", "Back to the username field".to_string()),
        ("Ctrl-U", "Clear the username".to_string()),
        ("q, Esc", "Quit (nothing is kept after exit)".to_string()),
        ("Config", config_path.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{MemoryClipboard, MemoryOpener};
    use crate::session::MSG_MAIL_CLIENT;

    fn model_with(clipboard: MemoryClipboard) -> Model {
        build_model(clipboard, MemoryOpener::default())
    }

    fn build_model(clipboard: MemoryClipboard, opener: MemoryOpener) -> Model {
        Model::new(Options {
            catalog: Catalog::default(),
            session: Session::default(),
            clipboard: Box::new(clipboard),
            opener: Box::new(opener),
            tick_rate: Duration::from_millis(120),
            config_path: "~/.config/namecheck/config.yaml".into(),
        })
    }

    fn press(model: &mut Model, code: KeyCode) -> bool {
        model
            .handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_text(model: &mut Model, text: &str) {
        for ch in text.chars() {
            press(model, KeyCode::Char(ch));
        }
    }

    #[test]
    fn typing_drops_whitespace() {
        let mut model = model_with(MemoryClipboard::default());
        type_text(&mut model, "john doe");
        assert_eq!(model.session().username(), "johndoe");
        press(&mut model, KeyCode::Backspace);
        assert_eq!(model.session().username(), "johndo");
    }

    #[test]
    fn ctrl_u_clears_username() {
        let mut model = model_with(MemoryClipboard::default());
        type_text(&mut model, "johndoe");
        model
            .handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(model.session().username(), "");
    }

    #[test]
    fn favorite_toggles_from_links_pane() {
        let mut model = model_with(MemoryClipboard::default());
        type_text(&mut model, "johndoe");
        press(&mut model, KeyCode::Tab);
        press(&mut model, KeyCode::Char('f'));
        let links: Vec<_> = model
            .session()
            .favorites()
            .iter()
            .map(|f| f.link.clone())
            .collect();
        assert_eq!(links, vec!["https://www.facebook.com/johndoe"]);

        press(&mut model, KeyCode::Char('f'));
        assert!(model.session().favorites().is_empty());
    }

    #[test]
    fn empty_username_exposes_no_favorite_action() {
        let mut model = model_with(MemoryClipboard::default());
        press(&mut model, KeyCode::Tab);
        press(&mut model, KeyCode::Char('f'));
        press(&mut model, KeyCode::Char('e'));
        assert!(model.session().favorites().is_empty());
        assert!(!model.session().is_any_editing());
    }

    #[test]
    fn edit_then_reset_generated_link() {
        let mut model = model_with(MemoryClipboard::default());
        type_text(&mut model, "johndoe");
        press(&mut model, KeyCode::Tab);
        press(&mut model, KeyCode::Char('e'));
        assert!(model.session().is_any_editing());
        type_text(&mut model, "/x");
        press(&mut model, KeyCode::Enter);

        let item = model.selected_generated().unwrap();
        assert_eq!(
            model.session().effective_generated(&item),
            "https://www.facebook.com/johndoe/x"
        );
        assert_eq!(model.session().status_text(), Some("Link updated!"));

        press(&mut model, KeyCode::Char('r'));
        let item = model.selected_generated().unwrap();
        assert_eq!(
            model.session().effective_generated(&item),
            "https://www.facebook.com/johndoe"
        );
    }

    #[test]
    fn copy_failure_is_reported_not_raised() {
        let mut model = model_with(MemoryClipboard::denying());
        type_text(&mut model, "johndoe");
        press(&mut model, KeyCode::Tab);
        press(&mut model, KeyCode::Char('y'));
        assert_eq!(model.session().status_text(), Some("Failed to copy."));
    }

    #[test]
    fn copy_success_names_the_kind() {
        let mut model = model_with(MemoryClipboard::default());
        type_text(&mut model, "johndoe");
        press(&mut model, KeyCode::Tab);
        press(&mut model, KeyCode::Char('G'));
        press(&mut model, KeyCode::Char('y'));
        assert_eq!(model.session().status_text(), Some("Copied email!"));
    }

    #[test]
    fn open_launches_social_url_and_mailto_for_email() {
        let opener = MemoryOpener::default();
        let mut model = build_model(MemoryClipboard::default(), opener.clone());
        type_text(&mut model, "johndoe");
        press(&mut model, KeyCode::Tab);

        press(&mut model, KeyCode::Char('o'));
        assert_eq!(
            model.session().status_text(),
            Some("Opened Facebook in your browser.")
        );

        // Email section starts after the eight socials and eight domains.
        for _ in 0..16 {
            press(&mut model, KeyCode::Char('j'));
        }
        assert_eq!(model.selected_generated().unwrap().name, "@gmail.com");
        press(&mut model, KeyCode::Char('o'));

        assert_eq!(
            opener.opened(),
            vec!["https://www.facebook.com/johndoe", "mailto:johndoe@gmail.com"]
        );
        assert_eq!(model.session().status_text(), Some(MSG_MAIL_CLIENT));
    }

    #[test]
    fn open_failure_names_the_target() {
        let mut model = build_model(MemoryClipboard::default(), MemoryOpener::denying());
        type_text(&mut model, "johndoe");
        press(&mut model, KeyCode::Tab);
        press(&mut model, KeyCode::Char('o'));
        assert_eq!(
            model.session().status_text(),
            Some("Failed to open Facebook: refused (URL: https://www.facebook.com/johndoe)")
        );
    }

    #[test]
    fn open_with_empty_username_does_nothing() {
        let opener = MemoryOpener::default();
        let mut model = build_model(MemoryClipboard::default(), opener.clone());
        press(&mut model, KeyCode::Tab);
        press(&mut model, KeyCode::Char('o'));
        assert!(opener.opened().is_empty());
        assert_eq!(model.session().status_text(), None);
    }

    #[test]
    fn edited_link_survives_username_round_trip() {
        let mut model = model_with(MemoryClipboard::default());
        type_text(&mut model, "johndoe");
        press(&mut model, KeyCode::Tab);
        press(&mut model, KeyCode::Char('e'));
        type_text(&mut model, "/about");
        press(&mut model, KeyCode::Enter);
        press(&mut model, KeyCode::Char('f'));

        press(&mut model, KeyCode::Char('/'));
        press(&mut model, KeyCode::Backspace);
        press(&mut model, KeyCode::Char('e'));
        press(&mut model, KeyCode::Tab);

        let item = model.selected_generated().unwrap();
        let value = model.session().effective_generated(&item).to_string();
        assert_eq!(value, "https://www.facebook.com/johndoe/about");
        assert!(model.session().is_favorited(&value));
    }

    #[test]
    fn favorites_pane_edit_and_remove() {
        let mut model = model_with(MemoryClipboard::default());
        type_text(&mut model, "johndoe");
        press(&mut model, KeyCode::Tab);
        press(&mut model, KeyCode::Char('j'));
        press(&mut model, KeyCode::Char('f'));
        press(&mut model, KeyCode::Char('s'));
        assert_eq!(model.focused_pane, Pane::Favorites);

        press(&mut model, KeyCode::Char('e'));
        press(&mut model, KeyCode::Backspace);
        press(&mut model, KeyCode::Esc);
        assert_eq!(
            model.session().favorites()[0].link,
            "https://www.youtube.com/@johndo"
        );

        press(&mut model, KeyCode::Char('d'));
        assert!(model.session().favorites().is_empty());
        assert_eq!(model.focused_pane, Pane::Links);
    }

    #[test]
    fn jump_without_favorites_stays_put() {
        let mut model = model_with(MemoryClipboard::default());
        press(&mut model, KeyCode::Tab);
        press(&mut model, KeyCode::Char('s'));
        assert_eq!(model.focused_pane, Pane::Links);
    }

    #[test]
    fn quit_keys() {
        let mut model = model_with(MemoryClipboard::default());
        assert!(press(&mut model, KeyCode::Esc));

        let mut model = model_with(MemoryClipboard::default());
        press(&mut model, KeyCode::Tab);
        assert!(press(&mut model, KeyCode::Char('q')));

        let mut model = model_with(MemoryClipboard::default());
        assert!(model
            .handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap());
    }

    #[test]
    fn q_is_typed_into_username() {
        let mut model = model_with(MemoryClipboard::default());
        assert!(!press(&mut model, KeyCode::Char('q')));
        assert_eq!(model.session().username(), "q");
    }

    #[test]
    fn pad_to_width_handles_long_names() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcd", 4), "abcd ");
    }
}
