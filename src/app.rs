use crate::api::ApiClient;
use crate::content::{BlogPost, Listing};
use crate::i18n::{self, t};
use crate::launcher::{Launch, launch};
use crate::locale::{self, LocaleAction, resolve};
use crate::routes::{Page, page_path};
use crate::text::{
    clamp_cursor, delete_next_grapheme, delete_prev_grapheme, delete_segment, insert_grapheme,
    move_left_grapheme, move_right_grapheme,
};
use crate::types::*;
use crate::utils::log_msg;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::mpsc::{self, Receiver};

pub struct App {
    pub mode: AppMode,

    api: ApiClient,
    rx: Receiver<BgEvent>,
    request_id: u64,
    pub is_loading: bool,

    pub browser_language: String,
    pub language: String,

    pub history: Vec<String>,
    pub history_index: usize,

    pub page: Option<Page>,
    pub listing: Option<Listing>,
    pub error: Option<String>,
    pub status: Option<String>,
    pub selected: usize,
    pub scroll_y: u16,

    pub path_input: String,
    pub cursor_pos: usize,
}

impl App {
    pub fn new(api_url: String, browser_language: String) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let api = ApiClient::new(api_url, tx)?;

        let language = locale::default_language_for(&browser_language).to_string();
        i18n::activate(&language);
        log_msg(
            "info",
            &format!("Browser language {browser_language}, starting in {language}"),
        );

        Ok(Self {
            mode: AppMode::Normal,
            api,
            rx,
            request_id: 0,
            is_loading: false,
            browser_language,
            language,
            history: Vec::new(),
            history_index: 0,
            page: None,
            listing: None,
            error: None,
            status: None,
            selected: 0,
            scroll_y: 0,
            path_input: String::new(),
            cursor_pos: 0,
        })
    }

    pub fn current_path(&self) -> &str {
        self.history
            .get(self.history_index)
            .map(String::as_str)
            .unwrap_or("/")
    }

    /// Pushes a history entry for `path` and loads it.
    pub fn navigate(&mut self, path: String) {
        if !self.history.is_empty() {
            self.history.truncate(self.history_index + 1);
        }
        if self.history.last() != Some(&path) {
            self.history.push(path);
        }
        self.history_index = self.history.len() - 1;
        self.load_current();
    }

    fn load_current(&mut self) {
        self.sync_locale();

        let path = self.current_path().to_string();
        self.path_input = path.clone();
        self.cursor_pos = self.path_input.len();
        self.page = Page::from_path(&path);
        self.listing = None;
        self.error = None;
        self.status = None;
        self.selected = 0;
        self.scroll_y = 0;

        self.request_id += 1;
        match self.page.as_ref().and_then(Page::collection) {
            Some(collection) => {
                self.is_loading = true;
                self.api.fetch(&path, collection, self.request_id);
            }
            None => self.is_loading = false,
        }
    }

    fn sync_locale(&mut self) {
        match resolve(self.current_path(), &self.language, &self.browser_language) {
            LocaleAction::NoOp => {}
            LocaleAction::SetLanguage(code) => {
                log_msg("info", &format!("Switching language to {code}"));
                i18n::activate(&code);
                self.language = code;
            }
            LocaleAction::Redirect(new_path) => {
                log_msg(
                    "info",
                    &format!("Redirecting {} to {new_path}", self.current_path()),
                );
                // replaces the entry, so back never returns to the bare path
                if self.history_index > 0 && self.history[self.history_index - 1] == new_path {
                    self.history.remove(self.history_index);
                    self.history_index -= 1;
                } else {
                    self.history[self.history_index] = new_path;
                }
                self.sync_locale();
            }
        }
    }

    pub fn handle_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            if event.request_id() != self.request_id {
                continue;
            }
            self.is_loading = false;
            match event {
                BgEvent::Loaded { listing, .. } => self.listing = Some(listing),
                BgEvent::Error { message, .. } => {
                    self.error = Some(t!("errors.load", error = message));
                }
            }
        }
    }

    /// Returns `true` when the app should quit.
    pub fn on_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.mode == AppMode::Insert {
            self.handle_insert(key, modifiers);
            return false;
        }

        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Char('i') | KeyCode::Char('g') => {
                self.path_input = self.current_path().to_string();
                self.cursor_pos = self.path_input.len();
                self.mode = AppMode::Insert;
            }
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::PageDown => self.scroll_y = self.scroll_y.saturating_add(10),
            KeyCode::PageUp => self.scroll_y = self.scroll_y.saturating_sub(10),
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('h') | KeyCode::Left => self.back(),
            KeyCode::Char('l') | KeyCode::Right => self.forward(),
            KeyCode::Tab => self.cycle_menu(1),
            KeyCode::BackTab => self.cycle_menu(Page::MENU.len() - 1),
            KeyCode::Char('L') => self.toggle_language(),
            KeyCode::Char('r') => self.load_current(),
            _ => {}
        }
        false
    }

    fn handle_insert(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Enter => {
                self.mode = AppMode::Normal;
                let path = self.path_input.trim().to_string();
                self.navigate(path);
            }
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.path_input = self.current_path().to_string();
                self.cursor_pos = self.path_input.len();
            }
            KeyCode::Backspace => {
                delete_prev_grapheme(&mut self.path_input, &mut self.cursor_pos);
            }
            KeyCode::Delete => {
                delete_next_grapheme(&mut self.path_input, &mut self.cursor_pos);
            }
            KeyCode::Char('w') if modifiers.contains(KeyModifiers::CONTROL) => {
                delete_segment(&mut self.path_input, &mut self.cursor_pos);
            }
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.path_input.drain(..self.cursor_pos);
                self.cursor_pos = 0;
            }
            KeyCode::Char('k') if modifiers.contains(KeyModifiers::CONTROL) => {
                let cursor = clamp_cursor(&self.path_input, self.cursor_pos);
                self.path_input.truncate(cursor);
                self.cursor_pos = cursor;
            }
            KeyCode::Char('a') if modifiers.contains(KeyModifiers::CONTROL) => self.cursor_pos = 0,
            KeyCode::Char('e') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor_pos = self.path_input.len();
            }
            KeyCode::Home => self.cursor_pos = 0,
            KeyCode::End => self.cursor_pos = self.path_input.len(),
            KeyCode::Left => move_left_grapheme(&self.path_input, &mut self.cursor_pos),
            KeyCode::Right => move_right_grapheme(&self.path_input, &mut self.cursor_pos),
            KeyCode::Char(c) if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT => {
                insert_grapheme(&mut self.path_input, &mut self.cursor_pos, c);
            }
            _ => {}
        }
    }

    pub fn back(&mut self) {
        if self.history_index > 0 {
            self.history_index -= 1;
            self.load_current();
        }
    }

    pub fn forward(&mut self) {
        if self.history_index + 1 < self.history.len() {
            self.history_index += 1;
            self.load_current();
        }
    }

    fn cycle_menu(&mut self, step: usize) {
        let current = self.page.as_ref().map_or(0, Page::menu_index);
        let next = &Page::MENU[(current + step) % Page::MENU.len()];
        self.navigate(page_path(&self.language, next));
    }

    pub fn toggle_language(&mut self) {
        let other = if self.language == "pt" { "en" } else { "pt" };
        let path = locale::with_language(self.current_path(), other);
        self.navigate(path);
    }

    /// Number of selectable entries on the current page.
    pub fn item_count(&self) -> usize {
        match (&self.page, &self.listing) {
            (Some(Page::BlogPost(_)), _) => 0,
            (_, Some(listing)) => listing.len(),
            _ => 0,
        }
    }

    fn select_next(&mut self) {
        let count = self.item_count();
        if count == 0 {
            self.scroll_y = self.scroll_y.saturating_add(1);
        } else if self.selected + 1 < count {
            self.selected += 1;
        }
    }

    fn select_prev(&mut self) {
        if self.item_count() == 0 {
            self.scroll_y = self.scroll_y.saturating_sub(1);
        } else {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    /// The post shown on a `/:lang/blog/:id` page, once the listing arrived.
    pub fn current_post(&self) -> Option<&BlogPost> {
        let Some(Page::BlogPost(id)) = &self.page else {
            return None;
        };
        match &self.listing {
            Some(Listing::BlogPosts(posts)) => posts.iter().find(|p| &p.id == id),
            _ => None,
        }
    }

    /// What Enter does on the selected entry.
    pub fn selected_action(&self) -> Option<Selection> {
        if matches!(self.page, Some(Page::BlogPost(_))) {
            return None;
        }
        let listing = self.listing.as_ref()?;
        let i = self.selected;
        match listing {
            Listing::Videos(videos) => {
                let video = videos.get(i)?;
                let embed = video.embed()?;
                Some(Selection::Launch(if video.plays_inline() {
                    Launch::Play(embed.embed_url)
                } else {
                    Launch::Open(embed.embed_url)
                }))
            }
            Listing::Photos(photos) => photos
                .get(i)?
                .image_url
                .clone()
                .map(|url| Selection::Launch(Launch::Open(url))),
            Listing::Documents(docs) => docs
                .get(i)?
                .file_url
                .clone()
                .map(|url| Selection::Launch(Launch::Open(url))),
            Listing::BlogPosts(posts) => {
                let post = posts.get(i)?;
                Some(Selection::Navigate(page_path(
                    &self.language,
                    &Page::BlogPost(post.id.clone()),
                )))
            }
            Listing::Sponsors(_) => None,
        }
    }

    fn open_selected(&mut self) {
        match self.selected_action() {
            Some(Selection::Navigate(path)) => self.navigate(path),
            Some(Selection::Launch(target)) => {
                if let Some(id) = self.listing.as_ref().and_then(|l| l.id_at(self.selected)) {
                    log_msg("info", &format!("Opening item {id}: {}", target.url()));
                }
                self.status = match launch(&target) {
                    Ok(()) => Some(t!("status.opened", url = target.url())),
                    Err(e) => {
                        log_msg("error", &format!("{e:#}"));
                        Some(t!("errors.launch", error = format!("{e:#}")))
                    }
                };
            }
            None => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Navigate(String),
    Launch(Launch),
}
