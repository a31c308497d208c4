mod api;
mod app;
mod content;
mod i18n;
mod launcher;
mod locale;
mod media;
mod routes;
mod text;
mod types;
mod ui;
mod utils;

use anyhow::Result;
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, time::Duration};
use utils::{log_msg, reset_log};

rust_i18n::i18n!("locales", fallback = "pt");

const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Parser)]
#[command(author, version, about = "Terminal client for the organization's public site")]
struct Cli {
    /// Path to open, with or without a language prefix (e.g. /blog, /en/faq)
    #[arg(default_value = "/")]
    path: String,
    /// Base URL of the content API
    #[arg(long, env = "ONG_PORTAL_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Browser language to assume instead of the system locale (e.g. pt-BR)
    #[arg(long, env = "ONG_PORTAL_LANG")]
    lang: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    reset_log();

    let browser_language = i18n::detect_browser_language(cli.lang.as_deref());
    let mut app = App::new(cli.api_url, browser_language)?;
    app.navigate(cli.path);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log_msg("error", &format!("{e:#}"));
    }
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.handle_events();

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.on_key(key.code, key.modifiers) {
                    log_msg("info", "Quit");
                    return Ok(());
                }
            }
        }
    }
}
