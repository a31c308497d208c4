use crate::app::App;
use crate::content::{BlogPost, Listing};
use crate::i18n::t;
use crate::media::Provider;
use crate::routes::{Collection, Page};
use crate::text::clamp_cursor;
use crate::types::AppMode;
use crate::utils::decode_url;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_menu(f, app, chunks[0]);
    render_body(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);
    render_hints(f, app, chunks[3]);
}

fn render_menu(f: &mut Frame, app: &App, area: Rect) {
    let current = app.page.as_ref().map(Page::menu_index);
    let mut spans = Vec::new();
    for (i, page) in Page::MENU.iter().enumerate() {
        let style = if Some(i) == current {
            Style::default().fg(Color::Black).bg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", t!(page.title_key())), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).bg(Color::Black), area);
}

fn render_body(f: &mut Frame, app: &App, area: Rect) {
    let title = match &app.page {
        Some(page) => t!(page.title_key()),
        None => t!("ui.not_found_title"),
    };
    let block = Block::default()
        .borders(Borders::TOP)
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::Green).bold(),
        ))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (lines, selected_line) = body_lines(app, inner.width as usize);
    let scroll = match selected_line {
        Some(line) => selection_scroll(line, inner.height),
        None => app.scroll_y,
    };
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(p, inner);
}

/// Keeps the selected line about a third of the way down the body.
fn selection_scroll(line: usize, height: u16) -> u16 {
    u16::try_from(line)
        .unwrap_or(u16::MAX)
        .saturating_sub(height / 3)
}

/// Body text plus the line the selected entry starts on, if any.
fn body_lines(app: &App, width: usize) -> (Vec<Line<'static>>, Option<usize>) {
    let Some(page) = &app.page else {
        return (vec![Line::from(t!("ui.not_found"))], None);
    };
    if app.is_loading {
        return (vec![Line::from(t!("ui.loading")).fg(Color::Cyan)], None);
    }
    if let Some(error) = &app.error {
        return (vec![Line::from(error.clone()).fg(Color::Red)], None);
    }
    let Some(collection) = page.collection() else {
        return (vec![Line::from(t!("ui.static_page")).fg(Color::Gray)], None);
    };
    let Some(listing) = &app.listing else {
        return (Vec::new(), None);
    };

    if let Page::BlogPost(_) = page {
        return match app.current_post() {
            Some(post) => (post_lines(post, &app.language, width), None),
            None => (vec![Line::from(t!("blog.post_not_found"))], None),
        };
    }

    if listing.is_empty() {
        return (vec![Line::from(empty_message(collection))], None);
    }

    let mut lines = Vec::new();
    let mut selected_line = None;
    for i in 0..listing.len() {
        let is_selected = i == app.selected;
        if is_selected {
            selected_line = Some(lines.len());
        }
        let entry = entry_lines(listing, i, &app.language);
        for (n, line) in entry.into_iter().enumerate() {
            let marker = match (is_selected, n) {
                (true, 0) => Span::styled("▶ ", Style::default().fg(Color::Yellow)),
                _ => Span::raw("  "),
            };
            let mut spans = vec![marker];
            spans.extend(line.spans);
            lines.push(Line::from(spans));
        }
        lines.push(Line::default());
    }
    (lines, selected_line)
}

fn empty_message(collection: Collection) -> String {
    match collection {
        Collection::Videos | Collection::Photos => t!("gallery.no_items"),
        Collection::BlogPosts => t!("blog.no_posts"),
        Collection::Documents => t!("documents.no_documents"),
        Collection::Sponsors => t!("sponsors.no_sponsors"),
    }
}

fn heading(text: String) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().bold()))
}

fn dim(text: String) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

fn entry_lines(listing: &Listing, i: usize, lang: &str) -> Vec<Line<'static>> {
    match listing {
        Listing::Videos(videos) => {
            let video = &videos[i];
            let mut lines = vec![heading(video.title.clone().unwrap_or_default())];
            if let Some(description) = &video.description {
                lines.push(Line::from(description.clone()));
            }
            match video.embed() {
                Some(embed) => {
                    let label = match embed.provider {
                        Provider::YouTube => "YouTube".to_string(),
                        Provider::Vimeo => "Vimeo".to_string(),
                        Provider::DirectFile => t!("gallery.video_file"),
                        Provider::Generic => t!("gallery.video_link"),
                    };
                    lines.push(Line::from(vec![
                        Span::styled(format!("[{label}] "), Style::default().fg(Color::Magenta)),
                        Span::raw(embed.embed_url),
                    ]));
                    if let Some(thumbnail) = embed.thumbnail_url {
                        lines.push(dim(t!("gallery.thumbnail", url = thumbnail)));
                    }
                }
                None => lines.push(dim(t!("gallery.video_not_supported"))),
            }
            lines
        }
        Listing::Photos(photos) => {
            let photo = &photos[i];
            vec![
                heading(photo.caption.clone().unwrap_or_default()),
                dim(photo.image_url.clone().unwrap_or_default()),
            ]
        }
        Listing::BlogPosts(posts) => {
            let post = &posts[i];
            vec![
                heading(post.localized_title(lang).to_string()),
                Line::from(post.excerpt(lang)),
                dim(post.byline()),
                Line::from(t!("blog.read_more")).fg(Color::Cyan),
            ]
        }
        Listing::Documents(docs) => {
            let doc = &docs[i];
            vec![
                heading(doc.display_title()).fg(Color::Green),
                Line::from(doc.display_description()),
                Line::from(t!("documents.download")).fg(Color::Cyan),
            ]
        }
        Listing::Sponsors(sponsors) => {
            let sponsor = &sponsors[i];
            let mut lines = vec![
                heading(sponsor.display_name()),
                Line::from(sponsor.display_description()),
            ];
            if let Some(logo) = &sponsor.logo_url {
                lines.push(dim(logo.clone()));
            }
            lines
        }
    }
}

fn post_lines(post: &BlogPost, lang: &str, width: usize) -> Vec<Line<'static>> {
    let title = post.localized_title(lang).to_string();
    let rule = "─".repeat(title.width().min(width));
    let mut lines = vec![heading(title), dim(rule), dim(post.byline()), Line::default()];
    lines.extend(
        post.body_text(lang, width.max(20))
            .lines()
            .map(|l| Line::from(l.to_string())),
    );
    if let Some(image) = &post.image_url {
        lines.push(Line::default());
        lines.push(dim(image.clone()));
    }
    lines
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let (bg, txt) = match app.mode {
        AppMode::Normal => (Color::Blue, format!(" {} ", t!("status.normal"))),
        AppMode::Insert => (Color::Yellow, format!(" {} ", t!("status.insert"))),
    };

    let mut left_spans = vec![
        Span::styled(txt, Style::default().bg(bg).fg(Color::Black).bold()),
        Span::raw(" "),
    ];

    if app.mode == AppMode::Insert {
        let safe_cursor = clamp_cursor(&app.path_input, app.cursor_pos);
        let (l, r) = app.path_input.split_at(safe_cursor);

        left_spans.push(Span::raw(l.to_string()));
        left_spans.push(Span::styled("█", Style::default().fg(Color::White)));
        left_spans.push(Span::raw(r.to_string()));
    } else if let Some(status) = &app.status {
        left_spans.push(Span::styled(status.clone(), Style::default().fg(Color::Yellow)));
    } else {
        left_spans.push(Span::raw(decode_url(app.current_path())));
    }

    if app.is_loading {
        left_spans.push(Span::raw(" "));
        left_spans.push(Span::styled(
            "⏳",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::RAPID_BLINK),
        ));
    }

    f.render_widget(
        Paragraph::new(Line::from(left_spans)).bg(Color::DarkGray),
        status_chunks[0],
    );

    let mut right_spans = Vec::new();
    if let Some(listing) = &app.listing {
        if app.item_count() > 0 {
            right_spans.push(Span::styled(
                format!("[{}/{}] ", app.selected + 1, listing.len()),
                Style::default().fg(Color::Cyan),
            ));
        }
    }
    right_spans.push(Span::styled(
        format!("[{}]", app.language.to_uppercase()),
        Style::default().fg(Color::Magenta).bold(),
    ));

    f.render_widget(
        Paragraph::new(Line::from(right_spans))
            .alignment(Alignment::Right)
            .bg(Color::DarkGray),
        status_chunks[1],
    );
}

fn render_hints(f: &mut Frame, app: &App, area: Rect) {
    let hints = match app.mode {
        AppMode::Insert => t!("hints.insert"),
        AppMode::Normal => t!("hints.normal"),
    };
    f.render_widget(
        Paragraph::new(hints).bg(Color::Black).fg(Color::Gray),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_scroll_saturates_on_long_listings() {
        assert_eq!(selection_scroll(2, 30), 0);
        assert_eq!(selection_scroll(40, 30), 30);
        assert_eq!(selection_scroll(70_000, 30), u16::MAX - 10);
    }
}
