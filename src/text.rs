use unicode_segmentation::UnicodeSegmentation;

pub fn prev_grapheme_boundary(text: &str, pos: usize) -> usize {
    let pos = pos.min(text.len());
    text.grapheme_indices(true)
        .take_while(|(i, _)| *i < pos)
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0)
}

pub fn next_grapheme_boundary(text: &str, pos: usize) -> usize {
    let pos = pos.min(text.len());
    if pos >= text.len() {
        return text.len();
    }

    text.grapheme_indices(true)
        .map(|(i, _)| i)
        .find(|i| *i > pos)
        .unwrap_or(text.len())
}

pub fn delete_prev_grapheme(text: &mut String, cursor: &mut usize) -> bool {
    if *cursor == 0 {
        return false;
    }
    let prev = prev_grapheme_boundary(text, *cursor);
    text.drain(prev..*cursor);
    *cursor = prev;
    true
}

pub fn delete_next_grapheme(text: &mut String, cursor: &mut usize) -> bool {
    if *cursor >= text.len() {
        return false;
    }
    let next = next_grapheme_boundary(text, *cursor);
    text.drain(*cursor..next);
    true
}

pub fn insert_grapheme(text: &mut String, cursor: &mut usize, c: char) {
    text.insert(*cursor, c);
    *cursor += c.len_utf8();
}

pub fn move_left_grapheme(text: &str, cursor: &mut usize) {
    *cursor = prev_grapheme_boundary(text, *cursor);
}

pub fn move_right_grapheme(text: &str, cursor: &mut usize) {
    *cursor = next_grapheme_boundary(text, *cursor);
}

/// Deletes back to the previous `/`, the way shells treat path components.
pub fn delete_segment(text: &mut String, cursor: &mut usize) {
    if *cursor == 0 {
        return;
    }

    let head = &text[..*cursor];
    let trimmed = head.trim_end_matches('/');
    let start = trimmed.rfind('/').map_or(0, |i| i + 1);

    text.drain(start..*cursor);
    *cursor = start;
}

pub fn clamp_cursor(text: &str, pos: usize) -> usize {
    let pos = pos.min(text.len());
    if text.is_empty() {
        return 0;
    }
    if text.is_char_boundary(pos) {
        pos
    } else {
        prev_grapheme_boundary(text, pos)
    }
}

/// First `limit` graphemes of `text` followed by `...`.
pub fn excerpt(text: &str, limit: usize) -> String {
    let head: String = text.graphemes(true).take(limit).collect();
    format!("{head}...")
}
