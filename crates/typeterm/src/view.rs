//! Rendering of a session snapshot.
//!
//! Everything here is a read-only projection: the banner, each history entry
//! as a `$ command` line followed by its output, then the prompt. Rows are
//! wrapped by display width so the view can keep the bottom in sight.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use typeterm_core::{Snapshot, Topic};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const CURSOR: char = '█';
const PROMPT: &str = "$ ";

/// Insert the block cursor right after char `cursor` of `text`.
pub fn with_cursor(text: &str, cursor: Option<usize>) -> String {
    let Some(pos) = cursor else {
        return text.to_string();
    };
    let split = text
        .char_indices()
        .nth(pos + 1)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let mut out = String::with_capacity(text.len() + CURSOR.len_utf8());
    out.push_str(&text[..split]);
    out.push(CURSOR);
    out.push_str(&text[split..]);
    out
}

/// Break one logical line into rows no wider than `width` columns.
pub fn wrap(line: &str, width: usize) -> Vec<String> {
    if width == 0 || line.width() <= width {
        return vec![line.to_string()];
    }
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    for c in line.chars() {
        let w = c.width().unwrap_or(0);
        if current_width + w > width && current_width > 0 {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(c);
        current_width += w;
    }
    rows.push(current);
    rows
}

/// Every row of the console, top to bottom, wrapped to `width`.
pub fn rows(snapshot: &Snapshot<'_>, width: usize) -> Vec<String> {
    let mut logical = Vec::new();
    let banner = with_cursor(snapshot.banner_text, snapshot.banner_cursor);
    logical.extend(banner.split('\n').map(str::to_string));
    logical.push(String::new());

    for entry in snapshot.history {
        logical.push(format!("{PROMPT}{}", entry.command()));
        let output = with_cursor(entry.output(), entry.cursor_pos());
        if !output.is_empty() {
            logical.extend(output.split('\n').map(str::to_string));
        }
    }

    let mut prompt = format!("{PROMPT}{}", snapshot.input_buffer);
    if !snapshot.is_banner_revealing {
        prompt.push(CURSOR);
    }
    logical.push(prompt);

    logical
        .iter()
        .flat_map(|line| wrap(line, width))
        .collect()
}

/// Draw the console into the whole frame, scrolled so the prompt stays
/// visible, with the selected topic as a badge in the top-right corner.
pub fn render(frame: &mut Frame, snapshot: &Snapshot<'_>, topic: Option<Topic>) {
    let area = frame.area();
    let rows = rows(snapshot, area.width as usize);
    let skip = rows.len().saturating_sub(area.height as usize);
    let lines: Vec<Line> = rows.into_iter().skip(skip).map(Line::from).collect();

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().fg(Color::Green)),
        area,
    );

    if let Some(topic) = topic {
        let label = format!(" {} ", topic.key());
        let width = (label.width() as u16).min(area.width);
        let badge = Rect::new(area.right() - width, area.top(), width, 1.min(area.height));
        frame.render_widget(
            Paragraph::new(label).style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            badge,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use typeterm_core::HistoryStore;

    fn snapshot<'a>(history: &'a HistoryStore, input: &'a str, revealing: bool) -> Snapshot<'a> {
        Snapshot {
            banner_text: "Welcome",
            banner_cursor: None,
            history: history.entries(),
            input_buffer: input,
            is_banner_revealing: revealing,
            is_any_entry_revealing: false,
        }
    }

    fn screen(snapshot: &Snapshot<'_>, topic: Option<Topic>, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| render(frame, snapshot, topic))
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| (0..width).map(|x| buf[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn cursor_goes_after_the_revealed_char() {
        assert_eq!(with_cursor("hel", Some(2)), "hel█");
        assert_eq!(with_cursor("hello", Some(1)), "he█llo");
        assert_eq!(with_cursor("né✓", Some(1)), "né█✓");
        assert_eq!(with_cursor("done", None), "done");
    }

    #[test]
    fn wrap_counts_display_width() {
        assert_eq!(wrap("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap("abc", 4), vec!["abc"]);
        assert_eq!(wrap("", 4), vec![""]);
        // Wide chars take two columns and never split.
        assert_eq!(wrap("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn prompt_cursor_hidden_while_banner_reveals() {
        let history = HistoryStore::new();
        let revealing = rows(&snapshot(&history, "he", true), 40);
        assert_eq!(revealing.last().map(String::as_str), Some("$ he"));

        let idle = rows(&snapshot(&history, "he", false), 40);
        assert_eq!(idle.last().map(String::as_str), Some("$ he█"));
    }

    #[test]
    fn entries_render_command_then_output() {
        let mut history = HistoryStore::new();
        let id = history.append("skills");
        history.update_output(id, "Rust\nGo");
        history.update_cursor(id, Some(6));

        let rows = rows(&snapshot(&history, "", false), 40);
        assert_eq!(rows, vec!["Welcome", "", "$ skills", "Rust", "Go█", "$ █"]);
    }

    #[test]
    fn view_keeps_the_prompt_in_sight() {
        let mut history = HistoryStore::new();
        for i in 0..10 {
            let id = history.append(format!("cmd{i}"));
            history.update_output(id, "out");
        }
        let lines = screen(&snapshot(&history, "x", false), None, 20, 4);
        assert!(lines[3].starts_with("$ x█"));
        assert!(lines[2].starts_with("out"));
    }

    #[test]
    fn topic_badge_sits_top_right() {
        let history = HistoryStore::new();
        let lines = screen(&snapshot(&history, "", false), Some(Topic::Skills), 30, 3);
        assert!(lines[0].starts_with("Welcome"));
        assert!(lines[0].ends_with(" skills "));
    }
}
