//! Pure rendering: map Picker state to ratatui widget trees.
//!
//! The only effect is Frame::render_widget(), which writes to the
//! terminal buffer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::state::{Picker, Screen};
use super::theme;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the picker to the terminal frame.
pub fn render(picker: &Picker, frame: &mut Frame) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(frame.area());

    frame.render_widget(render_title(picker), chunks[0]);
    frame.render_widget(render_help(picker.screen), chunks[2]);

    match picker.screen {
        Screen::Select => render_select(picker, frame, chunks[1]),
        Screen::Confirm => render_confirm(picker, frame, chunks[1]),
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

fn render_title(picker: &Picker) -> Paragraph<'_> {
    Paragraph::new(Line::from(Span::styled(picker.header.as_str(), theme::STYLE_TITLE)))
}

/// Help line showing available keybindings for the current screen.
fn render_help(screen: Screen) -> Paragraph<'static> {
    let help_text = match screen {
        Screen::Select => {
            "[j/k] move  [Space] toggle  [a] all  [n] none  [Enter] delete checked  [Esc] skip group"
        }
        Screen::Confirm => "[Y] yes, delete  [N] no, go back  [Esc] skip group",
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

/// Scroll offset keeping `cursor` inside a viewport of `height` rows.
pub fn scroll_offset(cursor: usize, height: usize) -> usize {
    if height == 0 || cursor < height {
        0
    } else {
        cursor - height + 1
    }
}

// ============================================================================
// SCREEN: SELECT
// ============================================================================

fn render_select(picker: &Picker, frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Min(0),    // list
        Constraint::Length(1), // selection tally
    ])
    .split(area);

    let lines: Vec<Line> = picker
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let checked = picker.selected.contains(&i);
            let (checkbox, path_style) = if checked {
                (Span::styled("[x] ", theme::STYLE_CHECKED), theme::STYLE_DANGER)
            } else {
                (Span::styled("[ ] ", theme::STYLE_UNCHECKED), theme::STYLE_SAFE)
            };
            let line = Line::from(vec![
                Span::raw("  "),
                checkbox,
                Span::styled(item.as_str(), path_style),
            ]);
            if i == picker.cursor {
                line.style(theme::STYLE_CURSOR)
            } else {
                line
            }
        })
        .collect();

    let offset = scroll_offset(picker.cursor, chunks[0].height as usize);
    let list = Paragraph::new(lines).scroll((offset as u16, 0));
    frame.render_widget(list, chunks[0]);

    frame.render_widget(render_tally(picker), chunks[1]);
}

fn render_tally(picker: &Picker) -> Paragraph<'static> {
    let kept = picker.items.len() - picker.selected.len();
    let text = format!("  Delete: {}  Keep: {}", picker.selected.len(), kept);
    let style = if picker.all_selected() {
        theme::STYLE_WARNING
    } else {
        theme::STYLE_DIM
    };
    Paragraph::new(Span::styled(text, style))
}

// ============================================================================
// SCREEN: CONFIRM
// ============================================================================

fn render_confirm(picker: &Picker, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Permanently delete {} file(s)?", picker.selected.len()),
            theme::STYLE_IMPORTANT,
        )),
        Line::from(""),
    ];

    for &i in &picker.selected {
        if let Some(item) = picker.items.get(i) {
            lines.push(Line::from(Span::styled(
                format!("    {}", item),
                theme::STYLE_DANGER,
            )));
        }
    }

    if picker.all_selected() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Every copy is selected. No copy of this content will remain.",
            theme::STYLE_WARNING,
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// TESTS
// ============================================================================
