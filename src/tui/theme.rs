//! Picker color semantics and style constants.
//!
//! Color semantics:
//! - Green: kept copies
//! - Red: copies checked for deletion
//! - Yellow: warning (every copy checked)
//! - Dim: de-emphasized (tally, help line)
//! - Bold: important (confirmation prompt)

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// OUTCOME STYLES
// ============================================================================

/// Copies that stay.
pub const STYLE_SAFE: Style = Style::new().fg(Color::Green);

/// Every copy of a group is checked.
pub const STYLE_WARNING: Style = Style::new().fg(Color::Yellow);

/// Copies that will be deleted.
pub const STYLE_DANGER: Style = Style::new().fg(Color::Red);

/// Tally line.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Confirmation prompt.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// ELEMENT STYLES
// ============================================================================

/// Group header line.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Focused row.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// `[x]` marker.
pub const STYLE_CHECKED: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

/// `[ ]` marker.
pub const STYLE_UNCHECKED: Style = Style::new().fg(Color::DarkGray);

/// Key hints at the bottom.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================
