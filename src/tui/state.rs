//! Picker state algebra: pure types, zero effects.
//!
//! One picker is shown per duplicate group. Its state is the group's
//! member list, a cursor, the checked rows, and which screen is up.
//! The transition function and the rendering layer both program against
//! these types.

use std::collections::BTreeSet;

use crate::interactive::Selection;

// ============================================================================
// PICKER STATE
// ============================================================================

/// Everything needed to render and update one group's picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picker {
    /// Line shown above the list.
    pub header: String,
    /// Member paths, one row each.
    pub items: Vec<String>,
    /// Focused row index.
    pub cursor: usize,
    /// Rows checked for deletion.
    pub selected: BTreeSet<usize>,
    pub screen: Screen,
}

/// The current picker screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Checkbox list.
    #[default]
    Select,
    /// Confirmation gate before deleting the checked rows.
    Confirm,
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move cursor up in the list.
    MoveUp,
    /// Move cursor down in the list.
    MoveDown,
    /// Toggle checkbox on current row.
    ToggleSelection,
    /// Check every row.
    SelectAll,
    /// Uncheck every row.
    SelectNone,
    /// Accept the selection (Enter).
    Submit,
    /// Confirm action (Y on confirmation screen).
    ConfirmYes,
    /// Decline action (N on confirmation screen).
    ConfirmNo,
    /// Leave this group untouched (Esc, q, Ctrl+C).
    Cancel,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Keep the picker open with this state.
    Picker(Picker),
    /// Close the picker with the operator's answer.
    Done(Selection),
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl Picker {
    /// A picker with the cursor on the first row and nothing checked.
    pub fn new(header: impl Into<String>, items: Vec<String>) -> Self {
        Picker {
            header: header.into(),
            items,
            cursor: 0,
            selected: BTreeSet::new(),
            screen: Screen::Select,
        }
    }

    /// True when every row is checked, so no copy would remain.
    pub fn all_selected(&self) -> bool {
        !self.items.is_empty() && self.selected.len() == self.items.len()
    }

    /// The checked rows, ascending.
    pub fn selection(&self) -> Selection {
        Selection::Chosen(self.selected.iter().copied().collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================
