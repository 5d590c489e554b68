//! Pure state transitions: (Picker, Action) → Transition.
//!
//! Fully testable without a terminal. Unhandled actions return the
//! picker unchanged.

use crate::interactive::Selection;

use super::state::{Action, Picker, Screen, Transition};

/// Pure state transition function.
pub fn update(picker: Picker, action: Action) -> Transition {
    match picker.screen {
        Screen::Select => update_select(picker, action),
        Screen::Confirm => update_confirm(picker, action),
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Select: cursor movement, checkbox toggling, submit, cancel.
fn update_select(mut picker: Picker, action: Action) -> Transition {
    let len = picker.items.len();

    match action {
        Action::MoveUp => {
            picker.cursor = picker.cursor.saturating_sub(1);
        }
        Action::MoveDown => {
            picker.cursor = if len == 0 { 0 } else { (picker.cursor + 1).min(len - 1) };
        }
        Action::ToggleSelection => {
            if picker.cursor < len && !picker.selected.remove(&picker.cursor) {
                picker.selected.insert(picker.cursor);
            }
        }
        Action::SelectAll => {
            picker.selected = (0..len).collect();
        }
        Action::SelectNone => {
            picker.selected.clear();
        }
        Action::Submit => {
            if picker.selected.is_empty() {
                // Nothing to delete: no need for the gate
                return Transition::Done(Selection::Chosen(Vec::new()));
            }
            picker.screen = Screen::Confirm;
        }
        Action::Cancel => return Transition::Done(Selection::Cancelled),
        Action::ConfirmYes | Action::ConfirmNo => {}
    }

    Transition::Picker(picker)
}

/// Confirm: yes closes with the selection, no returns to the list.
fn update_confirm(mut picker: Picker, action: Action) -> Transition {
    match action {
        Action::ConfirmYes => Transition::Done(picker.selection()),
        Action::ConfirmNo => {
            picker.screen = Screen::Select;
            Transition::Picker(picker)
        }
        Action::Cancel => Transition::Done(Selection::Cancelled),
        _ => Transition::Picker(picker),
    }
}

// ============================================================================
// TESTS
// ============================================================================
