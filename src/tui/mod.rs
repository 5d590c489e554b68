//! Terminal multi-select picker.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: pure data types (Picker, Action, Transition)
//! - `update`: pure transitions
//! - `view`: pure rendering
//! - `run`: effects (terminal lifecycle, key reading)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

pub use run::TerminalSelector;
