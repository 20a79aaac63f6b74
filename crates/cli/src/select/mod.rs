//! Interactive single-select questions.
//!
//! This module owns the terminal state machine behind choice questions:
//! raw-mode input, keystroke decoding, and in-place menu repaint.
//!
//! # Key Behaviors
//!
//! - **Arrow Navigation**: Up/Down move the highlight, clamped to the list
//! - **Submit**: Enter or Ctrl-C accept the highlighted choice
//! - **In-Place Repaint**: only the menu's own lines are erased and redrawn
//! - **Scoped Raw Mode**: raw terminal mode is released on every exit path

// Export public items from submodules
pub mod engine;
pub mod types;

// Re-exports for convenience
pub use engine::SelectorSession;
pub use types::SelectAction;
