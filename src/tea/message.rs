//! Messages for the TEA (The Elm Architecture) pattern.
//!
//! Messages are inputs to the update function - they come from external
//! sources like keyboard events or command completion callbacks.

use crossterm::event::KeyEvent;

/// Input messages to the update function.
#[derive(Debug)]
pub enum Message {
    // Keyboard/terminal events
    Key(KeyEvent),
    Resize(u16, u16),

    // Command completion callbacks
    StoreSaved,
    StoreSaveFailed(String),
}
