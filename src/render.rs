use crate::list::ListId;
use crate::tea::{Mode, Notification};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Immutable per-list view for the render thread.
#[derive(Debug, Clone)]
pub struct ListView {
    pub id: ListId,
    pub name: String,
    pub item_count: usize,
    pub updated_at: DateTime<Utc>,
}

/// View of the selected list's items for the viewport.
#[derive(Debug, Clone)]
pub struct ItemView {
    pub number: usize,
    pub text: String,
}

// Starts at 1 so the first snapshot is distinguishable from
// RenderState::default() (version 0).
static VERSION_COUNTER: AtomicU64 = AtomicU64::new(1);

pub fn next_version() -> u64 {
    VERSION_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Immutable snapshot of everything the render thread needs for one frame.
#[derive(Debug, Clone)]
pub struct RenderState {
    pub version: u64,
    pub lists: Vec<ListView>,
    pub selected: usize,
    pub mode: Mode,
    /// Numbered items of the selected list.
    pub items: Vec<ItemView>,
    pub input_buffer: String,
    pub notification: Option<Notification>,
    /// Whether the keymap legend is expanded (toggled by '?')
    pub show_keymap: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            version: 0,
            lists: Vec::new(),
            selected: 0,
            mode: Mode::Browse,
            items: Vec::new(),
            input_buffer: String::new(),
            notification: None,
            show_keymap: false,
        }
    }
}
