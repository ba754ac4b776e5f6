//! Model for the TEA (The Elm Architecture) pattern.
//!
//! The Model is pure application state - no channels, no handles, no runtime
//! infrastructure.

use crate::config::Config;
use crate::list::{ListId, Store, TodoList};
use crate::render::{next_version, ItemView, ListView, RenderState};

/// Level of a notification message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Error notification - displayed in red with "Error:" prefix
    Error,
    /// Informational notification - displayed in green
    Info,
}

/// A notification message to display to the user.
///
/// For the item-entry field this doubles as the error indicator: `Some` means
/// visible, `None` means hidden, and any keystroke hides it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The severity level of the notification
    pub level: NotificationLevel,
    /// The notification message text
    pub message: String,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}

/// Application UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browsing lists; the viewport shows the selected list's items.
    #[default]
    Browse,
    /// An input field is focused.
    Input(InputKind),
}

/// Types of input prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    ListName,
    ItemText,
    Confirm,
}

impl InputKind {
    pub fn label(&self) -> &'static str {
        match self {
            InputKind::ListName => "List",
            InputKind::ItemText => "Item",
            InputKind::Confirm => "Delete?",
        }
    }
}

/// Pure application state - the single source of truth.
pub struct Model {
    // Core state
    pub store: Store,
    pub selected: usize,
    pub mode: Mode,

    // Input state
    pub input_buffer: String,
    pub notification: Option<Notification>,
    pub pending_delete: Option<ListId>,

    // UI toggle state
    /// Whether the keymap legend is expanded (toggled by '?')
    pub show_keymap: bool,

    // Dirty flag - set when state changes and render is needed
    pub dirty: bool,

    // Config (immutable after init)
    pub config: Config,
}

impl Model {
    /// Create a new Model from a loaded store.
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            store,
            selected: 0,
            mode: Mode::default(),
            input_buffer: String::new(),
            notification: None,
            pending_delete: None,
            show_keymap: false,
            dirty: true,
            config,
        }
    }

    /// Load model from the persisted store.
    pub async fn load(config: Config) -> crate::Result<Self> {
        let store = Store::load(&config).await?;
        Ok(Self::new(store, config))
    }

    // Accessor methods for UI

    pub fn selected_list(&self) -> Option<&TodoList> {
        self.store.lists.get(self.selected)
    }

    pub fn selected_list_mut(&mut self) -> Option<&mut TodoList> {
        self.store.lists.get_mut(self.selected)
    }

    /// Create an immutable snapshot for the render thread.
    ///
    /// Each snapshot gets a monotonically increasing version number, enabling
    /// the render thread to detect state changes and skip redundant renders.
    pub fn snapshot(&self) -> RenderState {
        let lists: Vec<ListView> = self
            .store
            .lists
            .iter()
            .map(|l| ListView {
                id: l.id,
                name: l.name.clone(),
                item_count: l.item_count(),
                updated_at: l.updated_at,
            })
            .collect();

        let items: Vec<ItemView> = self
            .selected_list()
            .map(|l| {
                l.items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| ItemView {
                        number: i + 1,
                        text: item.text.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        RenderState {
            version: next_version(),
            lists,
            selected: self.selected,
            mode: self.mode,
            items,
            input_buffer: self.input_buffer.clone(),
            notification: self.notification.clone(),
            show_keymap: self.show_keymap,
        }
    }
}
