//! Test fixtures for integration tests.
//!
//! Provides helpers for:
//! - Temporary data directories wired into a `Config`
//! - Driving the update loop with synthetic key events

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

use tally::config::Config;
use tally::tea::{update, Command, Message, Model};
use tally::{Store, TodoList};

/// A temporary data directory with a `Config` pointing at it.
pub struct TestDirs {
    /// Keeps the directory alive for the duration of the test.
    pub temp_dir: TempDir,
    /// Config whose `data_dir` is the temp directory.
    pub config: Config,
}

impl TestDirs {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = Config {
            skip_confirm: false,
            data_dir: Some(temp_dir.path().to_string_lossy().into_owned()),
        };
        Self { temp_dir, config }
    }

    /// Path of the store file inside the temp directory.
    pub fn store_path(&self) -> PathBuf {
        self.config.store_path().expect("store path")
    }
}

/// Drives the pure update function the same way the logic thread does:
/// one `Message::Key` per keystroke.
pub struct ModelHarness {
    pub model: Model,
}

impl ModelHarness {
    /// Harness over an empty store with default config.
    pub fn new() -> Self {
        Self::with_store(Store::new())
    }

    pub fn with_store(store: Store) -> Self {
        Self {
            model: Model::new(store, Config::default()),
        }
    }

    pub fn with_config(store: Store, config: Config) -> Self {
        Self {
            model: Model::new(store, config),
        }
    }

    /// Press a single key and collect the resulting commands.
    pub fn press(&mut self, code: KeyCode) -> Vec<Command> {
        update(&mut self.model, Message::Key(key(code)))
    }

    /// Type a string one character at a time.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    /// Create a list through the UI: 'n', the name, Enter.
    pub fn create_list(&mut self, name: &str) -> Vec<Command> {
        self.press(KeyCode::Char('n'));
        self.type_text(name);
        self.press(KeyCode::Enter)
    }

    /// Add an item to the selected list through the UI: 'a', the text, Enter.
    pub fn enter_item(&mut self, text: &str) -> Vec<Command> {
        self.press(KeyCode::Char('a'));
        self.type_text(text);
        self.press(KeyCode::Enter)
    }
}

/// Create a key event without modifiers.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

/// A store holding a single empty list with the given name.
pub fn store_with_list(name: &str) -> Store {
    let mut store = Store::new();
    store.lists.push(TodoList::new(name));
    store
}
