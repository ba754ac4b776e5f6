//! Pure update function for the TEA (The Elm Architecture) pattern.
//!
//! The update function takes a model and a message, mutates the model,
//! and returns a list of commands to execute.

use crossterm::event::{KeyCode, KeyEvent};

use crate::list::{validate_list_name, ListId, TodoList};
use crate::{tlog_debug, tlog_warn};

use super::command::Command;
use super::message::Message;
use super::model::{InputKind, Mode, Model, Notification};

/// Helper to set an error notification and mark model as dirty.
fn set_error(model: &mut Model, message: String) {
    tlog_warn!("UI Error: {}", message);
    model.notification = Some(Notification::error(message));
    model.dirty = true;
}

/// Pure update function: Model + Message → Commands
///
/// This function:
/// 1. Takes the current model and an input message
/// 2. Mutates the model state (and sets dirty flag)
/// 3. Returns a list of commands (side effects) to execute
///
/// The function itself has no side effects - all I/O happens via returned
/// Commands.
pub fn update(model: &mut Model, msg: Message) -> Vec<Command> {
    let mut cmds = Vec::new();

    match msg {
        Message::Key(key) => {
            // A keystroke hides the notification / error indicator. Nothing
            // else does; re-display only happens further down in this same
            // message (failed submit) or via a background failure message.
            model.notification = None;
            model.dirty = true; // Keyboard input always triggers render
            match model.mode {
                Mode::Browse => update_browse_mode(model, key, &mut cmds),
                Mode::Input(kind) => update_input_mode(model, key, kind, &mut cmds),
            }
        }

        Message::Resize(_, _) => {
            model.dirty = true; // Resize triggers re-render
        }

        // Command completion callbacks
        Message::StoreSaved => {
            tlog_debug!("Message::StoreSaved");
        }

        Message::StoreSaveFailed(err) => {
            tlog_warn!("Message::StoreSaveFailed err={}", err);
            set_error(model, format!("Failed to save lists: {}", err));
        }
    }

    cmds
}

fn update_browse_mode(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if !model.store.lists.is_empty() {
                model.selected = (model.selected + 1) % model.store.lists.len();
            }
        }

        KeyCode::Char('k') | KeyCode::Up => {
            if !model.store.lists.is_empty() {
                model.selected = model
                    .selected
                    .checked_sub(1)
                    .unwrap_or(model.store.lists.len() - 1);
            }
        }

        KeyCode::Char('n') => {
            model.mode = Mode::Input(InputKind::ListName);
            model.input_buffer.clear();
        }

        KeyCode::Char('a') => {
            // Add an item to the selected list
            if model.selected_list().is_some() {
                model.mode = Mode::Input(InputKind::ItemText);
                model.input_buffer.clear();
            }
        }

        KeyCode::Char('d') => {
            if let Some(list) = model.selected_list() {
                let id = list.id;
                if model.config.skip_confirm {
                    delete_list(model, id, cmds);
                } else {
                    model.pending_delete = Some(id);
                    model.mode = Mode::Input(InputKind::Confirm);
                    model.input_buffer.clear();
                }
            }
        }

        KeyCode::Char('q') | KeyCode::Esc => {
            cmds.push(Command::Quit);
        }

        KeyCode::Char('?') => {
            model.show_keymap = !model.show_keymap;
        }

        _ => {}
    }
}

fn update_input_mode(model: &mut Model, key: KeyEvent, kind: InputKind, cmds: &mut Vec<Command>) {
    match key.code {
        KeyCode::Enter => match kind {
            InputKind::ListName => submit_list_name(model, cmds),
            InputKind::ItemText => submit_item_text(model, cmds),
            InputKind::Confirm => {
                model.input_buffer.clear();
                model.mode = Mode::Browse;
                if let Some(id) = model.pending_delete.take() {
                    delete_list(model, id, cmds);
                }
            }
        },

        KeyCode::Esc => {
            model.input_buffer.clear();
            model.pending_delete = None;
            model.mode = Mode::Browse;
        }

        KeyCode::Backspace => {
            model.input_buffer.pop();
        }

        KeyCode::Char(c) => {
            model.input_buffer.push(c);
        }

        _ => {}
    }
}

/// Submit the list-name field. On validation failure the field stays focused
/// and the error indicator becomes visible.
fn submit_list_name(model: &mut Model, cmds: &mut Vec<Command>) {
    let name = model.input_buffer.trim().to_string();
    if let Err(e) = validate_list_name(&name, &model.store.lists) {
        set_error(model, e.to_string());
        return;
    }

    tlog_debug!("Creating list '{}'", name);
    model.store.lists.push(TodoList::new(name));
    model.selected = model.store.lists.len() - 1;
    model.input_buffer.clear();
    model.mode = Mode::Browse;
    cmds.push(Command::SaveStore);
}

/// Submit the item-entry field. Invalid items are never added; the error
/// indicator becomes visible and the buffer is retained for editing.
fn submit_item_text(model: &mut Model, cmds: &mut Vec<Command>) {
    let text = model.input_buffer.clone();
    let Some(list) = model.selected_list_mut() else {
        model.input_buffer.clear();
        model.mode = Mode::Browse;
        return;
    };

    match list.add_item(&text) {
        Ok(item) => {
            tlog_debug!("Added item '{}' to '{}'", item.text, list.name);
            model.input_buffer.clear();
            model.mode = Mode::Browse;
            cmds.push(Command::SaveStore);
        }
        Err(e) => set_error(model, e.to_string()),
    }
}

fn delete_list(model: &mut Model, id: ListId, cmds: &mut Vec<Command>) {
    if let Some(pos) = model.store.lists.iter().position(|l| l.id == id) {
        let list = model.store.lists.remove(pos);
        tlog_debug!("Deleted list '{}'", list.name);

        // Adjust selection if needed
        if model.selected >= model.store.lists.len() && model.selected > 0 {
            model.selected -= 1;
        }

        model.notification = Some(Notification::info(format!("Deleted '{}'", list.name)));
        cmds.push(Command::SaveStore);
    }
}
