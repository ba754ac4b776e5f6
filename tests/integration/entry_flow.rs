//! End-to-end entry flow tests.
//!
//! Each test drives the update loop with the exact key sequence a user
//! would type, then inspects the model and its render snapshots. The
//! error indicator tests pin down the visibility contract: a keystroke
//! hides it, and nothing else does.

use crossterm::event::KeyCode;

use tally::tea::{update, Command, InputKind, Message, Mode, Notification, NotificationLevel};

use crate::fixtures::{store_with_list, ModelHarness};

/// Test: Full happy path
/// Given an empty store
/// When the user creates a list and types two items
/// Then the items appear numbered in insertion order
#[test]
fn test_create_list_and_add_items() {
    let mut harness = ModelHarness::new();

    harness.create_list("groceries");
    harness.enter_item("Buy peacock feathers");
    harness.enter_item("Use peacock feathers to make a fly");

    assert_eq!(harness.model.store.lists.len(), 1);
    assert_eq!(harness.model.store.lists[0].name, "groceries");

    let snapshot = harness.model.snapshot();
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.items[0].number, 1);
    assert_eq!(snapshot.items[0].text, "Buy peacock feathers");
    assert_eq!(snapshot.items[1].number, 2);
    assert_eq!(snapshot.items[1].text, "Use peacock feathers to make a fly");
}

/// Test: Errors are hidden on keypress
/// Given a visible validation error on the item field
/// When the user presses any key
/// Then the error indicator is gone from the next snapshot
#[test]
fn test_errors_hidden_on_keypress() {
    let mut harness = ModelHarness::with_store(store_with_list("groceries"));

    // Submitting an empty item makes the indicator visible
    harness.press(KeyCode::Char('a'));
    harness.press(KeyCode::Enter);

    let snapshot = harness.model.snapshot();
    let notification = snapshot.notification.as_ref().unwrap();
    assert_eq!(notification.level, NotificationLevel::Error);
    assert_eq!(notification.message, "You can't have an empty list item");

    // Any keystroke hides it
    harness.press(KeyCode::Char('B'));

    let snapshot = harness.model.snapshot();
    assert!(
        snapshot.notification.is_none(),
        "Error indicator should be hidden after a keypress"
    );
    assert_eq!(harness.model.input_buffer, "B");
}

/// Test: Errors are not hidden unless there is a keypress
/// Given a visible validation error
/// When snapshots are taken and non-key messages arrive
/// Then the error indicator stays visible
#[test]
fn test_errors_not_hidden_without_keypress() {
    let mut harness = ModelHarness::with_store(store_with_list("groceries"));
    harness.press(KeyCode::Char('a'));
    harness.press(KeyCode::Enter);
    assert!(harness.model.notification.is_some());

    // Repeated snapshots must not consume the indicator
    for _ in 0..3 {
        let snapshot = harness.model.snapshot();
        assert!(snapshot.notification.is_some());
    }

    update(&mut harness.model, Message::Resize(120, 40));
    assert!(
        harness.model.notification.is_some(),
        "Resize is not a keypress and must not hide the indicator"
    );

    update(&mut harness.model, Message::StoreSaved);
    assert!(
        harness.model.notification.is_some(),
        "Background save completion must not hide the indicator"
    );
}

/// Test: Fixing a rejected duplicate
/// Given a duplicate submission was rejected with the buffer retained
/// When the user edits the buffer and resubmits
/// Then the corrected item is added and the error is gone
#[test]
fn test_duplicate_rejected_then_corrected() {
    let mut harness = ModelHarness::with_store(store_with_list("groceries"));
    harness.enter_item("Buy milk");

    let cmds = harness.enter_item("Buy milk");
    assert!(cmds.is_empty(), "Duplicate must not be persisted");
    let notification = harness.model.notification.as_ref().unwrap();
    assert_eq!(notification.message, "You've already got this in your list");
    assert_eq!(harness.model.mode, Mode::Input(InputKind::ItemText));
    assert_eq!(harness.model.input_buffer, "Buy milk");

    // Edit the retained buffer: "Buy milk" -> "Buy milk x2"
    harness.type_text(" x2");
    assert!(harness.model.notification.is_none());
    let cmds = harness.press(KeyCode::Enter);

    assert!(matches!(cmds[0], Command::SaveStore));
    assert_eq!(harness.model.store.lists[0].item_count(), 2);
    assert_eq!(harness.model.store.lists[0].items[1].text, "Buy milk x2");
}

/// Test: Empty submit keeps the field focused
#[test]
fn test_empty_submit_keeps_field_focused() {
    let mut harness = ModelHarness::with_store(store_with_list("groceries"));
    harness.press(KeyCode::Char('a'));

    harness.press(KeyCode::Enter);
    assert_eq!(harness.model.mode, Mode::Input(InputKind::ItemText));

    // The user can type straight away and submit successfully
    harness.type_text("Buy milk");
    let cmds = harness.press(KeyCode::Enter);
    assert!(matches!(cmds[0], Command::SaveStore));
    assert_eq!(harness.model.mode, Mode::Browse);
}

/// Test: Whitespace-only input counts as empty
#[test]
fn test_whitespace_item_rejected() {
    let mut harness = ModelHarness::with_store(store_with_list("groceries"));

    let cmds = harness.enter_item("   ");
    assert!(cmds.is_empty());
    let notification = harness.model.notification.as_ref().unwrap();
    assert_eq!(notification.message, "You can't have an empty list item");
    assert_eq!(harness.model.store.lists[0].item_count(), 0);
}

/// Test: Items land in the selected list when several exist
#[test]
fn test_items_go_to_selected_list() {
    let mut harness = ModelHarness::new();
    harness.create_list("groceries");
    harness.create_list("errands");

    // "errands" was created last and is selected
    harness.enter_item("Post letter");

    assert_eq!(harness.model.store.lists[0].item_count(), 0);
    assert_eq!(harness.model.store.lists[1].item_count(), 1);

    // Navigate back to "groceries" and add there
    harness.press(KeyCode::Char('k'));
    harness.enter_item("Buy milk");
    assert_eq!(harness.model.store.lists[0].items[0].text, "Buy milk");
}

/// Test: An info notification obeys the same visibility contract
#[test]
fn test_info_notification_hidden_on_keypress() {
    let mut harness = ModelHarness::with_store(store_with_list("groceries"));
    harness.model.notification = Some(Notification::info("Deleted 'errands'"));

    let snapshot = harness.model.snapshot();
    assert!(snapshot.notification.is_some());

    harness.press(KeyCode::Char('j'));
    assert!(harness.model.notification.is_none());
}

/// Test: Quit command from browse mode
#[test]
fn test_quit_from_browse() {
    let mut harness = ModelHarness::new();
    let cmds = harness.press(KeyCode::Char('q'));
    assert!(matches!(cmds[0], Command::Quit));
}
