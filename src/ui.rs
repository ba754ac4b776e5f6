//! Terminal UI rendering for the tally TUI.
//!
//! Design philosophy:
//! - Minimal chrome: no box drawing, no ASCII borders, no decorative labels
//! - Whitespace as structure: position and spacing create hierarchy
//! - Scrolloff navigation: selection stays centered, content flows past
//!
//! This module renders from RenderState (immutable snapshot) - it never
//! mutates application state. This enables the decoupled game loop.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::render::{ListView, RenderState};
use crate::tea::{InputKind, Mode, Notification, NotificationLevel};

// Color tokens (selection uses REVERSED modifier to adapt to terminal theme)
const COLOR_TEXT_DIMMED: Color = Color::Gray;
const COLOR_TEXT_MUTED: Color = Color::DarkGray;
const COLOR_SEPARATOR: Color = Color::White;
const COLOR_ITEM_NUMBER: Color = Color::Cyan;

// Layout constants
const HUD_HEIGHT: u16 = 8;

// Column widths for the list table
const ITEMS_WIDTH: usize = 6;
const UPDATED_WIDTH: usize = 16;
const SPACING: usize = 2;

// -----------------------------------------------------------------------------
// Context-sensitive keymap system
// -----------------------------------------------------------------------------

/// Context for determining which keybindings to display.
/// Derived from RenderState - this is the "view model" for the statusbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapContext {
    /// Normal browsing - shows navigation and list actions
    Browse { has_selection: bool },
    /// Text input mode (list name, item text)
    TextInput,
    /// Delete confirmation mode
    DeleteConfirm,
}

impl KeymapContext {
    /// Derive keymap context from render state.
    pub fn from_render_state(state: &RenderState) -> Self {
        match state.mode {
            Mode::Input(InputKind::Confirm) => KeymapContext::DeleteConfirm,
            Mode::Input(_) => KeymapContext::TextInput,
            Mode::Browse => KeymapContext::Browse {
                has_selection: state.lists.get(state.selected).is_some(),
            },
        }
    }
}

/// A single keybinding entry for display.
struct Keybinding(&'static str, &'static str);

/// A group of related keybindings (separated by │).
struct KeybindingGroup(Vec<Keybinding>);

/// Get keybindings for a given context.
fn keybindings_for_context(ctx: KeymapContext) -> Vec<KeybindingGroup> {
    match ctx {
        KeymapContext::Browse { has_selection } => {
            let list_actions = if has_selection {
                vec![
                    Keybinding("n", "new list"),
                    Keybinding("a", "add item"),
                    Keybinding("d", "delete"),
                ]
            } else {
                vec![Keybinding("n", "new list")]
            };

            vec![
                KeybindingGroup(list_actions),
                KeybindingGroup(vec![Keybinding("j/k", "select")]),
                KeybindingGroup(vec![Keybinding("q", "quit")]),
            ]
        }
        KeymapContext::TextInput => vec![KeybindingGroup(vec![
            Keybinding("Enter", "submit"),
            Keybinding("Esc", "cancel"),
        ])],
        KeymapContext::DeleteConfirm => vec![KeybindingGroup(vec![
            Keybinding("Enter", "delete"),
            Keybinding("Esc", "cancel"),
        ])],
    }
}

/// Main render function - entry point for all UI drawing.
/// Takes an immutable RenderState snapshot.
pub fn draw(frame: &mut Frame, state: &RenderState) {
    // All modes use main layout - the status bar handles conditional display
    // (keymap vs input prompt) on the bottom line
    render_main_layout(frame, state);

    // Render notification if present
    if let Some(ref notification) = state.notification {
        render_notification(frame, notification, frame.area());
    }
}

/// Render the main layout: viewport + separator + HUD + status bar.
fn render_main_layout(frame: &mut Frame, state: &RenderState) {
    let area = frame.area();

    if area.height < 3 {
        render_hud(frame, state, area);
        return;
    }

    let hud_height = HUD_HEIGHT.min(area.height.saturating_sub(3));
    let separator_height = if area.height > hud_height + 2 { 1 } else { 0 };

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(separator_height),
        Constraint::Length(hud_height),
        Constraint::Length(1),
    ])
    .split(area);

    render_viewport(frame, state, chunks[0]);
    if separator_height > 0 {
        render_separator(frame, chunks[1]);
    }
    render_hud(frame, state, chunks[2]);
    render_statusbar(frame, state, chunks[3]);
}

/// Render the viewport - the selected list's items, numbered from one.
fn render_viewport(frame: &mut Frame, state: &RenderState, area: Rect) {
    if state.lists.is_empty() {
        return;
    }

    let total_lines = state.items.len();
    let visible_lines = area.height as usize;
    let start = total_lines.saturating_sub(visible_lines);

    let lines: Vec<Line> = state
        .items
        .iter()
        .skip(start)
        .map(|item| {
            Line::from(vec![
                Span::styled(
                    format!("{}: ", item.number),
                    Style::default().fg(COLOR_ITEM_NUMBER),
                ),
                Span::raw(item.text.clone()),
            ])
        })
        .collect();

    if lines.is_empty() {
        let msg = Line::from(Span::styled(
            "No items yet. Press 'a' to add one.",
            Style::default().fg(COLOR_TEXT_DIMMED),
        ));
        frame.render_widget(Paragraph::new(msg), area);
        return;
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, area);
}

/// Render the separator - solid divider line between viewport and HUD.
fn render_separator(frame: &mut Frame, area: Rect) {
    let solid = "─".repeat(area.width as usize);
    let line = Line::from(Span::styled(solid, Style::default().fg(COLOR_SEPARATOR)));
    let paragraph = Paragraph::new(line);
    frame.render_widget(paragraph, area);
}

/// Render the status bar - single bottom line with conditional display.
/// Shows either:
/// - Input prompt (when in Input mode - no '?' shown)
/// - "?" indicator only (when keymap is collapsed)
/// - "? │ <full keymap>" (when keymap is expanded via '?' toggle)
fn render_statusbar(frame: &mut Frame, state: &RenderState, area: Rect) {
    let line = match state.mode {
        Mode::Input(kind) => render_input_line(state, kind),
        _ => render_keymap_line(state),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Render keybindings legend for the bottom line.
/// When show_keymap is false: Shows just "?" (grayed out)
/// When show_keymap is true: Shows "? │ <full keymap legend>" with bright "?"
fn render_keymap_line(state: &RenderState) -> Line<'static> {
    let ctx = KeymapContext::from_render_state(state);
    let groups = keybindings_for_context(ctx);

    let key_style = Style::default().fg(COLOR_TEXT_DIMMED);
    let desc_style = Style::default().fg(COLOR_TEXT_MUTED);
    let sep_style = Style::default().fg(COLOR_TEXT_MUTED);

    let mut spans: Vec<Span> = Vec::new();

    // Always show '?' toggle indicator first
    // When collapsed: dimmed '?'
    // When expanded: bright '?' followed by the full keymap
    let help_style = if state.show_keymap {
        Style::default() // Bright (default foreground)
    } else {
        Style::default().fg(COLOR_TEXT_MUTED) // Grayed out
    };
    spans.push(Span::styled("?", help_style));

    // Only show the full keymap legend when expanded
    if state.show_keymap {
        for group in groups.iter() {
            if group.0.is_empty() {
                continue;
            }

            // Separator before each group (including first, since we have '?' prefix)
            if !spans.is_empty() {
                spans.push(Span::styled(" │ ", sep_style));
            }

            for (key_idx, keybinding) in group.0.iter().enumerate() {
                if key_idx > 0 {
                    spans.push(Span::styled(" • ", sep_style));
                }
                spans.push(Span::styled(keybinding.0, key_style));
                spans.push(Span::styled(format!(" {}", keybinding.1), desc_style));
            }
        }
    }

    Line::from(spans)
}

/// Render input prompt for the bottom line (replaces keymap when in input
/// mode). The blinking underscore marks the field as focused.
fn render_input_line(state: &RenderState, kind: InputKind) -> Line<'static> {
    let hint_key_style = Style::default().fg(COLOR_TEXT_MUTED);
    let hint_sep_style = Style::default().fg(COLOR_TEXT_MUTED);
    let label_style = Style::default().fg(Color::Reset);
    let input_style = Style::default().fg(Color::White);
    let cursor_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::SLOW_BLINK);

    let label = kind.label();
    let buffer = state.input_buffer.clone();

    // Build hints first (left side)
    let mut spans: Vec<Span> = vec![
        Span::styled("Enter ", hint_key_style),
        Span::styled("• ", hint_sep_style),
        Span::styled("Esc ", hint_key_style),
        Span::styled(" ", hint_sep_style),
    ];

    // Add label and input
    if matches!(kind, InputKind::Confirm) {
        spans.push(Span::styled(label.to_string(), label_style));
    } else {
        spans.push(Span::styled(format!("{label}: "), label_style));
        spans.push(Span::styled(buffer, input_style));
        spans.push(Span::styled("_", cursor_style));
    }

    Line::from(spans)
}

/// Render the HUD - list table with scrolloff navigation.
fn render_hud(frame: &mut Frame, state: &RenderState, area: Rect) {
    if state.lists.is_empty() {
        let msg = Line::from(Span::styled(
            "No lists. Press 'n' to create one.",
            Style::default().fg(COLOR_TEXT_DIMMED),
        ));
        let paragraph = Paragraph::new(msg);
        frame.render_widget(paragraph, area);
        return;
    }

    // Reserve 1 line for header
    let header_height = 1;
    let content_height = area.height.saturating_sub(header_height as u16) as usize;

    // Scrolloff implementation: keep selection centered
    let center = content_height / 2;
    let start = state.selected.saturating_sub(center);
    let end = (start + content_height).min(state.lists.len());
    let start = end.saturating_sub(content_height);

    // Build lines starting with header
    let mut lines: Vec<Line> = Vec::with_capacity(content_height + header_height);

    // Add header row (bold)
    lines.push(render_header_row(area.width));

    // Add list rows
    lines.extend(
        state
            .lists
            .iter()
            .enumerate()
            .skip(start)
            .take(content_height)
            .map(|(idx, list)| render_list_row(list, idx == state.selected, area.width)),
    );

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, area);
}

/// Render the column header row (bold to distinguish from data rows).
fn render_header_row(width: u16) -> Line<'static> {
    let header_style = Style::default()
        .fg(COLOR_TEXT_DIMMED)
        .add_modifier(Modifier::BOLD);
    let spacing = "  ";

    // Minimum usable width check
    if width < 20 {
        return Line::from(Span::styled("LIST", header_style));
    }

    let total_fixed = ITEMS_WIDTH + UPDATED_WIDTH + SPACING * 2;
    let name_width = (width as usize).saturating_sub(total_fixed);

    let name = format!("{:<width$}", "LIST", width = name_width);
    let items = format!("{:<width$}", "ITEMS", width = ITEMS_WIDTH);
    let updated = format!("{:<width$}", "UPDATED", width = UPDATED_WIDTH);

    Line::from(vec![
        Span::styled(name, header_style),
        Span::styled(spacing, header_style),
        Span::styled(items, header_style),
        Span::styled(spacing, header_style),
        Span::styled(updated, header_style),
    ])
}

/// Render a single list row with column layout.
/// Columns: LIST (flex) | ITEMS (~6ch) | UPDATED (~16ch)
fn render_list_row(list: &ListView, is_selected: bool, width: u16) -> Line<'static> {
    if width < 20 {
        let name_style = if is_selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        return Line::from(Span::styled(
            truncate(&list.name, width as usize),
            name_style,
        ));
    }

    let total_fixed = ITEMS_WIDTH + UPDATED_WIDTH + SPACING * 2;
    let name_width = (width as usize).saturating_sub(total_fixed);

    let name = truncate(&list.name, name_width);
    let name_padded = format!("{:<width$}", name, width = name_width);

    let items_padded = format!("{:<width$}", list.item_count, width = ITEMS_WIDTH);

    let updated = list.updated_at.format("%Y-%m-%d %H:%M").to_string();
    let updated_padded = format!(
        "{:<width$}",
        truncate(&updated, UPDATED_WIDTH),
        width = UPDATED_WIDTH
    );

    let spacing = "  ";

    let (primary_style, secondary_style) = if is_selected {
        let selected = Style::default().add_modifier(Modifier::REVERSED);
        (selected, selected)
    } else {
        (
            Style::default(),
            Style::default().fg(COLOR_TEXT_DIMMED),
        )
    };

    Line::from(vec![
        Span::styled(name_padded, primary_style),
        Span::styled(spacing, primary_style),
        Span::styled(items_padded, secondary_style),
        Span::styled(spacing, primary_style),
        Span::styled(updated_padded, secondary_style),
    ])
}

/// Render notification message on the bottom line of the screen.
///
/// Displays a single-line notification with styling based on the level:
/// - Error: Red text with "Error:" prefix and bold styling
/// - Info: Green text without prefix
fn render_notification(frame: &mut Frame, notification: &Notification, area: Rect) {
    let notification_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    frame.render_widget(Clear, notification_area);

    let line = match notification.level {
        NotificationLevel::Error => Line::from(vec![
            Span::styled(
                "Error: ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                notification.message.clone(),
                Style::default().fg(Color::Red),
            ),
        ]),
        NotificationLevel::Info => Line::from(Span::styled(
            notification.message.clone(),
            Style::default().fg(Color::Green),
        )),
    };

    let paragraph = Paragraph::new(line);
    frame.render_widget(paragraph, notification_area);
}

// Helper functions

fn truncate(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 1).collect();
        format!("{}~", truncated)
    }
}
