//! Integration test suite for tally.
//!
//! These tests drive the pure update loop the same way the logic thread
//! does, and exercise the JSON store against real temporary directories.
//!
//! # Test Categories
//!
//! - `entry_flow`: List creation and item entry, including the error
//!   indicator's keystroke-driven visibility
//! - `persistence`: Store save/load round trips, backups and corruption
//!
//! # CI Compatibility
//!
//! No terminal is required: the update function is pure and the store
//! writes only to tempfile-managed directories.

mod fixtures;

mod entry_flow;
mod persistence;
