//! Commands for the TEA (The Elm Architecture) pattern.
//!
//! Commands are outputs from the update function - they represent side
//! effects to be executed by the runtime.

/// Output commands from the update function.
/// These represent side effects that need to be executed.
#[derive(Debug)]
pub enum Command {
    // State persistence
    SaveStore,

    // App lifecycle
    Quit,
}
