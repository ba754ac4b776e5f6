use std::io::{self, stdout, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use tally::app::LogicThread;
use tally::config::Config;
use tally::list::{Store, TodoList};
use tally::render::RenderState;
use tally::{tlog, ui, Result};

const FRAME_DURATION: Duration = Duration::from_micros(16_666); // 60fps

/// Tally - a terminal to-do list manager
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    TALLY_DEBUG=1   Enable debug logging (alternative to --debug)")]
pub struct Cli {
    /// Delete lists without asking for confirmation
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Enable debug logging (writes to ~/.tally/tally.log)
    #[arg(short = 'd', long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Headless commands for tally
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Add an item to a list (the list is created if it doesn't exist)
    Add {
        /// Name of the target list
        list: String,

        /// The item text
        text: String,
    },

    /// Print all lists as JSON
    Export,

    /// Delete all lists
    Reset {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    tally::log::init_with_debug(cli.debug);

    let mut config = Config::load()?;
    if cli.force {
        config.skip_confirm = true;
    }

    // Handle subcommands
    match cli.command {
        Some(Command::Add { list, text }) => {
            return run_add(&config, &list, &text);
        }
        Some(Command::Export) => {
            return run_export(&config);
        }
        Some(Command::Reset { yes }) => {
            return run_reset(&config, yes);
        }
        None => {
            // No subcommand: launch TUI
        }
    }

    if cli.debug {
        tlog!("Tally starting (debug mode enabled)");
    } else {
        tlog!("Tally starting");
    }

    config.ensure_dirs()?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let (state_tx, state_rx) = crossbeam_channel::bounded::<RenderState>(1);

    let shutdown_clone = shutdown.clone();
    let logic_handle = thread::spawn(move || LogicThread::run(config, state_tx, shutdown_clone));

    let mut terminal = setup_terminal()?;
    let result = render_loop(&mut terminal, state_rx, &shutdown);

    shutdown.store(true, Ordering::SeqCst);
    let _ = logic_handle.join();
    restore_terminal(&mut terminal)?;
    result
}

/// Add an item headlessly, running the same validation as the TUI field.
fn run_add(config: &Config, list_name: &str, text: &str) -> Result<()> {
    tlog!("Add command: list={:?} text={:?}", list_name, text);

    let mut store = Store::load_sync(config)?;

    if store.find_by_name(list_name).is_none() {
        store.lists.push(TodoList::new(list_name));
    }
    let Some(list) = store.find_by_name_mut(list_name) else {
        return Err(tally::Error::ListNotFound(list_name.to_string()));
    };

    match list.add_item(text) {
        Ok(item) => {
            let count = list.item_count();
            println!("Added '{}' to '{}' ({} items)", item.text, list_name, count);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(e);
        }
    }

    store.save_sync(config)?;
    Ok(())
}

/// Print the store as pretty JSON.
fn run_export(config: &Config) -> Result<()> {
    let store = Store::load_sync(config)?;
    println!("{}", serde_json::to_string_pretty(&store)?);
    Ok(())
}

/// Delete all lists, with a confirmation prompt unless `--yes`.
fn run_reset(config: &Config, yes: bool) -> Result<()> {
    tlog!("Reset command initiated (yes={})", yes);

    let mut store = Store::load_sync(config)?;
    if store.lists.is_empty() {
        println!("Nothing to reset.");
        return Ok(());
    }

    if !yes {
        print!(
            "Delete {} list(s) and all their items? [y/N] ",
            store.lists.len()
        );
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let count = store.lists.len();
    store.lists.clear();
    store.save_sync(config)?;
    println!("Deleted {} list(s).", count);
    Ok(())
}

fn render_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state_rx: Receiver<RenderState>,
    shutdown: &AtomicBool,
) -> Result<()> {
    let mut state = RenderState::default();
    let mut last_version: u64 = 0;
    let mut last_frame = Instant::now();
    let mut dirty = true;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match state_rx.try_recv() {
            Ok(s) => {
                dirty = dirty || s.version != last_version;
                state = s;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        if last_frame.elapsed() < FRAME_DURATION {
            thread::sleep(Duration::from_micros(500));
            continue;
        }
        last_frame = Instant::now();

        if dirty {
            terminal.draw(|f| ui::draw(f, &state))?;
            last_version = state.version;
            dirty = false;
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(disable_raw_mode()?)
}
