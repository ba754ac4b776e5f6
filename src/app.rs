use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyCode};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::render::RenderState;
use crate::tea::{update, Command, Message, Model};
use crate::{tlog_debug, tlog_error, Result};

const MAX_BG_MESSAGES: usize = 50;

pub struct LogicThread;

impl LogicThread {
    pub fn run(config: Config, state_tx: Sender<RenderState>, shutdown: Arc<AtomicBool>) -> Result<()> {
        Runtime::new()?.block_on(Self::run_async(config, state_tx, shutdown))
    }

    async fn run_async(
        config: Config,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        tlog_debug!("LogicThread::run_async skip_confirm={}", config.skip_confirm);
        let mut model = Model::load(config).await?;
        tlog_debug!("Model loaded: {} lists", model.store.lists.len());

        let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Message>();

        send_state(&state_tx, &model);
        let mut esc_filter = EscapeSequenceFilter::new();

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            // Keyboard input (priority)
            while event::poll(Duration::ZERO)? {
                let msg = match event::read()? {
                    Event::Key(key) => {
                        if let KeyCode::Char(c) = key.code {
                            if esc_filter.filter(c) {
                                continue;
                            }
                        }
                        Message::Key(key)
                    }
                    Event::Resize(w, h) => Message::Resize(w, h),
                    _ => continue,
                };

                for cmd in update(&mut model, msg) {
                    if execute_command(&mut model, cmd, &msg_tx) {
                        shutdown.store(true, Ordering::Relaxed);
                        save_store_sync(&model);
                        return Ok(());
                    }
                }

                if model.dirty {
                    send_state(&state_tx, &model);
                    model.dirty = false;
                }
            }

            // Background messages (bounded)
            for _ in 0..MAX_BG_MESSAGES {
                let Ok(msg) = msg_rx.try_recv() else { break };
                for cmd in update(&mut model, msg) {
                    if execute_command(&mut model, cmd, &msg_tx) {
                        shutdown.store(true, Ordering::Relaxed);
                        save_store_sync(&model);
                        return Ok(());
                    }
                }
            }

            if model.dirty {
                send_state(&state_tx, &model);
                model.dirty = false;
            }

            tokio::time::sleep(Duration::from_micros(500)).await;
        }

        save_store_sync(&model);
        Ok(())
    }
}

/// Execute a command. Returns `true` when the app should quit.
fn execute_command(
    model: &mut Model,
    cmd: Command,
    msg_tx: &mpsc::UnboundedSender<Message>,
) -> bool {
    match cmd {
        Command::SaveStore => {
            tlog_debug!("Command::SaveStore lists={}", model.store.lists.len());
            let store = model.store.clone();
            let path = match model.config.store_path() {
                Ok(p) => p,
                Err(e) => {
                    tlog_error!("Store path unavailable: {}", e);
                    let _ = msg_tx.send(Message::StoreSaveFailed(e.to_string()));
                    return false;
                }
            };
            let tx = msg_tx.clone();
            tokio::spawn(async move {
                match store.save(path).await {
                    Ok(()) => {
                        let _ = tx.send(Message::StoreSaved);
                    }
                    Err(e) => {
                        tlog_error!("Store save failed: {}", e);
                        let _ = tx.send(Message::StoreSaveFailed(e.to_string()));
                    }
                }
            });
        }

        Command::Quit => {
            tlog_debug!("Command::Quit");
            return true;
        }
    }

    false
}

fn send_state(state_tx: &Sender<RenderState>, model: &Model) {
    let _ = state_tx.try_send(model.snapshot());
}

fn save_store_sync(model: &Model) {
    if let Err(e) = model.store.save_sync(&model.config) {
        tlog_error!("Final store save failed: {}", e);
    }
}

/// Swallows stray terminal escape sequences that arrive as individual
/// characters. Only a literal ESC arms the filter; `[` and `O` are treated
/// as sequence introducers solely in the position right after ESC, so
/// ordinary typed text containing them passes through untouched.
struct EscapeSequenceFilter {
    len: u8,
    active: bool,
}

impl EscapeSequenceFilter {
    fn new() -> Self {
        Self {
            len: 0,
            active: false,
        }
    }

    fn filter(&mut self, c: char) -> bool {
        if c == '\x1b' {
            self.active = true;
            self.len = 1;
            return true;
        }
        if self.active {
            self.len += 1;
            let is_intro = self.len == 2 && (c == '[' || c == 'O');
            if !is_intro && (c.is_ascii_alphabetic() || c == '~' || self.len > 10) {
                self.active = false;
            }
            return true;
        }
        false
    }
}
