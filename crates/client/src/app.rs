//! Terminal frontend and its event loop.
//!
//! The loop multiplexes runtime events from every topic with a fixed input
//! tick. Events update the local log and banner; the screen is redrawn from a
//! fresh state snapshot whenever something changed.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use crossterm::event::{self as term_event, Event as TermEvent, KeyEventKind};
use game_core::{GameConfig, GameState, ItemOracle, SessionStatus};
use runtime::{
    Event, InputDisposition, InventoryEvent, LogEvent, LogSink, MessageLog, RuntimeError,
    RuntimeHandle, SessionEvent, Topic,
};
use tokio::{
    sync::broadcast::error::RecvError,
    time::{self, Duration},
};

use crate::input::{InputHandler, InputMode, InventoryVerb, KeyAction};
use crate::terminal::{self, Tui};
use crate::ui::{self, View};
use crate::{ClientConfig, Frontend, Subscriptions};

const FRAME_INTERVAL_MS: u64 = 16;

/// Ratatui frontend: map, inventory, status and message panels.
pub struct CliFrontend {
    items: Arc<dyn ItemOracle>,
    log: MessageLog,
    input: InputHandler,
    selection: Vec<usize>,
    banner: Option<String>,
    dirty: bool,
}

impl CliFrontend {
    pub fn new(config: &ClientConfig, game_config: &GameConfig, items: Arc<dyn ItemOracle>) -> Self {
        let capacity = config.message_capacity.unwrap_or(game_config.log_capacity);
        Self {
            items,
            log: MessageLog::new(capacity),
            input: InputHandler::new(),
            selection: Vec::new(),
            banner: Some("Generating level 1...".to_owned()),
            dirty: true,
        }
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Tui,
        handle: &RuntimeHandle,
        mut subscriptions: Subscriptions,
    ) -> Result<()> {
        let mut take = |topic: Topic| {
            subscriptions
                .remove(&topic)
                .with_context(|| format!("Missing {topic:?} subscription"))
        };
        let mut turn_rx = take(Topic::Turn)?;
        let mut inventory_rx = take(Topic::Inventory)?;
        let mut log_rx = take(Topic::Log)?;
        let mut session_rx = take(Topic::Session)?;

        loop {
            let quit = tokio::select! {
                result = turn_rx.recv() => self.on_runtime_event(result),
                result = inventory_rx.recv() => self.on_runtime_event(result),
                result = log_rx.recv() => self.on_runtime_event(result),
                result = session_rx.recv() => self.on_runtime_event(result),
                _ = time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)) => {
                    self.handle_input_tick(handle).await?
                }
            };
            if quit {
                return Ok(());
            }

            if self.dirty {
                let state = handle.query_state().await?;
                self.render(terminal, &state)?;
                self.dirty = false;
            }
        }
    }

    /// Returns true when the event stream is gone.
    fn on_runtime_event(&mut self, result: Result<Event, RecvError>) -> bool {
        match result {
            Ok(event) => {
                self.apply(&event);
                self.dirty = true;
                false
            }
            Err(RecvError::Closed) => {
                tracing::warn!("Event stream closed");
                true
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Dropped {} stale events", skipped);
                self.dirty = true;
                false
            }
        }
    }

    fn apply(&mut self, event: &Event) {
        match event {
            Event::Log(LogEvent::Message { text, tone, .. }) => {
                self.log.log_message(text, Some(*tone));
            }
            Event::Log(LogEvent::Status(status)) => self.log.write_status(status),
            Event::Inventory(InventoryEvent::Changed { .. }) => self.selection.clear(),
            Event::Session(SessionEvent::Loading { level }) => {
                self.banner = Some(format!("Generating level {level}..."));
            }
            Event::Session(SessionEvent::Started { .. } | SessionEvent::LevelEntered { .. }) => {
                self.banner = None;
            }
            Event::Session(SessionEvent::Ended { status }) => {
                tracing::info!("Session ended: {status:?}");
                self.banner = Some(match status {
                    SessionStatus::Escaped => "You escaped! Press q to quit.".to_owned(),
                    SessionStatus::Dead { killer } => {
                        format!("Killed by {killer}. Press q to quit.")
                    }
                    SessionStatus::Running => "Session halted. Press q to quit.".to_owned(),
                });
            }
            Event::Session(SessionEvent::Failed { error }) => {
                tracing::error!("Session failed: {error}");
                self.banner = Some(format!("Session failed: {error}"));
            }
            _ => {}
        }
    }

    async fn handle_input_tick(&mut self, handle: &RuntimeHandle) -> Result<bool> {
        if !term_event::poll(Duration::from_millis(0))? {
            return Ok(false);
        }

        match term_event::read()? {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                let action = self.input.handle_key(key);
                self.dirty = true;
                self.on_key_action(action, handle).await
            }
            TermEvent::Resize(_, _) => {
                self.dirty = true;
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    async fn on_key_action(&mut self, action: KeyAction, handle: &RuntimeHandle) -> Result<bool> {
        match action {
            KeyAction::Quit => return Ok(true),
            KeyAction::Submit(input) => match handle.submit_input(input).await? {
                InputDisposition::Accepted => {}
                InputDisposition::Rejected { reason } => {
                    tracing::debug!("Input {input:?} rejected: {reason}");
                }
                InputDisposition::Ignored => {
                    tracing::debug!("Input {input:?} ignored");
                }
            },
            KeyAction::ToggleInventory => self.selection.clear(),
            KeyAction::ToggleSlot(slot) => {
                if let Some(index) = self.selection.iter().position(|&selected| selected == slot) {
                    self.selection.remove(index);
                } else {
                    self.selection.push(slot);
                }
            }
            KeyAction::Inventory(verb) => self.run_inventory(verb, handle).await?,
            KeyAction::None => {}
        }
        Ok(false)
    }

    async fn run_inventory(&mut self, verb: InventoryVerb, handle: &RuntimeHandle) -> Result<()> {
        let state = handle.query_state().await?;
        self.selection.retain(|&slot| slot < state.inventory.len());
        let Some(command) = verb.command(&self.selection, &state.inventory) else {
            return Ok(());
        };

        match handle.inventory(command).await {
            Ok(_) => {}
            // Already reported on the log topic
            Err(RuntimeError::Inventory(error)) => {
                tracing::debug!("Inventory command failed: {error}");
            }
            Err(RuntimeError::NotAwaitingInput { phase }) => {
                tracing::debug!("Inventory unavailable while {phase}");
            }
            Err(error) => return Err(error.into()),
        }
        self.selection.clear();
        Ok(())
    }

    fn render(&self, terminal: &mut Tui, state: &GameState) -> Result<()> {
        let view = View {
            state,
            items: self.items.as_ref(),
            log: &self.log,
            selection: &self.selection,
            inventory_open: self.input.mode() == InputMode::Inventory,
            banner: self.banner.as_deref(),
        };
        terminal.draw(|frame| ui::draw(frame, &view))?;
        Ok(())
    }
}

#[async_trait]
impl Frontend for CliFrontend {
    async fn run(&mut self, handle: RuntimeHandle, subscriptions: Subscriptions) -> Result<()> {
        let (mut terminal, _guard) = terminal::init()?;
        let result = self.event_loop(&mut terminal, &handle, subscriptions).await;
        if let Err(error) = &result {
            tracing::error!("Frontend stopped: {error:#}");
        }
        result
    }
}
