//! Simulation worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives commands from [`crate::RuntimeHandle`] and levels from the
//! generation worker, runs the turn scheduler through
//! [`game_core::GameEngine`], and publishes [`Event`] notifications.
//!
//! The scheduler suspends on the player's turn ([`SchedulerPhase::AwaitingInput`])
//! and resumes exactly once per accepted input. Creature turns run to
//! completion inside the worker, so no input can interleave with them.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use game_core::{
    Action, ActionResult, CreatureAction, CreatureIntent, CreatureResult, EntityId, ExecuteError,
    ExecutionOutcome, ExitDirection, GameEngine, GameMessage, GameState, InteractResult,
    InventoryCommand, InventoryReport, LevelId, PlayerInput, TurnError, engine::inventory_failure,
};

use super::{LevelDelivery, SchedulerPhase};
use crate::api::{ActionProvider, InputDisposition, Result, RuntimeError};
use crate::events::{Event, EventBus, InventoryEvent, LogEvent, SessionEvent, TurnEvent};
use crate::oracle::OracleManager;
use crate::presentation::StatusLine;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Resume the scheduler with a player input.
    SubmitInput {
        input: PlayerInput,
        reply: oneshot::Sender<Result<InputDisposition>>,
    },
    /// Apply an inventory command. Never consumes a turn.
    Inventory {
        command: InventoryCommand,
        reply: oneshot::Sender<Result<InventoryReport>>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    /// Query the scheduler phase.
    QueryPhase {
        reply: oneshot::Sender<SchedulerPhase>,
    },
}

/// Level transition waiting for its destination to be generated.
#[derive(Clone, Copy, Debug)]
struct PendingTransition {
    to: LevelId,
    arrival: ExitDirection,
}

/// Background task that processes gameplay commands.
pub struct SimulationWorker {
    state: GameState,
    oracles: OracleManager,
    creatures: Arc<dyn ActionProvider>,
    phase: SchedulerPhase,
    pending: Option<PendingTransition>,
    command_rx: mpsc::Receiver<Command>,
    level_rx: mpsc::Receiver<LevelDelivery>,
    event_bus: EventBus,
}

impl SimulationWorker {
    /// Creates a new simulation worker. The session starts once the entrance
    /// level arrives on `level_rx`.
    pub fn new(
        state: GameState,
        oracles: OracleManager,
        creatures: Arc<dyn ActionProvider>,
        command_rx: mpsc::Receiver<Command>,
        level_rx: mpsc::Receiver<LevelDelivery>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            state,
            oracles,
            creatures,
            phase: SchedulerPhase::Loading,
            pending: None,
            command_rx,
            level_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd).await;
                }
                Some(delivery) = self.level_rx.recv() => {
                    self.handle_level(delivery).await;
                }
                else => break,
            }
        }
        debug!(target: "runtime::worker", "Simulation worker stopped");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::SubmitInput { input, reply } => {
                let result = self.submit_input(input).await;
                if let Err(error) = &result {
                    self.fail(error);
                }
                let _ = reply.send(result);
            }
            Command::Inventory { command, reply } => {
                let result = self.manage_inventory(command);
                let _ = reply.send(result);
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.state.clone());
            }
            Command::QueryPhase { reply } => {
                let _ = reply.send(self.phase);
            }
        }
    }

    async fn handle_level(&mut self, delivery: LevelDelivery) {
        if let Err(error) = self.receive_level(delivery).await {
            self.fail(&error);
        }
    }

    async fn receive_level(&mut self, delivery: LevelDelivery) -> Result<()> {
        let level = delivery?;
        let id = level.id;
        self.state
            .install_level(level)
            .map_err(game_core::SessionError::from)?;
        self.publish(Event::Session(SessionEvent::LevelGenerated { level: id }));

        if !self.state.started && id == LevelId::ENTRANCE {
            return self.start().await;
        }
        if let Some(pending) = self.pending.filter(|pending| pending.to == id) {
            self.pending = None;
            return self.enter_level(pending.to, pending.arrival).await;
        }
        Ok(())
    }

    async fn start(&mut self) -> Result<()> {
        let env = self.oracles.as_game_env();
        GameEngine::new(&mut self.state).start_session(env)?;

        let level = self.state.active_level;
        info!(
            target: "runtime::worker",
            level = %level,
            position = %self.state.player.position,
            "Session started"
        );
        self.publish(Event::Session(SessionEvent::Started { level }));
        self.publish_status();
        self.advance().await
    }

    async fn submit_input(&mut self, input: PlayerInput) -> Result<InputDisposition> {
        if self.phase != SchedulerPhase::AwaitingInput {
            warn!(
                target: "runtime::worker",
                ?input,
                phase = %self.phase,
                "Input dropped while not awaiting input"
            );
            return Ok(InputDisposition::Ignored);
        }

        let action = input.into_action();
        let outcome = match self.execute(action) {
            Ok(outcome) => outcome,
            Err(error) if error.is_rejection() => {
                debug!(
                    target: "runtime::worker",
                    action = action.as_snake_case(),
                    error = %error,
                    "Action rejected during pre-validate"
                );
                self.publish(Event::Turn(TurnEvent::ActionRejected {
                    action,
                    error: error.to_string(),
                    clock: self.state.turn.clock,
                }));
                return Ok(InputDisposition::Rejected {
                    reason: error.to_string(),
                });
            }
            Err(error) => {
                error!(
                    target: "runtime::worker",
                    action = action.as_snake_case(),
                    error = %error,
                    "Action execution failed"
                );
                return Err(error.into());
            }
        };
        self.publish_outcome(action, &outcome);

        match &outcome.action_result {
            ActionResult::Interact(InteractResult::Transition { to, arrival, .. }) => {
                self.begin_transition(*to, *arrival).await?;
            }
            result if outcome.turn_consumed || result.ends_session() => {
                self.advance().await?;
            }
            // Still the player's turn.
            _ => {}
        }
        Ok(InputDisposition::Accepted)
    }

    fn manage_inventory(&mut self, command: InventoryCommand) -> Result<InventoryReport> {
        if !matches!(
            self.phase,
            SchedulerPhase::AwaitingInput | SchedulerPhase::Stopped
        ) {
            return Err(RuntimeError::NotAwaitingInput { phase: self.phase });
        }

        let env = self.oracles.as_game_env();
        let mut working_state = self.state.clone();
        let report = GameEngine::new(&mut working_state).manage_inventory(env, &command);

        match report {
            Ok(report) => {
                self.state = working_state;
                debug!(
                    target: "runtime::worker",
                    command = command.as_str(),
                    items = self.state.inventory.len(),
                    "Inventory updated"
                );
                self.publish_messages(&report.messages);
                self.publish(Event::Inventory(InventoryEvent::Changed {
                    outcome: report.outcome.clone(),
                    inventory: self.state.inventory.clone(),
                }));
                Ok(report)
            }
            Err(error) => {
                debug!(
                    target: "runtime::worker",
                    command = command.as_str(),
                    error = %error,
                    "Inventory command failed"
                );
                if let Some(message) = inventory_failure(&error) {
                    self.publish_messages(&[message]);
                }
                self.publish(Event::Inventory(InventoryEvent::Failed {
                    command,
                    error: error.to_string(),
                }));
                Err(error.into())
            }
        }
    }

    /// Runs creature turns until the scheduler reaches the player or stops.
    async fn advance(&mut self) -> Result<()> {
        loop {
            let entity = match GameEngine::new(&mut self.state).prepare_next_turn() {
                Ok(entity) => entity,
                Err(TurnError::Halted) => {
                    self.stop();
                    return Ok(());
                }
                Err(error) => return Err(error.into()),
            };

            if entity.is_player() {
                self.phase = SchedulerPhase::AwaitingInput;
                self.publish(Event::Turn(TurnEvent::AwaitingInput {
                    clock: self.state.turn.clock,
                }));
                return Ok(());
            }

            self.phase = SchedulerPhase::Resolving;
            self.run_creature_turn(entity).await;
        }
    }

    async fn run_creature_turn(&mut self, entity: EntityId) {
        let idle = Action::Creature(CreatureAction::new(entity, CreatureIntent::Idle));
        let action = match self.creatures.provide_action(entity, &self.state).await {
            Ok(action) => action,
            Err(error) => {
                warn!(
                    target: "runtime::worker",
                    entity = %entity,
                    error = %error,
                    "Creature provider failed, idling"
                );
                idle
            }
        };

        let outcome = match self.execute(action) {
            Ok(outcome) => Ok((action, outcome)),
            Err(error) if action != idle => {
                debug!(
                    target: "runtime::worker",
                    entity = %entity,
                    error = %error,
                    "Creature action rejected, idling"
                );
                self.execute(idle).map(|outcome| (idle, outcome))
            }
            Err(error) => Err(error),
        };

        match outcome {
            Ok((action, outcome)) => self.publish_outcome(action, &outcome),
            Err(error) => {
                error!(
                    target: "runtime::worker",
                    entity = %entity,
                    error = %error,
                    "Creature cannot act, removing it from the schedule"
                );
                GameEngine::new(&mut self.state).deactivate(entity);
            }
        }
    }

    async fn begin_transition(&mut self, to: LevelId, arrival: ExitDirection) -> Result<()> {
        if self.state.is_level_loaded(to) {
            return self.enter_level(to, arrival).await;
        }

        info!(
            target: "runtime::worker",
            level = %to,
            "Waiting for level generation"
        );
        self.pending = Some(PendingTransition { to, arrival });
        self.phase = SchedulerPhase::Loading;
        self.publish(Event::Session(SessionEvent::Loading { level: to }));
        Ok(())
    }

    async fn enter_level(&mut self, to: LevelId, arrival: ExitDirection) -> Result<()> {
        let env = self.oracles.as_game_env();
        let from = self.state.active_level;
        let messages = GameEngine::new(&mut self.state).enter_level(env, to, arrival)?;

        info!(
            target: "runtime::worker",
            from = %from,
            to = %to,
            "Entered level"
        );
        self.publish_messages(&messages);
        self.publish(Event::Session(SessionEvent::LevelEntered { from, to }));
        self.publish_status();
        self.advance().await
    }

    /// Executes against a staged copy so a failed action leaves no trace.
    fn execute(&mut self, action: Action) -> std::result::Result<ExecutionOutcome, ExecuteError> {
        let env = self.oracles.as_game_env();
        let mut working_state = self.state.clone();
        let outcome = GameEngine::new(&mut working_state).execute(env, &action)?;
        self.state = working_state;
        Ok(outcome)
    }

    fn stop(&mut self) {
        if self.phase == SchedulerPhase::Stopped {
            return;
        }
        self.phase = SchedulerPhase::Stopped;
        info!(
            target: "runtime::worker",
            status = ?self.state.status,
            "Scheduler stopped"
        );
        self.publish(Event::Session(SessionEvent::Ended {
            status: self.state.status.clone(),
        }));
    }

    fn fail(&mut self, error: &RuntimeError) {
        error!(
            target: "runtime::worker",
            error = %error,
            "Session failed"
        );
        self.phase = SchedulerPhase::Stopped;
        self.publish(Event::Session(SessionEvent::Failed {
            error: error.to_string(),
        }));
    }

    fn publish_outcome(&self, action: Action, outcome: &ExecutionOutcome) {
        self.publish(Event::Turn(TurnEvent::ActionExecuted {
            action,
            result: outcome.action_result.clone(),
            turn_consumed: outcome.turn_consumed,
            clock: self.state.turn.clock,
        }));
        self.publish_messages(&outcome.messages);

        let player_affected = action.actor().is_player()
            || matches!(
                outcome.action_result,
                ActionResult::Creature(CreatureResult::Attacked { .. })
            );
        if player_affected {
            self.publish_status();
        }
    }

    fn publish_messages(&self, messages: &[GameMessage]) {
        for message in messages {
            self.publish(Event::Log(LogEvent::message(message.clone())));
        }
    }

    fn publish_status(&self) {
        self.publish(Event::Log(LogEvent::Status(StatusLine::from(
            &self.state.player,
        ))));
    }

    fn publish(&self, event: Event) {
        self.event_bus.publish(event);
    }
}
