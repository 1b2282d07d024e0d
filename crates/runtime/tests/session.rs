//! End-to-end session tests
//!
//! Every test runs on a fixed walled room and a random source that always
//! rolls zero, so placement is fully predictable: the player takes the first
//! floor cell (1, 1), the hearth the first free neighbour east of it (2, 1)
//! and the up-exit the next free cell (3, 1).

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Semaphore, broadcast};
use tokio::time::{Duration, sleep, timeout};

use game_core::{
    CellKind, Direction, EntityId, FixedRng, GameConfig, GameMessage, InventoryCommand,
    InventoryError, InventoryOutcome, ItemHandle, LevelId, LevelLayout, PlayerInput, Position,
    SessionStatus,
};
use runtime::{
    Event, IdleActionProvider, InputDisposition, InventoryEvent, LogEvent, MapGenError,
    MapGenerator, MapRequest, Runtime, RuntimeConfig, RuntimeError, RuntimeHandle, SchedulerPhase,
    SessionEvent, Topic, TurnEvent,
};

const WIDTH: u32 = 7;
const HEIGHT: u32 = 5;
const WAIT: Duration = Duration::from_secs(5);

/// A 7x5 room: solid border, open 5x3 interior.
///
/// Levels past the entrance wait for a permit when a gate is set.
struct FixedRoom {
    gate: Option<Arc<Semaphore>>,
}

#[async_trait]
impl MapGenerator for FixedRoom {
    async fn generate(&self, request: MapRequest) -> Result<LevelLayout, MapGenError> {
        if request.level != LevelId::ENTRANCE {
            if let Some(gate) = &self.gate {
                gate.acquire()
                    .await
                    .map_err(|error| MapGenError::Other(error.to_string()))?
                    .forget();
            }
        }

        let mut cells = Vec::new();
        let mut floor_cells = Vec::new();
        for y in 0..HEIGHT as i32 {
            for x in 0..WIDTH as i32 {
                let border = x == 0 || y == 0 || x == WIDTH as i32 - 1 || y == HEIGHT as i32 - 1;
                if border {
                    cells.push(CellKind::Wall);
                } else {
                    cells.push(CellKind::Floor);
                    floor_cells.push(Position::new(x, y));
                }
            }
        }

        Ok(LevelLayout {
            width: WIDTH,
            height: HEIGHT,
            cells,
            floor_cells,
        })
    }
}

fn game_config(max_levels: u32, min_creatures: u32) -> GameConfig {
    GameConfig {
        max_levels,
        max_items: 0,
        min_creatures,
        creatures_per_depth: 0,
        map_width: WIDTH,
        map_height: HEIGHT,
        view_width: WIDTH,
        view_height: HEIGHT,
        ..GameConfig::default()
    }
}

async fn build_runtime(config: GameConfig, gate: Option<Arc<Semaphore>>) -> Runtime {
    Runtime::builder()
        .config(RuntimeConfig {
            game_config: config,
            game_seed: 7,
            ..Default::default()
        })
        .rng(Arc::new(FixedRng::MIN))
        .map_generator(Arc::new(FixedRoom { gate }))
        .creature_provider(Arc::new(IdleActionProvider))
        .build()
        .await
        .expect("runtime should build")
}

async fn wait_for_phase(handle: &RuntimeHandle, wanted: SchedulerPhase) {
    timeout(WAIT, async {
        loop {
            if handle.phase().await.expect("phase query") == wanted {
                return;
            }
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("scheduler never reached {wanted}"));
}

/// Receives until `pick` matches, skipping everything else.
async fn next_matching<T>(
    rx: &mut broadcast::Receiver<Event>,
    mut pick: impl FnMut(&Event) -> Option<T>,
) -> T {
    timeout(WAIT, async {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Some(found) = pick(&event) {
                        return found;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(error) => panic!("event stream ended: {error}"),
            }
        }
    })
    .await
    .expect("timed out waiting for event")
}

async fn started(config: GameConfig) -> (Runtime, RuntimeHandle) {
    let mut runtime = build_runtime(config, None).await;
    let handle = runtime.handle();
    runtime.start();
    wait_for_phase(&handle, SchedulerPhase::AwaitingInput).await;
    (runtime, handle)
}

/// Workers only wind down once every handle clone is gone.
async fn finish(runtime: Runtime, handle: RuntimeHandle) {
    drop(handle);
    timeout(WAIT, runtime.shutdown())
        .await
        .expect("workers should stop")
        .expect("clean shutdown");
}

async fn step(handle: &RuntimeHandle, direction: Direction) {
    let disposition = handle
        .submit_input(PlayerInput::Move(direction))
        .await
        .expect("move");
    assert_eq!(disposition, InputDisposition::Accepted);
}

#[tokio::test]
async fn session_starts_once_the_entrance_is_generated() {
    let mut runtime = build_runtime(game_config(2, 0), None).await;
    let handle = runtime.handle();
    let mut session = handle.subscribe(Topic::Session);
    let mut turns = handle.subscribe(Topic::Turn);

    assert_eq!(handle.phase().await.unwrap(), SchedulerPhase::Loading);
    assert_eq!(
        handle.submit_input(PlayerInput::Wait).await.unwrap(),
        InputDisposition::Ignored
    );

    runtime.start();

    let level = next_matching(&mut session, |event| match event {
        Event::Session(SessionEvent::Started { level }) => Some(*level),
        _ => None,
    })
    .await;
    assert_eq!(level, LevelId::ENTRANCE);

    let clock = next_matching(&mut turns, |event| match event {
        Event::Turn(TurnEvent::AwaitingInput { clock }) => Some(*clock),
        _ => None,
    })
    .await;
    assert_eq!(clock, game_core::Tick(0));

    let state = handle.query_state().await.unwrap();
    assert!(state.started);
    assert_eq!(state.player.position, Position::new(1, 1));
    let level = state.current_level().unwrap();
    assert_eq!(level.cell(Position::new(3, 1)), Some(CellKind::ExitUp));
    assert!(level.blocker_at(Position::new(2, 1)).is_some());

    finish(runtime, handle).await;
}

#[tokio::test]
async fn walking_into_a_wall_keeps_the_turn() {
    let (runtime, handle) = started(game_config(2, 0)).await;
    let mut turns = handle.subscribe(Topic::Turn);

    let disposition = handle
        .submit_input(PlayerInput::Move(Direction::North))
        .await
        .unwrap();
    assert!(matches!(disposition, InputDisposition::Rejected { .. }));

    let rejected = next_matching(&mut turns, |event| match event {
        Event::Turn(TurnEvent::ActionRejected { action, .. }) => Some(action.actor()),
        _ => None,
    })
    .await;
    assert_eq!(rejected, EntityId::PLAYER);

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.player.position, Position::new(1, 1));
    assert_eq!(state.turn.clock, game_core::Tick(0));
    assert_eq!(handle.phase().await.unwrap(), SchedulerPhase::AwaitingInput);

    finish(runtime, handle).await;
}

#[tokio::test]
async fn waiting_advances_the_clock() {
    let (runtime, handle) = started(game_config(2, 0)).await;

    let disposition = handle.submit_input(PlayerInput::Wait).await.unwrap();
    assert_eq!(disposition, InputDisposition::Accepted);

    let state = handle.query_state().await.unwrap();
    assert!(state.turn.clock > game_core::Tick(0));
    assert_eq!(handle.phase().await.unwrap(), SchedulerPhase::AwaitingInput);

    finish(runtime, handle).await;
}

#[tokio::test]
async fn bumping_the_hearth_is_narrated() {
    let (runtime, handle) = started(game_config(2, 0)).await;
    let mut log = handle.subscribe(Topic::Log);

    step(&handle, Direction::East).await;

    let message = next_matching(&mut log, |event| match event {
        Event::Log(LogEvent::Message { message, .. }) => Some(message.clone()),
        _ => None,
    })
    .await;
    assert!(matches!(message, GameMessage::Bumped { .. }));
    assert_eq!(
        handle.query_state().await.unwrap().player.position,
        Position::new(1, 1)
    );

    finish(runtime, handle).await;
}

#[tokio::test]
async fn inventory_commands_report_and_publish() {
    let (runtime, handle) = started(game_config(2, 0)).await;
    let mut inventory = handle.subscribe(Topic::Inventory);
    let mut log = handle.subscribe(Topic::Log);

    let error = handle
        .inventory(InventoryCommand::Craft {
            items: vec![ItemHandle::FIRE],
        })
        .await
        .unwrap_err();
    assert!(matches!(error, RuntimeError::Inventory(_)));
    next_matching(&mut inventory, |event| match event {
        Event::Inventory(InventoryEvent::Failed { .. }) => Some(()),
        _ => None,
    })
    .await;
    let hint = next_matching(&mut log, |event| match event {
        Event::Log(LogEvent::Message { message, .. }) => Some(message.clone()),
        _ => None,
    })
    .await;
    assert_eq!(hint, GameMessage::CraftNeedsMore);

    let report = handle
        .inventory(InventoryCommand::Drop { slots: vec![0] })
        .await
        .unwrap();
    assert_eq!(
        report.outcome,
        InventoryOutcome::Dropped {
            items: vec![ItemHandle::FIRE]
        }
    );
    let carried = next_matching(&mut inventory, |event| match event {
        Event::Inventory(InventoryEvent::Changed { inventory, .. }) => Some(inventory.len()),
        _ => None,
    })
    .await;
    assert_eq!(carried, 0);

    // Inventory commands never spend the turn
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.turn.clock, game_core::Tick(0));
    assert_eq!(
        state
            .current_level()
            .unwrap()
            .item_at(Position::new(1, 1))
            .map(|item| item.handle),
        Some(ItemHandle::FIRE)
    );

    assert_eq!(
        handle.submit_input(PlayerInput::Interact).await.unwrap(),
        InputDisposition::Accepted
    );
    let state = handle.query_state().await.unwrap();
    assert!(state.inventory.contains(ItemHandle::FIRE));

    finish(runtime, handle).await;
}

#[tokio::test]
async fn transition_waits_for_the_next_level() {
    let gate = Arc::new(Semaphore::new(0));
    let mut runtime = build_runtime(game_config(2, 0), Some(Arc::clone(&gate))).await;
    let handle = runtime.handle();
    let mut session = handle.subscribe(Topic::Session);
    runtime.start();
    wait_for_phase(&handle, SchedulerPhase::AwaitingInput).await;

    step(&handle, Direction::SouthEast).await;
    step(&handle, Direction::NorthEast).await;
    assert_eq!(
        handle.query_state().await.unwrap().player.position,
        Position::new(3, 1)
    );

    assert_eq!(
        handle.submit_input(PlayerInput::Interact).await.unwrap(),
        InputDisposition::Accepted
    );
    let loading = next_matching(&mut session, |event| match event {
        Event::Session(SessionEvent::Loading { level }) => Some(*level),
        _ => None,
    })
    .await;
    assert_eq!(loading, LevelId(1));
    assert_eq!(handle.phase().await.unwrap(), SchedulerPhase::Loading);
    assert_eq!(
        handle.submit_input(PlayerInput::Wait).await.unwrap(),
        InputDisposition::Ignored
    );
    assert!(matches!(
        handle
            .inventory(InventoryCommand::Drop { slots: vec![0] })
            .await,
        Err(RuntimeError::NotAwaitingInput {
            phase: SchedulerPhase::Loading
        })
    ));

    gate.add_permits(1);

    let entered = next_matching(&mut session, |event| match event {
        Event::Session(SessionEvent::LevelEntered { from, to }) => Some((*from, *to)),
        _ => None,
    })
    .await;
    assert_eq!(entered, (LevelId::ENTRANCE, LevelId(1)));
    wait_for_phase(&handle, SchedulerPhase::AwaitingInput).await;

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.active_level, LevelId(1));
    let level = state.current_level().unwrap();
    let down = level.exit_down.expect("deeper levels have a down exit");
    assert_eq!(state.player.position, down.cell);
    assert_eq!(down.target, LevelId::ENTRANCE);

    finish(runtime, handle).await;
}

#[tokio::test]
async fn leaving_the_last_level_ends_the_session() {
    let (runtime, handle) = started(game_config(1, 0)).await;
    let mut session = handle.subscribe(Topic::Session);

    step(&handle, Direction::SouthEast).await;
    step(&handle, Direction::NorthEast).await;
    assert_eq!(
        handle.submit_input(PlayerInput::Interact).await.unwrap(),
        InputDisposition::Accepted
    );

    let status = next_matching(&mut session, |event| match event {
        Event::Session(SessionEvent::Ended { status }) => Some(status.clone()),
        _ => None,
    })
    .await;
    assert_eq!(status, SessionStatus::Escaped);
    assert_eq!(handle.phase().await.unwrap(), SchedulerPhase::Stopped);
    assert_eq!(
        handle.submit_input(PlayerInput::Wait).await.unwrap(),
        InputDisposition::Ignored
    );

    let error = handle
        .inventory(InventoryCommand::Drop { slots: vec![0] })
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        RuntimeError::Inventory(InventoryError::Disabled { .. })
    ));

    finish(runtime, handle).await;
}

#[tokio::test]
async fn creatures_take_their_turns_between_inputs() {
    let mut runtime = Runtime::builder()
        .config(RuntimeConfig {
            game_config: game_config(2, 1),
            ..Default::default()
        })
        .rng(Arc::new(FixedRng::MIN))
        .map_generator(Arc::new(FixedRoom { gate: None }))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut turns = handle.subscribe(Topic::Turn);
    runtime.start();
    wait_for_phase(&handle, SchedulerPhase::AwaitingInput).await;

    let state = handle.query_state().await.unwrap();
    let spider = state
        .current_level()
        .unwrap()
        .creatures
        .iter()
        .find(|creature| creature.is_hostile())
        .map(|creature| (creature.id, creature.position))
        .expect("one creature is spawned");
    assert_eq!(spider.1, Position::new(4, 1));

    let mut moved = false;
    for _ in 0..10 {
        handle.submit_input(PlayerInput::Wait).await.unwrap();
        let state = handle.query_state().await.unwrap();
        let position = state
            .current_level()
            .unwrap()
            .creatures
            .iter()
            .find(|creature| creature.id == spider.0)
            .map(|creature| creature.position);
        if position != Some(spider.1) {
            moved = true;
            break;
        }
    }
    assert!(moved, "the creature should close in on the player");

    let actor = next_matching(&mut turns, |event| match event {
        Event::Turn(TurnEvent::ActionExecuted { action, .. }) if action.actor() == spider.0 => {
            Some(action.actor())
        }
        _ => None,
    })
    .await;
    assert_eq!(actor, spider.0);

    finish(runtime, handle).await;
}
