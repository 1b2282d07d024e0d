use game_core::{
    Action, ActionResult, ActorState, AiKind, CellKind, Controls, CraftError, CreatureAction,
    CreatureIntent, Direction, Env, EntityId, ExecuteError, ExitDirection, ExitLink, FixedRng,
    GameConfig, GameEngine, GameError, GameMessage, GameState, InteractResult, InventoryCommand,
    InventoryError, ItemDefinition, ItemHandle, ItemRegistry, ItemState, Level, LevelId,
    LevelLayout, MoveResult, PlayerInput, Position, SessionStatus, Tick, TurnError,
};
use game_core::engine::inventory_failure;

fn h(value: u32) -> ItemHandle {
    ItemHandle(value)
}

fn registry() -> ItemRegistry {
    ItemRegistry::new([
        ItemDefinition::raw(h(1), "Fire", '^'),
        ItemDefinition::raw(h(2), "Some Earth", '~'),
        ItemDefinition::raw(h(4), "A Stone", '.'),
        ItemDefinition::raw(h(8), "A Carcass", '%'),
        ItemDefinition::crafted(h(9), "Some Sulphur", [h(1), h(2)], [h(2)]),
    ])
    .unwrap()
}

/// 10x10 room with a wall along the top row.
fn room() -> Level {
    let width = 10;
    let height = 10;
    let mut cells = vec![CellKind::Floor; (width * height) as usize];
    for cell in cells.iter_mut().take(width as usize) {
        *cell = CellKind::Wall;
    }
    Level::from_layout(
        LevelId::ENTRANCE,
        LevelLayout {
            width,
            height,
            cells,
            floor_cells: Vec::new(),
        },
    )
    .unwrap()
}

/// Session with the player at (2, 1) and nothing else scheduled yet.
fn session(config: &GameConfig) -> GameState {
    let mut state = GameState::new(5, config);
    state.install_level(room()).unwrap();
    state.player.position = Position::new(2, 1);
    state.started = true;
    state
}

fn spawn(state: &mut GameState, ai: AiKind, position: Position) -> EntityId {
    let id = state.allocate_entity_id().unwrap();
    state
        .current_level_mut()
        .unwrap()
        .creatures
        .push(ActorState::creature(id, ai, position));
    id
}

fn player_turn(engine: &mut GameEngine<'_>) {
    assert_eq!(engine.prepare_next_turn(), Ok(EntityId::PLAYER));
}

#[test]
fn faster_actors_act_more_often() {
    let config = GameConfig::default();
    let items = registry();
    let env = Env::with_all(&items, &FixedRng::MIN, &config);
    let mut state = session(&config);
    let spider = spawn(&mut state, AiKind::Timid, Position::new(8, 8));

    let mut engine = GameEngine::new(&mut state);
    engine.activate_now(EntityId::PLAYER);
    engine.activate(spider);

    let mut order = Vec::new();
    for _ in 0..5 {
        let actor = engine.prepare_next_turn().unwrap();
        order.push(actor);
        let action = if actor.is_player() {
            PlayerInput::Wait.into_action()
        } else {
            Action::Creature(CreatureAction::new(actor, CreatureIntent::Idle))
        };
        engine.execute(env.as_game_env(), &action).unwrap();
    }

    // dex 3 waits 9240 ticks, dex 1 waits 27720; ties go to the lower id
    assert_eq!(
        order,
        vec![
            EntityId::PLAYER,
            EntityId::PLAYER,
            EntityId::PLAYER,
            EntityId::PLAYER,
            spider
        ]
    );
    assert_eq!(engine.clock(), Tick(27_720));
}

#[test]
fn wall_moves_are_rejected_without_spending_the_turn() {
    let config = GameConfig::default();
    let items = registry();
    let env = Env::with_all(&items, &FixedRng::MIN, &config);
    let mut state = session(&config);

    let mut engine = GameEngine::new(&mut state);
    engine.activate_now(EntityId::PLAYER);
    player_turn(&mut engine);

    let error = engine
        .execute(env.as_game_env(), &PlayerInput::Move(Direction::North).into_action())
        .unwrap_err();
    assert!(error.is_rejection());
    assert!(error.severity().is_recoverable());
    assert_eq!(engine.current_actor(), Some(EntityId::PLAYER));
    assert_eq!(state.turn.nonce, 0);
    assert_eq!(state.player.position, Position::new(2, 1));
}

#[test]
fn only_the_current_actor_may_act() {
    let config = GameConfig::default();
    let items = registry();
    let env = Env::with_all(&items, &FixedRng::MIN, &config);
    let mut state = session(&config);
    let orc = spawn(&mut state, AiKind::Normal, Position::new(5, 5));

    let mut engine = GameEngine::new(&mut state);
    engine.activate_now(EntityId::PLAYER);
    engine.activate(orc);
    player_turn(&mut engine);

    let error = engine
        .execute(
            env.as_game_env(),
            &Action::Creature(CreatureAction::new(orc, CreatureIntent::Idle)),
        )
        .unwrap_err();
    assert!(matches!(error, ExecuteError::ActorNotCurrent { .. }));
}

#[test]
fn bumping_the_hearth_keeps_the_turn() {
    let config = GameConfig::default();
    let items = registry();
    let env = Env::with_all(&items, &FixedRng::MIN, &config);
    let mut state = session(&config);
    let id = state.allocate_entity_id().unwrap();
    state
        .current_level_mut()
        .unwrap()
        .creatures
        .push(ActorState::hearth(id, Position::new(3, 1)));

    let mut engine = GameEngine::new(&mut state);
    engine.activate_now(EntityId::PLAYER);
    player_turn(&mut engine);

    let outcome = engine
        .execute(env.as_game_env(), &PlayerInput::Move(Direction::East).into_action())
        .unwrap();
    assert!(!outcome.turn_consumed);
    assert_eq!(
        outcome.messages[0].to_string(),
        "Player Runs Into A Hearth"
    );
    assert_eq!(engine.current_actor(), Some(EntityId::PLAYER));
    assert!(!engine.is_entity_active(id));
}

#[test]
fn killing_a_creature_drops_a_carcass_and_unschedules_it() {
    let config = GameConfig::default();
    let items = registry();
    let env = Env::with_all(&items, &FixedRng::MAX, &config);
    let mut state = session(&config);
    let spot = Position::new(3, 2);
    let spider = spawn(&mut state, AiKind::Timid, spot);
    state
        .current_level_mut()
        .unwrap()
        .creature_mut(spider)
        .unwrap()
        .hp
        .deplete(8);

    let mut engine = GameEngine::new(&mut state);
    engine.activate_now(EntityId::PLAYER);
    engine.activate(spider);
    player_turn(&mut engine);

    let outcome = engine
        .execute(env.as_game_env(), &PlayerInput::Move(Direction::SouthEast).into_action())
        .unwrap();
    assert!(outcome.turn_consumed);
    assert_eq!(
        outcome.messages,
        vec![
            GameMessage::PlayerHit {
                target: "Spider".into(),
                damage: 2
            },
            GameMessage::Killed {
                target: "Spider".into()
            },
        ]
    );
    assert!(!engine.is_entity_active(spider));

    let level = state.current_level().unwrap();
    assert!(level.creature(spider).is_none());
    assert_eq!(level.item_at(spot).map(|item| item.handle), Some(ItemHandle::CARCASS));
    // the player stays put when attacking
    assert_eq!(state.player.position, Position::new(2, 1));
}

#[test]
fn outclassed_attacks_are_ineffectual() {
    let config = GameConfig::default();
    let items = registry();
    let env = Env::with_all(&items, &FixedRng::MAX, &config);
    let mut state = session(&config);
    let giant = spawn(&mut state, AiKind::Aggressive, Position::new(2, 2));
    let before = state.current_level().unwrap().creature(giant).unwrap().hp;

    let mut engine = GameEngine::new(&mut state);
    engine.activate_now(EntityId::PLAYER);
    player_turn(&mut engine);

    let outcome = engine
        .execute(env.as_game_env(), &PlayerInput::Move(Direction::South).into_action())
        .unwrap();
    assert!(matches!(
        outcome.action_result,
        ActionResult::Move(MoveResult::Attacked { .. })
    ));
    assert_eq!(outcome.messages, vec![GameMessage::PlayerMissed]);
    assert_eq!(
        state.current_level().unwrap().creature(giant).unwrap().hp,
        before
    );
}

#[test]
fn stepping_onto_items_and_exits_is_reported() {
    let config = GameConfig::default();
    let items = registry();
    let env = Env::with_all(&items, &FixedRng::MIN, &config);
    let mut state = session(&config);
    {
        let level = state.current_level_mut().unwrap();
        level.items.push(ItemState::new(EntityId(90), Position::new(2, 2), h(4)));
        level.set_cell(Position::new(2, 3), CellKind::ExitUp);
        level.exit_up = Some(ExitLink {
            cell: Position::new(2, 3),
            target: LevelId(1),
        });
    }

    let mut engine = GameEngine::new(&mut state);
    engine.activate_now(EntityId::PLAYER);

    player_turn(&mut engine);
    let found = engine
        .execute(env.as_game_env(), &PlayerInput::Move(Direction::South).into_action())
        .unwrap();
    assert_eq!(found.messages[0].to_string(), "You Found A Stone");

    player_turn(&mut engine);
    let picked = engine
        .execute(env.as_game_env(), &PlayerInput::Interact.into_action())
        .unwrap();
    assert_eq!(picked.messages[0].to_string(), "You Pick Up A Stone");

    player_turn(&mut engine);
    let exit = engine
        .execute(env.as_game_env(), &PlayerInput::Move(Direction::South).into_action())
        .unwrap();
    assert_eq!(exit.messages[0].to_string(), "You Found An Exit Up");

    player_turn(&mut engine);
    let taken = engine
        .execute(env.as_game_env(), &PlayerInput::Interact.into_action())
        .unwrap();
    assert_eq!(
        taken.action_result,
        ActionResult::Interact(InteractResult::Transition {
            from: LevelId(0),
            to: LevelId(1),
            arrival: ExitDirection::Down,
        })
    );
    assert!(!taken.turn_consumed);
    assert_eq!(
        state.inventory.handles().collect::<Vec<_>>(),
        vec![ItemHandle::FIRE, h(4)]
    );
}

#[test]
fn taking_the_last_up_exit_escapes() {
    let config = GameConfig {
        max_levels: 1,
        ..GameConfig::default()
    };
    let items = registry();
    let env = Env::with_all(&items, &FixedRng::MIN, &config);
    let mut state = session(&config);
    {
        let here = state.player.position;
        let level = state.current_level_mut().unwrap();
        level.set_cell(here, CellKind::ExitUp);
        level.exit_up = Some(ExitLink {
            cell: here,
            target: LevelId(1),
        });
    }

    let mut engine = GameEngine::new(&mut state);
    engine.activate_now(EntityId::PLAYER);
    player_turn(&mut engine);

    let outcome = engine
        .execute(env.as_game_env(), &PlayerInput::Interact.into_action())
        .unwrap();
    assert!(outcome.action_result.ends_session());
    assert_eq!(
        outcome.messages[0].to_string(),
        "Congratulations, you managed to escape alive!"
    );
    assert_eq!(engine.prepare_next_turn(), Err(TurnError::Halted));
    assert_eq!(state.status, SessionStatus::Escaped);
    assert!(state.controls.is_empty());
}

#[test]
fn a_fatal_blow_ends_the_game() {
    let config = GameConfig::default();
    let items = registry();
    let env = Env::with_all(&items, &FixedRng::MAX, &config);
    let mut state = session(&config);
    let giant = spawn(&mut state, AiKind::Aggressive, Position::new(3, 2));
    state.player.hp.deplete(28);

    let mut engine = GameEngine::new(&mut state);
    engine.activate(giant);
    assert_eq!(engine.prepare_next_turn(), Ok(giant));

    let outcome = engine
        .execute(
            env.as_game_env(),
            &Action::Creature(CreatureAction::new(giant, CreatureIntent::Attack)),
        )
        .unwrap();
    assert_eq!(
        outcome.messages,
        vec![
            GameMessage::CreatureHit {
                attacker: "Giant".into(),
                damage: 2
            },
            GameMessage::PlayerKilled {
                killer: "Giant".into()
            },
            GameMessage::GameOver,
        ]
    );
    assert_eq!(state.player.hp.current(), 0);
    assert_eq!(
        state.status,
        SessionStatus::Dead {
            killer: "Giant".into()
        }
    );
    assert!(state.turn.active_actors.is_empty());

    let mut engine = GameEngine::new(&mut state);
    assert_eq!(
        engine.execute(env.as_game_env(), &PlayerInput::Wait.into_action()),
        Err(ExecuteError::SessionOver)
    );
}

#[test]
fn creatures_cannot_walk_through_the_player_or_attack_from_afar() {
    let config = GameConfig::default();
    let items = registry();
    let env = Env::with_all(&items, &FixedRng::MIN, &config);
    let mut state = session(&config);
    let orc = spawn(&mut state, AiKind::Normal, Position::new(3, 1));
    let far = spawn(&mut state, AiKind::Normal, Position::new(8, 8));

    let mut engine = GameEngine::new(&mut state);
    engine.activate(orc);
    assert_eq!(engine.prepare_next_turn(), Ok(orc));
    let blocked = engine
        .execute(
            env.as_game_env(),
            &Action::Creature(CreatureAction::new(orc, CreatureIntent::Step(Direction::West))),
        )
        .unwrap_err();
    assert!(blocked.is_rejection());

    engine.deactivate(orc);
    engine.activate(far);
    assert_eq!(engine.prepare_next_turn(), Ok(far));
    let distant = engine
        .execute(
            env.as_game_env(),
            &Action::Creature(CreatureAction::new(far, CreatureIntent::Attack)),
        )
        .unwrap_err();
    assert!(distant.is_rejection());
}

#[test]
fn inventory_commands_do_not_touch_the_schedule() {
    let config = GameConfig::default();
    let items = registry();
    let env = Env::with_all(&items, &FixedRng::MIN, &config);
    let mut state = session(&config);
    state.inventory.push(h(2));
    state.inventory.push(h(4));

    let mut engine = GameEngine::new(&mut state);
    engine.activate_now(EntityId::PLAYER);
    player_turn(&mut engine);

    let crafted = engine
        .manage_inventory(
            env.as_game_env(),
            &InventoryCommand::Craft {
                items: vec![h(2), h(1)],
            },
        )
        .unwrap();
    assert_eq!(crafted.messages[0].to_string(), "You Crafted Some Sulphur!");

    let failed = engine
        .manage_inventory(
            env.as_game_env(),
            &InventoryCommand::Craft {
                items: vec![h(99), h(100)],
            },
        )
        .unwrap_err();
    assert!(matches!(failed, InventoryError::Craft(CraftError::NoRecipe { .. })));
    assert_eq!(inventory_failure(&failed), Some(GameMessage::CraftFailed));

    let lonely = engine
        .manage_inventory(
            env.as_game_env(),
            &InventoryCommand::Craft { items: vec![h(1)] },
        )
        .unwrap_err();
    assert_eq!(
        inventory_failure(&lonely).map(|message| message.to_string()),
        Some("Please Select Two Or More Items To Craft".to_owned())
    );

    // only one stone is carried
    let short = engine
        .manage_inventory(
            env.as_game_env(),
            &InventoryCommand::Craft {
                items: vec![h(4), h(4)],
            },
        )
        .unwrap_err();
    assert!(matches!(short, InventoryError::Craft(CraftError::NotHeld { .. })));
    assert_eq!(inventory_failure(&short), Some(GameMessage::MissingIngredients));

    // [Fire, A Stone, Some Sulphur]
    let wielded = engine
        .manage_inventory(env.as_game_env(), &InventoryCommand::Wield { slots: vec![1] })
        .unwrap();
    assert_eq!(wielded.messages[0].to_string(), "You Wield A Stone!");

    let dropped = engine
        .manage_inventory(
            env.as_game_env(),
            &InventoryCommand::Drop {
                slots: vec![2, 0],
            },
        )
        .unwrap();
    assert_eq!(
        dropped
            .messages
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        vec!["You Dropped Fire!", "You Dropped Some Sulphur!"]
    );
    assert_eq!(engine.current_actor(), Some(EntityId::PLAYER));

    let used = engine
        .manage_inventory(env.as_game_env(), &InventoryCommand::Use { slot: 0 })
        .unwrap();
    assert_eq!(used.messages, vec![GameMessage::CannotUse]);

    assert_eq!(state.inventory.handles().collect::<Vec<_>>(), vec![h(4)]);
    assert_eq!(state.current_level().unwrap().items.len(), 2);
    assert_eq!(state.turn.nonce, 0);
}

#[test]
fn inventory_is_locked_after_the_game_ends() {
    let config = GameConfig::default();
    let items = registry();
    let env = Env::with_all(&items, &FixedRng::MIN, &config);
    let mut state = session(&config);
    state.finish(SessionStatus::Escaped);
    assert_eq!(state.controls, Controls::empty());

    let error = GameEngine::new(&mut state)
        .manage_inventory(env.as_game_env(), &InventoryCommand::Use { slot: 0 })
        .unwrap_err();
    assert!(matches!(error, InventoryError::Disabled { .. }));
}
