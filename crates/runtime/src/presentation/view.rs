use game_core::{GameState, ItemOracle, MessageTone, Position, StateError};

use super::Renderer;

/// Draws the camera window onto the active level: terrain first, then
/// items, creatures and finally the player on top.
pub fn render_level<R>(
    state: &GameState,
    items: &dyn ItemOracle,
    renderer: &mut R,
) -> Result<(), StateError>
where
    R: Renderer + ?Sized,
{
    let level = state.current_level()?;
    let camera = &state.camera;

    for y in 0..camera.view_height {
        for x in 0..camera.view_width {
            let position = camera.offset.offset(x as i32, y as i32);
            if let Some(cell) = level.cell(position) {
                renderer.draw_cell(x, y, cell);
            }
        }
    }

    let mut glyph = |position: Position, symbol: char, tone: Option<MessageTone>| {
        if let Some((x, y)) = camera.to_view(position) {
            let mut buffer = [0u8; 4];
            renderer.draw_text(x, y, symbol.encode_utf8(&mut buffer), tone);
        }
    };

    for item in &level.items {
        let symbol = items
            .definition(item.handle)
            .map_or('?', |definition| definition.glyph);
        glyph(item.position, symbol, None);
    }
    for creature in &level.creatures {
        let tone = creature.is_hostile().then_some(MessageTone::Danger);
        glyph(creature.position, creature.glyph, tone);
    }
    glyph(state.player.position, state.player.glyph, None);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{
        ActorState, AiKind, CellKind, EntityId, GameConfig, ItemHandle, ItemRegistry, ItemState,
        Level, LevelId, LevelLayout,
    };

    #[derive(Default)]
    struct Recorder {
        cells: usize,
        text: Vec<(u32, u32, String, Option<MessageTone>)>,
    }

    impl Renderer for Recorder {
        fn draw_cell(&mut self, _x: u32, _y: u32, _cell: CellKind) {
            self.cells += 1;
        }

        fn draw_text(&mut self, x: u32, y: u32, text: &str, tone: Option<MessageTone>) {
            self.text.push((x, y, text.to_owned(), tone));
        }
    }

    #[test]
    fn draws_layers_inside_the_view() {
        let config = GameConfig {
            view_width: 4,
            view_height: 3,
            ..GameConfig::default()
        };
        let mut state = GameState::new(1, &config);
        let layout = LevelLayout {
            width: 8,
            height: 6,
            cells: vec![CellKind::Floor; 48],
            floor_cells: Vec::new(),
        };
        let mut level = Level::from_layout(LevelId::ENTRANCE, layout).unwrap();
        level
            .items
            .push(ItemState::new(EntityId(5), Position::new(1, 1), ItemHandle(4)));
        level.creatures.push(ActorState::creature(
            EntityId(6),
            AiKind::Normal,
            Position::new(2, 1),
        ));
        // outside the 4x3 window
        level.creatures.push(ActorState::creature(
            EntityId(7),
            AiKind::Timid,
            Position::new(7, 5),
        ));
        state.install_level(level).unwrap();
        state.player.position = Position::new(1, 0);
        state.refresh_camera();

        let mut recorder = Recorder::default();
        render_level(&state, &ItemRegistry::default(), &mut recorder).unwrap();

        assert_eq!(recorder.cells, 12);
        assert_eq!(
            recorder.text,
            vec![
                (1, 1, "?".to_owned(), None),
                (2, 1, "o".to_owned(), Some(MessageTone::Danger)),
                (1, 0, "@".to_owned(), None),
            ]
        );
    }
}
