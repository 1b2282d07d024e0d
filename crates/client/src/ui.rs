//! Frame layout and widgets.
//!
//! ```text
//! ┌ Level N ──────────────┐┌ Inventory ─┐
//! │ map window            ││ a) Fire    │
//! └───────────────────────┘└────────────┘
//! ┌ Status ───────────────────────────────┐
//! └───────────────────────────────────────┘
//! ┌ Messages ─────────────────────────────┐
//! └───────────────────────────────────────┘
//! ```

use game_core::{CellKind, GameState, ItemOracle, MessageTone};
use ratatui::{
    Frame,
    layout::{Constraint, Direction as Axis, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListDirection, ListItem, Paragraph},
};
use runtime::{MessageLog, Renderer, StatusLine, render_level};

use crate::input::slot_label;

const INVENTORY_WIDTH: u16 = 34;

/// Everything one frame shows.
pub struct View<'a> {
    pub state: &'a GameState,
    pub items: &'a dyn ItemOracle,
    pub log: &'a MessageLog,
    pub selection: &'a [usize],
    pub inventory_open: bool,
    /// Overlay text, e.g. while a level is still generating.
    pub banner: Option<&'a str>,
}

pub fn tone_style(tone: Option<MessageTone>) -> Style {
    match tone {
        Some(MessageTone::Danger) => Style::default().fg(Color::Red),
        Some(MessageTone::Success) => Style::default().fg(Color::Green),
        Some(MessageTone::Transition) => Style::default().fg(Color::Cyan),
        Some(MessageTone::Info) | None => Style::default(),
    }
}

fn terrain(cell: CellKind) -> (char, Style) {
    match cell {
        CellKind::Floor => ('.', Style::default().fg(Color::DarkGray)),
        CellKind::Wall => ('#', Style::default().fg(Color::Gray)),
        CellKind::ExitUp => (
            '<',
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        CellKind::ExitDown => (
            '>',
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    }
}

/// Character grid the map is drawn into before it becomes a widget.
pub struct MapCanvas {
    width: u32,
    height: u32,
    cells: Vec<(char, Style)>,
}

impl MapCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![(' ', Style::default()); (width * height) as usize],
        }
    }

    fn put(&mut self, x: u32, y: u32, glyph: (char, Style)) {
        if x < self.width && y < self.height {
            self.cells[(y * self.width + x) as usize] = glyph;
        }
    }

    #[cfg(test)]
    fn glyph(&self, x: u32, y: u32) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[(y * self.width + x) as usize].0)
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        self.cells
            .chunks(self.width.max(1) as usize)
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|&(glyph, style)| Span::styled(glyph.to_string(), style))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

impl Renderer for MapCanvas {
    fn draw_cell(&mut self, x: u32, y: u32, cell: CellKind) {
        self.put(x, y, terrain(cell));
    }

    fn draw_text(&mut self, x: u32, y: u32, text: &str, tone: Option<MessageTone>) {
        let style = match tone {
            None => Style::default().add_modifier(Modifier::BOLD),
            tone => tone_style(tone).add_modifier(Modifier::BOLD),
        };
        for (offset, glyph) in text.chars().enumerate() {
            self.put(x + offset as u32, y, (glyph, style));
        }
    }
}

pub fn draw(frame: &mut Frame, view: &View<'_>) {
    let camera = &view.state.camera;
    let map_height = camera.view_height.min(u32::from(u16::MAX - 2)) as u16 + 2;
    let message_height = view.log.capacity().min(usize::from(u16::MAX - 2)) as u16 + 2;

    let rows = Layout::default()
        .direction(Axis::Vertical)
        .constraints([
            Constraint::Min(map_height.min(frame.area().height.saturating_sub(message_height + 3))),
            Constraint::Length(3),
            Constraint::Length(message_height),
        ])
        .split(frame.area());

    let top = Layout::default()
        .direction(Axis::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(INVENTORY_WIDTH)])
        .split(rows[0]);

    draw_map(frame, top[0], view);
    draw_inventory(frame, top[1], view);
    draw_status(frame, rows[1], view);
    draw_messages(frame, rows[2], view);
}

fn draw_map(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let state = view.state;
    let title = format!(" Level {} ", state.active_level);
    let block = Block::default().borders(Borders::ALL).title(title);

    let mut canvas = MapCanvas::new(state.camera.view_width, state.camera.view_height);
    let lines = match (view.banner, render_level(state, view.items, &mut canvas)) {
        (Some(banner), _) => vec![Line::from(Span::styled(
            banner.to_owned(),
            Style::default().add_modifier(Modifier::BOLD),
        ))],
        (None, Ok(())) => canvas.lines(),
        (None, Err(_)) => vec![Line::from("Generating level...")],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_inventory(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let (title, keys) = if view.inventory_open {
        (" Inventory: a-z select ", " C D W E R U, Esc ")
    } else {
        (" Inventory [i] ", "")
    };

    let entries: Vec<ListItem> = view
        .state
        .inventory
        .items
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let label = slot_label(index).unwrap_or(' ');
            let name = view.items.name(slot.handle);
            let text = match slot.equipped {
                Some(equip) => format!("{label}) {name} ({equip})"),
                None => format!("{label}) {name}"),
            };
            let style = if view.selection.contains(&index) {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let border = if view.inventory_open {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let list = List::new(entries).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title)
            .title_bottom(keys),
    );
    frame.render_widget(list, area);
}

fn draw_status(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let status = view
        .log
        .status()
        .copied()
        .unwrap_or_else(|| StatusLine::from(&view.state.player));
    let line = Line::from(status.to_string());
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" Status ")),
        area,
    );
}

/// Newest message at the bottom.
fn draw_messages(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let items: Vec<ListItem> = view
        .log
        .newest_first()
        .map(|entry| ListItem::new(entry.text.clone()).style(tone_style(entry.tone)))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Messages "))
        .direction(ListDirection::BottomToTop);
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{
        GameConfig, ItemHandle, ItemRegistry, Level, LevelId, LevelLayout, Position,
    };
    use game_content::ItemLoader;
    use ratatui::{Terminal, backend::TestBackend};
    use runtime::LogSink;

    fn registry() -> ItemRegistry {
        ItemLoader::builtin()
            .and_then(ItemLoader::registry)
            .expect("built-in catalogue")
    }

    fn small_state() -> GameState {
        let config = GameConfig {
            view_width: 5,
            view_height: 3,
            ..GameConfig::default()
        };
        let mut state = GameState::new(3, &config);
        let mut cells = vec![CellKind::Wall; 15];
        let mut floor_cells = Vec::new();
        for x in 1..4 {
            cells[5 + x as usize] = CellKind::Floor;
            floor_cells.push(Position::new(x, 1));
        }
        let level = Level::from_layout(
            LevelId::ENTRANCE,
            LevelLayout {
                width: 5,
                height: 3,
                cells,
                floor_cells,
            },
        )
        .expect("layout");
        state.install_level(level).expect("fresh level");
        state.player.position = Position::new(2, 1);
        state
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn canvas_clips_to_its_size() {
        let mut canvas = MapCanvas::new(3, 2);
        canvas.draw_cell(0, 0, CellKind::Wall);
        canvas.draw_text(2, 1, "@", None);
        canvas.draw_text(5, 5, "x", None);
        assert_eq!(canvas.glyph(0, 0), Some('#'));
        assert_eq!(canvas.glyph(2, 1), Some('@'));
        assert_eq!(canvas.glyph(3, 0), None);
        assert_eq!(canvas.lines().len(), 2);
    }

    #[test]
    fn frame_shows_map_inventory_and_status() {
        let state = small_state();
        let items = registry();
        let mut log = MessageLog::new(4);
        log.log_message("You Found An Exit Up", Some(MessageTone::Info));

        let mut terminal = Terminal::new(TestBackend::new(80, 16)).expect("terminal");
        terminal
            .draw(|frame| {
                draw(
                    frame,
                    &View {
                        state: &state,
                        items: &items,
                        log: &log,
                        selection: &[0],
                        inventory_open: true,
                        banner: None,
                    },
                )
            })
            .expect("draw");

        let text = screen(&terminal);
        assert!(text.contains("#.@.#"));
        assert!(text.contains("a) Fire"));
        assert!(text.contains("HP: 30/30"));
        assert!(text.contains("You Found An Exit Up"));
        assert!(state.inventory.contains(ItemHandle::FIRE));
    }

    #[test]
    fn banner_replaces_the_map() {
        let state = small_state();
        let items = registry();
        let log = MessageLog::new(2);

        let mut terminal = Terminal::new(TestBackend::new(80, 12)).expect("terminal");
        terminal
            .draw(|frame| {
                draw(
                    frame,
                    &View {
                        state: &state,
                        items: &items,
                        log: &log,
                        selection: &[],
                        inventory_open: false,
                        banner: Some("Generating level 2..."),
                    },
                )
            })
            .expect("draw");

        let text = screen(&terminal);
        assert!(text.contains("Generating level 2..."));
        assert!(!text.contains("#.@.#"));
    }
}
