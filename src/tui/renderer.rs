use crate::config::TEXT_COLOR;
use crate::engine::edit::EditMode;
use crate::engine::surface::Canvas;
use crate::engine::world::World;
use crate::map::tile::Rgb;
use crate::map::{MAP_HEIGHT, MAP_WIDTH};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Terminal columns per grid cell, so cells come out roughly square.
pub const CELL_COLUMNS: u16 = 2;

const MAP_COLS: u16 = MAP_WIDTH as u16 * CELL_COLUMNS;
const MAP_ROWS: u16 = MAP_HEIGHT as u16;
const STATUS_ROWS: u16 = 3;
const SIDEBAR_MIN: u16 = 24;

fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.r(), c.g(), c.b())
}

/// Draws the session and returns the screen area occupied by the grid cells.
pub fn render(f: &mut Frame, world: &World, canvas: &Canvas) -> Rect {
    let size = f.size();
    f.render_widget(Clear, size);

    if size.width < MAP_COLS + 2 || size.height < MAP_ROWS + 2 + STATUS_ROWS {
        let msg = Paragraph::new(format!(
            "Terminal too small: need {}x{}, resize to play.",
            MAP_COLS + 2,
            MAP_ROWS + 2 + STATUS_ROWS
        ))
        .block(Block::default().borders(Borders::ALL).title("Haunted Path"))
        .wrap(Wrap { trim: true });
        f.render_widget(msg, size);
        return Rect::default();
    }

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(STATUS_ROWS), Constraint::Min(MAP_ROWS + 2)])
        .split(size);

    draw_status(f, vertical[0], canvas, world);

    let body = vertical[1];
    if body.width >= MAP_COLS + 2 + SIDEBAR_MIN {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(MAP_COLS + 2), Constraint::Min(SIDEBAR_MIN)])
            .split(body);

        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(14), Constraint::Min(3)])
            .split(horizontal[1]);

        draw_sidebar(f, sidebar[0], world);
        draw_logs(f, sidebar[1], world);
        draw_map(f, horizontal[0], canvas)
    } else {
        draw_map(f, body, canvas)
    }
}

fn draw_status(f: &mut Frame, area: Rect, canvas: &Canvas, world: &World) {
    let style = match world.edit.mode() {
        EditMode::Editing => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        EditMode::Normal => Style::default().fg(rgb(TEXT_COLOR)),
    };
    let status = Paragraph::new(Line::from(Span::styled(canvas.status().to_string(), style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

fn draw_map(f: &mut Frame, area: Rect, canvas: &Canvas) -> Rect {
    let block_area = Rect {
        x: area.x,
        y: area.y,
        width: (MAP_COLS + 2).min(area.width),
        height: (MAP_ROWS + 2).min(area.height),
    };

    let mut lines: Vec<Line> = Vec::with_capacity(MAP_HEIGHT);
    for y in 0..MAP_HEIGHT {
        let mut spans: Vec<Span> = Vec::with_capacity(MAP_WIDTH);
        for x in 0..MAP_WIDTH {
            let bg = rgb(canvas.color(x, y));
            let span = match canvas.border(x, y) {
                Some(border) => Span::styled("[]", Style::default().bg(bg).fg(rgb(border))),
                None => Span::styled("  ", Style::default().bg(bg)),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    let block = Block::default().borders(Borders::ALL).title("Map");
    let inner = block.inner(block_area);
    f.render_widget(Paragraph::new(lines).block(block), block_area);
    inner
}

fn draw_sidebar(f: &mut Frame, area: Rect, world: &World) {
    let p = &world.player;
    let mode = match world.edit.mode() {
        EditMode::Normal => Span::styled("Explore", Style::default().fg(Color::Green)),
        EditMode::Editing if world.edit.is_dragging() => Span::styled(
            "Edit (painting)",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        EditMode::Editing => Span::styled(
            "Edit",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    };
    let pointer = match world.pointer {
        Some(c) => format!("({}, {})", c.x, c.y),
        None => "-".to_string(),
    };

    let text = vec![
        Line::from(vec![Span::raw("Mode: "), mode]),
        Line::from(format!("Screen: ({}, {})", p.screen_x, p.screen_y)),
        Line::from(format!("Pos: ({}, {})", p.pos.x, p.pos.y)),
        Line::from(format!("Pointer: {}", pointer)),
        Line::from(""),
        Line::from(Span::styled("Controls", Style::default().fg(Color::Cyan))),
        Line::from("WASD / Arrows: Move"),
        Line::from("Z X Space Enter: Interact"),
        Line::from("P: Edit mode / export"),
        Line::from("Mouse drag: Paint walls"),
        Line::from("Esc / Ctrl+C: Quit"),
    ];

    let sidebar = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Player"))
        .wrap(Wrap { trim: true });

    f.render_widget(sidebar, area);
}

fn draw_logs(f: &mut Frame, area: Rect, world: &World) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = world.logs.len().saturating_sub(visible);

    let lines: Vec<Line> = world
        .logs
        .iter()
        .skip(skip)
        .map(|msg| Line::from(msg.clone()))
        .collect();

    let logs = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Log"))
        .wrap(Wrap { trim: true });

    f.render_widget(logs, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::map::asset::bundled_world;
    use ratatui::{backend::TestBackend, Terminal};

    fn session() -> (World, Canvas) {
        let loaded = bundled_world().unwrap();
        let canvas = Canvas::new(loaded.background);
        (World::new(loaded, &GameConfig::default()), canvas)
    }

    #[test]
    fn map_area_sits_inside_the_border() {
        let (mut world, mut canvas) = session();
        world.tick(&mut canvas);

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut area = Rect::default();
        terminal.draw(|f| area = render(f, &world, &canvas)).unwrap();

        assert_eq!(area, Rect::new(1, STATUS_ROWS + 1, MAP_COLS, MAP_ROWS));
    }

    #[test]
    fn small_terminal_gets_a_notice() {
        let (world, canvas) = session();
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        let mut area = Rect::new(1, 1, 1, 1);
        terminal.draw(|f| area = render(f, &world, &canvas)).unwrap();

        assert_eq!(area, Rect::default());
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Terminal too small"));
    }
}
