//! Renderer adapter: projects the live set through the viewport and emits
//! macroquad draw calls.
//!
//! Iteration is over the live cells, never over a rectangle of the plane, so
//! a frame costs population + visible grid lines regardless of where the
//! pattern has wandered.

use macroquad::prelude::*;

use crate::application::{ContainerGeometry, SimState, ViewportState};
use crate::domain::{Coord, LiveSet, Pattern};

const ALIVE_COLOR: Color = Color::new(0.0, 1.0, 0.59, 1.0);
const GRID_LINE_COLOR: Color = Color::new(0.16, 0.16, 0.16, 1.0);

/// Cell size below which grid lines are noise rather than guidance.
const GRID_LINE_MIN_CELL_SIZE: f64 = 8.0;

/// Format large numbers with K/M suffixes for the HUD.
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Visible logical window, padded by one cell so edge cells still draw.
fn visible_window(
    viewport: &ViewportState,
    container: &ContainerGeometry,
) -> Option<(f64, f64, f64, f64)> {
    let (min_row, min_col) =
        viewport.screen_to_logical(container.origin_x, container.origin_y, container)?;
    let (max_row, max_col) = viewport.screen_to_logical(
        container.origin_x + container.width,
        container.origin_y + container.height,
        container,
    )?;
    Some((min_row - 1.0, min_col - 1.0, max_row + 1.0, max_col + 1.0))
}

/// Draw every visible live cell as a filled rectangle.
pub fn draw_live_set(cells: &LiveSet, viewport: &ViewportState, container: &ContainerGeometry) {
    let Some((min_row, min_col, max_row, max_col)) = visible_window(viewport, container) else {
        return;
    };
    let cell_size = viewport.cell_size as f32;

    if viewport.cell_size >= GRID_LINE_MIN_CELL_SIZE {
        draw_grid_lines(viewport, container, (min_row, min_col, max_row, max_col));
    }

    for cell in cells.iter() {
        let (row, col) = (cell.row as f64, cell.col as f64);
        if row < min_row || row > max_row || col < min_col || col > max_col {
            continue;
        }
        let Some((x, y)) = viewport.logical_to_screen(row, col, container) else {
            continue;
        };
        draw_rectangle(x as f32, y as f32, cell_size, cell_size, ALIVE_COLOR);
    }
}

fn draw_grid_lines(
    viewport: &ViewportState,
    container: &ContainerGeometry,
    window: (f64, f64, f64, f64),
) {
    let (min_row, min_col, max_row, max_col) = window;
    let x0 = container.origin_x as f32;
    let x1 = (container.origin_x + container.width) as f32;
    let y0 = container.origin_y as f32;
    let y1 = (container.origin_y + container.height) as f32;

    for row in (min_row.ceil() as i64)..=(max_row.floor() as i64) {
        if let Some((_, y)) = viewport.logical_to_screen(row as f64, min_col, container) {
            draw_line(x0, y as f32, x1, y as f32, 1.0, GRID_LINE_COLOR);
        }
    }
    for col in (min_col.ceil() as i64)..=(max_col.floor() as i64) {
        if let Some((x, _)) = viewport.logical_to_screen(min_row, col as f64, container) {
            draw_line(x as f32, y0, x as f32, y1, 1.0, GRID_LINE_COLOR);
        }
    }
}

/// Stamp origin that centers `pattern` on the cell under the pointer.
/// Shared by the ghost preview and the actual stamp so they cannot disagree.
pub fn stamp_origin(
    pattern: &Pattern,
    viewport: &ViewportState,
    container: &ContainerGeometry,
    mouse_pos: (f32, f32),
) -> Option<Coord> {
    let (row, col) =
        viewport.screen_to_logical(mouse_pos.0 as f64, mouse_pos.1 as f64, container)?;
    Some(Coord::new(
        row.floor() as i32 - pattern.min_row - pattern.rows / 2,
        col.floor() as i32 - pattern.min_col - pattern.cols / 2,
    ))
}

/// Draw a semi-transparent ghost of the pattern at the cursor position.
pub fn draw_pattern_preview(
    pattern: &Pattern,
    viewport: &ViewportState,
    container: &ContainerGeometry,
    mouse_pos: (f32, f32),
) {
    let Some(origin) = stamp_origin(pattern, viewport, container, mouse_pos) else {
        return;
    };
    let cell_size = viewport.cell_size as f32;

    for &(d_row, d_col) in &pattern.cells {
        let cell = origin.offset(d_row, d_col);
        let Some((x, y)) =
            viewport.logical_to_screen(cell.row as f64, cell.col as f64, container)
        else {
            continue;
        };
        draw_rectangle(x as f32, y as f32, cell_size, cell_size, Color::new(0.0, 1.0, 0.59, 0.47));
        draw_rectangle_lines(
            x as f32,
            y as f32,
            cell_size,
            cell_size,
            1.5,
            Color::new(0.0, 1.0, 0.59, 0.78),
        );
    }

    // Bounding box around the whole pattern
    let corner = origin.offset(pattern.min_row, pattern.min_col);
    if let Some((x, y)) =
        viewport.logical_to_screen(corner.row as f64, corner.col as f64, container)
    {
        draw_rectangle_lines(
            x as f32,
            y as f32,
            pattern.cols as f32 * cell_size,
            pattern.rows as f32 * cell_size,
            2.0,
            Color::new(1.0, 1.0, 0.0, 0.7),
        );
    }
}

/// Status readout and key help in the top-left corner.
pub fn draw_hud(sim: &SimState, viewport: &ViewportState, pending_pattern: Option<&str>) {
    draw_rectangle(0.0, 0.0, 230.0, 210.0, Color::new(0.0, 0.0, 0.0, 0.6));

    let status = if sim.running { "Running" } else { "Paused" };
    let status_color = if sim.running {
        Color::new(0.0, 1.0, 0.0, 1.0)
    } else {
        Color::new(1.0, 0.65, 0.0, 1.0)
    };

    draw_text(&format!("Generation: {}", sim.generation), 10.0, 22.0, 18.0, WHITE);
    draw_text(
        &format!("Population: {}", format_number(sim.population())),
        10.0,
        42.0,
        18.0,
        WHITE,
    );
    draw_text(
        &format!("Cell size: {:.1}px", viewport.cell_size),
        10.0,
        62.0,
        16.0,
        GRAY,
    );
    draw_text(
        &format!("Center: ({:.1}, {:.1})", viewport.center_row, viewport.center_col),
        10.0,
        78.0,
        16.0,
        GRAY,
    );
    draw_text(
        &format!("{} | Step: {:.2}ms", sim.step_mode.name(), sim.last_step_time_ms),
        10.0,
        94.0,
        16.0,
        GRAY,
    );
    draw_text(status, 10.0, 114.0, 18.0, status_color);

    let help = [
        "LMB drag: paint  Mid drag: pan",
        "Wheel: zoom  Space: run/pause",
        "S: step  C: clear  R: random",
        "P: step mode  H: home  1-9,0: pattern",
    ];
    for (i, line) in help.iter().enumerate() {
        draw_text(line, 10.0, 138.0 + 16.0 * i as f32, 14.0, GRAY);
    }

    if let Some(name) = pending_pattern {
        draw_text(
            &format!("Placing: {} (click to stamp, Esc to cancel)", name),
            10.0,
            206.0,
            16.0,
            YELLOW,
        );
    }
}
