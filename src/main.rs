use std::sync::Arc;

use macroquad::prelude::*;
use ::rand::rng;
use sparse_life::{
    Config, ContainerGeometry, Coord, Diagnostic, DiagnosticsSink, InputCoordinator, MouseDriver,
    SharedLiveSet, SharedViewport, SimState, TracingSink, ViewportState,
    domain::{EngineError, clamp_fractional},
    presets, rendering,
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Infinite Life".to_owned(),
        window_width: 1000,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

/// Logical cell at the current camera center, for centering randomize.
fn center_cell(viewport: &ViewportState, config: &Config) -> Coord {
    Coord::new_bounded(
        clamp_fractional(viewport.center_row, config.coord_bound).floor() as i32,
        clamp_fractional(viewport.center_col, config.coord_bound).floor() as i32,
        config.coord_bound,
    )
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = Config::default();
    let sink: Arc<dyn DiagnosticsSink> = Arc::new(TracingSink);

    // The two shared cells of the core: camera state written by the input
    // coordinator, live-set snapshot published after every mutation.
    let viewport = SharedViewport::new(ViewportState::home(&config));
    let published = SharedLiveSet::new(sparse_life::LiveSet::new());

    let mut sim = SimState::new();
    let mut coordinator = InputCoordinator::new(config, Arc::clone(&sink));
    let mut mouse = MouseDriver::new();
    let mut rng = rng();

    let patterns = presets::all_patterns();
    let mut pending_pattern: Option<usize> = None;

    loop {
        // This loop plays the external collaborators: layout (geometry from
        // the current window), scheduler (tick at fixed cadence), and the
        // gesture source (mouse driver).
        let container =
            ContainerGeometry::new(0.0, 0.0, screen_width() as f64, screen_height() as f64);

        if is_key_pressed(KeyCode::Space) {
            sim.toggle_running();
        }
        if is_key_pressed(KeyCode::S) {
            sim.single_step();
        }
        if is_key_pressed(KeyCode::C) {
            sim.clear();
        }
        if is_key_pressed(KeyCode::R) {
            let center = center_cell(&viewport.load(), &config);
            if let Err(EngineError::RegionTooLarge { cells, .. }) =
                sim.randomize(center, &mut rng, &config)
            {
                sink.report(Diagnostic::RandomizeRejected { cells });
            }
        }
        if is_key_pressed(KeyCode::P) {
            sim.step_mode = sim.step_mode.toggled();
        }
        if is_key_pressed(KeyCode::H) {
            viewport.replace(ViewportState::home(&config));
        }

        // Digit keys arm pattern placement; placement pauses the run.
        const DIGITS: [KeyCode; 10] = [
            KeyCode::Key1,
            KeyCode::Key2,
            KeyCode::Key3,
            KeyCode::Key4,
            KeyCode::Key5,
            KeyCode::Key6,
            KeyCode::Key7,
            KeyCode::Key8,
            KeyCode::Key9,
            KeyCode::Key0,
        ];
        for (idx, key) in DIGITS.iter().enumerate() {
            if is_key_pressed(*key) && idx < patterns.len() {
                pending_pattern = Some(idx);
                sim.running = false;
            }
        }

        if let Some(idx) = pending_pattern {
            if is_mouse_button_pressed(MouseButton::Right) || is_key_pressed(KeyCode::Escape) {
                pending_pattern = None;
            } else if is_mouse_button_pressed(MouseButton::Left) {
                let vp = viewport.load();
                if let Some(origin) =
                    rendering::stamp_origin(&patterns[idx], &vp, &container, mouse_position())
                {
                    sim.stamp(&patterns[idx], origin);
                }
                pending_pattern = None;
            }
        } else if let Some(coord) = mouse.poll(&mut coordinator, &container, &viewport) {
            sim.toggle_cell(coord);
        }

        sim.tick(get_frame_time(), &config);
        published.store(sim.snapshot());

        clear_background(BLACK);
        let vp = viewport.load();
        rendering::draw_live_set(&published.load(), &vp, &container);
        if let Some(idx) = pending_pattern {
            rendering::draw_pattern_preview(&patterns[idx], &vp, &container, mouse_position());
        }
        rendering::draw_hud(&sim, &vp, pending_pattern.map(|i| patterns[i].name));

        next_frame().await;
    }
}
