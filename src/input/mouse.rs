//! Synthesizes the gesture stream from macroquad's mouse state.
//!
//! Left-drag becomes a one-contact paint stroke, middle-drag a two-contact
//! pan stroke, and each wheel tick a short two-contact zoom gesture focused
//! on the cursor. Stroke tracking lives in explicit struct state rather than
//! function-local statics.

use macroquad::prelude::*;

use super::{GesturePhase, GestureSample, InputCoordinator};
use crate::application::{ContainerGeometry, SharedViewport};
use crate::domain::Coord;

/// Per-wheel-tick scale factor.
const WHEEL_ZOOM_FACTOR: f64 = 1.1;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Stroke {
    Paint,
    Pan,
}

/// Polls macroquad input once per frame and feeds the coordinator.
pub struct MouseDriver {
    stroke: Option<Stroke>,
    last_pos: (f32, f32),
}

impl MouseDriver {
    pub fn new() -> Self {
        Self {
            stroke: None,
            last_pos: (0.0, 0.0),
        }
    }

    /// Translate this frame's mouse state into gesture samples. Returns the
    /// cell toggle requested by a paint stroke, if any.
    pub fn poll(
        &mut self,
        coordinator: &mut InputCoordinator,
        container: &ContainerGeometry,
        viewport: &SharedViewport,
    ) -> Option<Coord> {
        let pos = mouse_position();
        let time = get_time();
        let delta = (pos.0 - self.last_pos.0, pos.1 - self.last_pos.1);
        self.last_pos = pos;

        let toggled = match self.stroke {
            None => {
                if is_mouse_button_pressed(MouseButton::Left) {
                    self.stroke = Some(Stroke::Paint);
                    coordinator.handle(
                        &sample_at(1, GesturePhase::Begin, pos, (0.0, 0.0), 1.0, time),
                        container,
                        viewport,
                    )
                } else if is_mouse_button_pressed(MouseButton::Middle) {
                    self.stroke = Some(Stroke::Pan);
                    coordinator.handle(
                        &sample_at(2, GesturePhase::Begin, pos, (0.0, 0.0), 1.0, time),
                        container,
                        viewport,
                    )
                } else {
                    self.wheel_zoom(coordinator, container, viewport, pos, time);
                    None
                }
            }
            Some(Stroke::Paint) => {
                if is_mouse_button_down(MouseButton::Left) {
                    coordinator.handle(
                        &sample_at(1, GesturePhase::Update, pos, delta, 1.0, time),
                        container,
                        viewport,
                    )
                } else {
                    self.stroke = None;
                    coordinator.handle(
                        &sample_at(1, GesturePhase::End, pos, (0.0, 0.0), 1.0, time),
                        container,
                        viewport,
                    )
                }
            }
            Some(Stroke::Pan) => {
                if is_mouse_button_down(MouseButton::Middle) {
                    coordinator.handle(
                        &sample_at(2, GesturePhase::Update, pos, delta, 1.0, time),
                        container,
                        viewport,
                    )
                } else {
                    self.stroke = None;
                    coordinator.handle(
                        &sample_at(2, GesturePhase::End, pos, (0.0, 0.0), 1.0, time),
                        container,
                        viewport,
                    )
                }
            }
        };
        toggled
    }

    /// A wheel tick is a complete zoom gesture: begin, one scaled update, end.
    fn wheel_zoom(
        &self,
        coordinator: &mut InputCoordinator,
        container: &ContainerGeometry,
        viewport: &SharedViewport,
        pos: (f32, f32),
        time: f64,
    ) {
        let wheel = mouse_wheel().1;
        if wheel == 0.0 {
            return;
        }
        let scale = if wheel > 0.0 {
            WHEEL_ZOOM_FACTOR
        } else {
            1.0 / WHEEL_ZOOM_FACTOR
        };
        coordinator.handle(
            &sample_at(2, GesturePhase::Begin, pos, (0.0, 0.0), 1.0, time),
            container,
            viewport,
        );
        coordinator.handle(
            &sample_at(2, GesturePhase::Update, pos, (0.0, 0.0), scale, time),
            container,
            viewport,
        );
        coordinator.handle(
            &sample_at(2, GesturePhase::End, pos, (0.0, 0.0), scale, time),
            container,
            viewport,
        );
    }
}

impl Default for MouseDriver {
    fn default() -> Self {
        Self::new()
    }
}

fn sample_at(
    contacts: u8,
    phase: GesturePhase,
    pos: (f32, f32),
    delta: (f32, f32),
    scale: f64,
    time: f64,
) -> GestureSample {
    GestureSample {
        contacts,
        phase,
        delta_x: delta.0 as f64,
        delta_y: delta.1 as f64,
        scale,
        focal_x: pos.0 as f64,
        focal_y: pos.1 as f64,
        x: pos.0 as f64,
        y: pos.1 as f64,
        time,
    }
}
