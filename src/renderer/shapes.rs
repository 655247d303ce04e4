//! Shape generation for 2D primitives
//!
//! Game coordinates are CSS pixels with the origin at the top-left and y
//! pointing down; vertices come out in normalized device coordinates.

use glam::Vec2;

use super::vertex::{Palette, Vertex, colors};
use crate::consts::{AVATAR_SIZE, HAZARD_SIZE};
use crate::settings::Settings;
use crate::sim::{GameState, Hazard, Viewport};

/// Blink period for collided hazards
const FLASH_PERIOD_MS: f64 = 200.0;

/// Map a screen point to NDC (-1..1, y up)
pub fn screen_to_ndc(point: Vec2, viewport: Viewport) -> Vec2 {
    let w = viewport.width.max(1.0);
    let h = viewport.height.max(1.0);
    Vec2::new(point.x / w * 2.0 - 1.0, 1.0 - point.y / h * 2.0)
}

/// Generate vertices for an axis-aligned square (two triangles)
pub fn square(top_left: Vec2, size: f32, color: [f32; 4], viewport: Viewport) -> [Vertex; 6] {
    let a = screen_to_ndc(top_left, viewport);
    let b = screen_to_ndc(top_left + Vec2::new(size, size), viewport);

    [
        Vertex::new(a.x, a.y, color),
        Vertex::new(a.x, b.y, color),
        Vertex::new(b.x, a.y, color),
        Vertex::new(b.x, a.y, color),
        Vertex::new(a.x, b.y, color),
        Vertex::new(b.x, b.y, color),
    ]
}

/// Palette selected by the settings
pub fn palette(settings: &Settings) -> Palette {
    if settings.high_contrast {
        colors::HIGH_CONTRAST
    } else {
        colors::STANDARD
    }
}

/// Color for a hazard at `time_ms`
pub fn hazard_color(hazard: &Hazard, settings: &Settings, palette: &Palette, time_ms: f64) -> [f32; 4] {
    if !hazard.collided || !settings.hazard_flash {
        return palette.hazard;
    }
    if !settings.effective_flash() {
        return palette.hazard_hit;
    }
    let phase = (time_ms / FLASH_PERIOD_MS).floor() as i64;
    if phase % 2 == 0 {
        palette.hazard_hit
    } else {
        palette.hazard
    }
}

/// Build the whole scene: hazards first, avatar on top
pub fn scene(state: &GameState, settings: &Settings, time_ms: f64) -> Vec<Vertex> {
    let palette = palette(settings);
    let viewport = state.viewport;
    let mut vertices = Vec::with_capacity((state.hazards.len() + 1) * 6);

    for hazard in &state.hazards {
        let color = hazard_color(hazard, settings, &palette, time_ms);
        vertices.extend_from_slice(&square(hazard.pos, HAZARD_SIZE, color, viewport));
    }
    vertices.extend_from_slice(&square(state.avatar.pos, AVATAR_SIZE, palette.avatar, viewport));

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Edge, GameState};

    fn hazard(collided: bool) -> Hazard {
        Hazard {
            id: 1,
            pos: Vec2::new(100.0, 0.0),
            edge: Edge::Top,
            spawned_at_ms: 0.0,
            expires_at_ms: 2000.0,
            collided,
        }
    }

    #[test]
    fn test_screen_corners_map_to_ndc() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(screen_to_ndc(Vec2::ZERO, vp), Vec2::new(-1.0, 1.0));
        assert_eq!(screen_to_ndc(Vec2::new(800.0, 600.0), vp), Vec2::new(1.0, -1.0));
        assert_eq!(screen_to_ndc(Vec2::new(400.0, 300.0), vp), Vec2::ZERO);
    }

    #[test]
    fn test_scene_has_one_quad_per_entity() {
        let mut state = GameState::new(1, Viewport::new(800.0, 600.0));
        assert_eq!(scene(&state, &Settings::default(), 0.0).len(), 6);

        state.hazards.push(hazard(false));
        let vertices = scene(&state, &Settings::default(), 0.0);
        assert_eq!(vertices.len(), 12);
        // Avatar drawn last
        assert_eq!(vertices[11].color, colors::STANDARD.avatar);
    }

    #[test]
    fn test_collided_hazard_flashes() {
        let settings = Settings::default();
        let palette = colors::STANDARD;
        let hit = hazard(true);
        assert_eq!(hazard_color(&hit, &settings, &palette, 0.0), palette.hazard_hit);
        assert_eq!(hazard_color(&hit, &settings, &palette, 250.0), palette.hazard);
        assert_eq!(hazard_color(&hazard(false), &settings, &palette, 0.0), palette.hazard);
    }

    #[test]
    fn test_reduced_motion_uses_steady_cue() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let palette = colors::STANDARD;
        assert_eq!(hazard_color(&hazard(true), &settings, &palette, 250.0), palette.hazard_hit);

        let off = Settings {
            hazard_flash: false,
            ..Default::default()
        };
        assert_eq!(hazard_color(&hazard(true), &off, &palette, 0.0), palette.hazard);
    }
}
