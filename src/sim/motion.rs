//! Perimeter motion and jumping

use super::state::{Avatar, Direction, Viewport};
use crate::consts::{AVATAR_SIZE, JUMP_OFFSET, MOVE_STEP};

/// Advance the avatar one frame along the perimeter.
///
/// Returns the new direction if the avatar reached a boundary this frame.
pub fn advance(avatar: &mut Avatar, viewport: Viewport) -> Option<Direction> {
    let max = viewport.max_corner(AVATAR_SIZE);
    let mut pos = avatar.pos + avatar.direction.delta() * MOVE_STEP;

    let hit_boundary = match avatar.direction {
        Direction::Right => pos.x >= max.x,
        Direction::Down => pos.y >= max.y,
        Direction::Left => pos.x <= 0.0,
        Direction::Up => pos.y <= 0.0,
    };

    // Clamp both axes: the cross axis can be out of range after a resize
    pos = viewport.clamp_corner(pos, AVATAR_SIZE);
    avatar.pos = pos;

    if hit_boundary {
        avatar.direction = avatar.direction.next();
        Some(avatar.direction)
    } else {
        None
    }
}

/// Move the avatar up by the jump offset, never above the top edge
pub fn jump(avatar: &mut Avatar) {
    avatar.pos.y = (avatar.pos.y - JUMP_OFFSET).max(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn avatar_at(x: f32, y: f32, direction: Direction) -> Avatar {
        Avatar {
            pos: Vec2::new(x, y),
            direction,
        }
    }

    #[test]
    fn test_advance_moves_by_step() {
        let mut avatar = avatar_at(0.0, 0.0, Direction::Right);
        assert_eq!(advance(&mut avatar, Viewport::new(800.0, 600.0)), None);
        assert_eq!(avatar.pos, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_turns_exactly_at_right_edge() {
        let vp = Viewport::new(800.0, 600.0);
        // Leading edge at 746 + 50 = 796: one more step lands exactly on 800
        let mut avatar = avatar_at(746.0, 0.0, Direction::Right);
        assert_eq!(advance(&mut avatar, vp), Some(Direction::Down));
        assert_eq!(avatar.pos.x, 750.0);

        let mut avatar = avatar_at(745.0, 0.0, Direction::Right);
        assert_eq!(advance(&mut avatar, vp), None);
        assert_eq!(avatar.pos.x, 749.0);
    }

    #[test]
    fn test_overshoot_is_clamped() {
        let vp = Viewport::new(800.0, 600.0);
        let mut avatar = avatar_at(10.0, 548.0, Direction::Down);
        assert_eq!(advance(&mut avatar, vp), Some(Direction::Left));
        assert_eq!(avatar.pos.y, 550.0);

        let mut avatar = avatar_at(2.0, 550.0, Direction::Left);
        assert_eq!(advance(&mut avatar, vp), Some(Direction::Up));
        assert_eq!(avatar.pos.x, 0.0);

        let mut avatar = avatar_at(0.0, 3.0, Direction::Up);
        assert_eq!(advance(&mut avatar, vp), Some(Direction::Right));
        assert_eq!(avatar.pos.y, 0.0);
    }

    #[test]
    fn test_full_lap_visits_all_directions() {
        let vp = Viewport::new(200.0, 120.0);
        let mut avatar = Avatar::default();
        let mut turns = Vec::new();
        for _ in 0..1000 {
            if let Some(dir) = advance(&mut avatar, vp) {
                turns.push(dir);
            }
            if turns.len() == 4 {
                break;
            }
        }
        assert_eq!(
            turns,
            [Direction::Down, Direction::Left, Direction::Up, Direction::Right]
        );
        assert_eq!(avatar.pos, Vec2::ZERO);
    }

    #[test]
    fn test_shrunk_viewport_pulls_avatar_back() {
        let mut avatar = avatar_at(700.0, 500.0, Direction::Right);
        advance(&mut avatar, Viewport::new(300.0, 200.0));
        assert_eq!(avatar.pos, Vec2::new(250.0, 150.0));
    }

    #[test]
    fn test_jump_floors_at_top() {
        let mut avatar = avatar_at(0.0, 30.0, Direction::Right);
        jump(&mut avatar);
        assert_eq!(avatar.pos.y, 0.0);
    }

    #[test]
    fn test_jumps_stack() {
        let mut avatar = avatar_at(40.0, 450.0, Direction::Down);
        jump(&mut avatar);
        jump(&mut avatar);
        assert_eq!(avatar.pos, Vec2::new(40.0, 250.0));
        assert_eq!(avatar.direction, Direction::Down);
    }
}
