//! Collision queries between the avatar and the field

use super::obstacle::{BarSide, Obstacle};
use super::rect::Rect;

/// A detected avatar/obstacle contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleHit {
    /// Id of the obstacle that was touched
    pub obstacle_id: u32,
    /// Which bar was touched
    pub bar: BarSide,
}

/// Check one obstacle's bars against the avatar box
pub fn avatar_obstacle_collision(avatar: &Rect, obstacle: &Obstacle) -> Option<ObstacleHit> {
    [BarSide::Upper, BarSide::Lower]
        .into_iter()
        .find(|&side| obstacle.bar(side).intersects(avatar))
        .map(|bar| ObstacleHit {
            obstacle_id: obstacle.id,
            bar,
        })
}

/// First obstacle (in field order) touching the avatar
pub fn first_obstacle_hit<'a, I>(avatar: &Rect, obstacles: I) -> Option<ObstacleHit>
where
    I: IntoIterator<Item = &'a Obstacle>,
{
    obstacles
        .into_iter()
        .find_map(|o| avatar_obstacle_collision(avatar, o))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec2;

    fn obstacle_at(x: f32, gap_center: f32) -> Obstacle {
        Obstacle {
            id: 9,
            x,
            gap_center,
            passed: false,
        }
    }

    fn avatar_at(center_y: f32) -> Rect {
        Rect::from_center(Vec2::new(AVATAR_CENTER_X, center_y), Vec2::new(AVATAR_WIDTH, AVATAR_HEIGHT))
    }

    #[test]
    fn test_inside_gap_is_clear() {
        let o = obstacle_at(130.0, 300.0);
        assert_eq!(avatar_obstacle_collision(&avatar_at(300.0), &o), None);
    }

    #[test]
    fn test_upper_bar_hit() {
        let o = obstacle_at(130.0, 300.0);
        let hit = avatar_obstacle_collision(&avatar_at(220.0), &o);
        assert_eq!(hit.map(|h| h.bar), Some(BarSide::Upper));
    }

    #[test]
    fn test_lower_bar_hit() {
        let o = obstacle_at(130.0, 300.0);
        let hit = avatar_obstacle_collision(&avatar_at(380.0), &o);
        assert_eq!(hit.map(|h| h.bar), Some(BarSide::Lower));
    }

    #[test]
    fn test_horizontally_clear_misses() {
        // Bars span [330, 400], avatar spans [83, 117]
        let o = obstacle_at(400.0, 300.0);
        assert_eq!(avatar_obstacle_collision(&avatar_at(50.0), &o), None);
    }

    #[test]
    fn test_first_hit_in_field_order() {
        let far = Obstacle { id: 1, ..obstacle_at(400.0, 300.0) };
        let near = Obstacle { id: 2, ..obstacle_at(130.0, 300.0) };
        let hit = first_obstacle_hit(&avatar_at(500.0), [&far, &near]);
        assert_eq!(hit.map(|h| h.obstacle_id), Some(2));
    }
}
