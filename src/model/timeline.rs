//! Movement path generation (§4.D, §6 `MS_PER_PIXEL`). Walking is Manhattan,
//! not diagonal: an NPC always walks the vertical leg first, then the
//! horizontal leg.

use serde::{Deserialize, Serialize};

use crate::time::MS_PER_PIXEL;

use super::object::Position;

/// One waypoint of a walk: the position reached and the wall-clock time of
/// arrival there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub position: Position,
    pub arrival_time: i64,
}

/// How long, in milliseconds, a Manhattan walk between two positions takes.
pub fn walk_duration_ms(from: Position, to: Position) -> i64 {
    from.manhattan_distance(&to) * MS_PER_PIXEL
}

/// Builds the waypoint list for a Manhattan walk from `from` to `to`
/// starting at `start_time`. Per §4.D, the vertical leg is always walked
/// first, then the horizontal leg; a corner waypoint is only emitted when
/// both axes actually move.
pub fn build_manhattan_path(from: Position, to: Position, start_time: i64) -> Vec<PathPoint> {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();

    if dx == 0 && dy == 0 {
        return Vec::new();
    }

    let mut points = Vec::new();
    let corner = Position::new(from.x, to.y);

    if dx > 0 && dy > 0 {
        points.push(PathPoint {
            position: corner,
            arrival_time: start_time + dy * MS_PER_PIXEL,
        });
    }
    points.push(PathPoint {
        position: to,
        arrival_time: start_time + (dx + dy) * MS_PER_PIXEL,
    });
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_straight_line_walk_has_one_waypoint() {
        let path = build_manhattan_path(Position::new(0, 0), Position::new(100, 0), 0);
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].position, Position::new(100, 0));
        assert_eq!(path[0].arrival_time, 100 * MS_PER_PIXEL);
    }

    #[test]
    fn an_l_shaped_walk_takes_the_vertical_leg_before_the_horizontal_leg() {
        let path = build_manhattan_path(Position::new(0, 0), Position::new(100, 50), 1000);
        assert_eq!(path.len(), 2);
        assert_eq!(path[0].position, Position::new(0, 50), "vertical leg first, per the spec's walk order");
        assert_eq!(path[0].arrival_time, 1000 + 50 * MS_PER_PIXEL);
        assert_eq!(path[1].position, Position::new(100, 50));
        assert_eq!(path[1].arrival_time, 1000 + 150 * MS_PER_PIXEL);
    }

    #[test]
    fn no_movement_produces_an_empty_path() {
        assert!(build_manhattan_path(Position::new(5, 5), Position::new(5, 5), 0).is_empty());
    }
}
