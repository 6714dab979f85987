//! Snake body, buffered direction and per-tick movement.

use super::types::{Collision, Direction, Position};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments. Head is at the front (index 0); never empty.
    body: VecDeque<Position>,
    /// Direction committed on the last advance.
    direction: Direction,
    /// Buffered next direction (prevents 180-degree reversal within a single step).
    next_direction: Direction,
}

impl Snake {
    /// A straight snake of `length` segments with its head at `head`,
    /// trailing away from `direction`.
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let back = direction.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut segment = head;
        body.push_back(segment);
        for _ in 1..length {
            segment = segment.step(back);
            body.push_back(segment);
        }

        Self {
            body,
            direction,
            next_direction: direction,
        }
    }

    /// Build a snake from explicit segments, head first. Returns `None` for
    /// an empty body.
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        Some(Self {
            body: segments.into(),
            direction,
            next_direction: direction,
        })
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake has at least its head.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Buffer a turn for the next advance. Ignored (returns false) when it
    /// would reverse the committed direction.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if requested == self.direction.opposite() {
            return false;
        }
        self.next_direction = requested;
        true
    }

    /// Commit the buffered direction and move one cell. The tail is kept
    /// when the new head lands on `food`, so the snake grows by one.
    /// Returns whether food was eaten.
    pub fn advance(&mut self, food: Position) -> bool {
        self.direction = self.next_direction;
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);

        if new_head == food {
            return true;
        }
        self.body.pop_back();
        false
    }

    /// Collision of the current head against the walls or the rest of
    /// the body. Checked once per tick, right after `advance`.
    pub fn check_collision(&self, grid_size: i16) -> Option<Collision> {
        let head = self.head();
        if !head.in_bounds(grid_size) {
            return Some(Collision::Wall);
        }
        if self.body.iter().skip(1).any(|&seg| seg == head) {
            return Some(Collision::SelfCollision);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(cells: &[(i16, i16)], direction: Direction) -> Snake {
        Snake::from_segments(
            cells.iter().map(|&(x, y)| Position::new(x, y)).collect(),
            direction,
        )
        .unwrap()
    }

    const FAR_AWAY: Position = Position::new(-100, -100);

    #[test]
    fn test_new_extends_behind_head() {
        let s = Snake::new(Position::new(10, 10), Direction::Right, 3);
        let body: Vec<_> = s.body().iter().copied().collect();
        assert_eq!(
            body,
            vec![
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ]
        );
        assert_eq!(s.direction(), Direction::Right);
        assert_eq!(s.next_direction(), Direction::Right);
    }

    #[test]
    fn test_from_segments_rejects_empty() {
        assert!(Snake::from_segments(Vec::new(), Direction::Up).is_none());
    }

    #[test]
    fn test_set_direction_buffers_until_advance() {
        let mut s = snake(&[(5, 5), (4, 5)], Direction::Right);
        assert!(s.set_direction(Direction::Up));
        assert_eq!(s.direction(), Direction::Right);
        assert_eq!(s.next_direction(), Direction::Up);

        s.advance(FAR_AWAY);
        assert_eq!(s.direction(), Direction::Up);
        assert_eq!(s.head(), Position::new(5, 4));
    }

    #[test]
    fn test_set_direction_rejects_reversal() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let mut s = snake(&[(5, 5)], dir);
            assert!(!s.set_direction(dir.opposite()));
            assert_eq!(s.next_direction(), dir);
        }
    }

    #[test]
    fn test_two_turns_in_one_tick_cannot_reverse() {
        // Up then Left while moving Right: Left is checked against the
        // committed Right, not the pending Up.
        let mut s = snake(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
        assert!(s.set_direction(Direction::Up));
        assert!(!s.set_direction(Direction::Left));
        assert_eq!(s.next_direction(), Direction::Up);

        s.advance(FAR_AWAY);
        assert_ne!(s.direction(), Direction::Left);
        assert!(s.check_collision(20).is_none());
    }

    #[test]
    fn test_advance_without_food_keeps_length() {
        let mut s = snake(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        assert!(!s.advance(FAR_AWAY));
        let body: Vec<_> = s.body().iter().copied().collect();
        assert_eq!(
            body,
            vec![
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10)
            ]
        );
    }

    #[test]
    fn test_advance_onto_food_grows() {
        let mut s = snake(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        assert!(s.advance(Position::new(11, 10)));
        let body: Vec<_> = s.body().iter().copied().collect();
        assert_eq!(
            body,
            vec![
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ]
        );
    }

    #[test]
    fn test_wall_collision_left_edge() {
        let mut s = snake(&[(0, 5), (1, 5), (2, 5)], Direction::Left);
        s.advance(FAR_AWAY);
        assert_eq!(s.check_collision(20), Some(Collision::Wall));
    }

    #[test]
    fn test_wall_collision_all_edges() {
        let cases = [
            ((19, 3), Direction::Right),
            ((3, 0), Direction::Up),
            ((3, 19), Direction::Down),
            ((0, 3), Direction::Left),
        ];
        for ((x, y), dir) in cases {
            let mut s = snake(&[(x, y)], dir);
            s.advance(FAR_AWAY);
            assert_eq!(s.check_collision(20), Some(Collision::Wall), "{dir:?}");
        }
    }

    #[test]
    fn test_self_collision_on_overlapping_path() {
        // Body coils around (5,6); turning right puts the head on (6,6),
        // which stays occupied after the tail at (6,5) moves on.
        let mut s = snake(
            &[
                (5, 6),
                (5, 5),
                (4, 5),
                (4, 6),
                (4, 7),
                (5, 7),
                (6, 7),
                (6, 6),
                (6, 5),
            ],
            Direction::Down,
        );
        assert!(s.set_direction(Direction::Right));
        s.advance(FAR_AWAY);
        assert_eq!(s.head(), Position::new(6, 6));
        assert_eq!(s.check_collision(20), Some(Collision::SelfCollision));
    }

    #[test]
    fn test_tail_chasing_allowed() {
        // Head moves into the cell the tail vacates on the same step.
        let mut s = snake(&[(5, 5), (6, 5), (6, 6), (5, 6)], Direction::Down);
        s.advance(FAR_AWAY);
        assert_eq!(s.head(), Position::new(5, 6));
        assert!(s.check_collision(20).is_none());
    }

    #[test]
    fn test_no_collision_in_open_field() {
        let mut s = Snake::new(Position::new(10, 10), Direction::Right, 3);
        s.advance(FAR_AWAY);
        assert!(s.check_collision(20).is_none());
    }
}
