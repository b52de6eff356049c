use std::collections::VecDeque;

use crate::math::vec2::Vec2;

/// The most recent lower-bob positions, oldest first. Purely presentational:
/// the physics never reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Trail {
    pub const DEFAULT_CAPACITY: usize = 150;
    pub const MAX_CAPACITY: usize = 10_000;

    /// Capacities above [`Trail::MAX_CAPACITY`] are clamped to it.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(Self::MAX_CAPACITY);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a point, evicting the oldest once full.
    pub fn push(&mut self, point: Vec2) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec2> + '_ {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
