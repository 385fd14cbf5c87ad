use std::collections::VecDeque;

use crate::{Coords, GridInt};
use Direction::*;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    fn offset(self) -> (i16, i16) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// Snake body as an ordered list of cells, head first.
pub struct Snake {
    body: VecDeque<Coords>,
}

impl Snake {
    /// Builds a snake whose head sits at `head` and whose body extends
    /// `length` cells in the direction opposite to its heading.
    pub fn new(head: Coords, length: GridInt, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();

        let body = (0..length)
            .map(|i| (head.0 as i16 - dx * i as i16, head.1 as i16 - dy * i as i16))
            .map(|(x, y)| (x as GridInt, y as GridInt))
            .collect();

        Snake { body }
    }

    #[cfg(test)]
    pub fn from_segments(segments: Vec<Coords>) -> Self {
        Snake { body: segments.into_iter().collect() }
    }

    pub fn head(&self) -> Coords {
        // The body is never empty, a snake always has at least its head
        *self.body.front().unwrap()
    }

    pub fn occupies(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    /// Advances the body to `new_head` and returns the vacated tail cell,
    /// or None if the snake grew this step and kept its tail.
    pub fn step(&mut self, new_head: Coords, grow: bool) -> Option<Coords> {
        self.body.push_front(new_head);

        if grow {
            None
        } else {
            self.body.pop_back()
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = &Coords> {
        self.body.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.body.len()
    }
}
