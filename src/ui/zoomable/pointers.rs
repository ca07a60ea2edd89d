// SPDX-License-Identifier: MPL-2.0
//! Active pointer bookkeeping for pan and pinch gestures.
//!
//! Touch fingers and the left mouse button share one model so desktop and
//! touch input drive the same state machine.

use iced::Point;

/// Identity of one pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    Finger(u64),
}

/// Pointers currently down, in press order.
#[derive(Debug, Clone, Default)]
pub struct ActivePointers {
    points: Vec<(PointerId, Point)>,
}

impl ActivePointers {
    /// Records a press. A repeated press of a known pointer only moves it.
    pub fn press(&mut self, id: PointerId, position: Point) {
        if !self.move_to(id, position) {
            self.points.push((id, position));
        }
    }

    /// Updates a known pointer. Returns `false` for unknown pointers.
    pub fn move_to(&mut self, id: PointerId, position: Point) -> bool {
        match self.points.iter_mut().find(|(known, _)| *known == id) {
            Some((_, point)) => {
                *point = position;
                true
            }
            None => false,
        }
    }

    /// Forgets a pointer. Returns `false` for unknown pointers.
    pub fn lift(&mut self, id: PointerId) -> bool {
        let before = self.points.len();
        self.points.retain(|(known, _)| *known != id);
        self.points.len() != before
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distance between the two earliest pointers.
    #[must_use]
    pub fn pair_distance(&self) -> Option<f32> {
        match self.points.as_slice() {
            [(_, a), (_, b), ..] => Some(a.distance(*b)),
            _ => None,
        }
    }
}
