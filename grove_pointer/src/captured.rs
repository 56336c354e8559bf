// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-capture motion record.

use grove_events::{PointerId, Timestamp};
use kurbo::{Point, Vec2};

/// State of one pointer while an element holds its capture.
///
/// ```
/// use grove_pointer::CapturedPointer;
/// use kurbo::{Point, Vec2};
///
/// // Captured at (15, 20) on an element whose screen origin is (10, 10).
/// let (at, origin) = (Point::new(15.0, 20.0), Point::new(10.0, 10.0));
/// let mut cp = CapturedPointer::new(7, 42_u32, at, origin, 1000);
/// assert_eq!(cp.offset(), Vec2::new(5.0, 10.0));
///
/// cp.update(Point::new(35.0, 20.0), 1010);
/// assert_eq!(cp.velocity(), Vec2::new(2.0, 0.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedPointer<K> {
    pointer_id: PointerId,
    element: K,
    start: Point,
    position: Point,
    offset: Vec2,
    velocity: Vec2,
    last_update: Timestamp,
    captured_at: Timestamp,
}

impl<K: Copy> CapturedPointer<K> {
    /// Start a capture at screen point `start` on an element whose screen
    /// origin is `element_origin`.
    pub fn new(
        pointer_id: PointerId,
        element: K,
        start: Point,
        element_origin: Point,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            pointer_id,
            element,
            start,
            position: start,
            offset: start - element_origin,
            velocity: Vec2::ZERO,
            last_update: timestamp,
            captured_at: timestamp,
        }
    }

    /// Track a new screen position.
    ///
    /// Velocity is the finite difference since the last update in units per
    /// millisecond. Samples with no elapsed time move the position but keep
    /// the previous velocity.
    pub fn update(&mut self, position: Point, timestamp: Timestamp) {
        let dt = timestamp.saturating_sub(self.last_update);
        if dt > 0 {
            self.velocity = (position - self.position) / dt as f64;
        }
        self.position = position;
        self.last_update = timestamp;
    }

    /// Pointer identifier.
    pub fn pointer_id(&self) -> PointerId {
        self.pointer_id
    }

    /// Element holding the capture.
    pub fn element(&self) -> K {
        self.element
    }

    /// Screen position where the capture started.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Latest screen position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Start position relative to the element's screen origin at capture time.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Latest velocity, units per millisecond.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Timestamp of the latest update.
    pub fn last_update(&self) -> Timestamp {
        self.last_update
    }

    /// Timestamp of the capture.
    pub fn captured_at(&self) -> Timestamp {
        self.captured_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_keeps_velocity() {
        let mut cp = CapturedPointer::new(1, 0_u32, Point::ZERO, Point::ZERO, 100);
        cp.update(Point::new(10.0, 0.0), 110);
        assert_eq!(cp.velocity(), Vec2::new(1.0, 0.0));
        cp.update(Point::new(50.0, 0.0), 110);
        assert_eq!(cp.velocity(), Vec2::new(1.0, 0.0));
        assert_eq!(cp.position(), Point::new(50.0, 0.0));
        assert_eq!(cp.start(), Point::ZERO);
        assert_eq!(cp.captured_at(), 100);
        assert_eq!(cp.last_update(), 110);
    }

    #[test]
    fn clock_going_backwards_is_treated_as_no_time() {
        let mut cp = CapturedPointer::new(1, 0_u32, Point::ZERO, Point::ZERO, 100);
        cp.update(Point::new(10.0, 0.0), 90);
        assert_eq!(cp.velocity(), Vec2::ZERO);
        assert_eq!(cp.last_update(), 90);
    }
}
