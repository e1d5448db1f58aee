//! Drag-to-scroll for the image track.
//!
//! Offsets are percentages of half the viewport width, negated so that
//! dragging left moves the content left. The committed offset always stays
//! within `[-100, 0]`.

pub const MIN_OFFSET: f64 = -100.0;
pub const MAX_OFFSET: f64 = 0.0;

/// Outcome of a single pointer move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragMove {
    /// No press is being tracked.
    Ignored,
    /// Movement within the jitter threshold.
    Jitter,
    /// Hit a bound; committed offset pinned and the origin re-anchored.
    Clamped { offset: f64 },
    /// Translate the track to `percent`.
    Moved { percent: f64 },
}

#[derive(Clone, Debug, Default)]
pub struct DragController {
    /// Client X where the current press (or last re-anchor) happened.
    origin_x: f64,
    /// Uncommitted delta of the drag in progress.
    pending: f64,
    /// Committed track offset.
    offset: f64,
    is_dragging: bool,
    /// Between pointer-down and pointer-up.
    tracking: bool,
    /// Bumped on every release so a stale settle doesn't clear a newer drag.
    settle_generation: u64,
}

impl DragController {
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn pending(&self) -> f64 {
        self.pending
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn pointer_down(&mut self, x: f64) {
        self.origin_x = x;
        self.pending = 0.0;
        self.is_dragging = false;
        self.tracking = true;
    }

    pub fn pointer_move(&mut self, x: f64, viewport_width: f64, threshold_px: f64) -> DragMove {
        if !self.tracking || viewport_width <= 0.0 {
            return DragMove::Ignored;
        }

        let delta = self.origin_x - x;
        if delta.abs() <= threshold_px {
            return DragMove::Jitter;
        }
        self.is_dragging = true;

        let max_delta = viewport_width / 2.0;
        self.pending = (delta / max_delta) * -100.0;

        let next = self.pending + self.offset;
        if next <= MIN_OFFSET {
            self.pin(MIN_OFFSET, x);
            DragMove::Clamped { offset: MIN_OFFSET }
        } else if next >= MAX_OFFSET {
            self.pin(MAX_OFFSET, x);
            DragMove::Clamped { offset: MAX_OFFSET }
        } else {
            DragMove::Moved { percent: next }
        }
    }

    fn pin(&mut self, bound: f64, x: f64) {
        self.offset = bound;
        self.pending = 0.0;
        self.origin_x = x;
    }

    /// Commit the drag. Returns the settle generation when `is_dragging`
    /// needs clearing later.
    pub fn pointer_up(&mut self) -> Option<u64> {
        if !self.tracking {
            return None;
        }
        self.tracking = false;
        self.offset = (self.offset + self.pending).clamp(MIN_OFFSET, MAX_OFFSET);
        self.pending = 0.0;
        self.settle_generation += 1;
        self.is_dragging.then_some(self.settle_generation)
    }

    /// Drop the press without committing its uncommitted delta.
    pub fn cancel(&mut self) {
        self.tracking = false;
        self.pending = 0.0;
    }

    /// Clear `is_dragging` once the release animation has had time to finish.
    pub fn settle(&mut self, generation: u64) -> bool {
        if generation != self.settle_generation || self.tracking {
            return false;
        }
        self.is_dragging = false;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VW: f64 = 1000.0;

    #[test]
    fn test_jitter_does_not_start_drag() {
        let mut drag = DragController::default();
        drag.pointer_down(500.0);
        assert_eq!(drag.pointer_move(497.0, VW, 5.0), DragMove::Jitter);
        assert!(!drag.is_dragging());
        assert_eq!(drag.pointer_up(), None);
        assert_eq!(drag.offset(), 0.0);
    }

    #[test]
    fn test_left_drag_moves_content_left() {
        let mut drag = DragController::default();
        drag.pointer_down(500.0);
        // 50px of 500px half-width = 10%
        match drag.pointer_move(450.0, VW, 5.0) {
            DragMove::Moved { percent } => assert!((percent + 10.0).abs() < 1e-9),
            other => panic!("unexpected {:?}", other),
        }
        assert!(drag.is_dragging());
        assert!(drag.pointer_up().is_some());
        assert!((drag.offset() + 10.0).abs() < 1e-9);
        assert_eq!(drag.pending(), 0.0);
    }

    #[test]
    fn test_cancel_ends_press_without_commit() {
        let mut drag = DragController::default();
        drag.pointer_down(500.0);
        assert!(drag.is_tracking());
        drag.cancel();
        assert!(!drag.is_tracking());
        assert_eq!(drag.pointer_move(100.0, VW, 5.0), DragMove::Ignored);
        assert_eq!(drag.pointer_up(), None);
        assert_eq!(drag.offset(), 0.0);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut drag = DragController::default();
        assert_eq!(drag.pointer_move(100.0, VW, 5.0), DragMove::Ignored);
    }

    #[test]
    fn test_clamps_at_upper_bound() {
        let mut drag = DragController::default();
        drag.pointer_down(500.0);
        // Dragging right from 0 immediately pins at 0
        assert_eq!(drag.pointer_move(600.0, VW, 5.0), DragMove::Clamped { offset: 0.0 });
        drag.pointer_up();
        assert_eq!(drag.offset(), 0.0);
    }

    #[test]
    fn test_clamp_reanchors_origin() {
        let mut drag = DragController::default();
        drag.pointer_down(900.0);
        assert_eq!(drag.pointer_move(0.0, VW, 5.0), DragMove::Clamped { offset: -100.0 });
        // Further left: still pinned
        assert_eq!(drag.pointer_move(-50.0, VW, 5.0), DragMove::Clamped { offset: -100.0 });
        // Back right by 100px from the new anchor resumes smoothly: -100 + 20
        match drag.pointer_move(50.0, VW, 5.0) {
            DragMove::Moved { percent } => assert!((percent + 80.0).abs() < 1e-9),
            other => panic!("unexpected {:?}", other),
        }
        drag.pointer_up();
        assert!((drag.offset() + 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_stays_in_range_over_many_drags() {
        let mut drag = DragController::default();
        let moves = [
            (500.0, -400.0),
            (100.0, 900.0),
            (800.0, 120.0),
            (0.0, 1000.0),
            (600.0, -2000.0),
            (300.0, 330.0),
            (700.0, 2.0),
        ];
        for (from, to) in moves {
            drag.pointer_down(from);
            let steps = 8;
            for i in 1..=steps {
                let x = from + (to - from) * i as f64 / steps as f64;
                drag.pointer_move(x, VW, 5.0);
            }
            drag.pointer_up();
            assert!(drag.offset() >= MIN_OFFSET && drag.offset() <= MAX_OFFSET, "offset {}", drag.offset());
        }
    }

    #[test]
    fn test_settle_clears_dragging_once() {
        let mut drag = DragController::default();
        drag.pointer_down(500.0);
        drag.pointer_move(400.0, VW, 5.0);
        let generation = drag.pointer_up().unwrap();
        assert!(drag.is_dragging());
        assert!(drag.settle(generation));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_stale_settle_is_ignored() {
        let mut drag = DragController::default();
        drag.pointer_down(500.0);
        drag.pointer_move(400.0, VW, 5.0);
        let first = drag.pointer_up().unwrap();

        drag.pointer_down(400.0);
        drag.pointer_move(300.0, VW, 5.0);
        let second = drag.pointer_up().unwrap();

        assert!(!drag.settle(first));
        assert!(drag.is_dragging());
        assert!(drag.settle(second));
    }
}
