//! Trajectory history.
//!
//! A fixed-capacity record of the most recent detection outcomes, used only
//! to render the fading trail. It never feeds back into detection.

use std::collections::VecDeque;

use crate::detect::Detection;

/// Number of trailing positions kept for the overlay.
pub const TRAIL_LEN: usize = 8;

/// Rolling buffer of the last [`TRAIL_LEN`] detections, newest at the front.
///
/// The buffer is seeded with `None`s so its length is exactly [`TRAIL_LEN`]
/// from construction onward: every push evicts the oldest entry.
#[derive(Clone, Debug)]
pub struct TrajectoryHistory {
    slots: VecDeque<Detection>,
}

impl TrajectoryHistory {
    pub fn new() -> Self {
        let mut slots = VecDeque::with_capacity(TRAIL_LEN);
        for _ in 0..TRAIL_LEN {
            slots.push_back(None);
        }
        Self { slots }
    }

    /// Record the outcome for the current frame, dropping the oldest slot.
    pub fn push(&mut self, detection: Detection) {
        self.slots.push_front(detection);
        self.slots.pop_back();
        debug_assert_eq!(self.slots.len(), TRAIL_LEN);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Entries newest-first, including empty slots.
    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.slots.iter()
    }

    /// Known positions only, newest-first.
    pub fn known_positions(&self) -> impl Iterator<Item = &crate::detect::BallPoint> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }
}

impl Default for TrajectoryHistory {
    fn default() -> Self {
        Self::new()
    }
}
