//! Output sinks for estimator state
//!
//! The ingestion loop pushes every state update into an [`OutputSink`]
//! chosen by the caller; persistence, visualization, or forwarding is the
//! sink's business. Sinks run on the session thread, so a slow sink stalls
//! ingestion — there is no buffering beyond the framer's partial-record
//! buffer.

use crate::types::{MotionState, OrientationState};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Receiver for per-sample state updates
pub trait OutputSink {
    /// Called with the orientation estimate after each routed sample
    fn on_orientation(&mut self, state: &OrientationState);

    /// Called with the motion estimate after each routed sample
    fn on_motion(&mut self, state: &MotionState);
}

/// Bounded ring buffer of recent state snapshots.
///
/// Owned by one session and torn down with it; replaces any notion of
/// process-wide history. When full, the oldest snapshot is dropped.
pub struct RecentBuffer {
    capacity: usize,
    orientation: VecDeque<OrientationState>,
    motion: VecDeque<MotionState>,
}

impl RecentBuffer {
    /// Create a buffer holding at most `capacity` snapshots per state kind
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            orientation: VecDeque::with_capacity(capacity),
            motion: VecDeque::with_capacity(capacity),
        }
    }

    /// Most recent orientation snapshot, if any sample has been routed
    pub fn latest_orientation(&self) -> Option<&OrientationState> {
        self.orientation.back()
    }

    /// Most recent motion snapshot, if any sample has been routed
    pub fn latest_motion(&self) -> Option<&MotionState> {
        self.motion.back()
    }

    /// Number of orientation snapshots held
    pub fn orientation_len(&self) -> usize {
        self.orientation.len()
    }

    /// Number of motion snapshots held
    pub fn motion_len(&self) -> usize {
        self.motion.len()
    }

    /// Iterate over held orientation snapshots, oldest first
    pub fn orientation_history(&self) -> impl Iterator<Item = &OrientationState> {
        self.orientation.iter()
    }

    /// Iterate over held motion snapshots, oldest first
    pub fn motion_history(&self) -> impl Iterator<Item = &MotionState> {
        self.motion.iter()
    }
}

impl OutputSink for RecentBuffer {
    fn on_orientation(&mut self, state: &OrientationState) {
        if self.orientation.len() == self.capacity {
            self.orientation.pop_front();
        }
        self.orientation.push_back(*state);
    }

    fn on_motion(&mut self, state: &MotionState) {
        if self.motion.len() == self.capacity {
            self.motion.pop_front();
        }
        self.motion.push_back(*state);
    }
}

/// Sink for the daemon path: keeps a [`RecentBuffer`] and logs the latest
/// estimate at most once per second.
pub struct LoggingSink {
    history: RecentBuffer,
    last_log: Option<Instant>,
}

/// Minimum interval between state log lines
const LOG_INTERVAL: Duration = Duration::from_secs(1);

impl LoggingSink {
    /// Create a logging sink with the given history depth
    pub fn new(history_depth: usize) -> Self {
        Self {
            history: RecentBuffer::new(history_depth),
            last_log: None,
        }
    }

    /// Access the retained history
    pub fn history(&self) -> &RecentBuffer {
        &self.history
    }

    fn should_log(&mut self) -> bool {
        let due = match self.last_log {
            Some(last) => last.elapsed() >= LOG_INTERVAL,
            None => true,
        };
        if due {
            self.last_log = Some(Instant::now());
        }
        due
    }
}

impl OutputSink for LoggingSink {
    fn on_orientation(&mut self, state: &OrientationState) {
        self.history.on_orientation(state);
        if self.should_log() {
            log::info!(
                "orientation: euler=({:.3}, {:.3}, {:.3}) quat=({:.3}, {:.3}, {:.3}, {:.3})",
                state.euler[0],
                state.euler[1],
                state.euler[2],
                state.quaternion[0],
                state.quaternion[1],
                state.quaternion[2],
                state.quaternion[3],
            );
        }
    }

    fn on_motion(&mut self, state: &MotionState) {
        self.history.on_motion(state);
    }
}
