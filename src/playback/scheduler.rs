//! Single-shot, self-restarting playback timer.
//!
//! Time is supplied by the caller as a monotonic [`Duration`] since an arbitrary origin, so
//! the scheduler never sleeps or spawns.

use std::time::Duration;

/// Playback configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlaybackOpts {
    /// Delay between frames in milliseconds.
    pub interval_ms: u64,
}

impl Default for PlaybackOpts {
    fn default() -> Self {
        // 5 fps.
        Self { interval_ms: 200 }
    }
}

impl PlaybackOpts {
    /// Delay between frames.
    pub fn interval(self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

/// Handle of the single pending timer. Only the most recently scheduled handle can fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    id: u64,
    due: Duration,
}

impl TimerHandle {
    /// Time at which the timer fires.
    pub fn due(self) -> Duration {
        self.due
    }
}

/// Cycles an index over `0..frame_count` with a single-shot timer that re-arms itself.
///
/// Every state transition that invalidates the cycle (toggle off, frame count change,
/// teardown) drops the pending handle, so a stale timer can never advance the index.
#[derive(Debug)]
pub struct PlaybackScheduler {
    interval: Duration,
    frame_count: usize,
    current: usize,
    playing: bool,
    pending: Option<TimerHandle>,
    next_timer_id: u64,
}

impl PlaybackScheduler {
    /// A stopped scheduler over `frame_count` frames.
    pub fn new(frame_count: usize, opts: PlaybackOpts) -> Self {
        Self {
            interval: opts.interval(),
            frame_count,
            current: 0,
            playing: false,
            pending: None,
            next_timer_id: 0,
        }
    }

    /// Whether playback is enabled.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Index of the frame currently displayed.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of frames being cycled.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// The pending timer, if any.
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Delay between frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start from frame 0 and arm the first timer.
    pub fn start(&mut self, now: Duration) {
        self.cancel();
        self.playing = true;
        self.current = 0;
        self.schedule(now);
    }

    /// Stop immediately and rewind to frame 0.
    pub fn stop(&mut self) {
        self.cancel();
        self.playing = false;
        self.current = 0;
    }

    /// Flip playback on or off. Returns the new state.
    pub fn toggle(&mut self, now: Duration) -> bool {
        if self.playing {
            self.stop();
        } else {
            self.start(now);
        }
        self.playing
    }

    /// Fire the pending timer if it is due. Returns the new index when the frame advanced.
    pub fn tick(&mut self, now: Duration) -> Option<usize> {
        let handle = self.pending?;
        if now < handle.due {
            return None;
        }
        self.on_timer(handle, now)
    }

    /// Deliver a timer callback. Handles that are no longer pending are ignored.
    pub fn on_timer(&mut self, handle: TimerHandle, now: Duration) -> Option<usize> {
        if self.pending != Some(handle) {
            tracing::debug!(timer = handle.id, "ignoring stale playback timer");
            return None;
        }
        self.pending = None;
        if !self.playing || self.frame_count == 0 {
            return None;
        }
        self.current = (self.current + 1) % self.frame_count;
        self.schedule(now);
        Some(self.current)
    }

    /// Replace the cycled frame count. Any pending timer is cancelled and playback stops.
    pub fn set_frame_count(&mut self, frame_count: usize) {
        self.stop();
        self.frame_count = frame_count;
    }

    /// Cancel everything; used when the owner goes away.
    pub fn teardown(&mut self) {
        self.stop();
    }

    fn schedule(&mut self, now: Duration) {
        if !self.playing || self.frame_count <= 1 {
            return;
        }
        self.next_timer_id = self.next_timer_id.wrapping_add(1);
        self.pending = Some(TimerHandle {
            id: self.next_timer_id,
            due: now + self.interval,
        });
    }

    fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
