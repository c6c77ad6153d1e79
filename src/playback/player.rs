use std::time::Duration;

use crate::frames::store::FrameData;
use crate::playback::scheduler::{PlaybackOpts, PlaybackScheduler, TimerHandle};
use crate::storage::model::Animation;

/// Hover-style preview of a sequence of frame payloads.
///
/// While stopped the thumbnail is shown; while playing the frames cycle at the scheduler's
/// interval, starting from frame 0.
#[derive(Debug)]
pub struct PreviewPlayer {
    frames: Vec<FrameData>,
    thumbnail: FrameData,
    displayed: FrameData,
    scheduler: PlaybackScheduler,
}

impl PreviewPlayer {
    /// Build a stopped player.
    pub fn new(frames: Vec<FrameData>, thumbnail: FrameData, opts: PlaybackOpts) -> Self {
        let scheduler = PlaybackScheduler::new(frames.len(), opts);
        Self {
            frames,
            displayed: thumbnail.clone(),
            thumbnail,
            scheduler,
        }
    }

    /// Build a stopped player over a stored animation's non-empty frames.
    pub fn from_animation(animation: &Animation, opts: PlaybackOpts) -> Self {
        Self::new(
            animation_payloads(animation),
            animation.thumbnail.clone(),
            opts,
        )
    }

    /// Payload currently shown.
    pub fn displayed(&self) -> &FrameData {
        &self.displayed
    }

    /// Whether the preview is cycling.
    pub fn is_playing(&self) -> bool {
        self.scheduler.is_playing()
    }

    /// Index of the displayed frame while playing.
    pub fn current_index(&self) -> usize {
        self.scheduler.current_index()
    }

    /// Number of frames cycled.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The pending timer, for hosts that arm a real timer per handle.
    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.scheduler.pending()
    }

    /// Toggle playback. Turning off cancels the timer and shows the thumbnail again.
    pub fn toggle(&mut self, now: Duration) -> bool {
        let playing = self.scheduler.toggle(now);
        self.sync_display();
        playing
    }

    /// Advance if the pending timer is due. Returns `true` when the displayed frame changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.scheduler.tick(now).is_some() && self.sync_display()
    }

    /// Deliver a timer callback; stale handles are ignored.
    pub fn on_timer(&mut self, handle: TimerHandle, now: Duration) -> bool {
        self.scheduler.on_timer(handle, now).is_some() && self.sync_display()
    }

    /// Swap in new frames, stopping playback.
    pub fn replace_frames(&mut self, frames: Vec<FrameData>, thumbnail: FrameData) {
        self.scheduler.set_frame_count(frames.len());
        self.frames = frames;
        self.thumbnail = thumbnail;
        self.sync_display();
    }

    /// Swap in a new version of the stored record, stopping playback.
    pub fn replace_animation(&mut self, animation: &Animation) {
        self.replace_frames(animation_payloads(animation), animation.thumbnail.clone());
    }

    /// Cancel the timer and stop.
    pub fn teardown(&mut self) {
        self.scheduler.teardown();
        self.sync_display();
    }

    fn sync_display(&mut self) -> bool {
        let next = if self.scheduler.is_playing() {
            self.frames
                .get(self.scheduler.current_index())
                .unwrap_or(&self.thumbnail)
        } else {
            &self.thumbnail
        };
        if *next == self.displayed {
            return false;
        }
        self.displayed = next.clone();
        true
    }
}

fn animation_payloads(animation: &Animation) -> Vec<FrameData> {
    animation
        .frames
        .iter()
        .filter_map(|f| f.data.clone())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/playback/player.rs"]
mod tests;
