mod common;
mod scheduler;

pub use common::{triangle_wave, Animation, AnimationContext, Sweep};
pub use scheduler::{FrameHandle, FrameQueue, FrameScheduler};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, the time base of the animation
pub fn epoch_millis() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|elapsed| elapsed.as_millis() as u64).unwrap_or_default()
}

/// Outcome of delivering a frame to the element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollableState {
    /// The frame was stale or cancelled, nothing changed
    Unmodified,
    /// Pixels were updated and the next frame is scheduled
    Modified,
    /// The loop has stopped, no further frame is scheduled
    Done,
}

/// Shared flag that stops the animation loop before its next reschedule
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// What to do with a delivered frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FrameDecision {
    Run,
    /// Stale or cancelled frame
    Ignore,
    /// The stop signal was raised since the frame was requested
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Running { handle: FrameHandle },
}

/// Drives the self-rescheduling redraw loop of the element.
///
/// At most one frame is requested at any time.
#[derive(Debug)]
pub(crate) struct Animator {
    state: AnimationState,
    stop: StopSignal,
    effect: Box<dyn Animation>,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(Box::new(Sweep))
    }
}

impl Animator {
    pub(crate) fn new(effect: Box<dyn Animation>) -> Self {
        Self { state: AnimationState::Idle, stop: StopSignal::default(), effect }
    }

    pub(crate) fn state(&self) -> AnimationState {
        self.state
    }

    pub(crate) fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Bring the loop in line with the `enabled` flag
    pub(crate) fn sync<S: FrameScheduler>(&mut self, enabled: bool, scheduler: &mut S) {
        match (enabled, self.state) {
            (true, AnimationState::Idle) => {
                // Each run owns its own signal.
                self.stop = StopSignal::default();
                let handle = scheduler.request_frame();
                log::debug!("animation started, frame {}", handle.id());
                self.state = AnimationState::Running { handle };
            }
            (false, AnimationState::Running { handle }) => {
                self.stop.stop();
                scheduler.cancel_frame(handle);
                log::debug!("animation stopped, frame {} cancelled", handle.id());
                self.state = AnimationState::Idle;
            }
            _ => {}
        }
    }

    /// Only the pending frame runs, and only while the loop isn't stopped
    pub(crate) fn accept(&mut self, handle: FrameHandle) -> FrameDecision {
        match self.state {
            AnimationState::Running { handle: pending } if pending == handle => {
                if self.stop.is_stopped() {
                    log::debug!("animation stop requested, frame {} dropped", handle.id());
                    self.state = AnimationState::Idle;
                    FrameDecision::Stopped
                } else {
                    FrameDecision::Run
                }
            }
            _ => FrameDecision::Ignore,
        }
    }

    pub(crate) fn color(&self, ctx: &AnimationContext) -> crate::color::Rgb {
        self.effect.pixel_color(ctx)
    }

    /// Request the next frame unless the loop was stopped during this one
    pub(crate) fn reschedule<S: FrameScheduler>(&mut self, scheduler: &mut S) -> PollableState {
        if self.stop.is_stopped() {
            log::debug!("animation stop requested, not rescheduling");
            self.state = AnimationState::Idle;
            return PollableState::Done;
        }
        let handle = scheduler.request_frame();
        self.state = AnimationState::Running { handle };
        PollableState::Modified
    }
}
