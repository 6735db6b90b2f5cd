//! Full-screen loading ring.
//!
//! [`LoadingScreen`] pairs the frame-driven [`Animator`] with the progress
//! timer. Both are advanced by [`LoadingScreen::update`] from the host's
//! event loop, so the schedule is explicit and can be driven by a simulated
//! clock in tests.

pub mod animator;
pub mod progress;

use std::time::Duration;

use rand::rngs::StdRng;

use crate::config::LoaderConfig;

pub use animator::{Animator, DotRender, Position, RenderState, RingParams, Segment, Surface};
pub use progress::Progress;

/// Invoked once when loading has completed and settled.
pub type CompletionCallback = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Progress timer ticking
    Running,
    /// Progress hit 100, waiting out the settle delay
    Settling { remaining: Duration },
    /// Callback fired; the ring keeps animating until the host tears it down
    Finished,
    /// Torn down; no frame or timer work happens any more
    Cancelled,
}

pub struct LoadingScreen {
    animator: Animator,
    progress: Progress,
    rng: StdRng,
    tick_interval: Duration,
    settle_delay: Duration,
    since_tick: Duration,
    phase: Phase,
    on_complete: Option<CompletionCallback>,
}

impl LoadingScreen {
    pub fn new(config: &LoaderConfig, rng: StdRng, on_complete: impl FnOnce() + 'static) -> Self {
        Self {
            animator: Animator::new(RingParams::from_config(config)),
            progress: Progress::new(config.max_increment),
            rng,
            tick_interval: Duration::from_millis(config.tick_interval_ms),
            settle_delay: Duration::from_millis(config.settle_delay_ms),
            since_tick: Duration::ZERO,
            phase: Phase::Running,
            on_complete: Some(Box::new(on_complete)),
        }
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn render_state(&self) -> RenderState {
        self.animator.render_state()
    }

    /// Advances the frame loop and the progress timer by `delta`.
    ///
    /// Returns `None` once the screen has been cancelled.
    pub fn update(&mut self, delta: Duration) -> Option<RenderState> {
        if self.phase == Phase::Cancelled {
            return None;
        }
        let state = self.animator.advance(delta);
        self.run_timer(delta);
        Some(state)
    }

    /// Stops both the frame loop and the progress timer. A pending
    /// completion callback is dropped without being called.
    pub fn cancel(&mut self) {
        if self.phase != Phase::Cancelled {
            tracing::debug!(progress = self.progress.value(), "loading screen cancelled");
        }
        self.phase = Phase::Cancelled;
        self.on_complete = None;
    }

    fn run_timer(&mut self, delta: Duration) {
        match self.phase {
            Phase::Running => {
                self.since_tick += delta;
                while self.since_tick >= self.tick_interval {
                    self.since_tick -= self.tick_interval;
                    if self.progress.tick(&mut self.rng) {
                        tracing::debug!("progress reached 100, settling");
                        // Time already spent past the final tick counts toward the delay.
                        let overshoot = std::mem::take(&mut self.since_tick);
                        self.phase = Phase::Settling {
                            remaining: self.settle_delay,
                        };
                        self.settle(overshoot);
                        break;
                    }
                }
            }
            Phase::Settling { .. } => self.settle(delta),
            Phase::Finished | Phase::Cancelled => {}
        }
    }

    fn settle(&mut self, delta: Duration) {
        let Phase::Settling { remaining } = self.phase else {
            return;
        };
        let remaining = remaining.saturating_sub(delta);
        if remaining.is_zero() {
            self.phase = Phase::Finished;
            tracing::info!("loading complete");
            if let Some(callback) = self.on_complete.take() {
                callback();
            }
        } else {
            self.phase = Phase::Settling { remaining };
        }
    }
}
