//! Step-limited color fading.
//!
//! [`Transition`] moves the displayed color toward a target by at most a
//! fixed amount per channel per tick. Channels move independently, so a
//! channel with a small delta arrives before one with a large delta and the
//! hue drifts during the fade. Each channel still converges monotonically and
//! never overshoots.

use core::num::NonZeroU8;
use palette::Srgb;

/// Default per-channel change per tick.
pub const DEFAULT_FADE_STEP: NonZeroU8 = match NonZeroU8::new(8) {
    Some(step) => step,
    None => panic!("fade step must be non-zero"),
};

/// Whether a fade is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransitionState {
    /// Current color equals target. Ticks do nothing.
    Idle,
    /// A target was set and has not been confirmed reached.
    Transitioning,
}

/// Fade state machine: current color, target color and progress flag.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    current: Srgb<u8>,
    target: Srgb<u8>,
    state: TransitionState,
    step: NonZeroU8,
}

impl Transition {
    /// Creates an idle transition resting at `initial`.
    pub fn new(initial: Srgb<u8>, step: NonZeroU8) -> Self {
        Self {
            current: initial,
            target: initial,
            state: TransitionState::Idle,
            step,
        }
    }

    /// Sets a new target and starts transitioning toward it.
    ///
    /// Always enters `Transitioning`, even when `target` equals the current
    /// color; the next tick then returns to `Idle` without rendering. An
    /// in-flight fade is replaced, continuing from the current color.
    pub fn set_target(&mut self, target: Srgb<u8>) {
        self.target = target;
        self.state = TransitionState::Transitioning;
    }

    /// Advances one step toward the target.
    ///
    /// Returns the new color if any channel changed, otherwise `None`.
    pub fn tick(&mut self) -> Option<Srgb<u8>> {
        if self.state == TransitionState::Idle {
            return None;
        }

        let step = self.step.get();
        let next = Srgb::new(
            step_channel(self.current.red, self.target.red, step),
            step_channel(self.current.green, self.target.green, step),
            step_channel(self.current.blue, self.target.blue, step),
        );

        let changed = next != self.current;
        self.current = next;

        if self.current == self.target {
            self.state = TransitionState::Idle;
        }

        changed.then_some(next)
    }

    /// Returns the color currently displayed.
    pub fn current(&self) -> Srgb<u8> {
        self.current
    }

    /// Returns the color being faded toward.
    pub fn target(&self) -> Srgb<u8> {
        self.target
    }

    /// Returns the current state.
    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// Returns true while a fade is in progress.
    pub fn is_transitioning(&self) -> bool {
        self.state == TransitionState::Transitioning
    }

    /// Returns the per-channel step size.
    pub fn step(&self) -> NonZeroU8 {
        self.step
    }
}

/// Moves `current` toward `target` by at most `step`, clamped at `target`.
#[inline]
fn step_channel(current: u8, target: u8, step: u8) -> u8 {
    if current < target {
        current.saturating_add(step).min(target)
    } else if current > target {
        current.saturating_sub(step).max(target)
    } else {
        current
    }
}
