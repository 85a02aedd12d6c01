//! The control loop tying framing, parsing and fading together.
//!
//! Provides [`ColorController`], which owns the byte source, the color sink,
//! the frame assembler and the fade state. Each call to
//! [`service`](ColorController::service) performs one loop iteration.

use crate::command::{ColorCommand, Command, ParseError};
use crate::config::Config;
use crate::frame::{FRAME_CAPACITY, Frame, FrameAssembler, FrameError};
use crate::source::ByteSource;
use crate::strip::ColorSink;
use crate::time::{TimeInstant, TimeSource};
use crate::transition::{Transition, TransitionState};
use palette::Srgb;

/// Something that happened during a [`service`](ColorController::service) call.
///
/// Events are passed to the closure given to `service` in the order they
/// occur. They are informational: the controller has already acted on them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event<'a> {
    /// A frame without the `RGB:` prefix, for echo or logging.
    Generic(&'a [u8]),
    /// A color command was accepted and is now the fade target.
    ColorAccepted(ColorCommand),
    /// An `RGB:` frame was malformed and dropped.
    Rejected(ParseError),
    /// A partial frame was dropped by overflow or timeout.
    Dropped(FrameError),
    /// The sink was filled with a new color.
    Rendered(Srgb<u8>),
}

/// Drives a color sink from serial text commands.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `B` - Byte source implementation type
/// * `K` - Color sink implementation type
/// * `T` - Time source implementation type
/// * `CAP` - Frame buffer capacity
pub struct ColorController<'t, I, B, K, T, const CAP: usize = FRAME_CAPACITY>
where
    I: TimeInstant,
    B: ByteSource,
    K: ColorSink,
    T: TimeSource<I>,
{
    source: B,
    sink: K,
    time_source: &'t T,
    assembler: FrameAssembler<I, CAP>,
    transition: Transition,
    config: Config<I::Duration>,
}

impl<'t, I, B, K, T, const CAP: usize> ColorController<'t, I, B, K, T, CAP>
where
    I: TimeInstant,
    B: ByteSource,
    K: ColorSink,
    T: TimeSource<I>,
{
    /// Creates an idle controller, applies the configured output brightness
    /// to the sink and renders the configured initial color once.
    pub fn new(source: B, mut sink: K, time_source: &'t T, config: Config<I::Duration>) -> Self {
        let initial = config.initial_color();
        sink.set_brightness(config.brightness());
        sink.fill(initial);
        info!(
            "color controller ready: initial ({}, {}, {}), brightness {}",
            initial.red,
            initial.green,
            initial.blue,
            config.brightness()
        );

        Self {
            source,
            sink,
            time_source,
            assembler: FrameAssembler::new(config.frame_timeout()),
            transition: Transition::new(initial, config.fade_step()),
            config,
        }
    }

    /// Runs one control loop iteration.
    ///
    /// In order: drains every queued byte through the frame assembler and
    /// dispatches completed frames, drops a stale partial frame, then advances
    /// the fade by one tick. Never blocks. The caller should pause for
    /// [`loop_interval`](Self::loop_interval) before calling again.
    ///
    /// # Returns
    /// The fade state after this iteration's tick.
    pub fn service<F>(&mut self, mut on_event: F) -> TransitionState
    where
        F: FnMut(Event<'_>),
    {
        while let Some(byte) = self.source.read_byte() {
            let now = self.time_source.now();
            match self.assembler.feed(byte, now) {
                Ok(Some(frame)) => self.dispatch(&frame, &mut on_event),
                Ok(None) => {}
                Err(err) => on_event(Event::Dropped(err)),
            }
        }

        if let Err(err) = self.assembler.check_timeout(self.time_source.now()) {
            on_event(Event::Dropped(err));
        }

        if let Some(color) = self.transition.tick() {
            self.sink.fill(color);
            trace!("render ({}, {}, {})", color.red, color.green, color.blue);
            on_event(Event::Rendered(color));
        }

        self.transition.state()
    }

    fn dispatch<F>(&mut self, frame: &Frame<CAP>, on_event: &mut F)
    where
        F: FnMut(Event<'_>),
    {
        match Command::from_frame(frame) {
            Ok(Command::Color(command)) => {
                debug!("color command: {}", command);
                self.transition.set_target(command.color);
                on_event(Event::ColorAccepted(command));
            }
            Ok(Command::Generic(bytes)) => {
                info!("generic frame: {} bytes", bytes.len());
                on_event(Event::Generic(bytes));
            }
            Err(err) => {
                warn!("malformed command dropped: {}", err);
                on_event(Event::Rejected(err));
            }
        }
    }

    /// Starts a fade toward `color` without going through the byte stream.
    pub fn set_target(&mut self, color: Srgb<u8>) {
        self.transition.set_target(color);
    }

    /// Returns the color currently displayed.
    pub fn current_color(&self) -> Srgb<u8> {
        self.transition.current()
    }

    /// Returns the color being faded toward.
    pub fn target_color(&self) -> Srgb<u8> {
        self.transition.target()
    }

    /// Returns the fade state.
    pub fn state(&self) -> TransitionState {
        self.transition.state()
    }

    /// Returns the suggested pause between iterations.
    pub fn loop_interval(&self) -> I::Duration {
        self.config.loop_interval()
    }

    /// Returns the configuration the controller was built with.
    pub fn config(&self) -> &Config<I::Duration> {
        &self.config
    }

    /// Returns the number of bytes of the partial frame buffered so far.
    pub fn pending_len(&self) -> usize {
        self.assembler.len()
    }

    /// Returns a reference to the color sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Returns a mutable reference to the color sink.
    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Returns a mutable reference to the byte source.
    pub fn source_mut(&mut self) -> &mut B {
        &mut self.source
    }
}
