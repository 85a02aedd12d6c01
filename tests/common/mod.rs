//! Shared test infrastructure for serial-rgb-fader integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use serial_rgb_fader::{
    ByteSource, ColorCommand, ColorController, ColorSink, Event, FrameError, ParseError, Srgb,
    TimeDuration, TimeInstant, TimeSource, TransitionState,
};
use std::collections::VecDeque;

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Byte Source
// ============================================================================

/// Byte source fed from the test, standing in for a UART receive buffer
#[derive(Default)]
pub struct ScriptedSource {
    queue: VecDeque<u8>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.queue.extend(bytes.iter().copied());
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ByteSource for ScriptedSource {
    fn read_byte(&mut self) -> Option<u8> {
        self.queue.pop_front()
    }
}

// ============================================================================
// Mock Sink
// ============================================================================

/// Sink that records every fill
#[derive(Default)]
pub struct RecordingSink {
    fills: Vec<Srgb<u8>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fills(&self) -> &[Srgb<u8>] {
        &self.fills
    }

    pub fn last(&self) -> Option<Srgb<u8>> {
        self.fills.last().copied()
    }

    pub fn clear(&mut self) {
        self.fills.clear();
    }
}

impl ColorSink for RecordingSink {
    fn fill(&mut self, color: Srgb<u8>) {
        self.fills.push(color);
    }
}

/// Controller wired to the mocks with the default frame capacity
pub type TestController<'t> =
    ColorController<'t, TestInstant, ScriptedSource, RecordingSink, MockTimeSource>;

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Owned copy of an [`Event`], so tests can keep events past the callback
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Generic(Vec<u8>),
    ColorAccepted(ColorCommand),
    Rejected(ParseError),
    Dropped(FrameError),
    Rendered(Srgb<u8>),
}

impl From<Event<'_>> for Recorded {
    fn from(event: Event<'_>) -> Self {
        match event {
            Event::Generic(bytes) => Recorded::Generic(bytes.to_vec()),
            Event::ColorAccepted(command) => Recorded::ColorAccepted(command),
            Event::Rejected(err) => Recorded::Rejected(err),
            Event::Dropped(err) => Recorded::Dropped(err),
            Event::Rendered(color) => Recorded::Rendered(color),
        }
    }
}

/// Runs one iteration and returns the resulting state and events
pub fn service(controller: &mut TestController<'_>) -> (TransitionState, Vec<Recorded>) {
    let mut events = Vec::new();
    let state = controller.service(|event| events.push(Recorded::from(event)));
    (state, events)
}

/// Runs `n` iterations, advancing the clock by 10 ms after each, and
/// returns the number of renders.
pub fn run_ticks(controller: &mut TestController<'_>, timer: &MockTimeSource, n: usize) -> usize {
    let mut renders = 0;
    for _ in 0..n {
        controller.service(|event| {
            if matches!(event, Event::Rendered(_)) {
                renders += 1;
            }
        });
        timer.advance(TestDuration(10));
    }
    renders
}
