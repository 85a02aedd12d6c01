#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`FrameAssembler`**: Groups serial bytes into `\n`/`\r` terminated frames, bounded in length and age
//! - **`Command`**: A classified frame, either a `Color` command or a `Generic` line for echo
//! - **`ColorCommand`**: A parsed `RGB:<r>,<g>,<b>[,<brightness>]` command
//! - **`Transition`**: Fades the current color toward a target by a fixed step per channel per tick
//! - **`ColorController`**: Runs one control loop iteration per `service` call
//! - **`ByteSource`**: Trait to implement for your serial receive path
//! - **`ColorSink`**: Trait to implement for your LED output
//! - **`SolidStrip`**: `ColorSink` for any `smart-leds` driver, at a fixed brightness
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Colors are `Srgb<u8>`. The brightness field of a command is parsed but never
//! applied: output brightness is fixed in `Config` at startup.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

#[macro_use]
mod fmt;

pub mod command;
pub mod config;
pub mod controller;
pub mod frame;
pub mod source;
pub mod strip;
pub mod time;
pub mod transition;

pub use command::{COLOR_PREFIX, ColorCommand, Command, FULL_BRIGHTNESS, ParseError, parse};
pub use config::{
    COLOR_OFF, Config, ConfigBuilder, ConfigError, DEFAULT_BRIGHTNESS, DEFAULT_FRAME_TIMEOUT_MS,
    DEFAULT_LOOP_INTERVAL_MS, DEFAULT_STRIP_LEN,
};
pub use controller::{ColorController, Event};
pub use frame::{FRAME_CAPACITY, Frame, FrameAssembler, FrameError};
pub use source::ByteSource;
pub use strip::{ColorSink, SolidStrip};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use transition::{DEFAULT_FADE_STEP, Transition, TransitionState};

pub const RED: Srgb<u8> = Srgb::new(255, 0, 0);
pub const GREEN: Srgb<u8> = Srgb::new(0, 255, 0);
pub const BLUE: Srgb<u8> = Srgb::new(0, 0, 255);
pub const WHITE: Srgb<u8> = Srgb::new(255, 255, 255);
