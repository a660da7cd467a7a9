//! dial_core: shared types for the watch face.
//!
//! | Module    | Responsibility                                         |
//! |-----------|--------------------------------------------------------|
//! | `color`   | RGBA colour used by geometry, clears and config        |
//! | `clock`   | Time-of-day snapshots and the `WallClock` source       |
//! | `config`  | `FaceConfig`, loaded from TOML                         |
//! | `context` | wgpu device/queue bundle (feature `gpu`)               |

pub mod clock;
pub mod color;
pub mod config;

#[cfg(feature = "gpu")]
pub mod context;

pub use clock::{ClockError, ClockTime, FixedClock, LocalClock, WallClock};
pub use color::Color;
pub use config::{CameraConfig, ConfigError, FaceConfig, HandSet, HandStyle, TickSet, TickStyle};

pub use glam;
