//! Desktop host for the dial watch face.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dial_app::{App, AppConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     dial_app::logging::init(log::LevelFilter::Info)?;
//!     App::new(AppConfig::default())
//!         .with_title("Dial")
//!         .with_size(454, 454)
//!         .run()
//! }
//! ```

pub mod builder;
pub mod complications;
mod graphics;
pub mod headless;
pub mod logging;
mod runner;

pub use builder::{App, AppConfig};
pub use complications::LoggingComplications;
pub use headless::{simulate, HeadlessSummary};

// Re-exported so binaries need only this crate for the common types.
pub use dial_core::{Color, FaceConfig, LocalClock};
pub use dial_renderer::{FaceMode, FrameReport};
