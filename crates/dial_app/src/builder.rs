use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use dial_core::FaceConfig;
use dial_renderer::ComplicationDrawer;

use crate::complications::LoggingComplications;

/// Window and face settings.
///
/// Loadable from TOML; window keys sit at the top level and the face
/// lives in a `[face]` table:
///
/// ```toml
/// title = "Dial"
/// width = 454
/// height = 454
///
/// [face]
/// time_tick_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub vsync: bool,
    /// Stay in ambient mode regardless of window focus.
    pub always_ambient: bool,
    pub face: FaceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Dial".to_string(),
            width: 454,
            height: 454,
            resizable: true,
            vsync: true,
            always_ambient: false,
            face: FaceConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let cfg: Self = toml::from_str(src).context("malformed app config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        log::debug!("loading app config from {}", path.display());
        Self::from_toml_str(&src).with_context(|| format!("in {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.width > 0 && self.height > 0,
            "window size must be non-zero, got {}x{}",
            self.width,
            self.height
        );
        self.face.validate()?;
        Ok(())
    }
}

/// Entry point for the windowed face.  Builder-style configuration.
pub struct App {
    config: AppConfig,
    complications: Option<Box<dyn ComplicationDrawer>>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self { config, complications: None }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.config.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.config.vsync = vsync;
        self
    }

    pub fn with_always_ambient(mut self, ambient: bool) -> Self {
        self.config.always_ambient = ambient;
        self
    }

    pub fn with_complications(mut self, drawer: Box<dyn ComplicationDrawer>) -> Self {
        self.complications = Some(drawer);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs the event loop until the window closes or a render error
    /// ends the session.
    pub fn run(self) -> anyhow::Result<()> {
        self.config.validate()?;
        let drawer = self
            .complications
            .unwrap_or_else(|| Box::new(LoggingComplications::default()));
        crate::runner::run_internal(self.config, drawer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_table_is_nested() {
        let cfg = AppConfig::from_toml_str(
            r#"
            title = "Test"
            width = 320
            height = 320

            [face]
            time_tick_secs = 1
            "#,
        )
        .unwrap();
        assert_eq!(cfg.title, "Test");
        assert_eq!(cfg.face.time_tick_secs, 1);
        assert!(cfg.vsync);
    }

    #[test]
    fn invalid_face_is_rejected() {
        let err = AppConfig::from_toml_str("[face.camera]\nnear = 0.0\n");
        assert!(err.is_err());
    }

    #[test]
    fn zero_window_is_rejected() {
        assert!(App::new(AppConfig::default()).with_size(0, 10).config().validate().is_err());
    }

    #[test]
    fn builder_overrides_the_loaded_config() {
        let app = App::new(AppConfig::default())
            .with_always_ambient(true)
            .with_vsync(false)
            .with_complications(Box::new(LoggingComplications::default()));
        assert!(app.config().always_ambient);
        assert!(!app.config().vsync);
        assert!(app.complications.is_some());
    }
}
