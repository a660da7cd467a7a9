//! Face configuration.
//!
//! Every constant the face draws with lives here so a host can restyle the
//! dial from a TOML file without touching code.  All fields have defaults,
//! so an empty document yields the stock face:
//!
//! ```toml
//! time_tick_secs = 60
//!
//! [hands.second]
//! width  = 0.02
//! length = 1.0
//! color  = [1.0, 0.0, 0.0, 1.0]
//!
//! [camera]
//! interactive_eye = [0.0, -1.0, -3.0]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ── Hands ────────────────────────────────────────────────────────────────────

/// One hand: an isosceles triangle `width` wide at the pivot and `length`
/// long, in face units (the tick ring sits at radius 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandStyle {
    pub width: f32,
    pub length: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandSet {
    pub hour: HandStyle,
    pub minute: HandStyle,
    pub second: HandStyle,
}

impl Default for HandSet {
    fn default() -> Self {
        Self {
            hour:   HandStyle { width: 0.1,  length: 0.5, color: Color::PEARL },
            minute: HandStyle { width: 0.06, length: 0.8, color: Color::SILVER },
            second: HandStyle { width: 0.02, length: 1.0, color: Color::RED },
        }
    }
}

// ── Ticks ────────────────────────────────────────────────────────────────────

/// One tier of tick marks, all drawn with a single call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickStyle {
    /// Number of evenly spaced positions around the dial.
    pub count: u32,
    pub width: f32,
    pub length: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickSet {
    pub major: TickStyle,
    /// Minor ticks skip every position a major tick occupies.
    pub minor: TickStyle,
}

impl Default for TickSet {
    fn default() -> Self {
        Self {
            major: TickStyle { count: 4,  width: 0.03, length: 0.09, color: Color::WHITE },
            minor: TickStyle { count: 12, width: 0.02, length: 0.06, color: Color::GRAY },
        }
    }
}

// ── Camera ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Off-axis eye used while interactive (tilted perspective).
    pub interactive_eye: [f32; 3],
    /// Dead-on eye used in ambient mode.
    pub ambient_eye: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            interactive_eye: [0.0, -1.0, -3.0],
            ambient_eye: [0.0, 0.0, -3.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            near: 2.0,
            far: 7.0,
        }
    }
}

// ── Face ─────────────────────────────────────────────────────────────────────

/// Complete description of the face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceConfig {
    pub interactive_background: Color,
    pub ambient_background: Color,
    /// Period of the host's minimum-granularity time tick, in seconds.
    pub time_tick_secs: u64,
    pub hands: HandSet,
    pub ticks: TickSet,
    pub camera: CameraConfig,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            interactive_background: Color::DIM_TEAL,
            ambient_background: Color::BLACK,
            time_tick_secs: 60,
            hands: HandSet::default(),
            ticks: TickSet::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl FaceConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(src)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("loading face config from {}", path.display());
        Self::from_toml_str(&src)
    }

    /// Checks the invariants the geometry and camera rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hands = [
            ("hour", &self.hands.hour),
            ("minute", &self.hands.minute),
            ("second", &self.hands.second),
        ];
        for (name, hand) in hands {
            if !(hand.width > 0.0 && hand.length > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} hand needs positive width and length"
                )));
            }
            check_color(&format!("{name} hand"), hand.color)?;
        }

        for (name, tick) in [("major", &self.ticks.major), ("minor", &self.ticks.minor)] {
            if tick.count == 0 || tick.count % 4 != 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} tick count must be a non-zero multiple of 4, got {}",
                    tick.count
                )));
            }
            if !(tick.width > 0.0 && tick.length > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} ticks need positive width and length"
                )));
            }
            check_color(&format!("{name} ticks"), tick.color)?;
        }
        // with only the four quarter positions every minor slot is skipped
        if self.ticks.minor.count < 8 {
            return Err(ConfigError::Invalid(format!(
                "minor tick count must be at least 8, got {}",
                self.ticks.minor.count
            )));
        }

        let cam = &self.camera;
        if !(cam.near > 0.0 && cam.far > cam.near) {
            return Err(ConfigError::Invalid(format!(
                "camera planes must satisfy 0 < near < far, got near={} far={}",
                cam.near, cam.far
            )));
        }
        if cam.interactive_eye == cam.target || cam.ambient_eye == cam.target {
            return Err(ConfigError::Invalid("camera eye coincides with target".into()));
        }

        check_color("interactive background", self.interactive_background)?;
        check_color("ambient background", self.ambient_background)?;

        if self.time_tick_secs == 0 {
            return Err(ConfigError::Invalid("time_tick_secs must be at least 1".into()));
        }
        Ok(())
    }
}

fn check_color(what: &str, color: Color) -> Result<(), ConfigError> {
    if color.is_normalized() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{what} color channels must lie in [0, 1]")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_the_stock_face() {
        let cfg = FaceConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, FaceConfig::default());
        assert_eq!(cfg.hands.second.color, Color::RED);
        assert_eq!(cfg.ticks.minor.count, 12);
        assert_eq!(cfg.camera.near, 2.0);
        assert_eq!(cfg.camera.far, 7.0);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = FaceConfig::from_toml_str(
            r#"
            time_tick_secs = 30

            [hands.minute]
            width = 0.08
            length = 0.75
            color = [0.2, 0.4, 0.6, 1.0]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.time_tick_secs, 30);
        assert_eq!(cfg.hands.minute.width, 0.08);
        assert_eq!(cfg.hands.hour, HandSet::default().hour);
    }

    #[test]
    fn tick_count_must_split_into_quarters() {
        let mut cfg = FaceConfig::default();
        cfg.ticks.minor.count = 10;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn minor_ring_needs_positions_between_majors() {
        let mut cfg = FaceConfig::default();
        cfg.ticks.minor.count = 4;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
        cfg.ticks.minor.count = 8;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn far_plane_must_exceed_near() {
        let mut cfg = FaceConfig::default();
        cfg.camera.far = 1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_out_of_gamut_color() {
        let err = FaceConfig::from_toml_str("ambient_background = [2.0, 0.0, 0.0, 1.0]");
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn syntax_error_is_a_parse_error() {
        assert!(matches!(
            FaceConfig::from_toml_str("time_tick_secs = ["),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn serializes_back_to_toml() {
        let text = toml::to_string(&FaceConfig::default()).unwrap();
        assert_eq!(FaceConfig::from_toml_str(&text).unwrap(), FaceConfig::default());
    }
}
