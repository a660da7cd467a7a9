//! Per-frame composition: one clear and up to five draws in a fixed order.
use dial_core::{Color, FaceConfig};

use crate::backend::GraphicsApi;
use crate::camera::CameraRig;
use crate::dial::HandAngles;
use crate::error::RenderError;
use crate::scene::FaceScene;

/// Display power state.  Transitions come from the host only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FaceMode {
    #[default]
    Interactive,
    /// Low-power state: dead-on camera, black background, no second hand.
    Ambient,
}

impl FaceMode {
    #[inline]
    pub fn from_ambient(ambient: bool) -> Self {
        if ambient {
            Self::Ambient
        } else {
            Self::Interactive
        }
    }

    #[inline]
    pub fn is_ambient(self) -> bool {
        self == Self::Ambient
    }
}

/// What one composed frame did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub mode: FaceMode,
    pub clear: Color,
    pub draw_calls: u32,
    pub second_hand: bool,
    pub angles: HandAngles,
}

/// The power-mode state machine plus the draw sequence it selects.
pub struct Compositor {
    mode: FaceMode,
    interactive_clear: Color,
    ambient_clear: Color,
}

impl Compositor {
    pub fn new(cfg: &FaceConfig) -> Self {
        Self {
            mode: FaceMode::Interactive,
            interactive_clear: cfg.interactive_background,
            ambient_clear: cfg.ambient_background,
        }
    }

    #[inline]
    pub fn mode(&self) -> FaceMode {
        self.mode
    }

    /// Enters `mode`; returns `false` when already there.  Takes effect on
    /// the next [`compose`](Self::compose).
    pub fn set_mode(&mut self, mode: FaceMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    pub fn clear_color(&self) -> Color {
        match self.mode {
            FaceMode::Ambient => self.ambient_clear,
            FaceMode::Interactive => self.interactive_clear,
        }
    }

    /// Renders one frame.
    ///
    /// Order is back to front and never varies: hour, minute, second
    /// (interactive only), major ticks, minor ticks.  Hands get
    /// `vp × rotation[angle]`; ticks already carry their rotation and are
    /// drawn with `vp` alone.
    pub fn compose<G: GraphicsApi + ?Sized>(
        &self,
        api: &mut G,
        scene: &FaceScene,
        camera: &CameraRig,
        angles: HandAngles,
    ) -> Result<FrameReport, RenderError> {
        let vp = camera.for_mode(self.mode)?;
        let clear = self.clear_color();
        let rot = &scene.rotations;

        api.begin_frame(clear)?;
        scene.hour_hand.draw(api, vp * *rot.get(angles.hour))?;
        scene.minute_hand.draw(api, vp * *rot.get(angles.minute))?;
        let second_hand = !self.mode.is_ambient();
        if second_hand {
            scene.second_hand.draw(api, vp * *rot.get(angles.second))?;
        }
        scene.major_ticks.draw(api, vp)?;
        scene.minor_ticks.draw(api, vp)?;
        api.end_frame()?;

        Ok(FrameReport {
            mode: self.mode,
            clear,
            draw_calls: if second_hand { 5 } else { 4 },
            second_hand,
            angles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{GpuCall, RecordingBackend};
    use crate::rotation::AngleIndex;
    use dial_core::ClockTime;

    fn setup() -> (RecordingBackend, FaceScene, CameraRig, Compositor) {
        let cfg = FaceConfig::default();
        let mut api = RecordingBackend::new();
        let scene = FaceScene::build(&mut api, &cfg).unwrap();
        let mut camera = CameraRig::new(&cfg.camera);
        camera.on_surface_changed(400, 400).unwrap();
        api.take_calls();
        (api, scene, camera, Compositor::new(&cfg))
    }

    fn angles(h: u32, m: u32, s: u32) -> HandAngles {
        HandAngles::from_time(&ClockTime::from_hms(h, m, s).unwrap())
    }

    #[test]
    fn interactive_frame_draws_all_five_in_order() {
        let (mut api, scene, camera, comp) = setup();
        let report = comp.compose(&mut api, &scene, &camera, angles(10, 8, 42)).unwrap();
        assert_eq!(report.draw_calls, 5);
        assert!(report.second_hand);

        let calls = api.calls();
        assert_eq!(calls.first(), Some(&GpuCall::BeginFrame { clear: Color::DIM_TEAL }));
        assert_eq!(calls.last(), Some(&GpuCall::EndFrame));
        let order: Vec<_> = api.draws().iter().map(|d| d.buffer).collect();
        assert_eq!(
            order,
            vec![
                scene.hour_hand.buffer(),
                scene.minute_hand.buffer(),
                scene.second_hand.buffer(),
                scene.major_ticks.buffer(),
                scene.minor_ticks.buffer(),
            ]
        );
    }

    #[test]
    fn ambient_frame_is_black_without_second_hand() {
        let (mut api, scene, camera, mut comp) = setup();
        assert!(comp.set_mode(FaceMode::Ambient));
        let report = comp.compose(&mut api, &scene, &camera, angles(10, 8, 42)).unwrap();
        assert_eq!(report.clear, Color::BLACK);
        assert!(!report.second_hand);

        let draws = api.draws();
        assert_eq!(draws.len(), 4);
        assert!(draws.iter().all(|d| d.buffer != scene.second_hand.buffer()));
    }

    #[test]
    fn second_hand_follows_the_mode_at_every_angle() {
        let (mut api, scene, camera, mut comp) = setup();
        let second = scene.second_hand.buffer();
        for mode in [FaceMode::Interactive, FaceMode::Ambient] {
            comp.set_mode(mode);
            for d in 0..360 {
                let a = HandAngles {
                    second: AngleIndex::new(d),
                    minute: AngleIndex::new((d * 7) % 360),
                    hour: AngleIndex::new((d * 13) % 360),
                };
                let report = comp.compose(&mut api, &scene, &camera, a).unwrap();
                let draws = api.draws();
                api.take_calls();
                let drew_second = draws.iter().any(|c| c.buffer == second);
                match mode {
                    FaceMode::Interactive => {
                        assert_eq!(draws.len(), 5, "{d}°");
                        assert!(drew_second && report.second_hand, "{d}°");
                    }
                    FaceMode::Ambient => {
                        assert_eq!(draws.len(), 4, "{d}°");
                        assert!(!drew_second && !report.second_hand, "{d}°");
                    }
                }
            }
        }
    }

    #[test]
    fn hands_rotate_and_ticks_do_not() {
        let (mut api, scene, camera, comp) = setup();
        let a = angles(3, 0, 15);
        comp.compose(&mut api, &scene, &camera, a).unwrap();

        let vp = camera.for_mode(FaceMode::Interactive).unwrap();
        let draws = api.draws();
        // hour and second hands both sit at 90°, the minute hand at 0°
        let quarter = vp * *scene.rotations.get(AngleIndex::new(90));
        assert!(draws[0].mvp.abs_diff_eq(quarter, 1e-6));
        assert!(draws[1].mvp.abs_diff_eq(vp, 1e-6));
        assert!(draws[2].mvp.abs_diff_eq(quarter, 1e-6));
        assert_eq!(draws[3].mvp, vp);
        assert_eq!(draws[4].mvp, vp);
    }

    #[test]
    fn ambient_uses_the_dead_on_camera() {
        let (mut api, scene, camera, mut comp) = setup();
        comp.set_mode(FaceMode::Ambient);
        comp.compose(&mut api, &scene, &camera, angles(0, 0, 0)).unwrap();
        let ambient = camera.view_projection().unwrap().ambient;
        assert!(api.draws().iter().all(|d| d.mvp.abs_diff_eq(ambient, 1e-6)));
    }

    #[test]
    fn set_mode_reports_only_real_transitions() {
        let mut comp = Compositor::new(&FaceConfig::default());
        assert!(!comp.set_mode(FaceMode::Interactive));
        assert!(comp.set_mode(FaceMode::Ambient));
        assert!(!comp.set_mode(FaceMode::Ambient));
        assert_eq!(comp.mode(), FaceMode::Ambient);
    }

    #[test]
    fn no_frame_without_surface() {
        let cfg = FaceConfig::default();
        let mut api = RecordingBackend::new();
        let scene = FaceScene::build(&mut api, &cfg).unwrap();
        let camera = CameraRig::new(&cfg.camera);
        api.take_calls();
        let err = Compositor::new(&cfg).compose(&mut api, &scene, &camera, angles(1, 2, 3));
        assert_eq!(err, Err(RenderError::NoSurface));
        assert!(api.calls().is_empty());
    }
}
