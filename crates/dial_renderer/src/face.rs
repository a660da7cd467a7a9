//! `WatchFace`: the engine the host drives.
//!
//! The host owns the event loop; the face exposes one method per lifecycle
//! trigger and never calls back into the host except through the
//! [`GraphicsApi`] it was handed and the optional [`ComplicationDrawer`].
//! All triggers run on the host's thread, one at a time, so a frame never
//! observes a half-applied resize or context rebuild.
use std::time::Duration;

use dial_core::{FaceConfig, WallClock};

use crate::backend::GraphicsApi;
use crate::camera::CameraRig;
use crate::complications::{ComplicationDrawer, ComplicationRegions};
use crate::compositor::{Compositor, FaceMode, FrameReport};
use crate::dial::HandAngles;
use crate::error::RenderError;
use crate::policy::{DrawPolicy, NextFrame, Redraw};
use crate::scene::FaceScene;

/// Result of one [`WatchFace::request_frame`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameOutcome {
    pub report: FrameReport,
    pub next: NextFrame,
}

/// Context-scoped state: dropped and rebuilt together.
struct Gpu<G> {
    backend: G,
    scene: FaceScene,
}

pub struct WatchFace<G: GraphicsApi, C: WallClock> {
    config: FaceConfig,
    clock: C,
    gpu: Option<Gpu<G>>,
    camera: CameraRig,
    compositor: Compositor,
    policy: DrawPolicy,
    surface: Option<(u32, u32)>,
    regions: Option<ComplicationRegions>,
    complications: Option<Box<dyn ComplicationDrawer>>,
}

impl<G: GraphicsApi, C: WallClock> WatchFace<G, C> {
    /// A face with no graphics context yet.  `config` is assumed validated.
    pub fn new(config: FaceConfig, clock: C) -> Self {
        Self {
            camera: CameraRig::new(&config.camera),
            compositor: Compositor::new(&config),
            policy: DrawPolicy::new(),
            config,
            clock,
            gpu: None,
            surface: None,
            regions: None,
            complications: None,
        }
    }

    /// Attaches the complication collaborator and brings it up to date.
    pub fn set_complication_drawer(&mut self, mut drawer: Box<dyn ComplicationDrawer>) {
        if let Some(regions) = &self.regions {
            for (slot, rect) in regions.iter() {
                drawer.set_bounds(slot, rect);
            }
        }
        drawer.set_in_ambient_mode(self.compositor.mode().is_ambient());
        self.complications = Some(drawer);
    }

    // ── Lifecycle triggers ───────────────────────────────────────────────────

    /// A fresh graphics context.  Builds the program, every triangle list
    /// and the rotation cache, fixes both camera views, and, if the surface
    /// size is already known, re-derives the projection for it.
    ///
    /// On error the face stays uninitialized; the failure is fatal.
    pub fn on_context_created(&mut self, mut backend: G) -> Result<(), RenderError> {
        let scene = FaceScene::build(&mut backend, &self.config)?;
        let mut camera = CameraRig::new(&self.config.camera);
        if let Some((w, h)) = self.surface {
            camera.on_surface_changed(w, h)?;
            backend.resize_surface(w, h);
        }
        self.camera = camera;
        self.gpu = Some(Gpu { backend, scene });
        log::info!("graphics context created");
        Ok(())
    }

    /// The graphics context is gone.  Every GPU-scoped resource is
    /// dropped; the backend is handed back to the caller.
    pub fn on_context_lost(&mut self) -> Option<G> {
        let gpu = self.gpu.take()?;
        log::info!("graphics context lost");
        Some(gpu.backend)
    }

    /// New surface dimensions.  Both must be non-zero.
    pub fn on_surface_resized(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        self.camera.on_surface_changed(width, height)?;
        if let Some(gpu) = &mut self.gpu {
            gpu.backend.resize_surface(width, height);
        }
        self.surface = Some((width, height));

        let regions = ComplicationRegions::compute(width, height);
        if let Some(drawer) = &mut self.complications {
            for (slot, rect) in regions.iter() {
                drawer.set_bounds(slot, rect);
            }
        }
        log::debug!(
            "surface {width}x{height}; complications L{} R{} B{}",
            regions.left,
            regions.right,
            regions.bottom
        );
        self.regions = Some(regions);
        Ok(())
    }

    /// Power-mode notification.  Repeating the current mode does nothing.
    pub fn on_mode_changed(&mut self, ambient: bool) -> Redraw {
        let changed = self.compositor.set_mode(FaceMode::from_ambient(ambient));
        if changed {
            log::info!("mode -> {:?}", self.compositor.mode());
            if let Some(drawer) = &mut self.complications {
                drawer.set_in_ambient_mode(ambient);
            }
        }
        self.policy.on_mode_changed(changed)
    }

    pub fn on_visibility_changed(&mut self, visible: bool) -> Redraw {
        log::debug!("visible: {visible}");
        self.policy.on_visibility_changed(visible)
    }

    /// The host's periodic minimum-granularity tick.
    pub fn on_time_tick(&mut self) -> Redraw {
        log::trace!("time tick");
        self.policy.on_time_tick()
    }

    /// Renders one frame at the current wall-clock time and reports what
    /// the host should do next.
    pub fn request_frame(&mut self) -> Result<FrameOutcome, RenderError> {
        let gpu = self.gpu.as_mut().ok_or(RenderError::NotInitialized)?;
        let now = self.clock.now();
        let angles = HandAngles::from_time(&now);
        let report = self
            .compositor
            .compose(&mut gpu.backend, &gpu.scene, &self.camera, angles)?;
        let next = self.policy.after_frame(report.mode);
        log::trace!(
            "frame {:02}:{:02}:{:02} {:?}: {} draws, next {:?}",
            now.hour,
            now.minute,
            now.second,
            report.mode,
            report.draw_calls,
            next
        );
        Ok(FrameOutcome { report, next })
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn is_initialized(&self) -> bool {
        self.gpu.is_some()
    }

    pub fn mode(&self) -> FaceMode {
        self.compositor.mode()
    }

    pub fn is_visible(&self) -> bool {
        self.policy.is_visible()
    }

    pub fn time_tick_interval(&self) -> Duration {
        Duration::from_secs(self.config.time_tick_secs)
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn surface_size(&self) -> Option<(u32, u32)> {
        self.surface
    }

    pub fn complication_regions(&self) -> Option<&ComplicationRegions> {
        self.regions.as_ref()
    }

    pub fn scene(&self) -> Option<&FaceScene> {
        self.gpu.as_ref().map(|g| &g.scene)
    }

    pub fn backend(&self) -> Option<&G> {
        self.gpu.as_ref().map(|g| &g.backend)
    }

    pub fn backend_mut(&mut self) -> Option<&mut G> {
        self.gpu.as_mut().map(|g| &mut g.backend)
    }
}
