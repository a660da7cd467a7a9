use glam::{Mat4, Vec3, Vec4};

use dial_core::CameraConfig;

use crate::compositor::FaceMode;
use crate::error::RenderError;

/// The pair of combined view-projection matrices, one per power mode.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewProjection {
    pub interactive: Mat4,
    pub ambient: Mat4,
}

/// Camera/projection state for the face.
///
/// Two fixed cameras look at the dial: an off-axis one that gives the
/// interactive face its tilt, and a dead-on one for ambient mode.  Their
/// view matrices are session constants built with the graphics context.
/// Only the projection, and with it both view-projection products, follows
/// the surface aspect ratio.
pub struct CameraRig {
    interactive_view: Mat4,
    ambient_view: Mat4,
    near: f32,
    far: f32,
    projection: Mat4,
    /// `None` until the first surface size arrives.
    vp: Option<ViewProjection>,
    surface: Option<(u32, u32)>,
}

impl CameraRig {
    pub fn new(cfg: &CameraConfig) -> Self {
        let target = Vec3::from(cfg.target);
        let up = Vec3::from(cfg.up);
        Self {
            interactive_view: Mat4::look_at_rh(Vec3::from(cfg.interactive_eye), target, up),
            ambient_view: Mat4::look_at_rh(Vec3::from(cfg.ambient_eye), target, up),
            near: cfg.near,
            far: cfg.far,
            projection: Mat4::IDENTITY,
            vp: None,
            surface: None,
        }
    }

    /// Re-derives the projection from the new aspect ratio and recomputes
    /// both view-projection products.  All three matrices are replaced
    /// together; on error nothing changes.
    pub fn on_surface_changed(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSurface { width, height });
        }
        let aspect = width as f32 / height as f32;
        let projection = frustum(-aspect, aspect, -1.0, 1.0, self.near, self.far);

        self.vp = Some(ViewProjection {
            interactive: projection * self.interactive_view,
            ambient: projection * self.ambient_view,
        });
        self.projection = projection;
        self.surface = Some((width, height));
        log::debug!("camera: surface {width}x{height}, aspect {aspect:.3}");
        Ok(())
    }

    /// Both view-projection matrices, once a surface size is known.
    #[inline]
    pub fn view_projection(&self) -> Option<&ViewProjection> {
        self.vp.as_ref()
    }

    /// The view-projection matrix for `mode`.
    pub fn for_mode(&self, mode: FaceMode) -> Result<Mat4, RenderError> {
        let vp = self.vp.as_ref().ok_or(RenderError::NoSurface)?;
        Ok(match mode {
            FaceMode::Ambient => vp.ambient,
            FaceMode::Interactive => vp.interactive,
        })
    }

    #[inline]
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    #[inline]
    pub fn interactive_view(&self) -> &Mat4 {
        &self.interactive_view
    }

    #[inline]
    pub fn ambient_view(&self) -> &Mat4 {
        &self.ambient_view
    }

    #[inline]
    pub fn surface(&self) -> Option<(u32, u32)> {
        self.surface
    }
}

/// Perspective frustum in OpenGL clip conventions (right-handed eye space,
/// NDC depth in `[-1, 1]`), equivalent to `glFrustum`.
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let w = right - left;
    let h = top - bottom;
    let d = far - near;
    Mat4::from_cols(
        Vec4::new(2.0 * near / w, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / h, 0.0, 0.0),
        Vec4::new((right + left) / w, (top + bottom) / h, -(far + near) / d, -1.0),
        Vec4::new(0.0, 0.0, -2.0 * far * near / d, 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn ndc(m: &Mat4, p: Vec3) -> Vec3 {
        m.project_point3(p)
    }

    fn rig() -> CameraRig {
        CameraRig::new(&CameraConfig::default())
    }

    #[test]
    fn frustum_maps_near_corners_and_far_plane() {
        let m = frustum(-2.0, 2.0, -1.0, 1.0, 2.0, 7.0);
        let corner = ndc(&m, Vec3::new(2.0, 1.0, -2.0));
        assert!((corner - Vec3::new(1.0, 1.0, -1.0)).length() < EPS);
        let far = ndc(&m, Vec3::new(0.0, 0.0, -7.0));
        assert!((far.z - 1.0).abs() < EPS);
    }

    #[test]
    fn no_view_projection_before_first_resize() {
        let rig = rig();
        assert!(rig.view_projection().is_none());
        assert_eq!(rig.for_mode(FaceMode::Interactive), Err(RenderError::NoSurface));
    }

    #[test]
    fn zero_dimension_is_rejected_without_side_effects() {
        let mut rig = rig();
        rig.on_surface_changed(320, 320).unwrap();
        let before = *rig.view_projection().unwrap();
        assert_eq!(
            rig.on_surface_changed(320, 0),
            Err(RenderError::InvalidSurface { width: 320, height: 0 })
        );
        assert_eq!(*rig.view_projection().unwrap(), before);
        assert_eq!(rig.surface(), Some((320, 320)));
    }

    #[test]
    fn latest_aspect_always_wins() {
        let mut rig = rig();
        rig.on_surface_changed(400, 400).unwrap();
        rig.on_surface_changed(800, 400).unwrap();
        // aspect 2 ⇒ x scale = 2n / 2a = n / a = 1
        assert!((rig.projection().x_axis.x - 1.0).abs() < EPS);
        assert!((rig.projection().y_axis.y - 2.0).abs() < EPS);
        let vp = rig.view_projection().unwrap();
        assert!(vp.ambient.abs_diff_eq(*rig.projection() * *rig.ambient_view(), EPS));
        assert!(vp.interactive.abs_diff_eq(*rig.projection() * *rig.interactive_view(), EPS));
    }

    #[test]
    fn both_cameras_center_the_dial() {
        let mut rig = rig();
        rig.on_surface_changed(454, 454).unwrap();
        for mode in [FaceMode::Ambient, FaceMode::Interactive] {
            let p = ndc(&rig.for_mode(mode).unwrap(), Vec3::ZERO);
            assert!(p.x.abs() < EPS && p.y.abs() < EPS, "{mode:?}: {p}");
            assert!(p.z > -1.0 && p.z < 1.0, "dial clipped in {mode:?}");
        }
    }

    #[test]
    fn interactive_camera_is_tilted() {
        let mut rig = rig();
        rig.on_surface_changed(400, 400).unwrap();
        let vp = rig.view_projection().unwrap();
        assert!(!vp.interactive.abs_diff_eq(vp.ambient, 1e-3));

        // dead-on: the 12 and 6 o'clock points sit symmetric about the centre
        let top = ndc(&vp.ambient, Vec3::Y);
        let bottom = ndc(&vp.ambient, -Vec3::Y);
        assert!((top.y + bottom.y).abs() < EPS);
    }
}
