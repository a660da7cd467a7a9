/// `dial_renderer`: the transform pipeline and per-frame composition of an
/// analog watch face.
///
/// # Module layout
///
/// | Module          | Responsibility                                           |
/// |-----------------|----------------------------------------------------------|
/// | `geometry`      | `Vertex`, `TriangleList`, hand/tick vertex builders      |
/// | `rotation`      | 360-entry per-degree rotation cache, `AngleIndex`        |
/// | `dial`          | Wall-clock time → hand angle indices                     |
/// | `camera`        | Interactive/ambient views, projection, VP pair           |
/// | `compositor`    | Power-mode state machine and the fixed draw order        |
/// | `policy`        | Continuous vs. idle redraw decisions                     |
/// | `complications` | Complication slot rectangles and the drawer trait        |
/// | `scene`         | GPU-scoped resources rebuilt per graphics context        |
/// | `face`          | `WatchFace`: the lifecycle triggers a host drives        |
/// | `backend`       | `GraphicsApi` seam: wgpu and recording implementations   |
/// | `pipeline`      | Bind-group layouts + compiled triangle program (wgpu)    |
/// | `resources`     | Vertex / dynamic-uniform buffer helpers (wgpu)           |
/// | `render_target` | Depth attachment (wgpu)                                  |
pub mod backend;
pub mod camera;
pub mod complications;
pub mod compositor;
pub mod dial;
pub mod error;
pub mod face;
pub mod geometry;
pub mod pipeline;
pub mod policy;
pub mod render_target;
pub mod resources;
pub mod rotation;
pub mod scene;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use glam;

pub use backend::{
    BufferHandle, DrawCall, GpuCall, GraphicsApi, ProgramHandle, RecordingBackend, WgpuBackend,
};
pub use camera::{CameraRig, ViewProjection};
pub use complications::{ComplicationDrawer, ComplicationRegions, ComplicationSlot, Rect};
pub use compositor::{Compositor, FaceMode, FrameReport};
pub use dial::HandAngles;
pub use error::RenderError;
pub use face::{FrameOutcome, WatchFace};
pub use geometry::{TriangleList, Vertex};
pub use policy::{DrawPolicy, NextFrame, Redraw};
pub use rotation::{AngleIndex, RotationCache};
pub use scene::FaceScene;
