//! The seam between the face and the graphics API.
//!
//! The face only needs four capabilities: compile the colored-triangle
//! program, upload vertex data, clear the frame, and draw a vertex buffer
//! with a given transform.  [`GraphicsApi`] captures exactly that.
//!
//! | Implementation       | Used by                                        |
//! |----------------------|------------------------------------------------|
//! | [`WgpuBackend`]      | the desktop host (real window surface)         |
//! | [`RecordingBackend`] | tests and the headless simulator               |
//!
//! Handles are plain indices scoped to one graphics context.  After a
//! context loss every handle from the old backend is dead; the face never
//! mixes handles across backends because it rebuilds all of them in
//! `on_context_created`.
use glam::Mat4;

use dial_core::Color;

use crate::error::RenderError;
use crate::geometry::Vertex;

pub mod recording;
pub mod wgpu_backend;

pub use recording::{GpuCall, RecordingBackend};
pub use wgpu_backend::WgpuBackend;

/// A compiled and linked colored-triangle program.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Vertex data resident in the current graphics context.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// One draw of a triangle list.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub program: ProgramHandle,
    pub buffer: BufferHandle,
    pub vertex_count: u32,
    /// Full model-view-projection transform, GL clip-space convention.
    pub mvp: Mat4,
}

/// Graphics capabilities consumed by the face.
///
/// Calls arrive in a fixed shape per frame:
/// `begin_frame` → `draw`* → `end_frame`.
pub trait GraphicsApi {
    /// Compiles and links the colored-triangle program.  A failure here is
    /// fatal for the session.
    fn create_program(&mut self) -> Result<ProgramHandle, RenderError>;

    /// Uploads immutable vertex data.
    fn upload_vertices(
        &mut self,
        label: &str,
        vertices: &[Vertex],
    ) -> Result<BufferHandle, RenderError>;

    /// Starts a frame; color and depth are cleared unconditionally.
    fn begin_frame(&mut self, clear: Color) -> Result<(), RenderError>;

    /// Submits one draw.
    fn draw(&mut self, call: DrawCall) -> Result<(), RenderError>;

    /// Finishes and presents the frame.
    fn end_frame(&mut self) -> Result<(), RenderError>;

    /// The presentation surface changed size.  Only backends that own a
    /// surface care.
    fn resize_surface(&mut self, _width: u32, _height: u32) {}
}
