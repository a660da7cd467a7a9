use thiserror::Error;

/// Everything that can go wrong inside the face.
///
/// None of these are retried: the operations are deterministic, so each
/// error is reported synchronously by the trigger that caused it and the
/// host decides how to present it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The colored-triangle program failed to compile or link.  Fatal: the
    /// face has no degraded rendering mode.
    #[error("failed to create triangle program: {0}")]
    ProgramCreation(String),

    /// The host reported a surface with a zero dimension.
    #[error("invalid surface size {width}x{height}")]
    InvalidSurface { width: u32, height: u32 },

    /// A triangle list whose vertex count is not a whole number of triangles.
    #[error("`{label}` has {vertex_count} vertices, not a multiple of 3")]
    MalformedGeometry { label: String, vertex_count: usize },

    /// A draw referenced a program from a destroyed graphics context.
    #[error("program {0} is not alive in the current graphics context")]
    ProgramUnavailable(u32),

    /// A draw referenced vertex data from a destroyed graphics context.
    #[error("vertex buffer {0} is not alive in the current graphics context")]
    BufferUnavailable(u32),

    /// A frame was requested before `on_context_created`.
    #[error("no graphics context; on_context_created must run before drawing")]
    NotInitialized,

    /// A frame was requested before the first `on_surface_resized`.
    #[error("surface size unknown; on_surface_resized must run before drawing")]
    NoSurface,

    /// `draw`/`end_frame` outside `begin_frame` … `end_frame`.
    #[error("draw call outside of a frame")]
    NoActiveFrame,

    /// The swapchain could not provide a texture to render into.
    #[error("surface error: {0}")]
    Surface(String),
}
