/// A drawable batch of colored triangles.
///
/// The vertex data is fixed at construction and uploaded once; the only
/// thing that varies per draw is the transform handed to
/// [`TriangleList::draw`].  A list belongs to one graphics context and is
/// rebuilt, never patched, when the context is recreated.
use glam::Mat4;

use crate::backend::{BufferHandle, DrawCall, GraphicsApi, ProgramHandle};
use crate::error::RenderError;
use crate::geometry::Vertex;

#[derive(Debug)]
pub struct TriangleList {
    label: String,
    vertices: Box<[Vertex]>,
    program: ProgramHandle,
    buffer: BufferHandle,
}

impl TriangleList {
    /// Validates `vertices` (one or more whole triangles) and uploads them.
    pub fn new<G: GraphicsApi + ?Sized>(
        api: &mut G,
        program: ProgramHandle,
        label: &str,
        vertices: Vec<Vertex>,
    ) -> Result<Self, RenderError> {
        if vertices.is_empty() || vertices.len() % 3 != 0 {
            return Err(RenderError::MalformedGeometry {
                label: label.to_string(),
                vertex_count: vertices.len(),
            });
        }
        let buffer = api.upload_vertices(label, &vertices)?;
        log::trace!("uploaded `{label}`: {} triangles", vertices.len() / 3);
        Ok(Self {
            label: label.to_string(),
            vertices: vertices.into_boxed_slice(),
            program,
            buffer,
        })
    }

    /// Issues a single draw of every triangle with `mvp`.
    pub fn draw<G: GraphicsApi + ?Sized>(&self, api: &mut G, mvp: Mat4) -> Result<(), RenderError> {
        api.draw(DrawCall {
            program: self.program,
            buffer: self.buffer,
            vertex_count: self.vertex_count(),
            mvp,
        })
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    #[inline]
    pub fn buffer(&self) -> BufferHandle {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingBackend;

    #[test]
    fn rejects_partial_triangles() {
        let mut api = RecordingBackend::new();
        let program = api.create_program().unwrap();
        let four = vec![Vertex::new([0.0; 3], [1.0; 4]); 4];
        let err = TriangleList::new(&mut api, program, "bad", four).unwrap_err();
        assert_eq!(
            err,
            RenderError::MalformedGeometry { label: "bad".into(), vertex_count: 4 }
        );
        assert!(TriangleList::new(&mut api, program, "empty", Vec::new()).is_err());
    }

    #[test]
    fn draw_forwards_handles_and_count() {
        let mut api = RecordingBackend::new();
        let program = api.create_program().unwrap();
        let six = vec![Vertex::new([0.0; 3], [1.0; 4]); 6];
        let list = TriangleList::new(&mut api, program, "pair", six).unwrap();
        assert_eq!(list.triangle_count(), 2);

        api.begin_frame(dial_core::Color::BLACK).unwrap();
        list.draw(&mut api, Mat4::IDENTITY).unwrap();
        let draws = api.draws();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].vertex_count, 6);
        assert_eq!(draws[0].buffer, list.buffer());
    }
}
