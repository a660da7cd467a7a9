/// A `GraphicsApi` that records calls instead of talking to a GPU.
///
/// Used by the unit/integration tests to check draw order and clear colours,
/// and by the headless simulator in `dial_watch`.  It enforces the same
/// contract a real context does: handles die with the context
/// ([`RecordingBackend::lose_context`]) and draws only happen inside a frame.
use std::collections::HashMap;

use dial_core::Color;

use super::{BufferHandle, DrawCall, GraphicsApi, ProgramHandle};
use crate::error::RenderError;
use crate::geometry::Vertex;

/// One recorded call.
#[derive(Clone, Debug, PartialEq)]
pub enum GpuCall {
    CreateProgram(ProgramHandle),
    Upload {
        buffer: BufferHandle,
        label: String,
        vertex_count: usize,
    },
    BeginFrame {
        clear: Color,
    },
    Draw(DrawCall),
    EndFrame,
}

#[derive(Default)]
pub struct RecordingBackend {
    calls: Vec<GpuCall>,
    live_programs: Vec<ProgramHandle>,
    live_buffers: HashMap<BufferHandle, (String, Vec<Vertex>)>,
    next_handle: u32,
    in_frame: bool,
    frames: u64,
    surface: Option<(u32, u32)>,
    program_failure: Option<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose program creation always fails with `reason`.
    pub fn failing_program(reason: &str) -> Self {
        Self {
            program_failure: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// Every call since creation (or the last [`take_calls`](Self::take_calls)).
    pub fn calls(&self) -> &[GpuCall] {
        &self.calls
    }

    /// Drains the call log.
    pub fn take_calls(&mut self) -> Vec<GpuCall> {
        std::mem::take(&mut self.calls)
    }

    /// Draw calls only, in submission order.
    pub fn draws(&self) -> Vec<DrawCall> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                GpuCall::Draw(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    /// Label and vertices of a live buffer.
    pub fn buffer(&self, handle: BufferHandle) -> Option<(&str, &[Vertex])> {
        self.live_buffers
            .get(&handle)
            .map(|(label, v)| (label.as_str(), v.as_slice()))
    }

    /// Number of completed frames.
    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    /// Last size passed to `resize_surface`.
    pub fn surface_size(&self) -> Option<(u32, u32)> {
        self.surface
    }

    /// Simulates a context loss: every program and buffer handed out so far
    /// becomes invalid.  Handle numbers are never reused.
    pub fn lose_context(&mut self) {
        log::debug!(
            "recording backend: dropping {} programs and {} buffers",
            self.live_programs.len(),
            self.live_buffers.len()
        );
        self.live_programs.clear();
        self.live_buffers.clear();
        self.in_frame = false;
    }

    fn next(&mut self) -> u32 {
        let h = self.next_handle;
        self.next_handle += 1;
        h
    }
}

impl GraphicsApi for RecordingBackend {
    fn create_program(&mut self) -> Result<ProgramHandle, RenderError> {
        if let Some(reason) = &self.program_failure {
            return Err(RenderError::ProgramCreation(reason.clone()));
        }
        let handle = ProgramHandle(self.next());
        self.live_programs.push(handle);
        self.calls.push(GpuCall::CreateProgram(handle));
        Ok(handle)
    }

    fn upload_vertices(
        &mut self,
        label: &str,
        vertices: &[Vertex],
    ) -> Result<BufferHandle, RenderError> {
        let handle = BufferHandle(self.next());
        self.live_buffers
            .insert(handle, (label.to_string(), vertices.to_vec()));
        self.calls.push(GpuCall::Upload {
            buffer: handle,
            label: label.to_string(),
            vertex_count: vertices.len(),
        });
        Ok(handle)
    }

    fn begin_frame(&mut self, clear: Color) -> Result<(), RenderError> {
        self.in_frame = true;
        self.calls.push(GpuCall::BeginFrame { clear });
        Ok(())
    }

    fn draw(&mut self, call: DrawCall) -> Result<(), RenderError> {
        if !self.in_frame {
            return Err(RenderError::NoActiveFrame);
        }
        if !self.live_programs.contains(&call.program) {
            return Err(RenderError::ProgramUnavailable(call.program.0));
        }
        if !self.live_buffers.contains_key(&call.buffer) {
            return Err(RenderError::BufferUnavailable(call.buffer.0));
        }
        self.calls.push(GpuCall::Draw(call));
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        if !self.in_frame {
            return Err(RenderError::NoActiveFrame);
        }
        self.in_frame = false;
        self.frames += 1;
        self.calls.push(GpuCall::EndFrame);
        Ok(())
    }

    fn resize_surface(&mut self, width: u32, height: u32) {
        self.surface = Some((width, height));
    }
}
