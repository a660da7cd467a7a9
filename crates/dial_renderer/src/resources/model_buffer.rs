/// Dynamic uniform buffer holding one MVP matrix per draw call of a frame.
///
/// Every draw of a frame reads its transform from the same buffer and bind
/// group; only the dynamic offset changes between draws:
///
/// ```text
/// rpass.set_bind_group(0, &mvps.bind_group, &[mvps.offset(i)]);
/// ```
///
/// ## Alignment
///
/// wgpu requires each dynamic-offset element to be aligned to
/// `min_uniform_buffer_offset_alignment` (typically 256 bytes on desktop
/// hardware, 64 on some mobile GPUs).  Each slot is therefore
/// `align_up(64, alignment)` bytes even though only 64 are used.
use glam::Mat4;
use wgpu::util::DeviceExt;

const MAT4_SIZE: u64 = 64; // 4×4 × f32

pub struct ModelBuffer {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    /// Byte stride between consecutive slots (≥ 64, multiple of alignment).
    pub stride: u32,
    capacity: usize,
}

impl ModelBuffer {
    /// `layout` must be the transform layout with `has_dynamic_offset: true`.
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, initial_capacity: usize) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment;
        let stride = align_up(MAT4_SIZE as u32, alignment);

        let capacity = initial_capacity.max(1);
        let buffer = Self::create_buffer(device, capacity, stride);
        let bind_group = Self::create_bind_group(device, layout, &buffer);

        Self { buffer, bind_group, stride, capacity }
    }

    #[inline]
    pub fn offset(&self, index: usize) -> u32 {
        (index as u32).wrapping_mul(self.stride)
    }

    /// Writes `matrices` into slots `0..matrices.len()` with a single
    /// queue write.  The buffer must already be large enough.
    pub fn write_all(&self, queue: &wgpu::Queue, matrices: &[Mat4]) {
        debug_assert!(matrices.len() <= self.capacity, "ModelBuffer slot out of range");
        if matrices.is_empty() {
            return;
        }
        let stride = self.stride as usize;
        let mut data = vec![0u8; matrices.len() * stride];
        for (slot, m) in matrices.iter().enumerate() {
            let off = slot * stride;
            data[off..off + MAT4_SIZE as usize].copy_from_slice(bytemuck::cast_slice(&m.to_cols_array()));
        }
        queue.write_buffer(&self.buffer, 0, &data);
    }

    /// Grows the buffer (doubling) until it holds `needed` slots.  The bind
    /// group is recreated along with it.
    pub fn ensure_capacity(&mut self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout, needed: usize) {
        if needed <= self.capacity {
            return;
        }
        let mut new_cap = self.capacity;
        while new_cap < needed {
            new_cap *= 2;
        }
        log::debug!("ModelBuffer: growing {} -> {new_cap} slots", self.capacity);
        self.buffer = Self::create_buffer(device, new_cap, self.stride);
        self.bind_group = Self::create_bind_group(device, layout, &self.buffer);
        self.capacity = new_cap;
    }

    fn create_buffer(device: &wgpu::Device, capacity: usize, stride: u32) -> wgpu::Buffer {
        let size = capacity as u64 * stride as u64;
        // identity in every slot so an unwritten slot draws untransformed
        let identity = Mat4::IDENTITY.to_cols_array();
        let mut data = vec![0u8; size as usize];
        for slot in 0..capacity {
            let off = slot * stride as usize;
            data[off..off + 64].copy_from_slice(bytemuck::cast_slice(&identity));
        }
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("MVP Buffer"),
            contents: &data,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("MVP BindGroup"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer,
                    offset: 0,
                    // one slot: the window the shader sees at each offset
                    size: wgpu::BufferSize::new(MAT4_SIZE),
                }),
            }],
        })
    }
}

/// Round `value` up to the next multiple of `alignment` (a power of two).
#[inline]
fn align_up(value: u32, alignment: u32) -> u32 {
    (value + alignment - 1) & !(alignment - 1)
}
