// src/wgpu_utils/uniform_buffer.rs
use std::marker::PhantomData;

fn short_type_name<T>() -> &'static str {
    let type_name = std::any::type_name::<T>();
    let pos = type_name.rfind(':').unwrap_or(0);
    if pos > 0 {
        &type_name[(pos + 1)..]
    } else {
        type_name
    }
}

/// Typed wrapper around a single-element uniform buffer
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    previous_content: Vec<u8>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    /// Create a new uniform buffer
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("UniformBuffer: {}", short_type_name::<Content>())),
            size: std::mem::size_of::<Content>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        UniformBuffer {
            buffer,
            content_type: PhantomData,
            previous_content: Vec::new(),
        }
    }

    /// Update buffer content (skips the write when nothing changed)
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: Content) {
        let new_content = bytemuck::bytes_of(&content);
        if self.previous_content == new_content {
            return;
        }
        queue.write_buffer(&self.buffer, 0, new_content);
        self.previous_content = new_content.to_vec();
    }

    /// Get binding resource
    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }
}

/// Rounds `size` up to the next multiple of `alignment`
pub fn aligned_stride(size: u64, alignment: u64) -> u64 {
    if alignment == 0 {
        return size;
    }
    size.div_ceil(alignment) * alignment
}

/// Uniform buffer holding one `Content` per draw, each at an aligned offset
///
/// Bound once with a dynamic offset; draw `i` reads element `i` at
/// `offset(i)`. The buffer grows (and must then be rebound) when a frame
/// holds more elements than it has room for.
pub struct DynamicUniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    stride: u64,
    capacity: usize,
    staging: Vec<u8>,
}

impl<Content: bytemuck::Pod> DynamicUniformBuffer<Content> {
    pub fn new(device: &wgpu::Device, capacity: usize) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = aligned_stride(Self::element_size(), alignment);
        let capacity = capacity.max(1);

        DynamicUniformBuffer {
            buffer: Self::create_buffer(device, stride, capacity),
            content_type: PhantomData,
            stride,
            capacity,
            staging: Vec::new(),
        }
    }

    fn create_buffer(device: &wgpu::Device, stride: u64, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!(
                "DynamicUniformBuffer<{}>",
                short_type_name::<Content>()
            )),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub fn element_size() -> u64 {
        std::mem::size_of::<Content>() as u64
    }

    /// Writes `elements` from the start of the buffer
    ///
    /// Returns true when the buffer had to be reallocated, in which case
    /// any bind group referencing it is stale.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        elements: &[Content],
    ) -> bool {
        let mut reallocated = false;
        if elements.len() > self.capacity {
            self.capacity = elements.len().next_power_of_two();
            self.buffer = Self::create_buffer(device, self.stride, self.capacity);
            log::debug!(
                "grew {} to {} elements",
                short_type_name::<Self>(),
                self.capacity
            );
            reallocated = true;
        }
        if elements.is_empty() {
            return reallocated;
        }

        self.staging.clear();
        self.staging.resize(self.stride as usize * elements.len(), 0);
        for (chunk, element) in self
            .staging
            .chunks_exact_mut(self.stride as usize)
            .zip(elements)
        {
            chunk[..Self::element_size() as usize].copy_from_slice(bytemuck::bytes_of(element));
        }
        queue.write_buffer(&self.buffer, 0, &self.staging);
        reallocated
    }

    /// Dynamic offset of element `index`
    pub fn offset(&self, index: usize) -> wgpu::DynamicOffset {
        (self.stride * index as u64) as wgpu::DynamicOffset
    }

    /// Binding of a single element, to be addressed with [`Self::offset`]
    pub fn binding_resource(&self) -> wgpu::BindingResource {
        wgpu::BindingResource::Buffer(wgpu::BufferBinding {
            buffer: &self.buffer,
            offset: 0,
            size: wgpu::BufferSize::new(Self::element_size()),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stride_rounds_up_to_alignment() {
        assert_eq!(aligned_stride(144, 256), 256);
        assert_eq!(aligned_stride(256, 256), 256);
        assert_eq!(aligned_stride(257, 256), 512);
        assert_eq!(aligned_stride(144, 0), 144);
    }
}
