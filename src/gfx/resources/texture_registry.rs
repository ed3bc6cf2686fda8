//! # Texture Registry
//!
//! Fixed-capacity table associating texture tags with GPU texture handles.
//! Entry `i` is bound to texture unit `i`, so the registry's capacity is the
//! number of sampled-texture bindings the scene shader declares.
//!
//! Decoding and GPU work go through two collaborators so the registry can
//! be exercised without a GPU:
//!
//! - [`ImageDecoder`] turns a file into a [`DecodedImage`]; [`ImageFileDecoder`]
//!   is the `image` crate implementation.
//! - [`TextureBackend`] uploads, binds and releases textures;
//!   [`GpuTextureStore`] is the wgpu implementation.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use image::{DynamicImage, RgbaImage};

use super::texture_resource::{generate_mip_chain, TextureResource};
use crate::error::SceneError;
use crate::wgpu_utils::binding_types;

/// Number of texture units, and so the most textures the registry holds
pub const TEXTURE_CAPACITY: usize = 16;

/// Rejects images with a side longer than `max` texels
pub fn check_texture_size(
    tag: &str,
    width: u32,
    height: u32,
    max: u32,
) -> Result<(), SceneError> {
    if width > max || height > max {
        return Err(SceneError::TextureTooLarge {
            tag: tag.to_string(),
            width,
            height,
            max,
        });
    }
    Ok(())
}

/// Opaque handle to a texture owned by a [`TextureBackend`]
///
/// Handles are allocated by the backend on upload and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Image pixels, bottom row first, with 8 bits per channel
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

impl DecodedImage {
    fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.channels as usize
    }

    /// Expands RGB or RGBA pixels to RGBA; `None` for other layouts
    pub fn to_rgba8(&self) -> Option<RgbaImage> {
        match self.channels {
            4 => RgbaImage::from_raw(self.width, self.height, self.pixels.clone()),
            3 => image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
                .map(|rgb| DynamicImage::ImageRgb8(rgb).to_rgba8()),
            _ => None,
        }
    }
}

/// Decodes image files
pub trait ImageDecoder {
    /// Decodes `path`, flipped vertically so the first row is the bottom of the image
    fn decode(&self, path: &Path) -> Result<DecodedImage, SceneError>;
}

/// [`ImageDecoder`] backed by the `image` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageFileDecoder;

impl ImageDecoder for ImageFileDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage, SceneError> {
        let image = image::open(path)
            .map_err(|source| SceneError::ImageDecode {
                path: path.to_path_buf(),
                source,
            })?
            .flipv();

        let (width, height) = (image.width(), image.height());
        let channels = image.color().channel_count();
        let pixels = match channels {
            1 => image.into_luma8().into_raw(),
            2 => image.into_luma_alpha8().into_raw(),
            3 => image.into_rgb8().into_raw(),
            _ => image.into_rgba8().into_raw(),
        };

        Ok(DecodedImage {
            pixels,
            width,
            height,
            channels,
        })
    }
}

/// GPU side of texture management
pub trait TextureBackend {
    /// Creates a texture (with mipmaps) from an RGB or RGBA image
    ///
    /// Fails without allocating anything when the backend cannot hold the
    /// image, e.g. when it exceeds the device's texture size limit.
    fn upload(&mut self, image: &DecodedImage, label: &str) -> Result<TextureHandle, SceneError>;

    /// Makes `handle` visible to the shader on texture unit `unit`
    fn bind_unit(&mut self, unit: u32, handle: TextureHandle);

    /// Called once after a batch of [`bind_unit`](Self::bind_unit) calls
    fn finish_binding(&mut self) {}

    /// Deletes the texture behind `handle`
    fn release(&mut self, handle: TextureHandle);
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureEntry {
    pub tag: String,
    pub handle: TextureHandle,
}

/// Ordered tag to texture table with room for [`TEXTURE_CAPACITY`] entries
#[derive(Debug, Default)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `path`, uploads it and registers it under `tag`
    ///
    /// Only 3 (RGB) and 4 (RGBA) channel images are accepted. On failure
    /// the error is logged and the registry is left unchanged.
    pub fn load(
        &mut self,
        path: &Path,
        tag: &str,
        decoder: &dyn ImageDecoder,
        backend: &mut dyn TextureBackend,
    ) -> Result<TextureHandle, SceneError> {
        self.try_load(path, tag, decoder, backend)
            .inspect_err(|err| log::warn!("texture '{}' not loaded: {}", tag, err))
    }

    fn try_load(
        &mut self,
        path: &Path,
        tag: &str,
        decoder: &dyn ImageDecoder,
        backend: &mut dyn TextureBackend,
    ) -> Result<TextureHandle, SceneError> {
        if self.entries.len() >= TEXTURE_CAPACITY {
            return Err(SceneError::TextureCapacityExceeded {
                tag: tag.to_string(),
                capacity: TEXTURE_CAPACITY,
            });
        }

        let image = decoder.decode(path)?;
        if !matches!(image.channels, 3 | 4) {
            return Err(SceneError::UnsupportedChannels {
                path: path.to_path_buf(),
                channels: image.channels,
            });
        }
        if image.width == 0 || image.height == 0 {
            return Err(SceneError::EmptyImage {
                path: path.to_path_buf(),
                width: image.width,
                height: image.height,
            });
        }
        if image.pixels.len() != image.expected_len() {
            return Err(SceneError::MalformedImage {
                path: path.to_path_buf(),
                expected: image.expected_len(),
                actual: image.pixels.len(),
            });
        }

        let handle = backend.upload(&image, tag)?;
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
        });

        log::info!(
            "loaded texture '{}' from {:?} ({}x{}, {} channels) into unit {}",
            tag,
            path,
            image.width,
            image.height,
            image.channels,
            self.entries.len() - 1
        );
        Ok(handle)
    }

    /// Binds entry `i` to texture unit `i` for every entry
    pub fn bind_all(&self, backend: &mut dyn TextureBackend) {
        for (unit, entry) in self.entries.iter().enumerate() {
            backend.bind_unit(unit as u32, entry.handle);
        }
        backend.finish_binding();
        log::debug!("bound {} textures", self.entries.len());
    }

    /// Texture unit of the first entry tagged `tag`
    pub fn find_slot(&self, tag: &str) -> Option<u32> {
        self.entries
            .iter()
            .position(|entry| entry.tag == tag)
            .map(|index| index as u32)
    }

    /// Handle of the first entry tagged `tag`
    pub fn find_handle(&self, tag: &str) -> Option<TextureHandle> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| entry.handle)
    }

    /// Releases every handle once and empties the registry
    pub fn release_all(&mut self, backend: &mut dyn TextureBackend) {
        let count = self.entries.len();
        for entry in self.entries.drain(..) {
            backend.release(entry.handle);
        }
        log::info!("released {} textures", count);
    }

    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// wgpu implementation of [`TextureBackend`]
///
/// Owns the uploaded textures and the bind group exposing the 16 texture
/// units (bindings 0 to 15) plus the shared sampler (binding 16). Units
/// without a texture show a 1x1 white fallback.
pub struct GpuTextureStore {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    textures: HashMap<TextureHandle, TextureResource>,
    next_handle: u32,
    units: [Option<TextureHandle>; TEXTURE_CAPACITY],
    fallback: TextureResource,
    sampler: wgpu::Sampler,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GpuTextureStore {
    /// Binding index of the sampler in the texture bind group
    pub const SAMPLER_BINDING: u32 = TEXTURE_CAPACITY as u32;

    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>) -> Self {
        let bind_group_layout = Self::create_bind_group_layout(&device);
        let fallback = TextureResource::create_fallback(&device, &queue);
        let sampler = TextureResource::create_scene_sampler(&device);
        let units = [None; TEXTURE_CAPACITY];
        let bind_group = Self::create_bind_group(
            &device,
            &bind_group_layout,
            &[&fallback.view; TEXTURE_CAPACITY],
            &sampler,
        );

        Self {
            device,
            queue,
            textures: HashMap::new(),
            next_handle: 1,
            units,
            fallback,
            sampler,
            bind_group_layout,
            bind_group,
        }
    }

    fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        let mut entries: Vec<wgpu::BindGroupLayoutEntry> = (0..TEXTURE_CAPACITY as u32)
            .map(|binding| wgpu::BindGroupLayoutEntry {
                binding,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: binding_types::texture_2d(),
                count: None,
            })
            .collect();
        entries.push(wgpu::BindGroupLayoutEntry {
            binding: Self::SAMPLER_BINDING,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: binding_types::sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        });

        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Units Bind Group Layout"),
            entries: &entries,
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        views: &[&wgpu::TextureView; TEXTURE_CAPACITY],
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        let mut entries: Vec<wgpu::BindGroupEntry> = views
            .iter()
            .enumerate()
            .map(|(binding, view)| wgpu::BindGroupEntry {
                binding: binding as u32,
                resource: wgpu::BindingResource::TextureView(view),
            })
            .collect();
        entries.push(wgpu::BindGroupEntry {
            binding: Self::SAMPLER_BINDING,
            resource: wgpu::BindingResource::Sampler(sampler),
        });

        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Units Bind Group"),
            layout,
            entries: &entries,
        })
    }

    fn rebuild_bind_group(&mut self) {
        let views = self.units.map(|unit| {
            unit.and_then(|handle| self.textures.get(&handle))
                .map(|resource| &resource.view)
                .unwrap_or(&self.fallback.view)
        });
        self.bind_group =
            Self::create_bind_group(&self.device, &self.bind_group_layout, &views, &self.sampler);
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Number of live textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl TextureBackend for GpuTextureStore {
    fn upload(&mut self, image: &DecodedImage, label: &str) -> Result<TextureHandle, SceneError> {
        check_texture_size(
            label,
            image.width,
            image.height,
            self.device.limits().max_texture_dimension_2d,
        )?;

        let rgba = image.to_rgba8().unwrap_or_else(|| {
            log::warn!("texture '{}' has an unexpected pixel layout, using white", label);
            RgbaImage::from_pixel(1, 1, image::Rgba([255; 4]))
        });

        let levels = generate_mip_chain(rgba);
        let resource =
            TextureResource::create_from_mip_chain(&self.device, &self.queue, &levels, label);

        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;
        self.textures.insert(handle, resource);
        log::debug!("uploaded '{}' as {:?} with {} mip levels", label, handle, levels.len());
        Ok(handle)
    }

    fn bind_unit(&mut self, unit: u32, handle: TextureHandle) {
        match self.units.get_mut(unit as usize) {
            Some(slot) => *slot = Some(handle),
            None => log::warn!("texture unit {} does not exist", unit),
        }
    }

    fn finish_binding(&mut self) {
        self.rebuild_bind_group();
    }

    fn release(&mut self, handle: TextureHandle) {
        let Some(resource) = self.textures.remove(&handle) else {
            log::warn!("release of unknown texture {:?}", handle);
            return;
        };
        resource.texture.destroy();

        let mut was_bound = false;
        for unit in self.units.iter_mut().filter(|unit| **unit == Some(handle)) {
            *unit = None;
            was_bound = true;
        }
        if was_bound {
            self.rebuild_bind_group();
        }
    }
}

/// Backend that keeps no pixel data, for running setup without a GPU
///
/// Handles are still allocated and tracked so releases can be checked.
#[derive(Debug, Default)]
pub struct HeadlessTextureStore {
    next_handle: u32,
    live: HashMap<TextureHandle, String>,
    units: [Option<TextureHandle>; TEXTURE_CAPACITY],
}

impl HeadlessTextureStore {
    /// Same limit the render engine requests from the device
    pub const MAX_DIMENSION: u32 = 8192;

    pub fn new() -> Self {
        Self::default()
    }

    /// Number of uploaded textures not yet released
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn unit(&self, unit: u32) -> Option<TextureHandle> {
        self.units.get(unit as usize).copied().flatten()
    }
}

impl TextureBackend for HeadlessTextureStore {
    fn upload(&mut self, image: &DecodedImage, label: &str) -> Result<TextureHandle, SceneError> {
        check_texture_size(label, image.width, image.height, Self::MAX_DIMENSION)?;

        self.next_handle += 1;
        let handle = TextureHandle(self.next_handle);
        self.live.insert(handle, label.to_string());
        Ok(handle)
    }

    fn bind_unit(&mut self, unit: u32, handle: TextureHandle) {
        if let Some(slot) = self.units.get_mut(unit as usize) {
            *slot = Some(handle);
        }
    }

    fn release(&mut self, handle: TextureHandle) {
        if self.live.remove(&handle).is_none() {
            log::warn!("release of unknown texture {:?}", handle);
        }
        for unit in self.units.iter_mut().filter(|unit| **unit == Some(handle)) {
            *unit = None;
        }
    }
}
