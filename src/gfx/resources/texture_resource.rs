//! Texture resource management for wgpu
//!
//! Provides utilities for creating GPU textures and views: the depth buffer
//! and mipmapped color textures built from decoded images.

/// GPU texture resource containing texture and view
#[derive(Debug, Clone)]
pub struct TextureResource {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

/// One level of a mip chain, tightly packed RGBA8
#[derive(Debug, Clone)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureResource {
    /// Standard depth buffer format used throughout the engine
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Color format for scene textures
    pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Creates a depth texture matching the surface configuration
    ///
    /// # Arguments
    /// * `device` - WGPU device for creating resources
    /// * `config` - Surface configuration to match dimensions
    /// * `label` - Debug label for the texture
    pub fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        };

        let desc = wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[Self::DEPTH_FORMAT],
        };

        let texture = device.create_texture(&desc);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view }
    }

    /// Creates a 2D color texture from a full mip chain
    ///
    /// `levels[0]` is the base image; every following level must be half
    /// the size of the previous one (rounded down, at least 1).
    pub fn create_from_mip_chain(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        levels: &[MipLevel],
        label: &str,
    ) -> Self {
        let (width, height) = levels
            .first()
            .map(|base| (base.width, base.height))
            .unwrap_or((1, 1));

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: levels.len().max(1) as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::COLOR_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (mip_level, level) in levels.iter().enumerate() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: mip_level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &level.rgba,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * level.width),
                    rows_per_image: Some(level.height),
                },
                wgpu::Extent3d {
                    width: level.width,
                    height: level.height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view }
    }

    /// 1x1 opaque white texture bound to texture units nothing else occupies
    pub fn create_fallback(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let white = MipLevel {
            width: 1,
            height: 1,
            rgba: vec![255; 4],
        };
        Self::create_from_mip_chain(device, queue, std::slice::from_ref(&white), "Fallback Texture")
    }

    /// Sampler shared by every scene texture: repeat wrapping, trilinear filtering
    pub fn create_scene_sampler(device: &wgpu::Device) -> wgpu::Sampler {
        device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Scene Texture Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        })
    }
}

/// Number of levels in a full mip chain for a `width` x `height` image
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Builds the full mip chain of an RGBA image by repeated halving
pub fn generate_mip_chain(base: image::RgbaImage) -> Vec<MipLevel> {
    let count = mip_level_count(base.width(), base.height());
    let mut levels = Vec::with_capacity(count as usize);
    let mut current = base;

    for _ in 1..count {
        let next_width = (current.width() / 2).max(1);
        let next_height = (current.height() / 2).max(1);
        let next = image::imageops::resize(
            &current,
            next_width,
            next_height,
            image::imageops::FilterType::Triangle,
        );
        levels.push(MipLevel {
            width: current.width(),
            height: current.height(),
            rgba: current.into_raw(),
        });
        current = next;
    }

    levels.push(MipLevel {
        width: current.width(),
        height: current.height(),
        rgba: current.into_raw(),
    });
    levels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mip_level_count() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 2), 2);
        assert_eq!(mip_level_count(256, 64), 9);
        assert_eq!(mip_level_count(300, 10), 9);
    }

    #[test]
    fn test_mip_chain_halves_down_to_one_pixel() {
        let base = image::RgbaImage::from_pixel(8, 2, image::Rgba([10, 20, 30, 255]));
        let levels = generate_mip_chain(base);

        let sizes: Vec<_> = levels.iter().map(|l| (l.width, l.height)).collect();
        assert_eq!(sizes, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
        for level in &levels {
            assert_eq!(level.rgba.len(), (level.width * level.height * 4) as usize);
        }
        assert_eq!(&levels[3].rgba[..], &[10, 20, 30, 255]);
    }
}
