//! GPU resource management
//!
//! Handles textures, materials, and the global uniform bind group.

pub mod global_bindings;
pub mod material;
pub mod texture_registry;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{GlobalBindings, GlobalUBO, GlobalUBOContent, LightUniform};
pub use material::{Material, MaterialRegistry};
pub use texture_registry::{
    DecodedImage, GpuTextureStore, HeadlessTextureStore, ImageDecoder, ImageFileDecoder,
    TextureBackend, TextureHandle, TextureRegistry, TEXTURE_CAPACITY,
};
pub use texture_resource::TextureResource;
