//! Transform and uniform dispatch
//!
//! Translates per-object intent (place this, texture it, give it that
//! material, draw it) into named uniform uploads on a [`RenderTarget`],
//! resolving tags through the texture and material registries.

use cgmath::{Vector2, Vector4};

use super::transform::Transform;
use crate::gfx::geometry::MeshKind;
use crate::gfx::resources::{MaterialRegistry, TextureRegistry};
use crate::gfx::shader::{names, RenderTarget};

pub struct UniformDispatcher<'a, T: RenderTarget + ?Sized> {
    textures: &'a TextureRegistry,
    materials: &'a MaterialRegistry,
    target: &'a mut T,
}

impl<'a, T: RenderTarget + ?Sized> UniformDispatcher<'a, T> {
    pub fn new(
        textures: &'a TextureRegistry,
        materials: &'a MaterialRegistry,
        target: &'a mut T,
    ) -> Self {
        Self {
            textures,
            materials,
            target,
        }
    }

    /// Uploads the model matrix for `transform`
    pub fn set_transform(&mut self, transform: &Transform) {
        self.target.set_mat4(names::MODEL, transform.model_matrix());
    }

    /// Switches to a flat RGBA color
    pub fn set_color(&mut self, rgba: [f32; 4]) {
        self.target.set_bool(names::USE_TEXTURE, false);
        self.target.set_vec4(names::OBJECT_COLOR, Vector4::from(rgba));
    }

    /// Switches to the texture registered under `tag`
    ///
    /// An unknown tag disables texturing instead of sampling a bogus unit.
    pub fn set_texture(&mut self, tag: &str) {
        match self.textures.find_slot(tag) {
            Some(unit) => {
                self.target.set_bool(names::USE_TEXTURE, true);
                self.target.set_sampler2d(names::OBJECT_TEXTURE, unit as i32);
            }
            None => {
                log::debug!("texture '{}' is not registered, drawing untextured", tag);
                self.target.set_bool(names::USE_TEXTURE, false);
            }
        }
    }

    pub fn set_uv_scale(&mut self, u: f32, v: f32) {
        self.target.set_vec2(names::UV_SCALE, Vector2::new(u, v));
    }

    /// Uploads the material registered under `tag`; no-op when there is none
    pub fn set_material(&mut self, tag: &str) {
        if self.materials.is_empty() {
            return;
        }
        match self.materials.lookup(tag) {
            Some(material) => material.upload(&mut *self.target),
            None => log::debug!("material '{}' is not defined, keeping the current one", tag),
        }
    }

    pub fn draw_mesh(&mut self, kind: MeshKind) {
        self.target.draw_mesh(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::resources::{
        DecodedImage, ImageDecoder, Material, TextureBackend, TextureHandle,
    };
    use crate::gfx::shader::{TraceEvent, UniformTrace, UniformValue};
    use crate::SceneError;
    use std::path::Path;

    struct SolidDecoder;

    impl ImageDecoder for SolidDecoder {
        fn decode(&self, _path: &Path) -> Result<DecodedImage, SceneError> {
            Ok(DecodedImage {
                pixels: vec![255; 4],
                width: 1,
                height: 1,
                channels: 4,
            })
        }
    }

    #[derive(Default)]
    struct CountingBackend(u32);

    impl TextureBackend for CountingBackend {
        fn upload(
            &mut self,
            _image: &DecodedImage,
            _label: &str,
        ) -> Result<TextureHandle, SceneError> {
            self.0 += 1;
            Ok(TextureHandle(self.0))
        }
        fn bind_unit(&mut self, _unit: u32, _handle: TextureHandle) {}
        fn release(&mut self, _handle: TextureHandle) {}
    }

    fn textures(tags: &[&str]) -> TextureRegistry {
        let mut registry = TextureRegistry::new();
        let mut backend = CountingBackend::default();
        for tag in tags {
            registry
                .load(Path::new("solid.png"), tag, &SolidDecoder, &mut backend)
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_set_texture_resolves_unit() {
        let textures = textures(&["plastic", "wood", "wall"]);
        let materials = MaterialRegistry::new();
        let mut trace = UniformTrace::new();

        UniformDispatcher::new(&textures, &materials, &mut trace).set_texture("wall");

        assert_eq!(trace.last_value(names::USE_TEXTURE), Some(UniformValue::Bool(true)));
        assert_eq!(trace.last_value(names::OBJECT_TEXTURE), Some(UniformValue::Sampler2d(2)));
    }

    #[test]
    fn test_unknown_texture_disables_texturing() {
        let textures = textures(&["wood"]);
        let materials = MaterialRegistry::new();
        let mut trace = UniformTrace::new();

        UniformDispatcher::new(&textures, &materials, &mut trace).set_texture("marble");

        assert_eq!(trace.last_value(names::USE_TEXTURE), Some(UniformValue::Bool(false)));
        assert_eq!(trace.last_value(names::OBJECT_TEXTURE), None);
    }

    #[test]
    fn test_set_color_disables_texturing() {
        let textures = TextureRegistry::new();
        let materials = MaterialRegistry::new();
        let mut trace = UniformTrace::new();

        UniformDispatcher::new(&textures, &materials, &mut trace).set_color([0.1, 0.2, 0.3, 0.4]);

        assert_eq!(
            trace.events(),
            &[
                TraceEvent::Set {
                    name: names::USE_TEXTURE.to_string(),
                    value: UniformValue::Bool(false)
                },
                TraceEvent::Set {
                    name: names::OBJECT_COLOR.to_string(),
                    value: UniformValue::Vec4([0.1, 0.2, 0.3, 0.4])
                },
            ]
        );
    }

    #[test]
    fn test_set_material_ignores_empty_registry_and_unknown_tags() {
        let textures = TextureRegistry::new();
        let mut materials = MaterialRegistry::new();
        let mut trace = UniformTrace::new();

        UniformDispatcher::new(&textures, &materials, &mut trace).set_material("wood");
        assert!(trace.events().is_empty());

        materials.define("wood", Material::default());
        UniformDispatcher::new(&textures, &materials, &mut trace).set_material("glass");
        assert!(trace.events().is_empty());

        UniformDispatcher::new(&textures, &materials, &mut trace).set_material("wood");
        assert_eq!(trace.events().len(), 5);
    }

    #[test]
    fn test_transform_and_draw_forwarded() {
        let textures = TextureRegistry::new();
        let materials = MaterialRegistry::new();
        let mut trace = UniformTrace::new();
        let mut dispatcher = UniformDispatcher::new(&textures, &materials, &mut trace);

        dispatcher.set_transform(&Transform::default());
        dispatcher.set_uv_scale(2.0, 1.0);
        dispatcher.draw_mesh(MeshKind::Torus);

        assert_eq!(trace.events().len(), 3);
        assert_eq!(trace.last_value(names::UV_SCALE), Some(UniformValue::Vec2([2.0, 1.0])));
        assert_eq!(trace.events()[2], TraceEvent::Draw(MeshKind::Torus));
    }
}
