//! Material system for Phong shading
//!
//! Materials are named presets of the five `material.*` uniforms. They are
//! stored in a [`MaterialRegistry`] during setup and referenced by tag from
//! the scene script.

use cgmath::Vector3;

use crate::gfx::shader::{names, ShaderUniforms};

/// Phong material properties
///
/// Colors are linear RGB in `[0, 1]`; `shininess` is the specular exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient_color: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient_color: [0.1, 0.1, 0.1],
            ambient_strength: 0.2,
            diffuse_color: [0.8, 0.8, 0.8],
            specular_color: [0.0, 0.0, 0.0],
            shininess: 1.0,
        }
    }
}

impl Material {
    /// Creates a material from its five properties
    ///
    /// # Arguments
    /// * `ambient_color` - Color reflected under ambient light
    /// * `ambient_strength` - Scale applied to the ambient term
    /// * `diffuse_color` - Color reflected under direct light
    /// * `specular_color` - Color of highlights
    /// * `shininess` - Specular exponent (higher = tighter highlight)
    pub fn new(
        ambient_color: [f32; 3],
        ambient_strength: f32,
        diffuse_color: [f32; 3],
        specular_color: [f32; 3],
        shininess: f32,
    ) -> Self {
        Self {
            ambient_color,
            ambient_strength,
            diffuse_color,
            specular_color,
            shininess,
        }
    }

    /// Uploads the five `material.*` uniforms
    pub fn upload(&self, uniforms: &mut (impl ShaderUniforms + ?Sized)) {
        uniforms.set_vec3(names::MATERIAL_AMBIENT_COLOR, Vector3::from(self.ambient_color));
        uniforms.set_float(names::MATERIAL_AMBIENT_STRENGTH, self.ambient_strength);
        uniforms.set_vec3(names::MATERIAL_DIFFUSE_COLOR, Vector3::from(self.diffuse_color));
        uniforms.set_vec3(names::MATERIAL_SPECULAR_COLOR, Vector3::from(self.specular_color));
        uniforms.set_float(names::MATERIAL_SHININESS, self.shininess);
    }
}

/// Ordered tag to material table
///
/// Populated during setup and read-only while rendering. Tags may repeat;
/// only the first definition of a tag is ever returned.
#[derive(Debug, Default, Clone)]
pub struct MaterialRegistry {
    entries: Vec<(String, Material)>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a material under `tag`
    pub fn define(&mut self, tag: &str, material: Material) {
        log::debug!("define material '{}'", tag);
        self.entries.push((tag.to_string(), material));
    }

    /// First material registered under `tag`, or `None` when no entry matches
    pub fn lookup(&self, tag: &str) -> Option<&Material> {
        self.entries
            .iter()
            .find(|(entry_tag, _)| entry_tag == tag)
            .map(|(_, material)| material)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::shader::{UniformTrace, UniformValue};

    fn metal() -> Material {
        Material::new([0.2, 0.2, 0.2], 0.3, [0.2, 0.2, 0.2], [0.5, 0.5, 0.5], 25.0)
    }

    #[test]
    fn test_lookup_on_empty_registry_is_none() {
        let registry = MaterialRegistry::new();
        assert!(registry.lookup("metal").is_none());
    }

    #[test]
    fn test_first_definition_wins() {
        let mut registry = MaterialRegistry::new();
        let first = metal();
        let second = Material {
            shininess: 90.0,
            ..metal()
        };
        registry.define("metal", first);
        registry.define("metal", second);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup("metal"), Some(&first));
    }

    #[test]
    fn test_unmatched_tag_is_none_on_non_empty_registry() {
        let mut registry = MaterialRegistry::new();
        registry.define("metal", metal());
        registry.define("wood", Material::default());

        assert!(registry.lookup("glass").is_none());
        assert!(registry.lookup("Metal").is_none());
    }

    #[test]
    fn test_upload_pushes_all_five_fields() {
        let mut trace = UniformTrace::new();
        metal().upload(&mut trace);

        assert_eq!(trace.events().len(), 5);
        assert_eq!(
            trace.last_value(names::MATERIAL_SHININESS),
            Some(UniformValue::Float(25.0))
        );
        assert_eq!(
            trace.last_value(names::MATERIAL_SPECULAR_COLOR),
            Some(UniformValue::Vec3([0.5, 0.5, 0.5]))
        );
    }
}
