//! Scene light sources
//!
//! Up to [`MAX_LIGHTS`] point lights, pushed straight into the
//! `lightSources[i]` uniforms.

use cgmath::Vector3;

use crate::error::SceneError;
use crate::gfx::shader::names::{self, MAX_LIGHTS};
use crate::gfx::shader::ShaderUniforms;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    pub position: [f32; 3],
    pub ambient_color: [f32; 3],
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    /// Specular exponent applied to this light's highlights
    pub focal_strength: f32,
    pub specular_intensity: f32,
}

impl LightSource {
    fn upload(&self, index: usize, uniforms: &mut (impl ShaderUniforms + ?Sized)) {
        let field = |name: &str| names::light_field(index, name);

        uniforms.set_vec3(&field(names::LIGHT_POSITION), Vector3::from(self.position));
        uniforms.set_vec3(&field(names::LIGHT_AMBIENT_COLOR), Vector3::from(self.ambient_color));
        uniforms.set_vec3(&field(names::LIGHT_DIFFUSE_COLOR), Vector3::from(self.diffuse_color));
        uniforms.set_vec3(&field(names::LIGHT_SPECULAR_COLOR), Vector3::from(self.specular_color));
        uniforms.set_float(&field(names::LIGHT_FOCAL_STRENGTH), self.focal_strength);
        uniforms.set_float(&field(names::LIGHT_SPECULAR_INTENSITY), self.specular_intensity);
    }
}

#[derive(Debug, Clone, Default)]
pub struct SceneLights {
    lights: Vec<LightSource>,
}

impl SceneLights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a light and returns its index
    pub fn add(&mut self, light: LightSource) -> Result<usize, SceneError> {
        if self.lights.len() >= MAX_LIGHTS {
            return Err(SceneError::TooManyLights { max: MAX_LIGHTS });
        }
        self.lights.push(light);
        Ok(self.lights.len() - 1)
    }

    /// Enables lighting and uploads every light
    pub fn apply(&self, uniforms: &mut (impl ShaderUniforms + ?Sized)) {
        uniforms.set_bool(names::USE_LIGHTING, true);
        for (index, light) in self.lights.iter().enumerate() {
            light.upload(index, uniforms);
        }
        log::debug!("applied {} light sources", self.lights.len());
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LightSource> {
        self.lights.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::shader::{UniformTrace, UniformValue};

    fn light(x: f32) -> LightSource {
        LightSource {
            position: [x, 3.0, 20.0],
            ambient_color: [0.2; 3],
            diffuse_color: [0.8; 3],
            specular_color: [0.0; 3],
            focal_strength: 12.0,
            specular_intensity: 0.2,
        }
    }

    #[test]
    fn test_fifth_light_is_rejected() {
        let mut lights = SceneLights::new();
        for i in 0..MAX_LIGHTS {
            assert_eq!(lights.add(light(i as f32)).unwrap(), i);
        }
        let err = lights.add(light(9.0)).unwrap_err();
        assert!(matches!(err, SceneError::TooManyLights { max: 4 }));
        assert_eq!(lights.len(), MAX_LIGHTS);
    }

    #[test]
    fn test_apply_enables_lighting_and_uploads_fields() {
        let mut lights = SceneLights::new();
        lights.add(light(1.0)).unwrap();
        lights.add(light(-1.0)).unwrap();

        let mut trace = UniformTrace::new();
        lights.apply(&mut trace);

        assert_eq!(trace.events().len(), 1 + 2 * 6);
        assert_eq!(trace.last_value(names::USE_LIGHTING), Some(UniformValue::Bool(true)));
        assert_eq!(
            trace.last_value("lightSources[1].position"),
            Some(UniformValue::Vec3([-1.0, 3.0, 20.0]))
        );
        assert_eq!(
            trace.last_value("lightSources[0].focalStrength"),
            Some(UniformValue::Float(12.0))
        );
    }
}
