use std::path::Path;

use super::desk;
use super::lights::{LightSource, SceneLights};
use super::script::{SceneScript, UnresolvedReference};
use crate::gfx::resources::{
    ImageDecoder, Material, MaterialRegistry, TextureBackend, TextureRegistry,
};
use crate::gfx::shader::{RenderTarget, ShaderUniforms};

/// Outcome of [`Scene::prepare`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupReport {
    /// Number of textures now registered
    pub loaded: usize,
    /// Tags whose texture could not be loaded
    pub failed: Vec<String>,
    pub unresolved: Vec<UnresolvedReference>,
}

impl SetupReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.unresolved.is_empty()
    }
}

/// Static scene: what to load, which materials and lights to use, and the
/// script that draws it
pub struct Scene {
    manifest: Vec<(String, String)>,
    material_defs: Vec<(String, Material)>,
    light_defs: Vec<LightSource>,
    script: SceneScript,
    textures: TextureRegistry,
    materials: MaterialRegistry,
    lights: SceneLights,
}

impl Scene {
    pub fn new(
        manifest: Vec<(String, String)>,
        material_defs: Vec<(String, Material)>,
        light_defs: Vec<LightSource>,
        script: SceneScript,
    ) -> Self {
        Self {
            manifest,
            material_defs,
            light_defs,
            script,
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            lights: SceneLights::new(),
        }
    }

    /// The desk, PC and monitor scene
    pub fn desk() -> Self {
        Self::new(
            desk::TEXTURE_MANIFEST
                .iter()
                .map(|(tag, file)| (tag.to_string(), file.to_string()))
                .collect(),
            desk::materials()
                .into_iter()
                .map(|(tag, material)| (tag.to_string(), material))
                .collect(),
            desk::lights(),
            desk::script(),
        )
    }

    /// Loads textures, defines materials and uploads the lights
    ///
    /// Texture failures are logged and skipped; every directive referencing
    /// a tag that did not resolve is reported once. Calling this again
    /// releases the previous textures first.
    pub fn prepare(
        &mut self,
        texture_dir: &Path,
        decoder: &dyn ImageDecoder,
        backend: &mut dyn TextureBackend,
        uniforms: &mut (impl ShaderUniforms + ?Sized),
    ) -> SetupReport {
        if !self.textures.is_empty() {
            self.textures.release_all(backend);
        }
        self.materials = MaterialRegistry::new();
        self.lights = SceneLights::new();

        let mut report = SetupReport::default();
        for (tag, file) in &self.manifest {
            if self
                .textures
                .load(&texture_dir.join(file), tag, decoder, backend)
                .is_err()
            {
                report.failed.push(tag.clone());
            }
        }
        self.textures.bind_all(backend);
        report.loaded = self.textures.len();

        for (tag, material) in &self.material_defs {
            self.materials.define(tag, *material);
        }

        for light in &self.light_defs {
            if let Err(err) = self.lights.add(*light) {
                log::warn!("light at {:?} skipped: {}", light.position, err);
            }
        }
        self.lights.apply(uniforms);

        report.unresolved = self.script.validate(&self.textures, &self.materials);
        for reference in &report.unresolved {
            log::warn!("{}", reference);
        }

        log::info!(
            "scene ready: {} textures, {} materials, {} lights, {} directives",
            report.loaded,
            self.materials.len(),
            self.lights.len(),
            self.script.directive_count()
        );
        report
    }

    /// Replays the script onto `target`
    pub fn render<T: RenderTarget + ?Sized>(&self, target: &mut T) {
        self.script.render(&self.textures, &self.materials, target);
    }

    /// Releases every loaded texture
    pub fn teardown(&mut self, backend: &mut dyn TextureBackend) {
        self.textures.release_all(backend);
    }

    pub fn script(&self) -> &SceneScript {
        &self.script
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn lights(&self) -> &SceneLights {
        &self.lights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;
    use crate::gfx::resources::{DecodedImage, TextureHandle};
    use crate::gfx::shader::names;
    use crate::gfx::shader::{UniformTrace, UniformValue};
    use std::collections::HashSet;
    use std::path::PathBuf;

    /// Decodes every file to a 1x1 RGB pixel, except the ones listed as missing
    #[derive(Default)]
    struct FakeDecoder {
        missing: HashSet<String>,
    }

    impl ImageDecoder for FakeDecoder {
        fn decode(&self, path: &Path) -> Result<DecodedImage, SceneError> {
            let file = path.file_name().and_then(|f| f.to_str()).unwrap_or_default();
            if self.missing.contains(file) {
                return Err(SceneError::ImageDecode {
                    path: path.to_path_buf(),
                    source: image::ImageError::IoError(std::io::ErrorKind::NotFound.into()),
                });
            }
            Ok(DecodedImage {
                pixels: vec![128; 3],
                width: 1,
                height: 1,
                channels: 3,
            })
        }
    }

    #[derive(Default)]
    struct FakeBackend {
        next: u32,
        bound: Vec<(u32, TextureHandle)>,
        released: Vec<TextureHandle>,
    }

    impl TextureBackend for FakeBackend {
        fn upload(
            &mut self,
            _image: &DecodedImage,
            _label: &str,
        ) -> Result<TextureHandle, SceneError> {
            self.next += 1;
            Ok(TextureHandle(self.next))
        }
        fn bind_unit(&mut self, unit: u32, handle: TextureHandle) {
            self.bound.push((unit, handle));
        }
        fn release(&mut self, handle: TextureHandle) {
            self.released.push(handle);
        }
    }

    fn prepared(decoder: &FakeDecoder) -> (Scene, FakeBackend, UniformTrace, SetupReport) {
        let mut scene = Scene::desk();
        let mut backend = FakeBackend::default();
        let mut trace = UniformTrace::new();
        let report = scene.prepare(&PathBuf::from("textures"), decoder, &mut backend, &mut trace);
        (scene, backend, trace, report)
    }

    #[test]
    fn test_prepare_loads_whole_desk() {
        let (scene, backend, trace, report) = prepared(&FakeDecoder::default());

        assert!(report.is_complete(), "{:?}", report);
        assert_eq!(report.loaded, 16);
        assert_eq!(backend.bound.len(), 16);
        assert_eq!(scene.materials().len(), 5);
        assert_eq!(scene.lights().len(), 3);
        assert_eq!(trace.last_value(names::USE_LIGHTING), Some(UniformValue::Bool(true)));
        assert_eq!(
            trace.last_value("lightSources[2].focalStrength"),
            Some(UniformValue::Float(12.0))
        );
    }

    #[test]
    fn test_missing_texture_is_reported_not_fatal() {
        let decoder = FakeDecoder {
            missing: HashSet::from(["Riolu.jpg".to_string()]),
        };
        let (scene, _backend, _trace, report) = prepared(&decoder);

        assert_eq!(report.loaded, 15);
        assert_eq!(report.failed, vec!["PKMN".to_string()]);
        assert_eq!(
            report.unresolved,
            vec![UnresolvedReference::Texture {
                directive: "cooler screen".to_string(),
                tag: "PKMN".to_string()
            }]
        );
        // later textures shift down one unit
        assert_eq!(scene.textures().find_slot("rgb"), Some(8));
    }

    #[test]
    fn test_render_replays_identically() {
        let (scene, _backend, _trace, _report) = prepared(&FakeDecoder::default());

        let mut first = UniformTrace::new();
        let mut second = UniformTrace::new();
        scene.render(&mut first);
        scene.render(&mut second);

        assert_eq!(first.draw_count(), 44);
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_teardown_releases_every_texture_once() {
        let (mut scene, mut backend, _trace, _report) = prepared(&FakeDecoder::default());

        scene.teardown(&mut backend);
        scene.teardown(&mut backend);

        let unique: HashSet<_> = backend.released.iter().collect();
        assert_eq!(backend.released.len(), 16);
        assert_eq!(unique.len(), 16);
        assert!(scene.textures().is_empty());
    }

    #[test]
    fn test_prepare_twice_releases_previous_textures() {
        let decoder = FakeDecoder::default();
        let mut scene = Scene::desk();
        let mut backend = FakeBackend::default();
        let mut trace = UniformTrace::new();

        scene.prepare(Path::new("textures"), &decoder, &mut backend, &mut trace);
        let report = scene.prepare(Path::new("textures"), &decoder, &mut backend, &mut trace);

        assert_eq!(report.loaded, 16);
        assert_eq!(backend.released.len(), 16);
        assert_eq!(scene.materials().len(), 5);
    }
}
