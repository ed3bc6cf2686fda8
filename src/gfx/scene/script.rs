//! # Scene Script
//!
//! The scene is data: an ordered list of named passes, each an ordered list
//! of draw directives. One routine, [`SceneScript::render`], replays it
//! through a [`UniformDispatcher`].
//!
//! ```rust
//! use desk_scene::gfx::geometry::MeshKind;
//! use desk_scene::gfx::scene::script::{Directive, Pass, SceneScript};
//!
//! let script = SceneScript::new(vec![Pass::new(
//!     "floor",
//!     vec![Directive::new("floor", MeshKind::Plane)
//!         .scale([20.0, 1.0, 10.0])
//!         .texture("wood")
//!         .material("wood")],
//! )]);
//! assert_eq!(script.directive_count(), 1);
//! ```

use super::dispatcher::UniformDispatcher;
use super::transform::Transform;
use crate::gfx::geometry::MeshKind;
use crate::gfx::resources::{MaterialRegistry, TextureRegistry};
use crate::gfx::shader::RenderTarget;

/// How a directive colors its mesh
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    Texture { tag: String, uv_scale: [f32; 2] },
    Color([f32; 4]),
}

/// One object: where it goes, what it looks like, which mesh to draw
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub label: String,
    pub mesh: MeshKind,
    pub transform: Transform,
    pub surface: Surface,
    pub material: Option<String>,
}

impl Directive {
    /// Untransformed, opaque white, no material
    pub fn new(label: &str, mesh: MeshKind) -> Self {
        Self {
            label: label.to_string(),
            mesh,
            transform: Transform::default(),
            surface: Surface::Color([1.0; 4]),
            material: None,
        }
    }

    pub fn scale(mut self, scale: [f32; 3]) -> Self {
        self.transform.scale = scale;
        self
    }

    /// Rotation about X, Y and Z in degrees
    pub fn rotation(mut self, degrees: [f32; 3]) -> Self {
        self.transform.rotation_degrees = degrees;
        self
    }

    pub fn position(mut self, position: [f32; 3]) -> Self {
        self.transform.position = position;
        self
    }

    /// Textured with a UV scale of (1, 1)
    pub fn texture(self, tag: &str) -> Self {
        self.texture_scaled(tag, [1.0, 1.0])
    }

    pub fn texture_scaled(mut self, tag: &str, uv_scale: [f32; 2]) -> Self {
        self.surface = Surface::Texture {
            tag: tag.to_string(),
            uv_scale,
        };
        self
    }

    pub fn color(mut self, rgba: [f32; 4]) -> Self {
        self.surface = Surface::Color(rgba);
        self
    }

    pub fn material(mut self, tag: &str) -> Self {
        self.material = Some(tag.to_string());
        self
    }

    fn apply<T: RenderTarget + ?Sized>(&self, dispatcher: &mut UniformDispatcher<'_, T>) {
        dispatcher.set_transform(&self.transform);
        match &self.surface {
            Surface::Texture { tag, uv_scale } => {
                dispatcher.set_texture(tag);
                dispatcher.set_uv_scale(uv_scale[0], uv_scale[1]);
            }
            Surface::Color(rgba) => dispatcher.set_color(*rgba),
        }
        if let Some(material) = &self.material {
            dispatcher.set_material(material);
        }
        dispatcher.draw_mesh(self.mesh);
    }
}

/// A named group of directives, drawn in order
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    pub name: String,
    pub directives: Vec<Directive>,
}

impl Pass {
    pub fn new(name: &str, directives: Vec<Directive>) -> Self {
        Self {
            name: name.to_string(),
            directives,
        }
    }
}

/// A directive naming a tag that neither registry knows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReference {
    Texture { directive: String, tag: String },
    Material { directive: String, tag: String },
}

impl std::fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnresolvedReference::Texture { directive, tag } => {
                write!(f, "'{}' uses unknown texture '{}'", directive, tag)
            }
            UnresolvedReference::Material { directive, tag } => {
                write!(f, "'{}' uses unknown material '{}'", directive, tag)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneScript {
    passes: Vec<Pass>,
}

impl SceneScript {
    pub fn new(passes: Vec<Pass>) -> Self {
        Self { passes }
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn directives(&self) -> impl Iterator<Item = &Directive> {
        self.passes.iter().flat_map(|pass| pass.directives.iter())
    }

    pub fn directive_count(&self) -> usize {
        self.passes.iter().map(|pass| pass.directives.len()).sum()
    }

    /// Replays every pass in order onto `target`
    pub fn render<T: RenderTarget + ?Sized>(
        &self,
        textures: &TextureRegistry,
        materials: &MaterialRegistry,
        target: &mut T,
    ) {
        let mut dispatcher = UniformDispatcher::new(textures, materials, target);
        for pass in &self.passes {
            log::trace!("pass '{}' ({} directives)", pass.name, pass.directives.len());
            for directive in &pass.directives {
                directive.apply(&mut dispatcher);
            }
        }
    }

    /// Every texture or material tag that does not resolve, in script order
    pub fn validate(
        &self,
        textures: &TextureRegistry,
        materials: &MaterialRegistry,
    ) -> Vec<UnresolvedReference> {
        let mut unresolved = Vec::new();
        for directive in self.directives() {
            if let Surface::Texture { tag, .. } = &directive.surface {
                if textures.find_slot(tag).is_none() {
                    unresolved.push(UnresolvedReference::Texture {
                        directive: directive.label.clone(),
                        tag: tag.clone(),
                    });
                }
            }
            if let Some(tag) = &directive.material {
                if materials.lookup(tag).is_none() {
                    unresolved.push(UnresolvedReference::Material {
                        directive: directive.label.clone(),
                        tag: tag.clone(),
                    });
                }
            }
        }
        unresolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::resources::Material;
    use crate::gfx::shader::names;
    use crate::gfx::shader::{TraceEvent, UniformTrace, UniformValue};

    fn two_pass_script() -> SceneScript {
        SceneScript::new(vec![
            Pass::new(
                "first",
                vec![
                    Directive::new("floor", MeshKind::Plane).texture("wood").material("wood"),
                    Directive::new("ball", MeshKind::Sphere).color([1.0, 0.0, 0.0, 1.0]),
                ],
            ),
            Pass::new(
                "second",
                vec![Directive::new("panel", MeshKind::Box)
                    .color([0.7, 0.7, 0.8, 0.3])
                    .material("glass")],
            ),
        ])
    }

    #[test]
    fn test_render_draws_in_script_order() {
        let mut trace = UniformTrace::new();
        two_pass_script().render(&TextureRegistry::new(), &MaterialRegistry::new(), &mut trace);

        let draws: Vec<_> = trace
            .events()
            .iter()
            .filter_map(|event| match event {
                TraceEvent::Draw(kind) => Some(*kind),
                _ => None,
            })
            .collect();
        assert_eq!(draws, vec![MeshKind::Plane, MeshKind::Sphere, MeshKind::Box]);
    }

    #[test]
    fn test_directive_uploads_transform_surface_material_then_draws() {
        let mut materials = MaterialRegistry::new();
        materials.define("glass", Material::default());
        let script = SceneScript::new(vec![Pass::new(
            "only",
            vec![Directive::new("panel", MeshKind::Box)
                .position([1.0, 2.0, 3.0])
                .color([0.7, 0.7, 0.8, 0.3])
                .material("glass")],
        )]);

        let mut trace = UniformTrace::new();
        script.render(&TextureRegistry::new(), &materials, &mut trace);

        let events = trace.events();
        assert!(matches!(&events[0], TraceEvent::Set { name, .. } if name == names::MODEL));
        assert!(matches!(&events[1], TraceEvent::Set { name, .. } if name == names::USE_TEXTURE));
        assert!(matches!(&events[2], TraceEvent::Set { name, .. } if name == names::OBJECT_COLOR));
        assert_eq!(events.len(), 3 + 5 + 1);
        assert_eq!(events.last(), Some(&TraceEvent::Draw(MeshKind::Box)));
        assert_eq!(
            trace.last_value(names::OBJECT_COLOR),
            Some(UniformValue::Vec4([0.7, 0.7, 0.8, 0.3]))
        );
    }

    #[test]
    fn test_replay_is_deterministic() {
        let script = two_pass_script();
        let textures = TextureRegistry::new();
        let mut materials = MaterialRegistry::new();
        materials.define("wood", Material::default());

        let mut first = UniformTrace::new();
        let mut second = UniformTrace::new();
        script.render(&textures, &materials, &mut first);
        script.render(&textures, &materials, &mut second);

        assert_eq!(first, second);
    }

    #[test]
    fn test_validate_reports_unknown_tags() {
        let mut materials = MaterialRegistry::new();
        materials.define("wood", Material::default());

        let unresolved = two_pass_script().validate(&TextureRegistry::new(), &materials);

        assert_eq!(
            unresolved,
            vec![
                UnresolvedReference::Texture {
                    directive: "floor".to_string(),
                    tag: "wood".to_string()
                },
                UnresolvedReference::Material {
                    directive: "panel".to_string(),
                    tag: "glass".to_string()
                },
            ]
        );
        assert_eq!(unresolved[1].to_string(), "'panel' uses unknown material 'glass'");
    }
}
