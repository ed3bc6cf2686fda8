//! The desk scene: textures, materials, lights and the seven draw passes
//!
//! Units are arbitrary; the desk top spans x in [-10, 10] and z in [-5, 5]
//! at y = 0, the PC case stands on its right, the monitor on its left.

use super::lights::LightSource;
use super::script::{Directive, Pass, SceneScript};
use crate::gfx::geometry::MeshKind::{self, Box, Cylinder, Plane, Prism, Sphere, Torus};
use crate::gfx::resources::Material;

/// Texture tag and the file it is loaded from, in texture-unit order
pub const TEXTURE_MANIFEST: [(&str, &str); 16] = [
    ("plastic", "plastic_dark_seamless.jpg"),
    ("wood", "wood_knots_seamlessr.jpg"),
    ("wall", "greywall.jpg"),
    ("pad", "rubber_circles_seamless.jpg"),
    ("pad2", "screen_wallpaper_2.jpg"),
    ("screen", "PCscreen.jpg"),
    ("metal", "blackmetal.jpg"),
    ("mb", "motherboard.jpg"),
    ("PKMN", "Riolu.jpg"),
    ("rgb", "rainbowFade.jpg"),
    ("mbb", "motherboardback.jpeg"),
    ("blue", "blue.jpg"),
    ("pink", "pink.jpg"),
    ("keyboard", "Keyboardtop.jpg"),
    ("ram", "RAMside.jpg"),
    ("blackpl", "blackplasticmaterial.jpg"),
];

const DARK_GREY: [f32; 4] = [0.071, 0.071, 0.071, 1.0];
const MAGENTA: [f32; 4] = [0.949, 0.184, 0.863, 1.0];
const GLASS_TINT: [f32; 4] = [0.7, 0.7, 0.8, 0.3];

fn grey(v: f32) -> [f32; 3] {
    [v, v, v]
}

pub fn materials() -> Vec<(&'static str, Material)> {
    vec![
        ("metal", Material::new(grey(0.2), 0.3, grey(0.2), grey(0.5), 25.0)),
        ("wood", Material::new(grey(0.1), 0.2, grey(0.3), grey(0.1), 0.3)),
        ("glass", Material::new(grey(0.4), 0.3, grey(0.3), grey(0.6), 85.0)),
        ("walls", Material::new(grey(0.1), 0.2, grey(0.5), grey(0.1), 0.0)),
        (
            "plastic",
            Material::new(grey(0.1), 0.1, [0.3, 0.2, 0.3], [0.4, 0.2, 0.2], 0.5),
        ),
    ]
}

/// Two magenta case lights above the PC and monitor, one white fill light in front
pub fn lights() -> Vec<LightSource> {
    let case_light = |x: f32| LightSource {
        position: [x, 15.79, 1.9],
        ambient_color: grey(0.2),
        diffuse_color: [0.949, 0.184, 0.863],
        specular_color: [0.949, 0.184, 0.863],
        focal_strength: 1.0,
        specular_intensity: 15.0,
    };

    vec![
        case_light(13.5),
        case_light(-13.5),
        LightSource {
            position: [0.0, 3.0, 20.0],
            ambient_color: grey(0.2),
            diffuse_color: grey(0.8),
            specular_color: grey(0.0),
            focal_strength: 12.0,
            specular_intensity: 0.2,
        },
    ]
}

/// Shorthand for the common scale / rotation / position triple
fn place(
    label: &str,
    mesh: MeshKind,
    scale: [f32; 3],
    rotation: [f32; 3],
    position: [f32; 3],
) -> Directive {
    Directive::new(label, mesh)
        .scale(scale)
        .rotation(rotation)
        .position(position)
}

const NO_ROTATION: [f32; 3] = [0.0, 0.0, 0.0];

fn desk_and_walls() -> Pass {
    Pass::new(
        "desk and walls",
        vec![
            place("back wall", Plane, [20.0, 1.0, 10.0], [90.0, 0.0, 0.0], [0.0, 10.0, -10.0])
                .texture("wall")
                .material("walls"),
            place("side wall", Plane, [10.0, 1.0, 10.0], [0.0, 0.0, 90.0], [20.0, 10.0, 0.0])
                .texture("wall")
                .material("walls"),
            place("desk top", Plane, [20.0, 1.0, 10.0], NO_ROTATION, [0.0, 0.0, 0.0])
                .texture("wood")
                .material("wood"),
        ],
    )
}

fn keyboard_and_mat() -> Pass {
    Pass::new(
        "keyboard and mat",
        vec![
            place("mouse mat", Box, [31.0, 0.1, 10.0], NO_ROTATION, [-4.0, 0.1, 4.5])
                .texture("pad2"),
            place("keyboard keys", Box, [14.0, 0.5, 5.0], NO_ROTATION, [-8.0, 0.3, 4.5])
                .texture("keyboard")
                .material("plastic"),
            place("keyboard wedge", Prism, [1.0, 14.0, 0.5], [90.0, 180.0, 90.0], [-8.0, 0.3, 7.0])
                .texture("plastic")
                .material("plastic"),
            place("keyboard body", Box, [14.01, 0.49, 5.01], NO_ROTATION, [-8.0, 0.3, 4.5])
                .texture("plastic")
                .material("plastic"),
        ],
    )
}

fn mouse() -> Pass {
    Pass::new(
        "mouse",
        vec![
            place("mouse base", Cylinder, [1.0, 0.3, 2.0], NO_ROTATION, [2.0, 0.2, 4.5])
                .texture("blackpl")
                .material("plastic"),
            place("mouse shell", Sphere, [1.0, 0.5, 2.0], NO_ROTATION, [2.0, 0.5, 4.5])
                .texture("blackpl")
                .material("plastic"),
            place("scroll wheel", Torus, [0.35, 0.35, 0.35], [0.0, 90.0, 0.0], [2.0, 0.67, 3.7])
                .color(DARK_GREY),
            place("dpi button", Box, [0.15, 0.15, 0.15], [180.0, 0.0, 0.0], [2.0, 0.95, 4.2])
                .color(DARK_GREY),
            place("side button front", Box, [0.15, 0.3, 0.15], [90.0, 0.0, 0.0], [1.15, 0.7, 4.9])
                .color(DARK_GREY),
            place("side button back", Box, [0.15, 0.3, 0.15], [90.0, 0.0, 0.0], [1.14, 0.7, 4.5])
                .color(DARK_GREY),
            place("underglow", Torus, [1.0, 1.8, 0.5], [90.0, 0.0, 0.0], [2.0, 0.1, 4.5])
                .color(MAGENTA),
        ],
    )
}

fn pc_exterior() -> Pass {
    let foot = |label: &str, position: [f32; 3]| {
        place(label, Cylinder, [0.15, 0.63, 0.5], NO_ROTATION, position)
            .color(DARK_GREY)
            .material("plastic")
    };
    let panel = |label: &str, scale: [f32; 3], rotation: [f32; 3], position: [f32; 3]| {
        place(label, Box, scale, rotation, position)
            .texture("metal")
            .material("metal")
    };

    Pass::new(
        "pc exterior",
        vec![
            foot("front left foot", [11.0, 0.1, 8.5]),
            foot("back left foot", [11.0, 0.0, -4.5]),
            foot("front right foot", [16.0, 0.0, 8.5]),
            foot("back right foot", [16.0, 0.0, -4.5]),
            panel("case bottom", [6.0, 0.3, 14.8], NO_ROTATION, [13.5, 0.71, 1.9]),
            panel("case top", [6.0, 0.3, 14.8], NO_ROTATION, [13.5, 10.79, 1.9]),
            panel("case back", [6.0, 0.3, 9.8], [90.0, 0.0, 0.0], [13.5, 5.75, -5.349]),
            panel("case side", [14.5, 0.3, 9.8], [90.0, 0.0, 90.0], [16.35, 5.75, 2.05]),
            place("motherboard", Box, [7.25, 0.25, 7.25], [90.0, 0.0, 90.0], [16.3, 6.3, -1.55])
                .texture("mb")
                .material("metal"),
            panel("case front", [5.404, 0.3, 9.8], [90.0, 0.0, 0.0], [13.5, 5.75, 8.649]),
        ],
    )
}

fn pc_interior() -> Pass {
    let fan = |label: &str, y: f32, tag: &str| {
        place(label, Torus, [1.2, 1.2, 2.0], [0.0, 0.0, 90.0], [13.5, y, 8.649])
            .texture(tag)
            .material("wood")
    };

    Pass::new(
        "pc interior",
        vec![
            place("cpu cooler", Cylinder, [1.3, 1.3, 1.3], [0.0, 0.0, 90.0], [16.3, 7.4, -1.7])
                .texture("plastic")
                .material("plastic"),
            place("cooler screen", Cylinder, [1.0, 1.0, 1.0], [0.0, 0.0, 90.0], [15.96, 7.4, -1.7])
                .texture("PKMN")
                .material("plastic"),
            place("cooler cover", Torus, [1.0, 1.0, 1.0], [90.0, 90.0, 90.0], [15.1, 7.4, -1.7])
                .texture("plastic")
                .material("plastic"),
            place("ram left", Box, [4.0, 1.0, 0.2], [0.0, 0.0, 90.0], [15.8, 7.49, 0.03])
                .texture("ram")
                .material("plastic"),
            place("ram right", Box, [4.0, 1.0, 0.2], [0.0, 0.0, 90.0], [15.8, 7.49, 0.58])
                .texture("ram")
                .material("plastic"),
            place("ram rgb right", Box, [0.2, 4.0, 0.2], NO_ROTATION, [15.2, 7.49, 0.58])
                .texture("rgb")
                .material("plastic"),
            place("ram rgb left", Box, [0.2, 4.0, 0.2], NO_ROTATION, [15.2, 7.49, 0.03])
                .texture("rgb")
                .material("plastic"),
            place("io backplate", Box, [1.2, 4.6, 0.9], [0.0, 90.0, 0.0], [15.8, 7.65, -4.58])
                .texture("mbb")
                .material("metal"),
            place(
                "io backplate frame",
                Box,
                [1.3, 4.7, 1.0],
                [0.0, 90.0, 0.0],
                [15.86, 7.65, -4.58],
            )
            .texture("metal")
            .material("metal"),
            fan("middle fan", 5.75, "pink"),
            fan("top fan", 9.0, "blue"),
            fan("bottom fan", 2.5, "blue"),
            place("power supply", Box, [5.0, 2.0, 12.0], NO_ROTATION, [13.8, 1.7, 0.7])
                .texture("metal")
                .material("metal"),
        ],
    )
}

fn monitor() -> Pass {
    Pass::new(
        "monitor",
        vec![
            place("monitor foot", Prism, [9.0, 0.5, 5.0], [0.0, 180.0, 0.0], [-4.0, 0.3, -3.5])
                .texture("plastic")
                .material("plastic"),
            place("monitor stand", Box, [1.15, 6.3, 1.15], [0.0, 45.0, 0.0], [-4.0, 3.3, -3.5])
                .texture("plastic")
                .material("plastic"),
            place("monitor mount", Box, [1.0, 1.0, 0.85], NO_ROTATION, [-4.0, 5.95, -2.85])
                .texture("plastic")
                .material("plastic"),
            place("monitor screen", Box, [12.0, 0.1, 6.0], [90.0, 0.0, 0.0], [-4.0, 5.95, -2.223])
                .texture("screen")
                .material("metal"),
            place("monitor bezel", Box, [12.25, 0.25, 6.25], [90.0, 0.0, 0.0], [-4.0, 5.95, -2.3])
                .texture("plastic")
                .material("plastic"),
        ],
    )
}

/// Translucent panels; drawn last so they blend over everything else
fn glass() -> Pass {
    Pass::new(
        "glass",
        vec![
            place("side glass", Box, [14.5, 0.3, 9.8], [90.0, 0.0, 90.0], [10.65, 5.75, 2.05])
                .color(GLASS_TINT)
                .material("glass"),
            place("front glass", Box, [5.404, 0.05, 9.8], [90.0, 0.0, 0.0], [13.5, 5.75, 9.289])
                .color(GLASS_TINT)
                .material("glass"),
        ],
    )
}

pub fn script() -> SceneScript {
    SceneScript::new(vec![
        desk_and_walls(),
        keyboard_and_mat(),
        mouse(),
        pc_exterior(),
        pc_interior(),
        monitor(),
        glass(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::resources::{MaterialRegistry, TextureRegistry};
    use crate::gfx::scene::script::Surface;
    use crate::gfx::scene::Transform;
    use crate::gfx::shader::{names, TraceEvent, UniformTrace, UniformValue};
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_script_has_seven_passes_with_glass_last() {
        let script = script();
        let names: Vec<_> = script.passes().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "desk and walls",
                "keyboard and mat",
                "mouse",
                "pc exterior",
                "pc interior",
                "monitor",
                "glass"
            ]
        );
        assert_eq!(script.directive_count(), 44);
    }

    #[test]
    fn test_every_referenced_texture_is_in_the_manifest() {
        let tags: HashSet<_> = TEXTURE_MANIFEST.iter().map(|(tag, _)| *tag).collect();
        for directive in script().directives() {
            if let Surface::Texture { tag, .. } = &directive.surface {
                assert!(tags.contains(tag.as_str()), "{} uses {}", directive.label, tag);
            }
        }
    }

    #[test]
    fn test_every_referenced_material_is_defined() {
        let mut registry = MaterialRegistry::new();
        for (tag, material) in materials() {
            registry.define(tag, material);
        }
        for directive in script().directives() {
            if let Some(tag) = &directive.material {
                assert!(registry.lookup(tag).is_some(), "{} uses {}", directive.label, tag);
            }
        }
    }

    #[test]
    fn test_only_glass_is_translucent() {
        for pass in script().passes() {
            for directive in &pass.directives {
                if let Surface::Color(rgba) = directive.surface {
                    assert_eq!(rgba[3] < 1.0, pass.name == "glass", "{}", directive.label);
                }
            }
        }
    }

    fn directive(label: &str) -> Directive {
        script()
            .directives()
            .find(|d| d.label == label)
            .cloned()
            .unwrap_or_else(|| panic!("no directive labelled {}", label))
    }

    fn texture(tag: &str) -> Surface {
        Surface::Texture {
            tag: tag.to_string(),
            uv_scale: [1.0, 1.0],
        }
    }

    #[test]
    fn test_one_object_per_pass_keeps_its_layout() {
        // (label, mesh, scale, rotation, position, surface, material)
        let expected = [
            (
                "back wall",
                Plane,
                [20.0, 1.0, 10.0],
                [90.0, 0.0, 0.0],
                [0.0, 10.0, -10.0],
                texture("wall"),
                Some("walls"),
            ),
            (
                "keyboard keys",
                Box,
                [14.0, 0.5, 5.0],
                NO_ROTATION,
                [-8.0, 0.3, 4.5],
                texture("keyboard"),
                Some("plastic"),
            ),
            (
                "scroll wheel",
                Torus,
                [0.35, 0.35, 0.35],
                [0.0, 90.0, 0.0],
                [2.0, 0.67, 3.7],
                Surface::Color(DARK_GREY),
                None,
            ),
            (
                "case side",
                Box,
                [14.5, 0.3, 9.8],
                [90.0, 0.0, 90.0],
                [16.35, 5.75, 2.05],
                texture("metal"),
                Some("metal"),
            ),
            (
                "cooler screen",
                Cylinder,
                [1.0, 1.0, 1.0],
                [0.0, 0.0, 90.0],
                [15.96, 7.4, -1.7],
                texture("PKMN"),
                Some("plastic"),
            ),
            (
                "monitor screen",
                Box,
                [12.0, 0.1, 6.0],
                [90.0, 0.0, 0.0],
                [-4.0, 5.95, -2.223],
                texture("screen"),
                Some("metal"),
            ),
            (
                "front glass",
                Box,
                [5.404, 0.05, 9.8],
                [90.0, 0.0, 0.0],
                [13.5, 5.75, 9.289],
                Surface::Color(GLASS_TINT),
                Some("glass"),
            ),
        ];

        for (label, mesh, scale, rotation, position, surface, material) in expected {
            let d = directive(label);
            assert_eq!(d.mesh, mesh, "{}", label);
            assert_eq!(d.transform, Transform::new(scale, rotation, position), "{}", label);
            assert_eq!(d.surface, surface, "{}", label);
            assert_eq!(d.material.as_deref(), material, "{}", label);
        }
    }

    #[test]
    fn test_mouse_details_inherit_plastic_material() {
        let mut materials = MaterialRegistry::new();
        for (tag, material) in super::materials() {
            materials.define(tag, material);
        }
        let textures = TextureRegistry::new();
        let mut trace = UniformTrace::new();
        let script = script();
        script.render(&textures, &materials, &mut trace);

        let first_mouse_draw: usize = script.passes()[..2]
            .iter()
            .map(|pass| pass.directives.len())
            .sum();
        let mouse = &script.passes()[2];
        let plastic = materials.lookup("plastic").cloned().unwrap();

        // Uniform state at each draw, and whether the directive set a material itself
        let mut current: HashMap<&str, UniformValue> = HashMap::new();
        let mut set_material = false;
        let mut draws = Vec::new();
        for event in trace.events() {
            match event {
                TraceEvent::Set { name, value } => {
                    set_material |= name.starts_with("material.");
                    current.insert(name.as_str(), *value);
                }
                TraceEvent::Draw(_) => {
                    draws.push((current.clone(), set_material));
                    set_material = false;
                }
            }
        }

        for (offset, d) in mouse.directives.iter().enumerate() {
            let (state, set_material) = &draws[first_mouse_draw + offset];
            assert_eq!(
                state.get(names::MATERIAL_DIFFUSE_COLOR),
                Some(&UniformValue::Vec3(plastic.diffuse_color)),
                "{}",
                d.label
            );
            assert_eq!(
                state.get(names::MATERIAL_SHININESS),
                Some(&UniformValue::Float(plastic.shininess)),
                "{}",
                d.label
            );
            if let Surface::Color(rgba) = d.surface {
                assert!(!set_material, "{} should inherit its material", d.label);
                assert_eq!(state.get(names::USE_TEXTURE), Some(&UniformValue::Bool(false)));
                assert_eq!(state.get(names::OBJECT_COLOR), Some(&UniformValue::Vec4(rgba)));
            }
        }
    }

    #[test]
    fn test_three_lights_fit_the_shader() {
        assert_eq!(lights().len(), 3);
        assert!(lights().len() <= crate::gfx::shader::names::MAX_LIGHTS);
    }
}
