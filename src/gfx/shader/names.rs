//! Uniform names understood by the scene shader

pub const MODEL: &str = "model";
pub const OBJECT_COLOR: &str = "objectColor";
pub const OBJECT_TEXTURE: &str = "objectTexture";
pub const USE_TEXTURE: &str = "bUseTexture";
pub const USE_LIGHTING: &str = "bUseLighting";
pub const UV_SCALE: &str = "UVscale";

pub const MATERIAL_AMBIENT_COLOR: &str = "material.ambientColor";
pub const MATERIAL_AMBIENT_STRENGTH: &str = "material.ambientStrength";
pub const MATERIAL_DIFFUSE_COLOR: &str = "material.diffuseColor";
pub const MATERIAL_SPECULAR_COLOR: &str = "material.specularColor";
pub const MATERIAL_SHININESS: &str = "material.shininess";

/// Number of `lightSources[i]` slots the shader declares
pub const MAX_LIGHTS: usize = 4;

pub const LIGHT_POSITION: &str = "position";
pub const LIGHT_AMBIENT_COLOR: &str = "ambientColor";
pub const LIGHT_DIFFUSE_COLOR: &str = "diffuseColor";
pub const LIGHT_SPECULAR_COLOR: &str = "specularColor";
pub const LIGHT_FOCAL_STRENGTH: &str = "focalStrength";
pub const LIGHT_SPECULAR_INTENSITY: &str = "specularIntensity";

/// Full uniform name of one field of light `index`, e.g. `lightSources[2].position`
pub fn light_field(index: usize, field: &str) -> String {
    format!("lightSources[{}].{}", index, field)
}

/// Splits `lightSources[i].field` into `(i, field)`
///
/// Returns `None` for other names and for indices past [`MAX_LIGHTS`].
pub fn parse_light_uniform(name: &str) -> Option<(usize, &str)> {
    let rest = name.strip_prefix("lightSources[")?;
    let (index, field) = rest.split_once("].")?;
    let index: usize = index.parse().ok()?;
    (index < MAX_LIGHTS).then_some((index, field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_field_round_trips_through_parser() {
        let name = light_field(2, LIGHT_FOCAL_STRENGTH);
        assert_eq!(name, "lightSources[2].focalStrength");
        assert_eq!(parse_light_uniform(&name), Some((2, LIGHT_FOCAL_STRENGTH)));
    }

    #[test]
    fn test_parser_rejects_other_names() {
        assert_eq!(parse_light_uniform(MODEL), None);
        assert_eq!(parse_light_uniform("lightSources[4].position"), None);
        assert_eq!(parse_light_uniform("lightSources[x].position"), None);
        assert_eq!(parse_light_uniform("lightSources[0]"), None);
    }
}
