//! # Desk Scene Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use desk_scene::prelude::*;
//!
//! let script = SceneScript::new(vec![Pass::new(
//!     "floor",
//!     vec![Directive::new("floor", MeshKind::Plane).texture("wood")],
//! )]);
//! let mut trace = UniformTrace::new();
//! script.render(&TextureRegistry::new(), &MaterialRegistry::new(), &mut trace);
//! assert_eq!(trace.draw_count(), 1);
//! ```

pub use crate::app::DeskSceneApp;
pub use crate::config::AppConfig;
pub use crate::error::{ConfigError, SceneError};
pub use crate::gfx::geometry::MeshKind;
pub use crate::gfx::resources::{
    ImageDecoder, Material, MaterialRegistry, TextureBackend, TextureRegistry,
};
pub use crate::gfx::scene::{
    Directive, LightSource, Pass, Scene, SceneScript, SetupReport, Transform,
};
pub use crate::gfx::shader::{RenderTarget, ShaderUniforms, UniformTrace};
