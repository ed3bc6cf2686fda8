//! # Scene
//!
//! The static desk scene and the machinery that draws it.
//!
//! ## Key Components
//!
//! - [`Scene`] - Owns the registries and lights; performs setup, render and teardown
//! - [`SceneScript`] - Ordered passes of draw directives, interpreted by one routine
//! - [`UniformDispatcher`] - Turns per-object intent into named uniform uploads
//! - [`SceneLights`] - Up to four point lights
//! - [`Transform`] - Scale, rotation and position to model matrix
//! - [`Vertex3D`] - Vertex layout shared by every mesh
//!
//! ## Usage
//!
//! ```rust
//! use desk_scene::gfx::scene::Scene;
//! use desk_scene::gfx::shader::UniformTrace;
//!
//! let scene = Scene::desk();
//! let mut trace = UniformTrace::new();
//! scene.render(&mut trace);
//! assert_eq!(trace.draw_count(), scene.script().directive_count());
//! ```

pub mod desk;
pub mod dispatcher;
pub mod lights;
pub mod scene;
pub mod script;
pub mod transform;
pub mod vertex;

pub use dispatcher::UniformDispatcher;
pub use lights::{LightSource, SceneLights};
pub use scene::{Scene, SetupReport};
pub use script::{Directive, Pass, SceneScript, Surface, UnresolvedReference};
pub use transform::Transform;
pub use vertex::Vertex3D;
