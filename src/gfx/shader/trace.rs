//! Recording implementation of the uniform interface

use std::fmt;

use cgmath::{Matrix4, Vector2, Vector3, Vector4};

use super::{MeshDrawer, ShaderUniforms};
use crate::gfx::geometry::MeshKind;

/// A single uniform value as it was uploaded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Mat4([[f32; 4]; 4]),
    Vec4([f32; 4]),
    Vec3([f32; 3]),
    Vec2([f32; 2]),
    Float(f32),
    Int(i32),
    Bool(bool),
    Sampler2d(i32),
}

impl fmt::Display for UniformValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformValue::Mat4(m) => {
                write!(f, "mat4[")?;
                for (i, column) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(
                        f,
                        "{:.3} {:.3} {:.3} {:.3}",
                        column[0], column[1], column[2], column[3]
                    )?;
                }
                write!(f, "]")
            }
            UniformValue::Vec4(v) => {
                write!(f, "vec4({:.3}, {:.3}, {:.3}, {:.3})", v[0], v[1], v[2], v[3])
            }
            UniformValue::Vec3(v) => write!(f, "vec3({:.3}, {:.3}, {:.3})", v[0], v[1], v[2]),
            UniformValue::Vec2(v) => write!(f, "vec2({:.3}, {:.3})", v[0], v[1]),
            UniformValue::Float(x) => write!(f, "{:.3}", x),
            UniformValue::Int(x) => write!(f, "{}", x),
            UniformValue::Bool(x) => write!(f, "{}", x),
            UniformValue::Sampler2d(unit) => write!(f, "unit {}", unit),
        }
    }
}

/// One recorded call
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    Set { name: String, value: UniformValue },
    Draw(MeshKind),
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Set { name, value } => write!(f, "set {} = {}", name, value),
            TraceEvent::Draw(kind) => write!(f, "draw {}", kind.name()),
        }
    }
}

/// Records every uniform upload and draw in call order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformTrace {
    events: Vec<TraceEvent>,
}

impl UniformTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn draw_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, TraceEvent::Draw(_)))
            .count()
    }

    /// Most recent value uploaded under `name`
    pub fn last_value(&self, name: &str) -> Option<UniformValue> {
        self.events.iter().rev().find_map(|event| match event {
            TraceEvent::Set { name: n, value } if n == name => Some(*value),
            _ => None,
        })
    }

    fn record(&mut self, name: &str, value: UniformValue) {
        self.events.push(TraceEvent::Set {
            name: name.to_string(),
            value,
        });
    }
}

impl fmt::Display for UniformTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "{}", event)?;
        }
        Ok(())
    }
}

impl ShaderUniforms for UniformTrace {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.record(name, UniformValue::Mat4(value.into()));
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.record(name, UniformValue::Vec4(value.into()));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.record(name, UniformValue::Vec3(value.into()));
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.record(name, UniformValue::Vec2(value.into()));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.record(name, UniformValue::Float(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.record(name, UniformValue::Int(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.record(name, UniformValue::Bool(value));
    }

    fn set_sampler2d(&mut self, name: &str, unit: i32) {
        self.record(name, UniformValue::Sampler2d(unit));
    }
}

impl MeshDrawer for UniformTrace {
    fn draw_mesh(&mut self, kind: MeshKind) {
        self.events.push(TraceEvent::Draw(kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_call_order() {
        let mut trace = UniformTrace::new();
        trace.set_bool("bUseTexture", false);
        trace.set_vec4("objectColor", Vector4::new(1.0, 0.0, 0.0, 1.0));
        trace.draw_mesh(MeshKind::Box);

        assert_eq!(trace.events().len(), 3);
        assert_eq!(trace.events()[2], TraceEvent::Draw(MeshKind::Box));
        assert_eq!(trace.draw_count(), 1);
        assert_eq!(trace.last_value("bUseTexture"), Some(UniformValue::Bool(false)));
        assert_eq!(trace.last_value("model"), None);
    }

    #[test]
    fn test_display_lists_one_event_per_line() {
        let mut trace = UniformTrace::new();
        trace.set_sampler2d("objectTexture", 3);
        trace.draw_mesh(MeshKind::TaperedCylinder);

        let text = trace.to_string();
        assert_eq!(text, "set objectTexture = unit 3\ndraw tapered cylinder\n");
    }
}
