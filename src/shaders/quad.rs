use miniquad::*;

use super::{UniformSlot, UniformValue};

/// The fixed vertex stage. It only stretches the unit square quad over clip space and hands the
/// fragment stage its position on the quad; everything interesting lives in the fragment shader.
pub const VERTEX: &str = r#"
    #version 100

    attribute vec2 aPos;

    varying highp vec2 vUv;

    void main() {
        // Scale from (0..1) to (-1..1)
        gl_Position = vec4(aPos * 2.0 - 1.0, 0.0, 1.0);
        vUv = aPos;
    }
"#;

/// The vertex attribute name the quad's vertex buffer is bound to.
pub const POSITION_ATTRIBUTE: &str = "aPos";

fn uniform_type(slot: UniformSlot) -> UniformType {
    match slot {
        UniformSlot::AspectRatio | UniformSlot::Time => UniformType::Float1,
        UniformSlot::View => UniformType::Mat4,
        UniformSlot::Tex0 | UniformSlot::Tex1 | UniformSlot::MouseClicked => UniformType::Int1,
        UniformSlot::MousePos => UniformType::Float2,
    }
}

/// Shader metadata for the viewer program. The samplers are declared as plain int uniforms
/// rather than images, so setting them only picks a texture unit and never binds a texture.
pub fn meta() -> ShaderMeta {
    ShaderMeta {
        images: Vec::new(),
        uniforms: UniformBlockLayout {
            uniforms: UniformSlot::ALL
                .iter()
                .map(|&slot| UniformDesc::new(slot.name(), uniform_type(slot)))
                .collect(),
        },
    }
}

/// CPU-side copy of the uniform block, laid out to match `meta()` field for field.
#[repr(C)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Uniforms {
    pub aspect_ratio: f32,
    pub time: f32,
    pub view: [f32; 16],
    pub tex0: i32,
    pub tex1: i32,
    pub mouse_pos: [f32; 2],
    pub mouse_clicked: i32,
}

impl Uniforms {
    /// Store a value in the field for `slot`. Returns false if the value has the wrong type for
    /// the slot, in which case nothing is written.
    pub fn set(&mut self, slot: UniformSlot, value: UniformValue) -> bool {
        match (slot, value) {
            (UniformSlot::AspectRatio, UniformValue::Float(v)) => self.aspect_ratio = v,
            (UniformSlot::Time, UniformValue::Float(v)) => self.time = v,
            (UniformSlot::View, UniformValue::Mat4(m)) => self.view = m,
            (UniformSlot::Tex0, UniformValue::Int(v)) => self.tex0 = v,
            (UniformSlot::Tex1, UniformValue::Int(v)) => self.tex1 = v,
            (UniformSlot::MousePos, UniformValue::Vec2(v)) => self.mouse_pos = v,
            (UniformSlot::MouseClicked, UniformValue::Int(v)) => self.mouse_clicked = v,
            _ => return false,
        }
        true
    }
}
