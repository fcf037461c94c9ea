pub mod quad;

/// The fixed set of uniforms the viewer feeds to every fragment shader. Locations for these are
/// resolved once when a program is linked, so per-frame writes never go through a string lookup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UniformSlot {
    AspectRatio,
    Time,
    View,
    Tex0,
    Tex1,
    MousePos,
    MouseClicked,
}

impl UniformSlot {
    /// The number of slots, i.e. the length of a resolved location table.
    pub const COUNT: usize = 7;

    /// Every slot, in uniform block order.
    pub const ALL: [UniformSlot; UniformSlot::COUNT] = [
        UniformSlot::AspectRatio,
        UniformSlot::Time,
        UniformSlot::View,
        UniformSlot::Tex0,
        UniformSlot::Tex1,
        UniformSlot::MousePos,
        UniformSlot::MouseClicked,
    ];

    /// The GLSL name of the uniform.
    pub fn name(self) -> &'static str {
        match self {
            UniformSlot::AspectRatio => "uAspectRatio",
            UniformSlot::Time => "uTime",
            UniformSlot::View => "uView",
            UniformSlot::Tex0 => "uTex0",
            UniformSlot::Tex1 => "uTex1",
            UniformSlot::MousePos => "uMousePos",
            UniformSlot::MouseClicked => "uMouseClicked",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<UniformSlot> {
        Self::ALL.get(index).copied()
    }

    pub fn from_name(name: &str) -> Option<UniformSlot> {
        Self::ALL.iter().copied().find(|slot| slot.name() == name)
    }
}

/// A value written into a uniform slot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Int(i32),
    /// A 4x4 matrix in column-major order.
    Mat4([f32; 16]),
}
