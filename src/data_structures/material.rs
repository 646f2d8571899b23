//! Surface appearance of meshes and particle fields.

/// An sRGB colour as written in hex (`0xRRGGBB`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Colour {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub const BLACK: Colour = Colour::from_hex(0x000000);

    /// Linear-light components, which is what the shaders do their maths in.
    pub fn to_linear(self) -> [f32; 3] {
        fn channel(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

/// Physically-based surface: base colour, self-illumination, roughness and
/// metalness, optionally blended with `opacity`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StandardMaterial {
    pub colour: Colour,
    pub emissive: Colour,
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
    pub transparent: bool,
}

impl StandardMaterial {
    pub fn new(colour: u32) -> Self {
        Self {
            colour: Colour::from_hex(colour),
            emissive: Colour::BLACK,
            roughness: 1.0,
            metalness: 0.0,
            opacity: 1.0,
            transparent: false,
        }
    }

    pub fn emissive(mut self, hex: u32) -> Self {
        self.emissive = Colour::from_hex(hex);
        self
    }

    pub fn roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness;
        self
    }

    /// Makes the material alpha blended.
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }
}

/// Flat-coloured square sprites, `size` world units wide at unit view depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointsMaterial {
    pub colour: Colour,
    pub size: f32,
    pub opacity: f32,
    pub transparent: bool,
}

impl PointsMaterial {
    pub fn new(colour: u32, size: f32) -> Self {
        Self {
            colour: Colour::from_hex(colour),
            size,
            opacity: 1.0,
            transparent: false,
        }
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    Standard(StandardMaterial),
    Points(PointsMaterial),
}

impl Material {
    pub fn is_transparent(&self) -> bool {
        match self {
            Material::Standard(m) => m.transparent,
            Material::Points(m) => m.transparent,
        }
    }
}

impl From<StandardMaterial> for Material {
    fn from(m: StandardMaterial) -> Self {
        Material::Standard(m)
    }
}

impl From<PointsMaterial> for Material {
    fn from(m: PointsMaterial) -> Self {
        Material::Points(m)
    }
}
