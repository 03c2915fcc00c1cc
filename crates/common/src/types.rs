use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a renderable body in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub Uuid);

impl BodyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BodyId {
    fn default() -> Self {
        Self::new()
    }
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Uniformly scaled transform at a position (spheres use scale as radius).
    pub fn at(position: Vec3, uniform_scale: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::splat(uniform_scale),
        }
    }
}

/// Linear RGB color. Shaders and render targets work in linear light;
/// sRGB hex values are converted once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert a 0xRRGGBB sRGB hex value to linear RGB.
    pub fn from_srgb_hex(hex: u32) -> Self {
        let byte = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self {
            r: srgb_to_linear(byte(16)),
            g: srgb_to_linear(byte(8)),
            b: srgb_to_linear(byte(0)),
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_id_uniqueness() {
        let a = BodyId::new();
        let b = BodyId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn transform_at_sets_uniform_scale() {
        let t = Transform::at(Vec3::new(0.0, 2.0, -5.0), 1.5);
        assert_eq!(t.position.y, 2.0);
        assert_eq!(t.scale, Vec3::splat(1.5));
        assert_eq!(t.rotation, Quat::IDENTITY);
    }

    #[test]
    fn hex_black_and_white() {
        assert_eq!(Color::from_srgb_hex(0x000000), Color::BLACK);
        let w = Color::from_srgb_hex(0xffffff);
        assert!((w.r - 1.0).abs() < 1e-6);
        assert!((w.g - 1.0).abs() < 1e-6);
        assert!((w.b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn hex_channel_order() {
        let c = Color::from_srgb_hex(0xff0000);
        assert!(c.r > 0.99);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn srgb_conversion_is_monotonic() {
        let dim = Color::from_srgb_hex(0x404040);
        let bright = Color::from_srgb_hex(0xc0c0c0);
        assert!(dim.r < bright.r);
        // Linear values sit below their sRGB-encoded bytes for mid tones.
        assert!(dim.r < 0x40 as f32 / 255.0);
    }
}
