//! Straight-alpha RGBA colour with components in [0, 1].

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const BLACK: Color = Color(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self(r, g, b, 1.0)
    }

    /// Decodes a packed `0xAARRGGBB` value.
    pub fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        let channel = |byte: u8| f32::from(byte) / 255.0;
        Self(channel(r), channel(g), channel(b), channel(a))
    }

    pub fn alpha(&self) -> f32 {
        self.3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_unpacks_alpha_first() {
        let color = Color::from_argb(0x80FF_0000);
        assert_eq!(color, Color(1.0, 0.0, 0.0, color.alpha()));
        assert!((color.alpha() - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn translucent_black_keeps_only_alpha() {
        let color = Color::from_argb(0x1A00_0000);
        assert_eq!((color.0, color.1, color.2), (0.0, 0.0, 0.0));
        assert!((color.alpha() - 26.0 / 255.0).abs() < 1e-6);
    }
}
