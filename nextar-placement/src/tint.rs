use glam::Vec4;

/// Keeps the tint subtle, so the model texture still dominates.
pub const TINT_INTENSITY: f32 = 0.1;
pub const TINT_ALPHA: f32 = 1.0;

/// 0xRRGGBB
pub const TINT_COLORS_HEX: [u32; 16] = [
    0x000000, 0xF44336, 0xE91E63, 0x9C27B0, 0x673AB7, 0x3F51B5, 0x2196F3, 0x03A9F4, 0x00BCD4, 0x009688, 0x4CAF50,
    0x8BC34A, 0xCDDC39, 0xFFEB3B, 0xFFC107, 0xFF9800,
];

/// Neutral tint for anchors without a recognized identity (e.g. tapped planes).
pub const UNTINTED: Vec4 = Vec4::new(0.0, 0.0, 0.0, TINT_ALPHA);

pub fn int_as_color(data: u32) -> Vec4 {
    Vec4::new(
        ((data >> 16) & 0xFF) as f32 / 255.0,
        ((data >> 8) & 0xFF) as f32 / 255.0,
        (data & 0xFF) as f32 / 255.0,
        1.0,
    )
}

/// Palette entries are reused once the identities exceed the palette size.
#[inline]
pub fn tint_for(identity: u32) -> Vec4 {
    let color = int_as_color(TINT_COLORS_HEX[identity as usize % TINT_COLORS_HEX.len()]);
    (color.truncate() * TINT_INTENSITY).extend(TINT_ALPHA)
}
