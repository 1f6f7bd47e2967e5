//! RGB to hue/saturation conversion for Hue's hue/sat color model.

/// Returns `(hue, saturation)` in Hue's native ranges: hue `0..65535`, sat `0..254`.
pub fn rgb_to_hue_sat(r: u8, g: u8, b: u8) -> (u16, u8) {
    let (r, g, b) = (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue_deg = if delta <= f32::EPSILON {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let saturation = if max <= f32::EPSILON { 0.0 } else { delta / max };

    let hue = ((hue_deg / 360.0) * 65535.0).round().clamp(0.0, 65535.0) as u16;
    let sat = (saturation * 254.0).round().clamp(0.0, 254.0) as u8;
    (hue, sat)
}
