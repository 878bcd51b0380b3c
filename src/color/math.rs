//! HSV <-> RGB <-> hex.
//!
//! Hue is in degrees `[0, 360)`, saturation and value in percent `[0, 100]`.
//! Callers clamp their inputs; these functions never fail.

use super::Color;

pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let s = s / 100.0;
    let v = v / 100.0;
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let channel = |n: f64| ((n + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r), channel(g), channel(b))
}

pub fn hsv_to_hex(h: f64, s: f64, v: f64) -> Color {
    let (r, g, b) = hsv_to_rgb(h, s, v);
    Color::from_rgb(r, g, b)
}

/// Inverse of [`hsv_to_rgb`]. Greys report hue 0.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let saturation = if max == 0.0 { 0.0 } else { delta / max * 100.0 };

    (hue % 360.0, saturation, max * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_colors() {
        assert_eq!(hsv_to_rgb(0.0, 0.0, 100.0), (255, 255, 255));
        assert_eq!(hsv_to_rgb(0.0, 100.0, 100.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 100.0, 100.0), (0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 100.0, 100.0), (0, 0, 255));
        assert_eq!(hsv_to_rgb(0.0, 0.0, 0.0), (0, 0, 0));
    }

    #[test]
    fn test_sector_boundaries() {
        assert_eq!(hsv_to_rgb(60.0, 100.0, 100.0), (255, 255, 0));
        assert_eq!(hsv_to_rgb(180.0, 100.0, 100.0), (0, 255, 255));
        assert_eq!(hsv_to_rgb(300.0, 100.0, 100.0), (255, 0, 255));
        assert_eq!(hsv_to_rgb(359.9, 100.0, 100.0), (255, 0, 0));
    }

    #[test]
    fn test_rounds_each_channel_independently() {
        // 50% grey: 127.5 rounds up on every channel.
        assert_eq!(hsv_to_rgb(200.0, 0.0, 50.0), (128, 128, 128));
    }

    #[test]
    fn test_hex_is_seven_chars() {
        for h in (0..360).step_by(7) {
            for s in [0.0, 33.3, 100.0] {
                for v in [0.0, 12.5, 100.0] {
                    let hex = hsv_to_hex(f64::from(h), s, v);
                    let raw = hex.as_str();
                    assert_eq!(raw.len(), 7, "{raw}");
                    assert!(raw.starts_with('#'));
                    assert!(raw[1..].chars().all(|c| c.is_ascii_hexdigit()));
                }
            }
        }
        assert_eq!(hsv_to_hex(0.0, 100.0, 100.0).as_str(), "#FF0000");
    }

    #[test]
    fn test_rgb_to_hsv_inverts_defaults() {
        for c in Color::defaults() {
            let (r, g, b) = c.rgb();
            let (h, s, v) = rgb_to_hsv(r, g, b);
            assert!((0.0..360.0).contains(&h));
            assert_eq!(hsv_to_hex(h, s, v), c);
        }
    }

    #[test]
    fn test_rgb_to_hsv_grey_has_zero_hue() {
        let (h, s, v) = rgb_to_hsv(128, 128, 128);
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((v - 50.196).abs() < 0.01);
    }
}
