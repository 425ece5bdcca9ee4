//! Color value types and the pure color operations used by every synthesizer.
//!
//! [`Rgb`] is an immutable 8-bit color with named channels; [`Rgba`] attaches
//! an alpha for compositing. The derivation functions ([`lighten`],
//! [`darken`], [`blend`], [`tint`], [`average`]) never fail: every channel
//! result is clamped to [0, 255], so overflow cannot happen.

use crate::error::EngineError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 8-bit sRGB color.
///
/// Serializes as a hex string `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// 8-bit sRGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attaches an alpha without touching `self`.
    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `EngineError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Rgb, EngineError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 hex digits, got {}",
                hex.len()
            )));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|e| EngineError::InvalidColor(format!("invalid red component: {e}")))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|e| EngineError::InvalidColor(format!("invalid green component: {e}")))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|e| EngineError::InvalidColor(format!("invalid blue component: {e}")))?;
        Ok(Rgb { r, g, b })
    }

    /// Formats the color as `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Drops the alpha channel.
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Converts an already-clamped f64 channel to u8, truncating toward zero.
fn channel(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

/// Moves each channel toward white by `amount` in [0, 1].
pub fn lighten(c: Rgb, amount: f64) -> Rgb {
    let t = amount.clamp(0.0, 1.0);
    let up = |v: u8| channel(v as f64 + (255.0 - v as f64) * t);
    Rgb::new(up(c.r), up(c.g), up(c.b))
}

/// Moves each channel toward black by `amount` in [0, 1].
pub fn darken(c: Rgb, amount: f64) -> Rgb {
    let t = amount.clamp(0.0, 1.0);
    let down = |v: u8| channel(v as f64 * (1.0 - t));
    Rgb::new(down(c.r), down(c.g), down(c.b))
}

/// Linear channel interpolation from `a` (t = 0) to `b` (t = 1), rounded.
pub fn blend(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| channel((x as f64 + (y as f64 - x as f64) * t).round());
    Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}

/// Shifts `c` toward `target` by `strength`.
pub fn tint(c: Rgb, target: Rgb, strength: f64) -> Rgb {
    blend(c, target, strength)
}

/// Channel-wise integer mean (rounds down).
pub fn average(a: Rgb, b: Rgb) -> Rgb {
    let mean = |x: u8, y: u8| ((x as u16 + y as u16) / 2) as u8;
    Rgb::new(mean(a.r, b.r), mean(a.g, b.g), mean(a.b, b.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgb = Rgb::new(76, 175, 80);

    // -- lighten / darken --

    #[test]
    fn lighten_zero_is_identity() {
        assert_eq!(lighten(GREEN, 0.0), GREEN);
    }

    #[test]
    fn lighten_one_is_white() {
        assert_eq!(lighten(GREEN, 1.0), Rgb::WHITE);
    }

    #[test]
    fn lighten_truncates_like_integer_conversion() {
        // 76 + 179 * 0.5 = 165.5 -> 165
        assert_eq!(lighten(GREEN, 0.5).r, 165);
    }

    #[test]
    fn darken_zero_is_identity() {
        assert_eq!(darken(GREEN, 0.0), GREEN);
    }

    #[test]
    fn darken_one_is_black() {
        assert_eq!(darken(GREEN, 1.0), Rgb::BLACK);
    }

    #[test]
    fn darken_known_value() {
        // 175 * 0.5 = 87.5 -> 87
        assert_eq!(darken(GREEN, 0.5).g, 87);
    }

    #[test]
    fn out_of_range_amounts_are_clamped() {
        assert_eq!(lighten(GREEN, 3.0), Rgb::WHITE);
        assert_eq!(darken(GREEN, -2.0), GREEN);
    }

    // -- blend / tint / average --

    #[test]
    fn blend_endpoints() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(blend(GREEN, red, 0.0), GREEN);
        assert_eq!(blend(GREEN, red, 1.0), red);
    }

    #[test]
    fn blend_midpoint_rounds() {
        let m = blend(Rgb::new(0, 0, 0), Rgb::new(255, 1, 3), 0.5);
        assert_eq!(m, Rgb::new(128, 1, 2));
    }

    #[test]
    fn tint_matches_blend() {
        let cyan = Rgb::new(0, 229, 255);
        assert_eq!(tint(GREEN, cyan, 0.3), blend(GREEN, cyan, 0.3));
    }

    #[test]
    fn average_floors() {
        let cyan = Rgb::new(0, 229, 255);
        assert_eq!(average(GREEN, cyan), Rgb::new(38, 202, 167));
    }

    #[test]
    fn with_alpha_preserves_channels() {
        let c = GREEN.with_alpha(60);
        assert_eq!(c.rgb(), GREEN);
        assert_eq!(c.a, 60);
    }

    // -- hex --

    #[test]
    fn from_hex_parses_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#4CAF50").unwrap(), GREEN);
        assert_eq!(Rgb::from_hex("4caf50").unwrap(), GREEN);
    }

    #[test]
    fn from_hex_returns_error_for_invalid_hex() {
        assert!(Rgb::from_hex("#gggggg").is_err());
        assert!(Rgb::from_hex("#fff").is_err());
        assert!(Rgb::from_hex("").is_err());
        assert!(Rgb::from_hex("#ff00ff00").is_err());
        assert!(Rgb::from_hex("ééé").is_err());
    }

    #[test]
    fn to_hex_known_color() {
        assert_eq!(GREEN.to_hex(), "#4caf50");
    }

    #[test]
    fn rgb_serializes_as_hex_string() {
        let json = serde_json::to_string(&GREEN).unwrap();
        assert_eq!(json, "\"#4caf50\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GREEN);
    }

    #[test]
    fn rgb_deserialize_rejects_invalid_hex() {
        let result: Result<Rgb, _> = serde_json::from_str("\"not-a-color\"");
        assert!(result.is_err());
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_rgb() -> impl Strategy<Value = Rgb> {
            (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b))
        }

        fn edge_rgb() -> impl Strategy<Value = Rgb> {
            prop_oneof![Just(Rgb::BLACK), Just(Rgb::WHITE), any_rgb()]
        }

        proptest! {
            #[test]
            fn lighten_never_darkens(c in edge_rgb(), t in 0.0_f64..=1.0) {
                let l = lighten(c, t);
                prop_assert!(l.r >= c.r && l.g >= c.g && l.b >= c.b);
            }

            #[test]
            fn darken_never_lightens(c in edge_rgb(), t in 0.0_f64..=1.0) {
                let d = darken(c, t);
                prop_assert!(d.r <= c.r && d.g <= c.g && d.b <= c.b);
            }

            #[test]
            fn blend_stays_between_endpoints(a in edge_rgb(), b in edge_rgb(), t in -1.0_f64..=2.0) {
                let m = blend(a, b, t);
                for (x, y, v) in [(a.r, b.r, m.r), (a.g, b.g, m.g), (a.b, b.b, m.b)] {
                    prop_assert!(v >= x.min(y) && v <= x.max(y), "{v} not between {x} and {y}");
                }
            }

            #[test]
            fn hex_round_trip_is_exact(c in any_rgb()) {
                prop_assert_eq!(Rgb::from_hex(&c.to_hex()).unwrap(), c);
            }
        }
    }
}
