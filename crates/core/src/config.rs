//! Render configuration: supersample and output sizes.
//!
//! [`RenderConfig`] deserializes strictly through serde, or leniently from a
//! loose JSON object via [`RenderConfig::from_json`], where missing or
//! mistyped keys fall back to the defaults.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Side length of the design square all shape constants are authored in.
pub const DESIGN_SIZE: f64 = 512.0;

/// Extracts a `usize` from `params[name]`, returning `default` if missing or
/// not a non-negative integer.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Square canvas and output sizes for one asset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    /// Side of the supersampled drawing canvas, in pixels.
    pub canvas_size: usize,
    /// Side of the finalized image, in pixels.
    pub output_size: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_size: 512,
            output_size: 256,
        }
    }
}

impl RenderConfig {
    /// Reads `canvas_size` / `output_size` from a JSON object, defaulting each
    /// missing or mistyped key. Does not validate.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            canvas_size: param_usize(params, "canvas_size", d.canvas_size),
            output_size: param_usize(params, "output_size", d.output_size),
        }
    }

    /// Checks both sizes are non-zero and the output does not upsample.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.canvas_size == 0 || self.output_size == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        self.canvas_size
            .checked_mul(self.canvas_size)
            .and_then(|n| n.checked_mul(4))
            .ok_or(EngineError::InvalidDimensions)?;
        if self.output_size > self.canvas_size {
            return Err(EngineError::InvalidConfig(format!(
                "output_size {} exceeds canvas_size {}",
                self.output_size, self.canvas_size
            )));
        }
        Ok(())
    }

    /// Pixels per design unit on the drawing canvas.
    pub fn scale(&self) -> f64 {
        self.canvas_size as f64 / DESIGN_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_are_512_to_256() {
        let c = RenderConfig::default();
        assert_eq!(c.canvas_size, 512);
        assert_eq!(c.output_size, 256);
        assert_eq!(c.scale(), 1.0);
        c.validate().unwrap();
    }

    // -- from_json --

    #[test]
    fn from_json_reads_both_keys() {
        let c = RenderConfig::from_json(&json!({"canvas_size": 1024, "output_size": 128}));
        assert_eq!(c, RenderConfig { canvas_size: 1024, output_size: 128 });
        assert_eq!(c.scale(), 2.0);
    }

    #[test]
    fn from_json_falls_back_on_missing_and_mistyped_keys() {
        let c = RenderConfig::from_json(&json!({"canvas_size": "big", "output_size": -4}));
        assert_eq!(c, RenderConfig::default());
        assert_eq!(RenderConfig::from_json(&json!("nope")), RenderConfig::default());
    }

    #[test]
    fn param_usize_rejects_floats() {
        assert_eq!(param_usize(&json!({"n": 2.5}), "n", 9), 9);
        assert_eq!(param_usize(&json!({"n": 3}), "n", 9), 3);
    }

    // -- validate --

    #[test]
    fn validate_rejects_zero_sizes() {
        let c = RenderConfig { canvas_size: 0, output_size: 0 };
        assert!(matches!(c.validate(), Err(EngineError::InvalidDimensions)));
    }

    #[test]
    fn validate_rejects_upsampling() {
        let c = RenderConfig { canvas_size: 128, output_size: 256 };
        assert!(matches!(c.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_overflowing_canvas() {
        let c = RenderConfig { canvas_size: usize::MAX, output_size: 1 };
        assert!(c.validate().is_err());
    }

    // -- serde --

    #[test]
    fn serde_fills_missing_fields_with_defaults() {
        let c: RenderConfig = serde_json::from_str(r#"{"output_size": 64}"#).unwrap();
        assert_eq!(c, RenderConfig { canvas_size: 512, output_size: 64 });
    }

    #[test]
    fn serde_round_trip() {
        let c = RenderConfig { canvas_size: 256, output_size: 64 };
        let json = serde_json::to_string(&c).unwrap();
        let back: RenderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
