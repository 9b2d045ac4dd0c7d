use serde::{Deserialize, Serialize};
use thiserror::Error;
use units::Molarity;

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("invalid hex color length: {0}")]
    Length(String),
    #[error("invalid {channel} component: {value}")]
    Component { channel: &'static str, value: String },
}

/// RGB color of a solution, stock fluid or solute particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear RGB interpolation; `t` is clamped to [0, 1].
    pub fn interpolate(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;

        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// Returns the color as a hex string (e.g., "#FF9944")
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse a hex color string (e.g., "#FF9944" or "FF9944")
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        let s = s.strip_prefix('#').unwrap_or(s);

        if s.len() != 6 || !s.is_ascii() {
            return Err(ParseColorError::Length(s.to_string()));
        }

        let channel = |name: &'static str, range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range.clone()], 16).map_err(|_| ParseColorError::Component {
                channel: name,
                value: s[range].to_string(),
            })
        };

        Ok(Self {
            r: channel("red", 0..2)?,
            g: channel("green", 2..4)?,
            b: channel("blue", 4..6)?,
        })
    }
}

/// Maps a solute concentration to the color of the solution.
///
/// Three stops: a pale tint at `min`, the characteristic color at `mid`, and
/// the saturated color at `max`. Concentrations between stops interpolate
/// linearly; outside the stops the nearest end color is used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoluteColorScheme {
    pub min_concentration: f64, // mol/L
    pub min_color: Color,
    pub mid_concentration: f64, // mol/L
    pub mid_color: Color,
    pub max_concentration: f64, // mol/L
    pub max_color: Color,
}

impl SoluteColorScheme {
    pub const fn new(
        min_concentration: f64,
        min_color: Color,
        mid_concentration: f64,
        mid_color: Color,
        max_concentration: f64,
        max_color: Color,
    ) -> Self {
        Self {
            min_concentration,
            min_color,
            mid_concentration,
            mid_color,
            max_concentration,
            max_color,
        }
    }

    pub fn concentration_to_color(&self, concentration: Molarity) -> Color {
        let c = concentration.to_moles_per_liter();

        if c >= self.max_concentration {
            self.max_color
        } else if c <= self.min_concentration {
            self.min_color
        } else if c <= self.mid_concentration {
            let t =
                (c - self.min_concentration) / (self.mid_concentration - self.min_concentration);
            self.min_color.interpolate(&self.mid_color, t)
        } else {
            let t =
                (c - self.mid_concentration) / (self.max_concentration - self.mid_concentration);
            self.mid_color.interpolate(&self.max_color, t)
        }
    }
}
