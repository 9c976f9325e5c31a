//! Tool compensation parameters and engine options.
//!
//! Both are plain serde structs so a host application can persist them next
//! to its own settings. Validation happens once, before any geometry work.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LatheCompError, Result};

/// Which side of the travel direction the tool contact point rides on.
///
/// Sides are taken in `(x, z)` coordinates: `Left` offsets along the left
/// normal `(−dz, dx)` of the travel direction `(dx, dz)`. In the lathe view
/// (Z to the right, X upward) that normal points to the right of travel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompensationSide {
    #[default]
    Off,
    Left,
    Right,
}

impl CompensationSide {
    /// `+1` for left, `−1` for right, `0` when compensation is off.
    #[must_use]
    pub fn offset_dir(self) -> f64 {
        match self {
            Self::Off => 0.0,
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Off => Self::Off,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl std::fmt::Display for CompensationSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

impl FromStr for CompensationSide {
    type Err = LatheCompError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(Self::Off),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(LatheCompError::InvalidParameter(format!(
                "unknown compensation side `{other}`"
            ))),
        }
    }
}

/// Tool-nose-center shift direction, `1..=9`.
///
/// `9` places the programmed point on the nose center (no shift).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quadrant(u8);

impl Quadrant {
    /// Identity shift.
    pub const CENTER: Quadrant = Quadrant(9);

    /// # Errors
    ///
    /// Returns [`LatheCompError::InvalidParameter`] outside `1..=9`.
    pub fn new(number: u8) -> Result<Self> {
        if (1..=9).contains(&number) {
            Ok(Self(number))
        } else {
            Err(LatheCompError::InvalidParameter(format!(
                "quadrant must be in 1..=9, got {number}"
            )))
        }
    }

    #[must_use]
    pub fn number(self) -> u8 {
        self.0
    }
}

impl Default for Quadrant {
    fn default() -> Self {
        Self::CENTER
    }
}

impl TryFrom<u8> for Quadrant {
    type Error = LatheCompError;

    fn try_from(number: u8) -> Result<Self> {
        Self::new(number)
    }
}

impl From<Quadrant> for u8 {
    fn from(q: Quadrant) -> Self {
        q.0
    }
}

impl FromStr for Quadrant {
    type Err = LatheCompError;

    fn from_str(s: &str) -> Result<Self> {
        let number: u8 = s.trim().parse().map_err(|_| {
            LatheCompError::InvalidParameter(format!("quadrant `{s}` is not a number"))
        })?;
        Self::new(number)
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-supplied compensation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolCompensation {
    pub side: CompensationSide,
    /// Tool nose radius; must be positive unless `side` is `Off`.
    pub nose_radius: f64,
    pub quadrant: Quadrant,
}

impl Default for ToolCompensation {
    fn default() -> Self {
        Self {
            side: CompensationSide::Off,
            nose_radius: 0.0,
            quadrant: Quadrant::CENTER,
        }
    }
}

impl ToolCompensation {
    #[must_use]
    pub fn new(side: CompensationSide, nose_radius: f64, quadrant: Quadrant) -> Self {
        Self {
            side,
            nose_radius,
            quadrant,
        }
    }

    /// Signed offset distance: positive to the left of travel.
    #[must_use]
    pub fn signed_offset(&self) -> f64 {
        self.side.offset_dir() * self.nose_radius
    }

    /// # Errors
    ///
    /// Returns [`LatheCompError::InvalidParameter`] if compensation is enabled
    /// and the nose radius is not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if self.side != CompensationSide::Off
            && !(self.nose_radius.is_finite() && self.nose_radius > 0.0)
        {
            return Err(LatheCompError::InvalidParameter(format!(
                "nose radius must be positive with {} compensation, got {}",
                self.side, self.nose_radius
            )));
        }
        Ok(())
    }
}

/// Rotational convention of the emitted arc records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcConvention {
    /// Clockwise as seen with Z to the right and X upward. Matches the input.
    #[default]
    LatheView,
    /// Mirror image of the lathe view; every arc keyword is inverted once
    /// when the chain is written.
    Mirrored,
}

/// Numeric tolerances and output options for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffsetOptions {
    /// Corners whose tangents deviate by at most this many degrees are
    /// joined by a plain snap.
    pub tangent_tolerance_deg: f64,
    /// Segments this short or shorter are removed during cleanup.
    pub min_segment_length: f64,
    pub arc_convention: ArcConvention,
}

impl Default for OffsetOptions {
    fn default() -> Self {
        Self {
            tangent_tolerance_deg: 0.5,
            min_segment_length: 0.05,
            arc_convention: ArcConvention::LatheView,
        }
    }
}

impl OffsetOptions {
    /// Radius an arc collapsed by the offset is clamped to.
    ///
    /// Small enough that cleanup removes the arc afterwards.
    #[must_use]
    pub fn collapse_radius_floor(&self) -> f64 {
        (self.min_segment_length * 0.25).max(0.006)
    }

    /// # Errors
    ///
    /// Returns [`LatheCompError::InvalidParameter`] for negative or non-finite
    /// tolerances.
    pub fn validate(&self) -> Result<()> {
        if !(self.tangent_tolerance_deg.is_finite()
            && (0.0..180.0).contains(&self.tangent_tolerance_deg))
        {
            return Err(LatheCompError::InvalidParameter(format!(
                "tangent tolerance must be in [0, 180) degrees, got {}",
                self.tangent_tolerance_deg
            )));
        }
        if !(self.min_segment_length.is_finite() && self.min_segment_length >= 0.0) {
            return Err(LatheCompError::InvalidParameter(format!(
                "minimum segment length must be non-negative, got {}",
                self.min_segment_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn side_parses_case_insensitively() {
        assert_eq!("Left".parse::<CompensationSide>().unwrap(), CompensationSide::Left);
        assert_eq!("RIGHT".parse::<CompensationSide>().unwrap(), CompensationSide::Right);
        assert_eq!(" off ".parse::<CompensationSide>().unwrap(), CompensationSide::Off);
        let err = "sideways".parse::<CompensationSide>().unwrap_err();
        assert!(matches!(err, LatheCompError::InvalidParameter(_)));
    }

    #[test]
    fn quadrant_range() {
        assert!(Quadrant::new(0).is_err());
        assert!(Quadrant::new(10).is_err());
        assert_eq!(Quadrant::new(3).unwrap().number(), 3);
        assert_eq!(Quadrant::default(), Quadrant::CENTER);
        assert!("x".parse::<Quadrant>().is_err());
    }

    #[test]
    fn nose_radius_required_when_enabled() {
        let comp = ToolCompensation::new(CompensationSide::Left, 0.0, Quadrant::CENTER);
        assert!(comp.validate().is_err());
        let comp = ToolCompensation::new(CompensationSide::Right, f64::NAN, Quadrant::CENTER);
        assert!(comp.validate().is_err());
        let comp = ToolCompensation::new(CompensationSide::Off, 0.0, Quadrant::CENTER);
        assert!(comp.validate().is_ok());
        let comp = ToolCompensation::new(CompensationSide::Right, 0.4, Quadrant::CENTER);
        assert!(comp.validate().is_ok());
        assert!((comp.signed_offset() + 0.4).abs() < 1e-12);
    }

    #[test]
    fn options_round_trip_through_json() {
        let opts = OffsetOptions {
            min_segment_length: 0.02,
            arc_convention: ArcConvention::Mirrored,
            ..OffsetOptions::default()
        };
        let json = serde_json::to_string(&opts).unwrap();
        assert!(json.contains("\"mirrored\""), "json={json}");
        let back: OffsetOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, opts);

        let partial: OffsetOptions =
            serde_json::from_str(r#"{"tangent_tolerance_deg": 1.0}"#).unwrap();
        assert!((partial.min_segment_length - 0.05).abs() < 1e-12);
    }

    #[test]
    fn compensation_rejects_bad_quadrant_in_json() {
        let bad = r#"{"side":"left","nose_radius":0.8,"quadrant":12}"#;
        assert!(serde_json::from_str::<ToolCompensation>(bad).is_err());
        let good = r#"{"side":"left","nose_radius":0.8,"quadrant":3}"#;
        let comp: ToolCompensation = serde_json::from_str(good).unwrap();
        assert_eq!(comp.quadrant.number(), 3);
    }

    #[test]
    fn collapse_floor_has_minimum() {
        let opts = OffsetOptions {
            min_segment_length: 0.001,
            ..OffsetOptions::default()
        };
        assert!((opts.collapse_radius_floor() - 0.006).abs() < 1e-12);
        assert!((OffsetOptions::default().collapse_radius_floor() - 0.0125).abs() < 1e-12);
    }
}
