use crate::error::ConfigError;
use glam::DVec2;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{
    f64::consts::{FRAC_PI_2, FRAC_PI_4},
    path::Path,
};

/// Jitter settings applied to a segment that forks into two children.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BranchedConfig {
    /// Full width (radians) of the heading jitter for each forked child.
    pub max_angle_delta: f64,
}

impl Default for BranchedConfig {
    fn default() -> Self {
        Self {
            max_angle_delta: FRAC_PI_2,
        }
    }
}

/// Parameters of one tree generation run.
///
/// Every `trunk_*`/`twig_*` pair is the start and end of a linear ramp over
/// normalized depth `iteration / iterations`. Values are used as given;
/// nothing here is validated.
///
/// ### Fields
/// - `iterations` - Number of growth rounds; `0` yields the trunk alone.
/// - `position` - Root of the trunk.
/// - `color` - Stroke color shared by every segment.
/// - `trunk_length` / `twig_length` - Segment length ramp.
/// - `trunk_width` / `twig_width` - Segment width ramp.
/// - `trunk_branchability` / `twig_branchability` - Fork probability ramp.
/// - `max_angle_delta` - Heading jitter range for a child that did not fork.
/// - `branched` - Jitter settings for forked children.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig<C> {
    pub iterations: u32,
    pub position: DVec2,
    pub color: C,

    pub trunk_length: f64,
    pub twig_length: f64,

    pub trunk_width: f64,
    pub twig_width: f64,

    pub trunk_branchability: f64,
    pub twig_branchability: f64,

    pub max_angle_delta: f64,
    #[serde(default)]
    pub branched: BranchedConfig,
}

impl<C> TreeConfig<C> {
    /// Default parameters with the given stroke color.
    pub fn with_color(color: C) -> Self {
        Self {
            iterations: 30,
            position: DVec2::new(500.0, 1000.0),
            color,
            trunk_length: 120.0,
            twig_length: 20.0,
            trunk_width: 40.0,
            twig_width: 1.0,
            trunk_branchability: 0.0,
            twig_branchability: 0.4,
            max_angle_delta: FRAC_PI_4,
            branched: BranchedConfig::default(),
        }
    }
}

impl<C: DeserializeOwned> TreeConfig<C> {
    /// Parses a parameter set from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON parameter set from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

impl<C: Default> Default for TreeConfig<C> {
    fn default() -> Self {
        Self::with_color(C::default())
    }
}
