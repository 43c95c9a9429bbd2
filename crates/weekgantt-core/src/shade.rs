//! Per-week bar shading
//!
//! A bar is drawn as one cell per week. Cells darken in three bands so a
//! long bar reads as start / middle / end:
//!
//! | Weeks | Bands |
//! |-------|-------|
//! | 0     | nothing drawn |
//! | 1     | start |
//! | 2     | start, end |
//! | n >= 3 | `n / 3` start, `n / 3` mid, the rest end |

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Rgba};

/// Brightness band of one week cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Start,
    Mid,
    End,
}

/// Shade factors applied to the base color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BandShader {
    /// RGB multiplier for the middle band
    pub mid: f64,
    /// RGB multiplier for the final band
    pub end: f64,
}

impl Default for BandShader {
    fn default() -> Self {
        Self { mid: 0.9, end: 0.8 }
    }
}

impl BandShader {
    pub fn new(mid: f64, end: f64) -> Result<Self, ConfigError> {
        let shader = Self { mid, end };
        shader.validate()?;
        Ok(shader)
    }

    /// Factors must lie in `(0, 1]` with `end <= mid`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |f: f64| f > 0.0 && f <= 1.0;
        if !in_range(self.mid) || !in_range(self.end) {
            return Err(ConfigError::InvalidShade(format!(
                "factors must be in (0, 1], got mid={} end={}",
                self.mid, self.end
            )));
        }
        if self.end > self.mid {
            return Err(ConfigError::InvalidShade(format!(
                "end factor {} is brighter than mid factor {}",
                self.end, self.mid
            )));
        }
        Ok(())
    }

    /// Band of week `week` in a bar `duration_weeks` long
    pub fn band(week: usize, duration_weeks: usize) -> Band {
        match duration_weeks {
            0 | 1 => Band::Start,
            2 => {
                if week == 0 {
                    Band::Start
                } else {
                    Band::End
                }
            }
            n => {
                let third = n / 3;
                if week < third {
                    Band::Start
                } else if week < 2 * third {
                    Band::Mid
                } else {
                    Band::End
                }
            }
        }
    }

    /// Color of `band` for `base`
    pub fn color(&self, base: Rgba, band: Band) -> Rgba {
        match band {
            Band::Start => base,
            Band::Mid => base.scale(self.mid),
            Band::End => base.scale(self.end),
        }
    }

    /// One color per week; empty for durations <= 0
    pub fn shade(&self, base: Rgba, duration_weeks: i64) -> Vec<Rgba> {
        let weeks = usize::try_from(duration_weeks).unwrap_or(0);
        (0..weeks)
            .map(|week| self.color(base, Self::band(week, weeks)))
            .collect()
    }

    /// Same as [`shade`](Self::shade) as `#rrggbb` strings
    pub fn shade_hex(&self, base: Rgba, duration_weeks: i64) -> Vec<String> {
        self.shade(base, duration_weeks)
            .into_iter()
            .map(Rgba::to_hex)
            .collect()
    }
}
