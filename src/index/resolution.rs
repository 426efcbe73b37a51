use crate::error::HexbinError;
use crate::index::constants::{DEFAULT_FINEST_RESOLUTION, DEFAULT_RESOLUTION_STEPS};
use crate::index::indexing::to_resolution;
use h3o::Resolution;
use serde::{Deserialize, Serialize};

/// One breakpoint of the zoom table: zooms up to `max_zoom` (and past the
/// previous breakpoint) use `resolution`.
///
/// `max_zoom` itself belongs to this step unless `inclusive` is false, in
/// which case it falls through to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolutionStep {
    pub max_zoom: f64,
    pub resolution: u8,
    #[serde(default = "default_inclusive")]
    pub inclusive: bool,
}

fn default_inclusive() -> bool {
    true
}

impl ResolutionStep {
    /// A step whose upper bound is inclusive.
    pub fn new(max_zoom: f64, resolution: u8) -> Self {
        Self {
            max_zoom,
            resolution,
            inclusive: true,
        }
    }

    /// A step that stops just below `max_zoom`.
    pub fn below(max_zoom: f64, resolution: u8) -> Self {
        Self {
            inclusive: false,
            ..Self::new(max_zoom, resolution)
        }
    }

    fn covers(&self, zoom: f64) -> bool {
        if self.inclusive {
            zoom <= self.max_zoom
        } else {
            zoom < self.max_zoom
        }
    }
}

pub fn default_resolution_steps() -> Vec<ResolutionStep> {
    DEFAULT_RESOLUTION_STEPS
        .iter()
        .map(|&(max_zoom, resolution, inclusive)| ResolutionStep {
            max_zoom,
            resolution,
            inclusive,
        })
        .collect()
}

/// Maps a continuous map zoom to a discrete grid resolution.
///
/// Tables are validated on construction so that a higher zoom never yields a
/// coarser resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionSelector {
    steps: Vec<(ResolutionStep, Resolution)>,
    finest: Resolution,
}

impl ResolutionSelector {
    pub fn new(steps: &[ResolutionStep], finest: u8) -> Result<Self, HexbinError> {
        let finest = to_resolution(finest)?;
        let mut validated: Vec<(ResolutionStep, Resolution)> = Vec::with_capacity(steps.len());

        for step in steps {
            if !step.max_zoom.is_finite() {
                return Err(HexbinError::InvalidConfig(format!(
                    "zoom breakpoint must be finite, got {}",
                    step.max_zoom
                )));
            }
            let resolution = to_resolution(step.resolution)?;
            if let Some(&(prev, prev_res)) = validated.last() {
                if step.max_zoom <= prev.max_zoom {
                    return Err(HexbinError::InvalidConfig(format!(
                        "zoom breakpoints must increase: {} after {}",
                        step.max_zoom, prev.max_zoom
                    )));
                }
                if resolution < prev_res {
                    return Err(HexbinError::InvalidConfig(format!(
                        "resolution {} at zoom {} is coarser than {}",
                        u8::from(resolution),
                        step.max_zoom,
                        u8::from(prev_res)
                    )));
                }
            }
            validated.push((*step, resolution));
        }

        if let Some(&(_, last)) = validated.last() {
            if finest < last {
                return Err(HexbinError::InvalidConfig(format!(
                    "finest resolution {} is coarser than {}",
                    u8::from(finest),
                    u8::from(last)
                )));
            }
        }

        Ok(Self {
            steps: validated,
            finest,
        })
    }

    pub fn coarsest(&self) -> Resolution {
        self.steps.first().map(|&(_, r)| r).unwrap_or(self.finest)
    }

    pub fn finest(&self) -> Resolution {
        self.finest
    }

    /// Picks the resolution for `zoom`. Never fails: NaN falls back to the
    /// coarsest resolution, anything past the last breakpoint to the finest.
    pub fn select(&self, zoom: f64) -> Resolution {
        if zoom.is_nan() {
            return self.coarsest();
        }
        self.steps
            .iter()
            .find(|(step, _)| step.covers(zoom))
            .map(|&(_, r)| r)
            .unwrap_or(self.finest)
    }
}

impl Default for ResolutionSelector {
    fn default() -> Self {
        let steps = default_resolution_steps()
            .into_iter()
            .map(|step| (step, to_default_resolution(step.resolution)))
            .collect();
        Self {
            steps,
            finest: to_default_resolution(DEFAULT_FINEST_RESOLUTION),
        }
    }
}

fn to_default_resolution(level: u8) -> Resolution {
    // Default levels are compile-time constants in 7..=11.
    Resolution::try_from(level).unwrap_or(Resolution::Nine)
}

/// Resolution for `zoom` under the default zoom table.
pub fn resolution_for_zoom(zoom: f64) -> Resolution {
    ResolutionSelector::default().select(zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        assert_eq!(resolution_for_zoom(3.0), Resolution::Seven);
        assert_eq!(resolution_for_zoom(8.0), Resolution::Seven);
        assert_eq!(resolution_for_zoom(8.99), Resolution::Seven);
        assert_eq!(resolution_for_zoom(9.0), Resolution::Eight);
        assert_eq!(resolution_for_zoom(10.0), Resolution::Eight);
        assert_eq!(resolution_for_zoom(11.0), Resolution::Eight);
        assert_eq!(resolution_for_zoom(11.5), Resolution::Nine);
        assert_eq!(resolution_for_zoom(12.0), Resolution::Nine);
        assert_eq!(resolution_for_zoom(13.0), Resolution::Nine);
        assert_eq!(resolution_for_zoom(14.0), Resolution::Ten);
        assert_eq!(resolution_for_zoom(14.99), Resolution::Ten);
        assert_eq!(resolution_for_zoom(15.0), Resolution::Eleven);
        assert_eq!(resolution_for_zoom(16.5), Resolution::Eleven);
    }

    #[test]
    fn test_step_bound_inclusivity() -> Result<(), HexbinError> {
        let inclusive = ResolutionSelector::new(&[ResolutionStep::new(10.0, 7)], 9)?;
        let exclusive = ResolutionSelector::new(&[ResolutionStep::below(10.0, 7)], 9)?;

        assert_eq!(inclusive.select(10.0), Resolution::Seven);
        assert_eq!(exclusive.select(10.0), Resolution::Nine);
        assert_eq!(exclusive.select(9.5), Resolution::Seven);
        Ok(())
    }

    #[test]
    fn test_step_inclusive_by_default_in_json() -> Result<(), serde_json::Error> {
        let step: ResolutionStep = serde_json::from_str(r#"{"max_zoom":9.0,"resolution":7}"#)?;
        assert_eq!(step, ResolutionStep::new(9.0, 7));

        let step: ResolutionStep =
            serde_json::from_str(r#"{"max_zoom":9.0,"resolution":7,"inclusive":false}"#)?;
        assert_eq!(step, ResolutionStep::below(9.0, 7));
        Ok(())
    }

    #[test]
    fn test_monotonic_over_zoom_range() {
        let selector = ResolutionSelector::default();
        let mut previous = selector.select(-5.0);
        let mut zoom = -5.0;
        while zoom <= 25.0 {
            let current = selector.select(zoom);
            assert!(current >= previous, "zoom {} went coarser", zoom);
            previous = current;
            zoom += 0.25;
        }
    }

    #[test]
    fn test_non_finite_zoom() {
        let selector = ResolutionSelector::default();
        assert_eq!(selector.select(f64::NAN), Resolution::Seven);
        assert_eq!(selector.select(f64::NEG_INFINITY), Resolution::Seven);
        assert_eq!(selector.select(f64::INFINITY), Resolution::Eleven);
    }

    #[test]
    fn test_default_matches_explicit_table() -> Result<(), HexbinError> {
        let explicit = ResolutionSelector::new(&default_resolution_steps(), 11)?;
        assert_eq!(explicit, ResolutionSelector::default());
        Ok(())
    }

    #[test]
    fn test_rejects_coarsening_table() {
        let steps = [ResolutionStep::new(9.0, 8), ResolutionStep::new(12.0, 7)];
        assert!(matches!(
            ResolutionSelector::new(&steps, 11),
            Err(HexbinError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_unordered_breakpoints() {
        let steps = [ResolutionStep::new(12.0, 7), ResolutionStep::new(9.0, 8)];
        assert!(ResolutionSelector::new(&steps, 11).is_err());
    }

    #[test]
    fn test_rejects_invalid_resolution() {
        let steps = [ResolutionStep::new(9.0, 16)];
        assert_eq!(
            ResolutionSelector::new(&steps, 11),
            Err(HexbinError::InvalidResolution(16))
        );
    }

    #[test]
    fn test_empty_table_uses_finest() -> Result<(), HexbinError> {
        let selector = ResolutionSelector::new(&[], 9)?;
        assert_eq!(selector.select(1.0), Resolution::Nine);
        assert_eq!(selector.coarsest(), Resolution::Nine);
        Ok(())
    }
}
