use crate::error::{PlanError, Result};

/// Shrink applied to every accepted room fragment so outer footprints never touch.
pub const DEFAULT_SAFETY_MARGIN: f64 = 0.001;

/// Neighbour and facade spans shorter than this are treated as noise.
pub const DEFAULT_MERGE_EPSILON: f64 = 0.01;

/// Allowed deviation of `dir(E) · dir(F)` from `-1` for two walls to face each other.
pub const DEFAULT_ANTI_PARALLEL: f64 = 0.01;

/// Maximum distance of a wall from the floor outline to count as external.
pub const DEFAULT_BOUNDARY_DISTANCE: f64 = 0.05;

/// Tunable tolerances of a floor plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanTolerances {
    pub safety_margin: f64,
    pub merge_epsilon: f64,
    pub anti_parallel: f64,
    pub boundary_distance: f64,
}

impl Default for PlanTolerances {
    fn default() -> Self {
        Self {
            safety_margin: DEFAULT_SAFETY_MARGIN,
            merge_epsilon: DEFAULT_MERGE_EPSILON,
            anti_parallel: DEFAULT_ANTI_PARALLEL,
            boundary_distance: DEFAULT_BOUNDARY_DISTANCE,
        }
    }
}

impl PlanTolerances {
    /// Checks that every tolerance is finite and positive.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidArgument` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("safety_margin", self.safety_margin),
            ("merge_epsilon", self.merge_epsilon),
            ("anti_parallel", self.anti_parallel),
            ("boundary_distance", self.boundary_distance),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlanError::InvalidArgument(format!(
                    "tolerance {name} must be positive, got {value}"
                ))
                .into());
            }
        }
        Ok(())
    }
}
