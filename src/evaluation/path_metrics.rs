//! Cost and smoothness metrics for grid paths

use std::f64::consts::PI;

use itertools::Itertools;

use crate::common::{GridCoord, SearchResult};

/// Summary of one planner result
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathMetrics {
    pub found: bool,
    /// Sum of move costs; infinite when no path was found
    #[cfg_attr(feature = "serde", serde(with = "unbounded_cost"))]
    pub cost: f64,
    /// Total turning angle along the path (radians)
    pub deviation: f64,
    /// Number of cells on the path
    pub path_len: usize,
    pub explored_count: usize,
    pub iterations: usize,
}

impl PathMetrics {
    pub fn from_result(result: &SearchResult) -> Self {
        let found = result.is_found();
        PathMetrics {
            found,
            cost: if found { path_cost(&result.path) } else { f64::INFINITY },
            deviation: path_deviation(&result.path),
            path_len: result.path.len(),
            explored_count: result.explored_count,
            iterations: result.iterations,
        }
    }
}

/// JSON has no infinity: a missing path's cost is written as `null`
#[cfg(feature = "serde")]
mod unbounded_cost {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(cost: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        cost.is_finite().then_some(*cost).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

/// Sum of step costs: 1 per orthogonal step, √2 per diagonal step
pub fn path_cost(path: &[GridCoord]) -> f64 {
    path.iter()
        .tuple_windows()
        .fold(0.0, |total, (a, b)| total + a.step_cost(b))
}

/// Sum of absolute heading changes at every interior cell, each in [0, π]
pub fn path_deviation(path: &[GridCoord]) -> f64 {
    path.iter()
        .tuple_windows()
        .map(|(&prev, &curr, &next)| {
            let (prev, curr, next) = (prev.to_point(), curr.to_point(), next.to_point());
            let diff = (curr.heading_to(&next) - prev.heading_to(&curr)).abs();
            if diff > PI {
                2.0 * PI - diff
            } else {
                diff
            }
        })
        .fold(0.0, |total, turn| total + turn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{GridPlanner, SearchStatus};
    use crate::mapping::GridWorld;
    use crate::path_planning::AStarPlanner;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, SQRT_2};

    fn c(x: i32, y: i32) -> GridCoord {
        GridCoord::new(x, y)
    }

    #[test]
    fn test_path_cost() {
        assert_eq!(path_cost(&[]), 0.0);
        assert_eq!(path_cost(&[c(0, 0)]), 0.0);
        assert_relative_eq!(path_cost(&[c(0, 0), c(1, 0), c(2, 1), c(2, 2)]), 2.0 + SQRT_2);
    }

    #[test]
    fn test_straight_path_has_no_deviation() {
        assert_eq!(path_deviation(&[c(0, 0), c(1, 1), c(2, 2), c(3, 3)]), 0.0);
        assert_eq!(path_deviation(&[c(0, 0), c(1, 0)]), 0.0);
    }

    #[test]
    fn test_short_paths_have_positive_zero_metrics() {
        for path in [&[][..], &[c(2, 2)][..], &[c(2, 2), c(3, 3)][..]] {
            assert!(path_deviation(path).is_sign_positive());
        }
        assert!(path_cost(&[]).is_sign_positive());
        assert_eq!(format!("{:.2}", path_deviation(&[c(0, 0)])), "0.00");
    }

    #[test]
    fn test_deviation_accumulates_turns() {
        // right turn then a 45 degree turn
        let path = [c(0, 0), c(1, 0), c(1, 1), c(2, 2)];
        assert_relative_eq!(path_deviation(&path), FRAC_PI_2 + FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn test_deviation_wraps_across_pi() {
        // heading 135 deg then -135 deg: a 90 degree turn, not 270
        let path = [c(1, 0), c(0, 1), c(-1, 0)];
        assert_relative_eq!(path_deviation(&path), FRAC_PI_2, epsilon = 1e-12);
        // full reversal
        let back = [c(0, 0), c(1, 0), c(0, 0)];
        assert_relative_eq!(path_deviation(&back), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_metrics_from_result() {
        let world = GridWorld::new(5).unwrap();
        let result = AStarPlanner::default().plan(&world, c(0, 0), c(4, 4)).unwrap();
        let metrics = PathMetrics::from_result(&result);
        assert!(metrics.found);
        assert_eq!(metrics.path_len, 5);
        assert_relative_eq!(metrics.cost, 4.0 * SQRT_2, epsilon = 1e-9);
        assert_eq!(metrics.deviation, 0.0);
        assert_eq!(metrics.iterations, result.iterations);
        assert_eq!(result.status, SearchStatus::Found);
    }

    #[test]
    fn test_metrics_for_failure() {
        let world = GridWorld::from_obstacle_rows(3, &[[0u8, 1, 0], [1, 1, 0], [0, 0, 0]]).unwrap();
        let result = AStarPlanner::default().plan(&world, c(0, 0), c(2, 2)).unwrap();
        let metrics = PathMetrics::from_result(&result);
        assert!(!metrics.found);
        assert_eq!(metrics.cost, f64::INFINITY);
        assert_eq!(metrics.path_len, 0);
        assert_eq!(metrics.deviation, 0.0);
    }
}
