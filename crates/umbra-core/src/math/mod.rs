// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides the small set of 2D math primitives the raycaster needs.
//!
//! All angular functions in this module operate in **radians** unless
//! explicitly specified otherwise (e.g., `degrees_to_radians`).
//!
//! The coordinate system is the screen one: `x` grows to the right and `y`
//! grows downwards, so an angle of `PI / 2` points "down" the map.

// --- Fundamental Constants ---

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

pub use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// The factor to convert degrees to radians (PI / 180.0).
pub const DEG_TO_RAD: f32 = PI / 180.0;

// --- Declare Sub-Modules ---

pub mod color;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::color::Color;
pub use self::vector::Vec2;

// --- Utility Functions ---

/// Converts an angle from degrees to radians.
///
/// # Examples
///
/// ```
/// use umbra_core::math::{degrees_to_radians, PI};
/// assert_eq!(degrees_to_radians(180.0), PI);
/// ```
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * DEG_TO_RAD
}

/// Wraps an angle into the `[0, 2π)` range.
///
/// Negative angles and angles of several turns are both accepted.
///
/// # Examples
///
/// ```
/// use umbra_core::math::{normalize_angle, PI, TAU};
/// assert!((normalize_angle(-PI) - PI).abs() < 1e-6);
/// assert!(normalize_angle(TAU) < 1e-6);
/// ```
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // `rem_euclid` can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Re-maps `value` from the `[from_min, from_max]` range into `[to_min, to_max]`.
///
/// The value is not clamped. A degenerate source range maps everything to `to_min`.
///
/// # Examples
///
/// ```
/// use umbra_core::math::map_range;
/// assert_eq!(map_range(5.0, 0.0, 10.0, 0.0, 1.0), 0.5);
/// ```
#[inline]
pub fn map_range(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> f32 {
    let span = from_max - from_min;
    if span.abs() < EPSILON {
        return to_min;
    }
    to_min + (value - from_min) / span * (to_max - to_min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_angle_range() {
        for raw in [-10.0_f32, -TAU, -0.1, 0.0, 1.0, TAU, 3.0 * TAU + 0.5] {
            let a = normalize_angle(raw);
            assert!((0.0..TAU).contains(&a), "{raw} normalized to {a}");
        }
        assert_relative_eq!(normalize_angle(-FRAC_PI_2), 3.0 * FRAC_PI_2, epsilon = 1e-5);
    }

    #[test]
    fn test_map_range_extrapolates() {
        assert_eq!(map_range(15.0, 0.0, 10.0, 0.0, 1.0), 1.5);
        assert_eq!(map_range(3.0, 2.0, 2.0, 7.0, 9.0), 7.0);
    }
}
