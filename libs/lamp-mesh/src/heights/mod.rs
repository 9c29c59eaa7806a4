//! # Height Schedules
//!
//! Pure functions from a story index to a height multiplier or an angle,
//! and the cumulative height list the frame stack is built from.
//!
//! ## Methods
//!
//! | Method | Multiplier at story `i` | Angle at story `i` |
//! |---|---|---|
//! | None | `1` | `0` |
//! | Incremental | `1 + i·angle·total` | `i·angle·total` |
//! | Sin | `min + (max−min)(sin(period·i + phase)·½ + ½)` | same |
//!
//! Multipliers are clamped at zero so cumulative heights never decrease.

#[cfg(test)]
mod tests;

use config::constants::EPSILON;

/// Per-story processing method.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ProcessingMethod {
    /// Constant
    #[default]
    None,
    /// Linear growth of `angle` per story, scaled by `total`
    Incremental {
        /// Step per story
        angle: f64,
        /// Optional scale on every step
        total: Option<f64>,
    },
    /// Sinusoid between `min` and `max`
    Sin {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
        /// Angular frequency per story, radians
        period: f64,
        /// Phase offset, radians
        phase_shift: f64,
    },
}

impl ProcessingMethod {
    /// Height multiplier of story `i`.
    pub fn height_multiplier(&self, i: usize) -> f64 {
        let value = match *self {
            ProcessingMethod::None => 1.0,
            ProcessingMethod::Incremental { .. } => 1.0 + self.angle_at(i),
            ProcessingMethod::Sin { .. } => self.angle_at(i),
        };
        value.max(0.0)
    }

    /// Angle of story `i`, in whatever unit the method's bounds use.
    ///
    /// # Examples
    /// ```
    /// use lamp_mesh::heights::ProcessingMethod;
    ///
    /// let method = ProcessingMethod::Incremental { angle: 5.0, total: None };
    /// assert_eq!(method.angle_at(3), 15.0);
    /// ```
    pub fn angle_at(&self, i: usize) -> f64 {
        let i = i as f64;
        match *self {
            ProcessingMethod::None => 0.0,
            ProcessingMethod::Incremental { angle, total } => i * angle * total.unwrap_or(1.0),
            ProcessingMethod::Sin {
                min,
                max,
                period,
                phase_shift,
            } => min + (max - min) * ((period * i + phase_shift).sin() * 0.5 + 0.5),
        }
    }
}

/// How story deltas are scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightMode {
    /// Every story is `base_height` times its multiplier
    Absolute {
        /// Height of an unscaled story
        base_height: f64,
    },
    /// Stories are rescaled so the stack reaches `total_height`
    Relative {
        /// Final cumulative height
        total_height: f64,
    },
}

/// Story count, scaling mode and method of a height schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightGenerator {
    /// Number of stories
    pub story_count: u32,
    /// Absolute or relative scaling
    pub mode: HeightMode,
    /// Per-story multiplier
    pub method: ProcessingMethod,
}

impl Default for HeightGenerator {
    fn default() -> Self {
        Self {
            story_count: 4,
            mode: HeightMode::Absolute { base_height: 100.0 },
            method: ProcessingMethod::None,
        }
    }
}

impl HeightGenerator {
    /// An absolute schedule.
    pub fn absolute(story_count: u32, base_height: f64, method: ProcessingMethod) -> Self {
        Self {
            story_count,
            mode: HeightMode::Absolute { base_height },
            method,
        }
    }

    /// A schedule rescaled to `total_height`.
    pub fn relative(story_count: u32, total_height: f64, method: ProcessingMethod) -> Self {
        Self {
            story_count,
            mode: HeightMode::Relative { total_height },
            method,
        }
    }
}

/// Cumulative story heights, `story_count + 1` entries starting at 0.
///
/// A relative schedule whose multipliers are all zero falls back to evenly
/// spaced stories.
///
/// # Examples
/// ```
/// use lamp_mesh::heights::{get_heights, HeightGenerator, ProcessingMethod};
///
/// let heights = get_heights(&HeightGenerator::absolute(4, 100.0, ProcessingMethod::None));
/// assert_eq!(heights, vec![0.0, 100.0, 200.0, 300.0, 400.0]);
/// ```
pub fn get_heights(generator: &HeightGenerator) -> Vec<f64> {
    let count = generator.story_count as usize;
    let base = match generator.mode {
        HeightMode::Absolute { base_height } => base_height.max(0.0),
        HeightMode::Relative { .. } => 1.0,
    };

    let mut heights = Vec::with_capacity(count + 1);
    let mut current = 0.0;
    heights.push(current);
    for i in 0..count {
        current += base * generator.method.height_multiplier(i);
        heights.push(current);
    }

    if let HeightMode::Relative { total_height } = generator.mode {
        if current > EPSILON {
            let scale = total_height.max(0.0) / current;
            heights.iter_mut().for_each(|h| *h *= scale);
        } else if count > 0 {
            tracing::warn!(stories = count, "all story multipliers are zero, spacing stories evenly");
            let step = total_height.max(0.0) / count as f64;
            heights = (0..=count).map(|i| i as f64 * step).collect();
        }
    }
    heights
}
