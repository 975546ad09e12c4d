use crate::foundation::core::Fps;
use crate::foundation::error::{StoryError, StoryResult};

/// Upper bound on the settle search; anything slower is rejected as misconfigured.
const MAX_SETTLE_FRAMES: u64 = 100_000;

/// Closed-form damped spring driving a `0 -> 1` entry progress.
///
/// Only critically damped and overdamped configurations are accepted, which keeps the curve
/// monotonic. Once the remaining distance drops below `rest_threshold` the value snaps to `1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Spring constant.
    pub stiffness: f64,
    /// Damping coefficient.
    pub damping: f64,
    /// Mass.
    pub mass: f64,
    /// Distance to the target under which the spring is considered at rest.
    pub rest_threshold: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 100.0,
            mass: 0.5,
            rest_threshold: 0.005,
        }
    }
}

impl SpringConfig {
    /// Reject non-finite, non-positive or underdamped settings.
    pub fn validate(&self) -> StoryResult<()> {
        for (name, v) in [
            ("stiffness", self.stiffness),
            ("damping", self.damping),
            ("mass", self.mass),
            ("rest_threshold", self.rest_threshold),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(StoryError::configuration(format!(
                    "spring {name} must be finite and > 0"
                )));
            }
        }
        if self.rest_threshold >= 1.0 {
            return Err(StoryError::configuration(
                "spring rest_threshold must be < 1",
            ));
        }
        if self.damping_ratio() < 1.0 - 1e-9 {
            return Err(StoryError::configuration(format!(
                "spring is underdamped (damping ratio {:.3} < 1); entry would overshoot",
                self.damping_ratio()
            )));
        }
        Ok(())
    }

    /// `zeta = c / (2 * sqrt(k * m))`.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    fn natural_freq(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    fn raw(&self, secs: f64) -> f64 {
        let w0 = self.natural_freq();
        let zeta = self.damping_ratio();
        let disc = zeta * zeta - 1.0;
        if disc <= 1e-12 {
            // Critically damped.
            let e = (-w0 * secs).exp();
            return 1.0 - e * (1.0 + w0 * secs);
        }
        let root = disc.sqrt();
        let r_slow = -w0 * (zeta - root);
        let r_fast = -w0 * (zeta + root);
        1.0 - (r_fast * (r_slow * secs).exp() - r_slow * (r_fast * secs).exp()) / (r_fast - r_slow)
    }

    /// Progress in `[0, 1]` after `elapsed_frames` frames. Negative input yields `0`.
    pub fn progress(&self, elapsed_frames: f64, fps: Fps) -> f64 {
        if elapsed_frames <= 0.0 {
            return 0.0;
        }
        let v = self.raw(fps.frames_to_secs(elapsed_frames)).clamp(0.0, 1.0);
        if 1.0 - v < self.rest_threshold {
            1.0
        } else {
            v
        }
    }

    /// First whole frame at which [`Self::progress`] reaches exactly `1`.
    pub fn settle_frames(&self, fps: Fps) -> StoryResult<u64> {
        self.validate()?;
        (0..=MAX_SETTLE_FRAMES)
            .find(|&f| self.progress(f as f64, fps) >= 1.0)
            .ok_or_else(|| {
                StoryError::configuration(format!(
                    "spring does not settle within {MAX_SETTLE_FRAMES} frames"
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
