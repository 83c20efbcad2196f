//! Per-render configuration.

use thiserror::Error;

/// Rejected render parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("samples per pixel must be at least 1")]
    NoSamples,
    #[error("gamma must be positive, got {0}")]
    Gamma(f32),
}

/// Immutable render settings, fixed before the first ray is shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub width: u32,
    pub height: u32,
    /// Bounce budget per path; 0 keeps only camera-visible light.
    pub max_bounces: u32,
    pub samples_per_pixel: u32,
    /// Sample emitters explicitly at every diffuse vertex.
    pub next_event_estimation: bool,
    /// Clamp indirect radiance to tame fireflies. Mostly useful together
    /// with next_event_estimation.
    pub fireflies_clamping: bool,
    /// Display gamma applied when the image is written out.
    pub gamma: f32,
}

impl RenderParams {
    pub fn new(
        width: u32,
        height: u32,
        max_bounces: u32,
        samples_per_pixel: u32,
        next_event_estimation: bool,
        fireflies_clamping: bool,
        gamma: f32,
    ) -> Result<Self, ParamsError> {
        if samples_per_pixel == 0 {
            return Err(ParamsError::NoSamples);
        }
        if gamma <= 0.0 {
            return Err(ParamsError::Gamma(gamma));
        }
        Ok(Self {
            width,
            height,
            max_bounces,
            samples_per_pixel,
            next_event_estimation,
            fireflies_clamping,
            gamma,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_samples_and_bad_gamma() {
        assert_eq!(
            RenderParams::new(1, 1, 1, 0, true, false, 2.2),
            Err(ParamsError::NoSamples)
        );
        assert_eq!(
            RenderParams::new(1, 1, 1, 1, true, false, 0.0),
            Err(ParamsError::Gamma(0.0))
        );
        assert!(RenderParams::new(720, 480, 4, 16, true, false, 2.2).is_ok());
    }
}
