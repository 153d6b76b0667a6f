//! Day/night background cycle

use serde::{Deserialize, Serialize};

use crate::consts::{FULL_OPACITY, TRANSITION_TIME};

/// Cyclic crossfade between the day and night backgrounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    /// Seconds into the current transition, in `[0, period)`
    pub phase: f32,
    /// Transition length in seconds
    pub period: f32,
    /// True while fading from day to night
    pub day_to_night: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(TRANSITION_TIME)
    }
}

impl Environment {
    pub fn new(period: f32) -> Self {
        Self {
            phase: 0.0,
            period: period.max(f32::EPSILON),
            day_to_night: true,
        }
    }

    /// Advance the cycle; flips direction each time a full period elapses
    pub fn tick(&mut self, dt: f32) {
        self.phase += dt;
        if self.phase >= self.period {
            self.phase = 0.0;
            self.day_to_night = !self.day_to_night;
        }
    }

    /// Blend factor in `[0, 1]`
    pub fn alpha(&self) -> f32 {
        (self.phase / self.period).clamp(0.0, 1.0)
    }

    /// (day, night) weights, summing to 1
    pub fn weights(&self) -> (f32, f32) {
        let alpha = self.alpha();
        if self.day_to_night {
            (1.0 - alpha, alpha)
        } else {
            (alpha, 1.0 - alpha)
        }
    }

    /// (day, night) opacities, summing to `FULL_OPACITY`
    pub fn opacities(&self) -> (u8, u8) {
        let (day, _) = self.weights();
        let day = (day * FULL_OPACITY as f32) as u8;
        (day, FULL_OPACITY - day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_full_day() {
        let env = Environment::default();
        assert_eq!(env.opacities(), (255, 0));
        assert!(env.day_to_night);
    }

    #[test]
    fn test_midpoint_is_even_blend() {
        let mut env = Environment::new(5.0);
        env.tick(2.5);
        let (day, night) = env.weights();
        assert!((day - 0.5).abs() < 1e-5);
        assert!((night - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_flip_after_period() {
        let mut env = Environment::new(5.0);
        env.tick(4.9);
        let (_, night_before) = env.weights();
        assert!(night_before > 0.97);
        env.tick(0.1);
        assert!(!env.day_to_night);
        assert_eq!(env.phase, 0.0);
        // Night weight stays at full through the flip
        let (day, night) = env.weights();
        assert_eq!(day, 0.0);
        assert_eq!(night, 1.0);
        assert_eq!(env.opacities(), (0, 255));
    }

    #[test]
    fn test_full_cycle_returns_to_day() {
        let mut env = Environment::new(5.0);
        for _ in 0..1010 {
            env.tick(0.01);
        }
        // Two flips: back to fading day -> night
        assert!(env.day_to_night);
    }

    proptest! {
        #[test]
        fn prop_weights_sum_to_full(dts in prop::collection::vec(0.0f32..1.0, 0..500)) {
            let mut env = Environment::default();
            for dt in dts {
                env.tick(dt);
                let (day, night) = env.weights();
                prop_assert!((day + night - 1.0).abs() < 1e-5);
                let (d, n) = env.opacities();
                prop_assert_eq!(d as u16 + n as u16, FULL_OPACITY as u16);
            }
        }
    }
}
