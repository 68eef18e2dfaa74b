use crate::color::Rgb;
use std::fmt;

/// Length of a full up-and-down cycle of a channel
pub(crate) const CYCLE_MILLIS: u64 = 2000;

/// Phase shift between neighbouring pixels
pub(crate) const PIXEL_PHASE_MILLIS: u64 = 100;

/// Phase shift of the red, green and blue channels
pub(crate) const CHANNEL_PHASE_MILLIS: [u64; 3] = [0, 200, 400];

const HALF_CYCLE_MILLIS: u64 = CYCLE_MILLIS / 2;

/// Animation context passed to animation effects
#[derive(Debug, Clone, Copy)]
pub struct AnimationContext {
    /// Pixel index along the data line
    pub pixel: usize,
    /// Wall clock time of the tick, in milliseconds since the Unix epoch
    pub time_millis: u64,
}

/// Trait for effects driving the built-in animation
pub trait Animation: fmt::Debug {
    /// Color of a single pixel at the tick described by `ctx`
    fn pixel_color(&self, ctx: &AnimationContext) -> Rgb;
}

/// Triangular wave rising from 0 to 1 and back over one cycle
pub fn triangle_wave(value: u64) -> f32 {
    let phase = value % CYCLE_MILLIS;
    if phase >= HALF_CYCLE_MILLIS {
        1.0 - (phase - HALF_CYCLE_MILLIS) as f32 / HALF_CYCLE_MILLIS as f32
    } else {
        phase as f32 / HALF_CYCLE_MILLIS as f32
    }
}

/// Sweep animation - every channel oscillates, shifted along the strip and between channels
#[derive(Debug, Default, Clone, Copy)]
pub struct Sweep;

impl Animation for Sweep {
    fn pixel_color(&self, ctx: &AnimationContext) -> Rgb {
        let base = ctx.pixel as u64 * PIXEL_PHASE_MILLIS + ctx.time_millis;
        let [r, g, b] = CHANNEL_PHASE_MILLIS.map(|phase| triangle_wave(base + phase));
        Rgb::new(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(250, 0.25)]
    #[case(999, 0.999)]
    #[case::fold(1000, 1.0)]
    #[case(1001, 0.999)]
    #[case(1500, 0.5)]
    #[case(1999, 0.001)]
    #[case(2000, 0.0)]
    #[case(2250, 0.25)]
    fn wave_values(#[case] value: u64, #[case] expected: f32) {
        assert!(approx(triangle_wave(value), expected), "{value}: {}", triangle_wave(value));
    }

    #[test]
    fn wave_is_periodic() {
        for value in (0..4000).step_by(37) {
            assert_eq!(triangle_wave(value), triangle_wave(value + CYCLE_MILLIS));
        }
    }

    #[test]
    fn wave_is_continuous() {
        for value in 1..6000 {
            let step = (triangle_wave(value) - triangle_wave(value - 1)).abs();
            assert!(step <= 0.001 + 1e-6, "jump of {step} at {value}");
        }
    }

    #[test]
    fn sweep_phases() {
        let ctx = AnimationContext { pixel: 0, time_millis: 0 };
        let color = Sweep.pixel_color(&ctx);
        assert!(approx(color.r, 0.0));
        assert!(approx(color.g, 0.2));
        assert!(approx(color.b, 0.4));

        // pixel 3 at t=0 is 300ms ahead of pixel 0
        let ctx = AnimationContext { pixel: 3, time_millis: 0 };
        let shifted = Sweep.pixel_color(&ctx);
        let ctx = AnimationContext { pixel: 0, time_millis: 300 };
        assert_eq!(shifted, Sweep.pixel_color(&ctx));
    }

    #[test]
    fn sweep_at_wall_clock_time() {
        let ctx = AnimationContext { pixel: 2, time_millis: 1_700_000_000_123 };
        let color = Sweep.pixel_color(&ctx);
        // 1_700_000_000_323 % 2000 = 323
        assert!(approx(color.r, 0.323));
        assert!(approx(color.g, 0.523));
        assert!(approx(color.b, 0.723));
    }
}
