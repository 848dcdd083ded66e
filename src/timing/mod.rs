//! Tick arithmetic - cycle duration and playback phase mapping.
//!
//! The transport hands this module a monotonic tick position once per
//! animation frame; everything here is pure arithmetic on that position.

use std::f64::consts::TAU;

/// Transport time, in ticks. Fractional because triplet rates scale by 2/3.
pub type Ticks = f64;

/// Default tick resolution per quarter note. The surrounding system may
/// supply its own constant; this is the value the demo transport uses.
pub const PPQN: Ticks = 24.0;

/// Duration of one full pattern cycle in ticks.
///
/// `steps * rate * ppqn`, with `rate` scaled by 2/3 when playing triplets.
/// `rate` is assumed strictly positive by the caller; the parameter model
/// clamps it there. A zero step count yields a zero duration, which phase
/// computation treats as a sentinel.
pub fn cycle_duration(steps: usize, rate: f64, is_triplets: bool, ppqn: Ticks) -> Ticks {
    let rate = if is_triplets { rate * 2.0 / 3.0 } else { rate };
    steps as Ticks * rate * ppqn
}

/// Normalized position within one cycle, in `[0, 1)`.
///
/// The necklace plays in the reverse angular direction of tick advance, so
/// this is `(-position) mod duration / duration` with a Euclidean modulo.
/// A non-positive duration returns the sentinel phase `0.0` instead of
/// dividing by zero.
pub fn phase(position: Ticks, duration: Ticks) -> f64 {
    if duration <= 0.0 {
        return 0.0;
    }
    let phase = (-position).rem_euclid(duration) / duration;
    // rem_euclid can round up to exactly `duration` for tiny positions
    if phase >= 1.0 {
        0.0
    } else {
        phase
    }
}

/// Pointer rotation for the rendering collaborator, `2π * phase`.
pub fn pointer_angle(position: Ticks, duration: Ticks) -> f64 {
    TAU * phase(position, duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_steps_at_quarter_rate() {
        assert_eq!(cycle_duration(8, 1.0, false, 24.0), 192.0);
    }

    #[test]
    fn triplets_scale_by_two_thirds() {
        assert_eq!(cycle_duration(8, 1.0, true, 24.0), 128.0);
    }

    #[test]
    fn duration_never_decreases_with_steps_or_rate() {
        let base = cycle_duration(8, 0.25, false, PPQN);
        assert!(cycle_duration(9, 0.25, false, PPQN) >= base);
        assert!(cycle_duration(8, 0.5, false, PPQN) >= base);
    }

    #[test]
    fn phase_stays_in_unit_interval() {
        let duration = 192.0;
        let mut position = 0.0;
        while position < duration * 4.0 {
            let p = phase(position, duration);
            assert!((0.0..1.0).contains(&p), "position={position} phase={p}");
            position += 7.3;
        }
    }

    #[test]
    fn half_cycle_is_half_phase() {
        assert_eq!(cycle_duration(8, 1.0, false, 24.0), 192.0);
        assert_eq!(phase(96.0, 192.0), 0.5);
    }

    #[test]
    fn phase_wraps_at_cycle_boundaries() {
        let duration = 192.0;
        for k in 0..5 {
            assert_eq!(phase(k as f64 * duration, duration), phase(0.0, duration));
        }
    }

    #[test]
    fn phase_runs_against_the_transport() {
        // a quarter of the way into the cycle, the pointer sits at 3/4
        assert_eq!(phase(48.0, 192.0), 0.75);
    }

    #[test]
    fn zero_duration_returns_sentinel() {
        assert_eq!(phase(500.0, 0.0), 0.0);
        assert_eq!(pointer_angle(500.0, 0.0), 0.0);
    }

    #[test]
    fn angle_is_two_pi_phase() {
        let a = pointer_angle(96.0, 192.0);
        assert!((a - std::f64::consts::PI).abs() < 1e-12);
    }
}
