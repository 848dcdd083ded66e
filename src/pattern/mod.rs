//! Euclidean necklace patterns - generation, rotation and dot geometry.
//!
//! A pattern is immutable once built. Edits replace the whole sequence,
//! nothing mutates a pattern in place.

use std::f32::consts::TAU;

/// Ordered sequence of onset flags for one necklace.
///
/// Invariant: the number of `true` flags equals `min(pulses, steps)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    onsets: Vec<bool>,
}

impl Pattern {
    /// Distribute `pulses` onsets as evenly as possible over `steps` slots.
    ///
    /// Bresenham-style distribution: step `i` is an onset iff
    /// `(i * pulses) % steps < pulses`. The tie-break convention this picks:
    /// step 0 carries an onset whenever `pulses > 0`, and the longer gaps
    /// lead from step 0 (so 3 pulses over 8 steps gives gaps 3,3,2). Pure and
    /// deterministic; identical inputs always yield the identical sequence.
    ///
    /// `pulses` greater than `steps` is clamped to full occupancy.
    pub fn euclid(steps: usize, pulses: usize) -> Self {
        debug_assert!(steps >= 1, "pattern needs at least one step");
        let pulses = pulses.min(steps);
        let onsets = (0..steps).map(|i| (i * pulses) % steps < pulses).collect();
        Self { onsets }
    }

    /// Cyclic right shift by `rotation` steps, normalized into `[0, steps)`.
    ///
    /// Output step `i` reads input step `(i - rotation) mod steps`, so the
    /// onset at step 0 lands on step `rotation`. Rotating by any multiple of
    /// `steps` is the identity. Allocates a new pattern.
    pub fn rotated(&self, rotation: i64) -> Self {
        let steps = self.onsets.len();
        if steps == 0 {
            return self.clone();
        }
        let shift = rotation.rem_euclid(steps as i64) as usize;
        let onsets = (0..steps)
            .map(|i| self.onsets[(i + steps - shift) % steps])
            .collect();
        Self { onsets }
    }

    pub fn steps(&self) -> usize {
        self.onsets.len()
    }

    pub fn onset_count(&self) -> usize {
        self.onsets.iter().filter(|&&on| on).count()
    }

    /// True if `step` is an onset. Out-of-range steps read as silent.
    pub fn is_onset(&self, step: usize) -> bool {
        self.onsets.get(step).copied().unwrap_or(false)
    }

    pub fn onsets(&self) -> &[bool] {
        &self.onsets
    }

    /// Coordinates of every step dot on a necklace of the given radius.
    ///
    /// Step 0 sits at twelve o'clock and steps advance clockwise, i.e.
    /// `(sin(2πi/steps) * r, cos(2πi/steps) * r)`.
    pub fn necklace_points(&self, radius: f32) -> Vec<Point> {
        let steps = self.onsets.len();
        (0..steps)
            .map(|i| Point::on_circle(TAU * (i as f32 / steps as f32), radius))
            .collect()
    }

    /// Coordinates of the onset dots only, for polygon construction.
    pub fn onset_points(&self, radius: f32) -> Vec<Point> {
        let steps = self.onsets.len();
        self.onsets
            .iter()
            .enumerate()
            .filter(|(_, &on)| on)
            .map(|(i, _)| Point::on_circle(TAU * (i as f32 / steps as f32), radius))
            .collect()
    }
}

/// Necklace dot-circle radius for a step count, growing past 16 steps.
pub fn necklace_radius(steps: usize) -> f32 {
    8.0 + if steps > 16 {
        (steps - 16) as f32 * 0.5
    } else {
        0.0
    }
}

/// 2-D coordinate handed to the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    fn on_circle(rad: f32, radius: f32) -> Self {
        Self {
            x: rad.sin() * radius,
            y: rad.cos() * radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cyclic gap lengths between consecutive onsets.
    fn gaps(pattern: &Pattern) -> Vec<usize> {
        let positions: Vec<usize> = (0..pattern.steps())
            .filter(|&i| pattern.is_onset(i))
            .collect();
        let n = positions.len();
        (0..n)
            .map(|i| {
                let next = positions[(i + 1) % n];
                (next + pattern.steps() - positions[i]) % pattern.steps()
            })
            .map(|g| if g == 0 { pattern.steps() } else { g })
            .collect()
    }

    #[test]
    fn onset_count_matches_pulses() {
        for steps in 1..=32 {
            for pulses in 0..=steps {
                let p = Pattern::euclid(steps, pulses);
                assert_eq!(p.steps(), steps);
                assert_eq!(p.onset_count(), pulses, "steps={steps} pulses={pulses}");
            }
        }
    }

    #[test]
    fn pulses_clamped_to_steps() {
        let p = Pattern::euclid(8, 12);
        assert_eq!(p.onset_count(), 8);
        assert!(p.onsets().iter().all(|&on| on));
    }

    #[test]
    fn zero_pulses_is_silent() {
        let p = Pattern::euclid(16, 0);
        assert_eq!(p.onset_count(), 0);
    }

    #[test]
    fn gaps_differ_by_at_most_one() {
        for steps in 1..=32 {
            for pulses in 1..=steps {
                let g = gaps(&Pattern::euclid(steps, pulses));
                let max = *g.iter().max().unwrap();
                let min = *g.iter().min().unwrap();
                assert!(max - min <= 1, "steps={steps} pulses={pulses} gaps={g:?}");
            }
        }
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(Pattern::euclid(13, 5), Pattern::euclid(13, 5));
    }

    #[test]
    fn four_on_the_floor() {
        let p = Pattern::euclid(16, 4);
        let positions: Vec<usize> = (0..16).filter(|&i| p.is_onset(i)).collect();
        assert_eq!(positions, vec![0, 4, 8, 12]);
    }

    #[test]
    fn three_over_eight_gap_shape() {
        let p = Pattern::euclid(8, 3);
        assert_eq!(p.onset_count(), 3);
        assert!(p.is_onset(0));
        let mut g = gaps(&p);
        g.sort_unstable();
        assert_eq!(g, vec![2, 3, 3]);
    }

    #[test]
    fn rotation_identity() {
        let p = Pattern::euclid(8, 3);
        assert_eq!(p.rotated(0), p);
        assert_eq!(p.rotated(8), p);
        assert_eq!(p.rotated(-16), p);
    }

    #[test]
    fn rotation_moves_first_onset() {
        let p = Pattern::euclid(8, 1);
        assert!(p.is_onset(0));
        let r = p.rotated(3);
        assert!(r.is_onset(3));
        assert_eq!(r.onset_count(), 1);
    }

    #[test]
    fn negative_rotation_normalizes() {
        let p = Pattern::euclid(8, 3);
        assert_eq!(p.rotated(-1), p.rotated(7));
    }

    #[test]
    fn rotations_compose() {
        let p = Pattern::euclid(12, 5);
        assert_eq!(p.rotated(4).rotated(11), p.rotated(15));
    }

    #[test]
    fn rotation_does_not_mutate_input() {
        let p = Pattern::euclid(8, 3);
        let copy = p.clone();
        let _ = p.rotated(5);
        assert_eq!(p, copy);
    }

    #[test]
    fn radius_grows_past_sixteen_steps() {
        assert_eq!(necklace_radius(8), 8.0);
        assert_eq!(necklace_radius(16), 8.0);
        assert_eq!(necklace_radius(20), 10.0);
    }

    #[test]
    fn necklace_points_start_at_twelve_o_clock() {
        let p = Pattern::euclid(4, 4);
        let pts = p.necklace_points(8.0);
        assert_eq!(pts.len(), 4);
        assert!(pts[0].x.abs() < 1e-5);
        assert!((pts[0].y - 8.0).abs() < 1e-5);
        // step 1 of 4 is three o'clock
        assert!((pts[1].x - 8.0).abs() < 1e-5);
        assert!(pts[1].y.abs() < 1e-5);
    }

    #[test]
    fn onset_points_follow_the_pattern() {
        let p = Pattern::euclid(8, 3);
        assert_eq!(p.onset_points(8.0).len(), 3);
    }
}
