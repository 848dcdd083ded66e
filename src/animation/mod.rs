//! Transient per-step activation state, driven by player note events.
//!
//! The external player resolves note timing; this module only consumes the
//! already-scheduled delays and keeps a decaying intensity per step for
//! feedback rendering. Nothing here persists beyond one playback cycle.

use std::collections::HashMap;

/// A note about to play, delivered once per animation frame by the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    pub step_index: usize,
    /// Wall-clock delay from now until the note starts, in ms.
    pub delay_to_start_ms: f32,
    /// Wall-clock delay from now until the note ends, in ms.
    pub delay_to_end_ms: f32,
}

/// Intensity divisor applied once per reference frame.
const DECAY_DIVISOR: f32 = 1.1;

/// Reference frame length the decay constant is expressed against (60 fps).
const REF_FRAME_MS: f32 = 1000.0 / 60.0;

/// Records below this intensity are dropped.
const MIN_INTENSITY: f32 = 0.05;

const FULL_INTENSITY: f32 = 1.0;

/// Activation state of one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Activation {
    /// Feedback intensity in `(0, 1]` once active.
    pub intensity: f32,
    /// False while the note's start delay has not elapsed yet.
    pub is_active: bool,
    delay_to_start_ms: f32,
}

/// Map from step index to its activation record.
///
/// A new onset for an already-animating step replaces its record rather than
/// stacking, so at most one record per step exists.
#[derive(Debug, Default)]
pub struct StepAnimations {
    records: HashMap<usize, Activation>,
}

impl StepAnimations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a note event. The step activates once `delay_to_start_ms`
    /// has elapsed, then decays until it is removed.
    pub fn start(&mut self, event: &NoteEvent) {
        self.records.insert(
            event.step_index,
            Activation {
                intensity: FULL_INTENSITY,
                is_active: event.delay_to_start_ms <= 0.0,
                delay_to_start_ms: event.delay_to_start_ms.max(0.0),
            },
        );
    }

    /// Advance all records by `dt_ms` of wall-clock time.
    ///
    /// The decay exponent scales with elapsed time, so the curve is the same
    /// whatever the frame rate: two 16.7 ms frames decay exactly as far as
    /// one 33.3 ms frame.
    pub fn tick(&mut self, dt_ms: f32) {
        let decay = DECAY_DIVISOR.powf(dt_ms / REF_FRAME_MS);
        self.records.retain(|_, record| {
            if !record.is_active {
                record.delay_to_start_ms -= dt_ms;
                if record.delay_to_start_ms <= 0.0 {
                    record.is_active = true;
                }
                return true;
            }
            record.intensity /= decay;
            record.intensity >= MIN_INTENSITY
        });
    }

    /// Current intensity of a step; pending or absent steps read as `0.0`.
    pub fn intensity(&self, step_index: usize) -> f32 {
        match self.records.get(&step_index) {
            Some(record) if record.is_active => record.intensity,
            _ => 0.0,
        }
    }

    pub fn get(&self, step_index: usize) -> Option<&Activation> {
        self.records.get(&step_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Activation)> {
        self.records.iter().map(|(&step, record)| (step, record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
