//! Processor parameters and the change-notification stream.
//!
//! A processor's parameters live in an external state store. This core only
//! ever sees them as full snapshots carried on change notifications; the
//! setters here are the clamping boundary that keeps snapshots valid.

pub mod reactor;

/// Stable identifier an external store uses to address one processor.
pub type ProcessorId = String;

/// Upper bound on the necklace step count.
pub const MAX_STEPS: usize = 64;

/// Smallest allowed rate, keeps cycle durations strictly positive.
pub const MIN_RATE: f64 = 1.0 / 128.0;

/// Named parameter a change notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    Steps,
    Pulses,
    Rotation,
    Rate,
    NoteLength,
    IsTriplets,
    IsMute,
}

/// One processor's editable parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    steps: usize,
    pulses: usize,
    rotation: i64,
    rate: f64,
    note_length: f64,
    is_triplets: bool,
    is_mute: bool,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            steps: 16,
            pulses: 4,
            rotation: 0,
            rate: 0.25,
            note_length: 0.25,
            is_triplets: false,
            is_mute: false,
        }
    }
}

impl ParameterSet {
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Clamped into `[1, MAX_STEPS]`; shrinking also pulls `pulses` down so
    /// it never exceeds the step count.
    pub fn set_steps(&mut self, steps: usize) {
        self.steps = steps.clamp(1, MAX_STEPS);
        self.pulses = self.pulses.min(self.steps);
    }

    pub fn pulses(&self) -> usize {
        self.pulses
    }

    pub fn set_pulses(&mut self, pulses: usize) {
        self.pulses = pulses.min(self.steps);
    }

    pub fn rotation(&self) -> i64 {
        self.rotation
    }

    /// Any sign or magnitude is fine, rotation normalizes at application.
    pub fn set_rotation(&mut self, rotation: i64) {
        self.rotation = rotation;
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate.max(MIN_RATE);
    }

    pub fn note_length(&self) -> f64 {
        self.note_length
    }

    pub fn set_note_length(&mut self, note_length: f64) {
        self.note_length = note_length.max(MIN_RATE);
    }

    pub fn is_triplets(&self) -> bool {
        self.is_triplets
    }

    pub fn set_is_triplets(&mut self, is_triplets: bool) {
        self.is_triplets = is_triplets;
    }

    pub fn is_mute(&self) -> bool {
        self.is_mute
    }

    pub fn set_is_mute(&mut self, is_mute: bool) {
        self.is_mute = is_mute;
    }
}

/// Discrete change event from the external state store: which processor,
/// which parameter, and the full post-edit snapshot.
#[derive(Debug, Clone)]
pub struct ChangeNotification {
    pub processor_id: ProcessorId,
    pub key: ParamKey,
    pub params: ParameterSet,
}
