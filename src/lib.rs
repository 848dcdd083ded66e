//! EPG - a Euclidean pattern engine and playback synchronizer
//!
//! This library provides the core components for a necklace step sequencer:
//! - Euclidean onset generation and rotation over any step count
//! - Tick-accurate cycle duration and playback phase mapping
//! - A change reactor that recomputes only the derived state an edit touches
//! - Transient per-step activation state for playback feedback
//!
//! Rendering, audio and MIDI transport live outside this crate; it only
//! emits plain derived values (pattern, duration, phase, activation map).

pub mod animation;
pub mod pattern;
pub mod processor;
pub mod timing;

// Re-export commonly used types
pub use animation::{Activation, NoteEvent, StepAnimations};
pub use pattern::{necklace_radius, Pattern, Point};
pub use processor::reactor::{recompute_for, PatternUpdate, Processor, Recompute};
pub use processor::{ChangeNotification, ParamKey, ParameterSet, ProcessorId};
pub use timing::{cycle_duration, phase, pointer_angle, Ticks, PPQN};
