//! Change reactor - owns one processor's derived state and recomputes only
//! what an edited parameter touches, while the pattern keeps playing.

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, trace};

use super::{ChangeNotification, ParamKey, ParameterSet, ProcessorId};
use crate::animation::{NoteEvent, StepAnimations};
use crate::pattern::{self, Pattern, Point};
use crate::timing::{self, Ticks};

/// Pointer radius drawn while the processor is muted.
const MUTED_POINTER_RADIUS: f32 = 4.5;

/// Marker offset outside the necklace dot circle.
const MARKER_OFFSET: f32 = 3.0;

/// Which derived values one parameter change invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recompute {
    pub duration: bool,
    pub pattern: PatternUpdate,
}

/// How the published pattern reacts to a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternUpdate {
    /// Pattern untouched.
    None,
    /// Regenerate the base pattern, then reapply rotation to the fresh base.
    Regenerate,
    /// Reapply rotation to the cached base pattern without regenerating.
    RotateOnly,
}

/// Minimal-recompute dispatch table.
///
/// `note_length` sits in the duration group even though the duration formula
/// never reads it; a change there revalidates the timing snapshot the same
/// way rate edits do. `is_mute` touches nothing derived, it is a visibility
/// pass-through for the rendering collaborator.
pub fn recompute_for(key: ParamKey) -> Recompute {
    match key {
        ParamKey::Steps => Recompute {
            duration: true,
            pattern: PatternUpdate::Regenerate,
        },
        ParamKey::Pulses => Recompute {
            duration: false,
            pattern: PatternUpdate::Regenerate,
        },
        ParamKey::Rotation => Recompute {
            duration: false,
            pattern: PatternUpdate::RotateOnly,
        },
        ParamKey::Rate | ParamKey::NoteLength | ParamKey::IsTriplets => Recompute {
            duration: true,
            pattern: PatternUpdate::None,
        },
        ParamKey::IsMute => Recompute {
            duration: false,
            pattern: PatternUpdate::None,
        },
    }
}

/// One pattern processor: the current parameter snapshot plus every value
/// derived from it.
///
/// Parameter edits arrive on an internal channel (see [`Processor::notifier`])
/// and are drained synchronously by [`Processor::poll_changes`]; the render
/// loop drives [`Processor::frame`] once per animation tick. Dropping the
/// processor drops the channel receiver, which detaches the notification
/// stream.
pub struct Processor {
    id: ProcessorId,
    params: ParameterSet,
    ppqn: Ticks,
    /// Pattern as generated, before rotation. Rotation-only updates reuse it.
    base_pattern: Pattern,
    /// Rotated pattern, the one published to collaborators.
    pattern: Pattern,
    duration: Ticks,
    phase: f64,
    animations: StepAnimations,
    changes_tx: Sender<ChangeNotification>,
    changes_rx: Receiver<ChangeNotification>,
}

impl Processor {
    pub fn new(id: impl Into<ProcessorId>, params: ParameterSet, ppqn: Ticks) -> Self {
        let (changes_tx, changes_rx) = unbounded();
        let base_pattern = Pattern::euclid(params.steps(), params.pulses());
        let pattern = base_pattern.rotated(params.rotation());
        let duration =
            timing::cycle_duration(params.steps(), params.rate(), params.is_triplets(), ppqn);
        Self {
            id: id.into(),
            params,
            ppqn,
            base_pattern,
            pattern,
            duration,
            phase: 0.0,
            animations: StepAnimations::new(),
            changes_tx,
            changes_rx,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn duration(&self) -> Ticks {
        self.duration
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Pointer rotation for the current frame, `2π * phase`.
    pub fn pointer_angle(&self) -> f64 {
        std::f64::consts::TAU * self.phase
    }

    pub fn animations(&self) -> &StepAnimations {
        &self.animations
    }

    /// A sender an external state store can push change notifications into.
    pub fn notifier(&self) -> Sender<ChangeNotification> {
        self.changes_tx.clone()
    }

    /// Drain pending change notifications, applying each one synchronously.
    /// Returns how many were applied (mismatched ids are skipped).
    pub fn poll_changes(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(change) = self.changes_rx.try_recv() {
            if self.apply_change(&change).is_some() {
                applied += 1;
            }
        }
        applied
    }

    /// Apply one change notification.
    ///
    /// Notifications addressed to another processor are ignored and return
    /// `None`. Otherwise the snapshot is adopted, the minimal recompute from
    /// [`recompute_for`] runs to completion, and the performed recompute is
    /// returned so callers (and tests) can observe what was redone.
    pub fn apply_change(&mut self, change: &ChangeNotification) -> Option<Recompute> {
        if change.processor_id != self.id {
            trace!(id = %self.id, other = %change.processor_id, "ignoring change for other processor");
            return None;
        }

        self.params = change.params.clone();
        let recompute = recompute_for(change.key);

        if recompute.duration {
            self.duration = timing::cycle_duration(
                self.params.steps(),
                self.params.rate(),
                self.params.is_triplets(),
                self.ppqn,
            );
        }

        match recompute.pattern {
            PatternUpdate::Regenerate => {
                self.base_pattern = Pattern::euclid(self.params.steps(), self.params.pulses());
                self.pattern = self.base_pattern.rotated(self.params.rotation());
            }
            PatternUpdate::RotateOnly => {
                self.pattern = self.base_pattern.rotated(self.params.rotation());
            }
            PatternUpdate::None => {}
        }

        debug!(
            id = %self.id,
            key = ?change.key,
            duration = self.duration,
            "parameter changed"
        );
        Some(recompute)
    }

    /// Per-frame update from the render loop: map the transport position to
    /// the playback phase, decay running step animations by the elapsed
    /// time, then start animations for newly delivered note events.
    pub fn frame(&mut self, position: Ticks, events: &[NoteEvent], dt_ms: f32) {
        self.phase = timing::phase(position, self.duration);
        self.animations.tick(dt_ms);
        for event in events {
            self.animations.start(event);
        }
    }

    pub fn necklace_radius(&self) -> f32 {
        pattern::necklace_radius(self.params.steps())
    }

    /// Pointer length: pulled in to a fixed short radius while muted.
    pub fn pointer_radius(&self) -> f32 {
        if self.params.is_mute() {
            MUTED_POINTER_RADIUS
        } else {
            self.necklace_radius()
        }
    }

    /// Coordinates of every step dot at the current necklace radius.
    pub fn necklace_points(&self) -> Vec<Point> {
        self.pattern.necklace_points(self.necklace_radius())
    }

    /// Coordinates of the onset dots, for polygon construction.
    pub fn onset_points(&self) -> Vec<Point> {
        self.pattern.onset_points(self.necklace_radius())
    }

    /// Marker showing where unrotated step 0 sits, placed just outside the
    /// necklace at angle `2π * (-rotation / steps)`.
    pub fn zero_marker_point(&self) -> Point {
        let steps = self.params.steps() as f32;
        let rad = std::f32::consts::TAU * (-(self.params.rotation() as f32) / steps);
        let radius = self.necklace_radius() + MARKER_OFFSET;
        Point {
            x: rad.sin() * radius,
            y: rad.cos() * radius,
        }
    }

    /// True when the pattern plays rotated away from its generated form.
    pub fn is_rotated(&self) -> bool {
        self.params.rotation().rem_euclid(self.params.steps() as i64) != 0
    }

    pub fn is_mute(&self) -> bool {
        self.params.is_mute()
    }

    /// Selection visibility pass-through for the rendering collaborator.
    pub fn is_selected(&self, selected_id: &str) -> bool {
        self.id == selected_id
    }
}
