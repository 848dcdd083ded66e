#[cfg(feature = "cli")]
use std::thread;
#[cfg(feature = "cli")]
use std::time::Duration;

#[cfg(feature = "cli")]
use epg::{ChangeNotification, NoteEvent, ParamKey, ParameterSet, Processor, PPQN};

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary requires the 'cli' feature to be enabled");
    std::process::exit(1);
}

/// Terminal demo: drives one processor from a simple transport loop and
/// prints the necklace with the playback step and activation feedback.
/// Rotates the pattern while it plays to show the minimal recompute path.
#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt::init();

    let mut params = ParameterSet::default();
    params.set_steps(16);
    params.set_pulses(5);
    let mut processor = Processor::new("demo", params, PPQN);
    let notifier = processor.notifier();

    let bpm = 120.0;
    let ticks_per_ms = PPQN * bpm / 60.0 / 1000.0;
    let frame_ms = 33.0_f64;
    let mut position = 0.0;
    let mut last_step = usize::MAX;

    for frame_index in 0..240 {
        // edit the rotation mid-playback, the way a UI slider would
        if frame_index == 120 {
            let mut edited = processor.params().clone();
            edited.set_rotation(3);
            let _ = notifier.send(ChangeNotification {
                processor_id: processor.id().to_string(),
                key: ParamKey::Rotation,
                params: edited,
            });
        }
        processor.poll_changes();

        // stand-in for the external player: an onset on a fresh step
        // boundary becomes an immediately-due note event
        let steps = processor.pattern().steps();
        let step_duration = processor.duration() / steps as f64;
        let step = (position / step_duration) as usize % steps;
        let mut events = Vec::new();
        if step != last_step {
            last_step = step;
            if processor.pattern().is_onset(step) {
                events.push(NoteEvent {
                    step_index: step,
                    delay_to_start_ms: 0.0,
                    delay_to_end_ms: 60.0,
                });
            }
        }

        processor.frame(position, &events, frame_ms as f32);
        print_necklace(&processor, step);

        position += ticks_per_ms * frame_ms;
        thread::sleep(Duration::from_millis(frame_ms as u64));
    }
}

#[cfg(feature = "cli")]
fn print_necklace(processor: &Processor, current_step: usize) {
    let mut line = String::new();
    for i in 0..processor.pattern().steps() {
        let glyph = if processor.animations().intensity(i) > 0.3 {
            '◉'
        } else if processor.pattern().is_onset(i) {
            '●'
        } else if i == current_step {
            '|'
        } else {
            '·'
        };
        line.push(glyph);
        line.push(' ');
    }
    println!("{line} phase {:.2}", processor.phase());
}
