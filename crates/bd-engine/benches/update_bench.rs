use std::cell::Cell;

use bd_engine::{Clock, Millis, NoDisplay, NoPwm, Rng, Sequencer, ToneOutput};
use bd_ir::{LedConfig, LedPattern, Note, Voice};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

struct BenchClock(Cell<Millis>);

impl Clock for BenchClock {
    fn now_millis(&self) -> Millis {
        self.0.get()
    }
}

struct NullTone;

impl ToneOutput for NullTone {
    fn start_tone(&mut self, _voice: Voice, frequency: u16) {
        black_box(frequency);
    }

    fn stop_tone(&mut self, _voice: Voice) {}
}

fn song() -> Vec<Note> {
    (0..64).map(|i| Note::new(262 + i * 10, 1)).collect()
}

/// Polls where nothing is due: the common case in a busy host loop.
fn bench_idle_tick(c: &mut Criterion) {
    let notes = [Note::new(440, u16::MAX)];
    let clock = BenchClock(Cell::new(0));
    let mut seq = Sequencer::new(NullTone, NoPwm, &clock, Rng::from_seed(1));
    seq.set_song(&notes, &notes);
    seq.play();

    c.bench_function("update_nothing_due", |b| {
        b.iter(|| {
            seq.update();
            black_box(seq.is_playing());
        })
    });
}

/// Every poll crosses a note boundary and renders an LED frame.
fn bench_note_change(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_note_change");
    let notes = song();

    for pattern in LedPattern::ALL {
        let clock = BenchClock(Cell::new(0));
        let mut seq = Sequencer::new(NullTone, NoPwm, &clock, Rng::from_seed(1))
            .with_display(NoDisplay, Default::default());
        seq.setup_leds(LedConfig::from_raw([1, 2, 3, 4, 5]));
        seq.set_led_interval(0);
        seq.set_led_pattern(pattern);
        seq.set_song(&notes, &notes);

        group.bench_with_input(BenchmarkId::from_parameter(pattern.name()), &pattern, |b, _| {
            b.iter(|| {
                if !seq.is_playing() {
                    seq.play();
                }
                clock.0.set(clock.0.get().wrapping_add(1));
                seq.update();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_idle_tick, bench_note_change);
criterion_main!(benches);
