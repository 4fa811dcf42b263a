use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossterm::style::Stylize;
use rand::Rng;

use crate::midi::{self, MidiEvent};
use crate::pitch::{self, Difficulty, Notation};

/// Sleep between polls when the input has nothing queued
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Non-blocking supplier of raw MIDI messages
pub trait MessageSource {
    /// The next queued message, or None when nothing is waiting
    fn poll(&mut self) -> Option<Vec<u8>>;
}

/// Sink that raw MIDI messages can be mirrored to
pub trait MessageSink {
    fn send(&mut self, message: &[u8]) -> Result<(), String>;
}

/// Counters for a full run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub asked: u32,
    pub correct: u32,
}

impl Stats {
    /// Percentage of correct answers, or None when no round completed
    pub fn accuracy(&self) -> Option<f64> {
        if self.asked == 0 {
            return None;
        }
        Some(f64::from(self.correct) * 100.0 / f64::from(self.asked))
    }
}

/// One quiz run: ask for a pitch, wait for the matching key press, score it,
/// repeat until stopped.
pub struct Quiz<R: Rng> {
    difficulty: Difficulty,
    notation: Notation,
    channel: u8,
    rng: R,
    stats: Stats,
}

impl<R: Rng> Quiz<R> {
    pub fn new(difficulty: Difficulty, notation: Notation, channel: u8, rng: R) -> Self {
        Self {
            difficulty,
            notation,
            channel,
            rng,
            stats: Stats::default(),
        }
    }

    /// Run rounds until `stop` is raised. Every raw inbound message is
    /// mirrored to `forward` (when given) whether or not it is the awaited
    /// press. A round interrupted before a press is not counted.
    pub fn run(
        &mut self,
        input: &mut dyn MessageSource,
        mut forward: Option<&mut dyn MessageSink>,
        stop: &AtomicBool,
    ) -> Stats {
        while !stop.load(Ordering::Relaxed) {
            let target = pitch::sample(&mut self.rng, self.difficulty);
            let name = pitch::name(target, self.notation);
            print!("Give me a {}... ", name.bold());
            let _ = io::stdout().flush();

            // Discard one queued message so a press from before the prompt
            // cannot answer it
            input.poll();

            let Some(pressed) = self.await_press(input, forward.as_deref_mut(), stop) else {
                break;
            };

            self.stats.asked += 1;
            if pressed == target {
                self.stats.correct += 1;
                println!("👍");
            } else {
                println!("🔥");
            }
        }
        self.stats
    }

    /// Poll until a key press on the configured channel arrives, or `stop`
    /// is raised (then None, and the round is abandoned)
    fn await_press(
        &self,
        input: &mut dyn MessageSource,
        mut forward: Option<&mut (dyn MessageSink + '_)>,
        stop: &AtomicBool,
    ) -> Option<u8> {
        loop {
            if stop.load(Ordering::Relaxed) {
                return None;
            }
            let Some(message) = input.poll() else {
                thread::sleep(POLL_INTERVAL);
                continue;
            };
            // Mirror everything, matched or not; forwarding is best-effort
            if let Some(sink) = forward.as_deref_mut() {
                let _ = sink.send(&message);
            }
            if let MidiEvent::NoteOn { pitch, .. } = midi::classify(&message, self.channel) {
                return Some(pitch);
            }
        }
    }
}
