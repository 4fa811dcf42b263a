mod device;
mod midi;
mod pitch;
mod quiz;

use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use crossterm::style::Stylize;

use device::{MidiSink, MidiSource};
use pitch::{Difficulty, Notation};
use quiz::{MessageSink, Quiz};

#[derive(Parser)]
#[command(name = "eartrain", about = "Command-line ear trainer for MIDI instruments")]
#[command(version)]
struct Cli {
    /// Difficulty level: 'easy' is white keys in the 4th octave only,
    /// 'med' is white keys in any octave, 'hard' is any key
    #[arg(long, value_enum, default_value = "easy")]
    difficulty: Difficulty,

    /// Mirror every incoming MIDI message to an output device,
    /// selected interactively
    #[arg(long)]
    forward: bool,

    /// Note naming convention used in prompts
    #[arg(long, value_enum, default_value = "english")]
    notation: Notation,

    /// MIDI input channel to listen on
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=16))]
    channel: u8,
}

fn main() {
    let cli = Cli::parse();

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        if ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed)).is_err() {
            eprintln!("Unable to set Ctrl-C handler");
            process::exit(1);
        }
    }

    let mut input = MidiSource::open().unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });

    let mut output = if cli.forward {
        match MidiSink::open() {
            Ok(sink) => Some(sink),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
    } else {
        None
    };

    let mut quiz = Quiz::new(cli.difficulty, cli.notation, cli.channel, rand::thread_rng());
    let stats = quiz.run(
        &mut input,
        output.as_mut().map(|sink| sink as &mut dyn MessageSink),
        &stop,
    );

    println!();
    match stats.accuracy() {
        Some(accuracy) => println!("Accuracy rate: {}", format!("{:.2}%", accuracy).bold()),
        None => println!("{}", "No completed rounds, no accuracy to report".dim()),
    }
}
