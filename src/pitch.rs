use clap::ValueEnum;
use rand::Rng;
use rand::seq::SliceRandom;

/// Lowest pitch on an 88-key keyboard (A0)
const LOWEST: u8 = 21;
/// Highest pitch on an 88-key keyboard (C8)
const HIGHEST: u8 = 108;
/// Octave index that easy questions are pinned to
const REFERENCE_OCTAVE: u8 = 4;

/// How far sampling may roam across the keyboard
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    /// White keys in the 4th octave only
    Easy,
    /// White keys in any octave
    #[value(name = "med")]
    Medium,
    /// Any key
    Hard,
}

/// Note naming convention used in prompts
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    English,
    Solfege,
}

const NAMES_ENGLISH: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const NAMES_SOLFEGE: [&str; 12] = [
    "Do", "Do#", "Re", "Re#", "Mi", "Fa", "Fa#", "Sol", "Sol#", "La", "La#", "Ti",
];

/// Pitch class within the octave (C=0, B=11)
fn pitch_class(pitch: u8) -> u8 {
    (pitch - 12) % 12
}

/// Octave index of a pitch (A0 is octave 0, middle C is octave 4)
fn octave(pitch: u8) -> u8 {
    (pitch - 12) / 12
}

/// Whether a pitch falls on a black key (C#, D#, F#, G#, A#)
fn is_black_key(pitch: u8) -> bool {
    matches!(pitch_class(pitch), 1 | 3 | 6 | 8 | 10)
}

/// Draw a random target pitch honoring the difficulty tier.
/// The result always lies within the 88-key range.
pub fn sample(rng: &mut impl Rng, difficulty: Difficulty) -> u8 {
    match difficulty {
        Difficulty::Hard => rng.gen_range(LOWEST..=HIGHEST),
        Difficulty::Medium => sample_white(rng),
        // Keep the sampled pitch class, pin the octave
        Difficulty::Easy => pitch_class(sample_white(rng)) + 12 + 12 * REFERENCE_OCTAVE,
    }
}

/// Uniform draw over the white keys of the 88-key range
fn sample_white(rng: &mut impl Rng) -> u8 {
    let whites: Vec<u8> = (LOWEST..=HIGHEST).filter(|&p| !is_black_key(p)).collect();
    // 52 of the 88 keys are white
    *whites.choose(rng).unwrap()
}

/// Render a pitch as a note name with a subscript octave index,
/// e.g. 60 becomes "C₄" or "Do₄"
pub fn name(pitch: u8, notation: Notation) -> String {
    let names = match notation {
        Notation::English => NAMES_ENGLISH,
        Notation::Solfege => NAMES_SOLFEGE,
    };
    format!(
        "{}{}",
        names[pitch_class(pitch) as usize],
        subscript(octave(pitch))
    )
}

/// Subscript digit for an octave index; U+2080 is SUBSCRIPT ZERO and
/// octave indices are a single digit (0-8) across the whole pitch range
fn subscript(octave: u8) -> char {
    char::from_u32(0x2080 + u32::from(octave)).unwrap()
}
