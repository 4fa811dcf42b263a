/// Status byte for a Note On message on MIDI channel 1
const NOTE_ON: u8 = 0x90;

/// What one raw MIDI message means to the quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    /// A key was struck on the configured channel
    NoteOn { pitch: u8, velocity: u8 },
    /// Anything else: other channels, other message types, releases
    Other,
}

/// Classify one raw MIDI message for the given channel (1-16).
///
/// Only a 3-byte Note On for the channel counts as a press. A velocity of 0
/// is a Note Off substitute that many instruments send instead of the
/// dedicated Note Off message, so it never counts as a press. Each message
/// is judged on its own; nothing is carried between calls.
pub fn classify(message: &[u8], channel: u8) -> MidiEvent {
    match message {
        &[status, pitch, velocity] => {
            if status != NOTE_ON + (channel - 1) || velocity == 0 {
                MidiEvent::Other
            } else {
                MidiEvent::NoteOn { pitch, velocity }
            }
        }
        _ => MidiEvent::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_on_is_a_press() {
        assert_eq!(
            classify(&[0x90, 60, 64], 1),
            MidiEvent::NoteOn {
                pitch: 60,
                velocity: 64
            }
        );
    }

    #[test]
    fn test_zero_velocity_is_a_release() {
        assert_eq!(classify(&[0x90, 60, 0], 1), MidiEvent::Other);
    }

    #[test]
    fn test_channel_mismatch() {
        assert_eq!(classify(&[0x91, 60, 64], 1), MidiEvent::Other);
        assert_eq!(classify(&[0x90, 60, 64], 2), MidiEvent::Other);
    }

    #[test]
    fn test_channel_offset_matches() {
        assert_eq!(
            classify(&[0x91, 72, 100], 2),
            MidiEvent::NoteOn {
                pitch: 72,
                velocity: 100
            }
        );
        assert_eq!(
            classify(&[0x9F, 36, 1], 16),
            MidiEvent::NoteOn {
                pitch: 36,
                velocity: 1
            }
        );
    }

    #[test]
    fn test_other_statuses_are_ignored() {
        // Note Off and Control Change
        assert_eq!(classify(&[0x80, 60, 64], 1), MidiEvent::Other);
        assert_eq!(classify(&[0xB0, 7, 100], 1), MidiEvent::Other);
    }

    #[test]
    fn test_wrong_length_is_ignored() {
        assert_eq!(classify(&[0x90, 60], 1), MidiEvent::Other);
        assert_eq!(classify(&[], 1), MidiEvent::Other);
        assert_eq!(classify(&[0xF8], 1), MidiEvent::Other);
        assert_eq!(classify(&[0x90, 60, 64, 0], 1), MidiEvent::Other);
    }
}
