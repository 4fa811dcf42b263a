use std::fmt;
use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver};

use midir::{Ignore, MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};

use crate::quiz::{MessageSink, MessageSource};

/// Errors from MIDI device discovery and opening
#[derive(Debug)]
pub enum DeviceError {
    /// The MIDI backend could not be created or queried
    Backend(String),
    /// No ports of the requested kind exist
    NoPorts(&'static str),
    /// The user picked a port that is not on the list
    InvalidSelection(String),
    /// The selected port could not be opened
    Open(String),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::Backend(e) => write!(f, "MIDI backend error: {}", e),
            DeviceError::NoPorts(kind) => write!(f, "no MIDI {} devices available", kind),
            DeviceError::InvalidSelection(s) => write!(f, "invalid MIDI device selected: {}", s),
            DeviceError::Open(e) => write!(f, "failed to open MIDI device: {}", e),
        }
    }
}

/// An opened MIDI input device. Messages arrive on midir's callback thread
/// and queue up until the session polls for them.
pub struct MidiSource {
    receiver: Receiver<Vec<u8>>,
    _conn: MidiInputConnection<()>, // RAII: closes the device when dropped
}

impl MidiSource {
    /// Enumerate input ports, let the user pick one, and open it
    pub fn open() -> Result<Self, DeviceError> {
        let mut midi_in =
            MidiInput::new("eartrain").map_err(|e| DeviceError::Backend(e.to_string()))?;
        // Keep sysex, timing, and active sensing; classification sorts out
        // what matters later
        midi_in.ignore(Ignore::None);

        let ports = midi_in.ports();
        let port = choose_port(&ports, "input", |p| midi_in.port_name(p))?;

        let (sender, receiver) = mpsc::channel();
        let conn = midi_in
            .connect(
                &port,
                "eartrain input",
                move |_stamp, message, _| {
                    let _ = sender.send(message.to_vec());
                },
                (),
            )
            .map_err(|e| DeviceError::Open(e.to_string()))?;

        Ok(Self {
            receiver,
            _conn: conn,
        })
    }
}

impl MessageSource for MidiSource {
    fn poll(&mut self) -> Option<Vec<u8>> {
        self.receiver.try_recv().ok()
    }
}

/// An opened MIDI output device that inbound messages are mirrored to
pub struct MidiSink {
    conn: MidiOutputConnection,
}

impl MidiSink {
    /// Enumerate output ports, let the user pick one, and open it
    pub fn open() -> Result<Self, DeviceError> {
        let midi_out =
            MidiOutput::new("eartrain").map_err(|e| DeviceError::Backend(e.to_string()))?;

        let ports = midi_out.ports();
        let port = choose_port(&ports, "output", |p| midi_out.port_name(p))?;

        let conn = midi_out
            .connect(&port, "eartrain output")
            .map_err(|e| DeviceError::Open(e.to_string()))?;

        Ok(Self { conn })
    }
}

impl MessageSink for MidiSink {
    fn send(&mut self, message: &[u8]) -> Result<(), String> {
        self.conn.send(message).map_err(|e| e.to_string())
    }
}

/// List the available ports and pick one: automatically when only one is
/// offered, otherwise by a 1-based index read from stdin. An index outside
/// the listed range is an error, not a re-prompt.
fn choose_port<P: Clone>(
    ports: &[P],
    kind: &'static str,
    port_name: impl Fn(&P) -> Result<String, midir::PortInfoError>,
) -> Result<P, DeviceError> {
    if ports.is_empty() {
        return Err(DeviceError::NoPorts(kind));
    }

    println!("{} MIDI {} devices available", ports.len(), kind);
    for (i, port) in ports.iter().enumerate() {
        let name = port_name(port).map_err(|e| DeviceError::Backend(e.to_string()))?;
        println!(" - {} port #{}: {}", kind, i + 1, name);
    }

    if ports.len() == 1 {
        println!("Using the only available {} device", kind);
        return Ok(ports[0].clone());
    }

    print!("Which MIDI device to use for {}? ", kind);
    let _ = io::stdout().flush();

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|e| DeviceError::Backend(e.to_string()))?;
    let choice: usize = line
        .trim()
        .parse()
        .map_err(|_| DeviceError::InvalidSelection(line.trim().to_string()))?;
    if choice == 0 || choice > ports.len() {
        return Err(DeviceError::InvalidSelection(choice.to_string()));
    }

    Ok(ports[choice - 1].clone())
}
