//! MIDI keyboard input via midir
//!
//! Finds the first input port whose name contains the configured substring
//! and forwards its raw messages into the renderer's hand-off channel.

use std::error::Error;
use std::fmt;

use midir::{ConnectErrorKind, InitError, MidiInput, MidiInputConnection};
use piano_light_composer::MessageSender;

const CLIENT_NAME: &str = "piano-light-preview";

/// Failure to open a keyboard
#[derive(Debug)]
pub enum InputError {
    /// The MIDI backend could not be initialized
    Init(InitError),
    /// No port name contains the requested device
    NotFound(String),
    /// The port was found but refused the connection
    Connect(ConnectErrorKind),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Init(e) => write!(f, "MIDI init failed: {}", e),
            InputError::NotFound(device) => write!(f, "{} device not found", device),
            InputError::Connect(e) => write!(f, "MIDI connect failed: {}", e),
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InputError::Init(e) => Some(e),
            InputError::NotFound(_) => None,
            InputError::Connect(e) => Some(e),
        }
    }
}

impl From<InitError> for InputError {
    fn from(e: InitError) -> Self {
        InputError::Init(e)
    }
}

/// List the names of every available input port
pub fn list_ports() -> Result<Vec<String>, InputError> {
    let midi_in = MidiInput::new(CLIENT_NAME)?;
    Ok(midi_in
        .ports()
        .iter()
        .filter_map(|port| midi_in.port_name(port).ok())
        .collect())
}

/// Open connection to a keyboard; closed on drop
pub struct KeyboardInput {
    _connection: MidiInputConnection<()>,
    port_name: String,
}

impl KeyboardInput {
    /// Connect to the first port whose name contains `device`
    pub fn open<const SIZE: usize>(
        device: &str,
        sender: MessageSender<'static, SIZE>,
    ) -> Result<Self, InputError> {
        let mut midi_in = MidiInput::new(CLIENT_NAME)?;
        midi_in.ignore(midir::Ignore::All);

        let ports = midi_in.ports();
        let (port, port_name) = ports
            .iter()
            .find_map(|port| {
                let name = midi_in.port_name(port).ok()?;
                name.contains(device).then(|| (port.clone(), name))
            })
            .ok_or_else(|| InputError::NotFound(device.to_string()))?;

        log::info!("opening MIDI input {:?}", port_name);

        let connection = midi_in
            .connect(
                &port,
                "piano-light-input",
                move |_timestamp, message, _| {
                    if sender.try_send_bytes(message).is_err() {
                        log::warn!("MIDI queue full, message dropped");
                    }
                },
                (),
            )
            .map_err(|e| InputError::Connect(e.kind()))?;

        Ok(Self {
            _connection: connection,
            port_name,
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}
