use core::fmt;

/// Configuration rejected before the first cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The strip has no LEDs
    EmptyStrip,
    /// The strip is longer than the renderer's frame buffer
    TooManyLeds { requested: usize, max: usize },
    /// The note window is empty, inverted, or wider than the keyboard
    InvalidNoteRange { lowest: u8, highest: u8 },
    /// MIDI channel outside 0-15
    InvalidChannel(u8),
    /// Cycle period of zero
    ZeroCyclePeriod,
    /// A decay time that is zero, negative, or not finite
    NonPositiveDecay,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStrip => write!(f, "LED strip must have at least one LED"),
            Self::TooManyLeds { requested, max } => {
                write!(f, "{} LEDs requested, frame buffer holds {}", requested, max)
            }
            Self::InvalidNoteRange { lowest, highest } => {
                write!(f, "invalid note range {}..={}", lowest, highest)
            }
            Self::InvalidChannel(channel) => write!(f, "invalid MIDI channel {}", channel),
            Self::ZeroCyclePeriod => write!(f, "cycle period must be non-zero"),
            Self::NonPositiveDecay => write!(f, "decay durations must be positive"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Collaborator failure that ends the render loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleError<S, O> {
    /// The event source failed
    Source(S),
    /// The output driver failed
    Output(O),
}

impl<S: fmt::Display, O: fmt::Display> fmt::Display for CycleError<S, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(err) => write!(f, "event source failed: {}", err),
            Self::Output(err) => write!(f, "output driver failed: {}", err),
        }
    }
}

impl<S, O> core::error::Error for CycleError<S, O>
where
    S: fmt::Debug + fmt::Display,
    O: fmt::Debug + fmt::Display,
{
}
