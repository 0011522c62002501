use crate::color::{Rgb, level_to_rgb};
use crate::config::{KEY_COUNT, PianoConfig};
use crate::decay::DecayModel;
use crate::error::ConfigError;
use crate::event::PianoEvent;
use crate::notes::NoteTable;
use crate::pixel::PixelMapper;
use crate::sustain::SustainGate;

/// Piano renderer - owns the keyboard state and builds one frame per cycle
///
/// MAX_LEDS is the capacity of the frame buffer; the configured strip
/// length may be shorter.
pub struct Renderer<const MAX_LEDS: usize> {
    // Configuration
    led_count: usize,
    brightness: u8,
    decay: DecayModel,
    mapper: PixelMapper,

    // Internal state
    notes: NoteTable,
    sustain: SustainGate,
    levels: [u8; MAX_LEDS],
    frame_buffer: [Rgb; MAX_LEDS],
}

impl<const MAX_LEDS: usize> Renderer<MAX_LEDS> {
    /// Create a new renderer with a silent keyboard
    pub fn new(config: &PianoConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.led_count > MAX_LEDS {
            return Err(ConfigError::TooManyLeds {
                requested: config.led_count,
                max: MAX_LEDS,
            });
        }

        log::info!(
            "renderer ready: {} LEDs, notes {}..={}, decay {}s..{}s",
            config.led_count,
            config.lowest_note,
            config.highest_note,
            config.lowest_decay,
            config.highest_decay
        );

        Ok(Self {
            led_count: config.led_count,
            brightness: config.brightness,
            decay: DecayModel::from_config(config)?,
            mapper: PixelMapper::new(0, config.key_span(), config.led_count),
            notes: NoteTable::new(config.fade_off_floor),
            sustain: SustainGate::new(),
            levels: [0; MAX_LEDS],
            frame_buffer: [Rgb::default(); MAX_LEDS],
        })
    }

    /// Run one cycle
    ///
    /// Applies the batch, advances decay and returns the new frame.
    pub fn render(&mut self, events: &[PianoEvent]) -> &[Rgb] {
        self.apply_events(events);
        self.notes.tick_decay(&self.decay);
        self.project();
        self.colorize()
    }

    /// Apply one cycle's events to the keyboard state
    ///
    /// The last pedal event in the batch is resolved first; note events
    /// then follow in receive order.
    pub fn apply_events(&mut self, events: &[PianoEvent]) {
        let pedal = events.iter().rev().find_map(|event| match event {
            PianoEvent::Pedal(value) => Some(*value),
            _ => None,
        });
        if let Some(value) = pedal {
            if value != self.sustain.position() {
                log::debug!("pedal {} -> {}", self.sustain.position(), value);
            }
            self.sustain.set(value);
        }

        for event in events {
            match *event {
                PianoEvent::NoteOn { key, velocity } => self.notes.apply_note_on(key, velocity),
                PianoEvent::NoteOff { key } => self.notes.apply_note_off(key),
                PianoEvent::Pedal(_) => {}
            }
        }
    }

    /// Recompute the LED levels from the keyboard state
    ///
    /// Keys are visited in ascending order, so when several keys share an LED
    /// the highest one wins. Keys above the configured range are not projected.
    fn project(&mut self) {
        let floor = self.notes.fade_off_floor();
        let keys = usize::from(self.mapper.high()) + 1;
        let levels = &mut self.levels[..self.led_count];
        levels.fill(0);

        for (key, level) in (0u8..).zip(self.notes.levels().iter().take(keys)) {
            let shown = if self.sustain.should_display(*level, floor) {
                *level
            } else {
                0
            };
            if let Some(slot) = levels.get_mut(self.mapper.map(key)) {
                *slot = shown;
            }
        }
    }

    /// Convert LED levels to output colors
    fn colorize(&mut self) -> &[Rgb] {
        let frame = &mut self.frame_buffer[..self.led_count];
        for (pixel, level) in frame.iter_mut().zip(self.levels.iter()) {
            *pixel = level_to_rgb(*level, self.brightness);
        }
        frame
    }

    /// Per-LED levels of the last rendered frame
    pub fn levels(&self) -> &[u8] {
        &self.levels[..self.led_count]
    }

    /// Colors of the last rendered frame
    pub fn frame(&self) -> &[Rgb] {
        &self.frame_buffer[..self.led_count]
    }

    pub fn notes(&self) -> &NoteTable {
        &self.notes
    }

    /// Current key levels
    pub fn snapshot(&self) -> [u8; KEY_COUNT] {
        self.notes.snapshot()
    }

    pub fn pedal(&self) -> u8 {
        self.sustain.position()
    }

    pub fn led_count(&self) -> usize {
        self.led_count
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Change the output brightness; takes effect on the next frame
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }
}
