//! Desktop preview for piano-light-composer
//!
//! Opens a MIDI keyboard, runs the render loop at the configured cycle and
//! shows the LED strip in a window. Pedal and test-note controls feed the
//! same channel as the keyboard, using the keyboard's marker framing.
//!
//! Usage: `piano-light-preview [--device NAME] [--config PATH] [--list] [--virtual]`

mod config;
mod midi_input;

use std::convert::Infallible;
use std::error::Error;
use std::path::Path;
use std::time::Instant as StdInstant;

use eframe::egui;
use piano_light_composer::midi::{CC_NOTE_MARKER, CC_SUSTAIN};
use piano_light_composer::{
    FrameScheduler, Instant, MessageChannel, MessageReceiver, MessageSender, MidiMessage,
    OutputDriver, PianoConfig, Rgb,
};

use config::FileConfig;
use midi_input::KeyboardInput;

/// Maximum number of LEDs the renderer supports
const MAX_LEDS: usize = 180;

/// Maximum number of events applied per cycle
const BATCH_SIZE: usize = 64;

/// MIDI hand-off channel size
const CHANNEL_SIZE: usize = 256;

/// Size of each LED rectangle in pixels
const LED_SIZE: f32 = 12.0;

/// Gap between LEDs
const LED_GAP: f32 = 2.0;

/// Static channel between the MIDI callback thread and the render loop
static MIDI_CHANNEL: MessageChannel<CHANNEL_SIZE> = MessageChannel::new();

type Scheduler =
    FrameScheduler<MessageReceiver<'static, CHANNEL_SIZE>, PreviewOutput, MAX_LEDS, BATCH_SIZE>;

/// Window-backed strip: the frame is read back from the scheduler when painting
#[derive(Default)]
struct PreviewOutput {
    frames_written: u64,
}

impl OutputDriver for PreviewOutput {
    type Error = Infallible;

    fn write(&mut self, _colors: &[Rgb]) -> Result<(), Self::Error> {
        self.frames_written += 1;
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let arg_value = |flag: &str| {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1).cloned())
    };

    if args.iter().any(|a| a == "--list") {
        for name in midi_input::list_ports()? {
            log::info!("MIDI input: {}", name);
        }
        return Ok(());
    }

    let file = match arg_value("--config") {
        Some(path) => FileConfig::load(Path::new(&path))?,
        None => FileConfig::default(),
    };
    let config = file.apply(PianoConfig::DEFAULT);
    let device = arg_value("--device").unwrap_or_else(|| file.device().to_string());

    let mut scheduler = Scheduler::new(MIDI_CHANNEL.receiver(), PreviewOutput::default(), &config)?;
    let Ok(()) = scheduler.begin();

    let keyboard = if args.iter().any(|a| a == "--virtual") {
        log::info!("running without a MIDI device");
        None
    } else {
        Some(KeyboardInput::open(&device, MIDI_CHANNEL.sender())?)
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 400.0])
            .with_title("Piano Light Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "piano-light-preview",
        options,
        Box::new(move |_cc| Ok(Box::new(PreviewApp::new(scheduler, keyboard, &config)))),
    )?;
    Ok(())
}

struct PreviewApp {
    /// The render loop
    scheduler: Scheduler,
    /// Sender for on-screen controls
    sender: MessageSender<'static, CHANNEL_SIZE>,
    /// Open keyboard connection, if any
    keyboard: Option<KeyboardInput>,
    /// Wall-clock origin of the render timeline
    started: StdInstant,
    /// Deadline of the next cycle
    next_deadline: Instant,
    /// Channel and key range of the on-screen controls
    channel: u8,
    notes: (u8, u8),

    // UI state
    /// Whether the on-screen pedal is down
    pedal: bool,
    /// MIDI note used by the test buttons
    test_note: u8,
    /// LED pixel size for display
    led_size: f32,
}

impl PreviewApp {
    fn new(scheduler: Scheduler, keyboard: Option<KeyboardInput>, config: &PianoConfig) -> Self {
        Self {
            scheduler,
            sender: MIDI_CHANNEL.sender(),
            keyboard,
            started: StdInstant::now(),
            next_deadline: Instant::from_millis(0),
            channel: config.channel,
            notes: (config.lowest_note, config.highest_note),
            pedal: false,
            test_note: 60u8.clamp(config.lowest_note, config.highest_note),
            led_size: LED_SIZE,
        }
    }

    /// Render timeline position
    #[allow(clippy::cast_possible_truncation)]
    fn now(&self) -> Instant {
        Instant::from_micros(self.started.elapsed().as_micros() as u64)
    }

    /// Queue a message as if it came from the keyboard
    fn send(&self, message: MidiMessage) {
        if self.sender.try_send(message).is_err() {
            log::warn!("MIDI queue full, control dropped");
        }
    }

    /// Queue a note message behind the keyboard's marker
    fn send_note(&self, message: MidiMessage) {
        self.send(MidiMessage::control_change(self.channel, CC_NOTE_MARKER, 0));
        self.send(message);
    }

    /// Run the render cycle if its deadline has passed
    fn run_cycle(&mut self) -> std::time::Duration {
        let now = self.now();
        if now >= self.next_deadline {
            let Ok(result) = self.scheduler.tick(now);
            self.next_deadline = result.next_deadline;
        }
        let remaining = self.next_deadline.saturating_duration_since(self.now());
        std::time::Duration::from_micros(remaining.as_micros())
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let wait = self.run_cycle();
        ctx.request_repaint_after(wait);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                let source = self
                    .keyboard
                    .as_ref()
                    .map_or("virtual", KeyboardInput::port_name);
                ui.label(format!("Input: {source}"));
                ui.add_space(16.0);
                ui.label(format!("Pedal: {}", self.scheduler.renderer().pedal()));
                ui.add_space(16.0);
                ui.label(format!(
                    "Frames: {}",
                    self.scheduler.output().frames_written
                ));
                ui.add_space(16.0);
                ui.label(format!("Dropped: {}", MIDI_CHANNEL.dropped()));
            });

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.checkbox(&mut self.pedal, "Sustain pedal").changed() {
                    let value = if self.pedal { 127 } else { 0 };
                    self.send(MidiMessage::control_change(self.channel, CC_SUSTAIN, value));
                }

                ui.add_space(16.0);

                ui.label("Note:");
                ui.add(egui::DragValue::new(&mut self.test_note).range(self.notes.0..=self.notes.1));
                if ui.button("Strike").clicked() {
                    self.send_note(MidiMessage::note_on(self.channel, self.test_note, 100));
                }
                if ui.button("Release").clicked() {
                    self.send_note(MidiMessage::note_off(self.channel, self.test_note, 0));
                }

                ui.add_space(16.0);

                let mut brightness = self.scheduler.renderer().brightness();
                ui.label("Brightness:");
                if ui.add(egui::Slider::new(&mut brightness, 0..=255)).changed() {
                    self.scheduler.renderer_mut().set_brightness(brightness);
                }

                ui.add_space(16.0);

                ui.label("Size:");
                ui.add(egui::Slider::new(&mut self.led_size, 4.0..=32.0));
            });

            ui.add_space(16.0);

            // === LED Display ===
            let frame = self.scheduler.frame();
            let available_width = ui.available_width();
            let led_pitch = self.led_size + LED_GAP;

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let leds_per_row = (available_width / led_pitch).floor().max(1.0) as usize;
            let rows = frame.len().div_ceil(leds_per_row);
            #[allow(clippy::cast_precision_loss)]
            let height = rows as f32 * led_pitch;

            let (response, painter) =
                ui.allocate_painter(egui::vec2(available_width, height), egui::Sense::hover());
            let origin = response.rect.min;

            #[allow(clippy::cast_precision_loss)]
            for (i, pixel) in frame.iter().enumerate() {
                let row = i / leds_per_row;
                let col = i % leds_per_row;
                let x = origin.x + col as f32 * led_pitch;
                let y = origin.y + row as f32 * led_pitch;

                let rect = egui::Rect::from_min_size(
                    egui::pos2(x, y),
                    egui::vec2(self.led_size, self.led_size),
                );
                let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                painter.rect_filled(rect, 3.0, color);
            }
        });
    }
}

impl Drop for PreviewApp {
    fn drop(&mut self) {
        let Ok(()) = self.scheduler.blank();
        log::info!("strip cleared, exiting");
    }
}
