//! Frame scheduling and timing utilities.
//!
//! Provides portable cycle pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between cycles.

use embassy_time::{Duration, Instant};

use crate::color::{BLACK, Rgb};
use crate::config::PianoConfig;
use crate::error::{ConfigError, CycleError};
use crate::input::{EventSource, InputProcessor};
use crate::renderer::Renderer;
use crate::OutputDriver;

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
    /// Number of events applied during this frame.
    pub events: usize,
}

/// Portable frame scheduler that drives the render cycle without async.
///
/// This scheduler:
/// - Drains the event source
/// - Calls the renderer and output driver
/// - Tracks cycle timing with drift correction
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(source, driver, &PianoConfig::DEFAULT)?;
/// scheduler.begin()?;
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now))?;
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<S: EventSource, O: OutputDriver, const MAX_LEDS: usize, const BATCH_SIZE: usize>
{
    input: InputProcessor<S, BATCH_SIZE>,
    renderer: Renderer<MAX_LEDS>,
    output: O,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<S: EventSource, O: OutputDriver, const MAX_LEDS: usize, const BATCH_SIZE: usize>
    FrameScheduler<S, O, MAX_LEDS, BATCH_SIZE>
{
    /// Create a new frame scheduler.
    ///
    /// The cycle period comes from `config.cycle_period`.
    pub fn new(source: S, driver: O, config: &PianoConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            input: InputProcessor::from_config(source, config),
            renderer: Renderer::new(config)?,
            output: driver,
            next_frame: Instant::from_millis(0),
            frame_duration: config.cycle_period,
        })
    }

    /// Turn every LED off before the first cycle.
    pub fn begin(&mut self) -> Result<(), O::Error> {
        self.blank()
    }

    /// Write an all-off frame, e.g. before shutting down.
    pub fn blank(&mut self) -> Result<(), O::Error> {
        let frame = [BLACK; MAX_LEDS];
        self.output.write(&frame[..self.renderer.led_count()])
    }

    /// Process one cycle and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Drains pending input
    /// 3. Renders the current frame
    /// 4. Writes to the output driver
    /// 5. Returns the deadline for the next frame
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> Result<FrameResult, CycleError<S::Error, O::Error>> {
        // Drift correction: if we've fallen too far behind, reset to now
        // This prevents catch-up bursts after long stalls
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        let events = self.input.process_pending().map_err(CycleError::Source)?;
        let frame = self.renderer.render(events);
        self.output.write(frame).map_err(CycleError::Output)?;

        self.next_frame += self.frame_duration;

        // Calculate sleep duration (may be zero if we're behind)
        let sleep_duration = if self.next_frame > now {
            self.next_frame - now
        } else {
            Duration::from_ticks(0)
        };

        Ok(FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
            events: events.len(),
        })
    }

    /// Colors of the last frame sent to the output.
    pub fn frame(&self) -> &[Rgb] {
        self.renderer.frame()
    }

    /// Get a reference to the renderer.
    pub fn renderer(&self) -> &Renderer<MAX_LEDS> {
        &self.renderer
    }

    /// Get a mutable reference to the renderer.
    pub fn renderer_mut(&mut self) -> &mut Renderer<MAX_LEDS> {
        &mut self.renderer
    }

    /// Get a reference to the output driver.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the event source.
    pub fn source_mut(&mut self) -> &mut S {
        self.input.source_mut()
    }
}
