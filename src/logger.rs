//! `log` backend printing over the ESP32 serial console

use esp_println::println;
use log::{LevelFilter, Log, Metadata, Record};

struct EspLogger;

static LOGGER: EspLogger = EspLogger;

impl Log for EspLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            println!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the serial logger; later calls are ignored
pub fn init_logger(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
