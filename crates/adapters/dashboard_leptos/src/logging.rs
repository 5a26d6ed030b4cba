//! `tracing` subscriber that writes to the browser console.

use std::io;

use benchhub_app::config::LoggingConfig;
use tracing::{Level, Metadata};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

/// Buffers one formatted event and hands it to the console on drop.
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buffer);
        let line = JsValue::from_str(text.trim_end());
        match self.level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

/// Picks the console method matching each event's level.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// Parse the configured directive, falling back to `info`.
fn filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_new(&config.filter).unwrap_or_else(|err| {
        leptos::logging::warn!("invalid log filter {:?}: {err}", config.filter);
        EnvFilter::new("info")
    })
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(config: &LoggingConfig) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter(config))
        .with_writer(MakeConsoleWriter)
        .with_ansi(false)
        .without_time()
        .with_target(true)
        .try_init();
    if installed.is_err() {
        leptos::logging::warn!("tracing subscriber already installed");
    }
}
