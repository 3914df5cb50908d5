use std::io;

use lamp_grid_core::StorageError;
use lamp_grid_core::persist::{Clock, MemoryStorage, Storage};
use wasm_bindgen::JsValue;

fn js_error(e: JsValue) -> StorageError {
    StorageError::Unavailable(format!("{e:?}"))
}

/// `window.localStorage` as a key/value store.
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        let inner = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { inner })
    }
}

impl Storage for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(js_error)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // Quota errors land here.
        self.inner.set_item(key, value).map_err(js_error)
    }
}

/// `localStorage` when the page allows it, memory otherwise.
pub fn storage() -> Box<dyn Storage> {
    match LocalStorage::open() {
        Ok(local) => Box::new(local),
        Err(e) => {
            tracing::warn!("falling back to in-memory state: {e}");
            Box::new(MemoryStorage::new())
        }
    }
}

/// Milliseconds from `performance.now()`.
pub struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

impl Default for PerformanceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> u64 {
        self.performance
            .as_ref()
            .map_or(0, |p| p.now().max(0.0) as u64)
    }
}

/// Seed drawn from `Math.random()`.
pub fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    let lo = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (hi << 32) | lo
}

/// One formatted event as a console line, without the trailing newline.
fn console_line(bytes: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(bytes);
    let line = line.trim_end();
    (!line.is_empty()).then(|| line.to_string())
}

/// Buffers one formatted event and hands it to `console.log` on drop.
#[derive(Default)]
struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if let Some(line) = console_line(&self.buf) {
            web_sys::console::log_1(&JsValue::from_str(&line));
        }
    }
}

/// Send panics and `tracing` events to the browser console.
pub fn init_console() {
    console_error_panic_hook::set_once();
    // Later handles on the same page keep the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time()
        .with_writer(ConsoleWriter::default)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_line_drops_trailing_newline() {
        assert_eq!(
            console_line(b" WARN falling back to in-memory state\n"),
            Some(" WARN falling back to in-memory state".to_string())
        );
    }

    #[test]
    fn blank_events_are_skipped() {
        assert_eq!(console_line(b"\n"), None);
        assert_eq!(console_line(b""), None);
    }
}
