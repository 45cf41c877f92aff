//! Logging setup
//!
//! Events go to stderr through `tracing_subscriber::fmt`. `RUST_LOG` wins
//! over the verbosity flag when it is set.
//!
//! `LogCapture` is an extra in-memory sink. It collects formatted lines
//! alongside the console so tests and embedding code can read them back,
//! and it can be paused and cleared.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug)]
struct CaptureState {
    buf: Vec<u8>,
    enabled: bool,
}

/// Shared in-memory log sink
#[derive(Debug, Clone)]
pub struct LogCapture {
    state: Arc<Mutex<CaptureState>>,
}

impl Default for LogCapture {
    fn default() -> Self {
        LogCapture {
            state: Arc::new(Mutex::new(CaptureState {
                buf: Vec::new(),
                enabled: true,
            })),
        }
    }
}

impl LogCapture {
    pub fn new() -> Self {
        LogCapture::default()
    }

    fn lock(&self) -> MutexGuard<'_, CaptureState> {
        // A panic while holding the lock leaves a byte buffer; still usable
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Everything captured so far
    pub fn logs(&self) -> String {
        String::from_utf8_lossy(&self.lock().buf).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.logs().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.lock().buf.clear();
    }

    /// Drop incoming lines until `enable` is called
    pub fn disable(&self) {
        self.lock().enabled = false;
    }

    pub fn enable(&self) {
        self.lock().enabled = true;
    }

    /// A standalone subscriber writing only into this capture
    pub fn subscriber(&self, level: tracing::Level) -> impl Subscriber + Send + Sync + use<> {
        fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(level)
            .finish()
    }
}

/// Writer handed out per event by `LogCapture`
pub struct CaptureWriter {
    state: Arc<Mutex<CaptureState>>,
}

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.enabled {
            state.buf.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            state: Arc::clone(&self.state),
        }
    }
}

/// Filter directive used when `RUST_LOG` is not set
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Install the global subscriber: stderr always, plus `capture` if given
pub fn init_logging(verbose: bool, capture: Option<&LogCapture>) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let capture_layer = capture.map(|c| fmt::layer().with_writer(c.clone()).with_ansi(false));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(capture_layer)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))
}
