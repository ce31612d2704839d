//! Bridge from the `log` facade to a host-supplied sink.
//!
//! The host hands over a plain C function taking a null-terminated string.
//! [`HostLogger`] formats each enabled record as `[LEVEL] target: message`,
//! drops any interior NUL bytes so the host sees the whole line, and
//! delivers it through the installed [`LogSink`]. With no sink installed
//! every record is discarded.

use std::ffi::CStr;
use std::fmt::{self, Write as _};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use log::{LevelFilter, Log, Metadata, Record};
use venus_core::LogSink;
use venus_vtd::DynArray;

/// Initial line buffer size; most lines fit without regrowing.
const LINE_CAPACITY: usize = 128;

/// A [`log::Log`] implementation forwarding to an optional host sink.
///
/// Usable as a `static`: [`HostLogger::new`] is `const`, and the sink can
/// be installed, replaced and removed at any time, including from inside
/// the sink's own `write`. No lock is held while the sink runs.
pub struct HostLogger {
    sink: RwLock<Option<Arc<dyn LogSink>>>,
    level: AtomicUsize,
}

impl HostLogger {
    /// A logger with no sink, filtering at `Info`.
    pub const fn new() -> Self {
        Self {
            sink: RwLock::new(None),
            level: AtomicUsize::new(LevelFilter::Info as usize),
        }
    }

    /// Install `sink`, replacing any previous one.
    pub fn install(&self, sink: Box<dyn LogSink>) {
        *self.sink.write().unwrap_or_else(|e| e.into_inner()) = Some(Arc::from(sink));
    }

    /// Remove the current sink. Returns `true` if one was installed.
    pub fn uninstall(&self) -> bool {
        self.sink
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .is_some()
    }

    /// The current sink, cloned out so the lock is released before use.
    fn current_sink(&self) -> Option<Arc<dyn LogSink>> {
        self.sink.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// `true` while a sink is installed.
    pub fn is_installed(&self) -> bool {
        self.sink
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Most verbose level forwarded to the sink.
    pub fn level(&self) -> LevelFilter {
        let raw = self.level.load(Ordering::Relaxed);
        LevelFilter::iter()
            .find(|l| *l as usize == raw)
            .unwrap_or(LevelFilter::Off)
    }

    /// Change the most verbose level forwarded to the sink.
    ///
    /// This filters only what this logger delivers; the global
    /// `log::max_level` is left to whoever registered the logger.
    pub fn set_level(&self, level: LevelFilter) {
        self.level.store(level as usize, Ordering::Relaxed);
    }

    /// Deliver `message` verbatim, bypassing level filtering and
    /// formatting. A `None` message or a missing sink is a no-op.
    pub fn log_message(&self, message: Option<&CStr>) {
        let Some(message) = message else {
            return;
        };
        if let Some(sink) = self.current_sink() {
            sink.write(message);
        }
    }
}

impl Default for HostLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HostLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostLogger")
            .field("level", &self.level())
            .field("installed", &self.is_installed())
            .finish()
    }
}

impl Log for HostLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(sink) = self.current_sink() else {
            return;
        };

        let mut line = Line(DynArray::with_capacity(LINE_CAPACITY));
        if write!(line, "[{}] {}: {}", record.level(), record.target(), record.args()).is_err() {
            return;
        }
        let mut bytes = line.0;
        bytes.push_back(0);
        // Interior NULs were dropped while writing, so this only fails if
        // that invariant is broken; skip the line rather than truncate it.
        if let Ok(message) = CStr::from_bytes_with_nul(&bytes) {
            sink.write(message);
        }
    }

    fn flush(&self) {}
}

/// Formatting target that drops NUL bytes.
struct Line(DynArray<u8>);

impl fmt::Write for Line {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if s.as_bytes().contains(&0) {
            for &b in s.as_bytes().iter().filter(|&&b| b != 0) {
                self.0.push_back(b);
            }
        } else {
            self.0.extend_from_slice(s.as_bytes());
        }
        Ok(())
    }
}
