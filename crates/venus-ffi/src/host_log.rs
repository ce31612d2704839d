//! Host log sink: `InitLogFunc` / `TermLogFunc`.
//!
//! The host passes a plain `void (*)(const char*)`. It is wrapped as a
//! [`LogSink`] and installed into [`HOST_LOGGER`], which is registered as
//! the process-wide `log` logger on first use.

use std::ffi::{c_char, CStr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use log::LevelFilter;
use venus_core::LogSink;
use venus_plugin::{HostLogger, PluginConfig};

/// Host log function: receives one null-terminated message.
pub type UnityLogFunc = Option<unsafe extern "C" fn(message: *const c_char)>;

/// The logger every `log` macro in the plugin ends up in.
pub static HOST_LOGGER: HostLogger = HostLogger::new();

static REGISTER: Once = Once::new();

/// Whether [`HOST_LOGGER`] won the global registration.
static REGISTERED: AtomicBool = AtomicBool::new(false);

/// Register [`HOST_LOGGER`] as the global logger, once.
///
/// If another logger was registered first (an embedding test harness, for
/// instance), that one stays, its global filter is left alone, and host
/// messages come only from [`log_message`].
pub(crate) fn ensure_logger() {
    REGISTER.call_once(|| {
        if log::set_logger(&HOST_LOGGER).is_ok() {
            REGISTERED.store(true, Ordering::SeqCst);
            apply_level(PluginConfig::DEFAULT_LOG_LEVEL);
        }
    });
}

/// `true` if [`HOST_LOGGER`] is the process-wide `log` logger.
pub fn is_registered() -> bool {
    REGISTERED.load(Ordering::SeqCst)
}

/// Set the level on the host logger, and on the global filter only if
/// the host logger owns it.
pub(crate) fn apply_level(level: LevelFilter) {
    HOST_LOGGER.set_level(level);
    if is_registered() {
        log::set_max_level(level);
    }
}

/// Send `message` to the host verbatim. No-op without a sink or message.
pub fn log_message(message: Option<&CStr>) {
    HOST_LOGGER.log_message(message);
}

struct CallbackSink(unsafe extern "C" fn(message: *const c_char));

impl LogSink for CallbackSink {
    #[allow(unsafe_code)]
    fn write(&self, message: &CStr) {
        // SAFETY: the host installed this function to receive exactly this
        // kind of pointer, valid for the duration of the call.
        unsafe { (self.0)(message.as_ptr()) };
    }
}

// ── FFI functions ───────────────────────────────────────────────

/// Install the host log function. Passing null uninstalls it.
#[no_mangle]
#[allow(unsafe_code, non_snake_case)]
pub extern "system" fn InitLogFunc(func: UnityLogFunc) {
    ffi_guard!({
        ensure_logger();
        match func {
            Some(f) => HOST_LOGGER.install(Box::new(CallbackSink(f))),
            None => {
                HOST_LOGGER.uninstall();
            }
        }
    })
}

/// Uninstall the host log function. Later messages are discarded.
#[no_mangle]
#[allow(unsafe_code, non_snake_case)]
pub extern "system" fn TermLogFunc() {
    ffi_guard!({
        HOST_LOGGER.uninstall();
    })
}
