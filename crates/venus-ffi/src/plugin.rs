//! Plugin lifecycle FFI: `UnityPluginLoad`, `UnityPluginUnload`,
//! `GetTestInteger` and the device-event callback.
//!
//! The host's ABI has no place to hand back a context, so the single
//! loaded [`PluginContext`] lives in a global slot. The slot lock is never
//! held while calling the host's register/unregister functions or its log
//! function. A host that delivers an event synchronously from inside
//! registration finds the slot empty and the event is dropped; a host log
//! function that queries the plugin sees the state after the event.

use std::os::raw::c_int;
use std::sync::Mutex;

use log::{debug, warn};
use venus_core::{DeviceEvent, PluginError, RendererKind};
use venus_plugin::{PluginConfig, PluginContext};

use crate::host_log;
use crate::unity::{HostRegistry, IUnityInterfaces, UnityGfxDeviceEventType};

static PLUGIN: Mutex<Option<PluginContext>> = Mutex::new(None);

/// Serialises load against unload so two racing loads cannot both
/// register with the host.
static LIFECYCLE: Mutex<()> = Mutex::new(());

/// Renderer of the loaded context, or `None` when unloaded.
pub fn current_renderer() -> Option<RendererKind> {
    ffi_lock!(PLUGIN).as_ref().map(PluginContext::renderer)
}

/// `true` while a context is loaded.
pub fn is_loaded() -> bool {
    ffi_lock!(PLUGIN).is_some()
}

extern "system" fn on_graphics_device_event(event_type: UnityGfxDeviceEventType) {
    ffi_guard!({
        let outcome = ffi_lock!(PLUGIN)
            .as_mut()
            .map(|ctx| ctx.handle_device_event(DeviceEvent::from_raw(event_type)));
        // Logged after the slot guard is gone.
        if let Some(outcome) = outcome {
            outcome.log();
        }
    })
}

// ── FFI functions ───────────────────────────────────────────────

/// Called by the host once after loading the library.
///
/// Looks up the graphics interface, registers for device events and
/// records the current renderer. A second call while loaded does nothing.
/// A null registry or a host without graphics leaves the plugin unloaded.
#[no_mangle]
#[allow(unsafe_code, non_snake_case)]
pub extern "system" fn UnityPluginLoad(interfaces: *mut IUnityInterfaces) {
    ffi_guard!({
        host_log::ensure_logger();
        let _lifecycle = ffi_lock!(LIFECYCLE);
        if ffi_lock!(PLUGIN).is_some() {
            debug!("UnityPluginLoad: already loaded");
            return;
        }

        // SAFETY: the host guarantees the registry and the interfaces it
        // returns stay valid until UnityPluginUnload.
        let registry =
            match unsafe { HostRegistry::from_raw(interfaces, Some(on_graphics_device_event)) } {
                Some(r) => r,
                None => {
                    warn!("UnityPluginLoad: {}", PluginError::NullRegistry);
                    return;
                }
            };

        let config = PluginConfig::default();
        host_log::apply_level(config.log_level);
        match PluginContext::load(&registry, config) {
            Ok(ctx) => *ffi_lock!(PLUGIN) = Some(ctx),
            Err(e) => warn!("UnityPluginLoad: {e}"),
        }
    })
}

/// Called by the host before unloading the library.
///
/// Unregisters the device-event callback and releases the context.
/// Does nothing when not loaded.
#[no_mangle]
#[allow(unsafe_code, non_snake_case)]
pub extern "system" fn UnityPluginUnload() {
    ffi_guard!({
        let _lifecycle = ffi_lock!(LIFECYCLE);
        let ctx = ffi_lock!(PLUGIN).take();
        match ctx {
            // Dropped here, outside the slot lock.
            Some(ctx) => drop(ctx),
            None => debug!("UnityPluginUnload: not loaded"),
        }
    })
}

/// The current renderer identifier, or the null renderer (4) when the
/// plugin is not loaded.
#[no_mangle]
#[allow(unsafe_code, non_snake_case)]
pub extern "system" fn GetTestInteger() -> c_int {
    ffi_guard_or!(RendererKind::Null.as_raw(), {
        current_renderer()
            .unwrap_or(RendererKind::Null)
            .as_raw()
    })
}
