//! Drives the exported entry points the way a host would.
//!
//! All tests share the plugin's global slot, so each takes `serial()`.

use std::ffi::{c_char, CStr};
use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::sync::{mpsc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use venus_ffi::unity::{
    IUnityGraphics, IUnityGraphicsDeviceEventCallback, IUnityInterface, IUnityInterfaces,
    UnityGfxDeviceEventType, UnityGfxRenderer, UnityInterfaceGUID, UNITY_GRAPHICS_GUID,
};
use venus_ffi::{GetTestInteger, InitLogFunc, TermLogFunc, UnityPluginLoad, UnityPluginUnload};

static TEST_LOCK: Mutex<()> = Mutex::new(());

static RENDERER: AtomicI32 = AtomicI32::new(21);
static REGISTERS: AtomicUsize = AtomicUsize::new(0);
static UNREGISTERS: AtomicUsize = AtomicUsize::new(0);
static FIRE_ON_REGISTER: AtomicBool = AtomicBool::new(false);
static CALLBACK: Mutex<IUnityGraphicsDeviceEventCallback> = Mutex::new(None);
static LOG: Mutex<Vec<String>> = Mutex::new(Vec::new());
static SEEN: AtomicI32 = AtomicI32::new(-1);

const NULL_RENDERER: i32 = 4;

fn serial() -> MutexGuard<'static, ()> {
    let guard = TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    UnityPluginUnload();
    TermLogFunc();
    RENDERER.store(21, Ordering::SeqCst);
    REGISTERS.store(0, Ordering::SeqCst);
    UNREGISTERS.store(0, Ordering::SeqCst);
    FIRE_ON_REGISTER.store(false, Ordering::SeqCst);
    *CALLBACK.lock().unwrap() = None;
    LOG.lock().unwrap().clear();
    SEEN.store(-1, Ordering::SeqCst);
    guard
}

fn fire(event: UnityGfxDeviceEventType) {
    let cb = *CALLBACK.lock().unwrap();
    if let Some(cb) = cb {
        cb(event);
    }
}

// ── Mock host ───────────────────────────────────────────────────

unsafe extern "system" fn get_renderer() -> UnityGfxRenderer {
    RENDERER.load(Ordering::SeqCst)
}

unsafe extern "system" fn register(cb: IUnityGraphicsDeviceEventCallback) {
    REGISTERS.fetch_add(1, Ordering::SeqCst);
    *CALLBACK.lock().unwrap() = cb;
    if FIRE_ON_REGISTER.load(Ordering::SeqCst) {
        if let Some(cb) = cb {
            cb(0);
        }
    }
}

unsafe extern "system" fn unregister(_cb: IUnityGraphicsDeviceEventCallback) {
    UNREGISTERS.fetch_add(1, Ordering::SeqCst);
    *CALLBACK.lock().unwrap() = None;
}

static GRAPHICS: IUnityGraphics = IUnityGraphics {
    get_renderer: Some(get_renderer),
    register_device_event_callback: Some(register),
    unregister_device_event_callback: Some(unregister),
    reserve_event_id_range: None,
};

unsafe extern "system" fn get_interface(guid: UnityInterfaceGUID) -> *mut IUnityInterface {
    if guid == UNITY_GRAPHICS_GUID {
        ptr::addr_of!(GRAPHICS) as *mut IUnityInterface
    } else {
        ptr::null_mut()
    }
}

unsafe extern "system" fn get_nothing(_guid: UnityInterfaceGUID) -> *mut IUnityInterface {
    ptr::null_mut()
}

fn host(get: unsafe extern "system" fn(UnityInterfaceGUID) -> *mut IUnityInterface) -> IUnityInterfaces {
    IUnityInterfaces {
        get_interface: Some(get),
        register_interface: None,
        get_interface_split: None,
        register_interface_split: None,
    }
}

unsafe extern "C" fn capture_log(message: *const c_char) {
    let text = CStr::from_ptr(message).to_string_lossy().into_owned();
    LOG.lock().unwrap().push(text);
}

/// Queries the plugin from inside the host log function.
unsafe extern "C" fn query_on_log(message: *const c_char) {
    capture_log(message);
    SEEN.store(GetTestInteger(), Ordering::SeqCst);
}

/// Uninstalls the host log function from inside itself.
unsafe extern "C" fn terminate_on_log(message: *const c_char) {
    capture_log(message);
    TermLogFunc();
}

/// Replaces the host log function from inside itself.
unsafe extern "C" fn switch_on_log(_message: *const c_char) {
    InitLogFunc(Some(capture_log));
}

/// Run `f` on a worker thread; `false` if it has not finished in time.
fn finishes<F: FnOnce() + Send + 'static>(f: F) -> bool {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        f();
        let _ = tx.send(());
    });
    rx.recv_timeout(Duration::from_secs(5)).is_ok()
}

fn load_mock_host() {
    let mut interfaces = host(get_interface);
    UnityPluginLoad(&mut interfaces);
}

// ── Tests ───────────────────────────────────────────────────────

#[test]
fn query_before_load_is_null() {
    let _g = serial();
    assert_eq!(GetTestInteger(), NULL_RENDERER);
}

#[test]
fn load_records_renderer_immediately() {
    let _g = serial();
    let mut interfaces = host(get_interface);
    UnityPluginLoad(&mut interfaces);
    assert_eq!(GetTestInteger(), 21);
    assert_eq!(REGISTERS.load(Ordering::SeqCst), 1);
    UnityPluginUnload();
}

#[test]
fn device_events_update_renderer() {
    let _g = serial();
    let mut interfaces = host(get_interface);
    UnityPluginLoad(&mut interfaces);

    fire(1);
    assert_eq!(GetTestInteger(), NULL_RENDERER);

    RENDERER.store(2, Ordering::SeqCst);
    fire(0);
    assert_eq!(GetTestInteger(), 2);

    fire(2);
    fire(3);
    fire(99);
    assert_eq!(GetTestInteger(), 2);
    UnityPluginUnload();
}

#[test]
fn unload_unregisters_once_and_resets_query() {
    let _g = serial();
    let mut interfaces = host(get_interface);
    UnityPluginLoad(&mut interfaces);
    UnityPluginUnload();
    UnityPluginUnload();
    assert_eq!(UNREGISTERS.load(Ordering::SeqCst), 1);
    assert_eq!(GetTestInteger(), NULL_RENDERER);
    assert!(!venus_ffi::plugin::is_loaded());
}

#[test]
fn second_load_is_ignored() {
    let _g = serial();
    let mut interfaces = host(get_interface);
    UnityPluginLoad(&mut interfaces);
    UnityPluginLoad(&mut interfaces);
    assert_eq!(REGISTERS.load(Ordering::SeqCst), 1);
    UnityPluginUnload();
    assert_eq!(UNREGISTERS.load(Ordering::SeqCst), 1);
}

#[test]
fn null_registry_leaves_plugin_unloaded() {
    let _g = serial();
    UnityPluginLoad(ptr::null_mut());
    assert!(!venus_ffi::plugin::is_loaded());
    assert_eq!(GetTestInteger(), NULL_RENDERER);
}

#[test]
fn host_without_graphics_leaves_plugin_unloaded() {
    let _g = serial();
    let mut interfaces = host(get_nothing);
    UnityPluginLoad(&mut interfaces);
    assert!(!venus_ffi::plugin::is_loaded());
    assert_eq!(REGISTERS.load(Ordering::SeqCst), 0);
}

#[test]
fn event_fired_during_registration_does_not_deadlock() {
    let _g = serial();
    FIRE_ON_REGISTER.store(true, Ordering::SeqCst);
    RENDERER.store(16, Ordering::SeqCst);
    let mut interfaces = host(get_interface);
    UnityPluginLoad(&mut interfaces);
    assert_eq!(GetTestInteger(), 16);
    UnityPluginUnload();
}

#[test]
fn events_after_unload_are_ignored() {
    let _g = serial();
    let mut interfaces = host(get_interface);
    UnityPluginLoad(&mut interfaces);
    let cb = *CALLBACK.lock().unwrap();
    UnityPluginUnload();
    if let Some(cb) = cb {
        cb(0);
    }
    assert_eq!(GetTestInteger(), NULL_RENDERER);
}

#[test]
fn lifecycle_is_logged_to_host() {
    let _g = serial();
    InitLogFunc(Some(capture_log));
    let mut interfaces = host(get_interface);
    UnityPluginLoad(&mut interfaces);
    UnityPluginUnload();
    TermLogFunc();

    let log = LOG.lock().unwrap().clone();
    assert!(log.iter().any(|m| m == "[INFO] venus_plugin::context: plugin loaded"));
    assert!(log.iter().any(|m| m.ends_with("graphics device initialized: Vulkan")));
    assert!(log.iter().any(|m| m.ends_with("plugin unloaded")));
}

#[test]
fn failed_load_warns_host() {
    let _g = serial();
    InitLogFunc(Some(capture_log));
    UnityPluginLoad(ptr::null_mut());
    TermLogFunc();
    let log = LOG.lock().unwrap().clone();
    assert!(log
        .iter()
        .any(|m| m.starts_with("[WARN]") && m.contains("registry is null")));
}

#[test]
fn null_log_function_uninstalls() {
    let _g = serial();
    InitLogFunc(Some(capture_log));
    InitLogFunc(None);
    let mut interfaces = host(get_interface);
    UnityPluginLoad(&mut interfaces);
    UnityPluginUnload();
    assert!(LOG.lock().unwrap().is_empty());
}

#[test]
fn raw_messages_pass_through() {
    let _g = serial();
    venus_ffi::host_log::log_message(Some(c"dropped"));
    InitLogFunc(Some(capture_log));
    venus_ffi::host_log::log_message(Some(c"hello"));
    venus_ffi::host_log::log_message(None);
    TermLogFunc();
    venus_ffi::host_log::log_message(Some(c"dropped too"));
    assert_eq!(*LOG.lock().unwrap(), vec!["hello".to_string()]);
}

#[test]
fn log_function_may_query_plugin_during_device_event() {
    let _g = serial();
    load_mock_host();
    InitLogFunc(Some(query_on_log));

    RENDERER.store(2, Ordering::SeqCst);
    assert!(finishes(|| fire(0)));
    assert_eq!(SEEN.load(Ordering::SeqCst), 2);

    assert!(finishes(|| fire(1)));
    assert_eq!(SEEN.load(Ordering::SeqCst), NULL_RENDERER);

    TermLogFunc();
    UnityPluginUnload();
}

#[test]
fn log_function_may_uninstall_itself() {
    let _g = serial();
    InitLogFunc(Some(terminate_on_log));
    assert!(finishes(load_mock_host));
    assert!(venus_ffi::plugin::is_loaded());

    let log = LOG.lock().unwrap().clone();
    assert_eq!(log.len(), 1);
    assert!(log[0].ends_with("plugin loaded"));
    UnityPluginUnload();
}

#[test]
fn log_function_may_replace_itself() {
    let _g = serial();
    InitLogFunc(Some(switch_on_log));
    assert!(finishes(load_mock_host));
    UnityPluginUnload();
    TermLogFunc();

    let log = LOG.lock().unwrap().clone();
    assert!(!log.iter().any(|m| m.ends_with("plugin loaded")));
    assert!(log.iter().any(|m| m.ends_with("graphics device initialized: Vulkan")));
    assert!(log.iter().any(|m| m.ends_with("plugin unloaded")));
}
