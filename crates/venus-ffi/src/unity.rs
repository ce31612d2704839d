//! Unity native plugin interface: C layouts and trait adapters.
//!
//! Layouts mirror `IUnityInterface.h` and `IUnityGraphics.h`. The host
//! hands the plugin an [`IUnityInterfaces`] table at load; [`HostRegistry`]
//! and [`HostGraphics`] wrap those tables as the `venus-core` capability
//! traits so the plugin context never touches a raw pointer.

use std::ffi::c_void;
use std::ptr::{self, NonNull};

use venus_core::{GraphicsInterface, InterfaceRegistry, RendererKind};

/// `UnityGfxRenderer`: raw renderer-backend identifier.
pub type UnityGfxRenderer = i32;

/// `UnityGfxDeviceEventType`: raw device-event tag.
pub type UnityGfxDeviceEventType = i32;

/// Opaque interface pointer returned by the registry.
pub type IUnityInterface = c_void;

/// Device-event callback registered with [`IUnityGraphics`].
pub type IUnityGraphicsDeviceEventCallback =
    Option<extern "system" fn(event_type: UnityGfxDeviceEventType)>;

/// 128-bit interface identifier, split into two halves.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UnityInterfaceGUID {
    /// High 64 bits.
    pub high: u64,
    /// Low 64 bits.
    pub low: u64,
}

impl UnityInterfaceGUID {
    /// Build a GUID from its two halves.
    pub const fn new(high: u64, low: u64) -> Self {
        Self { high, low }
    }
}

/// GUID of `IUnityGraphics`.
pub const UNITY_GRAPHICS_GUID: UnityInterfaceGUID =
    UnityInterfaceGUID::new(0x7CBA0A9CA4DDB544, 0x8C5AD4926EB17B11);

/// The host's interface registry.
#[repr(C)]
pub struct IUnityInterfaces {
    /// Look up an interface by GUID; null if absent.
    pub get_interface:
        Option<unsafe extern "system" fn(guid: UnityInterfaceGUID) -> *mut IUnityInterface>,
    /// Register an interface under a GUID.
    pub register_interface:
        Option<unsafe extern "system" fn(guid: UnityInterfaceGUID, ptr: *mut IUnityInterface)>,
    /// [`get_interface`](Self::get_interface) with the GUID passed as halves.
    pub get_interface_split:
        Option<unsafe extern "system" fn(high: u64, low: u64) -> *mut IUnityInterface>,
    /// [`register_interface`](Self::register_interface) with the GUID passed as halves.
    pub register_interface_split:
        Option<unsafe extern "system" fn(high: u64, low: u64, ptr: *mut IUnityInterface)>,
}

/// The host's graphics subsystem.
#[repr(C)]
pub struct IUnityGraphics {
    /// The active renderer backend.
    pub get_renderer: Option<unsafe extern "system" fn() -> UnityGfxRenderer>,
    /// Start delivering device events to `callback`.
    pub register_device_event_callback:
        Option<unsafe extern "system" fn(callback: IUnityGraphicsDeviceEventCallback)>,
    /// Stop delivering device events to `callback`.
    pub unregister_device_event_callback:
        Option<unsafe extern "system" fn(callback: IUnityGraphicsDeviceEventCallback)>,
    /// Reserve a range of render-event ids; returns the first.
    pub reserve_event_id_range: Option<unsafe extern "system" fn(count: i32) -> i32>,
}

// ── Adapters ────────────────────────────────────────────────────

/// [`InterfaceRegistry`] over a host-owned [`IUnityInterfaces`] table.
pub struct HostRegistry {
    interfaces: NonNull<IUnityInterfaces>,
    callback: IUnityGraphicsDeviceEventCallback,
}

impl HostRegistry {
    /// Wrap a raw registry pointer. Returns `None` if it is null.
    ///
    /// `callback` is what the graphics adapter registers for device
    /// events.
    ///
    /// # Safety
    ///
    /// A non-null `interfaces` must point to a valid table, and every
    /// interface it returns must stay valid until the plugin unloads.
    #[allow(unsafe_code)]
    pub unsafe fn from_raw(
        interfaces: *mut IUnityInterfaces,
        callback: IUnityGraphicsDeviceEventCallback,
    ) -> Option<Self> {
        Some(Self {
            interfaces: NonNull::new(interfaces)?,
            callback,
        })
    }

    #[allow(unsafe_code)]
    fn lookup(&self, guid: UnityInterfaceGUID) -> *mut IUnityInterface {
        // SAFETY: the table is valid per the `from_raw` contract.
        let table = unsafe { self.interfaces.as_ref() };
        // SAFETY: host-provided lookup functions accept any GUID.
        unsafe {
            if let Some(get) = table.get_interface {
                get(guid)
            } else if let Some(get_split) = table.get_interface_split {
                get_split(guid.high, guid.low)
            } else {
                ptr::null_mut()
            }
        }
    }
}

impl InterfaceRegistry for HostRegistry {
    fn graphics(&self) -> Option<Box<dyn GraphicsInterface>> {
        let table = NonNull::new(self.lookup(UNITY_GRAPHICS_GUID).cast::<IUnityGraphics>())?;
        Some(Box::new(HostGraphics {
            table,
            callback: self.callback,
        }))
    }
}

/// [`GraphicsInterface`] over a host-owned [`IUnityGraphics`] table.
pub struct HostGraphics {
    table: NonNull<IUnityGraphics>,
    callback: IUnityGraphicsDeviceEventCallback,
}

// SAFETY: the table is immutable host data that outlives the plugin, and
// the host accepts calls into it from any thread.
#[allow(unsafe_code)]
unsafe impl Send for HostGraphics {}

impl HostGraphics {
    #[allow(unsafe_code)]
    fn table(&self) -> &IUnityGraphics {
        // SAFETY: valid until unload per the `HostRegistry::from_raw` contract.
        unsafe { self.table.as_ref() }
    }
}

impl GraphicsInterface for HostGraphics {
    #[allow(unsafe_code)]
    fn renderer(&self) -> RendererKind {
        match self.table().get_renderer {
            // SAFETY: host function with no preconditions.
            Some(get) => RendererKind::from_raw(unsafe { get() }),
            None => RendererKind::Null,
        }
    }

    #[allow(unsafe_code)]
    fn register_device_events(&self) {
        if let Some(register) = self.table().register_device_event_callback {
            // SAFETY: the callback is a plain function valid for the
            // lifetime of the library.
            unsafe { register(self.callback) };
        }
    }

    #[allow(unsafe_code)]
    fn unregister_device_events(&self) {
        if let Some(unregister) = self.table().unregister_device_event_callback {
            // SAFETY: same callback that was registered.
            unsafe { unregister(self.callback) };
        }
    }
}
