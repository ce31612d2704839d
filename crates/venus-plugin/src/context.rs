//! The plugin's lifecycle state.

use log::{debug, info};
use venus_core::{DeviceEvent, GraphicsInterface, InterfaceRegistry, PluginError, RendererKind};
use venus_vtd::{DynArray, FixedArray};

use crate::config::PluginConfig;

/// Everything the plugin knows while it is loaded.
///
/// Built by [`PluginContext::load`], which registers for device events.
/// Dropping the context unregisters exactly once.
///
/// ```
/// use venus_core::{DeviceEvent, RendererKind};
/// use venus_plugin::{PluginConfig, PluginContext};
/// use venus_test_utils::{MockGraphics, MockRegistry};
///
/// let graphics = MockGraphics::new(RendererKind::Vulkan);
/// let registry = MockRegistry::new(graphics.clone());
/// let mut ctx = PluginContext::load(&registry, PluginConfig::default()).unwrap();
/// assert_eq!(ctx.renderer(), RendererKind::Vulkan);
///
/// ctx.on_device_event(DeviceEvent::Shutdown);
/// assert_eq!(ctx.renderer(), RendererKind::Null);
///
/// drop(ctx);
/// assert!(!graphics.is_registered());
/// ```
pub struct PluginContext {
    graphics: Box<dyn GraphicsInterface>,
    renderer: RendererKind,
    config: PluginConfig,
    history: DynArray<DeviceEvent>,
    counts: FixedArray<u64, { DeviceEvent::KNOWN }>,
    ignored: u64,
}

impl PluginContext {
    /// Look up the host's graphics interface and register for its
    /// device events.
    ///
    /// With `initialize_on_load` set, an `Initialize` event is processed
    /// straight away so the renderer is known even when the device was
    /// created before the plugin loaded.
    ///
    /// # Errors
    ///
    /// [`PluginError::GraphicsUnavailable`] if the registry has no
    /// graphics interface. Nothing is registered in that case.
    pub fn load(
        registry: &dyn InterfaceRegistry,
        config: PluginConfig,
    ) -> Result<Self, PluginError> {
        let graphics = registry
            .graphics()
            .ok_or(PluginError::GraphicsUnavailable)?;
        graphics.register_device_events();

        let mut ctx = Self {
            graphics,
            renderer: RendererKind::Null,
            history: DynArray::with_capacity(config.event_history),
            counts: FixedArray::new(),
            ignored: 0,
            config,
        };
        info!("plugin loaded");
        if ctx.config.initialize_on_load {
            ctx.on_device_event(DeviceEvent::Initialize);
        }
        Ok(ctx)
    }

    /// Handle one device event from the host and log what changed.
    pub fn on_device_event(&mut self, event: DeviceEvent) {
        self.handle_device_event(event).log();
    }

    /// Handle one device event without logging.
    ///
    /// The returned outcome is logged separately with
    /// [`EventOutcome::log`], so a caller holding a lock around the
    /// context can release it first: the host's log function may call
    /// straight back into the plugin.
    pub fn handle_device_event(&mut self, event: DeviceEvent) -> EventOutcome {
        self.record(event);
        match event {
            DeviceEvent::Initialize => {
                self.renderer = self.graphics.renderer();
                EventOutcome::Initialized(self.renderer)
            }
            DeviceEvent::Shutdown => {
                self.renderer = RendererKind::Null;
                EventOutcome::ShutDown
            }
            DeviceEvent::BeforeReset
            | DeviceEvent::AfterReset
            | DeviceEvent::Unrecognized(_) => EventOutcome::Ignored(event),
        }
    }

    fn record(&mut self, event: DeviceEvent) {
        match event.index() {
            Some(i) => self.counts[i] += 1,
            None => self.ignored += 1,
        }

        let limit = self.config.event_history;
        if limit == 0 {
            return;
        }
        if self.history.len() >= limit {
            self.history.erase(0);
        }
        self.history.push_back(event);
    }

    /// The backend recorded by the last `Initialize`, or `Null`.
    pub fn renderer(&self) -> RendererKind {
        self.renderer
    }

    /// The most recent device events, oldest first.
    pub fn event_history(&self) -> &[DeviceEvent] {
        &self.history
    }

    /// How many of each known event have been handled, indexed by
    /// [`DeviceEvent::index`].
    pub fn event_counts(&self) -> &FixedArray<u64, { DeviceEvent::KNOWN }> {
        &self.counts
    }

    /// How many times `event` has been handled.
    pub fn event_count(&self, event: DeviceEvent) -> u64 {
        match event.index() {
            Some(i) => self.counts[i],
            None => self.ignored,
        }
    }

    /// Number of unrecognized event codes received.
    pub fn ignored_events(&self) -> u64 {
        self.ignored
    }

    /// The configuration this context was loaded with.
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }
}

/// What handling a device event did to a [`PluginContext`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    /// The renderer was queried and recorded.
    Initialized(RendererKind),
    /// The renderer was reset to `Null`.
    ShutDown,
    /// Nothing changed.
    Ignored(DeviceEvent),
}

impl EventOutcome {
    /// Emit the lifecycle log line for this outcome.
    pub fn log(self) {
        match self {
            Self::Initialized(renderer) => info!("graphics device initialized: {renderer}"),
            Self::ShutDown => info!("graphics device shut down"),
            Self::Ignored(DeviceEvent::Unrecognized(raw)) => {
                debug!("ignoring unrecognized device event {raw}");
            }
            Self::Ignored(event) => debug!("ignoring {event:?}"),
        }
    }
}

impl Drop for PluginContext {
    fn drop(&mut self) {
        self.graphics.unregister_device_events();
        info!("plugin unloaded");
    }
}

impl std::fmt::Debug for PluginContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginContext")
            .field("renderer", &self.renderer)
            .field("config", &self.config)
            .field("history", &self.history)
            .field("ignored", &self.ignored)
            .finish_non_exhaustive()
    }
}
