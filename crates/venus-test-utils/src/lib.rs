//! Test utilities and mock host types for Venus development.
//!
//! Provides in-process stand-ins for the host capabilities
//! ([`GraphicsInterface`], [`InterfaceRegistry`], [`LogSink`]) and a
//! drop-accounting element type for container lifecycle tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::ffi::CStr;
use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use venus_core::{GraphicsInterface, InterfaceRegistry, LogSink, RendererKind};

pub mod tracked;

pub use tracked::{DropTracker, Tracked};

/// Observable state behind a [`MockGraphics`].
///
/// Shared between the mock handed to the plugin and the test that
/// inspects it afterwards.
#[derive(Debug, Default)]
pub struct MockGraphicsState {
    pub renderer: RendererKind,
    pub registrations: usize,
    pub unregistrations: usize,
    pub renderer_queries: usize,
}

/// Mock implementation of [`GraphicsInterface`].
#[derive(Clone, Default)]
pub struct MockGraphics {
    state: Arc<Mutex<MockGraphicsState>>,
}

impl MockGraphics {
    pub fn new(renderer: RendererKind) -> Self {
        let mock = Self::default();
        mock.state().renderer = renderer;
        mock
    }

    /// Change what the host reports on the next query.
    pub fn set_renderer(&self, renderer: RendererKind) {
        self.state().renderer = renderer;
    }

    /// Lock the shared state for inspection.
    pub fn state(&self) -> MutexGuard<'_, MockGraphicsState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// `true` while registered and not yet unregistered.
    pub fn is_registered(&self) -> bool {
        let s = self.state();
        s.registrations > s.unregistrations
    }
}

impl GraphicsInterface for MockGraphics {
    fn renderer(&self) -> RendererKind {
        let mut s = self.state();
        s.renderer_queries += 1;
        s.renderer
    }

    fn register_device_events(&self) {
        self.state().registrations += 1;
    }

    fn unregister_device_events(&self) {
        self.state().unregistrations += 1;
    }
}

/// Mock implementation of [`InterfaceRegistry`].
///
/// Hands out clones of one [`MockGraphics`], or nothing when built
/// with [`MockRegistry::without_graphics`].
pub struct MockRegistry {
    graphics: Option<MockGraphics>,
}

impl MockRegistry {
    pub fn new(graphics: MockGraphics) -> Self {
        Self {
            graphics: Some(graphics),
        }
    }

    pub fn without_graphics() -> Self {
        Self { graphics: None }
    }
}

impl InterfaceRegistry for MockRegistry {
    fn graphics(&self) -> Option<Box<dyn GraphicsInterface>> {
        self.graphics
            .clone()
            .map(|g| Box::new(g) as Box<dyn GraphicsInterface>)
    }
}

/// A [`LogSink`] that records every message it receives.
#[derive(Clone, Default)]
pub struct CapturingSink {
    messages: Arc<Mutex<Vec<String>>>,
    writes: Arc<AtomicUsize>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages received so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of `write` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl LogSink for CapturingSink {
    fn write(&self, message: &CStr) {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string_lossy().into_owned());
    }
}

/// Counter for objects that must be released exactly once.
#[derive(Clone, Debug, Default)]
pub struct Balance(Arc<AtomicIsize>);

impl Balance {
    pub fn acquire(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> isize {
        self.0.load(Ordering::SeqCst)
    }
}
