//! Scoped pointer-capture subscriptions
//!
//! A drag has to end even when the pointer is released somewhere the widget
//! never hears about. The host owns one [`PointerCaptureHub`] and forwards
//! every window-level pointer release to it. A widget holds a
//! [`PointerCapture`] only while it is dragging; dropping the capture is the
//! unsubscribe, so every exit path (normal release, cancel, disable, widget
//! teardown) releases it.
//!
//! ```rust
//! use leverage_slider::PointerCaptureHub;
//!
//! let hub = PointerCaptureHub::new();
//! let capture = hub.acquire();
//! assert_eq!(hub.active_count(), 1);
//!
//! // Pointer released over some other part of the window
//! hub.dispatch_global_release();
//! assert!(capture.is_released());
//!
//! drop(capture);
//! assert_eq!(hub.active_count(), 0);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
struct CaptureRegistry {
    next_id: u64,
    /// Live captures and whether a global release reached them
    captures: FxHashMap<u64, bool>,
}

/// Host-side dispatcher for pointer releases outside any widget surface
#[derive(Clone, Debug, Default)]
pub struct PointerCaptureHub {
    inner: Rc<RefCell<CaptureRegistry>>,
}

impl PointerCaptureHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to global releases until the returned capture is dropped
    pub fn acquire(&self) -> PointerCapture {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.captures.insert(id, false);

        PointerCapture {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Mark every live capture as released
    ///
    /// Returns how many captures were notified.
    pub fn dispatch_global_release(&self) -> usize {
        let mut registry = self.inner.borrow_mut();
        for released in registry.captures.values_mut() {
            *released = true;
        }
        registry.captures.len()
    }

    /// Number of captures currently held
    pub fn active_count(&self) -> usize {
        self.inner.borrow().captures.len()
    }
}

/// A live subscription to global pointer releases
#[derive(Debug)]
pub struct PointerCapture {
    id: u64,
    registry: Weak<RefCell<CaptureRegistry>>,
}

impl PointerCapture {
    /// Whether a global release arrived since this capture was acquired
    ///
    /// A capture whose hub is gone can no longer be released globally.
    pub fn is_released(&self) -> bool {
        self.registry.upgrade().is_some_and(|registry| {
            registry
                .borrow()
                .captures
                .get(&self.id)
                .copied()
                .unwrap_or(false)
        })
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().captures.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_reaches_only_live_captures() {
        let hub = PointerCaptureHub::new();
        let first = hub.acquire();
        let second = hub.acquire();
        drop(first);

        assert_eq!(hub.dispatch_global_release(), 1);
        assert!(second.is_released());
    }

    #[test]
    fn test_new_capture_starts_unreleased() {
        let hub = PointerCaptureHub::new();
        let old = hub.acquire();
        hub.dispatch_global_release();
        drop(old);

        let fresh = hub.acquire();
        assert!(!fresh.is_released());
    }

    #[test]
    fn test_capture_outliving_hub() {
        let hub = PointerCaptureHub::new();
        let capture = hub.acquire();
        drop(hub);

        assert!(!capture.is_released());
        drop(capture);
    }

    #[test]
    fn test_clones_share_registry() {
        let hub = PointerCaptureHub::new();
        let host_side = hub.clone();
        let capture = hub.acquire();

        assert_eq!(host_side.active_count(), 1);
        host_side.dispatch_global_release();
        assert!(capture.is_released());
    }
}
