//! Viewport size tracking and canvas binding.
//!
//! The host (the terminal event loop) owns a [`Viewport`] and calls
//! [`Viewport::resize`] whenever the visible area changes. Interested parties
//! subscribe; each subscription is released when its guard is dropped, so a
//! canvas that goes away never leaves a listener behind.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::canvas::Canvas;

/// Size of the drawable area in canvas pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

type Listener = Rc<RefCell<dyn FnMut(Size)>>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

/// The visible area and its resize listeners.
#[derive(Debug, Default)]
pub struct Viewport {
    size: Cell<Size>,
    listeners: Rc<RefCell<Listeners>>,
}

impl Viewport {
    pub fn new(size: Size) -> Self {
        Self {
            size: Cell::new(size),
            listeners: Rc::default(),
        }
    }

    pub fn size(&self) -> Size {
        self.size.get()
    }

    /// Update the size and notify every listener, in subscription order.
    pub fn resize(&self, size: Size) {
        self.size.set(size);
        let current: Vec<Listener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in current {
            // A listener resizing the viewport from inside its own callback
            // is not notified again.
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (*callback)(size);
            }
        }
    }

    /// Register a resize listener. It stays registered until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe(&self, callback: impl FnMut(Size) + 'static) -> Subscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        let listener: Listener = Rc::new(RefCell::new(callback));
        listeners.entries.push((id, listener));
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

/// Guard of a resize listener; dropping it unsubscribes.
#[derive(Debug)]
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .entries
                .retain(|(id, _)| *id != self.id);
        }
    }
}

/// Keeps a canvas sized to the viewport for as long as it is alive.
#[derive(Debug)]
#[must_use = "dropping the binding stops resizing the canvas"]
pub struct CanvasBinding {
    _subscription: Subscription,
}

impl CanvasBinding {
    /// Stop following the viewport.
    pub fn unbind(self) {}
}

/// Size `canvas` to the viewport now and on every later resize.
///
/// The viewport only holds a weak reference to the canvas.
pub fn setup_canvas(canvas: &Rc<RefCell<Canvas>>, viewport: &Viewport) -> CanvasBinding {
    let size = viewport.size();
    canvas.borrow_mut().set_size(size.width, size.height);

    let weak = Rc::downgrade(canvas);
    let subscription = viewport.subscribe(move |size| {
        let Some(canvas) = weak.upgrade() else {
            return;
        };
        match canvas.try_borrow_mut() {
            Ok(mut canvas) => {
                canvas.set_size(size.width, size.height);
                log::debug!("canvas resized to {}x{}", size.width, size.height);
            }
            Err(_) => log::warn!("canvas busy during resize, skipping"),
        }
    });

    CanvasBinding {
        _subscription: subscription,
    }
}
