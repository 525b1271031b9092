//! Viewport width source and resize subscriptions.
//!
//! Views that paginate hold a [`ResizeListener`] for as long as they are
//! active. Dropping the listener deregisters it, so a deactivated view
//! leaves no subscription behind.

use tokio::sync::watch;

/// The current viewport width, observable by any number of listeners.
pub struct Viewport {
    width: watch::Sender<u32>,
}

impl Viewport {
    pub fn new(width: u32) -> Self {
        let (width, _) = watch::channel(width);
        Self { width }
    }

    pub fn width(&self) -> u32 {
        *self.width.borrow()
    }

    /// Record a new width and wake every listener if it changed.
    pub fn resize(&self, width: u32) {
        let previous = self.width.send_replace(width);
        if previous != width {
            tracing::debug!(previous, width, "Viewport resized");
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.width.receiver_count()
    }

    pub fn listen(&self) -> ResizeListener {
        ResizeListener {
            rx: self.width.subscribe(),
        }
    }
}

/// A registered interest in viewport resizes.
pub struct ResizeListener {
    rx: watch::Receiver<u32>,
}

impl ResizeListener {
    pub fn current(&self) -> u32 {
        *self.rx.borrow()
    }

    /// The new width if it changed since the last poll.
    pub fn poll(&mut self) -> Option<u32> {
        match self.rx.has_changed() {
            Ok(true) => Some(*self.rx.borrow_and_update()),
            _ => None,
        }
    }

    /// Wait for the next resize. `None` once the viewport is gone.
    pub async fn changed(&mut self) -> Option<u32> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
