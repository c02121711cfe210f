use crate::config::InteractionConfig;
use crate::panel::{InteractionMode, Panel, PanelPhase};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_CLOSE_DELAY: Duration = Duration::from_millis(200);

/// Drives one mega menu panel with real timers.
///
/// Opening is immediate; closing after a pointer-leave waits `close_delay`
/// so the pointer can travel from the trigger into the panel. State changes
/// are published on a `watch` channel. Dropping the controller cancels the
/// pending close and publishes nothing further.
///
/// Must be used from within a Tokio runtime (the close timer is a task).
#[derive(Debug)]
pub struct HoverController {
    panel: Arc<watch::Sender<Panel>>,
    close_delay: Duration,
    timer: Option<JoinHandle<()>>,
}

impl HoverController {
    pub fn new(mode: InteractionMode, category_count: usize, close_delay: Duration) -> Self {
        let (tx, _) = watch::channel(Panel::new(mode, category_count));
        Self {
            panel: Arc::new(tx),
            close_delay,
            timer: None,
        }
    }

    pub fn hover(category_count: usize) -> Self {
        Self::new(InteractionMode::Hover, category_count, DEFAULT_CLOSE_DELAY)
    }

    /// Hover-mode controller with the close delay from `wpnav.yaml`.
    pub fn from_config(cfg: &InteractionConfig, category_count: usize) -> Self {
        Self::new(InteractionMode::Hover, category_count, cfg.close_delay())
    }

    pub fn subscribe(&self) -> watch::Receiver<Panel> {
        self.panel.subscribe()
    }

    pub fn phase(&self) -> PanelPhase {
        self.panel.borrow().phase()
    }

    pub fn is_open(&self) -> bool {
        self.phase().is_open()
    }

    pub fn active_category(&self) -> Option<usize> {
        self.phase().active_category()
    }

    pub fn has_pending_close(&self) -> bool {
        self.panel.borrow().pending_close().is_some()
    }

    pub fn pointer_enter(&mut self) {
        self.abort_timer();
        self.panel.send_if_modified(|p| p.pointer_enter());
    }

    pub fn pointer_leave(&mut self) {
        let mut ticket = None;
        self.panel.send_if_modified(|p| {
            ticket = p.pointer_leave();
            false
        });
        let Some(ticket) = ticket else {
            return;
        };

        self.abort_timer();
        let panel = Arc::clone(&self.panel);
        let delay = self.close_delay;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if panel.send_if_modified(|p| p.fire_close(ticket)) {
                tracing::trace!("mega menu closed after hover delay");
            }
        }));
    }

    pub fn select_category(&mut self, index: usize) {
        self.panel.send_if_modified(|p| p.select_category(index));
    }

    pub fn tap(&mut self) {
        self.abort_timer();
        self.panel.send_if_modified(|p| p.tap());
    }

    pub fn close(&mut self) {
        self.abort_timer();
        self.panel.send_if_modified(|p| p.close());
    }

    fn abort_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }
}

impl Drop for HoverController {
    fn drop(&mut self) {
        self.abort_timer();
        // Invalidate the ticket as well: an aborted task that was already
        // past its sleep must find nothing to redeem.
        self.panel.send_if_modified(|p| {
            p.cancel_pending();
            false
        });
    }
}
