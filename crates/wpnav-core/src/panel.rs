//! Open/close and active-category state shared by every mega menu surface.
//!
//! `Panel` is a plain state machine with no timers of its own. Debounced
//! closing is expressed with [`CloseTicket`]s: a pointer-leave hands out a
//! ticket, and the close only happens if that same ticket is redeemed before
//! anything else touches the panel. Whoever owns the timer (see
//! [`crate::hover::HoverController`]) redeems it when the delay elapses.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// InteractionMode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// Desktop: open on pointer-enter, debounced close on pointer-leave.
    Hover,
    /// Touch: pointer events are ignored, taps toggle.
    Tap,
}

impl InteractionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            InteractionMode::Hover => "hover",
            InteractionMode::Tap => "tap",
        }
    }
}

// ---------------------------------------------------------------------------
// PanelPhase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelPhase {
    Closed,
    Open { active_category: Option<usize> },
}

impl PanelPhase {
    pub fn is_open(self) -> bool {
        matches!(self, PanelPhase::Open { .. })
    }

    pub fn active_category(self) -> Option<usize> {
        match self {
            PanelPhase::Open { active_category } => active_category,
            PanelPhase::Closed => None,
        }
    }
}

/// Proof that a particular pointer-leave scheduled a close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CloseTicket(u64);

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    mode: InteractionMode,
    category_count: usize,
    phase: PanelPhase,
    pending_close: Option<CloseTicket>,
    issued: u64,
}

impl Panel {
    pub fn new(mode: InteractionMode, category_count: usize) -> Self {
        Self {
            mode,
            category_count,
            phase: PanelPhase::Closed,
            pending_close: None,
            issued: 0,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase.is_open()
    }

    pub fn active_category(&self) -> Option<usize> {
        self.phase.active_category()
    }

    pub fn category_count(&self) -> usize {
        self.category_count
    }

    pub fn pending_close(&self) -> Option<CloseTicket> {
        self.pending_close
    }

    fn default_category(&self) -> Option<usize> {
        (self.category_count > 0).then_some(0)
    }

    /// Open showing the first category. No-op when already open.
    /// Returns true when the phase changed.
    pub fn open(&mut self) -> bool {
        self.pending_close = None;
        if self.is_open() {
            return false;
        }
        self.phase = PanelPhase::Open {
            active_category: self.default_category(),
        };
        true
    }

    /// Close immediately, discarding any scheduled close.
    pub fn close(&mut self) -> bool {
        self.pending_close = None;
        if !self.is_open() {
            return false;
        }
        self.phase = PanelPhase::Closed;
        true
    }

    /// Pointer entered the trigger or the panel.
    ///
    /// In hover mode this cancels a scheduled close and opens the panel if it
    /// was closed. The active category of an already open panel is kept.
    pub fn pointer_enter(&mut self) -> bool {
        match self.mode {
            InteractionMode::Hover => self.open(),
            InteractionMode::Tap => false,
        }
    }

    /// Pointer left the trigger or the panel.
    ///
    /// In hover mode an open panel is not closed; a ticket is returned that
    /// closes it when redeemed with [`Panel::fire_close`]. Each leave
    /// supersedes earlier tickets.
    pub fn pointer_leave(&mut self) -> Option<CloseTicket> {
        if self.mode != InteractionMode::Hover || !self.is_open() {
            return None;
        }
        self.issued += 1;
        let ticket = CloseTicket(self.issued);
        self.pending_close = Some(ticket);
        Some(ticket)
    }

    /// Redeem a close ticket. Stale tickets (superseded, cancelled by an
    /// enter, or issued before teardown) do nothing.
    pub fn fire_close(&mut self, ticket: CloseTicket) -> bool {
        if self.pending_close != Some(ticket) {
            return false;
        }
        self.close()
    }

    /// Drop any scheduled close without changing the phase.
    pub fn cancel_pending(&mut self) -> bool {
        self.pending_close.take().is_some()
    }

    /// Tap on the trigger: toggle.
    pub fn tap(&mut self) -> bool {
        if self.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    /// Pointer entered (or tapped) category `index`. Ignored while closed
    /// or when `index` is out of range.
    pub fn select_category(&mut self, index: usize) -> bool {
        if index >= self.category_count {
            return false;
        }
        match &mut self.phase {
            PanelPhase::Open { active_category } if *active_category != Some(index) => {
                *active_category = Some(index);
                true
            }
            _ => false,
        }
    }

    /// Point the panel at a different dataset: closed, nothing pending.
    pub fn reset(&mut self, category_count: usize) {
        self.category_count = category_count;
        self.phase = PanelPhase::Closed;
        self.pending_close = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
