use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Whatever actually stops the page from scrolling (the document body in a
/// browser, a flag in tests and server-side renders).
pub trait ScrollTarget: Send + Sync {
    fn set_scroll_locked(&self, locked: bool);
}

impl<T: ScrollTarget + ?Sized> ScrollTarget for Arc<T> {
    fn set_scroll_locked(&self, locked: bool) {
        (**self).set_scroll_locked(locked)
    }
}

/// A plain flag standing in for the document.
#[derive(Debug, Default)]
pub struct DocumentScroll {
    locked: AtomicBool,
    toggles: AtomicUsize,
}

impl DocumentScroll {
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst)
    }

    /// How many times the target state was actually flipped.
    pub fn toggles(&self) -> usize {
        self.toggles.load(Ordering::SeqCst)
    }
}

impl ScrollTarget for DocumentScroll {
    fn set_scroll_locked(&self, locked: bool) {
        self.locked.store(locked, Ordering::SeqCst);
        self.toggles.fetch_add(1, Ordering::SeqCst);
    }
}

struct Inner {
    holders: Mutex<usize>,
    target: Box<dyn ScrollTarget>,
}

/// Reference-counted scroll lock shared by every overlay on a page.
///
/// The target is locked when the first guard is acquired and unlocked when
/// the last guard is dropped, so overlapping overlays cannot unlock each
/// other.
#[derive(Clone)]
pub struct ScrollLock {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ScrollLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollLock")
            .field("holders", &self.holders())
            .finish()
    }
}

impl ScrollLock {
    pub fn new(target: impl ScrollTarget + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                holders: Mutex::new(0),
                target: Box::new(target),
            }),
        }
    }

    /// A lock whose target is a fresh [`DocumentScroll`], returned alongside.
    pub fn detached() -> (Self, Arc<DocumentScroll>) {
        let doc = Arc::new(DocumentScroll::default());
        (Self::new(Arc::clone(&doc)), doc)
    }

    pub fn acquire(&self) -> ScrollLockGuard {
        let mut holders = self.lock_holders();
        *holders += 1;
        if *holders == 1 {
            self.inner.target.set_scroll_locked(true);
        }
        ScrollLockGuard {
            lock: self.clone(),
        }
    }

    pub fn holders(&self) -> usize {
        *self.lock_holders()
    }

    pub fn is_locked(&self) -> bool {
        self.holders() > 0
    }

    fn release(&self) {
        let mut holders = self.lock_holders();
        if *holders == 0 {
            return;
        }
        *holders -= 1;
        if *holders == 0 {
            self.inner.target.set_scroll_locked(false);
        }
    }

    fn lock_holders(&self) -> std::sync::MutexGuard<'_, usize> {
        // The counter stays consistent even if a target panicked mid-toggle.
        self.inner
            .holders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Releases its hold on drop.
#[derive(Debug)]
#[must_use = "dropping the guard releases the scroll lock immediately"]
pub struct ScrollLockGuard {
    lock: ScrollLock,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.lock.release();
    }
}
