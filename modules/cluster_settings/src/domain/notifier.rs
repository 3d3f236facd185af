//! Single-subscriber change hook

use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::Arc;

type Hook = Box<dyn Fn() + Send + Sync>;

/// Holds at most one zero-argument callback fired after a value change
///
/// Attaching a new callback replaces the previous one. The hook slot is an
/// `ArcSwapOption`, so a writer calling [`ChangeNotifier::notify`] never holds
/// a lock while the callback runs, and a concurrent attach is memory safe.
pub struct ChangeNotifier {
    hook: ArcSwapOption<Hook>,
}

impl ChangeNotifier {
    /// Create a notifier with no callback attached
    pub fn new() -> Self {
        Self {
            hook: ArcSwapOption::empty(),
        }
    }

    /// Attach `f`, replacing any previous callback
    pub fn attach<F>(&self, f: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let hook: Hook = Box::new(f);
        self.hook.store(Some(Arc::new(hook)));
    }

    /// Whether a callback is attached
    pub fn is_attached(&self) -> bool {
        self.hook.load().is_some()
    }

    /// Run the attached callback, if any
    ///
    /// A panic inside the callback propagates to the caller.
    pub fn notify(&self) {
        // Own the Arc so no arc-swap guard is held across user code.
        if let Some(hook) = self.hook.load_full() {
            hook();
        }
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("attached", &self.is_attached())
            .finish()
    }
}
