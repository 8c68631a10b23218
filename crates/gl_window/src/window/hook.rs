//! Optional lifecycle callbacks

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Optional, caller-supplied render or destroy callback
///
/// Hooks have no way to report failure. A panic inside one is caught and
/// logged so it never unwinds through window code.
#[derive(Default)]
pub enum Hook {
    /// No callback; invoking is a no-op
    #[default]
    Absent,
    /// Owned callback
    Present(Box<dyn FnMut()>),
}

impl Hook {
    /// Wrap a closure
    pub fn new(f: impl FnMut() + 'static) -> Self {
        Self::Present(Box::new(f))
    }

    /// Whether a callback is installed
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub(crate) fn invoke(&mut self, stage: &str) {
        if let Self::Present(f) = self {
            run_guarded(stage, f);
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_present() { "Hook::Present" } else { "Hook::Absent" })
    }
}

pub(crate) fn run_guarded(stage: &str, f: impl FnOnce()) {
    if panic::catch_unwind(AssertUnwindSafe(f)).is_err() {
        log::error!("{stage} hook panicked; continuing");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_absent_hook_is_noop() {
        let mut hook = Hook::default();
        assert!(!hook.is_present());
        hook.invoke("render");
    }

    #[test]
    fn test_present_hook_runs_each_time() {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let mut hook = Hook::new(move || counter.set(counter.get() + 1));

        hook.invoke("render");
        hook.invoke("render");
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_panicking_hook_is_contained() {
        let mut hook = Hook::new(|| panic!("boom"));
        hook.invoke("render");
        assert!(hook.is_present());
    }
}
