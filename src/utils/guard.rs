//! Run a closure when a scope ends, including by panic.

/// Calls its closure exactly once, on drop.
///
/// ```
/// use termfolio::utils::guard::DropGuard;
///
/// let _restore = DropGuard::new(|| println!("terminal restored"));
/// ```
pub struct DropGuard<F: FnOnce()> {
    on_drop: Option<F>,
}

impl<F: FnOnce()> DropGuard<F> {
    pub fn new(on_drop: F) -> Self {
        Self { on_drop: Some(on_drop) }
    }
}

impl<F: FnOnce()> Drop for DropGuard<F> {
    fn drop(&mut self) {
        if let Some(f) = self.on_drop.take() {
            f()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_runs_on_drop() {
        let ran = Cell::new(0);
        {
            let _guard = DropGuard::new(|| ran.set(ran.get() + 1));
        }
        assert_eq!(ran.get(), 1);
    }

    #[test]
    fn test_runs_on_panic() {
        let ran = std::sync::atomic::AtomicBool::new(false);
        let result = std::panic::catch_unwind(|| {
            let _guard = DropGuard::new(|| ran.store(true, std::sync::atomic::Ordering::SeqCst));
            panic!("boom");
        });
        assert!(result.is_err());
        assert!(ran.load(std::sync::atomic::Ordering::SeqCst));
    }
}
