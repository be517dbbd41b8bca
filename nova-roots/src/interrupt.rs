use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

// Checked by the solver before each attempt.
pub trait Interrupt { 
    fn interrupted(&self) -> bool;
}

// never interrupts.
impl Interrupt for () { 
    fn interrupted(&self) -> bool { 
        false
    }
}

// a deadline.
impl Interrupt for Instant { 
    fn interrupted(&self) -> bool { 
        Instant::now() >= *self
    }
}

// a cancellation flag shared with the host.
impl Interrupt for AtomicBool { 
    fn interrupted(&self) -> bool { 
        self.load(Ordering::Relaxed)
    }
}

impl<T> Interrupt for Option<T>
where T: Interrupt { 
    fn interrupted(&self) -> bool { 
        self.as_ref().is_some_and(|t| t.interrupted())
    }
}

// wraps an arbitrary check, e.g. `When(|| progress.is_cancelled())`.
pub struct When<F>(pub F);

impl<F> Interrupt for When<F>
where F: Fn() -> bool { 
    fn interrupted(&self) -> bool { 
        (self.0)()
    }
}
