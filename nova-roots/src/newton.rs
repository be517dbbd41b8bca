use nova::{Cpx, Poly};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Exit { 
    Converged,
    Diverged,
    Exhausted
}

// The state a single Newton run ended in.
#[derive(Clone, Copy, Debug)]
pub struct Attempt { 
    pub z: Cpx,
    pub residual: f64,
    pub iters: usize,
    pub exit: Exit
}

impl Attempt { 
    pub fn converged(&self) -> bool { 
        self.exit == Exit::Converged
    }
}

/// Damped Newton iteration `z ← z - m·p(z)/dp(z)` started at `z0`.
///
/// Stops as soon as `|p(z)| < threshold`, when `z` leaves the finite
/// numbers, or after `max_iter` steps.
pub fn damped_newton(p: &Poly, dp: &Poly, z0: Cpx, m: f64, max_iter: usize, threshold: f64) -> Attempt { 
    let mut z = z0;

    for k in 0..max_iter { 
        let v = p.eval(&z);
        let residual = v.norm();

        if residual < threshold { 
            return Attempt { z, residual, iters: k, exit: Exit::Converged }
        }

        z -= v / dp.eval(&z) * m;

        if !z.is_finite() { 
            return Attempt { z, residual: f64::INFINITY, iters: k + 1, exit: Exit::Diverged }
        }
    }

    let residual = p.eval(&z).norm();
    let exit = if residual < threshold { 
        Exit::Converged
    } else { 
        Exit::Exhausted
    };

    Attempt { z, residual, iters: max_iter, exit }
}
