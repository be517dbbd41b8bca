use std::f64::consts::TAU;
use std::fmt::Display;
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use nova::{fmt_cpx, Cpx, Poly};

use crate::{damped_newton, Interrupt, RootSet};

#[derive(Clone, PartialEq, Debug)]
pub struct SolverConfig { 
    /// Newton steps per attempt.
    pub max_iter: usize,
    /// An attempt converges once `|p(z)| < threshold`.
    pub threshold: f64,
    /// Growth of the sampling radius after each failed attempt.
    pub bound_step: f64,
    /// The multiplicity guess is raised after `escalate_every × deg`
    /// consecutive failures.
    pub escalate_every: usize,
    pub seed: u64,
}

impl Default for SolverConfig { 
    fn default() -> Self {
        Self { 
            max_iter: 150,
            threshold: 1e-10,
            bound_step: 0.1,
            escalate_every: 5,
            seed: 0x6e6f7661
        }
    }
}

#[derive(Clone, Debug)]
pub struct Interrupted { 
    pub found: Vec<Cpx>,
    pub degree: usize,
    pub attempts: usize
}

impl Display for Interrupted { 
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "root search interrupted after {} attempts ({} of {} roots found)", self.attempts, self.found.len(), self.degree)
    }
}

impl std::error::Error for Interrupted {}

/// Finds all roots of a polynomial by randomized Newton iteration with
/// deflation.
/// 
/// Each attempt starts from a uniformly random point of the disk
/// `|z| < bound` and runs a damped Newton iteration with step factor
/// `m`, the current multiplicity guess. A converged point is accepted
/// as a root and divided out of the working polynomial. A failed
/// attempt widens the disk, and repeated failures raise `m`, which
/// restores fast convergence near repeated roots.
/// 
/// The random source is reseeded from `config.seed` on every solve, so
/// equal inputs always give equal roots in equal order.
#[derive(Clone, Default, Debug)]
pub struct RootSolver { 
    config: SolverConfig
}

impl RootSolver { 
    pub fn new(config: SolverConfig) -> Self { 
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig { 
        &self.config
    }

    pub fn solve(&self, p: &Poly) -> RootSet { 
        self.solve_until(p, &()).expect("never interrupted")
    }

    pub fn solve_until<I>(&self, p: &Poly, stop: &I) -> Result<RootSet, Interrupted>
    where I: Interrupt + ?Sized { 
        let cfg = &self.config;
        let degree = p.deg();
        let escalate = (cfg.escalate_every * degree).max(1);

        info!("solve: {p} (deg = {degree})");

        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let mut p = p.clone();
        let mut dp = p.derivative();
        let mut roots = Vec::with_capacity(degree);

        let mut bound = 1.0;
        let mut m = 1usize;
        let mut failed = 0;
        let mut attempts = 0;

        while p.deg() > 0 { 
            if stop.interrupted() { 
                info!("interrupted: {}/{degree} roots", roots.len());
                return Err(Interrupted { found: roots, degree, attempts })
            }

            attempts += 1;

            let z0 = sample(&mut rng, bound);
            let a = damped_newton(&p, &dp, z0, m as f64, cfg.max_iter, cfg.threshold);

            trace!("attempt {attempts}: z0 = {}, exit = {:?}, iter = {}, |p| = {:.3e}", fmt_cpx(&z0), a.exit, a.iters, a.residual);

            if a.converged() { 
                debug!("root[{}] = {} (|p| = {:.3e}, iter = {}, m = {m})", roots.len(), fmt_cpx(&a.z), a.residual, a.iters);

                p = &p / &Poly::linear(a.z);
                dp = p.derivative();
                roots.push(a.z);

                m = 1;
                failed = 0;
            } else { 
                failed += 1;
                bound += cfg.bound_step;

                if failed % escalate == 0 { 
                    m += 1;
                    debug!("{failed} failures, bound = {bound:.2}, m = {m}");
                }
            }
        }

        let remainder = p.const_term();

        info!("found {} roots in {attempts} attempts.", roots.len());

        Ok(RootSet::new(roots, remainder))
    }
}

fn sample<R>(rng: &mut R, bound: f64) -> Cpx
where R: Rng { 
    let r = rng.gen::<f64>() * bound;
    let t = rng.gen_range(0.0..TAU);
    Cpx::from_polar(r, t)
}

/// Solves `p` with the default configuration.
pub fn find_roots(p: &Poly) -> RootSet { 
    RootSolver::default().solve(p)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::atomic::AtomicBool;
    use std::time::Instant;
    use crate::When;
    use super::*;

    fn poly(s: &str) -> Poly { 
        Poly::from_str(s).unwrap()
    }

    fn assert_roots(found: &RootSet, expected: &[Cpx], tol: f64) { 
        assert_eq!(found.len(), expected.len());

        let mut rest = found.roots().to_vec();
        for e in expected { 
            let (k, d) = rest.iter().enumerate().map(|(k, r)| 
                (k, (r - e).norm())
            ).min_by(|a, b| a.1.total_cmp(&b.1)).unwrap();

            assert!(d < tol, "{e} not found in {found}");
            rest.remove(k);
        }
    }

    fn assert_residuals(p: &Poly, found: &RootSet, tol: f64) { 
        for r in found.iter() { 
            let v = p.eval(r).norm();
            assert!(v < tol, "|p({r})| = {v}");
        }
    }

    #[test]
    fn constant() { 
        let s = find_roots(&poly("5"));
        assert!(s.is_empty());
        assert_eq!(s.remainder(), Cpx::new(5.0, 0.0));
    }

    #[test]
    fn zero() { 
        let s = find_roots(&Poly::from_const(Cpx::new(0.0, 0.0)));
        assert!(s.is_empty());
        assert_eq!(s.remainder(), Cpx::new(0.0, 0.0));
    }

    #[test]
    fn linear() { 
        let s = find_roots(&poly("2z - 3"));
        assert_roots(&s, &[Cpx::new(1.5, 0.0)], 1e-9);
        assert!((s.remainder() - Cpx::new(2.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn cube_roots_of_unity() { 
        let p = poly("z^3 - 1");
        let s = find_roots(&p);
        let w = Cpx::from_polar(1.0, TAU / 3.0);

        assert_roots(&s, &[Cpx::new(1.0, 0.0), w, w.conj()], 1e-6);
        assert_residuals(&p, &s, 1e-6);
        assert!((s.remainder() - Cpx::new(1.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn imaginary_roots() { 
        let p = poly("z^2 + 1");
        let s = find_roots(&p);
        assert_roots(&s, &[Cpx::new(0.0, 1.0), Cpx::new(0.0, -1.0)], 1e-6);
    }

    #[test]
    fn complex_coeffs() { 
        let p = poly("(2 - i)z^4 + 3z^2 - iz + 1/2");
        let s = find_roots(&p);

        assert_eq!(s.len(), 4);
        assert_residuals(&p, &s, 1e-6);
        assert!((s.remainder() - Cpx::new(2.0, -1.0)).norm() < 1e-9);
    }

    #[test]
    fn repeated_root() { 
        // (z - 1)^2 (z + 2)
        let p = poly("z^3 - 3z + 2");
        let s = find_roots(&p);

        assert_roots(&s, &[Cpx::new(1.0, 0.0), Cpx::new(1.0, 0.0), Cpx::new(-2.0, 0.0)], 1e-3);
        assert_residuals(&p, &s, 1e-6);
    }

    #[test]
    fn high_degree() { 
        let p = poly("z^8 - 1");
        let s = find_roots(&p);

        let expected = (0..8).map(|k| Cpx::from_polar(1.0, TAU * k as f64 / 8.0)).collect::<Vec<_>>();
        assert_roots(&s, &expected, 1e-6);
        assert_residuals(&p, &s, 1e-6);
    }

    #[test]
    fn product_form() { 
        let p = poly("z^5 - 2z^3 + iz^2 + 3z - 1");
        let s = find_roots(&p);

        for z in [Cpx::new(0.5, 0.5), Cpx::new(-1.2, 0.3), Cpx::new(2.0, -1.0)] { 
            let d = (s.eval(&z) - p.eval(&z)).norm();
            assert!(d < 1e-6, "{d}");
        }
    }

    #[test]
    fn deterministic() { 
        let p = poly("z^6 + 3z^2 - 2iz + 1");
        let s1 = find_roots(&p);
        let s2 = find_roots(&p);
        assert_eq!(s1, s2);
    }

    #[test]
    fn custom_config() { 
        let solver = RootSolver::new(SolverConfig { 
            threshold: 1e-12,
            seed: 42,
            ..Default::default()
        });

        let p = poly("z^4 + 4");
        let s = solver.solve(&p);

        assert_eq!(solver.config().seed, 42);
        assert_roots(&s, &[
            Cpx::new(1.0, 1.0), Cpx::new(1.0, -1.0), 
            Cpx::new(-1.0, 1.0), Cpx::new(-1.0, -1.0)
        ], 1e-6);
    }

    #[test]
    fn interrupted() { 
        let p = poly("z^3 - 1");
        let solver = RootSolver::default();

        let e = solver.solve_until(&p, &AtomicBool::new(true)).unwrap_err();
        assert!(e.found.is_empty());
        assert_eq!(e.degree, 3);
        assert_eq!(e.attempts, 0);

        let e = solver.solve_until(&p, &Instant::now()).unwrap_err();
        assert_eq!(e.degree, 3);

        assert!(solver.solve_until(&p, &AtomicBool::new(false)).is_ok());
    }

    #[test]
    fn interrupted_midway() { 
        let p = poly("z^4 - 1");
        let solver = RootSolver::default();

        // the first check passes, every later one fails.
        let calls = std::cell::Cell::new(0);
        let stop = When(|| { 
            calls.set(calls.get() + 1);
            calls.get() > 1
        });

        let e = solver.solve_until(&p, &stop).unwrap_err();
        assert_eq!(e.attempts, 1);
        assert!(e.found.len() <= 1);
        assert!(e.to_string().starts_with("root search interrupted after 1 attempts"));
    }
}
