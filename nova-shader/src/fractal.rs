use log::debug;
use nova::Poly;
use nova_roots::{Interrupt, Interrupted, RootSet, RootSolver};

/// Roots of a polynomial and of its derivative: the two factors of the
/// Newton step `p / p'`.
#[derive(Clone, PartialEq, Debug)]
pub struct FractalRoots { 
    pub poly: RootSet,
    pub deriv: RootSet,
}

impl FractalRoots { 
    pub fn solve(p: &Poly) -> Self { 
        Self::solve_with(&RootSolver::default(), p)
    }

    pub fn solve_with(solver: &RootSolver, p: &Poly) -> Self { 
        let dp = p.derivative();
        let poly = solver.solve(p);
        let deriv = solver.solve(&dp);

        debug!("p = {poly}, p' = {deriv}");

        Self { poly, deriv }
    }

    /// Same as [`FractalRoots::solve_with`], giving up once `stop` fires.
    pub fn solve_until<I>(solver: &RootSolver, p: &Poly, stop: &I) -> Result<Self, Interrupted>
    where I: Interrupt + ?Sized { 
        let dp = p.derivative();
        let poly = solver.solve_until(p, stop)?;
        let deriv = solver.solve_until(&dp, stop)?;

        debug!("p = {poly}, p' = {deriv}");

        Ok(Self { poly, deriv })
    }
}
