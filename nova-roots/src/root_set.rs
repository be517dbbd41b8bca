use std::fmt::Display;
use itertools::Itertools;
use num_traits::One;
use nova::{fmt_cpx, Cpx, Poly};

/// The roots found for a polynomial together with the constant left
/// after every root was divided out.
///
/// For a full solve the remainder equals the leading coefficient, so
/// `p(z) = remainder · Π (z - rᵢ)`.
#[derive(Clone, PartialEq, Debug)]
pub struct RootSet { 
    roots: Vec<Cpx>,
    remainder: Cpx
}

impl RootSet { 
    pub fn new(roots: Vec<Cpx>, remainder: Cpx) -> Self { 
        Self { roots, remainder }
    }

    pub fn roots(&self) -> &[Cpx] { 
        &self.roots
    }

    pub fn remainder(&self) -> Cpx { 
        self.remainder
    }

    pub fn len(&self) -> usize { 
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool { 
        self.roots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cpx> { 
        self.roots.iter()
    }

    /// Evaluates the product form at `z`.
    pub fn eval(&self, z: &Cpx) -> Cpx { 
        self.roots.iter().fold(self.remainder, |res, r| res * (z - r))
    }

    /// Expands the product form back into a polynomial.
    pub fn to_poly(&self) -> Poly { 
        self.roots.iter().fold(Poly::from_const(self.remainder), |res, r| 
            res * Poly::linear(*r)
        )
    }
}

impl Display for RootSet { 
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { 
        let c = fmt_cpx(&self.remainder);
        if self.roots.is_empty() { 
            return f.write_str(&c)
        }

        let factors = self.roots.iter().map(|r| 
            format!("({})", Poly::linear(*r))
        ).join("");

        if self.remainder.is_one() { 
            f.write_str(&factors)
        } else { 
            write!(f, "{c}{factors}")
        }
    }
}
