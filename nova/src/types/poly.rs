use std::collections::BTreeMap;
use std::fmt::{Display, Debug};
use std::ops::{Add, AddAssign, Sub, SubAssign, Mul, MulAssign, Neg, Div, DivAssign, Rem, RemAssign};
use num_traits::{Zero, One};
use auto_impl_ops::auto_ops;

use crate::util::format::lc;
use super::cpx::{Cpx, fmt_cpx};

pub const VAR: char = 'z';

// A polynomial in `z` over the complex numbers, stored as
// a sparse map `exponent -> coefficient`.
//
// The map may hold explicit zero coefficients; they are
// equivalent to absent entries everywhere terms are observed.

#[derive(Clone, Default)]
pub struct Poly {
    data: BTreeMap<usize, Cpx>,
    repr: Option<String>
}

impl Poly {
    pub fn from_const(c: Cpx) -> Self {
        Self::mono(0, c)
    }

    pub fn mono(e: usize, c: Cpx) -> Self {
        let mut p = Self::zero();
        p.add_term(e, c);
        p
    }

    pub fn variable() -> Self {
        Self::mono(1, Cpx::one())
    }

    // z - r
    pub fn linear(r: Cpx) -> Self {
        Self::from_iter([(1, Cpx::one()), (0, -r)])
    }

    pub(crate) fn add_term(&mut self, e: usize, c: Cpx) {
        self.repr = None;
        *self.data.entry(e).or_insert_with(Cpx::zero) += c;
    }

    pub(crate) fn with_repr(mut self, repr: String) -> Self {
        self.repr = Some(repr);
        self
    }

    // the source text this polynomial was parsed from, if any.
    pub fn repr(&self) -> Option<&str> {
        self.repr.as_deref()
    }

    // non-zero terms in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, &Cpx)> {
        self.data.iter()
            .filter(|(_, c)| !c.is_zero())
            .map(|(&e, c)| (e, c))
    }

    // non-zero terms in descending order.
    pub fn iter_desc(&self) -> impl Iterator<Item = (usize, &Cpx)> {
        self.iter().rev()
    }

    pub fn nterms(&self) -> usize {
        self.iter().count()
    }

    pub fn coeff(&self, e: usize) -> Cpx {
        self.data.get(&e).copied().unwrap_or_else(Cpx::zero)
    }

    pub fn const_term(&self) -> Cpx {
        self.coeff(0)
    }

    pub fn is_const(&self) -> bool {
        self.deg() == 0
    }

    pub fn deg(&self) -> usize {
        self.iter_desc().next().map(|(e, _)| e).unwrap_or(0)
    }

    pub fn lead_term(&self) -> (usize, Cpx) {
        let d = self.deg();
        (d, self.coeff(d))
    }

    pub fn lead_coeff(&self) -> Cpx {
        self.lead_term().1
    }

    pub fn eval(&self, z: &Cpx) -> Cpx {
        self.iter().map(|(e, c)| {
            let mut x = *c;
            for _ in 0..e {
                x *= z;
            }
            x
        }).sum()
    }

    pub fn derivative(&self) -> Self {
        self.iter().filter(|(e, _)| *e > 0).map(|(e, c)|
            (e - 1, c * (e as f64))
        ).collect()
    }

    fn clean(&mut self) {
        self.data.retain(|_, c| !c.is_zero());
    }

    pub fn checked_div_rem(&self, rhs: &Self) -> Option<(Self, Self)> {
        if rhs.is_zero() {
            return None
        }

        let (j, b) = rhs.lead_term(); // bz^j

        let mut q = Self::zero();
        let mut r = self.clone();
        r.clean();
        r.repr = None;

        while !r.is_zero() && r.deg() >= j {
            let (i, a) = r.lead_term(); // az^i
            let k = i - j;
            let c = a / b; // cz^k = (a/b) z^{i-j}

            q.add_term(k, c);
            for (e, d) in rhs.iter() {
                r.add_term(e + k, -c * d);
            }

            // the leading terms cancel in exact arithmetic.
            r.data.remove(&i);
            r.clean();
        }

        Some((q, r))
    }

    pub fn div_rem(&self, rhs: &Self) -> (Self, Self) {
        self.checked_div_rem(rhs).expect("division by zero polynomial")
    }
}

impl FromIterator<(usize, Cpx)> for Poly {
    fn from_iter<T: IntoIterator<Item = (usize, Cpx)>>(iter: T) -> Self {
        let mut p = Self::zero();
        for (e, c) in iter {
            p.add_term(e, c);
        }
        p
    }
}

impl From<Cpx> for Poly {
    fn from(c: Cpx) -> Self {
        Self::from_const(c)
    }
}

impl PartialEq for Poly {
    fn eq(&self, other: &Self) -> bool {
        self.data.keys().chain(other.data.keys()).all(|&e|
            self.coeff(e) == other.coeff(e)
        )
    }
}

fn fmt_mono(e: usize) -> String {
    match e {
        0 => "1".to_string(),
        1 => VAR.to_string(),
        _ => format!("{VAR}^{e}")
    }
}

impl Display for Poly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(repr) = &self.repr {
            return f.write_str(repr)
        }

        let terms = self.iter_desc().map(|(e, c)|
            (fmt_mono(e), fmt_cpx(c))
        );
        let s = lc(terms);

        if s.is_empty() {
            f.write_str("0")
        } else {
            f.write_str(&s)
        }
    }
}

impl Debug for Poly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Zero for Poly {
    fn zero() -> Self {
        Self::default()
    }

    fn is_zero(&self) -> bool {
        self.data.values().all(|c| c.is_zero())
    }
}

impl One for Poly {
    fn one() -> Self {
        Self::from_const(Cpx::one())
    }

    fn is_one(&self) -> bool {
        self.is_const() && self.const_term().is_one()
    }
}

impl Neg for Poly {
    type Output = Self;
    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Neg for &Poly {
    type Output = Poly;
    fn neg(self) -> Self::Output {
        self.iter().map(|(e, c)| (e, -c)).collect()
    }
}

#[auto_ops]
impl AddAssign<&Poly> for Poly {
    fn add_assign(&mut self, rhs: &Poly) {
        self.repr = None;
        for (e, c) in rhs.iter() {
            self.add_term(e, *c);
        }
    }
}

#[auto_ops]
impl SubAssign<&Poly> for Poly {
    fn sub_assign(&mut self, rhs: &Poly) {
        self.repr = None;
        for (e, c) in rhs.iter() {
            self.add_term(e, -c);
        }
    }
}

#[auto_ops]
impl MulAssign<&Cpx> for Poly {
    fn mul_assign(&mut self, rhs: &Cpx) {
        self.repr = None;
        for c in self.data.values_mut() {
            *c *= rhs;
        }
    }
}

#[auto_ops]
impl MulAssign<&Poly> for Poly {
    fn mul_assign(&mut self, rhs: &Poly) {
        let mut res = Poly::zero();
        for (i, a) in self.iter() {
            for (j, b) in rhs.iter() {
                res.add_term(i + j, a * b);
            }
        }
        *self = res;
    }
}

#[auto_ops]
impl<'a, 'b> Div<&'b Poly> for &'a Poly {
    type Output = Poly;

    fn div(self, rhs: &'b Poly) -> Poly {
        self.div_rem(rhs).0
    }
}

#[auto_ops]
impl<'a, 'b> Rem<&'b Poly> for &'a Poly {
    type Output = Poly;

    fn rem(self, rhs: &'b Poly) -> Self::Output {
        self.div_rem(rhs).1
    }
}
