use std::str::FromStr;
use std::sync::LazyLock;
use ahash::AHashMap;
use derive_more::Display;
use log::debug;
use num_traits::{Zero, One};
use regex::Regex;

use super::{Cpx, Poly, VAR};
use super::cpx::parse_cpx;

// User-adjustable symbolic coefficients, e.g. `A*z^2 + B`.
pub type Symbols = AHashMap<String, f64>;

#[derive(Clone, PartialEq, Eq, Debug, Display)]
pub enum ParseError {
    #[display("empty expression")]
    Empty,
    #[display("unbalanced parentheses in '{_0}'")]
    Unbalanced(String),
    #[display("unknown symbol '{_0}'")]
    UnknownSymbol(String),
    #[display("invalid exponent in '{_0}'")]
    InvalidExponent(String),
    #[display("invalid coefficient '{_0}'")]
    InvalidCoeff(String),
}

impl std::error::Error for ParseError {}

static SYMBOL: LazyLock<Regex> = LazyLock::new(||
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap()
);

static EXPONENT: LazyLock<Regex> = LazyLock::new(||
    Regex::new(r"^\^(\d+)$").unwrap()
);

pub(crate) fn is_symbol(s: &str) -> bool {
    SYMBOL.is_match(s)
}

// true if the first char is a '(' closed by the last char.
fn encloses(s: &str) -> bool {
    if !(s.starts_with('(') && s.ends_with(')')) {
        return false
    }

    let mut depth = 0;
    for (k, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => ()
        }
        if depth == 0 && k < s.len() - 1 {
            return false
        }
    }
    true
}

pub(crate) fn strip_parens(mut s: &str) -> &str {
    while encloses(s) {
        s = &s[1 .. s.len() - 1];
    }
    s
}

// Splits at `sep` outside of parentheses.
// With `signs`, splits before top-level `+` / `-` instead,
// keeping the sign with the following piece.
fn split_top(s: &str, sep: char, signs: bool) -> Result<Vec<&str>, ParseError> {
    let mut res = vec![];
    let mut depth = 0usize;
    let mut start = 0;
    let mut prev: Option<char> = None;

    for (k, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(||
                    ParseError::Unbalanced(s.to_string())
                )?
            },
            '+' | '-' if signs && depth == 0 && k > start
                && !matches!(prev, Some('+' | '-' | '*' | '/' | '^')) => {
                res.push(&s[start..k]);
                start = k;
            },
            c if !signs && c == sep && depth == 0 => {
                res.push(&s[start..k]);
                start = k + c.len_utf8();
            },
            _ => ()
        }
        prev = Some(c);
    }

    if depth != 0 {
        return Err(ParseError::Unbalanced(s.to_string()))
    }

    res.push(&s[start..]);
    Ok(res)
}

fn parse_exponent(pow: &str, term: &str) -> Result<usize, ParseError> {
    if pow.is_empty() {
        return Ok(1)
    }

    let err = || ParseError::InvalidExponent(term.to_string());
    let c = EXPONENT.captures(pow).ok_or_else(err)?;
    c[1].parse::<usize>().map_err(|_| err())
}

fn parse_coeff(s: &str, symbols: &Symbols) -> Result<Cpx, ParseError> {
    let s = s.strip_suffix('*').unwrap_or(s);
    match s {
        "" | "+" => return Ok(Cpx::one()),
        "-" => return Ok(-Cpx::one()),
        _ => ()
    }

    let c = split_top(s, '*', false)?.into_iter().try_fold(Cpx::one(), |res, f| {
        if f.is_empty() {
            return Err(ParseError::InvalidCoeff(s.to_string()))
        }
        Ok(res * parse_cpx(f, symbols)?)
    })?;

    if c.is_finite() {
        Ok(c)
    } else {
        Err(ParseError::InvalidCoeff(s.to_string()))
    }
}

fn parse_term(term: &str, symbols: &Symbols) -> Result<(usize, Cpx), ParseError> {
    match term.split_once(VAR) {
        Some((coeff, pow)) => {
            let e = parse_exponent(pow, term)?;
            let c = parse_coeff(coeff, symbols)?;
            Ok((e, c))
        },
        None => {
            if matches!(term, "" | "+" | "-") {
                return Err(ParseError::InvalidCoeff(term.to_string()))
            }
            let c = parse_coeff(term, symbols)?;
            Ok((0, c))
        }
    }
}

impl Poly {
    /// Parses `s` as a polynomial in `z`, substituting free-standing
    /// identifiers from `symbols`. Returns `None` when `s` is rejected;
    /// callers keep their previous value in that case.
    pub fn parse(s: &str, symbols: &Symbols) -> Option<Self> {
        match Self::try_parse(s, symbols) {
            Ok(p) => Some(p),
            Err(e) => {
                debug!("rejected '{s}': {e}");
                None
            }
        }
    }

    /// Same as [`Poly::parse`], reporting why the input was rejected.
    ///
    /// Whitespace is ignored. The input is split into additive terms at
    /// top-level `+` / `-`, and each term at `z` into a coefficient and
    /// an optional `^<digits>` exponent. A coefficient is a `*`-separated
    /// product of real numbers, rationals `p/q`, complex literals with a
    /// trailing `i` (`3+2i`, `-i`, `(1/6i)`) and symbols.
    ///
    /// The input is kept verbatim and reproduced by `Display`.
    pub fn try_parse(s: &str, symbols: &Symbols) -> Result<Self, ParseError> {
        let expr: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if expr.is_empty() {
            return Err(ParseError::Empty)
        }

        let mut res = Poly::zero();
        for term in split_top(&expr, '+', true)? {
            let (e, c) = parse_term(term, symbols)?;
            res.add_term(e, c);
        }

        Ok(res.with_repr(s.to_string()))
    }
}

impl FromStr for Poly {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s, &Symbols::default())
    }
}
