use std::sync::LazyLock;
use num_complex::Complex64;
use num_traits::{Zero, One};
use regex::Regex;

use super::{ParseError, Symbols};
use super::parse::{strip_parens, is_symbol};

pub type Cpx = Complex64;

static DECIMAL: LazyLock<Regex> = LazyLock::new(|| 
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)$").unwrap()
);

static RATIONAL: LazyLock<Regex> = LazyLock::new(|| 
    Regex::new(r"^(.+)/(.+)$").unwrap()
);

pub fn fmt_real(x: f64) -> String { 
    if x.is_zero() { 
        "0".to_string() // avoids "-0"
    } else { 
        x.to_string()
    }
}

fn fmt_imag(y: f64) -> String { 
    if y.is_one() { 
        "i".to_string()
    } else if (-y).is_one() { 
        "-i".to_string()
    } else { 
        format!("{}i", fmt_real(y))
    }
}

// `a`, `bi` or `(a ± bi)`. 
pub fn fmt_cpx(c: &Cpx) -> String { 
    if c.im.is_zero() { 
        fmt_real(c.re)
    } else if c.re.is_zero() { 
        fmt_imag(c.im)
    } else { 
        let op = if c.im < 0.0 { '-' } else { '+' };
        format!("({} {op} {})", fmt_real(c.re), fmt_imag(c.im.abs()))
    }
}

// A decimal number or a rational `p/q` of decimals. 
pub fn parse_real(s: &str) -> Option<f64> { 
    if DECIMAL.is_match(s) { 
        return s.parse::<f64>().ok().filter(|x| x.is_finite())
    }

    let c = RATIONAL.captures(s)?;
    let (p, q) = (&c[1], &c[2]);
    if DECIMAL.is_match(p) && DECIMAL.is_match(q) { 
        let (p, q) = (p.parse::<f64>().ok()?, q.parse::<f64>().ok()?);
        if !q.is_zero() && (p / q).is_finite() { 
            return Some(p / q)
        }
    }
    None
}

// `bi`, `a+bi`, `a-i`, `i`, ... (the caller has removed enclosing parentheses).
fn parse_imag(s: &str) -> Option<Cpx> { 
    let body = s.strip_suffix('i')?;
    let body = body.strip_suffix('*').unwrap_or(body);

    let split = body.char_indices()
        .filter(|&(k, c)| k > 0 && (c == '+' || c == '-'))
        .map(|(k, _)| k)
        .last();

    let (re, im) = match split { 
        Some(k) => (parse_real(&body[..k])?, &body[k..]),
        None    => (0.0, body)
    };

    let im = match im { 
        "" | "+" => 1.0,
        "-" => -1.0,
        _ => parse_real(im)?
    };

    Some(Cpx::new(re, im))
}

/// Parses a single complex factor: a real or rational literal, 
/// an imaginary or mixed literal with trailing `i`, or a symbol 
/// from the given table, each optionally signed and parenthesized.
pub fn parse_cpx(s: &str, symbols: &Symbols) -> Result<Cpx, ParseError> { 
    let inner = strip_parens(s);
    if inner.is_empty() && !s.is_empty() { 
        return Err(ParseError::InvalidCoeff(s.to_string()))
    }

    match inner { 
        "" | "+" => return Ok(Cpx::one()),
        "-" => return Ok(-Cpx::one()),
        _ => ()
    }

    if let Some(x) = parse_real(inner) { 
        return Ok(Cpx::new(x, 0.0))
    }

    if let Some(c) = parse_imag(inner) { 
        return Ok(c)
    }

    if let Some(rest) = inner.strip_prefix('-') { 
        return parse_cpx(rest, symbols).map(|c| -c)
    } else if let Some(rest) = inner.strip_prefix('+') { 
        return parse_cpx(rest, symbols)
    }

    if is_symbol(inner) { 
        match symbols.get(inner) { 
            Some(&x) if x.is_finite() => Ok(Cpx::new(x, 0.0)),
            Some(_) => Err(ParseError::InvalidCoeff(inner.to_string())),
            None => Err(ParseError::UnknownSymbol(inner.to_string()))
        }
    } else { 
        Err(ParseError::InvalidCoeff(s.to_string()))
    }
}
