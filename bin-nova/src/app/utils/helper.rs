use std::sync::LazyLock;
use regex::Regex;
use nova::{err, Poly, Symbols};

pub fn measure<F, Res>(proc: F) -> (Res, std::time::Duration) 
where F: FnOnce() -> Res { 
    let start = std::time::Instant::now();
    let res = proc();
    let time = start.elapsed();
    (res, time)
}

pub fn guard_panic<F, R>(f: F) -> Result<R, Box<dyn std::error::Error>>
where F: FnOnce() -> Result<R, Box<dyn std::error::Error>> + std::panic::UnwindSafe {
    std::panic::catch_unwind(|| {
        f()
    }).unwrap_or_else(|e| {
        let info = match e.downcast::<String>() {
            Ok(v) => *v,
            Err(e) => match e.downcast::<&str>() {
                Ok(v) => v.to_string(),
                _ => "Unknown Source of Error".to_owned()
            }
        };
        err!("panic: {info}")
    })
}

static ASSIGN: LazyLock<Regex> = LazyLock::new(|| 
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)=(.+)$").unwrap()
);

// `A=1.5,B=-2` 
pub fn parse_symbols(input: &str) -> Result<Symbols, Box<dyn std::error::Error>> { 
    let mut symbols = Symbols::default();

    for s in input.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) { 
        let s = s.replace(' ', "");
        let Some(c) = ASSIGN.captures(&s) else { 
            return err!("invalid symbol assignment: '{s}'")
        };

        let Some(v) = c[2].parse::<f64>().ok().filter(|v| v.is_finite()) else { 
            return err!("invalid value for '{}': '{}'", &c[1], &c[2])
        };

        symbols.insert(c[1].to_string(), v);
    }

    Ok(symbols)
}

pub fn load_poly(input: &str, symbols: &Symbols) -> Result<Poly, Box<dyn std::error::Error>> { 
    match Poly::try_parse(input, symbols) { 
        Ok(p) => Ok(p),
        Err(e) => err!("invalid formula '{input}': {e}")
    }
}
