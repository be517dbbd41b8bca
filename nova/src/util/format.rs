use std::fmt::Display;
use itertools::Itertools;

// Joins `(monomial, coefficient)` pairs into `c₀*x₀ + c₁*x₁ - ...`.
// Coefficients are expected to be already rendered in a self-delimiting form.
pub fn lc<S>(mut terms: S) -> String
where S: Iterator<Item = (String, String)> { 
    let mut res: Vec<String> = vec![];

    if let Some((x, r)) = terms.next() {
        let term = if r == "1" { 
            x
        } else if r == "-1" { 
            if x == "1" { r } else { format!("-{x}") }
        } else if x == "1" {
            r
        } else { 
            format!("{r}*{x}")
        };

        res.push(term)
    };

    for (x, r) in terms {
        let (op, r) = if let Some(r) = r.strip_prefix('-') { 
            ("-", r.to_owned()) 
        } else { 
            ("+", r)
        };

        let term = if r == "1" { 
            x
        } else if x == "1" { 
            r
        } else { 
            format!("{r}*{x}")
        };

        res.push(op.to_string());
        res.push(term);
    }

    res.join(" ")
}

pub fn table<S, I, J, I1, I2, D, F>(head: S, rows: I1, cols: I2, entry: F) -> String
where 
    S: Display,
    I: Display,
    J: Display,
    I1: Iterator<Item = I>,
    I2: Iterator<Item = J>,
    D: Display,
    F: Fn(&I, &J) -> D
{
    use prettytable::*;

    let rows = rows.collect_vec();
    let cols = cols.collect_vec();

    fn row<I>(head: String, cols: I) -> Row
    where I: Iterator<Item = String> { 
        let mut cells = vec![Cell::new(head.as_str())];
        cells.extend(cols.map(|str| Cell::new(str.as_str())));
        Row::new(cells)
    }

    let mut table = Table::new();

    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(row(
        head.to_string(),
        cols.iter().map(|j| j.to_string() )
    ));

    for i in rows.iter() { 
        table.add_row(row(
            i.to_string(),
            cols.iter().map(|j| format!("{}", entry(i, j)))
        ));
    }

    table.to_string()
}
