use nova::fmt_cpx;
use nova::util::format::table;
use nova_roots::{RootSolver, SolverConfig};
use crate::app::utils::*;

pub fn dispatch(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    App::new(args.clone()).run()
}

#[derive(Clone, Default, Debug, clap::Args)]
pub struct Args { 
    pub formula: String,

    #[arg(short, long, default_value = "")]
    pub symbols: String,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = "0")]
    pub log: u8,
}

pub struct App { 
    args: Args,
    buff: String,
}

impl App { 
    pub fn new(args: Args) -> Self { 
        let buff = String::with_capacity(1024);
        App { args, buff }
    }

    pub fn run(&mut self) -> Result<String, Box<dyn std::error::Error>> { 
        let symbols = parse_symbols(&self.args.symbols)?;
        let p = load_poly(&self.args.formula, &symbols)?;

        let mut config = SolverConfig::default();
        if let Some(seed) = self.args.seed { 
            config.seed = seed;
        }

        let set = RootSolver::new(config).solve(&p);
        let roots = set.roots();

        self.out(&format!("p(z) = {p}"));

        if roots.is_empty() { 
            self.out("no roots.");
        } else { 
            let cols = ["z", "|p(z)|"];
            let t = table("#", 0..roots.len(), cols.into_iter(), |i, j| 
                if *j == "z" { 
                    fmt_cpx(&roots[*i])
                } else { 
                    format!("{:.3e}", p.eval(&roots[*i]).norm())
                }
            );
            self.out(&t);
        }

        self.out(&format!("remainder: {}", fmt_cpx(&set.remainder())));

        Ok(self.flush())
    }

    fn out(&mut self, str: &str) { 
        self.buff.push_str(str);
        self.buff.push('\n');
    }

    fn flush(&mut self) -> String { 
        let res = std::mem::take(&mut self.buff);
        res.trim().to_string()
    }
}

#[cfg(test)]
mod tests { 
    use super::*;

    #[test]
    fn cubic() { 
        let args = Args { 
            formula: "z^3 - 1".to_string(),
            ..Default::default()
        };
        let res = dispatch(&args).unwrap();
        assert!(res.starts_with("p(z) = z^3 - 1"));
        assert!(res.ends_with("remainder: 1"));
    }

    #[test]
    fn constant() { 
        let args = Args { 
            formula: "A".to_string(),
            symbols: "A=3".to_string(),
            ..Default::default()
        };
        let res = dispatch(&args).unwrap();
        assert_eq!(res, "p(z) = A\nno roots.\nremainder: 3");
    }

    #[test]
    fn invalid() { 
        let args = Args { 
            formula: "z^".to_string(),
            ..Default::default()
        };
        assert!(dispatch(&args).is_err());
    }
}
