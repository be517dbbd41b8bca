use crate::app::utils::*;

pub fn dispatch(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    let symbols = parse_symbols(&args.symbols)?;
    let p = load_poly(&args.formula, &symbols)?;
    let dp = (0..args.order).fold(p, |p, _| p.derivative());
    Ok(dp.to_string())
}

#[derive(Clone, Debug, clap::Args)]
pub struct Args { 
    pub formula: String,

    #[arg(short, long, default_value = "")]
    pub symbols: String,

    #[arg(short = 'n', long, default_value = "1")]
    pub order: usize,

    #[arg(long, default_value = "0")]
    pub log: u8,
}

impl Default for Args { 
    fn default() -> Self {
        Self { 
            formula: String::new(),
            symbols: String::new(),
            order: 1,
            log: 0
        }
    }
}
