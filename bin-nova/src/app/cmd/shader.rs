use log::info;
use clap::ValueEnum;
use derive_more::Display;
use nova::ensure;
use nova_shader::{fragment_shader_from, vertex_shader, AaQuality, FractalRoots, ShaderParams, ShadingMode, UniformData};
use crate::app::utils::*;

pub fn dispatch(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    App::new(args.clone()).run()
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Display, Debug, Default)]
#[clap(rename_all="lower")]
pub enum Stage { 
    #[default] 
    Frag, 
    Vert
}

#[derive(Clone, Default, Debug, clap::Args)]
pub struct Args { 
    #[arg(default_value = "z^3 - 1")]
    pub formula: String,

    #[arg(short, long, default_value = "")]
    pub symbols: String,

    #[arg(short, long)]
    pub mode: Option<ShadingMode>,

    #[arg(short, long)]
    pub aa: Option<AaQuality>,

    #[arg(short, long)]
    pub iterations: Option<usize>,

    #[arg(short, long)]
    pub threshold: Option<f64>,

    #[arg(short, long)]
    pub uniform: bool,

    /// JSON file with shader parameters, overridden by the flags above.
    #[arg(short, long)]
    pub params: Option<String>,

    #[arg(long, default_value = "frag")]
    pub stage: Stage,

    /// Print the uniform data as JSON instead of shader text.
    #[arg(long)]
    pub uniforms: bool,

    #[arg(long, default_value = "0")]
    pub log: u8,
}

pub struct App { 
    args: Args
}

impl App { 
    pub fn new(args: Args) -> Self { 
        App { args }
    }

    pub fn run(&self) -> Result<String, Box<dyn std::error::Error>> { 
        if self.args.stage == Stage::Vert { 
            return Ok(vertex_shader())
        }

        let params = self.params()?;
        info!("params: {:?}", params);

        let symbols = parse_symbols(&self.args.symbols)?;
        let p = load_poly(&self.args.formula, &symbols)?;
        let roots = FractalRoots::solve(&p);

        if self.args.uniforms { 
            ensure!(!params.hardcode, "uniform data requires `--uniform`.");
            let data = UniformData::from_roots(&roots)?;
            return Ok(serde_json::to_string_pretty(&data)?)
        }

        Ok(fragment_shader_from(&roots, &params))
    }

    fn params(&self) -> Result<ShaderParams, Box<dyn std::error::Error>> { 
        let mut params = if let Some(path) = &self.args.params { 
            let json = std::fs::read_to_string(path)?;
            serde_json::from_str::<ShaderParams>(&json)?
        } else { 
            ShaderParams::default()
        };

        if let Some(mode) = self.args.mode { 
            params.mode = mode;
        }
        if let Some(aa) = self.args.aa { 
            params.aa = aa;
        }
        if let Some(n) = self.args.iterations { 
            params.iterations = n;
        }
        if let Some(t) = self.args.threshold { 
            params.threshold_exp = t;
        }
        if self.args.uniform { 
            params.hardcode = false;
        }

        ensure!(params.iterations > 0, "iterations must be positive.");

        Ok(params)
    }
}

#[cfg(test)]
mod tests { 
    use super::*;

    fn args(formula: &str) -> Args { 
        Args { 
            formula: formula.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn fragment() { 
        let res = dispatch(&args("z^3 - 1")).unwrap();
        assert!(res.starts_with("#version 330 core"));
        assert!(res.contains("vec2 poly_eval(vec2 z)"));
        assert_eq!(res.matches("return shade(z);").count(), 1);
    }

    #[test]
    fn options() { 
        let args = Args { 
            mode: Some(ShadingMode::Flat),
            aa: Some(AaQuality::X4),
            iterations: Some(12),
            ..args("z^4 + 1")
        };
        let res = dispatch(&args).unwrap();
        assert!(res.contains("const int ITER = 12;"));
        assert!(res.contains("float(r.iter) / 12.0"));
        assert_eq!(res.matches("acc += shade(").count(), 16);
    }

    #[test]
    fn vertex() { 
        let args = Args { stage: Stage::Vert, ..args("z^") };
        assert_eq!(dispatch(&args).unwrap(), vertex_shader());
    }

    #[test]
    fn uniforms() { 
        let args = Args { uniform: true, uniforms: true, ..args("z^2 + 1") };
        let res = dispatch(&args).unwrap();
        let json: serde_json::Value = serde_json::from_str(&res).unwrap();
        assert_eq!(json["poly"]["count"], 2);
        assert_eq!(json["deriv"]["count"], 1);

        let args = Args { uniform: false, ..args };
        assert!(dispatch(&args).is_err());
    }

    #[test]
    fn zero_iterations() { 
        let args = Args { iterations: Some(0), ..args("z^3 - 1") };
        assert!(dispatch(&args).is_err());
    }
}
