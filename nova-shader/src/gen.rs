use itertools::Itertools;
use log::debug;
use nova::Poly;
use nova_roots::{Interrupt, Interrupted, RootSolver};

use crate::blocks::*;
use crate::{FractalRoots, ShaderParams};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ShaderSource { 
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource { 
    pub fn new(roots: &FractalRoots, params: &ShaderParams) -> Self { 
        Self { 
            vertex: vertex_shader(),
            fragment: fragment_shader_from(roots, params)
        }
    }
}

// Full-screen quad pass-through.
pub fn vertex_shader() -> String { 
    let mut w = crate::ShaderWriter::new();
    w.line(GLSL_VERSION)
        .blank()
        .line("layout(location = 0) in vec2 a_position;")
        .line("out vec2 v_uv;")
        .blank()
        .open("void main()")
        .line("v_uv = a_position * 0.5 + 0.5;")
        .line("gl_Position = vec4(a_position, 0.0, 1.0);")
        .close();
    w.finish()
}

/// Solves `p` and `p'` with the default solver and generates the
/// fragment shader.
pub fn fragment_shader(p: &Poly, params: &ShaderParams) -> String { 
    let roots = FractalRoots::solve(p);
    fragment_shader_from(&roots, params)
}

/// Same as [`fragment_shader`], giving up once `stop` fires while
/// solving.
pub fn fragment_shader_until<I>(p: &Poly, params: &ShaderParams, stop: &I) -> Result<String, Interrupted>
where I: Interrupt + ?Sized { 
    let roots = FractalRoots::solve_until(&RootSolver::default(), p, stop)?;
    Ok(fragment_shader_from(&roots, params))
}

pub fn fragment_shader_from(roots: &FractalRoots, params: &ShaderParams) -> String { 
    let (p, dp) = if params.hardcode { 
        (RootSource::Hardcoded(&roots.poly), RootSource::Hardcoded(&roots.deriv))
    } else { 
        (RootSource::Uniform, RootSource::Uniform)
    };

    let blocks = [
        ("header",    header()),
        ("arith",     complex_arith()),
        ("poly",      evaluator("poly", p)),
        ("deriv",     evaluator("deriv", dp)),
        ("iteration", iteration(params.iterations, params.threshold_exp)),
        ("colorizer", colorizer(params.mode, params.iterations)),
        ("shade",     shade_fn()),
        ("sampler",   sampler(params.aa)),
        ("main",      main_fn()),
    ];

    for (name, b) in blocks.iter() { 
        debug!("{name}: {} lines", b.lines().count());
    }

    blocks.into_iter().map(|(_, b)| b).join("\n")
}
