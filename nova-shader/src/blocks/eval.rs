use nova_roots::RootSet;
use crate::{vec2, ShaderWriter};

// Where an evaluator takes its roots from.
#[derive(Clone, Copy, Debug)]
pub enum RootSource<'a> { 
    Hardcoded(&'a RootSet),
    Uniform,
}

/// `vec2 <prefix>_eval(vec2 z)` in product form `lead · Π (z - rᵢ)`.
///
/// Hardcoded roots become literals, so a new polynomial needs new
/// shader text. Uniform roots are read from `<prefix>_roots`,
/// `<prefix>_count` and `<prefix>_lead` and only need a re-upload.
pub fn evaluator(prefix: &str, source: RootSource) -> String { 
    let mut w = ShaderWriter::new();
    let sig = format!("vec2 {prefix}_eval(vec2 z)");

    match source { 
        RootSource::Hardcoded(roots) => { 
            w.open(sig)
                .line(format!("vec2 r = {};", vec2(&roots.remainder())));

            for r in roots.iter() { 
                w.line(format!("r = cmul(r, z - {});", vec2(r)));
            }

            w.line("return r;").close();
        },
        RootSource::Uniform => { 
            w.line(format!("uniform vec2 {prefix}_roots[MAX_ROOTS];"))
                .line(format!("uniform int {prefix}_count;"))
                .line(format!("uniform vec2 {prefix}_lead;"))
                .blank();

            w.open(sig)
                .line(format!("vec2 r = {prefix}_lead;"))
                .open(format!("for (int i = 0; i < {prefix}_count; i++)"))
                .line(format!("r = cmul(r, z - {prefix}_roots[i]);"))
                .close()
                .line("return r;")
                .close();
        }
    }

    w.finish()
}
