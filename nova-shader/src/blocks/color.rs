use crate::{float, ShadingMode, ShaderWriter};

// `vec3 colorize(IterResult r)` for the given mode.
pub fn colorizer(mode: ShadingMode, iterations: usize) -> String { 
    let mut w = ShaderWriter::new();
    let trig = "sin(r.z.x * u_palette)";
    let cotrig = "cos(r.z.y * u_palette)";

    w.open("vec3 colorize(IterResult r)");

    match mode { 
        ShadingMode::Standard => { 
            w.line(format!("vec3 blend = {trig} * r.speed + {cotrig};"))
                .line("return fract(blend);");
        },
        ShadingMode::Negative => { 
            w.open("if (r.speed == 0.0)")
                .line("return vec3(1.0);")
                .close()
                .line(format!("vec3 blend = {trig} / r.speed + {cotrig};"))
                .line("return fract(blend);");
        },
        ShadingMode::Flat => { 
            let n = float(iterations.max(1) as f64);
            w.line(format!("vec3 blend = {trig} + {cotrig};"))
                .line(format!("return blend * float(r.iter) / {n};"));
        }
    }

    w.close();
    w.finish()
}
