use itertools::Itertools;
use crate::{float, AaQuality, ShaderWriter};

pub fn shade_fn() -> String { 
    let mut w = ShaderWriter::new();
    w.open("vec3 shade(vec2 z)")
        .line("vec3 c = clamp(colorize(iterate(z)), 0.0, 1.0);")
        .line("return pow(c, vec3(u_intensity));")
        .close();
    w.finish()
}

// Sub-pixel offsets of an `n × n` grid centered on the pixel.
fn offsets(n: usize) -> Vec<f64> { 
    (0..n).map(|i| (i as f64 + 0.5) / n as f64 - 0.5).collect()
}

/// `vec3 supersample(vec2 z)`: averages `n²` calls to `shade` at regular
/// sub-pixel offsets, unrolled here rather than looped in the shader.
pub fn sampler(aa: AaQuality) -> String { 
    let mut w = ShaderWriter::new();
    let n = aa.side();

    w.open("vec3 supersample(vec2 z)");

    if n == 1 { 
        w.line("return shade(z);");
    } else { 
        let d = offsets(n);
        w.line("vec3 acc = vec3(0.0);");

        for (y, x) in d.iter().cartesian_product(d.iter()) { 
            w.line(format!("acc += shade(z + vec2({}, {}) * u_pixel);", float(*x), float(*y)));
        }

        w.line(format!("return acc / {};", float(aa.samples() as f64)));
    }

    w.close();
    w.finish()
}

// Maps `v_uv ∈ [0,1]²` to the complex plane.
pub fn main_fn() -> String { 
    let mut w = ShaderWriter::new();
    w.open("void main()")
        .line("vec2 z = (v_uv * 2.0 - 1.0) * vec2(u_aspect, 1.0) / u_zoom + u_pan;")
        .line("frag_color = vec4(supersample(z), 1.0);")
        .close();
    w.finish()
}
