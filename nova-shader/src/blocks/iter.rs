use crate::{float, ShaderWriter};

/// `IterResult iterate(vec2 z)`: the Nova iteration
/// `z ← z - a·p(z)/p'(z) - k` with at most `iterations` steps.
///
/// Each step adds `exp(-1 / sqrt(|Δz|))` to the speed and the loop
/// leaves once `|Δz| < 10^(-threshold_exp)`.
pub fn iteration(iterations: usize, threshold_exp: f64) -> String { 
    let mut w = ShaderWriter::new();
    let threshold = 10f64.powf(-threshold_exp);

    w.open("struct IterResult")
        .line("vec2 z;")
        .line("float speed;")
        .line("int iter;")
        .close_with("};")
        .blank();

    w.line(format!("const int ITER = {};", iterations.max(1)))
        .line(format!("const float THRESHOLD = {};", float(threshold)))
        .blank();

    w.open("IterResult iterate(vec2 z)")
        .line("float speed = 0.0;")
        .line("int iter = 0;")
        .open("for (int n = 0; n < ITER; n++)")
        .line("vec2 dz = cmul(u_coeff_a, cdiv(poly_eval(z), deriv_eval(z))) + u_coeff_k;")
        .line("z -= dz;")
        .line("float d = cabs(dz);")
        .line("speed += exp(-1.0 / sqrt(d));")
        .line("iter = n + 1;")
        .open("if (d < THRESHOLD)")
        .line("break;")
        .close()
        .close()
        .line("return IterResult(z, speed, iter);")
        .close();

    w.finish()
}
