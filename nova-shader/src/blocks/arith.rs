use crate::ShaderWriter;

// Complex numbers are `vec2(re, im)`; `+` and `-` are the vector ops.
pub fn complex_arith() -> String { 
    let mut w = ShaderWriter::new();

    w.open("float csqr_abs(vec2 a)")
        .line("return dot(a, a);")
        .close()
        .blank();

    w.open("float cabs(vec2 a)")
        .line("return sqrt(csqr_abs(a));")
        .close()
        .blank();

    w.open("vec2 cmul(vec2 a, vec2 b)")
        .line("return vec2(a.x * b.x - a.y * b.y, a.x * b.y + a.y * b.x);")
        .close()
        .blank();

    w.open("vec2 cdiv(vec2 a, vec2 b)")
        .line("return vec2(a.x * b.x + a.y * b.y, a.y * b.x - a.x * b.y) / csqr_abs(b);")
        .close();

    w.finish()
}
