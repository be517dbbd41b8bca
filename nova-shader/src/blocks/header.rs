use crate::{ShaderWriter, MAX_ROOTS};

pub const GLSL_VERSION: &str = "#version 330 core";

// Uniforms shared by every fragment shader, set by the renderer.
pub const SHARED_UNIFORMS: [(&str, &str); 8] = [
    ("vec2",  "u_coeff_a"),
    ("vec2",  "u_coeff_k"),
    ("vec3",  "u_palette"),
    ("float", "u_intensity"),
    ("float", "u_zoom"),
    ("vec2",  "u_pan"),
    ("float", "u_aspect"),
    ("vec2",  "u_pixel"),
];

pub fn header() -> String { 
    let mut w = ShaderWriter::new();

    w.line(GLSL_VERSION).blank();

    for (ty, name) in SHARED_UNIFORMS { 
        w.line(format!("uniform {ty} {name};"));
    }

    w.blank()
        .line(format!("const int MAX_ROOTS = {MAX_ROOTS};"))
        .blank()
        .line("in vec2 v_uv;")
        .line("out vec4 frag_color;");

    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms() { 
        let h = header();
        assert!(h.starts_with("#version 330 core\n"));
        assert!(h.contains("uniform vec2 u_coeff_a;\n"));
        assert!(h.contains("uniform float u_intensity;\n"));
        assert!(h.contains("const int MAX_ROOTS = 32;\n"));
        assert!(h.contains("out vec4 frag_color;\n"));
    }
}
