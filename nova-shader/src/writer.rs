use nova::Cpx;

const INDENT: &str = "    ";

/// Line-oriented text builder with brace-tracked indentation.
#[derive(Clone, Default, Debug)]
pub struct ShaderWriter { 
    buf: String,
    depth: usize,
}

impl ShaderWriter { 
    pub fn new() -> Self { 
        Self::default()
    }

    pub fn line<S>(&mut self, s: S) -> &mut Self
    where S: AsRef<str> { 
        let s = s.as_ref();
        if !s.is_empty() { 
            for _ in 0..self.depth { 
                self.buf.push_str(INDENT);
            }
            self.buf.push_str(s);
        }
        self.buf.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self { 
        self.line("")
    }

    // writes `s {` and indents.
    pub fn open<S>(&mut self, s: S) -> &mut Self
    where S: AsRef<str> { 
        self.line(format!("{} {{", s.as_ref()));
        self.depth += 1;
        self
    }

    pub fn close(&mut self) -> &mut Self { 
        self.close_with("}")
    }

    pub fn close_with<S>(&mut self, s: S) -> &mut Self
    where S: AsRef<str> { 
        self.depth = self.depth.saturating_sub(1);
        self.line(s)
    }

    pub fn finish(&mut self) -> String { 
        std::mem::take(&mut self.buf)
    }
}

/// GLSL float literal. Always carries a `.` or an exponent.
pub fn float(x: f64) -> String { 
    if x.is_finite() { 
        format!("{x:?}")
    } else { 
        "0.0".to_string()
    }
}

pub fn vec2(c: &Cpx) -> String { 
    format!("vec2({}, {})", float(c.re), float(c.im))
}
