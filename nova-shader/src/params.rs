use std::str::FromStr;
use derive_more::Display;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug, Display)]
#[cfg_attr(feature = "serde", derive(serde_with::SerializeDisplay, serde_with::DeserializeFromStr))]
pub enum ShadingMode { 
    #[default]
    #[display("standard")]
    Standard,
    #[display("negative")]
    Negative,
    #[display("flat")]
    Flat,
}

static SHADING_LABELS: [(ShadingMode, &str); 3] = [
    (ShadingMode::Standard, "Standard"),
    (ShadingMode::Negative, "Negative"),
    (ShadingMode::Flat,     "Flat"),
];

impl ShadingMode { 
    pub fn all() -> [Self; 3] { 
        SHADING_LABELS.map(|(m, _)| m)
    }

    pub fn label(&self) -> &'static str { 
        SHADING_LABELS[*self as usize].1
    }
}

impl FromStr for ShadingMode { 
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all().into_iter().find(|m| 
            m.to_string().eq_ignore_ascii_case(s)
        ).ok_or_else(|| format!("unknown shading mode: {s}"))
    }
}

// Supersampling per pixel: `n × n` sub-samples on a regular grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug, Display)]
#[cfg_attr(feature = "serde", derive(serde_with::SerializeDisplay, serde_with::DeserializeFromStr))]
pub enum AaQuality { 
    #[default]
    #[display("1")]
    X1,
    #[display("4")]
    X4,
    #[display("9")]
    X9,
    #[display("16")]
    X16,
}

static AA_LABELS: [(AaQuality, usize, &str); 4] = [
    (AaQuality::X1,  1,  "1×"),
    (AaQuality::X4,  4,  "4×"),
    (AaQuality::X9,  9,  "9×"),
    (AaQuality::X16, 16, "16×"),
];

impl AaQuality { 
    pub fn all() -> [Self; 4] { 
        AA_LABELS.map(|(a, _, _)| a)
    }

    pub fn label(&self) -> &'static str { 
        self.entry().2
    }

    /// The side `n` of the sub-sample grid.
    pub fn side(&self) -> usize { 
        self.entry().1
    }

    /// Number of `shade` calls per pixel, `n²`.
    pub fn samples(&self) -> usize { 
        self.side().pow(2)
    }

    fn entry(&self) -> &'static (AaQuality, usize, &'static str) { 
        &AA_LABELS[*self as usize]
    }
}

impl FromStr for AaQuality { 
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s.trim_end_matches(['x', 'X', '×']);
        Self::all().into_iter().find(|a| 
            a.to_string() == n
        ).ok_or_else(|| format!("unknown AA quality: {s}"))
    }
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ShaderParams { 
    pub mode: ShadingMode,
    pub aa: AaQuality,
    /// Newton steps per pixel. Treated as 1 when zero.
    pub iterations: usize,
    /// Iteration stops once `|Δz| < 10^(-threshold_exp)`.
    pub threshold_exp: f64,
    /// Bake the roots into the shader text instead of reading them
    /// from uniforms.
    pub hardcode: bool,
}

impl Default for ShaderParams { 
    fn default() -> Self {
        Self { 
            mode: ShadingMode::Standard,
            aa: AaQuality::X1,
            iterations: 64,
            threshold_exp: 6.0,
            hardcode: true
        }
    }
}
