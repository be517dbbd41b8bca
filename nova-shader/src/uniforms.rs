use nova::Cpx;
use nova::util::Error;
use nova_roots::RootSet;
use crate::FractalRoots;

/// Length of the root arrays declared by uniform-mode evaluators.
pub const MAX_ROOTS: usize = 32;

// Values of `<prefix>_roots`, `<prefix>_count` and `<prefix>_lead`.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RootBuffer { 
    pub roots: Vec<[f32; 2]>,
    pub count: i32,
    pub lead: [f32; 2],
}

impl RootBuffer { 
    pub fn from_roots(name: &str, set: &RootSet) -> Result<Self, Error> { 
        nova::ensure!(
            set.len() <= MAX_ROOTS, 
            "{name}: {} roots exceed the uniform buffer ({MAX_ROOTS}).", set.len()
        );

        Ok(Self { 
            roots: set.iter().map(pack).collect(),
            count: set.len() as i32,
            lead: pack(&set.remainder())
        })
    }

    // `roots` zero-filled to `MAX_ROOTS`, for renderers that upload the
    // whole array.
    pub fn padded(&self) -> [[f32; 2]; MAX_ROOTS] { 
        let mut res = [[0.0; 2]; MAX_ROOTS];
        res[..self.roots.len()].copy_from_slice(&self.roots);
        res
    }
}

fn pack(z: &Cpx) -> [f32; 2] { 
    [z.re as f32, z.im as f32]
}

/// Uniform data for a uniform-mode fragment shader.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UniformData { 
    pub poly: RootBuffer,
    pub deriv: RootBuffer,
}

impl UniformData { 
    pub fn from_roots(roots: &FractalRoots) -> Result<Self, Error> { 
        Ok(Self { 
            poly:  RootBuffer::from_roots("poly",  &roots.poly)?,
            deriv: RootBuffer::from_roots("deriv", &roots.deriv)?
        })
    }
}
