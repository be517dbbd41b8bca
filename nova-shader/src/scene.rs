use derive_more::Display;
use log::{debug, info};
use nova::{ParseError, Poly, Symbols};
use nova::util::Error;
use nova_roots::{Interrupt, Interrupted, RootSolver};

use crate::{FractalRoots, ShaderParams, ShaderSource, UniformData};

/// The host's rendering backend. Owns all GPU state; receives only
/// text and plain data.
pub trait Renderer { 
    fn upload_program(&mut self, source: &ShaderSource);
    fn upload_uniforms(&mut self, data: &UniformData);
}

#[derive(Debug, Display)]
pub enum SceneError { 
    #[display("{_0}")]
    Parse(ParseError),
    #[display("{_0}")]
    Interrupted(Interrupted),
}

impl std::error::Error for SceneError {}

impl From<ParseError> for SceneError { 
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<Interrupted> for SceneError { 
    fn from(e: Interrupted) -> Self {
        Self::Interrupted(e)
    }
}

/// Current formula, symbols and shader parameters, and what the
/// renderer has not seen yet.
/// 
/// Setters validate their input before committing anything, so a
/// rejected formula leaves the previous polynomial active.
#[derive(Clone, Debug)]
pub struct Scene { 
    formula: String,
    symbols: Symbols,
    poly: Poly,
    roots: FractalRoots,
    params: ShaderParams,
    solver: RootSolver,
    formula_changed: bool,
    params_changed: bool,
}

impl Scene { 
    pub fn new(formula: &str, symbols: Symbols, params: ShaderParams) -> Result<Self, ParseError> { 
        Self::new_with(formula, symbols, params, RootSolver::default())
    }

    pub fn new_with(formula: &str, symbols: Symbols, params: ShaderParams, solver: RootSolver) -> Result<Self, ParseError> { 
        let poly = Poly::try_parse(formula, &symbols)?;
        let roots = FractalRoots::solve_with(&solver, &poly);
        Ok(Self::from_parts(formula, symbols, poly, roots, params, solver))
    }

    /// Same as [`Scene::new_with`], giving up once `stop` fires while
    /// solving.
    pub fn new_until<I>(formula: &str, symbols: Symbols, params: ShaderParams, solver: RootSolver, stop: &I) -> Result<Self, SceneError>
    where I: Interrupt + ?Sized { 
        let poly = Poly::try_parse(formula, &symbols)?;
        let roots = FractalRoots::solve_until(&solver, &poly, stop)?;
        Ok(Self::from_parts(formula, symbols, poly, roots, params, solver))
    }

    fn from_parts(formula: &str, symbols: Symbols, poly: Poly, roots: FractalRoots, params: ShaderParams, solver: RootSolver) -> Self { 
        Self { 
            formula: formula.to_string(),
            symbols,
            poly,
            roots,
            params,
            solver,
            formula_changed: true,
            params_changed: true,
        }
    }

    pub fn formula(&self) -> &str { 
        &self.formula
    }

    pub fn poly(&self) -> &Poly { 
        &self.poly
    }

    pub fn roots(&self) -> &FractalRoots { 
        &self.roots
    }

    pub fn params(&self) -> &ShaderParams { 
        &self.params
    }

    pub fn symbols(&self) -> &Symbols { 
        &self.symbols
    }

    pub fn set_formula(&mut self, formula: &str) -> Result<(), ParseError> { 
        let poly = Poly::try_parse(formula, &self.symbols)?;
        if !self.is_current(formula, &poly) { 
            let roots = FractalRoots::solve_with(&self.solver, &poly);
            self.commit(formula.to_string(), poly, roots);
        }
        Ok(())
    }

    /// Same as [`Scene::set_formula`], giving up once `stop` fires while
    /// solving. Nothing is committed when interrupted.
    pub fn set_formula_until<I>(&mut self, formula: &str, stop: &I) -> Result<(), SceneError>
    where I: Interrupt + ?Sized { 
        let poly = Poly::try_parse(formula, &self.symbols)?;
        if !self.is_current(formula, &poly) { 
            let roots = FractalRoots::solve_until(&self.solver, &poly, stop)?;
            self.commit(formula.to_string(), poly, roots);
        }
        Ok(())
    }

    pub fn set_symbol(&mut self, name: &str, value: f64) -> Result<(), ParseError> { 
        let (symbols, poly) = self.with_symbol(name, value)?;
        let formula = self.formula.clone();
        if !self.is_current(&formula, &poly) { 
            let roots = FractalRoots::solve_with(&self.solver, &poly);
            self.commit(formula, poly, roots);
        }
        self.symbols = symbols;
        Ok(())
    }

    /// Same as [`Scene::set_symbol`], giving up once `stop` fires while
    /// solving. Nothing is committed when interrupted.
    pub fn set_symbol_until<I>(&mut self, name: &str, value: f64, stop: &I) -> Result<(), SceneError>
    where I: Interrupt + ?Sized { 
        let (symbols, poly) = self.with_symbol(name, value)?;
        let formula = self.formula.clone();
        if !self.is_current(&formula, &poly) { 
            let roots = FractalRoots::solve_until(&self.solver, &poly, stop)?;
            self.commit(formula, poly, roots);
        }
        self.symbols = symbols;
        Ok(())
    }

    // Returns the updated table and the current formula re-parsed with it.
    fn with_symbol(&self, name: &str, value: f64) -> Result<(Symbols, Poly), ParseError> { 
        if !value.is_finite() { 
            return Err(ParseError::InvalidCoeff(name.to_string()))
        }

        let mut symbols = self.symbols.clone();
        symbols.insert(name.to_string(), value);

        let poly = Poly::try_parse(&self.formula, &symbols)?;
        Ok((symbols, poly))
    }

    pub fn set_params(&mut self, params: ShaderParams) { 
        if self.params != params { 
            debug!("params: {:?}", params);
            self.params = params;
            self.params_changed = true;
        }
    }

    fn is_current(&self, formula: &str, poly: &Poly) -> bool { 
        &self.poly == poly && self.formula == formula
    }

    fn commit(&mut self, formula: String, poly: Poly, roots: FractalRoots) { 
        debug!("formula: {formula}");

        self.roots = roots;
        self.formula = formula;
        self.poly = poly;
        self.formula_changed = true;
    }

    pub fn shader_source(&self) -> ShaderSource { 
        ShaderSource::new(&self.roots, &self.params)
    }

    pub fn uniforms(&self) -> Result<UniformData, Error> { 
        UniformData::from_roots(&self.roots)
    }

    /// Pushes pending changes to `renderer`.
    /// 
    /// With hardcoded roots every change needs a new program. Otherwise
    /// a formula change only needs new uniforms, and every program
    /// upload is followed by the uniforms it reads.
    pub fn sync<R>(&mut self, renderer: &mut R) -> Result<(), Error>
    where R: Renderer + ?Sized { 
        if !self.formula_changed && !self.params_changed { 
            return Ok(())
        }

        if self.params.hardcode { 
            info!("upload program (hardcoded roots).");
            renderer.upload_program(&self.shader_source());
        } else { 
            let data = self.uniforms()?;
            if self.params_changed { 
                info!("upload program.");
                renderer.upload_program(&self.shader_source());
            }
            debug!("upload uniforms.");
            renderer.upload_uniforms(&data);
        }

        self.formula_changed = false;
        self.params_changed = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use nova::{symbols, Cpx};
    use crate::{AaQuality, ShadingMode};
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum Event { 
        Program(ShaderSource),
        Uniforms(UniformData),
    }

    #[derive(Default)]
    struct Recorder { 
        events: Vec<Event>
    }

    impl Recorder { 
        fn take(&mut self) -> Vec<Event> { 
            std::mem::take(&mut self.events)
        }
    }

    impl Renderer for Recorder { 
        fn upload_program(&mut self, source: &ShaderSource) { 
            self.events.push(Event::Program(source.clone()))
        }

        fn upload_uniforms(&mut self, data: &UniformData) { 
            self.events.push(Event::Uniforms(data.clone()))
        }
    }

    fn uniform_mode() -> ShaderParams { 
        ShaderParams { hardcode: false, ..Default::default() }
    }

    #[test]
    fn new() { 
        let s = Scene::new("z^3 - 1", Symbols::default(), ShaderParams::default()).unwrap();
        assert_eq!(s.formula(), "z^3 - 1");
        assert_eq!(s.poly().deg(), 3);
        assert_eq!(s.roots().poly.len(), 3);

        let e = Scene::new("z^", Symbols::default(), ShaderParams::default()).unwrap_err();
        assert_eq!(e, ParseError::InvalidExponent("z^".into()));
    }

    #[test]
    fn failed_formula_keeps_previous() { 
        let mut s = Scene::new("z^3 - 1", Symbols::default(), ShaderParams::default()).unwrap();
        let before = s.poly().clone();

        assert!(s.set_formula("z^3 - (1").is_err());
        assert_eq!(s.poly(), &before);
        assert_eq!(s.formula(), "z^3 - 1");

        assert!(s.set_formula("z^4 - 1").is_ok());
        assert_eq!(s.poly().deg(), 4);
        assert_eq!(s.roots().poly.len(), 4);
    }

    #[test]
    fn symbols() { 
        let mut s = Scene::new("A*z^2 + 1", symbols!{ "A" => 1.0 }, ShaderParams::default()).unwrap();
        
        s.set_symbol("A", 4.0).unwrap();
        assert_eq!(s.poly().lead_coeff(), Cpx::new(4.0, 0.0));
        assert_eq!(s.symbols().get("A"), Some(&4.0));

        assert!(s.set_formula("A*z^2 + B").is_err());
        s.set_symbol("B", 2.0).unwrap();
        s.set_formula("A*z^2 + B").unwrap();
        assert_eq!(s.poly().const_term(), Cpx::new(2.0, 0.0));
    }

    #[test]
    fn unused_symbol() { 
        let mut s = Scene::new("z^2 + 1", Symbols::default(), ShaderParams::default()).unwrap();
        let mut r = Recorder::default();
        s.sync(&mut r).unwrap();
        r.take();

        s.set_symbol("C", 3.0).unwrap();
        assert_eq!(s.symbols().len(), 1);

        s.sync(&mut r).unwrap();
        assert!(r.take().is_empty());
    }

    #[test]
    fn sync_hardcoded() { 
        let mut s = Scene::new("z^3 - 1", Symbols::default(), ShaderParams::default()).unwrap();
        let mut r = Recorder::default();

        s.sync(&mut r).unwrap();
        let ev = r.take();
        assert_eq!(ev.len(), 1);
        assert!(matches!(ev[0], Event::Program(_)));

        s.sync(&mut r).unwrap();
        assert!(r.take().is_empty());

        s.set_formula("z^4 - 1").unwrap();
        s.sync(&mut r).unwrap();
        let ev = r.take();
        assert_eq!(ev.len(), 1);
        assert!(matches!(&ev[0], Event::Program(src) if src.fragment.matches("r = cmul(r, z - vec2(").count() == 4 + 3));
    }

    #[test]
    fn sync_uniform() { 
        let mut s = Scene::new("z^3 - 1", Symbols::default(), uniform_mode()).unwrap();
        let mut r = Recorder::default();

        s.sync(&mut r).unwrap();
        let ev = r.take();
        assert_eq!(ev.len(), 2);
        assert!(matches!(ev[0], Event::Program(_)));
        assert!(matches!(ev[1], Event::Uniforms(_)));

        // formula change: uniforms only.
        s.set_formula("z^5 + 2").unwrap();
        s.sync(&mut r).unwrap();
        let ev = r.take();
        assert_eq!(ev.len(), 1);
        assert!(matches!(&ev[0], Event::Uniforms(u) if u.poly.count == 5 && u.deriv.count == 4));

        // params change: program, then uniforms again.
        s.set_params(ShaderParams { mode: ShadingMode::Negative, aa: AaQuality::X4, ..uniform_mode() });
        s.sync(&mut r).unwrap();
        let ev = r.take();
        assert_eq!(ev.len(), 2);
        assert!(matches!(&ev[0], Event::Program(src) if src.fragment.contains("return acc / 16.0;")));
        assert!(matches!(ev[1], Event::Uniforms(_)));
    }

    #[test]
    fn unchanged_params() { 
        let mut s = Scene::new("z^3 - 1", Symbols::default(), uniform_mode()).unwrap();
        let mut r = Recorder::default();
        s.sync(&mut r).unwrap();
        r.take();

        s.set_params(uniform_mode());
        s.set_formula("z^3 - 1").unwrap();
        s.sync(&mut r).unwrap();
        assert!(r.take().is_empty());
    }

    #[test]
    fn sync_overflow() { 
        let mut s = Scene::new("z^33 - 1", Symbols::default(), uniform_mode()).unwrap();
        let mut r = Recorder::default();

        assert!(s.sync(&mut r).is_err());
        assert!(r.take().is_empty());

        s.set_params(ShaderParams::default());
        assert!(s.sync(&mut r).is_ok());
        assert_eq!(r.take().len(), 1);
    }

    #[test]
    fn non_finite_symbol() { 
        let mut s = Scene::new("A*z - 1", symbols!{ "A" => 2.0 }, ShaderParams::default()).unwrap();
        let before = s.poly().clone();

        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] { 
            let e = s.set_symbol("A", v).unwrap_err();
            assert_eq!(e, ParseError::InvalidCoeff("A".into()));
        }

        assert_eq!(s.poly(), &before);
        assert_eq!(s.symbols().get("A"), Some(&2.0));
        assert!(s.set_symbol("B", f64::NAN).is_err());
        assert!(s.symbols().get("B").is_none());

        assert!(Scene::new("A*z - 1", symbols!{ "A" => f64::NAN }, ShaderParams::default()).is_err());
    }

    #[test]
    fn interrupted_formula_keeps_previous() { 
        use std::sync::atomic::AtomicBool;

        let mut s = Scene::new("z^3 - 1", Symbols::default(), ShaderParams::default()).unwrap();
        let mut r = Recorder::default();
        s.sync(&mut r).unwrap();
        r.take();

        let stop = AtomicBool::new(true);
        let e = s.set_formula_until("z^4 - 1", &stop).unwrap_err();
        assert!(matches!(e, SceneError::Interrupted(_)));
        assert_eq!(s.formula(), "z^3 - 1");
        assert_eq!(s.roots().poly.len(), 3);

        let e = s.set_formula_until("z^4 - (1", &stop).unwrap_err();
        assert!(matches!(e, SceneError::Parse(_)));

        s.sync(&mut r).unwrap();
        assert!(r.take().is_empty());

        let go = AtomicBool::new(false);
        s.set_formula_until("z^4 - 1", &go).unwrap();
        assert_eq!(s.roots().poly.len(), 4);
    }

    #[test]
    fn interrupted_symbol_keeps_table() { 
        use std::sync::atomic::AtomicBool;

        let mut s = Scene::new("A*z^2 + 1", symbols!{ "A" => 1.0 }, ShaderParams::default()).unwrap();

        let e = s.set_symbol_until("A", 3.0, &AtomicBool::new(true)).unwrap_err();
        assert!(matches!(e, SceneError::Interrupted(_)));
        assert_eq!(s.symbols().get("A"), Some(&1.0));
        assert_eq!(s.poly().lead_coeff(), Cpx::new(1.0, 0.0));

        s.set_symbol_until("A", 3.0, &()).unwrap();
        assert_eq!(s.poly().lead_coeff(), Cpx::new(3.0, 0.0));
    }

    #[test]
    fn new_until() { 
        use std::sync::atomic::AtomicBool;
        use std::time::{Duration, Instant};

        let deadline = Instant::now() + Duration::from_secs(60);
        let s = Scene::new_until("z^3 - 1", Symbols::default(), ShaderParams::default(), RootSolver::default(), &deadline).unwrap();
        assert_eq!(s.roots().poly.len(), 3);

        let e = Scene::new_until("z^3 - 1", Symbols::default(), ShaderParams::default(), RootSolver::default(), &AtomicBool::new(true)).unwrap_err();
        assert!(e.to_string().starts_with("root search interrupted"));
    }
}
