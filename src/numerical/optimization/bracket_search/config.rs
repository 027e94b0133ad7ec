use super::compare::Mode;
use super::errors::ConfigError;
use super::solver::SearchMethod;
use std::path::PathBuf;
use crate::symbolic::parse_expr::is_identifier;
use crate::symbolic::postfix::Constant;

/// Settings shared by the three bracketing searches
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// left end of the initial bracket
    pub a: f64,
    /// right end of the initial bracket
    pub b: f64,
    pub mode: Mode,
    /// probe offset (dichotomous) and final probe spacing (Fibonacci)
    pub eps: f64,
    /// stop once the bracket is not wider than this
    pub length: f64,
    /// name of the free variable of the formula
    pub variable: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            a: 0.0,
            b: 1.0,
            mode: Mode::Min,
            eps: 1e-5,
            length: 1e-3,
            variable: "x".to_string(),
        }
    }
}

impl SearchConfig {
    /// The mode is checked first, so an unknown mode is reported whatever the other values are.
    pub fn new(a: f64, b: f64, mode: &str, eps: f64, length: f64) -> Result<Self, ConfigError> {
        let mode = Mode::parse(mode)?;
        Ok(Self {
            a,
            b,
            mode,
            eps,
            length,
            variable: "x".to_string(),
        })
    }

    pub fn with_variable(mut self, variable: &str) -> Self {
        self.variable = variable.to_string();
        self
    }

    /// Preconditions of every search:
    /// `A < B`, `L > 0`, `eps > 0`, `2*eps < L`, both `L` and `L - 2*eps` above the float
    /// resolution at the bracket, and a free variable that is an identifier but not a constant.
    /// Below the resolution a dichotomous step `(A + B)/2 + eps` may round back onto `B`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (a, b) = (self.a, self.b);
        if !a.is_finite() || !b.is_finite() || a >= b {
            return Err(ConfigError::InvalidBounds { a, b });
        }
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(ConfigError::InvalidLength(self.length));
        }
        if !self.eps.is_finite() || self.eps <= 0.0 {
            return Err(ConfigError::InvalidEps(self.eps));
        }
        if 2.0 * self.eps >= self.length {
            return Err(ConfigError::EpsTooLarge {
                eps: self.eps,
                length: self.length,
            });
        }
        let resolution = 4.0 * f64::EPSILON * a.abs().max(b.abs());
        if self.length <= resolution {
            return Err(ConfigError::LengthBelowResolution {
                a,
                b,
                length: self.length,
            });
        }
        let margin = self.length - 2.0 * self.eps;
        if margin <= resolution {
            return Err(ConfigError::MarginBelowResolution {
                a,
                b,
                eps: self.eps,
                length: self.length,
                margin,
            });
        }
        if !is_identifier(&self.variable) || Constant::from_name(&self.variable).is_some() {
            return Err(ConfigError::InvalidVariable(self.variable.clone()));
        }
        Ok(())
    }
}

/// Fails when an iteration did not narrow the bracket `before` to `after`.
pub(crate) fn check_progress(
    before: (f64, f64),
    after: (f64, f64),
    step: usize,
) -> Result<(), ConfigError> {
    if after.0 <= before.0 && after.1 >= before.1 {
        return Err(ConfigError::Stalled {
            a: after.0,
            b: after.1,
            step,
        });
    }
    Ok(())
}

/// One search described by a task file section
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTask {
    pub name: String,
    pub method: SearchMethod,
    pub function: String,
    pub config: SearchConfig,
    /// tab separated copy of the trace table
    pub output: Option<PathBuf>,
    /// full precision CSV copy of the trace table
    pub csv: Option<PathBuf>,
}
