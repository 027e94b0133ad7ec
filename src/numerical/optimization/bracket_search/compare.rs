//! Comparator selection: which sub-interval a search discards.
use super::errors::ConfigError;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

/// Kind of extremum searched for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Max,
    Min,
}

/// `compare(f(λ), f(μ))` is true when the left part `[a, λ]` is discarded
pub type Comparator = fn(f64, f64) -> bool;

// searching a maximum: the probe with the smaller value loses
fn discard_smaller(f1: f64, f2: f64) -> bool {
    f1 < f2
}

// searching a minimum: the probe with the larger value loses
fn discard_larger(f1: f64, f2: f64) -> bool {
    f1 > f2
}

impl Mode {
    pub fn comparator(&self) -> Comparator {
        match self {
            Mode::Max => discard_smaller,
            Mode::Min => discard_larger,
        }
    }

    /// `"max"` or `"min"`, case-sensitive
    pub fn parse(mode: &str) -> Result<Mode, ConfigError> {
        Mode::from_str(mode).map_err(|_| ConfigError::InvalidMode(mode.to_string()))
    }
}

/// Strict-inequality predicate for `mode`; an unknown mode fails before anything is evaluated.
pub fn select(mode: &str) -> Result<Comparator, ConfigError> {
    Ok(Mode::parse(mode)?.comparator())
}
