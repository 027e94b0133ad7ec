use log::info;
use rayon::prelude::*;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

use super::config::{SearchConfig, SearchTask};
use super::errors::{ConfigError, SearchError};
use super::objective::{ObjectiveFunction, SymbolicObjective};
use super::report::SearchOutcome;
use super::trace::TraceTable;
use super::{dichotomous, fibonacci, golden_section};

/// Available bracketing methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum SearchMethod {
    #[strum(serialize = "dichotomous")]
    Dichotomous,
    #[strum(to_string = "golden_section", serialize = "golden")]
    GoldenSection,
    #[strum(serialize = "fibonacci")]
    Fibonacci,
}

impl SearchMethod {
    pub fn parse(method: &str) -> Result<SearchMethod, ConfigError> {
        SearchMethod::from_str(method).map_err(|_| ConfigError::InvalidMethod(method.to_string()))
    }
}

/// Main structure for bracketing extremum searches
#[derive(Debug, Clone, Default)]
pub struct BracketSearch {
    config: SearchConfig,
}

impl BracketSearch {
    /// Create a new BracketSearch with default configuration
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    /// Create a new BracketSearch with custom configuration
    pub fn with_config(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_bounds(&mut self, a: f64, b: f64) {
        self.config.a = a;
        self.config.b = b;
    }

    /// `"max"` or `"min"`
    pub fn set_mode(&mut self, mode: &str) -> Result<(), ConfigError> {
        self.config.mode = super::compare::Mode::parse(mode)?;
        Ok(())
    }

    pub fn set_eps(&mut self, eps: f64) {
        self.config.eps = eps;
    }

    pub fn set_length(&mut self, length: f64) {
        self.config.length = length;
    }

    pub fn set_variable(&mut self, variable: &str) {
        self.config.variable = variable.to_string();
    }
    /////////////////////////////IMPLEMENTING SYMBOLIC FUNCTIONS///////////////////////////////////////////
    /// Parse `formula` and search it. The numeric setup is checked before the formula is parsed.
    pub fn solve_symbolic_str(
        &self,
        method: SearchMethod,
        formula: &str,
    ) -> Result<SearchOutcome, SearchError> {
        self.config.validate()?;
        let mut objective = SymbolicObjective::from_string(formula, &self.config.variable)?;
        self.solve_with_method(method, &mut objective)
    }

    /// Solve with specific method
    pub fn solve_with_method<F>(
        &self,
        method: SearchMethod,
        function: &mut F,
    ) -> Result<SearchOutcome, SearchError>
    where
        F: ObjectiveFunction + ?Sized,
    {
        match method {
            SearchMethod::Dichotomous => dichotomous::search(function, &self.config),
            SearchMethod::GoldenSection => golden_section::search(function, &self.config),
            SearchMethod::Fibonacci => fibonacci::search(function, &self.config),
        }
    }
}

fn search_str(
    method: SearchMethod,
    function: &str,
    a: f64,
    b: f64,
    mode: &str,
    eps: f64,
    length: f64,
) -> Result<(TraceTable, String), SearchError> {
    let config = SearchConfig::new(a, b, mode, eps, length)?;
    let outcome = BracketSearch::with_config(config).solve_symbolic_str(method, function)?;
    Ok(outcome.into_parts())
}

/// Convenience function for dichotomous search
pub fn dichotomous_search(
    function: &str,
    a: f64,
    b: f64,
    mode: &str,
    eps: f64,
    length: f64,
) -> Result<(TraceTable, String), SearchError> {
    search_str(SearchMethod::Dichotomous, function, a, b, mode, eps, length)
}

/// Convenience function for golden-section search
pub fn golden_section_search(
    function: &str,
    a: f64,
    b: f64,
    mode: &str,
    eps: f64,
    length: f64,
) -> Result<(TraceTable, String), SearchError> {
    search_str(SearchMethod::GoldenSection, function, a, b, mode, eps, length)
}

/// Convenience function for Fibonacci search
pub fn fibonacci_search(
    function: &str,
    a: f64,
    b: f64,
    mode: &str,
    eps: f64,
    length: f64,
) -> Result<(TraceTable, String), SearchError> {
    search_str(SearchMethod::Fibonacci, function, a, b, mode, eps, length)
}

/// Run one task with its own parsed formula and environment
pub fn solve_task(task: &SearchTask) -> Result<SearchOutcome, SearchError> {
    info!("task '{}': {} search of '{}'", task.name, task.method, task.function);
    BracketSearch::with_config(task.config.clone()).solve_symbolic_str(task.method, &task.function)
}

pub fn solve_tasks(tasks: &[SearchTask]) -> Vec<Result<SearchOutcome, SearchError>> {
    tasks.iter().map(solve_task).collect()
}

/// Tasks share no state, so the results are the same as those of `solve_tasks`, in task order.
pub fn solve_tasks_parallel(tasks: &[SearchTask]) -> Vec<Result<SearchOutcome, SearchError>> {
    tasks.par_iter().map(solve_task).collect()
}
