use super::solver::SearchMethod;
use super::trace::{TraceTable, fmt8};
use std::fmt;

/// Final state of a finished search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub method: SearchMethod,
    pub optimal_x: f64,
    pub optimal_f: f64,
    /// number of trace rows
    pub iterations: usize,
    /// probe evaluations, the final evaluation at `optimal_x` excluded
    pub evaluations: usize,
    /// bracket `[a, b]` at termination
    pub final_bracket: (f64, f64),
}

impl SearchResult {
    pub fn width(&self) -> f64 {
        self.final_bracket.1 - self.final_bracket.0
    }

    /// three lines: optimal argument, optimal value, iteration count
    pub fn summary(&self) -> String {
        format!(
            "Optimal argument value: {}\nOptimal function value: {}\nIterations: {}",
            fmt8(self.optimal_x),
            fmt8(self.optimal_f),
            self.iterations
        )
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Trace of a search together with its result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub table: TraceTable,
    pub result: SearchResult,
}

impl SearchOutcome {
    pub fn summary(&self) -> String {
        self.result.summary()
    }

    pub fn printable(&self) -> String {
        get_printable_table(&self.table, &self.summary())
    }

    /// `(trace table, summary text)`
    pub fn into_parts(self) -> (TraceTable, String) {
        let summary = self.result.summary();
        (self.table, summary)
    }
}

/// rendered table, newline, summary
pub fn get_printable_table(table: &TraceTable, summary: &str) -> String {
    format!("{}\n{}", table.render(), summary)
}
