
/// comparator selection for max/min searches
pub mod compare;
/// search settings and their preconditions
pub mod config;
/// dichotomous search: two probes around the midpoint
pub mod dichotomous;
pub mod errors;
/// Fibonacci search with a step count fixed before the first evaluation
pub mod fibonacci;
/// golden-section search: one new evaluation per step
///# Example
/// ```
/// use RustedExtremum::numerical::optimization::bracket_search::solver::golden_section_search;
/// let (table, summary) = golden_section_search("-(x-3)^2", 0.0, 10.0, "max", 1e-5, 1e-3).unwrap();
/// println!("{}", table.render());
/// println!("{}", summary);
/// ```
pub mod golden_section;
/// functions of one variable: closures and parsed formulas
pub mod objective;
pub mod report;
/// BracketSearch facade, per-method convenience functions, batch runs
pub mod solver;
/// trace rows, `%g` formatting
pub mod trace;

pub use compare::Mode;
pub use config::{SearchConfig, SearchTask};
pub use errors::{ConfigError, SearchError};
pub use objective::{ClosureFunction, ObjectiveFunction, SymbolicObjective};
pub use report::{SearchOutcome, SearchResult, get_printable_table};
pub use solver::{
    BracketSearch, SearchMethod, dichotomous_search, fibonacci_search, golden_section_search,
    solve_tasks, solve_tasks_parallel,
};
pub use trace::{TraceRow, TraceTable};
