//! Golden-section search. The bracket is split in the golden ratio so that one probe of the
//! previous step is reused and each step costs a single new evaluation.
use log::info;

use super::config::{SearchConfig, check_progress};
use super::errors::SearchError;
use super::objective::{Counted, ObjectiveFunction};
use super::report::{SearchOutcome, SearchResult};
use super::solver::SearchMethod;
use super::trace::{TraceRow, TraceTable};

/// golden ratio complement `(sqrt(5) - 1)/2`
pub const GOLDEN_RATIO: f64 = 0.618033988749895;

pub fn search<F>(function: &mut F, config: &SearchConfig) -> Result<SearchOutcome, SearchError>
where
    F: ObjectiveFunction + ?Sized,
{
    config.validate()?;
    let compare = config.mode.comparator();
    let (mut a, mut b) = (config.a, config.b);
    let mut f = Counted::new(function);
    info!(
        "golden section search for {} of '{}' on [{}, {}], L = {}",
        config.mode,
        f.name(),
        a,
        b,
        config.length
    );

    let mut table = TraceTable::new();
    let mut step = 1;
    let mut lambda = a + (1.0 - GOLDEN_RATIO) * (b - a);
    let mut mu = a + GOLDEN_RATIO * (b - a);
    let mut f_lambda = f.eval(lambda)?;
    let mut f_mu = f.eval(mu)?;
    table.push(TraceRow {
        step,
        a,
        b,
        lambda,
        mu,
        f_lambda,
        f_mu,
    });

    while b - a > config.length {
        step += 1;
        let before = (a, b);
        if compare(f_lambda, f_mu) {
            a = lambda;
            lambda = mu;
            f_lambda = f_mu;
            mu = a + GOLDEN_RATIO * (b - a);
            f_mu = f.eval(mu)?;
        } else {
            b = mu;
            mu = lambda;
            f_mu = f_lambda;
            lambda = a + (1.0 - GOLDEN_RATIO) * (b - a);
            f_lambda = f.eval(lambda)?;
        }
        check_progress(before, (a, b), step)?;
        let row = TraceRow {
            step,
            a,
            b,
            lambda,
            mu,
            f_lambda,
            f_mu,
        };
        table.push(row);
    }

    // midpoint of the probes, not of the bracket
    let optimal_x = (lambda + mu) / 2.0;
    let evaluations = f.calls;
    let optimal_f = f.eval(optimal_x)?;
    info!(
        "golden section search finished after {} iterations: x = {}, f = {}",
        table.len(),
        optimal_x,
        optimal_f
    );
    Ok(SearchOutcome {
        result: SearchResult {
            method: SearchMethod::GoldenSection,
            optimal_x,
            optimal_f,
            iterations: table.len(),
            evaluations,
            final_bracket: (a, b),
        },
        table,
    })
}
