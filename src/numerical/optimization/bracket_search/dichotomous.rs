//! Dichotomous search: two probes `eps` apart around the midpoint, half the bracket dropped per step.
use log::info;

use super::config::{SearchConfig, check_progress};
use super::errors::SearchError;
use super::objective::{Counted, ObjectiveFunction};
use super::report::{SearchOutcome, SearchResult};
use super::solver::SearchMethod;
use super::trace::{TraceRow, TraceTable};

pub fn search<F>(function: &mut F, config: &SearchConfig) -> Result<SearchOutcome, SearchError>
where
    F: ObjectiveFunction + ?Sized,
{
    config.validate()?;
    let compare = config.mode.comparator();
    let eps = config.eps;
    let (mut a, mut b) = (config.a, config.b);
    let mut f = Counted::new(function);
    info!(
        "dichotomous search for {} of '{}' on [{}, {}], eps = {}, L = {}",
        config.mode,
        f.name(),
        a,
        b,
        eps,
        config.length
    );

    let mut table = TraceTable::new();
    let mut step = 1;
    while b - a > config.length {
        let middle = (a + b) / 2.0;
        let (lambda, mu) = (middle - eps, middle + eps);
        let f_lambda = f.eval(lambda)?;
        let f_mu = f.eval(mu)?;
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
        let before = (a, b);
        if compare(f_lambda, f_mu) {
            a = lambda;
        } else {
            b = mu;
        }
        check_progress(before, (a, b), step)?;
        step += 1;
    }

    let optimal_x = (a + b) / 2.0;
    let evaluations = f.calls;
    let optimal_f = f.eval(optimal_x)?;
    info!(
        "dichotomous search finished after {} iterations: x = {}, f = {}",
        table.len(),
        optimal_x,
        optimal_f
    );
    Ok(SearchOutcome {
        result: SearchResult {
            method: SearchMethod::Dichotomous,
            optimal_x,
            optimal_f,
            iterations: table.len(),
            evaluations,
            final_bracket: (a, b),
        },
        table,
    })
}
