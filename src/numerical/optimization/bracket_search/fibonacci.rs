//! Fibonacci search. The number of steps `n` is fixed up front from `(B - A)/L`; probes sit at
//! Fibonacci-weighted positions so one of them is reused each step, and a final step with
//! probes `eps` apart collapses the bracket.
use log::info;

use super::config::SearchConfig;
use super::errors::{ConfigError, SearchError};
use super::objective::{Counted, ObjectiveFunction};
use super::report::{SearchOutcome, SearchResult};
use super::solver::SearchMethod;
use super::trace::{TraceRow, TraceTable};

/// number of Fibonacci numbers exactly representable in `f64`
pub const FIBONACCI_LEN: usize = 78;

const fn fibonacci_table() -> [f64; FIBONACCI_LEN] {
    let mut table = [1.0; FIBONACCI_LEN];
    let (mut prev, mut current) = (1u64, 1u64);
    let mut i = 2;
    while i < FIBONACCI_LEN {
        let next = prev + current;
        table[i] = next as f64;
        prev = current;
        current = next;
        i += 1;
    }
    table
}

/// `F[0] = F[1] = 1`, `F[k] = F[k-1] + F[k-2]`
pub const FIBONACCI: [f64; FIBONACCI_LEN] = fibonacci_table();

/// Smallest `n` with `F[n] >= ratio`, never below 2.
pub fn fibonacci_index(ratio: f64) -> Result<usize, ConfigError> {
    let max = FIBONACCI[FIBONACCI_LEN - 1];
    if !ratio.is_finite() || ratio > max {
        return Err(ConfigError::FibonacciTableExceeded { ratio, max });
    }
    let n = FIBONACCI
        .iter()
        .position(|&f| f >= ratio)
        .unwrap_or(FIBONACCI_LEN - 1);
    Ok(n.max(2))
}

pub fn search<F>(function: &mut F, config: &SearchConfig) -> Result<SearchOutcome, SearchError>
where
    F: ObjectiveFunction + ?Sized,
{
    config.validate()?;
    let compare = config.mode.comparator();
    let (mut a, mut b) = (config.a, config.b);
    let n = fibonacci_index((b - a) / config.length)?;
    let mut f = Counted::new(function);
    info!(
        "Fibonacci search for {} of '{}' on [{}, {}], eps = {}, L = {}, n = {}",
        config.mode,
        f.name(),
        a,
        b,
        config.eps,
        config.length,
        n
    );

    let mut table = TraceTable::new();
    let mut step = 1;
    let mut lambda = a + FIBONACCI[n - 2] * (b - a) / FIBONACCI[n];
    let mut mu = a + FIBONACCI[n - 1] * (b - a) / FIBONACCI[n];
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

    while step < n - 1 {
        step += 1;
        if compare(f_lambda, f_mu) {
            a = lambda;
            lambda = mu;
            f_lambda = f_mu;
            mu = a + FIBONACCI[n - step] * (b - a) / FIBONACCI[n - step + 1];
            f_mu = f.eval(mu)?;
        } else {
            b = mu;
            mu = lambda;
            f_mu = f_lambda;
            lambda = a + FIBONACCI[n - step - 1] * (b - a) / FIBONACCI[n - step + 1];
            f_lambda = f.eval(lambda)?;
        }
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

    // both probes have met in the middle; separate them by eps for the last comparison
    step += 1;
    mu = lambda + config.eps;
    f_mu = f.eval(mu)?;
    if compare(f_lambda, f_mu) {
        a = lambda;
    } else {
        b = mu;
    }
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

    let optimal_x = (a + b) / 2.0;
    let evaluations = f.calls;
    let optimal_f = f.eval(optimal_x)?;
    info!(
        "Fibonacci search finished after {} iterations: x = {}, f = {}",
        table.len(),
        optimal_x,
        optimal_f
    );
    Ok(SearchOutcome {
        result: SearchResult {
            method: SearchMethod::Fibonacci,
            optimal_x,
            optimal_f,
            iterations: table.len(),
            evaluations,
            final_bracket: (a, b),
        },
        table,
    })
}
