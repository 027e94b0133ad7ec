// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::numerical::optimization::bracket_search::config::SearchConfig;
use crate::numerical::optimization::bracket_search::errors::SearchError;
use crate::numerical::optimization::bracket_search::objective::ClosureFunction;
use crate::numerical::optimization::bracket_search::report::SearchOutcome;
use crate::numerical::optimization::bracket_search::solver::{
    BracketSearch, SearchMethod, dichotomous_search, fibonacci_search, golden_section_search,
};

/// number of built-in examples
pub const N_EXAMPLES: usize = 6;

/// Run one of the built-in searches and print its table
pub fn search_examples(example: usize) -> Result<SearchOutcome, SearchError> {
    let outcome = match example {
        0 => {
            // minimum of a parabola, dichotomous probes 1e-5 apart from the midpoint
            let config = SearchConfig::new(0.0, 1.0, "min", 1e-5, 1e-3)?;
            BracketSearch::with_config(config).solve_symbolic_str(SearchMethod::Dichotomous, "x^2")?
        }
        1 => {
            // maximum of a shifted parabola, unary minus applies to the whole power
            let config = SearchConfig::new(0.0, 10.0, "max", 1e-5, 1e-3)?;
            BracketSearch::with_config(config)
                .solve_symbolic_str(SearchMethod::GoldenSection, "-(x-3)^2")?
        }
        2 => {
            // Fibonacci search: the step count is known before the first evaluation
            let config = SearchConfig::new(0.0, 2.0, "max", 1e-6, 1e-4)?;
            BracketSearch::with_config(config)
                .solve_symbolic_str(SearchMethod::Fibonacci, "x*exp(-x)")?
        }
        3 => {
            // assignments are evaluated once; the last statement is the objective
            let config = SearchConfig::new(-1.0, 4.0, "min", 1e-6, 1e-4)?.with_variable("t");
            BracketSearch::with_config(config).solve_symbolic_str(
                SearchMethod::GoldenSection,
                "w = 2*PI/4; c = cos(w*0); f = c*(t - w)^2 + 1",
            )?
        }
        4 => {
            // any Rust closure is an objective as well
            let mut func = ClosureFunction::new(|x: f64| (x - 1.0).abs() + 0.5 * x, "|x - 1| + x/2");
            let config = SearchConfig::new(-2.0, 3.0, "min", 1e-6, 1e-4)?;
            BracketSearch::with_config(config).solve_with_method(SearchMethod::Fibonacci, &mut func)?
        }
        5 => {
            // the same problem with each method: compare iterations
            for search in [dichotomous_search, golden_section_search, fibonacci_search] {
                let (table, summary) = search("sin(x)", 0.0, 3.0, "max", 1e-5, 1e-3)?;
                println!("{} rows\n{}\n", table.len(), summary);
            }
            let config = SearchConfig::new(0.0, 3.0, "max", 1e-5, 1e-3)?;
            BracketSearch::with_config(config).solve_symbolic_str(SearchMethod::Fibonacci, "sin(x)")?
        }
        _ => {
            println!("example {} does not exist", example);
            let config = SearchConfig::default();
            BracketSearch::with_config(config).solve_symbolic_str(SearchMethod::Dichotomous, "x^2")?
        }
    };
    println!("{}", outcome.printable());
    Ok(outcome)
}
