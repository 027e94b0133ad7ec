/// search for the extremum of a function of one variable on a bracket
///  Example#1
/// ```
///    // the shortest way: formula, bracket, mode, probe offset and final bracket length
///    use RustedExtremum::numerical::optimization::bracket_search::solver::dichotomous_search;
///    let (table, summary) = dichotomous_search("x^2", 0.0, 1.0, "min", 1e-5, 1e-3).unwrap();
///    println!("{}", table.render());
///    println!("{}", summary);
/// ```
/// Example#2
/// ```
///    // or more verbose way...
///    use RustedExtremum::numerical::optimization::bracket_search::config::SearchConfig;
///    use RustedExtremum::numerical::optimization::bracket_search::solver::{BracketSearch, SearchMethod};
///    let config = SearchConfig::new(0.0, 10.0, "max", 1e-5, 1e-3).unwrap().with_variable("t");
///    let solver = BracketSearch::with_config(config);
///    let outcome = solver.solve_symbolic_str(SearchMethod::Fibonacci, "-(t-3)^2").unwrap();
///    assert!((outcome.result.optimal_x - 3.0).abs() < 1e-3);
///    println!("{}", outcome.printable());
/// ```
pub mod optimization;
