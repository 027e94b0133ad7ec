/// dichotomous, golden-section and Fibonacci searches for the extremum of a function of one variable
/// on a bracket; functions are symbolic formulas or closures
pub mod bracket_search;
