//! examples of usage of RustedExtremum
/// bracketing extremum searches: dichotomous, golden-section, Fibonacci
pub mod search_examples;
