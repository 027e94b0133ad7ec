//! Parsed formula: assignment preamble plus the objective expression of one variable.
use crate::symbolic::environment::Environment;
use crate::symbolic::errors::{EvalError, FormulaError, ParseError};
use crate::symbolic::evaluate::evaluate_stack;
use crate::symbolic::parse_expr::{Statement, parse_statements};
use crate::symbolic::postfix::Postfix;
use std::fmt;

/// Formula parsed once and evaluated many times.
///
/// `a = 2; b = a + 1; a*x^2 + b` has a preamble of two assignments, evaluated once when a
/// search builds its environment, and an objective `a*x^2 + b`. The objective may itself be an
/// assignment (`f = x^2`); its target is then rebound to every value the objective takes.
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    source: String,
    preamble: Vec<Statement>,
    objective: Statement,
}

impl Formula {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut statements = parse_statements(text)?;
        // parse_statements never returns an empty list
        let objective = match statements.pop() {
            Some(statement) => statement,
            None => return Err(ParseError::new(text, text, "empty formula")),
        };
        if let Some(bare) = statements.iter().find(|s| s.target.is_none()) {
            return Err(ParseError::new(
                text,
                &text[bare.position..],
                "only the last statement may be a bare expression",
            ));
        }
        Ok(Self {
            source: text.to_string(),
            preamble: statements,
            objective,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn objective(&self) -> &Postfix {
        &self.objective.postfix
    }

    /// name the objective value is assigned to, if the objective is an assignment
    pub fn target(&self) -> Option<&str> {
        self.objective.target.as_deref()
    }

    /// Fresh environment holding the values of the preamble assignments.
    pub fn seed_environment(&self) -> Result<Environment, EvalError> {
        let mut env = Environment::new();
        for statement in &self.preamble {
            let value = evaluate_stack(&statement.postfix, &env)?;
            if let Some(name) = &statement.target {
                env.bind(name, value);
            }
        }
        Ok(env)
    }

    /// bind `variable = x`, evaluate the objective and store it under the target name, if any
    pub fn evaluate_at(&self, env: &mut Environment, variable: &str, x: f64) -> Result<f64, EvalError> {
        env.bind(variable, x);
        let value = evaluate_stack(&self.objective.postfix, env)?;
        if let Some(name) = &self.objective.target {
            env.bind(name, value);
        }
        Ok(value)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Evaluate a formula that needs no free variable, e.g. `"PI"` or `"a = 2; a^10"`.
pub fn evaluate_str(text: &str) -> Result<f64, FormulaError> {
    let formula = Formula::parse(text)?;
    let env = formula.seed_environment()?;
    Ok(evaluate_stack(formula.objective(), &env)?)
}
