//! Step-by-step trace of bracket shrinkage.
use crate::Utils::table::render;
use log::debug;

/// column titles of every trace table
pub const HEADERS: [&str; 7] = ["K", "a[k]", "b[k]", "λ[k]", "μ[k]", "F(λ[k])", "F(μ[k])"];
/// significant digits of every number printed in a table or summary
pub const SIGNIFICANT_DIGITS: usize = 8;

/// Format `value` like C's `%.<precision>g`: `precision` significant digits, trailing zeros
/// removed, exponent notation when the decimal exponent is below -4 or not below `precision`.
pub fn format_g(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    let precision = precision.max(1);
    // the exponent must be taken after rounding to `precision` digits: 9.9999999999 -> 10
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exponent.abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value))
    }
}

fn strip_trailing_zeros(number: &str) -> String {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        number.to_string()
    }
}

/// `%.8g`
pub fn fmt8(value: f64) -> String {
    format_g(value, SIGNIFICANT_DIGITS)
}

/// One iteration: step number, bracket `[a, b]`, probes `λ`, `μ` and the function at the probes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRow {
    pub step: usize,
    pub a: f64,
    pub b: f64,
    pub lambda: f64,
    pub mu: f64,
    pub f_lambda: f64,
    pub f_mu: f64,
}

impl TraceRow {
    pub fn width(&self) -> f64 {
        self.b - self.a
    }

    pub fn to_strings(&self) -> Vec<String> {
        vec![
            fmt8(self.step as f64),
            fmt8(self.a),
            fmt8(self.b),
            fmt8(self.lambda),
            fmt8(self.mu),
            fmt8(self.f_lambda),
            fmt8(self.f_mu),
        ]
    }
}

/// Append-only list of trace rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceTable {
    rows: Vec<TraceRow>,
}

impl TraceTable {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// append `row`; every row is logged at debug level as it is recorded
    pub fn push(&mut self, row: TraceRow) {
        debug!("{:?}", row);
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[TraceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&TraceRow> {
        self.rows.last()
    }

    /// header row followed by the formatted rows
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        grid.push(HEADERS.iter().map(|h| h.to_string()).collect());
        grid.extend(self.rows.iter().map(TraceRow::to_strings));
        grid
    }

    pub fn render(&self) -> String {
        render(&self.to_grid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_g_fixed_notation() {
        assert_eq!(fmt8(1.0), "1");
        assert_eq!(fmt8(12.0), "12");
        assert_eq!(fmt8(0.5), "0.5");
        assert_eq!(fmt8(-2.25), "-2.25");
        assert_eq!(fmt8(3.141592653589793), "3.1415927");
        assert_eq!(fmt8(0.0001), "0.0001");
        assert_eq!(fmt8(12345678.0), "12345678");
        assert_eq!(fmt8(0.0), "0");
    }

    #[test]
    fn test_format_g_exponent_notation() {
        assert_eq!(fmt8(1e-5), "1e-05");
        assert_eq!(fmt8(123456789.0), "1.2345679e+08");
        assert_eq!(fmt8(-2.5e-7), "-2.5e-07");
        assert_eq!(fmt8(1e100), "1e+100");
        assert_eq!(fmt8(0.00001234), "1.234e-05");
    }

    #[test]
    fn test_format_g_rounding_moves_exponent() {
        assert_eq!(fmt8(9.9999999999), "10");
        assert_eq!(fmt8(99999999.9), "1e+08");
    }

    #[test]
    fn test_format_g_special_values() {
        assert_eq!(fmt8(f64::NAN), "nan");
        assert_eq!(fmt8(f64::INFINITY), "inf");
        assert_eq!(fmt8(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_g(2.0 / 3.0, 3), "0.667");
    }

    #[test]
    fn test_grid_has_header_and_rows() {
        let mut table = TraceTable::new();
        table.push(TraceRow {
            step: 1,
            a: 0.0,
            b: 1.0,
            lambda: 0.49999,
            mu: 0.50001,
            f_lambda: 0.2499900001,
            f_mu: 0.2500100001,
        });
        let grid = table.to_grid();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0][3], "λ[k]");
        assert_eq!(
            grid[1],
            vec!["1", "0", "1", "0.49999", "0.50001", "0.24999", "0.25001"]
        );
        assert_eq!(table.last().unwrap().width(), 1.0);
    }
}
