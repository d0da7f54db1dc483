//! Four-function arithmetic.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Arithmetic operator, spelled the way clients send it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl Operator {
    /// Wire spelling of every operator, in declaration order.
    pub const ALL: [&'static str; 4] = ["+", "-", "*", "/"];

    /// Symbol used in the rendered equation.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> DomainResult<f64> {
        match self {
            Operator::Add => Ok(lhs + rhs),
            Operator::Subtract => Ok(lhs - rhs),
            Operator::Multiply => Ok(lhs * rhs),
            Operator::Divide if rhs == 0.0 => Err(DomainError::DivisionByZero),
            Operator::Divide => Ok(lhs / rhs),
        }
    }
}

/// A computed equation, ready to render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculation {
    pub lhs: f64,
    pub rhs: f64,
    pub operator: Operator,
    pub result: f64,
}

impl Calculation {
    /// Evaluate `lhs operator rhs`. Division by zero is a domain error.
    pub fn evaluate(lhs: f64, rhs: f64, operator: Operator) -> DomainResult<Self> {
        let result = operator.apply(lhs, rhs)?;
        Ok(Self {
            lhs,
            rhs,
            operator,
            result,
        })
    }
}

impl std::fmt::Display for Calculation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            unsigned_zero(self.lhs),
            self.operator.symbol(),
            unsigned_zero(self.rhs),
            unsigned_zero(self.result)
        )
    }
}

/// `-0` renders as `0`.
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_whole_numbers_without_fraction() {
        let calc = Calculation::evaluate(2.0, 3.0, Operator::Add).unwrap();
        assert_eq!(calc.to_string(), "2 + 3 = 5");
    }

    #[test]
    fn uses_display_symbols() {
        let mul = Calculation::evaluate(4.0, 2.5, Operator::Multiply).unwrap();
        assert_eq!(mul.to_string(), "4 × 2.5 = 10");

        let div = Calculation::evaluate(7.0, 2.0, Operator::Divide).unwrap();
        assert_eq!(div.to_string(), "7 ÷ 2 = 3.5");

        let sub = Calculation::evaluate(1.0, 3.0, Operator::Subtract).unwrap();
        assert_eq!(sub.to_string(), "1 - 3 = -2");
    }

    #[test]
    fn negative_zero_renders_as_zero() {
        let calc = Calculation::evaluate(0.0, -5.0, Operator::Multiply).unwrap();
        assert_eq!(calc.to_string(), "0 × -5 = 0");

        let calc = Calculation::evaluate(-0.0, 0.0, Operator::Add).unwrap();
        assert_eq!(calc.to_string(), "0 + 0 = 0");
    }

    #[test]
    fn division_by_zero_is_domain_error() {
        let err = Calculation::evaluate(5.0, 0.0, Operator::Divide).unwrap_err();
        assert!(matches!(err, DomainError::DivisionByZero));
        assert_eq!(err.render(), "오류: 0으로 나눌 수 없습니다.");
    }

    #[test]
    fn operator_wire_names() {
        let op: Operator = serde_json::from_str("\"*\"").unwrap();
        assert_eq!(op, Operator::Multiply);
        assert!(serde_json::from_str::<Operator>("\"%\"").is_err());
    }
}
