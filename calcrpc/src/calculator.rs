//! The calculator operations.
//!
//! Operands and results are `i64`. Arithmetic is checked: a result outside
//! the `i64` range fails with [`ArithmeticError::Overflow`] instead of
//! wrapping.

use calcrpc_core::{BinaryOperationReply, BinaryOperationRequest};

/// Arithmetic failure of a calculator operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    #[error("integer overflow in {operation}({operand_a}, {operand_b})")]
    Overflow {
        operation: &'static str,
        operand_a: i64,
        operand_b: i64,
    },
}

/// Stateless calculator service.
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator;

impl Calculator {
    pub fn new() -> Self {
        Self
    }

    /// `result = operand_a + operand_b`
    pub fn add(
        &self,
        request: BinaryOperationRequest,
    ) -> Result<BinaryOperationReply, ArithmeticError> {
        let BinaryOperationRequest {
            operand_a,
            operand_b,
        } = request;
        operand_a
            .checked_add(operand_b)
            .map(BinaryOperationReply::new)
            .ok_or(ArithmeticError::Overflow {
                operation: "add",
                operand_a,
                operand_b,
            })
    }

    /// `result = operand_a - operand_b`
    pub fn subtract(
        &self,
        request: BinaryOperationRequest,
    ) -> Result<BinaryOperationReply, ArithmeticError> {
        let BinaryOperationRequest {
            operand_a,
            operand_b,
        } = request;
        operand_a
            .checked_sub(operand_b)
            .map(BinaryOperationReply::new)
            .ok_or(ArithmeticError::Overflow {
                operation: "subtract",
                operand_a,
                operand_b,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(a: i64, b: i64) -> BinaryOperationRequest {
        BinaryOperationRequest::new(a, b)
    }

    #[test]
    fn test_add() {
        let calc = Calculator::new();
        assert_eq!(calc.add(req(2, 3)).unwrap().result, 5);
        assert_eq!(calc.add(req(-2, 3)).unwrap().result, 1);
        assert_eq!(calc.add(req(0, 0)).unwrap().result, 0);
    }

    #[test]
    fn test_subtract() {
        let calc = Calculator::new();
        assert_eq!(calc.subtract(req(10, 4)).unwrap().result, 6);
        assert_eq!(calc.subtract(req(4, 10)).unwrap().result, -6);
    }

    #[test]
    fn test_add_overflow() {
        let err = Calculator.add(req(i64::MAX, 1)).unwrap_err();
        assert_eq!(
            err,
            ArithmeticError::Overflow {
                operation: "add",
                operand_a: i64::MAX,
                operand_b: 1,
            }
        );
        assert!(err.to_string().contains("add"));
    }

    #[test]
    fn test_subtract_overflow() {
        assert!(Calculator.subtract(req(i64::MIN, 1)).is_err());
        assert_eq!(
            Calculator.subtract(req(i64::MIN, -1)).unwrap().result,
            i64::MIN + 1
        );
    }
}
