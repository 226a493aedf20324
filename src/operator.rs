use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, YatError};

/// Binary operators. Comparisons and logic produce plain integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    #[serde(rename = "+")]
    Add,

    #[serde(rename = "-")]
    Sub,

    #[serde(rename = "*")]
    Mul,

    /// Floor division.
    #[serde(rename = "/")]
    Div,

    /// Floor modulo; the result takes the divisor's sign.
    #[serde(rename = "%")]
    Mod,

    #[serde(rename = "==")]
    Eq,

    #[serde(rename = "!=")]
    Ne,

    #[serde(rename = "<")]
    Lt,

    #[serde(rename = ">")]
    Gt,

    #[serde(rename = "<=")]
    Le,

    #[serde(rename = ">=")]
    Ge,

    /// `right` if `left` is truthy, else `left`.
    #[serde(rename = "&&")]
    And,

    /// `left` if `left` is truthy, else `right`.
    #[serde(rename = "||")]
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    #[serde(rename = "-")]
    Neg,

    #[serde(rename = "!")]
    Not,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 13] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Eq,
        BinaryOp::Ne,
        BinaryOp::Lt,
        BinaryOp::Gt,
        BinaryOp::Le,
        BinaryOp::Ge,
        BinaryOp::And,
        BinaryOp::Or,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// Applies the operator to two already evaluated operands.
    pub fn apply(self, left: i64, right: i64) -> Result<i64> {
        debug!("Applying {} to {} and {}", self.symbol(), left, right);

        let overflow = || YatError::arithmetic(self.symbol(), "integer overflow");

        let result = match self {
            BinaryOp::Add => left.checked_add(right).ok_or_else(overflow)?,
            BinaryOp::Sub => left.checked_sub(right).ok_or_else(overflow)?,
            BinaryOp::Mul => left.checked_mul(right).ok_or_else(overflow)?,
            BinaryOp::Div => {
                if right == 0 {
                    return Err(YatError::arithmetic("/", "division by zero"));
                }
                floor_div(left, right).ok_or_else(overflow)?
            }
            BinaryOp::Mod => {
                if right == 0 {
                    return Err(YatError::arithmetic("%", "modulo by zero"));
                }
                floor_mod(left, right)
            }
            BinaryOp::Eq => (left == right) as i64,
            BinaryOp::Ne => (left != right) as i64,
            BinaryOp::Lt => (left < right) as i64,
            BinaryOp::Gt => (left > right) as i64,
            BinaryOp::Le => (left <= right) as i64,
            BinaryOp::Ge => (left >= right) as i64,
            BinaryOp::And => {
                if left != 0 {
                    right
                } else {
                    left
                }
            }
            BinaryOp::Or => {
                if left != 0 {
                    left
                } else {
                    right
                }
            }
        };

        Ok(result)
    }
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }

    pub fn apply(self, operand: i64) -> Result<i64> {
        match self {
            UnaryOp::Neg => operand
                .checked_neg()
                .ok_or_else(|| YatError::arithmetic("-", "integer overflow")),
            UnaryOp::Not => Ok((operand == 0) as i64),
        }
    }
}

// Rounds toward negative infinity. `None` only for `i64::MIN / -1`.
fn floor_div(left: i64, right: i64) -> Option<i64> {
    let quotient = left.checked_div(right)?;

    if left % right != 0 && ((left < 0) != (right < 0)) {
        Some(quotient - 1)
    } else {
        Some(quotient)
    }
}

fn floor_mod(left: i64, right: i64) -> i64 {
    // wrapping_rem: i64::MIN % -1 is 0 mathematically
    let rem = left.wrapping_rem(right);

    if rem != 0 && ((rem < 0) != (right < 0)) {
        rem + right
    } else {
        rem
    }
}

impl FromStr for BinaryOp {
    type Err = YatError;

    fn from_str(s: &str) -> Result<Self> {
        BinaryOp::ALL
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| YatError::UnknownOperator(s.to_string()))
    }
}

impl FromStr for UnaryOp {
    type Err = YatError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "-" => Ok(UnaryOp::Neg),
            "!" => Ok(UnaryOp::Not),
            _ => Err(YatError::UnknownOperator(s.to_string())),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
