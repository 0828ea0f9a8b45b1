//! Arithmetic calculator tool.
//!
//! Evaluates an expression with a small recursive-descent parser instead
//! of handing the string to any general evaluator. Input is rejected up
//! front unless it consists entirely of digits, `+ - * / ( ) .` and
//! whitespace.

use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Value};
use std::sync::OnceLock;

use super::{require_str, Tool, ToolError};

fn allowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\d\+\-\*/\(\)\.\s]*$").unwrap())
}

/// Evaluate a mathematical expression safely.
pub struct Calculator;

#[async_trait]
impl Tool for Calculator {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Evaluate a mathematical expression. Supports +, -, *, /, parentheses and decimal numbers. Parameters: {\"expression\": \"2 + 2\"}"
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let expression = require_str(&args, "expression")?;

        if !allowed_chars().is_match(expression) {
            return Err(ToolError::msg("Invalid characters in expression"));
        }

        let result = evaluate(expression)?;
        Ok(json!(format_number(result)))
    }
}

/// Render whole numbers without a decimal point.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn evaluate(input: &str) -> Result<f64, ToolError> {
    let mut parser = Parser {
        chars: input.chars().filter(|c| !c.is_whitespace()).collect(),
        pos: 0,
    };
    let value = parser.expression()?;
    if parser.pos != parser.chars.len() {
        return Err(ToolError::msg(format!(
            "Unexpected character '{}' in expression",
            parser.chars[parser.pos]
        )));
    }
    Ok(value)
}

/// Grammar: expression := term (('+'|'-') term)*
///          term       := factor (('*'|'/') factor)*
///          factor     := '-' factor | '(' expression ')' | number
struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn expression(&mut self) -> Result<f64, ToolError> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                '+' => {
                    self.pos += 1;
                    value += self.term()?;
                }
                '-' => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, ToolError> {
        let mut value = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                '*' => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                '/' => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(ToolError::msg("Division by zero"));
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, ToolError> {
        match self.peek() {
            Some('-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some('(') => {
                self.pos += 1;
                let value = self.expression()?;
                if self.peek() != Some(')') {
                    return Err(ToolError::msg("Unbalanced parentheses"));
                }
                self.pos += 1;
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) => Err(ToolError::msg(format!(
                "Unexpected character '{}' in expression",
                c
            ))),
            None => Err(ToolError::msg("Unexpected end of expression")),
        }
    }

    fn number(&mut self) -> Result<f64, ToolError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                self.pos += 1;
            } else {
                break;
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse()
            .map_err(|_| ToolError::msg(format!("Invalid number '{}'", text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn calc(expression: &str) -> Result<Value, ToolError> {
        Calculator
            .execute(json!({ "expression": expression }))
            .await
    }

    #[tokio::test]
    async fn adds_two_numbers() {
        assert_eq!(calc("2 + 2").await.unwrap(), json!("4"));
    }

    #[tokio::test]
    async fn respects_precedence_and_parens() {
        assert_eq!(calc("2 + 3 * 4").await.unwrap(), json!("14"));
        assert_eq!(calc("(2 + 3) * 4").await.unwrap(), json!("20"));
    }

    #[tokio::test]
    async fn handles_unary_minus_and_decimals() {
        assert_eq!(calc("-3 + 1").await.unwrap(), json!("-2"));
        assert_eq!(calc("1.5 * 2").await.unwrap(), json!("3"));
        assert_eq!(calc("7 / 2").await.unwrap(), json!("3.5"));
    }

    #[tokio::test]
    async fn rejects_disallowed_characters() {
        let err = calc("2 + x").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid characters in expression");

        let err = calc("__import__('os')").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid characters in expression");
    }

    #[tokio::test]
    async fn rejects_division_by_zero() {
        let err = calc("1 / 0").await.unwrap_err();
        assert_eq!(err.to_string(), "Division by zero");
    }

    #[tokio::test]
    async fn rejects_malformed_syntax() {
        assert!(calc("2 +").await.is_err());
        assert!(calc("(1 + 2").await.is_err());
        assert!(calc("1..2").await.is_err());
    }
}
