//! Calculator tool — evaluates arithmetic expressions.
//!
//! Supports `+`, `-`, `*`, `/`, parentheses, unary negation, and decimal
//! literals. Uses a recursive-descent parser: the only possible outcomes
//! are a number or a [`ToolError::InvalidExpression`].

use parley_core::error::ToolError;

/// Deepest parenthesis/negation nesting accepted before giving up.
const MAX_DEPTH: usize = 64;

/// Evaluate `expr` and format the result.
///
/// Integral results print without a fractional part, so `"2 + 2"` gives `"4"`.
pub fn calculate(expr: &str) -> Result<String, ToolError> {
    let value = evaluate(expr)?;
    let formatted = if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    };
    Ok(formatted)
}

/// Evaluate a mathematical expression string.
pub fn evaluate(expr: &str) -> Result<f64, ToolError> {
    let tokens = tokenize(expr)?;
    let mut parser = Parser::new(&tokens);
    let result = parser.parse_expr()?;
    if parser.pos < parser.tokens.len() {
        return Err(invalid(format!(
            "Unexpected token at position {}: {:?}",
            parser.pos, parser.tokens[parser.pos]
        )));
    }
    if !result.is_finite() {
        return Err(invalid("Result is not a finite number"));
    }
    Ok(result)
}

fn invalid(reason: impl Into<String>) -> ToolError {
    ToolError::InvalidExpression(reason.into())
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, ToolError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            c if c.is_whitespace() => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let num_str: String = chars[start..i].iter().collect();
                let num: f64 = num_str
                    .parse()
                    .map_err(|_| invalid(format!("Invalid number: {}", num_str)))?;
                tokens.push(Token::Number(num));
            }
            c => return Err(invalid(format!("Unexpected character: '{}'", c))),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0, depth: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn descend(&mut self) -> Result<(), ToolError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(invalid("Expression nested too deeply"));
        }
        Ok(())
    }

    // expr = term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<f64, ToolError> {
        let mut left = self.parse_term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.consume();
                    left += self.parse_term()?;
                }
                Token::Minus => {
                    self.consume();
                    left -= self.parse_term()?;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    // term = unary (('*' | '/') unary)*
    fn parse_term(&mut self) -> Result<f64, ToolError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.consume();
                    left *= self.parse_unary()?;
                }
                Token::Slash => {
                    self.consume();
                    let right = self.parse_unary()?;
                    if right == 0.0 {
                        return Err(invalid("Division by zero"));
                    }
                    left /= right;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    // unary = '-' unary | primary
    fn parse_unary(&mut self) -> Result<f64, ToolError> {
        if let Some(Token::Minus) = self.peek() {
            self.consume();
            self.descend()?;
            let val = self.parse_unary()?;
            self.depth -= 1;
            return Ok(-val);
        }
        self.parse_primary()
    }

    // primary = NUMBER | '(' expr ')'
    fn parse_primary(&mut self) -> Result<f64, ToolError> {
        match self.consume() {
            Some(Token::Number(n)) => Ok(*n),
            Some(Token::LParen) => {
                self.descend()?;
                let val = self.parse_expr()?;
                self.depth -= 1;
                match self.consume() {
                    Some(Token::RParen) => Ok(val),
                    _ => Err(invalid("Expected closing parenthesis")),
                }
            }
            Some(tok) => Err(invalid(format!("Unexpected token: {:?}", tok))),
            None => Err(invalid("Unexpected end of expression")),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_addition() {
        assert_eq!(evaluate("2 + 2").unwrap(), 4.0);
    }

    #[test]
    fn operator_precedence() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
    }

    #[test]
    fn parentheses() {
        assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
    }

    #[test]
    fn division() {
        assert_eq!(evaluate("10 / 4").unwrap(), 2.5);
    }

    #[test]
    fn division_by_zero() {
        assert!(evaluate("1 / 0").is_err());
    }

    #[test]
    fn unary_negation() {
        assert_eq!(evaluate("-5 + 3").unwrap(), -2.0);
        assert_eq!(evaluate("--4").unwrap(), 4.0);
    }

    #[test]
    fn complex_expression() {
        let result = evaluate("(10 + 5) / 3 - 2 * (1 + 1)").unwrap();
        assert!((result - 1.0).abs() < 1e-10);
    }

    #[test]
    fn words_are_rejected() {
        let err = evaluate("Calculate 2 + 2").unwrap_err();
        assert!(matches!(err, ToolError::InvalidExpression(_)));
    }

    #[test]
    fn code_is_never_evaluated() {
        assert!(evaluate("__import__('os').system('ls')").is_err());
        assert!(evaluate("2 ** 3").is_err());
    }

    #[test]
    fn malformed_expressions() {
        assert!(evaluate("2 +").is_err());
        assert!(evaluate("").is_err());
        assert!(evaluate("(1 + 2").is_err());
        assert!(evaluate("1 2").is_err());
        assert!(evaluate("1.2.3").is_err());
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let deep = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert!(evaluate(&deep).is_err());
        let shallow = format!("{}1{}", "(".repeat(10), ")".repeat(10));
        assert_eq!(evaluate(&shallow).unwrap(), 1.0);
    }

    #[test]
    fn formats_integers_without_fraction() {
        assert_eq!(calculate("2 + 2").unwrap(), "4");
        assert_eq!(calculate("10 / 2").unwrap(), "5");
    }

    #[test]
    fn formats_decimals() {
        assert_eq!(calculate("10 / 4").unwrap(), "2.5");
        assert!(calculate("10 / 3").unwrap().starts_with("3.333"));
    }
}
