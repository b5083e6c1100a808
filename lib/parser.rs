use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    ast::{BlockStatement, Expression, FunctionLiteral, Program, Statement},
    lexer::Lexer,
    token::{Token, TokenKind},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected next token to be {expected}, instead got {got}")]
    UnexpectedToken { expected: TokenKind, got: TokenKind },
    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(TokenKind),
    #[error("could not parse {0} as integer")]
    InvalidInteger(String),
}

type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, PartialOrd, PartialEq, Eq, Ord)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

impl Precedence {
    fn from_token(token: &Token) -> Self {
        match token {
            Token::Eq | Token::NotEq => Precedence::Equals,
            Token::Lt | Token::Gt => Precedence::LessGreater,
            Token::Plus | Token::Minus => Precedence::Sum,
            Token::Asterisk | Token::Slash => Precedence::Product,
            Token::Lparen => Precedence::Call,
            Token::Lbracket => Precedence::Index,
            _ => Precedence::Lowest,
        }
    }
}

/// Parses `input` into a program, returning every diagnostic raised on the
/// way. The program is partial when the list is non-empty.
pub fn parse(input: &str) -> (Program, Vec<String>) {
    let mut parser = Parser::new(Lexer::new(input));
    let program = parser.parse_program();
    (program, parser.error_messages())
}

pub struct Parser {
    lexer: Lexer,
    cur_token: Token,
    peek_token: Token,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        Self {
            cur_token: lexer.next_token(),
            peek_token: lexer.next_token(),
            lexer,
            errors: Vec::new(),
        }
    }

    /// Parses statements until end of input. A statement that fails to parse
    /// is dropped, its error recorded, and parsing resumes at the next token.
    pub fn parse_program(&mut self) -> Program {
        let mut statements: Vec<Statement> = Vec::new();
        while !self.cur_token.is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    debug!(%error, "dropping malformed statement");
                    self.errors.push(error);
                }
            }
            self.next_token();
        }
        Program { statements }
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::from_token(&self.peek_token)
    }

    fn cur_precedence(&self) -> Precedence {
        Precedence::from_token(&self.cur_token)
    }

    fn expect_peek(&mut self, expected: TokenKind) -> Result<()> {
        if self.peek_token.is(expected) {
            self.next_token();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected,
                got: self.peek_token.kind(),
            })
        }
    }

    fn skip_semicolon(&mut self) {
        if self.peek_token.is(TokenKind::Semicolon) {
            self.next_token();
        }
    }

    #[instrument(level = "trace", skip_all, fields(token = %self.cur_token))]
    fn parse_statement(&mut self) -> Result<Statement> {
        match self.cur_token.kind() {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Result<Statement> {
        let name = self.expect_identifier()?;

        self.expect_peek(TokenKind::Assign)?;

        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        self.skip_semicolon();

        Ok(Statement::Let { name, value })
    }

    fn parse_return_statement(&mut self) -> Result<Statement> {
        let value = match self.peek_token.kind() {
            TokenKind::Semicolon | TokenKind::Rbrace | TokenKind::Eof => None,
            _ => {
                self.next_token();
                Some(self.parse_expression(Precedence::Lowest)?)
            }
        };

        self.skip_semicolon();

        Ok(Statement::Return(value))
    }

    fn parse_expression_statement(&mut self) -> Result<Statement> {
        let expression = self.parse_expression(Precedence::Lowest)?;

        self.skip_semicolon();

        Ok(Statement::Expression(expression))
    }

    #[instrument(level = "trace", skip(self), fields(token = %self.cur_token))]
    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression> {
        let mut left_exp = match self.cur_token.clone() {
            Token::Ident(value) => Expression::Identifier(value),
            Token::Int(value) => self.parse_integer_literal(value)?,
            Token::String(value) => Expression::StringLiteral(value),
            Token::True => Expression::BooleanLiteral(true),
            Token::False => Expression::BooleanLiteral(false),
            Token::Bang | Token::Minus => self.parse_prefix_expression()?,
            Token::Lparen => self.parse_grouped_expression()?,
            Token::Lbracket => self.parse_array_literal()?,
            Token::Lbrace => self.parse_hash_literal()?,
            Token::If => self.parse_if_expression()?,
            Token::Function => self.parse_function_literal()?,
            token => return Err(ParseError::NoPrefixParseFn(token.kind())),
        };

        while !self.peek_token.is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            left_exp = match self.peek_token.kind() {
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Asterisk
                | TokenKind::Slash
                | TokenKind::Eq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::Gt => {
                    self.next_token();
                    self.parse_infix_expression(left_exp)?
                }
                TokenKind::Lparen => {
                    self.next_token();
                    self.parse_call_expression(left_exp)?
                }
                TokenKind::Lbracket => {
                    self.next_token();
                    self.parse_index_expression(left_exp)?
                }
                _ => return Ok(left_exp),
            };
        }

        Ok(left_exp)
    }

    fn parse_prefix_expression(&mut self) -> Result<Expression> {
        let operator = self.cur_token.clone();
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Ok(Expression::Prefix {
            operator,
            right: Box::new(right),
        })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Result<Expression> {
        let operator = self.cur_token.clone();
        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Ok(Expression::Infix {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    fn parse_integer_literal(&mut self, literal: String) -> Result<Expression> {
        match literal.parse::<i64>() {
            Ok(value) => Ok(Expression::IntegerLiteral(value)),
            Err(_) => Err(ParseError::InvalidInteger(literal)),
        }
    }

    fn parse_grouped_expression(&mut self) -> Result<Expression> {
        self.next_token();
        let exp = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::Rparen)?;
        Ok(exp)
    }

    fn parse_if_expression(&mut self) -> Result<Expression> {
        self.expect_peek(TokenKind::Lparen)?;

        self.next_token();

        let condition = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(TokenKind::Rparen)?;

        self.expect_peek(TokenKind::Lbrace)?;

        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_token.is(TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::Lbrace)?;
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Ok(Expression::If {
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    fn parse_array_literal(&mut self) -> Result<Expression> {
        let elements = self.parse_expression_list(TokenKind::Rbracket)?;

        Ok(Expression::ArrayLiteral(elements))
    }

    fn parse_hash_literal(&mut self) -> Result<Expression> {
        let mut pairs: Vec<(Expression, Expression)> = Vec::new();

        while !self.peek_token.is(TokenKind::Rbrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;
            self.expect_peek(TokenKind::Colon)?;
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));
            if !self.peek_token.is(TokenKind::Rbrace) {
                self.expect_peek(TokenKind::Comma)?;
            }
        }

        self.expect_peek(TokenKind::Rbrace)?;

        Ok(Expression::HashLiteral(pairs))
    }

    fn parse_function_literal(&mut self) -> Result<Expression> {
        self.expect_peek(TokenKind::Lparen)?;

        let parameters = self.parse_function_parameters()?;

        self.expect_peek(TokenKind::Lbrace)?;

        let body = self.parse_block_statement()?;

        Ok(Expression::FunctionLiteral(Rc::new(FunctionLiteral {
            parameters,
            body,
        })))
    }

    fn parse_function_parameters(&mut self) -> Result<Vec<String>> {
        let mut parameters: Vec<String> = Vec::new();

        if self.peek_token.is(TokenKind::Rparen) {
            self.next_token();
            return Ok(parameters);
        }

        parameters.push(self.expect_identifier()?);

        while self.peek_token.is(TokenKind::Comma) {
            self.next_token();
            parameters.push(self.expect_identifier()?);
        }

        self.expect_peek(TokenKind::Rparen)?;

        Ok(parameters)
    }

    fn expect_identifier(&mut self) -> Result<String> {
        self.expect_peek(TokenKind::Ident)?;
        Ok(self.cur_token.literal())
    }

    fn parse_expression_list(&mut self, end: TokenKind) -> Result<Vec<Expression>> {
        let mut expressions: Vec<Expression> = Vec::new();

        if self.peek_token.is(end) {
            self.next_token();
            return Ok(expressions);
        }

        self.next_token();
        expressions.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token.is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            expressions.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;

        Ok(expressions)
    }

    #[instrument(level = "trace", skip_all)]
    fn parse_block_statement(&mut self) -> Result<BlockStatement> {
        self.next_token();

        let mut statements: Vec<Statement> = Vec::new();

        while !self.cur_token.is(TokenKind::Rbrace) && !self.cur_token.is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    debug!(%error, "dropping malformed statement in block");
                    self.errors.push(error);
                }
            }
            self.next_token();
        }

        Ok(BlockStatement { statements })
    }

    fn parse_call_expression(&mut self, function: Expression) -> Result<Expression> {
        let arguments = self.parse_expression_list(TokenKind::Rparen)?;
        Ok(Expression::Call {
            function: Box::new(function),
            arguments,
        })
    }

    fn parse_index_expression(&mut self, left: Expression) -> Result<Expression> {
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::Rbracket)?;
        Ok(Expression::Index {
            left: Box::new(left),
            index: Box::new(index),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn let_statements() {
        let program = get_program(
            r#"
                let x = 5;
                let y = true;
                let foobar = y;
            "#,
        );
        assert_eq!(program.statements.len(), 3);
        let cases = vec![
            ("x", Expression::IntegerLiteral(5)),
            ("y", Expression::BooleanLiteral(true)),
            ("foobar", Expression::Identifier("y".to_string())),
        ];
        for (statement, (name, value)) in program.statements.iter().zip(cases) {
            assert_eq!(statement.token_literal(), "let");
            assert_let_statement(statement, name, value);
        }
    }

    #[test]
    fn return_statements() {
        let program = get_program(
            r#"
                return 5;
                return 10;
                return 993322;
            "#,
        );
        assert_eq!(program.statements.len(), 3);
        for (statement, value) in program.statements.iter().zip([5, 10, 993322]) {
            match statement {
                Statement::Return(Some(expression)) => assert_integer_literal(expression, value),
                _ => panic!("expected return statement, found {statement}"),
            }
        }
    }

    #[test]
    fn bare_return_statement() {
        let program = get_program("fn() { return; }; return");
        assert_eq!(program.statements.len(), 2);
        match &program.statements[0] {
            Statement::Expression(Expression::FunctionLiteral(literal)) => {
                assert_eq!(literal.body.statements, vec![Statement::Return(None)]);
            }
            statement => panic!("expected function literal, found {statement}"),
        }
        assert_eq!(program.statements[1], Statement::Return(None));
    }

    #[test]
    fn identifier_expression() {
        let program = get_program("foobar;");
        assert_eq!(program.statements.len(), 1);
        assert_identifier_expression(expression_of(&program.statements[0]), "foobar");
    }

    #[test]
    fn integer_literal_expression() {
        let program = get_program("5;");
        assert_eq!(program.statements.len(), 1);
        assert_integer_literal(expression_of(&program.statements[0]), 5);
    }

    #[test]
    fn bool_expression() {
        let program = get_program(
            r#"
            true;
            false;
        "#,
        );
        assert_eq!(program.statements.len(), 2);
        for (statement, value) in program.statements.iter().zip([true, false]) {
            assert_eq!(
                *expression_of(statement),
                Expression::BooleanLiteral(value)
            );
        }
    }

    #[test]
    fn string_literals() {
        let program = get_program(r#""hello world";"#);
        assert_eq!(program.statements.len(), 1);
        assert_eq!(
            *expression_of(&program.statements[0]),
            Expression::StringLiteral("hello world".to_string())
        );
    }

    #[test]
    fn array_literals() {
        let program = get_program("[1, 2 * 2, 3 + 3];");
        assert_eq!(program.statements.len(), 1);
        match expression_of(&program.statements[0]) {
            Expression::ArrayLiteral(values) => {
                assert_eq!(values.len(), 3);
                assert_integer_literal(&values[0], 1);
                assert_infix_expression(
                    &values[1],
                    Expression::IntegerLiteral(2),
                    Token::Asterisk,
                    Expression::IntegerLiteral(2),
                );
                assert_infix_expression(
                    &values[2],
                    Expression::IntegerLiteral(3),
                    Token::Plus,
                    Expression::IntegerLiteral(3),
                );
            }
            expr => panic!("expected array literal, found {expr}"),
        }
    }

    #[test]
    fn empty_array_literal() {
        let program = get_program("[];");
        assert_eq!(
            *expression_of(&program.statements[0]),
            Expression::ArrayLiteral(vec![])
        );
    }

    #[test]
    fn index_expressions() {
        let program = get_program("myArray[1 + 1];");
        match expression_of(&program.statements[0]) {
            Expression::Index { left, index } => {
                assert_identifier_expression(left, "myArray");
                assert_infix_expression(
                    index,
                    Expression::IntegerLiteral(1),
                    Token::Plus,
                    Expression::IntegerLiteral(1),
                );
            }
            expr => panic!("expected index expression, found {expr}"),
        }
    }

    #[test]
    fn hash_literals() {
        let program = get_program(r#"{"one": 1, true: "2", 3: false};"#);
        match expression_of(&program.statements[0]) {
            Expression::HashLiteral(pairs) => {
                let expected = vec![
                    (
                        Expression::StringLiteral("one".to_string()),
                        Expression::IntegerLiteral(1),
                    ),
                    (
                        Expression::BooleanLiteral(true),
                        Expression::StringLiteral("2".to_string()),
                    ),
                    (
                        Expression::IntegerLiteral(3),
                        Expression::BooleanLiteral(false),
                    ),
                ];
                assert_eq!(*pairs, expected);
            }
            expr => panic!("expected hash literal, found {expr}"),
        }
    }

    #[test]
    fn empty_hash_literal() {
        let program = get_program("{};");
        assert_eq!(
            *expression_of(&program.statements[0]),
            Expression::HashLiteral(vec![])
        );
    }

    #[test]
    fn hash_literals_with_expressions() {
        let program = get_program(r#"{"one": 0 + 1, "two": 10 - 8, "three": 15 > 5 };"#);
        assert_eq!(
            program.to_string(),
            "{one: (0 + 1), two: (10 - 8), three: (15 > 5)}"
        );
    }

    #[test]
    fn prefix_operators() {
        let cases = vec![
            ("!5;", Token::Bang, Expression::IntegerLiteral(5)),
            ("-15;", Token::Minus, Expression::IntegerLiteral(15)),
            ("!true;", Token::Bang, Expression::BooleanLiteral(true)),
            ("!false;", Token::Bang, Expression::BooleanLiteral(false)),
        ];
        for (input, expected_operator, expected_right) in cases {
            let program = get_program(input);
            assert_eq!(program.statements.len(), 1);
            match expression_of(&program.statements[0]) {
                Expression::Prefix { operator, right } => {
                    assert_eq!(*operator, expected_operator);
                    assert_eq!(**right, expected_right);
                }
                expr => panic!("expected prefix expression, found {expr}"),
            }
        }
    }

    #[test]
    fn infix_expressions() {
        let cases = vec![
            ("5 + 5;", 5, Token::Plus, 5),
            ("5 - 5;", 5, Token::Minus, 5),
            ("5 * 5;", 5, Token::Asterisk, 5),
            ("5 / 5;", 5, Token::Slash, 5),
            ("5 > 5;", 5, Token::Gt, 5),
            ("5 < 5;", 5, Token::Lt, 5),
            ("5 == 5;", 5, Token::Eq, 5),
            ("5 != 5;", 5, Token::NotEq, 5),
        ];
        for (input, left, operator, right) in cases {
            let program = get_program(input);
            assert_eq!(program.statements.len(), 1);
            assert_infix_expression(
                expression_of(&program.statements[0]),
                Expression::IntegerLiteral(left),
                operator,
                Expression::IntegerLiteral(right),
            );
        }

        let program = get_program("true != false");
        assert_infix_expression(
            expression_of(&program.statements[0]),
            Expression::BooleanLiteral(true),
            Token::NotEq,
            Expression::BooleanLiteral(false),
        );
    }

    #[test]
    fn operator_precedence() {
        let cases = vec![
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c;", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            ),
            ("true", "true"),
            ("false", "false"),
            ("3 > 5 == false", "((3 > 5) == false)"),
            ("3 < 5 == true", "((3 < 5) == true)"),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("(5 + 5) * 2", "((5 + 5) * 2)"),
            ("2 / (5 + 5)", "(2 / (5 + 5))"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(true == true)", "(!(true == true))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            (
                "add(a + b + c * d / f + g)",
                "add((((a + b) + ((c * d) / f)) + g))",
            ),
            (
                "a * [1, 2, 3, 4][b * c] * d",
                "((a * ([1, 2, 3, 4][(b * c)])) * d)",
            ),
            (
                "add(a * b[2], b[1], 2 * [1, 2][1])",
                "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
            ),
            ("let x = 1 + 2 * 3;", "let x = (1 + (2 * 3));"),
        ];
        for (input, expected) in cases {
            let program = get_program(input);
            assert_eq!(program.to_string(), expected);
        }
    }

    #[test]
    fn if_expression() {
        let program = get_program("if (x < y) { x }");
        assert_eq!(program.statements.len(), 1);
        match expression_of(&program.statements[0]) {
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                assert_infix_expression(
                    condition,
                    Expression::Identifier("x".to_string()),
                    Token::Lt,
                    Expression::Identifier("y".to_string()),
                );
                assert_eq!(consequence.statements.len(), 1);
                assert_identifier_expression(expression_of(&consequence.statements[0]), "x");
                assert_eq!(*alternative, None);
            }
            expr => panic!("expected if expression, found {expr}"),
        }
    }

    #[test]
    fn if_else_expression() {
        let program = get_program("if (x < y) { x } else { y }");
        match expression_of(&program.statements[0]) {
            Expression::If { alternative, .. } => {
                let alternative = alternative.as_ref().expect("missing alternative");
                assert_eq!(alternative.statements.len(), 1);
                assert_identifier_expression(expression_of(&alternative.statements[0]), "y");
            }
            expr => panic!("expected if expression, found {expr}"),
        }
    }

    #[test]
    fn function_literals() {
        let cases = vec![
            ("fn() {};", vec![], 0),
            ("fn (x) {};", vec!["x"], 0),
            ("fn(x, y, z) { x + y; }", vec!["x", "y", "z"], 1),
        ];
        for (input, expected_parameters, body_len) in cases {
            let program = get_program(input);
            assert_eq!(program.statements.len(), 1);
            match expression_of(&program.statements[0]) {
                Expression::FunctionLiteral(literal) => {
                    assert_eq!(literal.parameters, expected_parameters);
                    assert_eq!(literal.body.statements.len(), body_len);
                }
                expr => panic!("expected function literal, found {expr}"),
            }
        }
    }

    #[test]
    fn call_expressions() {
        let program = get_program("add(1, 2 * 3, 4 + 5);");

        assert_eq!(program.statements.len(), 1);
        match expression_of(&program.statements[0]) {
            Expression::Call {
                function,
                arguments,
            } => {
                assert_identifier_expression(function, "add");
                assert_eq!(arguments.len(), 3);
                assert_integer_literal(&arguments[0], 1);
                assert_infix_expression(
                    &arguments[1],
                    Expression::IntegerLiteral(2),
                    Token::Asterisk,
                    Expression::IntegerLiteral(3),
                );
                assert_infix_expression(
                    &arguments[2],
                    Expression::IntegerLiteral(4),
                    Token::Plus,
                    Expression::IntegerLiteral(5),
                );
            }
            expr => panic!("expected call expression, found {expr}"),
        }
    }

    #[test]
    fn malformed_let_statements() {
        let input = r#"
            let x 5;
            let = 10;
            let 838383;
        "#;
        let expected = vec![
            "expected next token to be =, instead got INT",
            "expected next token to be IDENT, instead got =",
            "no prefix parse function for = found",
            "expected next token to be IDENT, instead got INT",
        ];
        for _ in 0..3 {
            let (program, errors) = parse(input);
            assert_eq!(errors, expected);
            assert_eq!(program.to_string(), "510838383");
        }
    }

    #[test]
    fn typed_errors() {
        let cases = vec![
            (
                "fn(1) { 1 }",
                ParseError::UnexpectedToken {
                    expected: TokenKind::Ident,
                    got: TokenKind::Int,
                },
            ),
            (
                "99999999999999999999",
                ParseError::InvalidInteger("99999999999999999999".to_string()),
            ),
            ("@", ParseError::NoPrefixParseFn(TokenKind::Illegal)),
            (
                "if x { 1 }",
                ParseError::UnexpectedToken {
                    expected: TokenKind::Lparen,
                    got: TokenKind::Ident,
                },
            ),
        ];
        for (input, expected) in cases {
            let mut parser = Parser::new(Lexer::new(input));
            parser.parse_program();
            assert_eq!(parser.errors().first(), Some(&expected), "input: {input}");
        }
    }

    #[test]
    fn missing_closing_delimiters() {
        let (_, errors) = parse("add(1, 2");
        assert_eq!(errors, vec!["expected next token to be ), instead got EOF"]);

        let (_, errors) = parse("{\"a\" 1}");
        assert_eq!(
            errors,
            vec![
                "expected next token to be :, instead got INT",
                "no prefix parse function for } found",
            ]
        );
    }

    #[test]
    fn malformed_statements_inside_blocks() {
        let (program, errors) = parse("let f = fn() { let x 5; x }; f()");
        assert_eq!(errors, vec!["expected next token to be =, instead got INT"]);
        assert_eq!(program.statements.len(), 2);
        assert_eq!(program.to_string(), "let f = fn() 5x;f()");

        let (program, errors) = parse("if (true) { let x 5; }");
        assert_eq!(errors, vec!["expected next token to be =, instead got INT"]);
        assert_eq!(program.statements.len(), 1);

        let (_, errors) = parse("fn() { let = 1; return 2; let y 3 }");
        assert_eq!(
            errors,
            vec![
                "expected next token to be IDENT, instead got =",
                "no prefix parse function for = found",
                "expected next token to be =, instead got INT",
            ]
        );
    }

    fn get_program(input: &str) -> Program {
        let (program, errors) = parse(input);
        if !errors.is_empty() {
            panic!("parser returned errors: {:?}", errors);
        }
        program
    }

    fn expression_of(statement: &Statement) -> &Expression {
        match statement {
            Statement::Expression(expression) => expression,
            _ => panic!("expected expression statement, found {statement}"),
        }
    }

    fn assert_let_statement(
        statement: &Statement,
        expected_name: &str,
        expected_value: Expression,
    ) {
        match statement {
            Statement::Let { name, value } => {
                assert_eq!(name, expected_name);
                assert_eq!(*value, expected_value);
            }
            _ => panic!("expected let statement, found {statement}"),
        }
    }

    fn assert_infix_expression(
        expr: &Expression,
        expected_left: Expression,
        expected_operator: Token,
        expected_right: Expression,
    ) {
        match expr {
            Expression::Infix {
                left,
                operator,
                right,
            } => {
                assert_eq!(**left, expected_left);
                assert_eq!(*operator, expected_operator);
                assert_eq!(**right, expected_right);
            }
            _ => panic!("expected infix expression, found {expr}"),
        }
    }

    fn assert_identifier_expression(expression: &Expression, expected_value: &str) {
        match expression {
            Expression::Identifier(value) => assert_eq!(value, expected_value),
            _ => panic!("expected identifier, found {expression}"),
        }
    }

    fn assert_integer_literal(expression: &Expression, expected_value: i64) {
        match expression {
            Expression::IntegerLiteral(value) => assert_eq!(*value, expected_value),
            _ => panic!("expected integer literal, found {expression}"),
        }
    }
}
