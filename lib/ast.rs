use std::{fmt, rc::Rc};

use crate::token::Token;

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Let { name: String, value: Expression },
    Return(Option<Expression>),
    Expression(Expression),
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

/// Parameters and body of a `fn` literal. Closures created from the literal
/// share it rather than copying the body.
#[derive(Debug, PartialEq, Clone)]
pub struct FunctionLiteral {
    pub parameters: Vec<String>,
    pub body: BlockStatement,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Identifier(String),
    IntegerLiteral(i64),
    StringLiteral(String),
    BooleanLiteral(bool),
    Prefix {
        operator: Token,
        right: Box<Expression>,
    },
    Infix {
        left: Box<Expression>,
        operator: Token,
        right: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    FunctionLiteral(Rc<FunctionLiteral>),
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    ArrayLiteral(Vec<Expression>),
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
    },
    HashLiteral(Vec<(Expression, Expression)>),
}

impl Program {
    pub fn token_literal(&self) -> String {
        self.statements
            .first()
            .map(Statement::token_literal)
            .unwrap_or_default()
    }
}

impl Statement {
    pub fn token_literal(&self) -> String {
        match self {
            Statement::Let { .. } => Token::Let.literal(),
            Statement::Return(_) => Token::Return.literal(),
            Statement::Expression(expression) => expression.token_literal(),
        }
    }
}

impl BlockStatement {
    pub fn token_literal(&self) -> String {
        Token::Lbrace.literal()
    }
}

impl Expression {
    /// Literal of the token the expression starts from (or, for operators,
    /// is named after).
    pub fn token_literal(&self) -> String {
        match self {
            Expression::Identifier(name) => name.clone(),
            Expression::IntegerLiteral(value) => value.to_string(),
            Expression::StringLiteral(value) => value.clone(),
            Expression::BooleanLiteral(value) => value.to_string(),
            Expression::Prefix { operator, .. } | Expression::Infix { operator, .. } => {
                operator.literal()
            }
            Expression::If { .. } => Token::If.literal(),
            Expression::FunctionLiteral(_) => Token::Function.literal(),
            Expression::Call { .. } => Token::Lparen.literal(),
            Expression::ArrayLiteral(_) | Expression::Index { .. } => Token::Lbracket.literal(),
            Expression::HashLiteral(_) => Token::Lbrace.literal(),
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {};", name, value),
            Statement::Return(Some(value)) => write!(f, "return {};", value),
            Statement::Return(None) => write!(f, "return ;"),
            Statement::Expression(expression) => write!(f, "{}", expression),
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "fn({}) {}", self.parameters.join(", "), self.body)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::IntegerLiteral(value) => write!(f, "{}", value),
            Expression::StringLiteral(value) => write!(f, "{}", value),
            Expression::BooleanLiteral(value) => write!(f, "{}", value),
            Expression::Prefix { operator, right } => write!(f, "({}{})", operator, right),
            Expression::Infix {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if{} {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, "else {}", alternative)?;
                }
                Ok(())
            }
            Expression::FunctionLiteral(literal) => write!(f, "{}", literal),
            Expression::Call {
                function,
                arguments,
            } => write!(f, "{}({})", function, join(arguments)),
            Expression::ArrayLiteral(elements) => write!(f, "[{}]", join(elements)),
            Expression::Index { left, index } => write!(f, "({}[{}])", left, index),
            Expression::HashLiteral(pairs) => {
                let pairs = pairs
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "{{{}}}", pairs)
            }
        }
    }
}
