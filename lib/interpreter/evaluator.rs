use std::rc::Rc;

use tracing::{instrument, trace};

use super::{
    builtins::Builtins,
    environment::{Env, Environment},
    error::EvalError,
    object::{Closure, HashObject, HashPair, Object, ObjectType},
};
use crate::{
    ast::{BlockStatement, Expression, FunctionLiteral, Program, Statement},
    token::Token,
};

/// Non-local exits threaded through evaluation with `?`.
#[derive(Debug)]
enum Signal {
    Return(Object),
    Error(EvalError),
}

impl From<EvalError> for Signal {
    fn from(error: EvalError) -> Self {
        Signal::Error(error)
    }
}

type Eval = Result<Object, Signal>;

/// Any node that can be handed to [`evaluate`].
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Statement(&'a Statement),
    Block(&'a BlockStatement),
    Expression(&'a Expression),
}

impl<'a> From<&'a Program> for Node<'a> {
    fn from(program: &'a Program) -> Self {
        Node::Program(program)
    }
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(statement: &'a Statement) -> Self {
        Node::Statement(statement)
    }
}

impl<'a> From<&'a BlockStatement> for Node<'a> {
    fn from(block: &'a BlockStatement) -> Self {
        Node::Block(block)
    }
}

impl<'a> From<&'a Expression> for Node<'a> {
    fn from(expression: &'a Expression) -> Self {
        Node::Expression(expression)
    }
}

/// Evaluates `node` in `env`.
///
/// A program unwraps a top-level `return`; any other node hands it back as
/// an [`Object::ReturnValue`]. Failures come back as [`Object::Error`].
pub fn evaluate<'a>(node: impl Into<Node<'a>>, env: &Env) -> Object {
    let result = match node.into() {
        Node::Program(program) => return eval_program(program, env),
        Node::Statement(statement) => eval_statement(statement, env),
        Node::Block(block) => eval_block_statement(block, env),
        Node::Expression(expression) => eval_expression(expression, env),
    };
    match result {
        Ok(object) => object,
        Err(Signal::Return(value)) => Object::ReturnValue(Box::new(value)),
        Err(Signal::Error(error)) => Object::Error(error.to_string()),
    }
}

/// Evaluates programs against one long-lived global environment.
pub struct Evaluator {
    env: Env,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    pub fn environment(&self) -> Env {
        Rc::clone(&self.env)
    }

    pub fn eval(&self, program: &Program) -> Object {
        eval_program(program, &self.env)
    }
}

fn eval_program(program: &Program, env: &Env) -> Object {
    let mut result = Object::Null;
    for statement in &program.statements {
        match eval_statement(statement, env) {
            Ok(object) => result = object,
            Err(Signal::Return(value)) => return value,
            Err(Signal::Error(error)) => return Object::Error(error.to_string()),
        }
    }
    result
}

fn eval_statement(statement: &Statement, env: &Env) -> Eval {
    match statement {
        Statement::Expression(expression) => eval_expression(expression, env),
        Statement::Return(Some(expression)) => {
            let value = eval_expression(expression, env)?;
            Err(Signal::Return(value))
        }
        Statement::Return(None) => Err(Signal::Return(Object::Null)),
        Statement::Let { name, value } => {
            let value = eval_expression(value, env)?;
            env.borrow_mut().set(name, value);
            Ok(Object::Null)
        }
    }
}

fn eval_block_statement(block: &BlockStatement, env: &Env) -> Eval {
    let mut result = Object::Null;
    for statement in &block.statements {
        result = eval_statement(statement, env)?;
    }
    Ok(result)
}

fn eval_expression(expression: &Expression, env: &Env) -> Eval {
    match expression {
        Expression::IntegerLiteral(value) => Ok(Object::Integer(*value)),
        Expression::StringLiteral(value) => Ok(Object::String(value.clone())),
        Expression::BooleanLiteral(value) => Ok(Object::Boolean(*value)),
        Expression::Prefix { operator, right } => {
            let right = eval_expression(right, env)?;
            eval_prefix_expression(operator, right)
        }
        Expression::Infix {
            left,
            operator,
            right,
        } => {
            let left = eval_expression(left, env)?;
            let right = eval_expression(right, env)?;
            eval_infix_expression(left, operator, right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, env)?;
            if condition.is_truthy() {
                eval_block_statement(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block_statement(alternative, env)
            } else {
                Ok(Object::Null)
            }
        }
        Expression::Identifier(name) => eval_identifier(name, env),
        Expression::FunctionLiteral(literal) => Ok(Object::Function(Closure {
            literal: Rc::clone(literal),
            env: Rc::clone(env),
        })),
        Expression::Call {
            function,
            arguments,
        } => {
            let function = eval_expression(function, env)?;
            let args = eval_expressions(arguments, env)?;
            apply_function(function, args)
        }
        Expression::ArrayLiteral(elements) => Ok(Object::Array(eval_expressions(elements, env)?)),
        Expression::Index { left, index } => {
            let left = eval_expression(left, env)?;
            let index = eval_expression(index, env)?;
            eval_index_expression(left, index)
        }
        Expression::HashLiteral(pairs) => eval_hash_literal(pairs, env),
    }
}

fn eval_expressions(expressions: &[Expression], env: &Env) -> Result<Vec<Object>, Signal> {
    expressions
        .iter()
        .map(|expression| eval_expression(expression, env))
        .collect()
}

fn eval_identifier(name: &str, env: &Env) -> Eval {
    if let Some(value) = env.borrow().get(name) {
        return Ok(value);
    }
    match Builtins::lookup(name) {
        Some(builtin) => Ok(Object::Builtin(builtin)),
        None => Err(EvalError::IdentifierNotFound(name.to_string()).into()),
    }
}

#[instrument(level = "trace", skip_all, fields(function = %function.object_type(), args = args.len()))]
fn apply_function(function: Object, args: Vec<Object>) -> Eval {
    match function {
        Object::Function(Closure { literal, env }) => {
            let env = extend_function_env(&literal, env, args)?;
            match eval_block_statement(&literal.body, &env) {
                Err(Signal::Return(value)) => Ok(value),
                result => result,
            }
        }
        Object::Builtin(builtin) => {
            trace!(name = builtin.name, "calling builtin");
            Ok((builtin.func)(args)?)
        }
        other => Err(EvalError::NotAFunction(other.object_type()).into()),
    }
}

fn extend_function_env(
    literal: &FunctionLiteral,
    outer: Env,
    args: Vec<Object>,
) -> Result<Env, EvalError> {
    if literal.parameters.len() != args.len() {
        return Err(EvalError::WrongArgumentCount {
            got: args.len(),
            want: literal.parameters.len(),
        });
    }
    let env = Environment::new_enclosed_environment(outer);
    {
        let mut scope = env.borrow_mut();
        for (parameter, arg) in literal.parameters.iter().zip(args) {
            scope.set(parameter, arg);
        }
    }
    Ok(env)
}

fn eval_prefix_expression(operator: &Token, right: Object) -> Eval {
    match (operator, right) {
        (Token::Bang, right) => Ok(Object::Boolean(!right.is_truthy())),
        (Token::Minus, Object::Integer(value)) => Ok(Object::Integer(value.wrapping_neg())),
        (operator, right) => {
            Err(EvalError::UnknownPrefixOperator(operator.clone(), right.object_type()).into())
        }
    }
}

fn eval_infix_expression(left: Object, operator: &Token, right: Object) -> Eval {
    match (left, right) {
        (Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix_expression(left, operator, right)
        }
        (Object::String(left), Object::String(right)) => match operator {
            Token::Plus => Ok(Object::String(left + &right)),
            _ => Err(EvalError::UnknownInfixOperator(
                ObjectType::String,
                operator.clone(),
                ObjectType::String,
            )
            .into()),
        },
        (left, right) => match operator {
            Token::Eq => Ok(Object::Boolean(is_same_object(&left, &right))),
            Token::NotEq => Ok(Object::Boolean(!is_same_object(&left, &right))),
            _ if left.object_type() != right.object_type() => Err(EvalError::TypeMismatch(
                left.object_type(),
                operator.clone(),
                right.object_type(),
            )
            .into()),
            _ => Err(EvalError::UnknownInfixOperator(
                left.object_type(),
                operator.clone(),
                right.object_type(),
            )
            .into()),
        },
    }
}

fn eval_integer_infix_expression(left: i64, operator: &Token, right: i64) -> Eval {
    let object = match operator {
        Token::Plus => Object::Integer(left.wrapping_add(right)),
        Token::Minus => Object::Integer(left.wrapping_sub(right)),
        Token::Asterisk => Object::Integer(left.wrapping_mul(right)),
        Token::Slash if right == 0 => return Err(EvalError::DivisionByZero.into()),
        Token::Slash => Object::Integer(left.wrapping_div(right)),
        Token::Lt => Object::Boolean(left < right),
        Token::Gt => Object::Boolean(left > right),
        Token::Eq => Object::Boolean(left == right),
        Token::NotEq => Object::Boolean(left != right),
        _ => {
            let integer = ObjectType::Integer;
            return Err(EvalError::UnknownInfixOperator(integer, operator.clone(), integer).into());
        }
    };
    Ok(object)
}

/// `==` for anything that is not a pair of integers or strings. Booleans and
/// `null` compare by value, functions by identity, everything else is never
/// equal.
fn is_same_object(left: &Object, right: &Object) -> bool {
    match (left, right) {
        (Object::Boolean(left), Object::Boolean(right)) => left == right,
        (Object::Null, Object::Null) => true,
        (Object::Function(left), Object::Function(right)) => left == right,
        (Object::Builtin(left), Object::Builtin(right)) => left == right,
        _ => false,
    }
}

fn eval_index_expression(left: Object, index: Object) -> Eval {
    match (left, index) {
        (Object::Array(elements), Object::Integer(index)) => Ok(usize::try_from(index)
            .ok()
            .and_then(|index| elements.into_iter().nth(index))
            .unwrap_or(Object::Null)),
        (Object::Hash(pairs), index) => {
            let key = index.hash_key()?;
            Ok(pairs
                .get(&key)
                .map(|pair| pair.value.clone())
                .unwrap_or(Object::Null))
        }
        (left, _) => Err(EvalError::IndexNotSupported(left.object_type()).into()),
    }
}

fn eval_hash_literal(pairs: &[(Expression, Expression)], env: &Env) -> Eval {
    let mut hash = HashObject::default();
    for (key, value) in pairs {
        let key = eval_expression(key, env)?;
        let hash_key = key.hash_key()?;
        let value = eval_expression(value, env)?;
        hash.insert(hash_key, HashPair { key, value });
    }
    Ok(Object::Hash(hash))
}
