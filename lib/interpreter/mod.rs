mod builtins;
mod environment;
mod error;
mod evaluator;
mod object;

use anyhow::Result;
use tracing::debug;

pub use builtins::Builtins;
pub use environment::{Env, Environment};
pub use error::EvalError;
pub use evaluator::{evaluate, Evaluator, Node};
pub use object::{
    Builtin, BuiltinFn, Closure, HashKey, HashObject, HashPair, Object, ObjectType,
};

use crate::{
    engine::{Engine, EngineError, ParseErrors},
    lexer::Lexer,
    parser::Parser,
};

pub fn new_engine() -> Box<dyn Engine> {
    Box::new(EngineImpl {
        evaluator: Evaluator::new(),
    })
}

struct EngineImpl {
    evaluator: Evaluator,
}

impl Engine for EngineImpl {
    fn run(&mut self, input: &str) -> Result<String> {
        let lexer = Lexer::new(input);
        let mut parser = Parser::new(lexer);

        let program = parser.parse_program();
        let errors = parser.error_messages();
        if !errors.is_empty() {
            debug!(count = errors.len(), "rejecting program with parse errors");
            return Err(EngineError::from(ParseErrors(errors)).into());
        }

        debug!(statements = program.statements.len(), "evaluating program");
        match self.evaluator.eval(&program) {
            Object::Error(message) => Err(EngineError::Runtime(message).into()),
            result => Ok(result.to_string()),
        }
    }
}
