pub mod ast;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod token;

mod engine;

pub use engine::{Engine, EngineError, ParseErrors};
pub use interpreter::{evaluate, Env, Environment, Object};
pub use parser::{parse, ParseError};

/// A tree-walking interpreter that keeps one global environment across runs.
pub fn new_interpreter() -> Box<dyn Engine> {
    interpreter::new_engine()
}
