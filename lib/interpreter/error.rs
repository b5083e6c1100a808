use thiserror::Error;

use super::object::ObjectType;
use crate::token::Token;

/// Failures raised while evaluating a program. Once raised, an error aborts
/// every enclosing evaluation step and surfaces as an [`Object::Error`].
///
/// [`Object::Error`]: super::object::Object::Error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("type mismatch: {0} {1} {2}")]
    TypeMismatch(ObjectType, Token, ObjectType),
    #[error("unknown operator: {0}{1}")]
    UnknownPrefixOperator(Token, ObjectType),
    #[error("unknown operator: {0} {1} {2}")]
    UnknownInfixOperator(ObjectType, Token, ObjectType),
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),
    #[error("not a function: {0}")]
    NotAFunction(ObjectType),
    #[error("index operator not supported: {0}")]
    IndexNotSupported(ObjectType),
    #[error("unusable as hash key: {0}")]
    UnusableAsHashKey(ObjectType),
    #[error("wrong number of arguments. got={got}, want={want}")]
    WrongArgumentCount { got: usize, want: usize },
    #[error("argument to \"{name}\" must be {expected}, got {got}")]
    ArgumentMustBe {
        name: &'static str,
        expected: ObjectType,
        got: ObjectType,
    },
    #[error("argument to \"{name}\" not supported, got {got}")]
    ArgumentNotSupported { name: &'static str, got: ObjectType },
    #[error("division by zero")]
    DivisionByZero,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let cases = vec![
            (
                EvalError::TypeMismatch(ObjectType::Integer, Token::Plus, ObjectType::Boolean),
                "type mismatch: INTEGER + BOOLEAN",
            ),
            (
                EvalError::UnknownPrefixOperator(Token::Minus, ObjectType::Boolean),
                "unknown operator: -BOOLEAN",
            ),
            (
                EvalError::WrongArgumentCount { got: 2, want: 1 },
                "wrong number of arguments. got=2, want=1",
            ),
            (
                EvalError::ArgumentMustBe {
                    name: "first",
                    expected: ObjectType::Array,
                    got: ObjectType::Integer,
                },
                "argument to \"first\" must be ARRAY, got INTEGER",
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }
}
