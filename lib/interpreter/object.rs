use std::{
    collections::{hash_map::DefaultHasher, HashMap},
    fmt,
    hash::{Hash, Hasher},
    rc::Rc,
};

use super::{environment::Env, error::EvalError};
use crate::ast::FunctionLiteral;

pub type BuiltinFn = fn(Vec<Object>) -> Result<Object, EvalError>;

#[derive(Debug, PartialEq, Clone)]
pub enum Object {
    Integer(i64),
    String(String),
    Boolean(bool),
    Null,
    Array(Vec<Object>),
    Hash(HashObject),
    ReturnValue(Box<Object>),
    Error(String),
    Function(Closure),
    Builtin(Builtin),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum ObjectType {
    Integer,
    String,
    Boolean,
    Null,
    Array,
    Hash,
    ReturnValue,
    Error,
    Function,
    Builtin,
}

/// A function value: the literal it was created from plus the environment
/// that was active at that point.
#[derive(Clone)]
pub struct Closure {
    pub literal: Rc<FunctionLiteral>,
    pub env: Env,
}

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct HashKey {
    object_type: ObjectType,
    value: u64,
}

/// Entry of a hash value. The original key is kept for display.
#[derive(Debug, PartialEq, Clone)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

/// Hash value that iterates in insertion order. Rebinding a key keeps its
/// original position.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct HashObject {
    positions: HashMap<HashKey, usize>,
    pairs: Vec<HashPair>,
}

impl HashObject {
    pub fn insert(&mut self, key: HashKey, pair: HashPair) {
        match self.positions.get(&key) {
            Some(&position) => self.pairs[position] = pair,
            None => {
                self.positions.insert(key, self.pairs.len());
                self.pairs.push(pair);
            }
        }
    }

    pub fn get(&self, key: &HashKey) -> Option<&HashPair> {
        self.positions.get(key).map(|&position| &self.pairs[position])
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = &HashPair> {
        self.pairs.iter()
    }
}

impl Object {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::String(_) => ObjectType::String,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Null => ObjectType::Null,
            Object::Array(_) => ObjectType::Array,
            Object::Hash(_) => ObjectType::Hash,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Error(_) => ObjectType::Error,
            Object::Function(_) => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
        }
    }

    /// Only `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    pub fn hash_key(&self) -> Result<HashKey, EvalError> {
        let value = match self {
            Object::Integer(value) => *value as u64,
            Object::Boolean(value) => u64::from(*value),
            Object::String(value) => {
                let mut hasher = DefaultHasher::new();
                value.hash(&mut hasher);
                hasher.finish()
            }
            other => return Err(EvalError::UnusableAsHashKey(other.object_type())),
        };
        Ok(HashKey {
            object_type: self.object_type(),
            value,
        })
    }
}

impl PartialEq for Closure {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.literal, &other.literal) && Rc::ptr_eq(&self.env, &other.env)
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Closure")
            .field("literal", &self.literal)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Builtin").field(&self.name).finish()
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::String => "STRING",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Null => "NULL",
            ObjectType::Array => "ARRAY",
            ObjectType::Hash => "HASH",
            ObjectType::ReturnValue => "RETURN_VALUE",
            ObjectType::Error => "ERROR",
            ObjectType::Function => "FUNCTION",
            ObjectType::Builtin => "BUILTIN",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::String(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::Array(values) => {
                let values: Vec<String> = values.iter().map(|v| format!("{}", v)).collect();
                write!(f, "[{}]", values.join(", "))
            }
            Object::Hash(pairs) => {
                let pairs = pairs
                    .pairs()
                    .map(|pair| format!("{}: {}", pair.key, pair.value))
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "{{{}}}", pairs)
            }
            Object::ReturnValue(value) => write!(f, "{}", value),
            Object::Error(message) => write!(f, "ERROR: {}", message),
            Object::Function(closure) => write!(
                f,
                "fn({}) {{\n{}\n}}",
                closure.literal.parameters.join(", "),
                closure.literal.body
            ),
            Object::Builtin(_) => write!(f, "builtin function"),
        }
    }
}
