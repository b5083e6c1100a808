use std::collections::HashMap;

use lazy_static::lazy_static;

use super::{
    error::EvalError,
    object::{Builtin, Object, ObjectType},
};

lazy_static! {
    static ref BUILTINS: HashMap<&'static str, Builtin> = [
        Builtin {
            name: "len",
            func: Builtins::len_fn
        },
        Builtin {
            name: "first",
            func: Builtins::first_fn
        },
        Builtin {
            name: "last",
            func: Builtins::last_fn
        },
        Builtin {
            name: "rest",
            func: Builtins::rest_fn
        },
        Builtin {
            name: "push",
            func: Builtins::push_fn
        },
        Builtin {
            name: "puts",
            func: Builtins::puts_fn
        },
    ]
    .into_iter()
    .map(|builtin| (builtin.name, builtin))
    .collect();
}

pub struct Builtins;

impl Builtins {
    pub fn lookup(name: &str) -> Option<Builtin> {
        BUILTINS.get(name).copied()
    }

    fn puts_fn(args: Vec<Object>) -> Result<Object, EvalError> {
        for arg in args {
            println!("{}", arg);
        }
        Ok(Object::Null)
    }

    fn len_fn(args: Vec<Object>) -> Result<Object, EvalError> {
        let [arg] = Self::expect_args::<1>(args)?;
        match arg {
            Object::String(value) => Ok(Object::Integer(value.chars().count() as i64)),
            Object::Array(elements) => Ok(Object::Integer(elements.len() as i64)),
            other => Err(EvalError::ArgumentNotSupported {
                name: "len",
                got: other.object_type(),
            }),
        }
    }

    fn first_fn(args: Vec<Object>) -> Result<Object, EvalError> {
        let [arg] = Self::expect_args::<1>(args)?;
        let elements = Self::expect_array("first", arg)?;
        Ok(elements.into_iter().next().unwrap_or(Object::Null))
    }

    fn last_fn(args: Vec<Object>) -> Result<Object, EvalError> {
        let [arg] = Self::expect_args::<1>(args)?;
        let elements = Self::expect_array("last", arg)?;
        Ok(elements.into_iter().last().unwrap_or(Object::Null))
    }

    fn rest_fn(args: Vec<Object>) -> Result<Object, EvalError> {
        let [arg] = Self::expect_args::<1>(args)?;
        let elements = Self::expect_array("rest", arg)?;
        if elements.is_empty() {
            return Ok(Object::Null);
        }
        Ok(Object::Array(elements.into_iter().skip(1).collect()))
    }

    fn push_fn(args: Vec<Object>) -> Result<Object, EvalError> {
        let [array, value] = Self::expect_args::<2>(args)?;
        let mut elements = Self::expect_array("push", array)?;
        elements.push(value);
        Ok(Object::Array(elements))
    }

    fn expect_args<const N: usize>(args: Vec<Object>) -> Result<[Object; N], EvalError> {
        let got = args.len();
        args.try_into()
            .map_err(|_| EvalError::WrongArgumentCount { got, want: N })
    }

    fn expect_array(name: &'static str, arg: Object) -> Result<Vec<Object>, EvalError> {
        match arg {
            Object::Array(elements) => Ok(elements),
            other => Err(EvalError::ArgumentMustBe {
                name,
                expected: ObjectType::Array,
                got: other.object_type(),
            }),
        }
    }
}
