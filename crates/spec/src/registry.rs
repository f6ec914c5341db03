//! Name based function lookup for scripting hosts
//!
//! A conformance script calls generator functions as `http:randomBytes(42)`. The host
//! parses the call, resolves the name here and invokes the function with positional
//! [`Value`] arguments. The table is built once, on first use, and never changes.
//!
//! The extension builders are registered too. A stream extension takes its `typeId`
//! followed by name/value string pairs, so `http:beginEx(1, ":method", "GET")` yields the
//! encoded bytes. `routeEx` takes the number of header pairs first, then the header pairs
//! and after them the override pairs.
//!
//! # Example
//!
//! ```
//! use micro_http_spec::registry::{self, Value};
//!
//! let function = registry::resolve("http", "randomMethodNot").expect("function should be registered");
//! let method = function.call(&[Value::from("GET")]).unwrap();
//!
//! assert_ne!(method, Value::from("GET"));
//! ```

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use once_cell::sync::Lazy;
use tracing::warn;

use crate::error::FunctionError;
use crate::extension::{self, MAX_NAME_LEN, MAX_VALUE_LEN};
use crate::{copy_of_range, ensure, payload};

/// Namespace every function in this crate is registered under
pub const NAMESPACE: &str = "http";

/// An argument or result passed across the host boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
    Bytes(Bytes),
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Value::Bytes(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(value))
    }
}

/// How many positional arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// `fixed` leading arguments followed by any number of `group`-sized runs
    Repeated { fixed: usize, group: usize },
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::Repeated { fixed, group } => count >= fixed && (count - fixed) % group == 0,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{n}"),
            Arity::Repeated { fixed, group } => write!(f, "{fixed} plus a multiple of {group}"),
        }
    }
}

type FunctionFn = fn(&Args<'_>) -> Result<Value, FunctionError>;

/// A registered function: its host-visible name, arity and implementation.
#[derive(Clone, Copy)]
pub struct Function {
    name: &'static str,
    arity: Arity,
    call: FunctionFn,
}

impl Function {
    const fn new(name: &'static str, arity: usize, call: FunctionFn) -> Self {
        Self { name, arity: Arity::Exact(arity), call }
    }

    /// A function taking `fixed` leading arguments and then name/value string pairs.
    const fn with_pairs(name: &'static str, fixed: usize, call: FunctionFn) -> Self {
        Self { name, arity: Arity::Repeated { fixed, group: 2 }, call }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Invokes the function with positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::InvalidArgument`] if the argument count or an argument
    /// type does not match, and [`FunctionError::Precondition`] if the function rejects
    /// the argument values.
    pub fn call(&self, args: &[Value]) -> Result<Value, FunctionError> {
        ensure!(
            self.arity.accepts(args.len()),
            FunctionError::invalid_argument(
                args.len(),
                format!("{} takes {} arguments but {} were supplied", self.name, self.arity, args.len())
            )
        );

        (self.call)(&Args(args)).inspect_err(|e| warn!(function = self.name, cause = %e, "function invocation failed"))
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function").field("name", &self.name).field("arity", &self.arity).finish_non_exhaustive()
    }
}

/// Positional arguments with typed accessors.
struct Args<'a>(&'a [Value]);

impl Args<'_> {
    fn get(&self, index: usize) -> Result<&Value, FunctionError> {
        self.0.get(index).ok_or_else(|| FunctionError::invalid_argument(index, "missing argument"))
    }

    fn int(&self, index: usize) -> Result<i64, FunctionError> {
        match self.get(index)? {
            Value::Int(i) => Ok(*i),
            other => Err(FunctionError::invalid_argument(index, format!("expected integer, found {}", other.kind()))),
        }
    }

    /// An integer used as a length or offset, which must not be negative.
    fn size(&self, index: usize) -> Result<usize, FunctionError> {
        let value = self.int(index)?;
        usize::try_from(value)
            .map_err(|_negative| FunctionError::precondition(format!("argument {index} must not be negative, got {value}")))
    }

    fn str(&self, index: usize) -> Result<&str, FunctionError> {
        let value = self.get(index)?;
        value.as_str().ok_or_else(|| FunctionError::invalid_argument(index, format!("expected string, found {}", value.kind())))
    }

    fn bytes(&self, index: usize) -> Result<&Bytes, FunctionError> {
        let value = self.get(index)?;
        value.as_bytes().ok_or_else(|| FunctionError::invalid_argument(index, format!("expected bytes, found {}", value.kind())))
    }

    /// An integer carried as an extension's 32-bit type tag.
    fn type_id(&self, index: usize) -> Result<i32, FunctionError> {
        let value = self.int(index)?;
        i32::try_from(value)
            .map_err(|_overflow| FunctionError::precondition(format!("argument {index} is not a 32-bit type id, got {value}")))
    }

    /// The name/value string pairs from `from` to the last argument, checked against the
    /// wire limits so the builders never panic on host input.
    fn pairs(&self, from: usize) -> Result<Vec<(&str, &str)>, FunctionError> {
        (from..self.0.len())
            .step_by(2)
            .map(|index| {
                let (name, value) = (self.str(index)?, self.str(index + 1)?);
                ensure!(
                    name.len() <= MAX_NAME_LEN,
                    FunctionError::precondition(format!("argument {index} is {} bytes, the name limit is {MAX_NAME_LEN}", name.len()))
                );
                ensure!(
                    value.len() <= MAX_VALUE_LEN,
                    FunctionError::precondition(format!(
                        "argument {} is {} bytes, the value limit is {MAX_VALUE_LEN}",
                        index + 1,
                        value.len()
                    ))
                );
                Ok((name, value))
            })
            .collect()
    }
}

fn route_ex(args: &Args<'_>) -> Result<Value, FunctionError> {
    let header_count = args.size(0)?;
    let pairs = args.pairs(1)?;
    ensure!(
        header_count <= pairs.len(),
        FunctionError::precondition(format!("{header_count} header pairs requested but {} pairs supplied", pairs.len()))
    );

    let (headers, overrides) = pairs.split_at(header_count);
    let builder = headers.iter().fold(extension::route_ex(), |builder, &(name, value)| builder.header(name, value));
    let builder = overrides.iter().fold(builder, |builder, &(name, value)| builder.r#override(name, value));
    Ok(builder.build().into())
}

fn begin_ex(args: &Args<'_>) -> Result<Value, FunctionError> {
    let builder = extension::begin_ex().type_id(args.type_id(0)?);
    let builder = args.pairs(1)?.into_iter().fold(builder, |builder, (name, value)| builder.header(name, value));
    Ok(builder.build().into())
}

fn data_ex(args: &Args<'_>) -> Result<Value, FunctionError> {
    let builder = extension::data_ex().type_id(args.type_id(0)?);
    let builder = args.pairs(1)?.into_iter().fold(builder, |builder, (name, value)| builder.promise(name, value));
    Ok(builder.build().into())
}

fn end_ex(args: &Args<'_>) -> Result<Value, FunctionError> {
    let builder = extension::end_ex().type_id(args.type_id(0)?);
    let builder = args.pairs(1)?.into_iter().fold(builder, |builder, (name, value)| builder.trailer(name, value));
    Ok(builder.build().into())
}

fn challenge_ex(args: &Args<'_>) -> Result<Value, FunctionError> {
    let builder = extension::challenge_ex().type_id(args.type_id(0)?);
    let builder = args.pairs(1)?.into_iter().fold(builder, |builder, (name, value)| builder.header(name, value));
    Ok(builder.build().into())
}

static FUNCTIONS: Lazy<HashMap<&'static str, Function>> = Lazy::new(|| {
    let functions = [
        Function::new("randomBytes", 1, |args| Ok(payload::random_bytes(args.size(0)?).into())),
        Function::new("randomAscii", 1, |args| Ok(payload::random_ascii(args.size(0)?).into())),
        Function::new("randomBytesUTF8", 1, |args| Ok(payload::random_bytes_utf8(args.size(0)?).into())),
        Function::new("randomBytesUnalignedUTF8", 2, |args| {
            Ok(payload::random_bytes_unaligned_utf8(args.size(0)?, args.size(1)?)?.into())
        }),
        Function::new("randomBytesInvalidUTF8", 1, |args| Ok(payload::random_bytes_invalid_utf8(args.size(0)?)?.into())),
        Function::new("randomizeLetterCase", 1, |args| Ok(payload::randomize_letter_case(args.str(0)?).into())),
        Function::new("randomCaseNot", 1, |args| Ok(payload::random_case_not(args.str(0)?)?.into())),
        Function::new("randomMethodNot", 1, |args| Ok(payload::random_method_not(args.str(0)?).into())),
        Function::new("randomHeaderNot", 1, |args| Ok(payload::random_header_not(args.str(0)?).into())),
        Function::new("randomInvalidVersion", 0, |_args| Ok(payload::random_invalid_version().into())),
        Function::new("copyOfRange", 3, |args| Ok(copy_of_range(args.bytes(0)?, args.size(1)?, args.size(2)?)?.into())),
        Function::with_pairs("routeEx", 1, route_ex),
        Function::with_pairs("beginEx", 1, begin_ex),
        Function::with_pairs("dataEx", 1, data_ex),
        Function::with_pairs("endEx", 1, end_ex),
        Function::with_pairs("challengeEx", 1, challenge_ex),
    ];

    functions.into_iter().map(|function| (function.name, function)).collect()
});

/// Looks up a function by namespace and name.
pub fn resolve(namespace: &str, name: &str) -> Option<&'static Function> {
    if namespace != NAMESPACE {
        return None;
    }
    FUNCTIONS.get(name)
}

/// Resolves and invokes a function in one step.
///
/// # Errors
///
/// Returns [`FunctionError::UnknownFunction`] if nothing is registered under the name,
/// otherwise whatever [`Function::call`] returns.
pub fn invoke(namespace: &str, name: &str, args: &[Value]) -> Result<Value, FunctionError> {
    let function = resolve(namespace, name).ok_or_else(|| {
        warn!(namespace, name, "unknown function");
        FunctionError::unknown_function(namespace, name)
    })?;
    function.call(args)
}

/// Names of all registered functions, in no particular order.
pub fn function_names() -> impl Iterator<Item = &'static str> {
    FUNCTIONS.keys().copied()
}
