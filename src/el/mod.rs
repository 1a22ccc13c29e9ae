//! The source expression language.
//!
//! Source expressions locate the value of a mapped property inside a source
//! object. The grammar is deliberately minimal - dotted property paths only:
//!
//! ```text
//! Expr := Identifier ('.' Identifier)*
//! ```
//!
//! [`parse`] turns an expression text into an [`Expression`] chain rooted at
//! argument 0 (the source object handed to the conversion constructor); each
//! `.Identifier` wraps the prior expression in a property lookup. Parsing is a
//! pure function of the input text: no side effects, deterministic, restartable.
//!
//! # Example
//!
//! ```rust
//! use dtoforge::el;
//! use dtoforge::value::{ObjectTable, Value};
//!
//! let expression = el::parse("address.street")?;
//! assert_eq!(expression.to_string(), "address.street");
//!
//! let address = ObjectTable::new("Address").with_value("getStreet", Value::from("Pine St"));
//! let person = ObjectTable::new("Person").with_value("getAddress", Value::object(address));
//!
//! let street = expression.evaluate(&Value::object(person))?;
//! assert_eq!(street, Value::from("Pine St"));
//! # Ok::<(), dtoforge::Error>(())
//! ```

mod parser;

pub use parser::parse;

use std::fmt;

use crate::access;
use crate::value::Value;
use crate::{Error, Result};

/// A lazily-evaluable property lookup chain.
///
/// The chain is either the identity of an argument (argument 0 is the source
/// object) or a property lookup applied to a sub-expression. Expressions are
/// immutable and shareable; evaluation never mutates the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// The n-th argument of the generated routine; only argument 0 (the source
    /// object) is addressable from expression text
    Argument(usize),
    /// A property lookup applied to the value of a sub-expression
    Property {
        /// The expression producing the receiver
        object: Box<Expression>,
        /// The property evaluated on the receiver
        name: String,
    },
}

impl Expression {
    /// The source-object root every parsed expression is built on.
    #[must_use]
    pub fn argument(index: usize) -> Self {
        Expression::Argument(index)
    }

    /// Wrap `self` in a property lookup.
    #[must_use]
    pub fn property(self, name: impl Into<String>) -> Self {
        Expression::Property {
            object: Box::new(self),
            name: name.into(),
        }
    }

    /// Evaluate the chain against a source object.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::PropertyAccess`] from each hop; referencing an
    /// argument other than 0 is an [`Error::IllegalArgument`].
    pub fn evaluate(&self, source: &Value) -> Result<Value> {
        match self {
            Expression::Argument(0) => Ok(source.clone()),
            Expression::Argument(index) => Err(Error::IllegalArgument(format!(
                "Argument {index} is not addressable from an expression"
            ))),
            Expression::Property { object, name } => {
                let receiver = object.evaluate(source)?;
                access::get_property(&receiver, name)
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Argument(index) => write!(f, "${index}"),
            Expression::Property { object, name } => match **object {
                Expression::Argument(_) => write!(f, "{name}"),
                _ => write!(f, "{object}.{name}"),
            },
        }
    }
}
