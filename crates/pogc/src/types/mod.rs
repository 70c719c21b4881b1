//! The static type model
//!
//! Types are a closed set and equality is purely structural and exact: there
//! is no implicit widening or coercion anywhere in the language, so `int` and
//! `float` are never interchangeable even though both are numeric.

use std::fmt;

/// A Pogscript type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Float,
    String,
    Boolean,
    Char,
    Void,
    /// Array type; equal to another array type iff the element types are equal
    Array(Box<Type>),
    /// Function type; equal iff param sequences and return types are equal
    Function {
        params: Vec<Type>,
        returns: Box<Type>,
    },
}

impl Type {
    pub fn array(element: Type) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn function(params: Vec<Type>, returns: Type) -> Self {
        Self::Function {
            params,
            returns: Box::new(returns),
        }
    }

    /// Assignability is identical to structural equality: the language has
    /// no subtyping and no implicit conversion.
    pub fn is_assignable_to(&self, target: &Type) -> bool {
        self == target
    }

    /// `int` or `float`
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    /// `int`, `float`, or `string` (the `+` and comparison operand category)
    pub fn is_numeric_or_string(&self) -> bool {
        matches!(self, Type::Int | Type::Float | Type::String)
    }
}

impl fmt::Display for Type {
    /// Canonical display form used in diagnostics: `[int]` for arrays,
    /// `(int,boolean)->int` for functions.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::String => write!(f, "string"),
            Type::Boolean => write!(f, "boolean"),
            Type::Char => write!(f, "char"),
            Type::Void => write!(f, "void"),
            Type::Array(element) => write!(f, "[{element}]"),
            Type::Function { params, returns } => {
                write!(f, "(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ")->{returns}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_forms() {
        assert_eq!(Type::Int.to_string(), "int");
        assert_eq!(Type::array(Type::Int).to_string(), "[int]");
        assert_eq!(
            Type::array(Type::array(Type::Boolean)).to_string(),
            "[[boolean]]"
        );
        assert_eq!(
            Type::function(vec![Type::Int, Type::Boolean], Type::Int).to_string(),
            "(int,boolean)->int"
        );
        assert_eq!(Type::function(vec![], Type::Void).to_string(), "()->void");
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Type::array(Type::Int), Type::array(Type::Int));
        assert_ne!(Type::array(Type::Int), Type::array(Type::Float));
        assert_eq!(
            Type::function(vec![Type::Float], Type::Float),
            Type::function(vec![Type::Float], Type::Float)
        );
        // Same shape, different parameter type
        assert_ne!(
            Type::function(vec![Type::Int], Type::Int),
            Type::function(vec![Type::Boolean], Type::Int)
        );
        // Same parameters, different return type
        assert_ne!(
            Type::function(vec![Type::Int], Type::Int),
            Type::function(vec![Type::Int], Type::Boolean)
        );
    }

    #[test]
    fn test_no_numeric_widening() {
        assert_ne!(Type::Int, Type::Float);
        assert!(!Type::Int.is_assignable_to(&Type::Float));
        assert!(!Type::Float.is_assignable_to(&Type::Int));
    }

    #[test]
    fn test_categories() {
        assert!(Type::Int.is_numeric());
        assert!(Type::Float.is_numeric());
        assert!(!Type::String.is_numeric());
        assert!(Type::String.is_numeric_or_string());
        assert!(!Type::Boolean.is_numeric_or_string());
        assert!(!Type::array(Type::Int).is_numeric());
    }
}
