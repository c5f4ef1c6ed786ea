use crate::token::TokenKind;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use strum_macros::{Display, EnumString};

/// The type tag written in a declaration, e.g. the `int` in `var x int = 5;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum TypeTag {
    #[strum(serialize = "int")]
    Int,
    #[strum(serialize = "float")]
    Float,
    #[strum(serialize = "string")]
    String,
    #[strum(serialize = "bool")]
    Bool,
    #[strum(serialize = "list")]
    List,
    #[strum(serialize = "dict")]
    Dict,
}

impl TypeTag {
    /// The literal category a declaration of this type must be given.
    /// `None` for types without a literal form.
    pub fn literal_kind(self) -> Option<TokenKind> {
        match self {
            TypeTag::Int => Some(TokenKind::Number),
            TypeTag::Float => Some(TokenKind::Float),
            TypeTag::String => Some(TokenKind::String),
            TypeTag::Bool => Some(TokenKind::Bool),
            TypeTag::List | TypeTag::Dict => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(x) => write!(f, "{}", x),
            Value::Float(x) => {
                if x.is_finite() && x.fract() == 0.0 {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
            Value::Text(x) => write!(f, "{}", x),
            Value::Boolean(x) => write!(f, "{}", x),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: ", key)?;
                    value.fmt_nested(f)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Value {
    /// Converts a literal lexeme into a value of the given type.
    /// Returns `None` when the text does not fit the type.
    pub fn from_literal(type_tag: TypeTag, lexeme: &str) -> Option<Value> {
        match type_tag {
            TypeTag::Int => lexeme.parse().ok().map(Value::Integer),
            TypeTag::Float => lexeme.parse().ok().map(Value::Float),
            TypeTag::String => Some(Value::Text(lexeme.to_string())),
            TypeTag::Bool => match lexeme {
                "true" => Some(Value::Boolean(true)),
                "false" => Some(Value::Boolean(false)),
                _ => None,
            },
            TypeTag::List | TypeTag::Dict => None,
        }
    }

    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Integer(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::Text(_) => TypeTag::String,
            Value::Boolean(_) => TypeTag::Bool,
            Value::List(_) => TypeTag::List,
            Value::Map(_) => TypeTag::Dict,
        }
    }

    /// Ordering between two values, if they have one. Numbers order among
    /// themselves regardless of int/float, text orders against text.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Integer(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(x) => write!(f, "{:?}", x),
            _ => write!(f, "{}", self),
        }
    }
}

#[cfg(test)]
mod value_tests {
    use crate::value::{TypeTag, Value};
    use std::cmp::Ordering;
    use std::collections::BTreeMap;
    use std::str::FromStr;

    #[test]
    fn literals_convert_per_tag() {
        assert_eq!(Value::from_literal(TypeTag::Int, "45"), Some(Value::Integer(45)));
        assert_eq!(Value::from_literal(TypeTag::Float, "2.5"), Some(Value::Float(2.5)));
        assert_eq!(
            Value::from_literal(TypeTag::String, "hi there"),
            Some(Value::Text("hi there".to_string()))
        );
        assert_eq!(Value::from_literal(TypeTag::Bool, "false"), Some(Value::Boolean(false)));
        assert_eq!(Value::from_literal(TypeTag::Int, "abc"), None);
        assert_eq!(Value::from_literal(TypeTag::Int, "99999999999999999999"), None);
        assert_eq!(Value::from_literal(TypeTag::List, "[]"), None);
    }

    #[test]
    fn type_tags_parse_from_source_names() {
        assert_eq!(TypeTag::from_str("dict").unwrap(), TypeTag::Dict);
        assert_eq!(TypeTag::Int.to_string(), "int");
        assert!(TypeTag::from_str("integer").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Value::Integer(-3).to_string(), "-3");
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Float(2.25).to_string(), "2.25");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Text("a b".to_string()).to_string(), "a b");
        let list = Value::List(vec![Value::Integer(1), Value::Text("two".to_string())]);
        assert_eq!(list.to_string(), "[1, \"two\"]");
        let mut entries = BTreeMap::new();
        entries.insert("k".to_string(), Value::Float(1.5));
        entries.insert("a".to_string(), Value::Boolean(false));
        assert_eq!(Value::Map(entries).to_string(), "{\"a\": false, \"k\": 1.5}");
    }

    #[test]
    fn numeric_comparison_mixes_int_and_float() {
        assert_eq!(
            Value::Integer(3).compare(&Value::Float(3.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::Float(10.0).compare(&Value::Integer(10)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Value::Text("b".to_string()).compare(&Value::Text("a".to_string())),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn mismatched_tags_do_not_compare() {
        assert_eq!(Value::Text("1".to_string()).compare(&Value::Integer(1)), None);
        assert_eq!(Value::Boolean(true).compare(&Value::Boolean(false)), None);
        assert_eq!(Value::List(vec![]).compare(&Value::List(vec![])), None);
    }
}
