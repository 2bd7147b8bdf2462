use crate::ds::error::{OopError, OopResult};
use crate::ds::value::Value;

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";

pub fn get_type(a: &Value) -> &'static str {
    match a {
        Value::Undefined => TYPE_STR_UNDEFINED,
        Value::Null => TYPE_STR_NULL,
        Value::Boolean(_) => TYPE_STR_BOOLEAN,
        Value::String(_) => TYPE_STR_STRING,
        Value::Number(_) => TYPE_STR_NUMBER,
        Value::Object(_) => TYPE_STR_OBJECT,
        Value::Function(_) => TYPE_STR_FUNCTION,
    }
}

pub fn to_boolean(v: &Value) -> bool {
    match v {
        Value::Undefined | Value::Null => false,
        Value::Boolean(b) => *b,
        Value::Number(n) => !(n.is_nan() || *n == 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Object(_) | Value::Function(_) => true,
    }
}

/// Largest magnitude below which every integral `f64` is exact.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        // covers -0 as well
        format!("{}", n as i64)
    } else if n.fract() == 0.0 {
        // `as i64` saturates past this range
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

/// String form of a primitive. Objects and functions have no stable string
/// form here and are rejected.
pub fn to_string(v: &Value) -> OopResult<String> {
    match v {
        Value::Undefined => Ok(TYPE_STR_UNDEFINED.to_string()),
        Value::Null => Ok(TYPE_STR_NULL.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(number_to_string(*n)),
        Value::String(s) => Ok(s.clone()),
        Value::Object(_) | Value::Function(_) => Err(OopError::InvalidArgument(format!(
            "'{}' cannot be converted to string",
            v
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_boolean() {
        assert!(!to_boolean(&Value::Undefined));
        assert!(!to_boolean(&Value::Null));
        assert!(!to_boolean(&Value::Number(0.0)));
        assert!(!to_boolean(&Value::Number(f64::NAN)));
        assert!(!to_boolean(&Value::from("")));
        assert!(to_boolean(&Value::from("x")));
        assert!(to_boolean(&Value::Number(-1.0)));
    }

    #[test]
    fn test_number_to_string() {
        assert_eq!(number_to_string(3.0), "3");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(1.5), "1.5");
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(1e19), "10000000000000000000");
        assert_eq!(number_to_string(2e19), "20000000000000000000");
        assert_eq!(number_to_string(-1e19), "-10000000000000000000");
    }

    #[test]
    fn test_to_string_primitives() {
        assert_eq!(to_string(&Value::from(true)).unwrap(), "true");
        assert_eq!(to_string(&Value::Null).unwrap(), "null");
        assert_eq!(to_string(&Value::from("a")).unwrap(), "a");
        assert_eq!(to_string(&Value::from(42)).unwrap(), "42");
    }
}
