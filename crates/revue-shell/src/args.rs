//! Launch arguments: a typed key-value bundle handed to screens and fragments.

use revue_core::collections::map::HashMap;

/// One typed argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ArgValue {
    fn kind(&self) -> &'static str {
        match self {
            ArgValue::Bool(_) => "bool",
            ArgValue::Int(_) => "int",
            ArgValue::Float(_) => "float",
            ArgValue::Text(_) => "text",
        }
    }
}

/// Errors from typed argument extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgError {
    Missing { key: String },
    TypeMismatch { key: String, expected: &'static str, found: &'static str },
}

impl std::fmt::Display for ArgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgError::Missing { key } => write!(f, "argument {key:?} missing"),
            ArgError::TypeMismatch { key, expected, found } => {
                write!(f, "argument {key:?} type mismatch; expected {expected}, found {found}")
            }
        }
    }
}

impl std::error::Error for ArgError {}

/// String-keyed argument bundle.
///
/// Screens receive one at launch, fragments at attach. The `get_*` accessors
/// answer "is it there" questions with `Option`; the `require_*` accessors
/// are for arguments a screen cannot launch without and surface what went
/// wrong as an [`ArgError`].
///
/// # Example
///
/// ```rust,ignore
/// let args = Bundle::new()
///     .with_text("title", "Friends")
///     .with_int("page", 1);
/// let title = args.require_text("title")?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    values: HashMap<String, ArgValue>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ArgValue) {
        self.values.insert(key.into(), value);
    }

    pub fn with_bool(mut self, key: impl Into<String>, value: bool) -> Self {
        self.insert(key, ArgValue::Bool(value));
        self
    }

    pub fn with_int(mut self, key: impl Into<String>, value: i64) -> Self {
        self.insert(key, ArgValue::Int(value));
        self
    }

    pub fn with_float(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, ArgValue::Float(value));
        self
    }

    pub fn with_text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, ArgValue::Text(value.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(ArgValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(ArgValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.values.get(key) {
            Some(ArgValue::Float(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(ArgValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    fn require(&self, key: &str) -> Result<&ArgValue, ArgError> {
        self.values.get(key).ok_or_else(|| ArgError::Missing {
            key: key.to_string(),
        })
    }

    pub fn require_bool(&self, key: &str) -> Result<bool, ArgError> {
        match self.require(key)? {
            ArgValue::Bool(value) => Ok(*value),
            other => Err(self.mismatch(key, "bool", other)),
        }
    }

    pub fn require_int(&self, key: &str) -> Result<i64, ArgError> {
        match self.require(key)? {
            ArgValue::Int(value) => Ok(*value),
            other => Err(self.mismatch(key, "int", other)),
        }
    }

    pub fn require_float(&self, key: &str) -> Result<f64, ArgError> {
        match self.require(key)? {
            ArgValue::Float(value) => Ok(*value),
            other => Err(self.mismatch(key, "float", other)),
        }
    }

    pub fn require_text(&self, key: &str) -> Result<&str, ArgError> {
        match self.require(key)? {
            ArgValue::Text(value) => Ok(value.as_str()),
            other => Err(self.mismatch(key, "text", other)),
        }
    }

    fn mismatch(&self, key: &str, expected: &'static str, found: &ArgValue) -> ArgError {
        ArgError::TypeMismatch {
            key: key.to_string(),
            expected,
            found: found.kind(),
        }
    }
}
