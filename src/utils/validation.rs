use crate::utils::error::{CodecError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    MissingRequiredField,
    InvalidValue,
    MissingDefaultCurrency,
    MalformedEntry,
    DuplicateCurrency,
}

/// A single failed constraint, addressed by the property path of the offending value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    pub property_path: String,
    pub message: String,
    pub kind: ViolationKind,
}

impl ConstraintViolation {
    pub fn new(
        property_path: impl Into<String>,
        message: impl Into<String>,
        kind: ViolationKind,
    ) -> Self {
        Self {
            property_path: property_path.into(),
            message: message.into(),
            kind,
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property_path, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViolationList {
    violations: Vec<ConstraintViolation>,
}

impl ViolationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: ConstraintViolation) {
        self.violations.push(violation);
    }

    pub fn add(&mut self, path: &PropertyPath, message: impl Into<String>, kind: ViolationKind) {
        self.push(ConstraintViolation::new(path.to_string(), message, kind));
    }

    pub fn get(&self, index: usize) -> Option<&ConstraintViolation> {
        self.violations.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConstraintViolation> {
        self.violations.iter()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Turns a non-empty list into the aggregate validation error.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CodecError::Violations(self))
        }
    }
}

impl fmt::Display for ViolationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl<'a> IntoIterator for &'a ViolationList {
    type Item = &'a ConstraintViolation;
    type IntoIter = std::slice::Iter<'a, ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// `/price/0/net`
    #[default]
    Pointer,
    /// `price.0.net`
    Dotted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    style: PathStyle,
    segments: Vec<String>,
}

impl PropertyPath {
    pub fn new(root: &str, style: PathStyle) -> Self {
        let segments = root
            .split(['/', '.'])
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self { style, segments }
    }

    pub fn child(&self, segment: impl fmt::Display) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self {
            style: self.style,
            segments,
        }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            PathStyle::Pointer => write!(f, "/{}", self.segments.join("/")),
            PathStyle::Dotted => write!(f, "{}", self.segments.join(".")),
        }
    }
}

/// Currency ids are 32 lower-case hex characters without dashes.
pub fn is_valid_currency_id(value: &str) -> bool {
    value.len() == 32 && value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

pub fn validate_currency_id(field_name: &str, value: &str) -> Result<()> {
    if !is_valid_currency_id(value) {
        return Err(CodecError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Currency id must be 32 lower-case hex characters".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CodecError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CodecError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
