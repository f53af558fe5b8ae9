// 📐 Validation Layer - Record rules and registry errors
// Every save collects ALL broken rules before failing, so callers see the full picture

use thiserror::Error;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub entity: String,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(entity: &str, field: &str, message: impl Into<String>) -> Self {
        ValidationError {
            entity: entity.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.entity, self.field, self.message)
    }
}

/// All rule violations found while cleaning one record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entity: String,
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new(entity: &str) -> Self {
        ValidationErrors {
            entity: entity.to_string(),
            errors: Vec::new(),
        }
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .push(ValidationError::new(&self.entity, field, message));
    }

    /// Record an error for `field` when `value` is blank
    pub fn require_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "Required field is empty");
        }
    }

    /// Record an error for `field` when `value` is longer than `max` characters
    pub fn max_len(&mut self, field: &str, value: &str, max: usize) {
        let len = value.chars().count();
        if len > max {
            self.add(
                field,
                format!("Must be at most {} characters, got {}", max, len),
            );
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Ok when nothing was recorded, otherwise the collected errors
    pub fn finish(self) -> Result<(), RegistryError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::Validation(self))
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

// ============================================================================
// REGISTRY ERROR
// ============================================================================

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("duplicate {entity}: {detail}")]
    Duplicate { entity: &'static str, detail: String },

    #[error("{entity} references a missing record: {detail}")]
    MissingReference { entity: &'static str, detail: String },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RegistryError {
    /// Validation errors carried by this error, if it is a validation failure
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            RegistryError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Translate SQLite constraint failures into registry errors for `entity`
    pub(crate) fn from_write(entity: &'static str, err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(ref failure, ref message) = err {
            let detail = message.clone().unwrap_or_else(|| failure.to_string());
            match failure.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return RegistryError::Duplicate { entity, detail };
                }
                rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                    return RegistryError::MissingReference { entity, detail };
                }
                _ => {}
            }
        }
        RegistryError::Storage(err)
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;

// ============================================================================
// TESTS
// ============================================================================
