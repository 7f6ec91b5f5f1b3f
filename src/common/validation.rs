// Common validation types and traits

/// A single rule violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// Every violation found by one validation pass, in rule order
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Offending field names in rule order
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self.errors.iter().map(|e| e.field.as_str()).collect();
        fields.dedup();
        fields
    }
}

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationResult;
}
