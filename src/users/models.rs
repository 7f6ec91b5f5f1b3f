//! User data models

use sqlx::FromRow;

/// User database model
///
/// Deliberately not `Serialize`: the password hash must never reach a response.
#[derive(FromRow, Debug, Clone)]
pub struct User {
    pub id: i64,
    pub phone_number: String,
    pub full_name: String,
    pub password_hash: String,
    pub successful_logins: i64,
}

/// Values needed to insert a user; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub phone_number: String,
    pub full_name: String,
    pub password_hash: String,
}

/// A single updatable profile field and its new value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileField {
    PhoneNumber(String),
    FullName(String),
}

impl ProfileField {
    pub fn column(&self) -> &'static str {
        match self {
            ProfileField::PhoneNumber(_) => "phone_number",
            ProfileField::FullName(_) => "full_name",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            ProfileField::PhoneNumber(v) | ProfileField::FullName(v) => v,
        }
    }
}

/// A partial profile update. Always carries at least one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    fields: Vec<ProfileField>,
}

impl ProfileUpdate {
    /// Builds an update from optional inputs. Absent and empty values are
    /// skipped; returns `None` when nothing is left to change.
    pub fn from_optional(phone_number: Option<&str>, full_name: Option<&str>) -> Option<Self> {
        let mut fields = Vec::with_capacity(2);

        if let Some(phone) = phone_number.filter(|p| !p.is_empty()) {
            fields.push(ProfileField::PhoneNumber(phone.to_string()));
        }
        if let Some(name) = full_name.filter(|n| !n.is_empty()) {
            fields.push(ProfileField::FullName(name.to_string()));
        }

        if fields.is_empty() {
            None
        } else {
            Some(Self { fields })
        }
    }

    pub fn fields(&self) -> &[ProfileField] {
        &self.fields
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.fields.iter().find_map(|f| match f {
            ProfileField::PhoneNumber(v) => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn full_name(&self) -> Option<&str> {
        self.fields.iter().find_map(|f| match f {
            ProfileField::FullName(v) => Some(v.as_str()),
            _ => None,
        })
    }
}
