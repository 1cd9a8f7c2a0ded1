use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use usermgmt_core::{DomainError, DomainResult, Entity};

/// Accepted email shape: something, an `@`, something, a dot, something.
/// No whitespace and exactly one `@`.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

/// A registered user.
///
/// `user_name` is the natural key and never changes once the record exists;
/// `age` and `email` may be replaced by an update.
///
/// Fields absent from an incoming payload decode to their empty value so that
/// [`validate_user`] reports them, rather than the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub user_name: String,
    pub age: i32,
    pub email: String,
}

impl User {
    pub fn new(user_name: impl Into<String>, age: i32, email: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            age,
            email: email.into(),
        }
    }

    /// Copy the mutable fields of `changes` onto this record.
    ///
    /// The user name is left untouched whatever `changes` carries.
    pub fn apply_update(&mut self, changes: &User) {
        self.age = changes.age;
        self.email = changes.email.clone();
    }
}

impl Entity for User {
    type Id = String;

    fn id(&self) -> &String {
        &self.user_name
    }

    fn kind() -> &'static str {
        "user"
    }
}

impl core::fmt::Display for User {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "UserName: {}, Age: {}, Email: {}", self.user_name, self.age, self.email)
    }
}

/// Validate a candidate user against the users it must not collide with.
///
/// `existing` must already exclude the record being updated, if any. Rules are
/// checked in order and the first failure wins:
/// 1. name and email present, age positive (validation)
/// 2. email well-formed (validation)
/// 3. name not taken (conflict)
/// 4. email not taken (conflict)
pub fn validate_user(candidate: &User, existing: &[User]) -> DomainResult<()> {
    if candidate.user_name.trim().is_empty()
        || candidate.age <= 0
        || candidate.email.trim().is_empty()
    {
        return Err(DomainError::validation(
            "Invalid user data. Ensure UserName, Age, and Email are provided and valid.",
        ));
    }

    if !EMAIL_PATTERN.is_match(&candidate.email) {
        return Err(DomainError::validation("Please provide a valid email address."));
    }

    if existing.iter().any(|u| u.user_name == candidate.user_name) {
        return Err(DomainError::conflict(format!(
            "A user with the username '{}' already exists.",
            candidate.user_name
        )));
    }

    if existing.iter().any(|u| u.email == candidate.email) {
        return Err(DomainError::conflict(format!(
            "A user with the email '{}' already exists.",
            candidate.email
        )));
    }

    Ok(())
}
