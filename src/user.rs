//! The users that submit expenses, used to label and filter expenses by submitter.

use std::{fmt::Display, path::Path};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from expense IDs, leading to better compile time
/// errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The name shown for expenses whose submitter is not in the user list.
pub const UNKNOWN_USER_LABEL: &str = "Unknown";

/// A member of the company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The user's ID.
    pub id: UserID,
    /// The user's full name, if they provided one.
    #[serde(default)]
    pub name: Option<String>,
    /// The user's email address.
    pub email: String,
}

impl UserRecord {
    /// The user's name, falling back to their email address.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

/// Get the display name of the user with `user_id`, or [UNKNOWN_USER_LABEL]
/// if `users` does not contain them.
pub fn user_display_name(users: &[UserRecord], user_id: UserID) -> &str {
    users
        .iter()
        .find(|user| user.id == user_id)
        .map(UserRecord::display_name)
        .unwrap_or(UNKNOWN_USER_LABEL)
}

/// Parse a JSON array of users.
///
/// # Errors
/// Returns [Error::InvalidUsersJSON] if `text` is not a JSON array of users.
pub fn parse_users_json(text: &str) -> Result<Vec<UserRecord>, Error> {
    serde_json::from_str(text).map_err(|error| Error::InvalidUsersJSON(error.to_string()))
}

/// Read and parse the JSON user list at `path`.
///
/// # Errors
/// Returns [Error::ReadError] if the file cannot be read, or
/// [Error::InvalidUsersJSON] if its contents are not a JSON array of users.
pub fn load_users(path: &Path) -> Result<Vec<UserRecord>, Error> {
    let text = std::fs::read_to_string(path)
        .map_err(|error| Error::ReadError(path.display().to_string(), error.to_string()))?;

    let users = parse_users_json(&text)?;
    tracing::debug!("Loaded {} users from {}", users.len(), path.display());

    Ok(users)
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{UNKNOWN_USER_LABEL, UserID, UserRecord, parse_users_json, user_display_name};

    fn user(id: i64, name: Option<&str>, email: &str) -> UserRecord {
        UserRecord {
            id: UserID::new(id),
            name: name.map(str::to_owned),
            email: email.to_owned(),
        }
    }

    #[test]
    fn display_name_prefers_name() {
        assert_eq!(user(1, Some("Ada"), "ada@example.com").display_name(), "Ada");
    }

    #[test]
    fn display_name_falls_back_to_email() {
        assert_eq!(
            user(1, None, "ada@example.com").display_name(),
            "ada@example.com"
        );
        assert_eq!(
            user(1, Some("  "), "ada@example.com").display_name(),
            "ada@example.com"
        );
    }

    #[test]
    fn missing_user_is_unknown() {
        let users = vec![user(1, Some("Ada"), "ada@example.com")];

        assert_eq!(user_display_name(&users, UserID::new(1)), "Ada");
        assert_eq!(user_display_name(&users, UserID::new(2)), UNKNOWN_USER_LABEL);
    }

    #[test]
    fn parses_user_list() {
        let text = r#"[
            {"id": 1, "name": "Ada", "email": "ada@example.com"},
            {"id": 2, "email": "bob@example.com"}
        ]"#;

        let users = parse_users_json(text).unwrap();

        assert_eq!(
            users,
            vec![
                user(1, Some("Ada"), "ada@example.com"),
                user(2, None, "bob@example.com")
            ]
        );
    }

    #[test]
    fn rejects_malformed_json() {
        let result = parse_users_json(r#"{"id": 1}"#);

        assert!(matches!(result, Err(Error::InvalidUsersJSON(_))));
    }
}
