use serde::{Deserialize, Serialize};

use super::FieldErrors;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned by both register and login: the account identity plus a fresh
/// session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserDto {
    pub username: String,
    pub email: String,
    pub token: String,
}

const MIN_PASSWORD_LENGTH: usize = 12;

impl RegisterRequest {
    /// Password policy: digit + lowercase + uppercase + non-alphanumeric,
    /// minimum length 12.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.username.trim().is_empty() {
            errors.insert("username".to_string(), "username is required".to_string());
        }

        if !self.email.contains('@')
            || self.email.split('@').filter(|part| !part.is_empty()).count() != 2
        {
            errors.insert("email".to_string(), "email is not a valid address".to_string());
        }

        let password = &self.password;
        if password.len() < MIN_PASSWORD_LENGTH {
            errors.insert(
                "password".to_string(),
                format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
            );
        } else if !password.chars().any(|c| c.is_ascii_digit())
            || !password.chars().any(|c| c.is_lowercase())
            || !password.chars().any(|c| c.is_uppercase())
            || password.chars().all(|c| c.is_alphanumeric())
        {
            errors.insert(
                "password".to_string(),
                "password must contain a digit, a lowercase letter, an uppercase letter, and a symbol"
                    .to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.username.trim().is_empty() {
            errors.insert("username".to_string(), "username is required".to_string());
        }
        if self.password.is_empty() {
            errors.insert("password".to_string(), "password is required".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(password: &str) -> RegisterRequest {
        RegisterRequest {
            username: "trader1".to_string(),
            email: "trader1@example.com".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_policy_compliant_password() {
        assert!(register("Str0ng!Enough").validate().is_ok());
    }

    #[test]
    fn rejects_short_password() {
        let errors = register("Ab1!short").validate().unwrap_err();
        assert!(errors.contains_key("password"));
    }

    #[test]
    fn rejects_password_without_symbol() {
        let errors = register("NoSymbolHere123").validate().unwrap_err();
        assert!(errors.contains_key("password"));
    }

    #[test]
    fn rejects_password_without_uppercase() {
        let errors = register("no_uppercase_1!").validate().unwrap_err();
        assert!(errors.contains_key("password"));
    }

    #[test]
    fn rejects_malformed_email() {
        let mut dto = register("Str0ng!Enough");
        dto.email = "not-an-email".to_string();
        assert!(dto.validate().unwrap_err().contains_key("email"));
    }
}
