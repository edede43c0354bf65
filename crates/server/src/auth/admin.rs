use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::config::AdminConfig;

#[derive(Debug, Deserialize)]
pub struct AdminLoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyAdminForm {
    pub admin_password: Option<String>,
}

/// Body of both login endpoints. A rejected login is still a 200.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoginResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn rejected(reason: &str) -> Self {
        Self {
            success: false,
            error: Some(reason.to_string()),
        }
    }
}

fn matches_secret(submitted: Option<&str>, expected: &str) -> bool {
    submitted.is_some_and(|submitted| bool::from(submitted.as_bytes().ct_eq(expected.as_bytes())))
}

impl AdminConfig {
    pub fn accepts_login(&self, email: Option<&str>, password: Option<&str>) -> bool {
        // both fields are always compared
        let email_matches = matches_secret(email, &self.email);
        let password_matches = matches_secret(password, &self.password);
        email_matches & password_matches
    }

    pub fn accepts_password(&self, password: Option<&str>) -> bool {
        matches_secret(password, &self.password)
    }
}
