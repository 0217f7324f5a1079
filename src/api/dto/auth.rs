/*
 * Responsibility
 * - /auth 系の request DTO
 * - 未知のフィールドは拒否 (deny_unknown_fields)
 * - validate() で形式チェック → 通過したものだけ TokenService に渡す
 */
use chrono::NaiveDate;
use serde::Deserialize;
use validator::ValidateEmail;

use crate::api::extractors::Validate;
use crate::services::auth::Registration;

const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 30;
const NAME_MAX: usize = 10;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), &'static str> {
        if !self.email.validate_email() {
            return Err("email is not a valid address");
        }
        if self.password.is_empty() {
            return Err("password is required");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub nick_name: String,
    // calendar date only (YYYY-MM-DD); a full ISO-8601 datetime is rejected
    pub birth: NaiveDate,
}

impl Validate for SignupRequest {
    fn validate(&self) -> Result<(), &'static str> {
        if !self.email.validate_email() {
            return Err("email is not a valid address");
        }
        let password_len = self.password.chars().count();
        if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&password_len) {
            return Err("password must be 8 to 30 characters");
        }
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.name.chars().count() > NAME_MAX {
            return Err("name must be <= 10 chars");
        }
        if self.nick_name.trim().is_empty() {
            return Err("nickName is required");
        }
        if self.nick_name.chars().count() > NAME_MAX {
            return Err("nickName must be <= 10 chars");
        }

        Ok(())
    }
}

impl SignupRequest {
    pub fn into_registration(self) -> Registration {
        Registration {
            email: self.email,
            password: self.password,
            name: self.name,
            nick_name: self.nick_name,
            birth: self.birth,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

impl Validate for RefreshRequest {
    fn validate(&self) -> Result<(), &'static str> {
        if self.refresh_token.trim().is_empty() {
            return Err("refreshToken is required");
        }

        Ok(())
    }
}
