//! Credential validation.
//!
//! All checks run independently and every failure is reported, so a
//! sign-up with three bad fields gets three messages back. This is the
//! single source of truth for validation: the backend runs it on every
//! sign-up and the browser client calls the same functions through the
//! WASM module, so the two sides cannot drift apart.

use crate::types::{NewUser, SignUpRequest};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::Serialize;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]{9,}$").expect("phone pattern"));

/// Symbols a password may (and must, at least once) contain.
pub const PASSWORD_SYMBOLS: &[char] = &['#', '$', '%', '&', '*', '@'];

/// Minimum age to register.
pub const MIN_AGE_YEARS: i32 = 13;

/// A validation failure scoped to one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate email format. Expects an already trimmed, lowercased value.
pub fn validate_email(email: &str) -> Result<(), String> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err("El email no tiene un formato válido".to_string())
    }
}

/// Validate password complexity.
///
/// At least 8 characters, one uppercase letter, one digit and one symbol
/// from [`PASSWORD_SYMBOLS`]; no characters outside letters, digits and
/// that symbol set.
pub fn validate_password(password: &str) -> Result<(), String> {
    let long_enough = password.chars().count() >= 8;
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(&c));
    let charset_ok = password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(&c));

    if long_enough && has_upper && has_digit && has_symbol && charset_ok {
        Ok(())
    } else {
        Err(
            "La contraseña debe tener al menos 8 caracteres, 1 mayúscula, 1 dígito y 1 carácter especial (#$%&*@)"
                .to_string(),
        )
    }
}

/// Validate phone format: optional leading '+', then at least nine
/// digits/spaces/hyphens/parentheses.
pub fn validate_phone(phone: &str) -> Result<(), String> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err("El número de teléfono no es válido".to_string())
    }
}

/// Full years elapsed from `birthdate` to `today`. Subtracts one when the
/// birthday has not been reached yet this year.
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        age -= 1;
    }
    age
}

/// Validate minimum age. The 13th birthday itself is accepted.
pub fn validate_age(birthdate: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if age_on(birthdate, today) >= MIN_AGE_YEARS {
        Ok(())
    } else {
        Err("Debes tener al menos 13 años para registrarte".to_string())
    }
}

fn required(value: &Option<String>, field: &str, message: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => Some(v.to_string()),
        None => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Run every sign-up check and either produce validated [`NewUser`] data
/// or the complete list of failures.
pub fn validate_sign_up(req: &SignUpRequest, today: NaiveDate) -> Result<NewUser, Vec<FieldError>> {
    let mut errors = Vec::new();

    let email = required(&req.email, "email", "El email es requerido", &mut errors)
        .map(|e| e.to_lowercase());
    let password = required(&req.password, "password", "La contraseña es requerida", &mut errors);
    let name = required(&req.name, "name", "El nombre es requerido", &mut errors);
    let last_name = required(&req.last_name, "lastName", "El apellido es requerido", &mut errors);
    let phone_number = required(
        &req.phone_number,
        "phoneNumber",
        "El teléfono es requerido",
        &mut errors,
    );
    let birthdate_raw = required(
        &req.birthdate,
        "birthdate",
        "La fecha de nacimiento es requerida",
        &mut errors,
    );

    if let Some(email) = &email {
        if let Err(message) = validate_email(email) {
            errors.push(FieldError::new("email", message));
        }
    }
    if let Some(password) = &password {
        if let Err(message) = validate_password(password) {
            errors.push(FieldError::new("password", message));
        }
    }
    if let Some(phone) = &phone_number {
        if let Err(message) = validate_phone(phone) {
            errors.push(FieldError::new("phoneNumber", message));
        }
    }

    let birthdate = birthdate_raw.and_then(|raw| {
        match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => {
                if let Err(message) = validate_age(date, today) {
                    errors.push(FieldError::new("birthdate", message));
                }
                Some(date)
            }
            Err(_) => {
                errors.push(FieldError::new(
                    "birthdate",
                    "La fecha de nacimiento no es válida",
                ));
                None
            }
        }
    });

    if !errors.is_empty() {
        return Err(errors);
    }

    // All fields were checked above; errors is empty so every one is Some.
    Ok(NewUser {
        email: email.unwrap(),
        password: password.unwrap(),
        name: name.unwrap(),
        last_name: last_name.unwrap(),
        phone_number: phone_number.unwrap(),
        birthdate: birthdate.unwrap(),
        url_profile: optional(&req.url_profile),
        adress: optional(&req.adress),
    })
}
