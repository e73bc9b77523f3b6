//! Request input validation.
//!
//! Every function returns a [`CoreError::Validation`] carrying the public
//! Portuguese message for the offending field, with `key` set to the field
//! name and the shared `MODEL:VALIDATOR:FINAL_SCHEMA` location code.

use std::sync::LazyLock;

use regex::Regex;

use crate::content::ListStrategy;
use crate::error::{CoreError, ErrorDetails};

/// Location code shared by all schema-level validation failures.
pub const VALIDATOR_LOCATION_CODE: &str = "MODEL:VALIDATOR:FINAL_SCHEMA";

/// Default `action` for validation errors.
pub const VALIDATOR_ACTION: &str = "Ajuste os dados enviados e tente novamente.";

pub const MAX_USERNAME_LENGTH: usize = 30;
pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_BODY_LENGTH: usize = 20_000;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 72;
pub const MAX_PER_PAGE: u32 = 100;
pub const DEFAULT_PER_PAGE: u32 = 30;

static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("valid username regex"));

static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9](?:-?[a-z0-9])*$").expect("valid slug regex"));

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static SOURCE_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s]+$").expect("valid source_url regex"));

fn validation_error(message: impl Into<String>, key: &str) -> CoreError {
    CoreError::Validation(
        ErrorDetails::new(message, VALIDATOR_ACTION, VALIDATOR_LOCATION_CODE).with_key(key),
    )
}

pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.is_empty() {
        return Err(validation_error(
            r#""username" é um campo obrigatório."#,
            "username",
        ));
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(validation_error(
            r#""username" deve conter no máximo 30 caracteres."#,
            "username",
        ));
    }
    if !USERNAME_REGEX.is_match(username) {
        return Err(validation_error(
            r#""username" deve conter apenas caracteres alfanuméricos."#,
            "username",
        ));
    }
    Ok(())
}

pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(validation_error(r#""slug" é um campo obrigatório."#, "slug"));
    }
    if slug.len() > crate::slug::MAX_SLUG_LENGTH || !SLUG_REGEX.is_match(slug) {
        return Err(validation_error(
            r#""slug" está no formato errado."#,
            "slug",
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !EMAIL_REGEX.is_match(email) {
        return Err(validation_error(
            r#""email" deve conter um email válido."#,
            "email",
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(validation_error(
            r#""password" deve conter no mínimo 8 caracteres."#,
            "password",
        ));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(validation_error(
            r#""password" deve conter no máximo 72 caracteres."#,
            "password",
        ));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(validation_error(
            r#""title" não pode estar em branco."#,
            "title",
        ));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(validation_error(
            r#""title" deve conter no máximo 255 caracteres."#,
            "title",
        ));
    }
    Ok(())
}

pub fn validate_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(validation_error(
            r#""body" não pode estar em branco."#,
            "body",
        ));
    }
    if body.chars().count() > MAX_BODY_LENGTH {
        return Err(validation_error(
            r#""body" deve conter no máximo 20000 caracteres."#,
            "body",
        ));
    }
    Ok(())
}

pub fn validate_source_url(source_url: &str) -> Result<(), CoreError> {
    if !SOURCE_URL_REGEX.is_match(source_url) {
        return Err(validation_error(
            r#""source_url" deve possuir uma URL válida e utilizando os protocolos HTTP ou HTTPS."#,
            "source_url",
        ));
    }
    Ok(())
}

/// Parse the `strategy` query parameter, defaulting to `relevant`.
pub fn parse_strategy(raw: Option<&str>) -> Result<ListStrategy, CoreError> {
    match raw {
        None => Ok(ListStrategy::Relevant),
        Some("relevant") => Ok(ListStrategy::Relevant),
        Some("new") => Ok(ListStrategy::New),
        Some("old") => Ok(ListStrategy::Old),
        Some(_) => Err(validation_error(
            r#""strategy" deve possuir um dos seguintes valores: "new", "old", "relevant"."#,
            "strategy",
        )),
    }
}

/// Parse the `page` query parameter, defaulting to 1.
pub fn parse_page(raw: Option<&str>) -> Result<u32, CoreError> {
    match raw {
        None => Ok(1),
        Some(value) => match value.parse::<u32>() {
            Ok(page) if page >= 1 => Ok(page),
            _ => Err(validation_error(
                r#""page" deve possuir um valor mínimo de 1."#,
                "page",
            )),
        },
    }
}

/// Parse the `per_page` query parameter, defaulting to [`DEFAULT_PER_PAGE`].
pub fn parse_per_page(raw: Option<&str>) -> Result<u32, CoreError> {
    match raw {
        None => Ok(DEFAULT_PER_PAGE),
        Some(value) => match value.parse::<u32>() {
            Ok(per_page) if (1..=MAX_PER_PAGE).contains(&per_page) => Ok(per_page),
            _ => Err(validation_error(
                r#""per_page" deve possuir um valor entre 1 e 100."#,
                "per_page",
            )),
        },
    }
}
