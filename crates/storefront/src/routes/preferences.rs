//! Language and currency preference handlers.

use axum::{Form, response::Redirect};
use serde::Deserialize;
use souq_core::{CurrencyCode, Language};
use tracing::instrument;

use super::redirect_back;
use crate::error::AppError;
use crate::middleware::Shopper;

/// Language picker form data.
#[derive(Debug, Deserialize)]
pub struct LanguageForm {
    pub language: String,
    pub next: Option<String>,
}

/// Currency picker form data.
#[derive(Debug, Deserialize)]
pub struct CurrencyForm {
    pub currency: String,
    pub next: Option<String>,
}

/// Switch the interface language.
#[instrument(skip(shopper))]
pub async fn set_language(
    mut shopper: Shopper,
    Form(form): Form<LanguageForm>,
) -> Result<Redirect, AppError> {
    let language = form
        .language
        .parse::<Language>()
        .map_err(AppError::BadRequest)?;
    shopper.state.set_language(language);
    shopper.save().await?;
    Ok(redirect_back(form.next.as_deref(), "/"))
}

/// Switch the display currency.
#[instrument(skip(shopper))]
pub async fn set_currency(
    mut shopper: Shopper,
    Form(form): Form<CurrencyForm>,
) -> Result<Redirect, AppError> {
    let currency = form
        .currency
        .parse::<CurrencyCode>()
        .map_err(AppError::BadRequest)?;
    shopper.state.set_currency(currency);
    shopper.save().await?;
    Ok(redirect_back(form.next.as_deref(), "/"))
}
