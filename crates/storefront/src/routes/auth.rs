//! Authentication route handlers.
//!
//! Sign-in and sign-up go through the backend client. On success the user
//! is stored in the session; failures redirect back to the form with an
//! error code that the page translates.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use souq_core::Email;
use tower_sessions::Session;
use tracing::instrument;

use crate::backend::{Backend, BackendError, Credentials, SignUp};
use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::auth::{login_url, safe_next};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;
use crate::views::{Layout, PageContext};

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub next: Option<String>,
}

/// Registration form data.
#[derive(Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub registered: Option<String>,
    pub next: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub error: Option<String>,
    pub success: Option<String>,
    pub next: String,
    pub show_demo_hint: bool,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub layout: Layout,
    pub error: Option<String>,
}

/// Translation key for an error code carried in the query string.
fn error_key(code: &str) -> &'static str {
    match code {
        "credentials" => "auth.invalid",
        "rate_limited" => "auth.error_rate_limited",
        "email" => "auth.error_email",
        "password" => "auth.error_password",
        "mismatch" => "auth.error_mismatch",
        "name" => "auth.error_name",
        "exists" => "auth.error_exists",
        _ => "auth.error_unavailable",
    }
}

fn backend_error_code(error: &BackendError) -> &'static str {
    match error {
        BackendError::InvalidCredentials => "credentials",
        BackendError::RateLimited(_) => "rate_limited",
        BackendError::Api { status: 422, .. } => "exists",
        _ => "unavailable",
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
#[instrument(skip(state, ctx))]
pub async fn login_page(
    State(state): State<AppState>,
    ctx: PageContext,
    Query(query): Query<MessageQuery>,
) -> Response {
    if let Some(user) = &ctx.user {
        return Redirect::to(user.role.home_path()).into_response();
    }

    let layout = ctx.layout();
    LoginTemplate {
        error: query.error.as_deref().map(|code| layout.t(error_key(code))),
        success: query
            .registered
            .is_some()
            .then(|| layout.t("auth.registered")),
        next: safe_next(query.next.as_deref())
            .unwrap_or_default()
            .to_string(),
        show_demo_hint: state.backend().is_mock(),
        layout,
    }
    .into_response()
}

/// Handle login form submission.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let credentials = Credentials {
        email: form.email.trim().to_string(),
        password: SecretString::from(form.password),
    };

    let auth = match state.backend().sign_in_with_password(&credentials).await {
        Ok(auth) => auth,
        Err(e) => {
            tracing::warn!(error = %e, "Login failed");
            let mut target = login_url(form.next.as_deref().unwrap_or_default());
            target.push(if target.contains('?') { '&' } else { '?' });
            target.push_str("error=");
            target.push_str(backend_error_code(&e));
            return Ok(Redirect::to(&target).into_response());
        }
    };

    let user = CurrentUser::from(auth);
    set_current_user(&session, &user).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, role = %user.role, "User signed in");

    let target = safe_next(form.next.as_deref()).unwrap_or_else(|| user.role.home_path());
    Ok(Redirect::to(target).into_response())
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
#[instrument(skip(ctx))]
pub async fn register_page(ctx: PageContext, Query(query): Query<MessageQuery>) -> Response {
    if let Some(user) = &ctx.user {
        return Redirect::to(user.role.home_path()).into_response();
    }
    let layout = ctx.layout();
    RegisterTemplate {
        error: query.error.as_deref().map(|code| layout.t(error_key(code))),
        layout,
    }
    .into_response()
}

/// Check a registration form, returning the request or an error code.
fn validate_registration(form: RegisterForm) -> Result<SignUp, &'static str> {
    let name = form.name.trim().to_string();
    if name.is_empty() {
        return Err("name");
    }
    let email = Email::parse(&form.email).map_err(|_| "email")?;
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err("password");
    }
    if form.password != form.password_confirm {
        return Err("mismatch");
    }
    Ok(SignUp {
        email,
        password: SecretString::from(form.password),
        name,
    })
}

/// Handle registration form submission.
///
/// When the backend signs the new user in straight away they land on their
/// home page; otherwise they are sent to the login form.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let request = match validate_registration(form) {
        Ok(request) => request,
        Err(code) => {
            return Ok(Redirect::to(&format!("/auth/register?error={code}")).into_response());
        }
    };

    match state.backend().sign_up(&request).await {
        Ok(response) => {
            tracing::info!(user_id = %response.user.id, "Account created");
            match response.session {
                Some(auth) => {
                    let user = CurrentUser::from(auth);
                    set_current_user(&session, &user).await?;
                    set_sentry_user(&user.id, Some(user.email.as_str()));
                    Ok(Redirect::to(user.role.home_path()).into_response())
                }
                None => Ok(Redirect::to("/auth/login?registered=1").into_response()),
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Registration failed");
            let code = backend_error_code(&e);
            Ok(Redirect::to(&format!("/auth/register?error={code}")).into_response())
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Sign out: revoke the backend token, then forget the user locally.
///
/// A failed revoke is logged; the local sign-out still happens.
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Redirect, AppError> {
    if let Ok(Some(user)) = session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        && let Err(e) = state.backend().sign_out(&user.access_token).await
    {
        tracing::warn!(error = %e, user_id = %user.id, "Backend sign-out failed");
    }

    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            password_confirm: confirm.to_string(),
        }
    }

    #[test]
    fn test_validate_registration() {
        assert!(validate_registration(form("Amal", "amal@souq.test", "secret1", "secret1")).is_ok());
        assert_eq!(
            validate_registration(form(" ", "amal@souq.test", "secret1", "secret1")).err(),
            Some("name")
        );
        assert_eq!(
            validate_registration(form("Amal", "not-an-email", "secret1", "secret1")).err(),
            Some("email")
        );
        assert_eq!(
            validate_registration(form("Amal", "amal@souq.test", "abc", "abc")).err(),
            Some("password")
        );
        assert_eq!(
            validate_registration(form("Amal", "amal@souq.test", "secret1", "secret2")).err(),
            Some("mismatch")
        );
    }

    #[test]
    fn test_error_codes_map_to_translation_keys() {
        assert_eq!(error_key("credentials"), "auth.invalid");
        assert_eq!(error_key("whatever"), "auth.error_unavailable");
        assert_eq!(
            backend_error_code(&BackendError::InvalidCredentials),
            "credentials"
        );
        assert_eq!(backend_error_code(&BackendError::RateLimited(2)), "rate_limited");
    }
}
