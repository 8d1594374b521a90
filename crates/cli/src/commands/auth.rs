//! Sign-in check.

use secrecy::SecretString;
use souq_core::AuthUser;
use souq_storefront::backend::{Backend, Credentials};

use super::CliError;

/// Exchange credentials for a session, returning the signed-in user.
pub async fn sign_in<B: Backend>(
    backend: &B,
    email: &str,
    password: String,
) -> Result<AuthUser, CliError> {
    let credentials = Credentials {
        email: email.trim().to_string(),
        password: SecretString::from(password),
    };
    let session = backend.sign_in_with_password(&credentials).await?;
    Ok(session.user)
}

/// Sign in and print who the account belongs to.
#[allow(clippy::print_stdout)]
pub async fn login<B: Backend>(backend: &B, email: &str, password: String) -> Result<(), CliError> {
    let user = sign_in(backend, email, password).await?;
    tracing::info!(user_id = %user.id, role = %user.role, "Signed in");

    println!("{} <{}>", user.name, user.email.as_str());
    println!("role:  {}", user.role);
    if let Some(store_id) = &user.store_id {
        println!("store: {}", store_id.as_str());
    }
    println!("home:  {}", user.role.home_path());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use souq_core::Role;
    use souq_storefront::backend::{BackendError, MockBackend};

    use super::*;

    #[tokio::test]
    async fn test_seeded_seller_signs_in() {
        let user = sign_in(&MockBackend::new(), " seller@souq.test ", "password".into())
            .await
            .unwrap();
        assert_eq!(user.role, Role::Seller);
        assert!(user.store_id.is_some());
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let err = sign_in(&MockBackend::new(), "buyer@souq.test", "hunter2".into())
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Backend(BackendError::InvalidCredentials)));
    }
}
