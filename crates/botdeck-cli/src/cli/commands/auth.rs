//! Session command handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use botdeck_core::auth::{
    FileCredentialStore, HttpAuthApi, ProfileUpdate, Registration, SessionManager,
};
use botdeck_core::config::Config;
use botdeck_core::models::User;

/// Builds a session manager against the configured API, with any previously
/// persisted session already restored.
pub fn open_session(config: &Config) -> Result<SessionManager> {
    let api = HttpAuthApi::new(&config.api_base_url).context("build auth client")?;
    let store = FileCredentialStore::at_default();
    let mut session = SessionManager::new(Arc::new(api), Some(Arc::new(store)));
    session.restore_session();
    Ok(session)
}

fn session_error(session: &SessionManager, fallback: &str) -> anyhow::Error {
    anyhow::anyhow!("{}", session.error_message().unwrap_or(fallback))
}

pub async fn login(config: &Config, email: &str, password: &str) -> Result<()> {
    let mut session = open_session(config)?;

    if !session.login(email, password).await {
        return Err(session_error(&session, "Invalid credentials"));
    }

    if let Some(user) = session.current_user() {
        println!("Logged in as {} ({})", user.full_name, user.email);
    }
    Ok(())
}

pub async fn login_sso(config: &Config, provider_token: &str) -> Result<()> {
    let mut session = open_session(config)?;

    if !session.login_with_sso(provider_token).await {
        return Err(session_error(&session, "SSO sign-in failed"));
    }

    if let Some(user) = session.current_user() {
        println!("Logged in as {} ({})", user.full_name, user.email);
        if session.is_first_login() {
            println!("Welcome! This is your first login.");
        }
    }
    Ok(())
}

pub async fn register(
    config: &Config,
    full_name: String,
    email: String,
    password: String,
    confirm_password: String,
) -> Result<()> {
    let mut session = open_session(config)?;

    let registration = Registration {
        full_name,
        email,
        password,
        confirm_password,
    };
    if !session.register(registration).await {
        return Err(session_error(&session, "Registration failed"));
    }

    if let Some(user) = session.current_user() {
        println!("Registered and logged in as {}", user.email);
    }
    Ok(())
}

pub fn logout(config: &Config) -> Result<()> {
    let mut session = open_session(config)?;
    session.logout();
    println!("Logged out.");
    Ok(())
}

pub fn whoami(config: &Config) -> Result<()> {
    let session = open_session(config)?;

    let Some(user) = session.current_user() else {
        anyhow::bail!("Not logged in. Run `botdeck login` first.");
    };

    print_identity(user);
    Ok(())
}

pub async fn profile(
    config: &Config,
    full_name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
) -> Result<()> {
    let mut session = open_session(config)?;
    if !session.is_authenticated() {
        anyhow::bail!("Not logged in. Run `botdeck login` first.");
    }

    let update = ProfileUpdate {
        full_name,
        email,
        avatar_url,
    };
    if update.is_empty() {
        anyhow::bail!("Nothing to update. Pass --full-name, --email or --avatar-url.");
    }

    if !session.update_profile(update).await {
        return Err(session_error(&session, "Could not update profile"));
    }

    println!("Profile updated.");
    if let Some(user) = session.current_user() {
        print_identity(user);
    }
    Ok(())
}

fn print_identity(user: &User) {
    println!("{} <{}>", user.full_name, user.email);
    println!("Role:       {}", user.role.as_str());
    println!("Status:     {}", user.status.as_str());
    let last_login = user
        .last_login_at
        .map_or_else(|| "never".to_string(), |at| {
            at.format("%Y-%m-%d %H:%M UTC").to_string()
        });
    println!("Last login: {last_login}");
}
