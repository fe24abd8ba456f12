//! Session lifecycle.
//!
//! A `SessionManager` owns the live (identity, token) pair for one client
//! instance. It is constructed explicitly by the application entry point and
//! passed to whatever layer needs it; there is no ambient global state.
//!
//! Every operation that reaches the network settles into a boolean result
//! plus an observable error message; nothing escapes the public boundary.
//! The busy flag is set for the duration of each attempt and cleared exactly
//! once per invocation regardless of outcome.

use std::sync::Arc;

use chrono::Utc;

use crate::models::User;

use super::api::{ApiError, AuthApi, ProfileUpdate, Registration};
use super::mask_token;
use super::store::{AUTH_TOKEN_KEY, CredentialStore, USER_DATA_KEY};

const GENERIC_ERROR: &str = "An unexpected error occurred";
const LOGIN_FAILED: &str = "Invalid credentials";
const REGISTER_FAILED: &str = "Registration failed";
const PASSWORD_MISMATCH: &str = "Passwords do not match";
const SSO_FAILED: &str = "SSO sign-in failed";
const PROFILE_FAILED: &str = "Could not update profile";

/// Owns authentication state, credential exchange and session persistence.
///
/// A session is either fully anonymous (no identity, no token) or fully
/// authenticated (both present); no partially-populated state is observable.
/// Constructed with `store: None` when no durable storage exists; every
/// persistence step is then skipped.
pub struct SessionManager {
    api: Arc<dyn AuthApi>,
    store: Option<Arc<dyn CredentialStore>>,
    user: Option<User>,
    token: Option<String>,
    busy: bool,
    error: Option<String>,
}

impl SessionManager {
    pub fn new(api: Arc<dyn AuthApi>, store: Option<Arc<dyn CredentialStore>>) -> Self {
        Self {
            api,
            store,
            user: None,
            token: None,
            busy: false,
            error: None,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// True while a remote operation is outstanding. Callers must not start
    /// another operation while this is set.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// True iff an identity is present that has never recorded a login.
    pub fn is_first_login(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.last_login_at.is_none())
    }

    /// Clears the error message without touching identity or token state.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Exchanges credentials for a session. Stamps the identity's last login
    /// to now and persists the pair on success.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        self.begin_attempt();
        let ok = self.login_inner(email, password).await;
        self.busy = false;
        ok
    }

    async fn login_inner(&mut self, email: &str, password: &str) -> bool {
        match self.api.login(email, password).await {
            Ok(mut exchange) => {
                exchange.user.last_login_at = Some(Utc::now());
                tracing::debug!(
                    "Logged in as {} with token {}",
                    exchange.user.email,
                    mask_token(&exchange.access)
                );
                self.adopt(exchange.user, exchange.access);
                true
            }
            Err(err) => self.fail(err, LOGIN_FAILED),
        }
    }

    /// Registers a new account; behaves like an auto-login on success.
    ///
    /// A password/confirmation mismatch fails locally without contacting the
    /// remote endpoint.
    pub async fn register(&mut self, registration: Registration) -> bool {
        self.begin_attempt();
        let ok = if registration.password != registration.confirm_password {
            self.error = Some(PASSWORD_MISMATCH.to_string());
            false
        } else {
            self.register_inner(&registration).await
        };
        self.busy = false;
        ok
    }

    async fn register_inner(&mut self, registration: &Registration) -> bool {
        match self.api.register(registration).await {
            Ok(exchange) => {
                self.adopt(exchange.user, exchange.access);
                true
            }
            Err(err) => self.fail(err, REGISTER_FAILED),
        }
    }

    /// Exchanges a third-party identity token for a session.
    ///
    /// The token's authenticity is the remote endpoint's concern; locally it
    /// is only required to be non-empty.
    pub async fn login_with_sso(&mut self, provider_token: &str) -> bool {
        self.begin_attempt();
        let ok = if provider_token.trim().is_empty() {
            self.error = Some(SSO_FAILED.to_string());
            false
        } else {
            self.sso_inner(provider_token).await
        };
        self.busy = false;
        ok
    }

    async fn sso_inner(&mut self, provider_token: &str) -> bool {
        match self.api.sso_login(provider_token).await {
            Ok(exchange) => {
                self.adopt(exchange.user, exchange.access);
                true
            }
            Err(err) => self.fail(err, SSO_FAILED),
        }
    }

    /// Sends a partial identity update; on success the server's response
    /// replaces the in-memory identity and is re-persisted. On failure the
    /// prior identity is left untouched.
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> bool {
        self.begin_attempt();
        let ok = self.update_inner(&update).await;
        self.busy = false;
        ok
    }

    async fn update_inner(&mut self, update: &ProfileUpdate) -> bool {
        let Some(token) = self.token.clone() else {
            self.error = Some(PROFILE_FAILED.to_string());
            return false;
        };

        match self.api.update_profile(&token, update).await {
            Ok(user) => {
                self.adopt(user, token);
                true
            }
            Err(ApiError::Transport(err)) => {
                tracing::error!("Profile update transport failure: {err:#}");
                self.error = Some(GENERIC_ERROR.to_string());
                false
            }
            Err(_) => {
                self.error = Some(PROFILE_FAILED.to_string());
                false
            }
        }
    }

    /// Returns the session to anonymous and clears both persisted keys.
    /// Idempotent.
    pub fn logout(&mut self) {
        self.user = None;
        self.token = None;
        self.error = None;
        self.purge_storage();
    }

    /// Adopts a previously persisted session, if any. Startup-only.
    ///
    /// Optimistic: the stored pair is trusted without a freshness check
    /// against the remote endpoint. Unparsable or partial records are purged
    /// and the session stays anonymous. With no durable store this is a
    /// no-op.
    pub fn restore_session(&mut self) {
        let Some(store) = &self.store else {
            return;
        };

        let token = store.get(AUTH_TOKEN_KEY);
        let data = store.get(USER_DATA_KEY);
        match (token, data) {
            (Some(token), Some(json)) => match serde_json::from_str::<User>(&json) {
                Ok(user) => {
                    tracing::debug!("Restored session for {}", user.email);
                    self.user = Some(user);
                    self.token = Some(token);
                }
                Err(err) => {
                    tracing::warn!("Could not restore session: {err}");
                    self.purge_storage();
                }
            },
            (None, None) => {}
            _ => {
                tracing::warn!("Purging partial session record");
                self.purge_storage();
            }
        }
    }

    fn begin_attempt(&mut self) {
        self.busy = true;
        self.error = None;
    }

    /// Adopts the identity/token pair into memory and persists it.
    fn adopt(&mut self, user: User, token: String) {
        self.persist(&user, &token);
        self.user = Some(user);
        self.token = Some(token);
    }

    fn persist(&self, user: &User, token: &str) {
        let Some(store) = &self.store else {
            return;
        };
        match serde_json::to_string(user) {
            Ok(json) => {
                store.set(AUTH_TOKEN_KEY, token);
                store.set(USER_DATA_KEY, &json);
            }
            Err(err) => {
                // Never leave one key without the other.
                tracing::warn!("Could not persist session: {err}");
                store.remove(AUTH_TOKEN_KEY);
                store.remove(USER_DATA_KEY);
            }
        }
    }

    fn purge_storage(&self) {
        if let Some(store) = &self.store {
            store.remove(AUTH_TOKEN_KEY);
            store.remove(USER_DATA_KEY);
        }
    }

    fn fail(&mut self, err: ApiError, fallback: &str) -> bool {
        match err {
            ApiError::Rejected { detail } => {
                self.error = Some(detail.unwrap_or_else(|| fallback.to_string()));
            }
            ApiError::Validation { fields } => {
                self.error = Some(
                    fields
                        .into_values()
                        .next()
                        .unwrap_or_else(|| fallback.to_string()),
                );
            }
            ApiError::Transport(err) => {
                tracing::error!("Auth transport failure: {err:#}");
                self.error = Some(GENERIC_ERROR.to_string());
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::TimeZone;

    use super::*;
    use crate::auth::api::AuthExchange;
    use crate::auth::store::MemoryCredentialStore;
    use crate::models::{UserRole, UserStatus};

    fn sample_user() -> User {
        User {
            id: "user_001".to_string(),
            email: "ada@company.com".to_string(),
            full_name: "Ada Lovelace".to_string(),
            avatar_url: None,
            role: UserRole::Admin,
            status: UserStatus::Active,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            last_login_at: None,
            updated_at: None,
        }
    }

    /// Canned outcome for a login-shaped endpoint.
    #[derive(Clone)]
    enum Script {
        Ok,
        Rejected(Option<&'static str>),
        Validation(&'static [(&'static str, &'static str)]),
        Transport,
    }

    impl Script {
        fn materialize(&self) -> Result<AuthExchange, ApiError> {
            match self {
                Script::Ok => Ok(AuthExchange {
                    user: sample_user(),
                    access: "bdk-access-token-0001".to_string(),
                }),
                Script::Rejected(detail) => Err(ApiError::Rejected {
                    detail: detail.map(str::to_string),
                }),
                Script::Validation(fields) => Err(ApiError::Validation {
                    fields: fields
                        .iter()
                        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                        .collect::<BTreeMap<_, _>>(),
                }),
                Script::Transport => {
                    Err(ApiError::Transport(anyhow!("connection refused")))
                }
            }
        }
    }

    /// Scripted collaborator with per-operation call counters.
    struct ScriptedApi {
        script: Mutex<Script>,
        update_user: Mutex<Option<User>>,
        login_calls: AtomicUsize,
        register_calls: AtomicUsize,
        update_calls: AtomicUsize,
        sso_calls: AtomicUsize,
    }

    impl ScriptedApi {
        fn with(script: Script) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script),
                update_user: Mutex::new(None),
                login_calls: AtomicUsize::new(0),
                register_calls: AtomicUsize::new(0),
                update_calls: AtomicUsize::new(0),
                sso_calls: AtomicUsize::new(0),
            })
        }

        fn set_script(&self, script: Script) {
            *self.script.lock().unwrap() = script;
        }

        fn current(&self) -> Result<AuthExchange, ApiError> {
            self.script.lock().unwrap().materialize()
        }
    }

    #[async_trait]
    impl AuthApi for ScriptedApi {
        async fn login(&self, _email: &str, _password: &str) -> Result<AuthExchange, ApiError> {
            self.login_calls.fetch_add(1, Ordering::SeqCst);
            self.current()
        }

        async fn register(
            &self,
            _registration: &Registration,
        ) -> Result<AuthExchange, ApiError> {
            self.register_calls.fetch_add(1, Ordering::SeqCst);
            self.current()
        }

        async fn update_profile(
            &self,
            _token: &str,
            _update: &ProfileUpdate,
        ) -> Result<User, ApiError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(user) = self.update_user.lock().unwrap().clone() {
                return Ok(user);
            }
            self.current().map(|exchange| exchange.user)
        }

        async fn sso_login(&self, _provider_token: &str) -> Result<AuthExchange, ApiError> {
            self.sso_calls.fetch_add(1, Ordering::SeqCst);
            self.current()
        }
    }

    fn registration() -> Registration {
        Registration {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@company.com".to_string(),
            password: "s3cret".to_string(),
            confirm_password: "s3cret".to_string(),
        }
    }

    /// Test: successful login authenticates, stamps last login, persists both
    /// keys and leaves the busy flag cleared.
    #[tokio::test]
    async fn test_login_success() {
        let api = ScriptedApi::with(Script::Ok);
        let store = Arc::new(MemoryCredentialStore::new());
        let mut session = SessionManager::new(Arc::clone(&api) as Arc<dyn AuthApi>, Some(Arc::clone(&store) as Arc<dyn CredentialStore>));

        assert!(session.login("ada@company.com", "s3cret").await);

        assert!(session.is_authenticated());
        assert!(!session.is_busy());
        assert!(session.error_message().is_none());
        // The server user had no last login; the manager stamps it.
        assert!(!session.is_first_login());

        assert_eq!(
            store.get(AUTH_TOKEN_KEY).as_deref(),
            Some("bdk-access-token-0001")
        );
        let persisted: User =
            serde_json::from_str(&store.get(USER_DATA_KEY).unwrap()).unwrap();
        assert_eq!(persisted.email, "ada@company.com");
        assert!(persisted.last_login_at.is_some());
    }

    /// Test: a rejection surfaces the server detail, or the fallback when the
    /// response carried none.
    #[tokio::test]
    async fn test_login_rejected_messages() {
        let api = ScriptedApi::with(Script::Rejected(Some("No active account found")));
        let mut session = SessionManager::new(Arc::clone(&api) as Arc<dyn AuthApi>, None);

        assert!(!session.login("ada@company.com", "wrong").await);
        assert_eq!(session.error_message(), Some("No active account found"));
        assert!(!session.is_authenticated());

        api.set_script(Script::Rejected(None));
        assert!(!session.login("ada@company.com", "wrong").await);
        assert_eq!(session.error_message(), Some("Invalid credentials"));
    }

    /// Test: transport failures map to the generic message, never an error
    /// escaping the call.
    #[tokio::test]
    async fn test_login_transport_failure() {
        let api = ScriptedApi::with(Script::Transport);
        let mut session = SessionManager::new(api, None);

        assert!(!session.login("ada@company.com", "s3cret").await);
        assert_eq!(session.error_message(), Some("An unexpected error occurred"));
        assert!(!session.is_busy());
    }

    /// Test: the previous error is cleared at the start of the next attempt.
    #[tokio::test]
    async fn test_error_cleared_on_next_attempt() {
        let api = ScriptedApi::with(Script::Rejected(None));
        let mut session = SessionManager::new(Arc::clone(&api) as Arc<dyn AuthApi>, None);

        assert!(!session.login("ada@company.com", "wrong").await);
        assert!(session.error_message().is_some());

        api.set_script(Script::Ok);
        assert!(session.login("ada@company.com", "s3cret").await);
        assert!(session.error_message().is_none());
    }

    /// Test: password mismatch fails locally; the remote endpoint is never
    /// invoked.
    #[tokio::test]
    async fn test_register_mismatch_never_contacts_remote() {
        let api = ScriptedApi::with(Script::Ok);
        let mut session = SessionManager::new(Arc::clone(&api) as Arc<dyn AuthApi>, None);

        let mut reg = registration();
        reg.confirm_password = "different".to_string();

        assert!(!session.register(reg).await);
        assert_eq!(session.error_message(), Some("Passwords do not match"));
        assert_eq!(api.register_calls.load(Ordering::SeqCst), 0);
        assert!(!session.is_busy());
    }

    /// Test: successful registration is an auto-login without a last-login
    /// stamp, so the first-login flag is up.
    #[tokio::test]
    async fn test_register_success_is_auto_login() {
        let api = ScriptedApi::with(Script::Ok);
        let store = Arc::new(MemoryCredentialStore::new());
        let mut session = SessionManager::new(api, Some(Arc::clone(&store) as Arc<dyn CredentialStore>));

        assert!(session.register(registration()).await);
        assert!(session.is_authenticated());
        assert!(session.is_first_login());
        assert!(store.get(AUTH_TOKEN_KEY).is_some());
        assert!(store.get(USER_DATA_KEY).is_some());
    }

    /// Test: the first server-provided field error is surfaced.
    #[tokio::test]
    async fn test_register_validation_first_field() {
        let api = ScriptedApi::with(Script::Validation(&[(
            "email",
            "A user with this email already exists.",
        )]));
        let mut session = SessionManager::new(api, None);

        assert!(!session.register(registration()).await);
        assert_eq!(
            session.error_message(),
            Some("A user with this email already exists.")
        );
    }

    /// Test: an empty provider token fails locally.
    #[tokio::test]
    async fn test_sso_empty_token_fails_locally() {
        let api = ScriptedApi::with(Script::Ok);
        let mut session = SessionManager::new(Arc::clone(&api) as Arc<dyn AuthApi>, None);

        assert!(!session.login_with_sso("   ").await);
        assert_eq!(session.error_message(), Some("SSO sign-in failed"));
        assert_eq!(api.sso_calls.load(Ordering::SeqCst), 0);
    }

    /// Test: SSO exchange follows the same persist contract as login, without
    /// stamping the last login.
    #[tokio::test]
    async fn test_sso_success() {
        let api = ScriptedApi::with(Script::Ok);
        let store = Arc::new(MemoryCredentialStore::new());
        let mut session = SessionManager::new(api, Some(Arc::clone(&store) as Arc<dyn CredentialStore>));

        assert!(session.login_with_sso("provider-token").await);
        assert!(session.is_authenticated());
        assert!(session.is_first_login());
        assert!(store.get(AUTH_TOKEN_KEY).is_some());
    }

    /// Test: logout twice equals logout once; state and storage identical.
    #[tokio::test]
    async fn test_logout_idempotent() {
        let api = ScriptedApi::with(Script::Ok);
        let store = Arc::new(MemoryCredentialStore::new());
        let mut session = SessionManager::new(api, Some(Arc::clone(&store) as Arc<dyn CredentialStore>));

        assert!(session.login("ada@company.com", "s3cret").await);

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.error_message().is_none());
        assert_eq!(store.get(AUTH_TOKEN_KEY), None);
        assert_eq!(store.get(USER_DATA_KEY), None);

        session.logout();
        assert!(!session.is_authenticated());
        assert_eq!(store.get(AUTH_TOKEN_KEY), None);
        assert_eq!(store.get(USER_DATA_KEY), None);
    }

    /// Test: a profile update replaces the identity with the server's
    /// authoritative response and re-persists it.
    #[tokio::test]
    async fn test_update_profile_success() {
        let api = ScriptedApi::with(Script::Ok);
        let store = Arc::new(MemoryCredentialStore::new());
        let mut session = SessionManager::new(Arc::clone(&api) as Arc<dyn AuthApi>, Some(Arc::clone(&store) as Arc<dyn CredentialStore>));

        assert!(session.login("ada@company.com", "s3cret").await);

        let mut renamed = sample_user();
        renamed.full_name = "Ada King".to_string();
        *api.update_user.lock().unwrap() = Some(renamed);

        let update = ProfileUpdate {
            full_name: Some("Ada King".to_string()),
            ..ProfileUpdate::default()
        };
        assert!(session.update_profile(update).await);
        assert_eq!(session.current_user().unwrap().full_name, "Ada King");

        let persisted: User =
            serde_json::from_str(&store.get(USER_DATA_KEY).unwrap()).unwrap();
        assert_eq!(persisted.full_name, "Ada King");
    }

    /// Test: a failed update reports an error and leaves the prior identity
    /// untouched.
    #[tokio::test]
    async fn test_update_profile_failure_keeps_identity() {
        let api = ScriptedApi::with(Script::Ok);
        let mut session = SessionManager::new(Arc::clone(&api) as Arc<dyn AuthApi>, None);

        assert!(session.login("ada@company.com", "s3cret").await);
        let before = session.current_user().unwrap().clone();

        api.set_script(Script::Rejected(Some("nope")));
        assert!(!session.update_profile(ProfileUpdate::default()).await);
        assert_eq!(session.error_message(), Some("Could not update profile"));
        assert_eq!(session.current_user(), Some(&before));
    }

    /// Test: persist then restore in a fresh manager reproduces the identical
    /// identity without any remote call.
    #[tokio::test]
    async fn test_restore_roundtrip() {
        let api = ScriptedApi::with(Script::Ok);
        let store = Arc::new(MemoryCredentialStore::new());

        let mut first = SessionManager::new(Arc::clone(&api) as Arc<dyn AuthApi>, Some(Arc::clone(&store) as Arc<dyn CredentialStore>));
        assert!(first.login("ada@company.com", "s3cret").await);
        let user = first.current_user().unwrap().clone();
        drop(first);

        let mut second = SessionManager::new(Arc::clone(&api) as Arc<dyn AuthApi>, Some(store));
        second.restore_session();

        assert!(second.is_authenticated());
        assert_eq!(second.current_user(), Some(&user));
        assert_eq!(second.token(), Some("bdk-access-token-0001"));
        assert_eq!(api.login_calls.load(Ordering::SeqCst), 1);
    }

    /// Test: unparsable stored identity purges both keys and stays anonymous.
    #[tokio::test]
    async fn test_restore_corrupt_purges_both_keys() {
        let api = ScriptedApi::with(Script::Ok);
        let store = Arc::new(MemoryCredentialStore::new());
        store.set(AUTH_TOKEN_KEY, "tok");
        store.set(USER_DATA_KEY, "{ not json");

        let mut session = SessionManager::new(api, Some(Arc::clone(&store) as Arc<dyn CredentialStore>));
        session.restore_session();

        assert!(!session.is_authenticated());
        assert!(session.error_message().is_none());
        assert_eq!(store.get(AUTH_TOKEN_KEY), None);
        assert_eq!(store.get(USER_DATA_KEY), None);
    }

    /// Test: a record with only one of the two keys is purged as a pair.
    #[tokio::test]
    async fn test_restore_partial_record_purged() {
        let api = ScriptedApi::with(Script::Ok);
        let store = Arc::new(MemoryCredentialStore::new());
        store.set(AUTH_TOKEN_KEY, "tok");

        let mut session = SessionManager::new(api, Some(Arc::clone(&store) as Arc<dyn CredentialStore>));
        session.restore_session();

        assert!(!session.is_authenticated());
        assert_eq!(store.get(AUTH_TOKEN_KEY), None);
        assert_eq!(store.get(USER_DATA_KEY), None);
    }

    /// Test: with no durable store, restoration is skipped and login still
    /// works in memory.
    #[tokio::test]
    async fn test_no_store_skips_persistence() {
        let api = ScriptedApi::with(Script::Ok);
        let mut session = SessionManager::new(api, None);

        session.restore_session();
        assert!(!session.is_authenticated());

        assert!(session.login("ada@company.com", "s3cret").await);
        assert!(session.is_authenticated());
    }

    /// Test: clear_error drops the message and nothing else.
    #[tokio::test]
    async fn test_clear_error() {
        let api = ScriptedApi::with(Script::Rejected(None));
        let mut session = SessionManager::new(api, None);

        assert!(!session.login("ada@company.com", "wrong").await);
        assert!(session.error_message().is_some());

        session.clear_error();
        assert!(session.error_message().is_none());
        assert!(!session.is_authenticated());
    }
}
