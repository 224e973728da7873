//! Browser session handling.
//!
//! The backend owns all identity data; this process keeps only a bearer
//! token and a snapshot of the signed-in user, persisted through a
//! [`SessionRepository`]. The production repository writes two cookies:
//! `auth_token` (HTTP-only bearer token) and `auth_user` (base64 JSON user
//! snapshot read back on every request so pages can render the header
//! without a round trip).

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use runhub_client::auth::{self, LoginInput, RegisterInput};
use runhub_client::types::User;
use runhub_client::{ApiClient, ApiError};

pub const TOKEN_COOKIE: &str = "auth_token";
pub const USER_COOKIE: &str = "auth_user";

/// A signed-in session: the bearer token plus the user it belongs to.
#[derive(Clone, Debug)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticating,
    Authenticated,
}

/// Where sessions are persisted between requests.
pub trait SessionRepository {
    fn load(&self) -> Option<Session>;
    fn save(&mut self, session: &Session);
    fn clear(&mut self);
}

/// Cookie-backed repository. Owns the request's [`CookieJar`]; callers take
/// the jar back with [`CookieSessions::into_jar`] and return it in the
/// response so the mutations actually reach the browser.
pub struct CookieSessions {
    jar: CookieJar,
}

impl CookieSessions {
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }

    fn build_cookie(name: &'static str, value: String, http_only: bool) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(http_only)
            .same_site(SameSite::Lax)
            .build()
    }

    /// Cookies that expire both session cookies, for responses built outside
    /// a jar (error paths).
    pub fn removal_cookies() -> [Cookie<'static>; 2] {
        let mut token = Cookie::from(TOKEN_COOKIE);
        token.set_path("/");
        token.make_removal();
        let mut user = Cookie::from(USER_COOKIE);
        user.set_path("/");
        user.make_removal();
        [token, user]
    }
}

impl SessionRepository for CookieSessions {
    fn load(&self) -> Option<Session> {
        let token = self.jar.get(TOKEN_COOKIE)?.value().to_string();
        let encoded = self.jar.get(USER_COOKIE)?.value().to_string();
        let bytes = URL_SAFE_NO_PAD.decode(encoded).ok()?;
        let user: User = serde_json::from_slice(&bytes).ok()?;
        Some(Session { token, user })
    }

    fn save(&mut self, session: &Session) {
        let encoded = match serde_json::to_vec(&session.user) {
            Ok(bytes) => URL_SAFE_NO_PAD.encode(bytes),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize user snapshot");
                return;
            }
        };

        self.jar = self
            .jar
            .clone()
            .add(Self::build_cookie(TOKEN_COOKIE, session.token.clone(), true))
            .add(Self::build_cookie(USER_COOKIE, encoded, false));
    }

    fn clear(&mut self) {
        let [token, user] = Self::removal_cookies();
        self.jar = self.jar.clone().add(token).add(user);
    }
}

/// Session state machine over a repository.
///
/// `Anonymous -> Authenticating -> Authenticated` on login/register. A
/// failed attempt drops back to `Anonymous` without touching whatever the
/// repository already holds.
pub struct SessionStore<R: SessionRepository> {
    repository: R,
    state: SessionState,
}

impl<R: SessionRepository> SessionStore<R> {
    pub fn new(repository: R) -> Self {
        let state = if repository.load().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        };
        Self { repository, state }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current(&self) -> Option<Session> {
        self.repository.load()
    }

    pub fn into_repository(self) -> R {
        self.repository
    }

    /// Failure leaves the repository untouched and rethrows so the form can
    /// display the error.
    pub async fn login(&mut self, api: &ApiClient, input: &LoginInput) -> Result<User, ApiError> {
        self.state = SessionState::Authenticating;
        match auth::login(api, input).await {
            Ok(response) => {
                let session = Session {
                    token: response.access_token,
                    user: response.user.clone(),
                };
                self.repository.save(&session);
                self.state = SessionState::Authenticated;
                Ok(response.user)
            }
            Err(e) => {
                self.state = SessionState::Anonymous;
                Err(e)
            }
        }
    }

    pub async fn register(
        &mut self,
        api: &ApiClient,
        input: &RegisterInput,
    ) -> Result<User, ApiError> {
        self.state = SessionState::Authenticating;
        match auth::register(api, input).await {
            Ok(response) => {
                let session = Session {
                    token: response.access_token,
                    user: response.user.clone(),
                };
                self.repository.save(&session);
                self.state = SessionState::Authenticated;
                Ok(response.user)
            }
            Err(e) => {
                self.state = SessionState::Anonymous;
                Err(e)
            }
        }
    }

    /// Re-fetch the profile from the backend and refresh the stored
    /// snapshot, keeping the same token. A failing fetch means the token is
    /// no longer valid, so the session is dropped. Without a stored session
    /// there is nothing to refresh and the call reports `Unauthorized`
    /// directly, skipping the backend.
    pub async fn refresh_profile(&mut self, api: &ApiClient) -> Result<User, ApiError> {
        let session = match self.repository.load() {
            Some(s) => s,
            None => return Err(ApiError::Unauthorized),
        };

        match auth::profile(api, &session.token).await {
            Ok(user) => {
                self.repository.save(&Session {
                    token: session.token,
                    user: user.clone(),
                });
                Ok(user)
            }
            Err(e) => {
                self.logout();
                Err(e)
            }
        }
    }

    pub fn logout(&mut self) {
        self.repository.clear();
        self.state = SessionState::Anonymous;
    }
}
