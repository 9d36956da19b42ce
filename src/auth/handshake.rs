//! The authorization-code handshake: building the outbound redirect and
//! completing the return leg.
//!
//! Both halves run against injected seams (`AuthStore`, `Notifier`,
//! `CodeExchanger`) so the flow is testable without a browser, a session
//! layer, or a network.

use oauth2::CsrfToken;
use reqwest::Url;

use crate::auth::exchange::CodeExchanger;
use crate::auth::notify::{Notifier, ToastLevel};
use crate::auth::store::{AuthStore, StoreError};
use crate::models::AppConfig;
use crate::models::oauth::{CallbackParams, ExchangeResponse, UserProfile};

/// Query half of the outbound authorization redirect. Ephemeral: it lives
/// only long enough to render the URL.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub state: String,
}

impl AuthorizationRequest {
    /// Renders the provider URL. The serializer percent-encodes the
    /// redirect URI and scope; `response_type` is fixed to the code flow
    /// and consent is always re-prompted.
    pub fn authorize_url(&self, auth_endpoint: &Url) -> Url {
        let mut url = auth_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.scope)
            .append_pair("state", &self.state)
            .append_pair("prompt", "consent");
        url
    }
}

/// Outcome of one pass over the return URL.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// No code, or the state did not match the pending slot. Silent; this
    /// is every ordinary page load.
    NotOAuthReturn,
    /// The provider reported an authorization error.
    ProviderDenied(String),
    /// The backend accepted the code; the store is now signed in.
    SignedIn(UserProfile),
    /// The backend explicitly rejected the code.
    Rejected,
    /// Transport failure, non-2xx status, malformed body, or a success
    /// verdict with no user attached.
    ExchangeFailed,
}

impl Completion {
    /// Whether the visible URL should be stripped of its query string.
    /// Only attempts that reached the exchange clean up; a provider error
    /// or an ordinary page load leaves the URL alone.
    pub fn clean_url(&self) -> bool {
        matches!(
            self,
            Completion::SignedIn(_) | Completion::Rejected | Completion::ExchangeFailed
        )
    }
}

/// Starts an authorization attempt: generates an unguessable state token,
/// stores it in the single pending slot (invalidating any earlier attempt),
/// and returns the provider URL to navigate to.
pub async fn begin_authorization<S, N>(
    config: &AppConfig,
    store: &S,
    notify: &N,
) -> Result<Url, StoreError>
where
    S: AuthStore,
    N: Notifier,
{
    let state = CsrfToken::new_random();
    store.set_pending_state(state.secret().to_string()).await?;

    let request = AuthorizationRequest {
        client_id: config.client_id.clone(),
        redirect_uri: config.redirect_url.clone(),
        scope: config.scope.clone(),
        state: state.secret().to_string(),
    };
    let url = request.authorize_url(&config.auth_url);

    notify.notify(
        ToastLevel::Info,
        "Redirecting to Google for authentication...",
    );
    Ok(url)
}

/// Completes the return leg of the handshake. Runs on every callback-page
/// load; anything that is not a genuine OAuth return resolves to
/// `Completion::NotOAuthReturn` without a sound.
pub async fn complete_authorization<S, N, X>(
    params: &CallbackParams,
    store: &S,
    exchanger: &X,
    notify: &N,
) -> Result<Completion, StoreError>
where
    S: AuthStore,
    N: Notifier,
    X: CodeExchanger,
{
    if let Some(error) = &params.error {
        // The pending slot stays put: the user may retry and complete the
        // same attempt later.
        notify.notify(ToastLevel::Error, &format!("Auth failed: {error}"));
        return Ok(Completion::ProviderDenied(error.clone()));
    }

    let (Some(code), Some(state)) = (params.code.as_deref(), params.state.as_deref()) else {
        return Ok(Completion::NotOAuthReturn);
    };

    if store.pending_state().await?.as_deref() != Some(state) {
        return Ok(Completion::NotOAuthReturn);
    }

    notify.notify(ToastLevel::Info, "Verifying Google account...");
    // Single use: the slot is cleared before the exchange so a replayed
    // callback can never redeem the same state twice.
    store.clear_pending_state().await?;

    match exchanger.exchange(code).await {
        Ok(ExchangeResponse {
            success: true,
            user: Some(user),
        }) => {
            store.record_sign_in(user.clone()).await?;
            notify.notify(ToastLevel::Success, &format!("Welcome {}!", user.name));
            Ok(Completion::SignedIn(user))
        }
        Ok(ExchangeResponse {
            success: true,
            user: None,
        }) => {
            tracing::error!("exchange succeeded but returned no user");
            notify.notify(ToastLevel::Error, "Server error during login");
            Ok(Completion::ExchangeFailed)
        }
        Ok(ExchangeResponse { success: false, .. }) => {
            notify.notify(ToastLevel::Error, "Login failed. Try again.");
            Ok(Completion::Rejected)
        }
        Err(err) => {
            tracing::error!(error = %err, "code exchange failed");
            notify.notify(ToastLevel::Error, "Server error during login");
            Ok(Completion::ExchangeFailed)
        }
    }
}
