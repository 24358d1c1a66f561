use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::AppendHeaders,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        approval,
        dto::{LoginRequest, SessionResponse, SignupRequest, SignupResponse},
        extractors::{session_token, SESSION_COOKIE},
        password::{hash_password, verify_password},
        repo_types::{Account, AccountStatus},
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/approve/:reference", get(approve))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    payload.email = payload.email.trim().to_string();

    if payload.email.is_empty() {
        return Err(ApiError::MissingField("email"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::MissingField("password"));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "signup with invalid email");
        return Err(ApiError::InvalidEmail);
    }

    let hash = hash_password(&payload.password)?;
    let account = Account::create(&state.db, &payload.email, &hash).await?;

    // The account row is committed at this point; notification is
    // fire-and-forget and must not affect the response.
    let reference = approval::issue_reference(&account);
    let approve_url = approval::approval_link(&state.config.public_base_url, &reference);
    let notifier = state.notifier.clone();
    let email = account.email.clone();
    tokio::spawn(async move {
        if let Err(e) = notifier.approval_requested(&email, &approve_url).await {
            warn!(error = %e, %email, "approval notification failed");
        }
    });

    info!(account_id = %account.id, email = %account.email, "account registered, pending approval");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Request sent! Waiting for admin approval.",
            account: account.into(),
        }),
    ))
}

#[instrument(skip(state))]
pub async fn approve(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<String, ApiError> {
    let account =
        approval::redeem(&state.db, &reference, state.config.approval_single_use).await?;
    info!(account_id = %account.id, email = %account.email, "account approved");
    Ok(format!("User {} has been approved!", account.email))
}

/// Per-attempt login checks, evaluated in strict order; each failure
/// short-circuits the rest.
fn check_login(account: Option<Account>, password: &str) -> Result<Account, ApiError> {
    let account = account.ok_or(ApiError::AccountNotFound)?;

    if !verify_password(password, &account.password_hash)? {
        warn!(account_id = %account.id, "login with invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    if account.status != AccountStatus::Approved {
        warn!(account_id = %account.id, "login before approval");
        return Err(ApiError::PendingApproval);
    }

    Ok(account)
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<(AppendHeaders<[(header::HeaderName, String); 1]>, Json<SessionResponse>), ApiError> {
    payload.email = payload.email.trim().to_string();

    let found = Account::find_by_email(&state.db, &payload.email).await?;
    if found.is_none() {
        warn!(email = %payload.email, "login for unknown email");
    }
    let account = check_login(found, &payload.password)?;

    let token = state.sessions.issue(account.id);
    info!(account_id = %account.id, email = %account.email, "login success");

    let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(SessionResponse {
            token,
            account: account.into(),
        }),
    ))
}

/// Destroys whatever session the request carries. Always succeeds, even for
/// an already-absent session.
#[instrument(skip(state, headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (StatusCode, AppendHeaders<[(header::HeaderName, String); 1]>) {
    if let Some(token) = session_token(&headers) {
        state.sessions.revoke(&token);
    }
    let clear = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    (StatusCode::NO_CONTENT, AppendHeaders([(header::SET_COOKIE, clear)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn account_with(password: &str, status: AccountStatus) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            password_hash: hash_password(password).expect("hash"),
            status,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn login_fails_for_unknown_account() {
        let err = check_login(None, "pw1").unwrap_err();
        assert!(matches!(err, ApiError::AccountNotFound));
    }

    #[test]
    fn wrong_password_is_reported_before_approval_status() {
        // A pending account with a bad password must fail the credential
        // check, not the approval check.
        let account = account_with("pw1", AccountStatus::Pending);
        let err = check_login(Some(account), "wrong").unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials));
    }

    #[test]
    fn pending_account_cannot_log_in_with_correct_password() {
        let account = account_with("pw1", AccountStatus::Pending);
        let err = check_login(Some(account), "pw1").unwrap_err();
        assert!(matches!(err, ApiError::PendingApproval));
    }

    #[test]
    fn approved_account_logs_in() {
        let account = account_with("pw1", AccountStatus::Approved);
        let id = account.id;
        let logged_in = check_login(Some(account), "pw1").expect("login should pass");
        assert_eq!(logged_in.id, id);
    }

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@x.com"));
        assert!(!is_valid_email("spaces in@x.com"));
        assert!(!is_valid_email("no-tld@host"));
    }
}
