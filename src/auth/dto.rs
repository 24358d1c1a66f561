use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::{Account, AccountStatus};

/// Request body for signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public part of an account returned to clients.
#[derive(Debug, Serialize)]
pub struct PublicAccount {
    pub id: Uuid,
    pub email: String,
    pub status: AccountStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Account> for PublicAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            status: account.status,
            created_at: account.created_at,
        }
    }
}

/// Response for a successful signup; the account awaits admin approval.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub account: PublicAccount,
}

/// Response for a successful login.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub account: PublicAccount,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$secret".into(),
            status: AccountStatus::Approved,
            created_at: time::macros::datetime!(2024-05-01 12:00 UTC),
        }
    }

    #[test]
    fn public_account_omits_the_hash() {
        let json = serde_json::to_string(&PublicAccount::from(account())).unwrap();
        assert!(json.contains("a@x.com"));
        assert!(json.contains("\"approved\""));
        assert!(!json.contains("argon2id"));
    }

    #[test]
    fn timestamps_serialize_as_rfc3339() {
        let json = serde_json::to_string(&PublicAccount::from(account())).unwrap();
        assert!(json.contains("2024-05-01T12:00:00Z"));
    }

    #[test]
    fn session_response_carries_token_and_account() {
        let response = SessionResponse {
            token: "tok".into(),
            account: account().into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"token\":\"tok\""));
        assert!(json.contains("a@x.com"));
    }
}
