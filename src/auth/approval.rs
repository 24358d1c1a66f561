use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::{Account, AccountStatus};
use crate::error::ApiError;

/// Opaque reference embedded in the approval link. Deterministically
/// resolves back to the account on redemption.
pub fn issue_reference(account: &Account) -> String {
    account.id.to_string()
}

/// Absolute URL the administrator clicks to approve the account.
pub fn approval_link(base_url: &str, reference: &str) -> String {
    format!("{}/approve/{}", base_url.trim_end_matches('/'), reference)
}

fn parse_reference(reference: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(reference).map_err(|_| ApiError::AccountNotFound)
}

/// Redeem an approval reference: the one-way pending → approved transition.
///
/// Redeeming an already-approved account is a no-op success, so a link
/// clicked twice stays harmless. With `single_use` the second redemption is
/// rejected instead.
pub async fn redeem(db: &PgPool, reference: &str, single_use: bool) -> Result<Account, ApiError> {
    let id = parse_reference(reference)?;
    let account = Account::find_by_id(db, id)
        .await?
        .ok_or(ApiError::AccountNotFound)?;

    if account.status == AccountStatus::Approved {
        if single_use {
            return Err(ApiError::ApprovalConsumed);
        }
        return Ok(account);
    }

    Account::approve(db, id).await
}
