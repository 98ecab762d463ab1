//! Checkout locking for documents.
//!
//! A document is either unlocked or holds exactly one opaque token. Every
//! check-and-set here runs against a row already selected `FOR UPDATE`
//! inside the caller's transaction, so concurrent acquires on the same
//! document resolve to exactly one winner even across multiple server
//! instances. There is no in-process lock state.

use rand::RngCore;
use sea_orm::{ActiveModelTrait, DatabaseTransaction, Set};

use crate::entity::document;
use crate::error::AppError;

/// Lock dimension of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    Locked(String),
}

impl LockState {
    /// Interpret the stored lock column. Empty strings count as unlocked so
    /// that no sentinel value can masquerade as a token.
    pub fn from_column(column: Option<&str>) -> Self {
        match column {
            Some(token) if !token.is_empty() => Self::Locked(token.to_string()),
            _ => Self::Unlocked,
        }
    }

    pub fn of(doc: &document::Model) -> Self {
        Self::from_column(doc.lock.as_deref())
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked(_))
    }
}

/// Generate a fresh 128-bit lock token as lowercase hex.
///
/// Tokens are unrelated to document identity and never reissued: releasing
/// a lock invalidates its token for good.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// A create request must not carry a lock token.
pub fn validate_for_create(supplied: Option<&str>) -> Result<(), AppError> {
    if supplied.is_some_and(|token| !token.is_empty()) {
        return Err(AppError::LockedAtCreate);
    }
    Ok(())
}

/// An update request must present the token currently held by the document.
pub fn validate_for_update(state: &LockState, supplied: Option<&str>) -> Result<(), AppError> {
    match state {
        LockState::Unlocked => Err(AppError::Unlocked),
        LockState::Locked(token) => {
            if supplied == Some(token.as_str()) {
                Ok(())
            } else {
                Err(AppError::LockMismatch)
            }
        }
    }
}

/// Lock a document, returning the new token.
///
/// `doc` must have been selected `FOR UPDATE` on `txn`.
pub async fn acquire(
    txn: &DatabaseTransaction,
    doc: document::Model,
) -> Result<String, AppError> {
    if LockState::of(&doc).is_locked() {
        return Err(AppError::AlreadyLocked);
    }

    let token = generate_token();
    let mut active: document::ActiveModel = doc.into();
    active.lock = Set(Some(token.clone()));
    active.updated_at = Set(chrono::Utc::now());
    active.update(txn).await?;

    Ok(token)
}

/// Unlock a document.
///
/// Without `force` the supplied token must match the stored one. `force`
/// clears the lock unconditionally (administrative override). `doc` must
/// have been selected `FOR UPDATE` on `txn`.
pub async fn release(
    txn: &DatabaseTransaction,
    doc: document::Model,
    supplied: Option<&str>,
    force: bool,
) -> Result<(), AppError> {
    if !force {
        match LockState::of(&doc) {
            LockState::Unlocked => {
                if supplied.is_some_and(|token| !token.is_empty()) {
                    return Err(AppError::LockMismatch);
                }
            }
            LockState::Locked(token) => {
                if supplied != Some(token.as_str()) {
                    return Err(AppError::LockMismatch);
                }
            }
        }
    }

    let mut active: document::ActiveModel = doc.into();
    active.lock = Set(None);
    active.updated_at = Set(chrono::Utc::now());
    active.update(txn).await?;

    Ok(())
}
