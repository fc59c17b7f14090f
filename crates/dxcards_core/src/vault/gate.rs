//! Vault gate state machine.
//!
//! # Responsibility
//! - Track `Uninitialized` / `Locked` / `Unlocked` session state.
//! - Validate set/verify/change password inputs.
//!
//! # Invariants
//! - `Unlocked` reverts to `Locked` only through an explicit [`VaultGate::lock`].
//! - Failed credential operations never advance state and never produce
//!   a token to persist.
//! - The gate never stores a plaintext password, only the encoded token.

use crate::vault::digest::{encode_token, verify_token, DigestScheme};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Gate session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No credential stored yet; a set-password flow is required.
    Uninitialized,
    /// Credential stored, session not verified.
    Locked,
    /// Verified this session.
    Unlocked,
}

pub type VaultResult<T> = Result<T, VaultError>;

/// Credential-flow errors surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    EmptyPassword,
    PasswordMismatch,
    IncorrectPassword,
    GateLocked,
}

impl Display for VaultError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPassword => write!(f, "empty password"),
            Self::PasswordMismatch => write!(f, "passwords must match"),
            Self::IncorrectPassword => write!(f, "incorrect password"),
            Self::GateLocked => write!(f, "vault is locked"),
        }
    }
}

impl Error for VaultError {}

/// Two-state password gate in front of all mutating operations.
///
/// The gate owns no persistence: successful set/change operations return
/// the encoded token and the caller stores it.
#[derive(Debug)]
pub struct VaultGate {
    scheme: DigestScheme,
    stored_token: Option<String>,
    unlocked: bool,
}

impl VaultGate {
    /// Creates a gate from the persisted token, with the default scheme
    /// for new tokens.
    pub fn new(stored_token: Option<String>) -> Self {
        Self::with_scheme(DigestScheme::default(), stored_token)
    }

    /// Creates a gate encoding new tokens under an explicit scheme.
    ///
    /// Verification always follows the stored token's own prefix, so a
    /// scheme change never invalidates an existing credential.
    pub fn with_scheme(scheme: DigestScheme, stored_token: Option<String>) -> Self {
        Self {
            scheme,
            stored_token,
            unlocked: false,
        }
    }

    pub fn state(&self) -> GateState {
        if self.stored_token.is_none() {
            GateState::Uninitialized
        } else if self.unlocked {
            GateState::Unlocked
        } else {
            GateState::Locked
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.state() == GateState::Unlocked
    }

    /// Whether startup must run the forced set-password flow.
    pub fn needs_setup(&self) -> bool {
        self.stored_token.is_none()
    }

    /// Stores a new credential and unlocks the session.
    ///
    /// Returns the encoded token for the caller to persist.
    ///
    /// # Errors
    /// - `EmptyPassword` when the input is empty.
    pub fn set_password(&mut self, password: &str) -> VaultResult<String> {
        if password.is_empty() {
            return Err(VaultError::EmptyPassword);
        }
        let token = encode_token(self.scheme, password);
        self.stored_token = Some(token.clone());
        self.unlocked = true;
        Ok(token)
    }

    /// Checks a password against the stored credential.
    ///
    /// A match unlocks the session; a mismatch leaves the gate locked and
    /// reports `IncorrectPassword` without revealing anything further.
    pub fn verify(&mut self, password: &str) -> VaultResult<()> {
        let matches = self
            .stored_token
            .as_deref()
            .is_some_and(|stored| verify_token(stored, password));
        if !matches {
            return Err(VaultError::IncorrectPassword);
        }
        self.unlocked = true;
        Ok(())
    }

    /// Replaces the credential while unlocked.
    ///
    /// Re-verification of the old password is intentionally not required.
    /// Returns the new encoded token for the caller to persist.
    ///
    /// # Errors
    /// - `GateLocked` unless the session is unlocked.
    /// - `PasswordMismatch` when confirmation differs.
    /// - `EmptyPassword` when the input is empty.
    pub fn change_password(&mut self, password: &str, confirm: &str) -> VaultResult<String> {
        if !self.is_unlocked() {
            return Err(VaultError::GateLocked);
        }
        if password != confirm {
            return Err(VaultError::PasswordMismatch);
        }
        if password.is_empty() {
            return Err(VaultError::EmptyPassword);
        }
        let token = encode_token(self.scheme, password);
        self.stored_token = Some(token.clone());
        Ok(token)
    }

    /// Explicitly relocks the session. The credential is untouched.
    pub fn lock(&mut self) {
        self.unlocked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{GateState, VaultError, VaultGate};
    use crate::vault::digest::{encode_token, DigestScheme};

    #[test]
    fn starts_uninitialized_without_a_stored_token() {
        let gate = VaultGate::new(None);
        assert_eq!(gate.state(), GateState::Uninitialized);
        assert!(gate.needs_setup());
        assert!(!gate.is_unlocked());
    }

    #[test]
    fn starts_locked_with_a_stored_token() {
        let token = encode_token(DigestScheme::Sha256, "pw");
        let gate = VaultGate::new(Some(token));
        assert_eq!(gate.state(), GateState::Locked);
        assert!(!gate.needs_setup());
    }

    #[test]
    fn set_password_rejects_empty_input_and_stays_uninitialized() {
        let mut gate = VaultGate::new(None);
        let err = gate.set_password("").expect_err("empty password must fail");
        assert_eq!(err, VaultError::EmptyPassword);
        assert_eq!(gate.state(), GateState::Uninitialized);
    }

    #[test]
    fn set_then_verify_round_trip() {
        let mut gate = VaultGate::new(None);
        let token = gate.set_password("pw").expect("set should succeed");
        assert_eq!(gate.state(), GateState::Unlocked);

        let mut next_session = VaultGate::new(Some(token));
        assert_eq!(next_session.state(), GateState::Locked);
        let err = next_session
            .verify("wrong")
            .expect_err("wrong password must fail");
        assert_eq!(err, VaultError::IncorrectPassword);
        assert_eq!(next_session.state(), GateState::Locked);

        next_session.verify("pw").expect("correct password unlocks");
        assert_eq!(next_session.state(), GateState::Unlocked);
    }

    #[test]
    fn verify_against_uninitialized_gate_reports_incorrect_password() {
        let mut gate = VaultGate::new(None);
        let err = gate.verify("anything").expect_err("no credential to match");
        assert_eq!(err, VaultError::IncorrectPassword);
    }

    #[test]
    fn change_password_requires_unlocked_gate() {
        let token = encode_token(DigestScheme::Sha256, "old");
        let mut gate = VaultGate::new(Some(token));
        let err = gate
            .change_password("new", "new")
            .expect_err("locked gate must reject change");
        assert_eq!(err, VaultError::GateLocked);
    }

    #[test]
    fn change_password_validates_confirmation_and_emptiness() {
        let mut gate = VaultGate::new(None);
        gate.set_password("old").expect("set should succeed");

        let err = gate
            .change_password("new", "different")
            .expect_err("mismatch must fail");
        assert_eq!(err, VaultError::PasswordMismatch);

        let err = gate
            .change_password("", "")
            .expect_err("empty replacement must fail");
        assert_eq!(err, VaultError::EmptyPassword);

        let token = gate
            .change_password("new", "new")
            .expect("matching confirmation succeeds");
        assert_eq!(gate.state(), GateState::Unlocked);

        let mut next_session = VaultGate::new(Some(token));
        next_session.verify("new").expect("new password verifies");
        assert!(next_session.verify("old").is_err());
    }

    #[test]
    fn lock_is_explicit_and_keeps_the_credential() {
        let mut gate = VaultGate::new(None);
        gate.set_password("pw").expect("set should succeed");
        gate.lock();
        assert_eq!(gate.state(), GateState::Locked);
        gate.verify("pw").expect("relock does not clear credential");
    }
}
