//! User document model.
//!
//! A [`User`] is the unit of persistence: profile fields, the embedded
//! [`AccountList`], and the revision it was read at.

use std::fmt;

use uuid::Uuid;

use super::bank_account::AccountList;
use super::rules::RuleViolation;

/// Validation errors returned when parsing a [`UserId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was blank.
    #[error("user id must not be empty")]
    EmptyId,
    /// The identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
}

/// Stable user identifier stored as a UUID.
///
/// Any accepted spelling (uppercase, unhyphenated) is normalised to the
/// lowercase hyphenated form, so equality and lookups follow the UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self::from_uuid(parsed))
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Personal details held on a user document.
///
/// The password is stored as supplied and compared verbatim during basic
/// authentication. `Debug` output redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login name checked by basic authentication.
    pub username: String,
    /// Login secret checked by basic authentication.
    pub password: String,
    /// National identity card number.
    pub id_card: String,
    /// Age in years.
    pub age: i64,
    /// Contact email address.
    pub email: String,
    /// Contact telephone number.
    pub tel: String,
}

impl fmt::Debug for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserProfile")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("id_card", &self.id_card)
            .field("age", &self.age)
            .field("email", &self.email)
            .field("tel", &self.tel)
            .finish()
    }
}

impl UserProfile {
    /// Check every field is present, reporting the first gap.
    pub fn validate(&self) -> Result<(), RuleViolation> {
        let text_fields = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("username", &self.username),
            ("password", &self.password),
            ("idCard", &self.id_card),
        ];
        if let Some((field, _)) = text_fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(RuleViolation::missing_field(*field));
        }
        if self.age == 0 {
            return Err(RuleViolation::missing_field("age"));
        }
        if self.email.is_empty() {
            return Err(RuleViolation::missing_field("email"));
        }
        if self.tel.is_empty() {
            return Err(RuleViolation::missing_field("tel"));
        }
        Ok(())
    }

    /// Overlay the non-empty values of `patch`.
    #[must_use]
    pub fn merge(self, patch: &UserPatch) -> Self {
        fn pick(current: String, candidate: Option<&String>) -> String {
            match candidate {
                Some(value) if !value.is_empty() => value.clone(),
                _ => current,
            }
        }

        Self {
            first_name: pick(self.first_name, patch.first_name.as_ref()),
            last_name: pick(self.last_name, patch.last_name.as_ref()),
            username: pick(self.username, patch.username.as_ref()),
            password: pick(self.password, patch.password.as_ref()),
            id_card: pick(self.id_card, patch.id_card.as_ref()),
            age: match patch.age {
                Some(age) if age != 0 => age,
                _ => self.age,
            },
            email: pick(self.email, patch.email.as_ref()),
            tel: pick(self.tel, patch.tel.as_ref()),
        }
    }
}

/// Sparse update for a [`UserProfile`].
///
/// Empty strings and a zero age are treated the same as absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// Replacement given name.
    pub first_name: Option<String>,
    /// Replacement family name.
    pub last_name: Option<String>,
    /// Replacement login name.
    pub username: Option<String>,
    /// Replacement login secret.
    pub password: Option<String>,
    /// Replacement identity card number.
    pub id_card: Option<String>,
    /// Replacement age.
    pub age: Option<i64>,
    /// Replacement email address.
    pub email: Option<String>,
    /// Replacement telephone number.
    pub tel: Option<String>,
}

/// A user document together with the revision it was read at.
///
/// ## Invariants
/// - `id` never changes after creation.
/// - `revision` starts at 1 and increases by one on every write.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    profile: UserProfile,
    bank_accounts: AccountList,
    revision: u64,
}

/// Revision assigned to freshly created documents.
pub const INITIAL_REVISION: u64 = 1;

impl User {
    /// Assemble a user from stored components.
    pub fn new(id: UserId, profile: UserProfile, bank_accounts: AccountList, revision: u64) -> Self {
        Self {
            id,
            profile,
            bank_accounts,
            revision,
        }
    }

    /// A new document with no accounts at [`INITIAL_REVISION`].
    pub fn register(id: UserId, profile: UserProfile) -> Self {
        Self::new(id, profile, AccountList::default(), INITIAL_REVISION)
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Profile fields.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Embedded accounts in stored order.
    pub fn bank_accounts(&self) -> &AccountList {
        &self.bank_accounts
    }

    /// Revision this snapshot was read or written at.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether `username` and `password` match the stored credentials.
    pub fn accepts(&self, username: &str, password: &str) -> bool {
        self.profile.username == username && self.profile.password == password
    }

    /// Copy of this document with `bank_accounts` swapped in.
    #[must_use]
    pub fn with_bank_accounts(&self, bank_accounts: AccountList) -> Self {
        Self {
            bank_accounts,
            ..self.clone()
        }
    }

    /// Copy of this document with `profile` swapped in.
    #[must_use]
    pub fn with_profile(&self, profile: UserProfile) -> Self {
        Self {
            profile,
            ..self.clone()
        }
    }

    /// The same document stamped with `revision`.
    #[must_use]
    pub fn at_revision(self, revision: u64) -> Self {
        Self { revision, ..self }
    }

    /// The same document stamped with the revision a successful replace
    /// will store.
    #[must_use]
    pub fn next_revision(self) -> Self {
        let revision = self.revision.saturating_add(1);
        self.at_revision(revision)
    }
}
