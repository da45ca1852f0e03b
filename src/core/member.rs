use crate::core::currency::CurrencyCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a member within a group.
///
/// Ordering on member ids is used as the deterministic tie-breaker
/// throughout the ledger: remainder distribution, balance emission and
/// settlement matching all resolve ties by ascending member id.
///
/// # Examples
///
/// ```
/// use split_ledger::core::member::MemberId;
///
/// let alice = MemberId::new("alice");
/// let bob = MemberId::new("bob");
/// assert_ne!(alice, bob);
/// assert!(alice < bob);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Create a new member identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this member id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for MemberId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A member of an expense-sharing group: an id plus a display name.
///
/// Members are immutable for the duration of a computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    name: String,
}

impl Member {
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> &MemberId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An immutable snapshot of a group: its members and its display currency.
///
/// The ledger never holds group state between calls. Callers assemble a
/// snapshot from whatever store they use and pass it into each computation;
/// the snapshot is read, never mutated.
///
/// # Examples
///
/// ```
/// use split_ledger::core::currency::CurrencyCode;
/// use split_ledger::core::member::{GroupSnapshot, Member, MemberId};
///
/// let group = GroupSnapshot::new(
///     vec![Member::new("alice", "Alice"), Member::new("bob", "Bob")],
///     CurrencyCode::new("USD"),
/// );
/// assert_eq!(group.len(), 2);
/// assert!(group.contains(&MemberId::new("alice")));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSnapshot {
    members: Vec<Member>,
    currency: CurrencyCode,
}

impl GroupSnapshot {
    pub fn new(members: Vec<Member>, currency: CurrencyCode) -> Self {
        Self { members, currency }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether a member id belongs to this group.
    pub fn contains(&self, id: &MemberId) -> bool {
        self.members.iter().any(|m| m.id() == id)
    }

    /// Look up a member by id.
    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id() == id)
    }

    /// All member ids in ascending order.
    pub fn sorted_member_ids(&self) -> Vec<MemberId> {
        let mut ids: Vec<MemberId> = self.members.iter().map(|m| m.id().clone()).collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id_equality() {
        let a = MemberId::new("alice");
        let b = MemberId::new("alice");
        let c = MemberId::new("carol");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_member_id_display() {
        let id = MemberId::new("dana");
        assert_eq!(format!("{}", id), "dana");
    }

    #[test]
    fn test_member_id_ordering() {
        let a = MemberId::new("alice");
        let b = MemberId::new("bob");
        assert!(a < b);
    }

    #[test]
    fn test_group_lookup() {
        let group = GroupSnapshot::new(
            vec![Member::new("bob", "Bob"), Member::new("alice", "Alice")],
            CurrencyCode::new("EUR"),
        );
        assert!(group.contains(&MemberId::new("bob")));
        assert!(!group.contains(&MemberId::new("mallory")));
        assert_eq!(group.member(&MemberId::new("alice")).unwrap().name(), "Alice");
    }

    #[test]
    fn test_sorted_member_ids() {
        let group = GroupSnapshot::new(
            vec![
                Member::new("carol", "Carol"),
                Member::new("alice", "Alice"),
                Member::new("bob", "Bob"),
            ],
            CurrencyCode::new("USD"),
        );
        let ids = group.sorted_member_ids();
        assert_eq!(
            ids,
            vec![
                MemberId::new("alice"),
                MemberId::new("bob"),
                MemberId::new("carol")
            ]
        );
    }
}
