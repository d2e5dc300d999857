//! Store-wide invariant checks
//!
//! Operations keep the store consistent on their own; this verifier exists
//! for data that did not come through them (snapshots, seed data) and for
//! property tests. It reports every violation rather than stopping at the
//! first one.

use crate::store::{EntityStore, TableVisitor};
use crate::table::Table;
use incidentdb_core::{Entity, EntityId, TableName};
use std::collections::HashMap;
use std::fmt;

/// One broken invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A non-null foreign key names a record that does not exist
    DanglingReference {
        /// Table of the referencing record
        table: TableName,
        /// Identifier of the referencing record
        id: u64,
        /// Referencing field
        field: &'static str,
        /// Table referenced
        target: TableName,
        /// Identifier referenced
        target_id: u64,
    },
    /// Two records share a value that must be unique
    DuplicateKey {
        /// Table holding both records
        table: TableName,
        /// Constrained field
        field: &'static str,
        /// Shared value
        value: String,
        /// First record holding the value
        first: u64,
        /// Second record holding the value
        second: u64,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DanglingReference {
                table,
                id,
                field,
                target,
                target_id,
            } => write!(
                f,
                "{} {}: {} references missing {} {}",
                table, id, field, target, target_id
            ),
            Violation::DuplicateKey {
                table,
                field,
                value,
                first,
                second,
            } => write!(
                f,
                "{}: {} '{}' shared by {} and {}",
                table, field, value, first, second
            ),
        }
    }
}

struct Verifier<'a> {
    store: &'a EntityStore,
    violations: Vec<Violation>,
}

impl TableVisitor for Verifier<'_> {
    fn visit<E: Entity>(&mut self, table: &Table<E>) {
        let mut seen: HashMap<(&'static str, String), u64> = HashMap::new();
        for record in table.iter() {
            let id = record.id().raw();
            for r in record.references() {
                if !self.store.contains(r.table, r.id) {
                    self.violations.push(Violation::DanglingReference {
                        table: E::TABLE,
                        id,
                        field: r.field,
                        target: r.table,
                        target_id: r.id,
                    });
                }
            }
            for key in record.unique_keys() {
                let field = key.field;
                if let Some(first) = seen.insert((field, key.value.clone()), id) {
                    self.violations.push(Violation::DuplicateKey {
                        table: E::TABLE,
                        field,
                        value: key.value,
                        first,
                        second: id,
                    });
                }
            }
        }
    }
}

/// Every invariant violation in `store`, in table order.
pub fn verify(store: &EntityStore) -> Vec<Violation> {
    let mut verifier = Verifier {
        store,
        violations: Vec::new(),
    };
    store.visit(&mut verifier);
    verifier.violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use incidentdb_core::*;

    fn user(id: u64, email: &str, client: Option<u64>) -> User {
        User {
            user_id: UserId::new(id),
            name: format!("User {}", id),
            email: email.into(),
            role: if client.is_some() {
                UserRole::ClientContact
            } else {
                UserRole::TechnicalSupport
            },
            department: None,
            client_id: client.map(ClientId::new),
            vendor_id: None,
            timezone: "UTC".into(),
            status: UserStatus::Active,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn empty_store_is_consistent() {
        assert!(verify(&EntityStore::new()).is_empty());
    }

    #[test]
    fn reports_dangling_reference() {
        let mut store = EntityStore::new();
        store.table_mut::<User>().insert(user(1, "a@x.test", Some(99)));
        let violations = verify(&store);
        assert_eq!(
            violations,
            vec![Violation::DanglingReference {
                table: TableName::Users,
                id: 1,
                field: "client_id",
                target: TableName::Clients,
                target_id: 99,
            }]
        );
        assert!(violations[0].to_string().contains("client_id"));
    }

    #[test]
    fn reports_duplicate_unique_value() {
        let mut store = EntityStore::new();
        store.table_mut::<User>().insert(user(1, "dup@x.test", None));
        store.table_mut::<User>().insert(user(2, "dup@x.test", None));
        store.table_mut::<User>().insert(user(3, "DUP@x.test", None));
        let violations = verify(&store);
        assert_eq!(violations.len(), 1);
        match &violations[0] {
            Violation::DuplicateKey { first, second, .. } => {
                assert_eq!((*first, *second), (1, 2));
            }
            other => panic!("unexpected violation: {}", other),
        }
    }
}
