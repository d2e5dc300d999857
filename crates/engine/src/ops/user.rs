//! User operations.
//!
//! A user may be bound to a client or a vendor according to its role; the
//! binding is checked on the merged record, so an update that only changes
//! the role is rejected when it would orphan an existing binding.

use super::{commit, commit_update, listing, load_target};
use crate::context::OpContext;
use crate::discover::{contains_ci, eq_ci, id_is, opt_id_is, vocab_is};
use crate::lifecycle::role_binding;
use crate::patch::{apply, apply_enum, apply_opt_ref, apply_text, double_option, overlay};
use crate::validate::{ensure_unique, parse_enum, parse_opt_enum, require_opt, require_text};
use incidentdb_core::{Client, IncidentResult, RawId, User, UserId, UserStatus, Vendor};
use incidentdb_storage::EntityStore;
use serde::{Deserialize, Serialize};

/// Timezone given to users created without one.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Arguments of `create_user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUser {
    pub name: String,
    /// Unique across users.
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub department: Option<String>,
    /// Only for role `client_contact`.
    #[serde(default)]
    pub client_id: Option<RawId>,
    /// Only for role `vendor_contact`.
    #[serde(default)]
    pub vendor_id: Option<RawId>,
    /// Default: `UTC`.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Default: `active`.
    #[serde(default)]
    pub status: Option<String>,
}

/// Mutable user fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub department: Option<Option<String>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Option<RawId>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<Option<RawId>>,
    pub timezone: Option<String>,
    pub status: Option<String>,
}

/// Arguments of `update_user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUser {
    pub user_id: RawId,
    #[serde(default)]
    pub change_set: UserPatch,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Filters of `discover_users`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserFilter {
    pub user_id: Option<RawId>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub client_id: Option<RawId>,
    pub vendor_id: Option<RawId>,
    pub status: Option<String>,
}

/// Register a user.
pub fn create_user(store: &mut EntityStore, ctx: &OpContext, req: CreateUser) -> IncidentResult<UserId> {
    require_text("name", &req.name)?;
    require_text("email", &req.email)?;
    let role = parse_enum("role", &req.role)?;
    let status = parse_opt_enum("status", req.status.as_deref())?.unwrap_or(UserStatus::Active);
    let client_id = require_opt::<Client>(store, req.client_id.as_ref())?;
    let vendor_id = require_opt::<Vendor>(store, req.vendor_id.as_ref())?;
    role_binding(role, client_id.is_some(), vendor_id.is_some())?;

    let table = store.table::<User>();
    let record = User {
        user_id: table.next_id()?,
        name: req.name,
        email: req.email,
        role,
        department: req.department,
        client_id,
        vendor_id,
        timezone: req.timezone.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
        status,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    ensure_unique(table, &record)?;
    Ok(commit(store, record))
}

/// Update a user's profile, role or status.
pub fn update_user(store: &mut EntityStore, ctx: &OpContext, req: UpdateUser) -> IncidentResult<User> {
    let mut record: User = load_target(store, &req.user_id)?;
    let mut patch = req.change_set;
    overlay(&mut patch.role, req.role);
    overlay(&mut patch.status, req.status);

    apply_text("name", &mut record.name, patch.name)?;
    apply_text("email", &mut record.email, patch.email)?;
    apply_enum("role", &mut record.role, patch.role)?;
    apply(&mut record.department, patch.department);
    apply_opt_ref::<Client>(store, &mut record.client_id, patch.client_id)?;
    apply_opt_ref::<Vendor>(store, &mut record.vendor_id, patch.vendor_id)?;
    apply_text("timezone", &mut record.timezone, patch.timezone)?;
    apply_enum("status", &mut record.status, patch.status)?;
    role_binding(record.role, record.client_id.is_some(), record.vendor_id.is_some())?;
    record.updated_at = ctx.now.clone();

    ensure_unique(store.table::<User>(), &record)?;
    Ok(commit_update(store, record))
}

/// List users matching every supplied filter.
pub fn discover_users(store: &EntityStore, filter: &UserFilter) -> Vec<User> {
    listing(store, |u: &User| {
        id_is(&filter.user_id, u.user_id)
            && contains_ci(&filter.name, &u.name)
            && eq_ci(&filter.email, &u.email)
            && vocab_is(&filter.role, u.role)
            && opt_id_is(&filter.client_id, u.client_id)
            && opt_id_is(&filter.vendor_id, u.vendor_id)
            && vocab_is(&filter.status, u.status)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::testing::{ctx, raw, seeded};
    use incidentdb_core::{ClientId, ErrorKind, UserRole};

    fn contact(email: &str, role: &str) -> CreateUser {
        CreateUser {
            name: "Pat Contact".into(),
            email: email.into(),
            role: role.into(),
            department: None,
            client_id: Some(raw(1)),
            vendor_id: None,
            timezone: None,
            status: None,
        }
    }

    #[test]
    fn client_contact_binds_to_client() {
        let mut store = seeded();
        let id = create_user(&mut store, &ctx(), contact("pat@globex.test", "client_contact")).unwrap();
        assert_eq!(id, UserId::new(3));
        let user = store.get::<User>(id).unwrap();
        assert_eq!(user.client_id, Some(ClientId::new(1)));
        assert_eq!(user.timezone, DEFAULT_TIMEZONE);
        assert_eq!(user.status, UserStatus::Active);
    }

    #[test]
    fn other_roles_cannot_bind_to_client() {
        let mut store = seeded();
        let err = create_user(&mut store, &ctx(), contact("pat@globex.test", "executive")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
        assert_eq!(store.table::<User>().len(), 2);
    }

    #[test]
    fn email_is_unique() {
        let mut store = seeded();
        let err =
            create_user(&mut store, &ctx(), contact("user1@globex.test", "client_contact")).unwrap_err();
        assert_eq!(err.to_string(), "email user1@globex.test already exists");
    }

    #[test]
    fn role_change_is_checked_against_existing_binding() {
        let mut store = seeded();
        let id = create_user(&mut store, &ctx(), contact("pat@globex.test", "client_contact")).unwrap();
        let demote = UpdateUser {
            user_id: RawId::from(id.to_string()),
            change_set: UserPatch::default(),
            role: Some("executive".into()),
            status: None,
        };
        assert!(update_user(&mut store, &ctx(), demote.clone()).is_err());

        let mut unbind = demote;
        unbind.change_set.client_id = Some(None);
        let user = update_user(&mut store, &ctx(), unbind).unwrap();
        assert_eq!(user.role, UserRole::Executive);
        assert_eq!(user.client_id, None);
    }

    #[test]
    fn discover_users_by_role() {
        let store = seeded();
        let filter = UserFilter {
            role: Some("technical_support".into()),
            ..Default::default()
        };
        let found = discover_users(&store, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].user_id, UserId::new(2));
    }
}
