//! Entity identifiers
//!
//! Every table is keyed by its own identifier newtype so that a `ClientId`
//! can never be passed where a `UserId` is expected. Identifiers are dense
//! positive integers allocated by the storage layer (`max + 1`, starting at 1).
//!
//! ## Wire format
//!
//! Identifiers serialize as decimal strings (`"7"`), matching the persisted
//! table layout where the id is also the map key. Deserialization accepts
//! either a string or an unsigned integer.
//!
//! Caller-supplied references arrive as [`RawId`] and are only turned into a
//! typed identifier once the validator has confirmed the target record exists.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// Error returned when a string is not a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdParseError {
    /// The rejected input
    pub input: String,
}

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid identifier", self.input)
    }
}

impl std::error::Error for IdParseError {}

fn parse_raw(s: &str) -> Result<u64, IdParseError> {
    s.trim().parse::<u64>().map_err(|_| IdParseError {
        input: s.to_string(),
    })
}

/// Behaviour shared by all identifier newtypes.
pub trait EntityId:
    Copy
    + Eq
    + Ord
    + Hash
    + fmt::Debug
    + fmt::Display
    + FromStr<Err = IdParseError>
    + Serialize
    + for<'de> Deserialize<'de>
    + Send
    + Sync
    + 'static
{
    /// Wrap a raw numeric identifier.
    fn from_raw(raw: u64) -> Self;

    /// The raw numeric identifier.
    fn raw(&self) -> u64;

    /// The identifier that follows this one, or `None` past `u64::MAX`.
    fn next(&self) -> Option<Self> {
        self.raw().checked_add(1).map(Self::from_raw)
    }
}

struct IdVisitor;

impl<'de> Visitor<'de> for IdVisitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an identifier as a decimal string or unsigned integer")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
        u64::try_from(v).map_err(|_| E::custom(format!("negative identifier {}", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
        parse_raw(v).map_err(E::custom)
    }
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// Create an identifier from its numeric value.
            pub const fn new(raw: u64) -> Self {
                $name(raw)
            }
        }

        impl EntityId for $name {
            fn from_raw(raw: u64) -> Self {
                $name(raw)
            }

            fn raw(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_raw(s).map($name)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                $name(raw)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any(IdVisitor).map($name)
            }
        }
    };
}

entity_id!(
    /// Identifier of a row in `clients`.
    ClientId
);
entity_id!(
    /// Identifier of a row in `vendors`.
    VendorId
);
entity_id!(
    /// Identifier of a row in `products`.
    ProductId
);
entity_id!(
    /// Identifier of a row in `infrastructure_components`.
    ComponentId
);
entity_id!(
    /// Identifier of a row in `users`.
    UserId
);
entity_id!(
    /// Identifier of a row in `subscriptions`.
    SubscriptionId
);
entity_id!(
    /// Identifier of a row in `service_level_agreements`.
    SlaId
);
entity_id!(
    /// Identifier of a row in `incidents`.
    IncidentId
);
entity_id!(
    /// Identifier of a row in `problem_tickets`.
    ProblemId
);
entity_id!(
    /// Identifier of a row in `change_requests`.
    ChangeId
);
entity_id!(
    /// Identifier of a row in `rollback_requests`.
    RollbackId
);
entity_id!(
    /// Identifier of a row in `work_orders`.
    WorkOrderId
);
entity_id!(
    /// Identifier of a row in `incident_escalations`.
    EscalationId
);
entity_id!(
    /// Identifier of a row in `communications`.
    CommunicationId
);
entity_id!(
    /// Identifier of a row in `workarounds`.
    WorkaroundId
);
entity_id!(
    /// Identifier of a row in `root_cause_analysis`.
    AnalysisId
);
entity_id!(
    /// Identifier of a row in `performance_metrics`.
    MetricId
);
entity_id!(
    /// Identifier of a row in `incident_reports`.
    ReportId
);
entity_id!(
    /// Identifier of a row in `knowledge_base_articles`.
    ArticleId
);
entity_id!(
    /// Identifier of a row in `post_incident_reviews`.
    ReviewId
);
entity_id!(
    /// Identifier of a row in `incident_updates`.
    UpdateId
);
entity_id!(
    /// Identifier of a row in `audit_logs`.
    AuditId
);
entity_id!(
    /// Identifier of a row in `human_transfers`.
    TransferId
);

/// An unvalidated identifier as supplied by a caller.
///
/// Kept as text so that a malformed reference (`"abc"`) reaches the
/// validator and is reported as a missing record rather than as a
/// malformed request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RawId(String);

impl RawId {
    /// Wrap caller-supplied text.
    pub fn new(value: impl Into<String>) -> Self {
        RawId(value.into())
    }

    /// The text as supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into a typed identifier.
    pub fn parse<I: EntityId>(&self) -> Result<I, IdParseError> {
        self.0.parse()
    }

    /// Whether this reference names the given identifier.
    ///
    /// Comparison is on the decimal text, so `"07"` does not match `7`.
    pub fn names<I: EntityId>(&self, id: I) -> bool {
        self.0 == id.to_string()
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RawId {
    fn from(s: &str) -> Self {
        RawId(s.to_string())
    }
}

impl From<String> for RawId {
    fn from(s: String) -> Self {
        RawId(s)
    }
}

impl From<u64> for RawId {
    fn from(raw: u64) -> Self {
        RawId(raw.to_string())
    }
}

struct RawIdVisitor;

impl<'de> Visitor<'de> for RawIdVisitor {
    type Value = RawId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an identifier as a string or integer")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawId, E> {
        Ok(RawId(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawId, E> {
        Ok(RawId(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawId, E> {
        Ok(RawId(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RawId, E> {
        Ok(RawId(v))
    }
}

impl<'de> Deserialize<'de> for RawId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawIdVisitor)
    }
}
