//! Error conversion from internal error types.
//!
//! This module provides conversions from the engine's [`IncidentError`] to
//! the executor's [`Error`] type. The conversion keeps every field, so the
//! rendered message is the same on both sides.

use crate::Error;
use incidentdb_core::IncidentError;

impl From<IncidentError> for Error {
    fn from(err: IncidentError) -> Self {
        match err {
            IncidentError::NotFound { entity, id } => Error::NotFound { entity, id },
            IncidentError::InvalidEnum {
                field,
                value,
                allowed,
            } => Error::InvalidEnum {
                field,
                value,
                allowed,
            },
            IncidentError::DuplicateConflict { field, value } => {
                Error::DuplicateConflict { field, value }
            }
            IncidentError::ValidationFailure { reason } => Error::ValidationFailure { reason },
            IncidentError::Io { reason } => Error::Io { reason },
            IncidentError::Serialization { reason } => Error::Serialization { reason },
            IncidentError::Corruption { reason } => Error::Corruption { reason },
        }
    }
}

/// Convert an engine result to an executor result.
pub(crate) fn convert_result<T>(r: incidentdb_core::IncidentResult<T>) -> crate::Result<T> {
    r.map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use incidentdb_core::{ErrorKind, Severity, TableName};

    #[test]
    fn messages_survive_conversion() {
        let cases = vec![
            IncidentError::not_found(TableName::Incidents, "42"),
            IncidentError::invalid_enum::<Severity>("severity", "P0"),
            IncidentError::duplicate("registration_number", "REG-1"),
            IncidentError::validation("Escalated-by and escalated-to users must differ"),
            IncidentError::corruption("key 3 holds record 4"),
        ];
        for err in cases {
            let converted = Error::from(err.clone());
            assert_eq!(converted.to_string(), err.to_string());
            assert_eq!(converted.kind(), err.kind());
        }
    }

    #[test]
    fn storage_errors_classify_as_validation_failure() {
        let converted = Error::from(IncidentError::Io {
            reason: "denied".into(),
        });
        assert!(converted.is_storage());
        assert_eq!(converted.kind(), ErrorKind::ValidationFailure);
    }
}
