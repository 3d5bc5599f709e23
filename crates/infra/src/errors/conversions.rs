//! Conversions from external infrastructure errors into domain errors.

use casedesk_domain::CaseDeskError;
use keyring::Error as KeyringError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CaseDeskError);

impl From<InfraError> for CaseDeskError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CaseDeskError> for InfraError {
    fn from(value: CaseDeskError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoCaseDeskError {
    fn into_casedesk(self) -> CaseDeskError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → CaseDeskError */
/* -------------------------------------------------------------------------- */

impl IntoCaseDeskError for KeyringError {
    fn into_casedesk(self) -> CaseDeskError {
        use KeyringError::*;

        let description = self.to_string();

        match self {
            NoEntry => CaseDeskError::Storage("keychain entry not found".into()),
            BadEncoding(_) => CaseDeskError::Storage("token in keychain is not valid UTF-8".into()),
            PlatformFailure(err) => CaseDeskError::Storage(format!("keychain platform error: {err}")),
            NoStorageAccess(err) => {
                CaseDeskError::Storage(format!("unable to access secure storage: {err}"))
            }
            _ => CaseDeskError::Storage(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_casedesk())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → CaseDeskError */
/* -------------------------------------------------------------------------- */

// Only transport failures land here; status codes are mapped by the API client.
impl IntoCaseDeskError for HttpError {
    fn into_casedesk(self) -> CaseDeskError {
        if self.is_timeout() {
            return CaseDeskError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return CaseDeskError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return CaseDeskError::Config(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return CaseDeskError::Decode(self.to_string());
        }

        CaseDeskError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_casedesk())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error / serde_json::Error → CaseDeskError */
/* -------------------------------------------------------------------------- */

impl IntoCaseDeskError for std::io::Error {
    fn into_casedesk(self) -> CaseDeskError {
        CaseDeskError::Storage(format!("{:?}: {}", self.kind(), self))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_casedesk())
    }
}

impl IntoCaseDeskError for serde_json::Error {
    fn into_casedesk(self) -> CaseDeskError {
        CaseDeskError::Decode(format!("invalid JSON at line {}: {}", self.line(), self))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_casedesk())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
