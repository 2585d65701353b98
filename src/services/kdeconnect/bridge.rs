use async_trait::async_trait;

use super::{Endpoint, KdeConnectError};

/// Value carried across the bridge as a property value or method argument
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BusValue {
    /// Boolean
    Bool(bool),
    /// Any integer width, widened
    Int(i64),
    /// String
    Str(String),
    /// Array of strings
    StrList(Vec<String>),
    /// No value
    Unit,
}

impl BusValue {
    /// Reads the value as a boolean.
    ///
    /// # Errors
    /// Returns `UnexpectedValue` if the value is not a boolean
    pub fn into_bool(self, member: &str) -> Result<bool, KdeConnectError> {
        match self {
            Self::Bool(value) => Ok(value),
            _ => Err(unexpected(member, "boolean")),
        }
    }

    /// Reads the value as an integer.
    ///
    /// # Errors
    /// Returns `UnexpectedValue` if the value is not an integer
    pub fn into_int(self, member: &str) -> Result<i64, KdeConnectError> {
        match self {
            Self::Int(value) => Ok(value),
            _ => Err(unexpected(member, "integer")),
        }
    }

    /// Reads the value as a string.
    ///
    /// # Errors
    /// Returns `UnexpectedValue` if the value is not a string
    pub fn into_string(self, member: &str) -> Result<String, KdeConnectError> {
        match self {
            Self::Str(value) => Ok(value),
            _ => Err(unexpected(member, "string")),
        }
    }

    /// Reads the value as a list of strings.
    ///
    /// # Errors
    /// Returns `UnexpectedValue` if the value is not a string array
    pub fn into_string_list(self, member: &str) -> Result<Vec<String>, KdeConnectError> {
        match self {
            Self::StrList(value) => Ok(value),
            _ => Err(unexpected(member, "string array")),
        }
    }
}

impl From<&str> for BusValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for BusValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for BusValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for BusValue {
    fn from(value: Vec<String>) -> Self {
        Self::StrList(value)
    }
}

fn unexpected(member: &str, expected: &'static str) -> KdeConnectError {
    KdeConnectError::UnexpectedValue {
        member: member.to_string(),
        expected,
    }
}

/// Sole point of contact with the KDE Connect bus.
///
/// Calls are not retried and carry no timeout of their own. Every
/// transport failure is reported as [`KdeConnectError::RemoteCall`].
#[async_trait]
pub trait Bridge: Send + Sync {
    /// Reads a property of the endpoint's interface.
    async fn get_property(&self, endpoint: &Endpoint, name: &str)
    -> Result<BusValue, KdeConnectError>;

    /// Writes a property of the endpoint's interface.
    async fn set_property(
        &self,
        endpoint: &Endpoint,
        name: &str,
        value: BusValue,
    ) -> Result<(), KdeConnectError>;

    /// Invokes a method whose reply carries no payload.
    async fn invoke(
        &self,
        endpoint: &Endpoint,
        method: &str,
        args: &[BusValue],
    ) -> Result<(), KdeConnectError>;

    /// Invokes a method that replies with an array of strings.
    async fn invoke_for_strings(
        &self,
        endpoint: &Endpoint,
        method: &str,
        args: &[BusValue],
    ) -> Result<Vec<String>, KdeConnectError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors_accept_matching_values() {
        assert!(BusValue::Bool(true).into_bool("isCharging").unwrap());
        assert_eq!(BusValue::Int(87).into_int("charge").unwrap(), 87);
        assert_eq!(
            BusValue::from("Pixel").into_string("name").unwrap(),
            "Pixel"
        );
    }

    #[test]
    fn typed_accessors_reject_mismatches() {
        let error = BusValue::Str("87".to_string())
            .into_int("charge")
            .unwrap_err();

        assert!(matches!(
            error,
            KdeConnectError::UnexpectedValue { ref member, expected: "integer" } if member == "charge"
        ));
    }
}
