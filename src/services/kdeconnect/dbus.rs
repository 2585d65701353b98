use async_trait::async_trait;
use tracing::{debug, instrument, trace};
use zbus::{Connection, Message, fdo, zvariant::Value};

use super::{
    BUS_NAME, Bridge, BusValue, Endpoint, KdeConnectError, PROPERTIES_INTERFACE, RemoteFailure,
};

/// [`Bridge`] implementation over the D-Bus session bus.
///
/// Holds the process-wide connection; cloning shares it.
#[derive(Clone, Debug)]
pub struct DbusBridge {
    connection: Connection,
}

impl DbusBridge {
    /// Opens the session bus connection.
    ///
    /// # Errors
    /// Returns `KdeConnectError::Connection` if the session bus is unreachable
    #[instrument]
    pub async fn connect() -> Result<Self, KdeConnectError> {
        let connection = Connection::session()
            .await
            .map_err(|e| KdeConnectError::Connection(e.to_string()))?;
        debug!("Connected to session bus");

        Ok(Self { connection })
    }

    /// Wraps an already established connection.
    pub fn with_connection(connection: Connection) -> Self {
        Self { connection }
    }

    async fn call<B>(
        &self,
        path: &str,
        interface: &str,
        method: &str,
        member: &str,
        body: &B,
    ) -> Result<Message, KdeConnectError>
    where
        B: serde::Serialize + zbus::zvariant::DynamicType,
    {
        trace!(path, interface, method, "D-Bus call");
        self.connection
            .call_method(Some(BUS_NAME), path, Some(interface), method, body)
            .await
            .map_err(|e| remote_error(path, member, &e))
    }

    async fn call_with_args(
        &self,
        endpoint: &Endpoint,
        method: &str,
        args: &[BusValue],
    ) -> Result<Message, KdeConnectError> {
        let path = endpoint.path();
        let interface = endpoint.interface();

        match args {
            [] => self.call(path, interface, method, method, &()).await,
            [BusValue::Str(text)] => {
                self.call(path, interface, method, method, &(text.as_str(),))
                    .await
            }
            [BusValue::StrList(items)] => {
                self.call(path, interface, method, method, &(items,)).await
            }
            [BusValue::Int(number)] => {
                let number = i32::try_from(*number).map_err(|_| unsupported(method))?;
                self.call(path, interface, method, method, &(number,)).await
            }
            [BusValue::Bool(first), BusValue::Bool(second)] => {
                self.call(path, interface, method, method, &(*first, *second))
                    .await
            }
            _ => Err(unsupported(method)),
        }
    }
}

#[async_trait]
impl Bridge for DbusBridge {
    async fn get_property(
        &self,
        endpoint: &Endpoint,
        name: &str,
    ) -> Result<BusValue, KdeConnectError> {
        let reply = self
            .call(
                endpoint.path(),
                PROPERTIES_INTERFACE,
                "Get",
                name,
                &(endpoint.interface(), name),
            )
            .await?;

        let body = reply.body();
        let value: Value<'_> = body
            .deserialize()
            .map_err(|e| remote_error(endpoint.path(), name, &e))?;

        to_bus_value(value, name)
    }

    async fn set_property(
        &self,
        endpoint: &Endpoint,
        name: &str,
        value: BusValue,
    ) -> Result<(), KdeConnectError> {
        let value = match value {
            BusValue::Bool(flag) => Value::new(flag),
            BusValue::Int(number) => match i32::try_from(number) {
                Ok(number) => Value::new(number),
                Err(_) => Value::new(number),
            },
            BusValue::Str(text) => Value::new(text),
            BusValue::StrList(items) => Value::new(items),
            BusValue::Unit => return Err(unsupported(name)),
        };

        self.call(
            endpoint.path(),
            PROPERTIES_INTERFACE,
            "Set",
            name,
            &(endpoint.interface(), name, value),
        )
        .await?;

        Ok(())
    }

    async fn invoke(
        &self,
        endpoint: &Endpoint,
        method: &str,
        args: &[BusValue],
    ) -> Result<(), KdeConnectError> {
        self.call_with_args(endpoint, method, args).await?;
        Ok(())
    }

    async fn invoke_for_strings(
        &self,
        endpoint: &Endpoint,
        method: &str,
        args: &[BusValue],
    ) -> Result<Vec<String>, KdeConnectError> {
        let reply = self.call_with_args(endpoint, method, args).await?;

        reply
            .body()
            .deserialize::<Vec<String>>()
            .map_err(|e| remote_error(endpoint.path(), method, &e))
    }
}

fn to_bus_value(value: Value<'_>, member: &str) -> Result<BusValue, KdeConnectError> {
    let converted = match value {
        Value::Bool(flag) => BusValue::Bool(flag),
        Value::U8(number) => BusValue::Int(number.into()),
        Value::I16(number) => BusValue::Int(number.into()),
        Value::U16(number) => BusValue::Int(number.into()),
        Value::I32(number) => BusValue::Int(number.into()),
        Value::U32(number) => BusValue::Int(number.into()),
        Value::I64(number) => BusValue::Int(number),
        Value::U64(number) => BusValue::Int(i64::try_from(number).map_err(|_| {
            KdeConnectError::UnexpectedValue {
                member: member.to_string(),
                expected: "integer within i64 range",
            }
        })?),
        Value::Str(text) => BusValue::Str(text.to_string()),
        Value::Array(array) => {
            let items = array
                .iter()
                .map(|item| match item {
                    Value::Str(text) => Ok(text.to_string()),
                    _ => Err(KdeConnectError::UnexpectedValue {
                        member: member.to_string(),
                        expected: "string array",
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            BusValue::StrList(items)
        }
        Value::Value(inner) => return to_bus_value(*inner, member),
        _ => {
            return Err(KdeConnectError::UnexpectedValue {
                member: member.to_string(),
                expected: "boolean, integer, string or string array",
            });
        }
    };

    Ok(converted)
}

fn classify(error: &zbus::Error) -> RemoteFailure {
    match error {
        zbus::Error::MethodError(name, _, _) => RemoteFailure::from_error_name(name.as_str()),
        zbus::Error::InterfaceNotFound => RemoteFailure::InterfaceNotFound,
        zbus::Error::FDO(fdo_error) => match fdo_error.as_ref() {
            fdo::Error::UnknownObject(_) => RemoteFailure::ObjectNotFound,
            fdo::Error::UnknownInterface(_) => RemoteFailure::InterfaceNotFound,
            fdo::Error::UnknownProperty(_) | fdo::Error::InvalidArgs(_) => {
                RemoteFailure::PropertyNotFound
            }
            fdo::Error::UnknownMethod(_) => RemoteFailure::MethodNotFound,
            fdo::Error::ServiceUnknown(_)
            | fdo::Error::NameHasNoOwner(_)
            | fdo::Error::NoReply(_)
            | fdo::Error::Timeout(_) => RemoteFailure::ServiceUnavailable,
            _ => RemoteFailure::Other,
        },
        _ => RemoteFailure::Other,
    }
}

fn remote_error(path: &str, member: &str, error: &zbus::Error) -> KdeConnectError {
    KdeConnectError::RemoteCall {
        path: path.to_string(),
        member: member.to_string(),
        kind: classify(error),
        details: error.to_string(),
    }
}

fn unsupported(member: &str) -> KdeConnectError {
    KdeConnectError::UnsupportedArguments {
        member: member.to_string(),
    }
}
