use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

use crate::http::{HttpRequest, HttpResponse, HttpStatus};
use crate::json::JsonCodec;

/// Body used when even the error message cannot be serialized
pub const SERIALIZATION_ERROR_BODY: &str = "{\"error\":\"Serialization Error\"}";

/// A resource handler with one operation per dispatchable HTTP method.
///
/// Every operation defaults to `501 Not Implemented`; implementors override
/// only the methods their resource supports. Controllers are shared across
/// all connection coroutines, so any internal state must be `Sync`.
pub trait Controller: Send + Sync {
    /// Codec used by the [`ControllerExt`] helpers
    fn codec(&self) -> &dyn JsonCodec;

    fn handle_get(&self, _request: &HttpRequest) -> HttpResponse {
        HttpResponse::from_status(HttpStatus::NotImplemented)
    }

    fn handle_post(&self, _request: &HttpRequest) -> HttpResponse {
        HttpResponse::from_status(HttpStatus::NotImplemented)
    }

    fn handle_patch(&self, _request: &HttpRequest) -> HttpResponse {
        HttpResponse::from_status(HttpStatus::NotImplemented)
    }

    fn handle_put(&self, _request: &HttpRequest) -> HttpResponse {
        HttpResponse::from_status(HttpStatus::NotImplemented)
    }

    fn handle_delete(&self, _request: &HttpRequest) -> HttpResponse {
        HttpResponse::from_status(HttpStatus::NotImplemented)
    }
}

#[derive(Serialize)]
struct ErrorMessage<'a> {
    error: &'a str,
}

/// JSON and error-building helpers available on every [`Controller`].
///
/// Implemented for all controllers through a blanket impl, so the helpers
/// cannot be overridden.
pub trait ControllerExt: Controller {
    /// Encode `value` with the controller's codec.
    ///
    /// Failures are logged and reported as `None`.
    fn serialize_to_text<T: Serialize + ?Sized>(&self, value: &T) -> Option<String> {
        let encoded = serde_json::to_value(value)
            .map_err(Into::into)
            .and_then(|v| self.codec().encode(&v));
        match encoded {
            Ok(text) => Some(text),
            Err(e) => {
                error!(error = %e, "Error converting value to JSON");
                None
            }
        }
    }

    /// Decode `text` into a `T` with the controller's codec.
    ///
    /// Failures are logged and reported as `None`.
    fn deserialize_from_text<T: DeserializeOwned>(&self, text: &str) -> Option<T> {
        let decoded = self
            .codec()
            .decode(text)
            .and_then(|v| serde_json::from_value(v).map_err(Into::into));
        match decoded {
            Ok(value) => Some(value),
            Err(e) => {
                error!(
                    error = %e,
                    target_type = std::any::type_name::<T>(),
                    "Error converting JSON to value"
                );
                None
            }
        }
    }

    /// Error response whose body is built from the status reason phrase
    fn build_error(&self, status: HttpStatus) -> HttpResponse {
        HttpResponse::from_status(status)
    }

    /// Error response with a custom message, serialized as `{"error": message}`
    fn build_error_message(&self, message: &str, status: HttpStatus) -> HttpResponse {
        let body = self
            .serialize_to_text(&ErrorMessage { error: message })
            .unwrap_or_else(|| SERIALIZATION_ERROR_BODY.to_string());
        HttpResponse::new(body, status)
    }
}

impl<C: Controller + ?Sized> ControllerExt for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::json::{CodecError, SerdeJsonCodec};
    use serde::Deserialize;
    use serde_json::Value;
    use std::collections::HashMap;

    struct Bare {
        codec: SerdeJsonCodec,
    }

    impl Controller for Bare {
        fn codec(&self) -> &dyn JsonCodec {
            &self.codec
        }
    }

    /// Codec that fails every call, for exercising the fallback paths
    struct BrokenCodec;

    impl JsonCodec for BrokenCodec {
        fn encode(&self, _value: &Value) -> Result<String, CodecError> {
            Err(serde_json::from_str::<Value>("!").unwrap_err().into())
        }

        fn decode(&self, _text: &str) -> Result<Value, CodecError> {
            Err(serde_json::from_str::<Value>("!").unwrap_err().into())
        }
    }

    struct Broken;

    impl Controller for Broken {
        fn codec(&self) -> &dyn JsonCodec {
            &BrokenCodec
        }
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Item {
        id: u32,
        name: String,
    }

    fn request(method: HttpMethod) -> HttpRequest {
        HttpRequest::new(method, "/items", "HTTP/1.1", HashMap::new(), "")
    }

    #[test]
    fn test_default_operations_are_not_implemented() {
        let c = Bare {
            codec: SerdeJsonCodec::new(),
        };
        for res in [
            c.handle_get(&request(HttpMethod::Get)),
            c.handle_post(&request(HttpMethod::Post)),
            c.handle_patch(&request(HttpMethod::Patch)),
            c.handle_put(&request(HttpMethod::Put)),
            c.handle_delete(&request(HttpMethod::Delete)),
        ] {
            assert_eq!(res.status(), HttpStatus::NotImplemented);
            assert_eq!(res.body(), "{\"error\": \"Not Implemented\"}");
        }
    }

    #[test]
    fn test_serialize_and_deserialize() {
        let c = Bare {
            codec: SerdeJsonCodec::new(),
        };
        let item = Item {
            id: 7,
            name: "lamp".into(),
        };
        let text = c.serialize_to_text(&item).unwrap();
        assert_eq!(text, r#"{"id":7,"name":"lamp"}"#);
        assert_eq!(c.deserialize_from_text::<Item>(&text), Some(item));
    }

    #[test]
    fn test_deserialize_wrong_shape_is_none() {
        let c = Bare {
            codec: SerdeJsonCodec::new(),
        };
        assert_eq!(c.deserialize_from_text::<Item>(r#"{"id":"x"}"#), None);
        assert_eq!(c.deserialize_from_text::<Item>("not json"), None);
    }

    #[test]
    fn test_build_error_from_status() {
        let c = Bare {
            codec: SerdeJsonCodec::new(),
        };
        let res = c.build_error(HttpStatus::Forbidden);
        assert_eq!(res.status(), HttpStatus::Forbidden);
        assert_eq!(res.body(), "{\"error\": \"Forbidden\"}");
    }

    #[test]
    fn test_build_error_message_escapes() {
        let c = Bare {
            codec: SerdeJsonCodec::new(),
        };
        let res = c.build_error_message("bad \"id\"", HttpStatus::UnprocessableEntity);
        assert_eq!(res.status(), HttpStatus::UnprocessableEntity);
        assert_eq!(res.body(), r#"{"error":"bad \"id\""}"#);
    }

    #[test]
    fn test_codec_failures_fall_back() {
        let c = Broken;
        assert_eq!(c.serialize_to_text(&1), None);
        assert_eq!(c.deserialize_from_text::<u32>("1"), None);
        let res = c.build_error_message("nope", HttpStatus::NotFound);
        assert_eq!(res.body(), SERIALIZATION_ERROR_BODY);
        assert_eq!(res.status(), HttpStatus::NotFound);
    }
}
