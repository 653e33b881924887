//! Shared helpers used by the server crate and the binary entry point.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_body_serializes_as_message_field() {
        let body = types::MessageBody::new("Provider not found");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Provider not found" }));
    }

    #[test]
    fn hello_message_is_fixed() {
        let hello = types::MessageBody::hello();
        assert_eq!(hello.message, types::HELLO_MESSAGE);
    }
}
