pub mod artists;
pub mod pages;
pub mod shows;
pub mod venues;

use serde::{Deserialize, Serialize};

/// Outcome of a create submission, carrying the message a browser client
/// would flash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashResponse {
    pub success: bool,
    pub message: String,
}

impl FlashResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_response_json() {
        let json = serde_json::to_value(FlashResponse::ok("Venue X was successfully listed!")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Venue X was successfully listed!");

        let json = serde_json::to_value(FlashResponse::failed("nope")).unwrap();
        assert_eq!(json["success"], false);
    }

    #[test]
    fn test_delete_response_json() {
        let json = serde_json::to_string(&DeleteResponse { success: false }).unwrap();
        assert_eq!(json, r#"{"success":false}"#);
    }
}
