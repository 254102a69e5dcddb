//! Classification of low-level failures onto the payment failure taxonomy
//!
//! Every failure leaving the payment orchestrator goes through one of these
//! mappings first; raw terminal and backend errors never reach the UI
//! layer. The matches are exhaustive over the closed error code enums, so a
//! new code cannot be added without deciding its classification here.

use mantis_terminal::{TerminalError, TerminalErrorCode};

use super::status::PaymentFailureKind;
use crate::backend::CaptureError;

/// Decline code the backend uses for amounts below the processing minimum
const DECLINE_AMOUNT_TOO_SMALL: &str = "amount_too_small";

/// Map a terminal SDK failure onto the payment failure taxonomy
pub fn map_terminal_error(error: &TerminalError) -> PaymentFailureKind {
    match error.code {
        TerminalErrorCode::CardReadTimedOut => PaymentFailureKind::CardReadTimedOut,
        TerminalErrorCode::DeclinedByBackend => PaymentFailureKind::PaymentDeclined,
        TerminalErrorCode::RequestTimedOut => PaymentFailureKind::NoNetwork,
        TerminalErrorCode::BackendApiError => match error.decline_code() {
            Some(DECLINE_AMOUNT_TOO_SMALL) => PaymentFailureKind::AmountTooSmall,
            _ => PaymentFailureKind::Generic,
        },
        TerminalErrorCode::ConnectionError
        | TerminalErrorCode::Canceled
        | TerminalErrorCode::ReaderBusy
        | TerminalErrorCode::NotConnectedToReader
        | TerminalErrorCode::Generic => PaymentFailureKind::Generic,
    }
}

/// Map a backend capture failure onto the payment failure taxonomy
pub fn map_capture_error(error: &CaptureError) -> PaymentFailureKind {
    match error {
        CaptureError::Network => PaymentFailureKind::NoNetwork,
        CaptureError::Server => PaymentFailureKind::ServerError,
        CaptureError::Other(_) => PaymentFailureKind::Generic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mantis_terminal::BackendApiError;

    fn terminal_error(code: TerminalErrorCode) -> TerminalError {
        TerminalError::new(code, "dummy error message")
    }

    fn api_error(decline_code: Option<&str>) -> TerminalError {
        terminal_error(TerminalErrorCode::BackendApiError).with_api_error(BackendApiError {
            decline_code: decline_code.map(str::to_string),
            message: "dummy error message".to_string(),
        })
    }

    #[test]
    fn test_card_read_timeout_maps_to_card_read_timed_out() {
        assert_eq!(
            map_terminal_error(&terminal_error(TerminalErrorCode::CardReadTimedOut)),
            PaymentFailureKind::CardReadTimedOut
        );
    }

    #[test]
    fn test_backend_decline_maps_to_payment_declined() {
        assert_eq!(
            map_terminal_error(&terminal_error(TerminalErrorCode::DeclinedByBackend)),
            PaymentFailureKind::PaymentDeclined
        );
    }

    #[test]
    fn test_request_timeout_maps_to_no_network() {
        assert_eq!(
            map_terminal_error(&terminal_error(TerminalErrorCode::RequestTimedOut)),
            PaymentFailureKind::NoNetwork
        );
    }

    #[test]
    fn test_api_error_with_amount_too_small_decline() {
        assert_eq!(
            map_terminal_error(&api_error(Some("amount_too_small"))),
            PaymentFailureKind::AmountTooSmall
        );
    }

    #[test]
    fn test_api_error_with_other_or_missing_decline_code() {
        assert_eq!(
            map_terminal_error(&api_error(Some("card_declined"))),
            PaymentFailureKind::Generic
        );
        assert_eq!(
            map_terminal_error(&api_error(None)),
            PaymentFailureKind::Generic
        );
    }

    #[test]
    fn test_remaining_codes_map_to_generic() {
        for code in [
            TerminalErrorCode::ConnectionError,
            TerminalErrorCode::Canceled,
            TerminalErrorCode::ReaderBusy,
            TerminalErrorCode::NotConnectedToReader,
            TerminalErrorCode::Generic,
        ] {
            assert_eq!(
                map_terminal_error(&terminal_error(code)),
                PaymentFailureKind::Generic,
                "code {:?} should classify as Generic",
                code
            );
        }
    }

    #[test]
    fn test_capture_error_mapping() {
        assert_eq!(
            map_capture_error(&CaptureError::Network),
            PaymentFailureKind::NoNetwork
        );
        assert_eq!(
            map_capture_error(&CaptureError::Server),
            PaymentFailureKind::ServerError
        );
        assert_eq!(
            map_capture_error(&CaptureError::Other("boom".to_string())),
            PaymentFailureKind::Generic
        );
    }
}
