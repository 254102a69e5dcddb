//! Classification of terminal failures onto the refund failure taxonomy

use mantis_terminal::{TerminalError, TerminalErrorCode};
use shared::RefundParams;

use super::status::{DeclineReason, RefundFailure, RefundFailureKind};

/// Map a terminal SDK failure onto the refund failure taxonomy, carrying
/// the original request so the caller can re-attempt it.
pub fn map_terminal_error(params: &RefundParams, error: &TerminalError) -> RefundFailure {
    let kind = match error.code {
        TerminalErrorCode::DeclinedByBackend => {
            RefundFailureKind::Declined(DeclineReason::from_decline_code(error.decline_code()))
        }
        TerminalErrorCode::ConnectionError => RefundFailureKind::NoNetwork,
        TerminalErrorCode::Canceled => RefundFailureKind::Cancelled,
        TerminalErrorCode::CardReadTimedOut
        | TerminalErrorCode::RequestTimedOut
        | TerminalErrorCode::BackendApiError
        | TerminalErrorCode::ReaderBusy
        | TerminalErrorCode::NotConnectedToReader
        | TerminalErrorCode::Generic => RefundFailureKind::Generic,
    };

    RefundFailure {
        kind,
        message: error.message.clone(),
        refund_params: params.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mantis_terminal::BackendApiError;
    use rust_decimal_macros::dec;

    fn refund_params() -> RefundParams {
        RefundParams {
            charge_id: "ch_1".to_string(),
            amount: dec!(10),
            currency: "usd".to_string(),
        }
    }

    fn terminal_error(code: TerminalErrorCode) -> TerminalError {
        TerminalError::new(code, "dummy error message")
    }

    fn declined(decline_code: Option<&str>) -> TerminalError {
        terminal_error(TerminalErrorCode::DeclinedByBackend).with_api_error(BackendApiError {
            decline_code: decline_code.map(str::to_string),
            message: "dummy error message".to_string(),
        })
    }

    #[test]
    fn test_refund_params_echoed_back() {
        let params = refund_params();
        let failure = map_terminal_error(&params, &declined(None));
        assert_eq!(failure.refund_params, params);
        assert_eq!(failure.message, "dummy error message");
    }

    #[test]
    fn test_decline_without_api_error_is_unknown() {
        let failure = map_terminal_error(
            &refund_params(),
            &terminal_error(TerminalErrorCode::DeclinedByBackend),
        );
        assert_eq!(
            failure.kind,
            RefundFailureKind::Declined(DeclineReason::Unknown)
        );
    }

    #[test]
    fn test_decline_code_is_sub_classified() {
        let failure = map_terminal_error(&refund_params(), &declined(Some("insufficient_funds")));
        assert_eq!(
            failure.kind,
            RefundFailureKind::Declined(DeclineReason::InsufficientFunds)
        );
    }

    #[test]
    fn test_connection_error_is_no_network() {
        let failure = map_terminal_error(
            &refund_params(),
            &terminal_error(TerminalErrorCode::ConnectionError),
        );
        assert_eq!(failure.kind, RefundFailureKind::NoNetwork);
    }

    #[test]
    fn test_canceled_is_cancelled() {
        let failure = map_terminal_error(
            &refund_params(),
            &terminal_error(TerminalErrorCode::Canceled),
        );
        assert_eq!(failure.kind, RefundFailureKind::Cancelled);
    }

    #[test]
    fn test_everything_else_is_generic() {
        for code in [
            TerminalErrorCode::CardReadTimedOut,
            TerminalErrorCode::RequestTimedOut,
            TerminalErrorCode::BackendApiError,
            TerminalErrorCode::ReaderBusy,
            TerminalErrorCode::NotConnectedToReader,
            TerminalErrorCode::Generic,
        ] {
            let failure = map_terminal_error(&refund_params(), &terminal_error(code));
            assert_eq!(
                failure.kind,
                RefundFailureKind::Generic,
                "code {:?} should classify as Generic",
                code
            );
        }
    }
}
