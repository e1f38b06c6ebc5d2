//! Outcome rendering and exit-status mapping.

use std::process::ExitCode;

use platform_guard::Outcome;

/// Exit status for a remote or input failure.
pub const EXIT_FAILED: u8 = 1;
/// Exit status for a policy denial.
pub const EXIT_DENIED: u8 = 2;
/// Exit status when a resource was created but tagging failed: it exists
/// remotely but is unmanaged, and scripts should notice.
pub const EXIT_CREATED_UNTAGGED: u8 = 3;

/// Exit status for one guard outcome.
pub fn exit_status(outcome: &Outcome) -> u8 {
    match outcome {
        Outcome::Success { .. } => 0,
        Outcome::Denied(_) => EXIT_DENIED,
        Outcome::Failed(_) => EXIT_FAILED,
        Outcome::CreatedUntagged { .. } => EXIT_CREATED_UNTAGGED,
    }
}

/// Print one guard outcome and map it to the process exit status.
pub fn report(outcome: &Outcome) -> ExitCode {
    match outcome {
        Outcome::Success {
            remote_id,
            observed_state,
        } => {
            println!("Success: {remote_id} ({observed_state})");
        }
        Outcome::Denied(reason) => {
            eprintln!("Denied: {reason}");
        }
        Outcome::Failed(cause) => {
            eprintln!("Error: {cause}");
        }
        Outcome::CreatedUntagged { remote_id, cause } => {
            eprintln!(
                "Warning: {remote_id} was created but could not be tagged ({cause}). \
                 It exists remotely and is NOT managed by this tool; future mutations \
                 through this CLI will be denied until the provenance tag is attached."
            );
        }
    }
    ExitCode::from(exit_status(outcome))
}

#[cfg(test)]
mod tests {
    use platform_guard::{DenialReason, FailureCause, Outcome, StoreError};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_outcome() {
        assert_eq!(exit_status(&Outcome::success("i-1", "running")), 0);
        assert_eq!(
            exit_status(&Outcome::Denied(DenialReason::QuotaExceeded {
                current: 2,
                cap: 2,
            })),
            EXIT_DENIED
        );
        assert_eq!(
            exit_status(&Outcome::Failed(FailureCause::Store(StoreError::Transport(
                "connection refused".into()
            )))),
            EXIT_FAILED
        );
        assert_eq!(
            exit_status(&Outcome::CreatedUntagged {
                remote_id: "my-bucket".into(),
                cause: StoreError::Provider("tag service unavailable".into()),
            }),
            EXIT_CREATED_UNTAGGED
        );
    }

    #[test]
    fn denial_messages_carry_the_specific_reason() {
        let reason = DenialReason::QuotaExceeded { current: 2, cap: 2 };
        assert_eq!(
            reason.to_string(),
            "instance quota reached: 2 live managed instances (cap 2)"
        );
    }
}
