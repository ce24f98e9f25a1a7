//! Map errors to a single user-visible line and a process exit code

use pixmark_api_client::ApiError;
use pixmark_core::error::exit_codes;
use pixmark_core::ErrorCode;

pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(api) = err.downcast_ref::<ApiError>() {
        return api_exit_code(api);
    }
    if let Some(core) = err.downcast_ref::<pixmark_core::Error>() {
        return core_exit_code(core.code);
    }
    exit_codes::FAILURE
}

fn api_exit_code(err: &ApiError) -> u8 {
    match err {
        ApiError::Input(_) => exit_codes::INPUT_ERROR,
        ApiError::Precondition(_) => exit_codes::PRECONDITION_ERROR,
        ApiError::Upload { .. }
        | ApiError::Resize { .. }
        | ApiError::Watermark { .. }
        | ApiError::Fetch { .. }
        | ApiError::Request(_) => exit_codes::REMOTE_ERROR,
        ApiError::Protocol(_) | ApiError::Json(_) => exit_codes::PROTOCOL_ERROR,
        ApiError::Config(_) | ApiError::InvalidUrl(_) => exit_codes::CONFIG_ERROR,
        ApiError::Storage(core) => core_exit_code(core.code),
    }
}

fn core_exit_code(code: ErrorCode) -> u8 {
    match code.category() {
        "IO" | "Validation" => exit_codes::INPUT_ERROR,
        "Configuration" => exit_codes::CONFIG_ERROR,
        "Storage" => exit_codes::STORAGE_ERROR,
        _ => exit_codes::FAILURE,
    }
}

/// One line describing the failure
pub fn user_message(err: &anyhow::Error) -> String {
    if let Some(core) = err.downcast_ref::<pixmark_core::Error>() {
        return match &core.suggestion {
            Some(hint) => format!("{} ({hint})", core.message),
            None => core.message.clone(),
        };
    }

    let full = format!("{err:#}");
    full.lines().next().unwrap_or_default().to_string()
}

/// Machine-readable failure for `--format json`
pub fn json_report(err: &anyhow::Error) -> serde_json::Value {
    let core = err.downcast_ref::<pixmark_core::Error>().or_else(|| {
        match err.downcast_ref::<ApiError>() {
            Some(ApiError::Storage(core)) => Some(core),
            _ => None,
        }
    });

    serde_json::json!({
        "error": user_message(err),
        "exit_code": exit_code(err),
        "report": core.map(pixmark_core::Error::to_report),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let cases = [
            (ApiError::input("Please select an image"), exit_codes::INPUT_ERROR),
            (ApiError::precondition("No image ID"), exit_codes::PRECONDITION_ERROR),
            (
                ApiError::Resize {
                    status: 400,
                    message: "bad size".to_string(),
                },
                exit_codes::REMOTE_ERROR,
            ),
            (ApiError::protocol("no imageID"), exit_codes::PROTOCOL_ERROR),
            (ApiError::config("timeout cannot be zero"), exit_codes::CONFIG_ERROR),
            (
                ApiError::Storage(pixmark_core::Error::storage_corrupt("session.json")),
                exit_codes::STORAGE_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(exit_code(&anyhow::Error::new(err)), expected);
        }

        let unknown = pixmark_core::Error::unknown_preset("huge", &["small".to_string()]);
        assert_eq!(exit_code(&anyhow::Error::new(unknown)), exit_codes::INPUT_ERROR);
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), exit_codes::FAILURE);
    }

    #[test]
    fn test_user_message_is_single_line() {
        let err = anyhow::Error::new(ApiError::Storage(
            pixmark_core::Error::storage_corrupt("session.json").with_context("while loading"),
        ));
        assert!(!user_message(&err).contains('\n'));

        let err = anyhow::Error::new(pixmark_core::Error::unknown_preset("huge", &["small".to_string()]));
        assert_eq!(user_message(&err), "Unknown size preset: huge (Use one of: small)");
    }

    #[test]
    fn test_json_report() {
        let report = json_report(&anyhow::Error::new(ApiError::precondition("No image ID found")));
        assert_eq!(report["error"], "No image ID found");
        assert_eq!(report["exit_code"], exit_codes::PRECONDITION_ERROR);
        assert!(report["report"].is_null());

        let report = json_report(&anyhow::Error::new(ApiError::Storage(
            pixmark_core::Error::storage_corrupt("session.json"),
        )));
        assert_eq!(report["report"]["code_str"], "E4001");
    }
}
