/// Errors surfaced at the crate's file and serialization boundaries.
///
/// Parsing itself never returns this: malformed report lines become warnings
/// on the [`ParseOutcome`](crate::parser::ParseOutcome) instead.
#[derive(Debug, thiserror::Error)]
pub enum AbReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AbReportError = io_err.into();
        let msg = err.to_string();
        assert!(msg.contains("IO error"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn serde_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("not valid json").unwrap_err();
        let err: AbReportError = json_err.into();
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn error_is_debug() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "boom");
        let err: AbReportError = io_err.into();
        let debug = format!("{:?}", err);
        assert!(debug.contains("Io"));
    }
}
