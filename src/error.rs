/// Exit code for usage, configuration, and local file problems.
pub const EXIT_USAGE: u8 = 2;
/// Exit code when one or more data files failed to load.
pub const EXIT_LOAD: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Why a data file could not be turned into rows.
///
/// All three kinds are surfaced to the reader the same way (one shared error
/// banner); the distinction only shows up in logs and the terminal summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The request never produced a response.
    Transport(String),
    /// A response arrived with a status other than `200`.
    Status(u16, String),
    /// The body could not be read as CSV.
    Parse(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Transport(msg) => write!(f, "request failed: {msg}"),
            LoadError::Status(code, reason) if reason.is_empty() => write!(f, "HTTP {code}"),
            LoadError::Status(code, reason) => write!(f, "HTTP {code} {reason}"),
            LoadError::Parse(msg) => write!(f, "invalid CSV: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::new(EXIT_LOAD, format!("Failed to load data: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_includes_reason_when_known() {
        assert_eq!(LoadError::Status(404, "Not Found".into()).to_string(), "HTTP 404 Not Found");
        assert_eq!(LoadError::Status(599, String::new()).to_string(), "HTTP 599");
    }

    #[test]
    fn load_errors_map_to_load_exit_code() {
        let err: AppError = LoadError::Parse("bad".into()).into();
        assert_eq!(err.exit_code(), EXIT_LOAD);
        assert!(err.to_string().contains("invalid CSV"));
    }
}
