use crate::io::MeshError;

/// Exit code for bad input files and invalid parameters.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for terminal/viewer failures.
pub const EXIT_TERMINAL: u8 = 4;

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

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<MeshError> for AppError {
    fn from(err: MeshError) -> Self {
        AppError::new(EXIT_INPUT, err.to_string())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_errors_map_to_input_exit_code() {
        let err: AppError = MeshError::NegativeDimension(-3).into();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.to_string().contains("-3"));
    }
}
