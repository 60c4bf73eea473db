use std::path::PathBuf;

use thiserror::Error;

use crate::core::model::ErrorPayload;

#[derive(Debug, Error)]
pub enum VerifyError {
    /// Wrong CLI arity or an unusable flag.
    #[error("Please provide an image path")]
    Argument,

    #[error("Image file not found")]
    FileNotFound(PathBuf),

    /// Decode failure; recovered by the feature extractor.
    #[error("Could not read image {}: {source}", .path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Anything else raised while scaling, predicting or deciding.
    #[error("{0}")]
    Pipeline(String),
}

impl From<anyhow::Error> for VerifyError {
    fn from(err: anyhow::Error) -> Self {
        Self::Pipeline(format!("{err:#}"))
    }
}

impl VerifyError {
    /// Only argument and missing-file errors end the process with a
    /// non-zero exit code.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Argument | Self::FileNotFound(_))
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload::failed(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fatal_errors_keep_fixed_messages() {
        let err = VerifyError::Argument;
        assert!(err.is_fatal());
        assert_eq!(err.to_payload(), ErrorPayload::failed("Please provide an image path"));

        let err = VerifyError::FileNotFound(PathBuf::from("missing.png"));
        assert!(err.is_fatal());
        assert_eq!(err.to_payload(), ErrorPayload::failed("Image file not found"));
    }

    #[test]
    fn pipeline_errors_carry_context() {
        let err: VerifyError = anyhow::anyhow!("scaler expects 10 features, got 3")
            .context("failed to scale features")
            .into();
        assert!(!err.is_fatal());
        assert_eq!(
            err.to_string(),
            "failed to scale features: scaler expects 10 features, got 3"
        );
    }
}
