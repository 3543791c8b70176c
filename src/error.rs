//! Error types shared by every stage of pedigree construction

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, PedigreeError>;

/// Pedigree generation errors
#[derive(Debug, thiserror::Error)]
pub enum PedigreeError {
    #[error("Unrecognised inheritance mode: '{0}' (expected AD/dominant or AR/recessive)")]
    InvalidMode(String),

    #[error("Invalid genotype code {0} (expected 0, 1 or 2)")]
    InvalidGenotype(u8),

    #[error("Parameter '{name}' out of range: {value}")]
    InvalidParameterRange { name: &'static str, value: f64 },

    #[error("Individual {0} is not present in the record store")]
    UnknownIndividual(u32),

    #[error("Parents of individual {0} are already recorded")]
    ParentsAlreadyKnown(u32),

    #[error("No outcome with positive weight when sampling {0}")]
    DegenerateWeights(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Record store capacity of {limit} individuals exceeded")]
    CapacityExceeded { limit: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PedigreeError::InvalidMode("XL".into());
        assert!(err.to_string().contains("'XL'"));

        let err = PedigreeError::InvalidParameterRange { name: "alt_allele_freq", value: 1.5 };
        assert_eq!(err.to_string(), "Parameter 'alt_allele_freq' out of range: 1.5");

        let err = PedigreeError::InvalidArgument("--generations: x".into());
        assert_eq!(err.to_string(), "Invalid argument: --generations: x");
    }

    #[test]
    fn test_io_conversion() {
        fn open_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here.ped")?)
        }
        assert!(matches!(open_missing(), Err(PedigreeError::Io(_))));
    }
}
