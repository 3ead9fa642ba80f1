use super::{types::Config, ConfigError};

/// Bitrates accepted by the MP3 encoder, in kbps.
const BITRATE_RANGE: std::ops::RangeInclusive<u32> = 8..=320;

/// Validate configuration
/// Currently validates:
/// - Pool concurrency is not 0
/// - Bitrate is within what the MP3 encoder accepts
/// - FFmpeg path is not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.pool.concurrency == 0 {
        return Err(ConfigError::ValidationError(
            "pool.concurrency cannot be 0".to_string(),
        ));
    }

    if !BITRATE_RANGE.contains(&config.converter.bitrate_kbps) {
        return Err(ConfigError::ValidationError(format!(
            "converter.bitrate_kbps must be between {} and {}, got {}",
            BITRATE_RANGE.start(),
            BITRATE_RANGE.end(),
            config.converter.bitrate_kbps
        )));
    }

    if config.converter.ffmpeg_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "converter.ffmpeg_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_zero_concurrency_fails() {
        let mut config = Config::default();
        config.pool.concurrency = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_bitrate_bounds() {
        let mut config = Config::default();
        config.converter.bitrate_kbps = 640;
        assert!(validate_config(&config).is_err());

        config.converter.bitrate_kbps = 8;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_ffmpeg_path_fails() {
        let mut config = Config::default();
        config.converter.ffmpeg_path = PathBuf::new();
        assert!(validate_config(&config).is_err());
    }
}
