// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;
use crate::utils::log;

/// Validate configuration and show the effective settings.
pub fn run_validate(config: &Config) -> Result<()> {
    log::header("Validating configuration");

    config.validate().inspect_err(|e| {
        ::log::error!("Config validation failed: {}", e);
    })?;

    log::info("✓ Config OK");
    log::sub_item(&format!("Atlas URL: {}", config.atlas.base_url));
    log::sub_item(&format!("User agent: {}", config.atlas.user_agent));
    log::sub_item(&format!("Timeout: {}s", config.atlas.timeout_secs));
    log::sub_item(&format!("Request delay: {}ms", config.atlas.request_delay_ms));
    log::sub_item(&format!("Parse mode: {:?}", config.parsing.mode));
    log::sub_item(&format!("Output prefix: {}", config.output.prefix));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default() {
        assert!(run_validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.atlas.timeout_secs = 0;
        assert!(run_validate(&config).is_err());
    }
}
