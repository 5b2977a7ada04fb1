use std::env;

use crate::core::error::AppError;

/// Portal configuration, read from the environment.
#[derive(Clone, Debug)]
pub struct PortalConfig {
    /// Probability that a simulated STK push settles successfully.
    pub stk_success_rate: f64,
    /// Skip simulated network latency (scripted demos and tests).
    pub instant_backend: bool,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            stk_success_rate: 0.8,
            instant_backend: false,
        }
    }
}

impl PortalConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let stk_success_rate = env::var("PORTAL_STK_SUCCESS_RATE")
            .unwrap_or_else(|_| "0.8".to_string())
            .parse()
            .map_err(|_| {
                AppError::Config("PORTAL_STK_SUCCESS_RATE must be a number".to_string())
            })?;

        let instant_backend = env::var("PORTAL_INSTANT_BACKEND")
            .map(|v| v == "1")
            .unwrap_or(false);

        let config = Self {
            stk_success_rate,
            instant_backend,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !(0.0..=1.0).contains(&self.stk_success_rate) {
            return Err(AppError::Config(
                "PORTAL_STK_SUCCESS_RATE must be between 0.0 and 1.0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PortalConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.stk_success_rate - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_out_of_range_rate_rejected() {
        let config = PortalConfig {
            stk_success_rate: 1.5,
            instant_backend: false,
        };
        assert!(config.validate().is_err());
    }
}
