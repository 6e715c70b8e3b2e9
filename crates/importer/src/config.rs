use std::env;

/// Deployment environment, read from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn from_env() -> Self {
        env::var("APP_ENV")
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImportConfig {
    pub ticketmaster_api_key: Option<String>,
    pub environment: Environment,
}

impl ImportConfig {
    pub fn from_env() -> Self {
        Self {
            ticketmaster_api_key: env::var("TICKETMASTER_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            environment: Environment::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("PROD"), Environment::Production);
        assert_eq!(Environment::parse(" Production "), Environment::Production);
        assert_eq!(Environment::parse("staging"), Environment::Development);
        assert_eq!(Environment::parse(""), Environment::Development);
        assert!(Environment::Production.is_production());
        assert!(!Environment::Development.is_production());
    }
}
