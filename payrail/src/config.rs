//! Client configuration: credentials and target environment.

/// The gateway deployment a client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// The integration sandbox.
    Sandbox,
    /// The live production gateway.
    Production,
    /// A custom deployment, e.g. a local test double.
    Custom {
        /// Base URL without a trailing slash, e.g. `http://localhost:3000`.
        base_url: String,
    },
}

impl Environment {
    /// The base URL of this environment, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match self {
            Self::Sandbox => "https://api.sandbox.payrail.com",
            Self::Production => "https://api.payrail.com",
            Self::Custom { base_url } => base_url,
        }
    }
}

/// Everything needed to authenticate and address one merchant account.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Target deployment.
    pub environment: Environment,
    /// The merchant account identifier, part of every request path.
    pub merchant_id: String,
    /// Public half of the API key pair.
    pub public_key: String,
    /// Private half of the API key pair.
    pub private_key: String,
}

impl Configuration {
    /// Creates a configuration for the given environment and credentials.
    #[must_use]
    pub fn new(
        environment: Environment,
        merchant_id: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            environment,
            merchant_id: merchant_id.into(),
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    /// The path prefix scoping every request to this merchant.
    #[must_use]
    pub fn base_merchant_path(&self) -> String {
        format!("/merchants/{}", self.merchant_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_base_urls() {
        assert_eq!(
            Environment::Sandbox.base_url(),
            "https://api.sandbox.payrail.com"
        );
        assert_eq!(Environment::Production.base_url(), "https://api.payrail.com");
        let custom = Environment::Custom {
            base_url: "http://localhost:3000".to_owned(),
        };
        assert_eq!(custom.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_base_merchant_path() {
        let config = Configuration::new(Environment::Sandbox, "m123", "pub", "priv");
        assert_eq!(config.base_merchant_path(), "/merchants/m123");
    }
}
