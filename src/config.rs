use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Process settings, overridable through `IPECHO_`-prefixed environment
/// variables (e.g. `IPECHO_LISTEN_ADDRESS`, `IPECHO_REQUIRE_ORIGIN_HEADER`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub listen_address: String,
    pub require_origin_header: bool,
    pub strip_port_from_address: bool,
}

/// The toggles the two historical deployments disagreed on: the managed
/// deployment required an `Origin` header and returned the address verbatim,
/// the standalone one skipped the header check and stripped the port.
#[derive(Debug, Clone, Copy)]
pub struct ReportPolicy {
    pub require_origin_header: bool,
    pub strip_port_from_address: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            listen_address: "0.0.0.0:8080".to_string(),
            require_origin_header: false,
            strip_port_from_address: true,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        Config::builder()
            .set_default("listen_address", defaults.listen_address)?
            .set_default("require_origin_header", defaults.require_origin_header)?
            .set_default("strip_port_from_address", defaults.strip_port_from_address)?
            .add_source(Environment::with_prefix("IPECHO").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn policy(&self) -> ReportPolicy {
        ReportPolicy {
            require_origin_header: self.require_origin_header,
            strip_port_from_address: self.strip_port_from_address,
        }
    }
}
