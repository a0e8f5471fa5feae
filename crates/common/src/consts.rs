pub const GENERATE_PATH_PREFIX: &str = "/api/";
pub const PROVIDERS_PATH: &str = "/v1/providers";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const BIND_ADDRESS_ENV: &str = "BIND_ADDRESS";
pub const CONFIG_PATH_ENV: &str = "PROMPTGATE_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "./promptgate_config.yaml";

/// Upper bound on one outbound provider call when the config sets none
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

pub const SERVICE_NAME: &str = "promptgate";
