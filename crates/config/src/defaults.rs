pub fn default_timeout_seconds() -> u64 {
    30
}

pub fn default_contract_multiplier() -> f64 {
    1.0
}

pub fn default_scaling_factor() -> f64 {
    1_000_000_000.0
}

pub fn default_poll_interval_seconds() -> u64 {
    600
}

pub fn default_settle_delay_ms() -> u64 {
    400
}

pub fn default_bridge_url() -> String {
    "http://127.0.0.1:8642".to_string()
}

pub fn default_log_format() -> String {
    "pretty".to_string()
}
