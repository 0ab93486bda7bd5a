use crate::*;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("Feed endpoint is required")]
    MissingFeedEndpoint,

    #[error("Underlying symbol is required")]
    MissingUnderlying,

    #[error("Invalid URL in {field}: {url}")]
    InvalidUrl { field: String, url: String },

    #[error("{field} must be positive, got {value}")]
    InvalidPositiveNumber { field: String, value: f64 },

    #[error("Ledger path is required")]
    MissingLedgerPath,

    #[error("Sync target fragment is required")]
    MissingTargetFragment,

    #[error("Poll interval must be at least 60 seconds, got {0}")]
    PollIntervalTooShort(u64),

    #[error("Invalid log format: {0}. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("Unresolved environment variable placeholder in {field}: {value}")]
    UnresolvedEnvVar { field: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }
}

pub fn validate_config(config: &WallSyncConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_feed(&config.feed, &mut report);
    validate_levels(&config.levels, &mut report);
    validate_ledger(&config.ledger, &mut report);
    validate_sync(&config.sync, &mut report);
    validate_telemetry(&config.telemetry, &mut report);

    report
}

fn validate_url_field(field: &str, value: &str, report: &mut ValidationReport) {
    if has_unresolved_env_vars(value) {
        report.add_error(ValidationError::UnresolvedEnvVar {
            field: field.to_string(),
            value: value.to_string(),
        });
        return;
    }
    if Url::parse(value).is_err() {
        report.add_error(ValidationError::InvalidUrl {
            field: field.to_string(),
            url: value.to_string(),
        });
    }
}

fn validate_feed(feed: &FeedConfig, report: &mut ValidationReport) {
    if feed.endpoint.trim().is_empty() {
        report.add_error(ValidationError::MissingFeedEndpoint);
    } else {
        validate_url_field("feed.endpoint", &feed.endpoint, report);
    }

    if feed.underlying.trim().is_empty() {
        report.add_error(ValidationError::MissingUnderlying);
    }

    if feed.timeout_seconds == 0 {
        report.add_error(ValidationError::InvalidPositiveNumber {
            field: "feed.timeout_seconds".to_string(),
            value: 0.0,
        });
    }
}

fn validate_levels(levels: &LevelsConfig, report: &mut ValidationReport) {
    if levels.contract_multiplier <= 0.0 {
        report.add_error(ValidationError::InvalidPositiveNumber {
            field: "levels.contract_multiplier".to_string(),
            value: levels.contract_multiplier,
        });
    }
    if levels.scaling_factor <= 0.0 {
        report.add_error(ValidationError::InvalidPositiveNumber {
            field: "levels.scaling_factor".to_string(),
            value: levels.scaling_factor,
        });
    }
}

fn validate_ledger(ledger: &LedgerConfig, report: &mut ValidationReport) {
    if ledger.path.as_os_str().is_empty() {
        report.add_error(ValidationError::MissingLedgerPath);
    }
    if let Some(url) = &ledger.url {
        validate_url_field("ledger.url", url, report);
    }
}

fn validate_sync(sync: &SyncConfig, report: &mut ValidationReport) {
    if sync.target_fragment.trim().is_empty() {
        report.add_error(ValidationError::MissingTargetFragment);
    }

    if sync.poll_interval_seconds < 60 {
        report.add_error(ValidationError::PollIntervalTooShort(
            sync.poll_interval_seconds,
        ));
    } else if sync.poll_interval_seconds < 300 {
        report.add_warning(
            "sync.poll_interval_seconds",
            "below the intended 5-15 minute cadence; the feed and ledger are only refreshed every few hours",
        );
    }

    if sync.settle_delay_ms > 5_000 {
        report.add_warning(
            "sync.settle_delay_ms",
            "settle delay above 5s will make every sync cycle sluggish",
        );
    }

    validate_url_field("sync.bridge_url", &sync.bridge_url, report);
}

fn validate_telemetry(telemetry: &TelemetryConfig, report: &mut ValidationReport) {
    match telemetry.log_format.as_str() {
        "pretty" | "json" | "compact" => {}
        other => report.add_error(ValidationError::InvalidLogFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::generate_default_config;

    #[test]
    fn test_default_config_is_valid() {
        let report = validate_config(&generate_default_config());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_bad_values_are_each_reported() {
        let mut config = generate_default_config();
        config.feed.endpoint = "not a url".to_string();
        config.feed.underlying = " ".to_string();
        config.levels.scaling_factor = 0.0;
        config.sync.poll_interval_seconds = 10;
        config.telemetry.log_format = "fancy".to_string();

        let report = validate_config(&config);
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 5);
    }

    #[test]
    fn test_fast_polling_is_a_warning_not_an_error() {
        let mut config = generate_default_config();
        config.sync.poll_interval_seconds = 120;

        let report = validate_config(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_unresolved_placeholder_is_an_error() {
        let mut config = generate_default_config();
        config.feed.endpoint = "https://${FEED_HOST}/api".to_string();

        let report = validate_config(&config);
        assert!(!report.is_valid());
    }
}
