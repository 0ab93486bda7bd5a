use anyhow::Result;
use regex::{Captures, Regex};
use std::env;
use tracing::warn;

fn placeholder_regex() -> Regex {
    Regex::new(r"\$\{(\w+)\}").expect("static regex")
}

/// Substitute `${VAR_NAME}` placeholders with environment variable values.
///
/// Unset variables keep their placeholder so the validator can report them
/// instead of silently feeding an empty string into a URL or path.
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let re = placeholder_regex();
    let substituted = re.replace_all(content, |caps: &Captures| {
        let var_name = &caps[1];
        match env::var(var_name) {
            Ok(value) => value,
            Err(_) => {
                warn!("Environment variable '{}' not set", var_name);
                caps[0].to_string()
            }
        }
    });
    Ok(substituted.into_owned())
}

/// Whether `content` still contains unresolved `${VAR}` placeholders.
pub fn has_unresolved_env_vars(content: &str) -> bool {
    placeholder_regex().is_match(content)
}
