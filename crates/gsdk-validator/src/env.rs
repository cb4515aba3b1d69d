use std::env::VarError;

use thiserror::Error;
use tracing::debug;

pub(crate) const GOROOT_PARAGRAPH: &str = "GOROOT environment variable is empty or could not be detected properly.\n\
This means that some tools like go run or go fmt might not run properly.\n\n";

pub(crate) const GOPATH_PARAGRAPH: &str = "GOPATH environment variable is empty or could not be detected properly.\n\
This means that autocomplete might not work correctly.\n\n";

pub(crate) const HELP_SUFFIX: &str = "Please check the readme here: http://git.io/_InSxQ";

pub(crate) const DIALOG_TITLE: &str = "Missing Go environment variables";

#[derive(Debug, Error)]
pub(crate) enum EnvError {
    #[error("environment variable {0} could not be read: {1}")]
    Unavailable(&'static str, String),
}

pub(crate) trait EnvironmentSource {
    fn go_root(&self) -> Result<Option<String>, EnvError>;
    fn go_path(&self) -> Result<Option<String>, EnvError>;
}

pub(crate) struct SystemEnvironment;

fn read_var(key: &'static str) -> Result<Option<String>, EnvError> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err @ VarError::NotUnicode(_)) => Err(EnvError::Unavailable(key, err.to_string())),
    }
}

impl EnvironmentSource for SystemEnvironment {
    fn go_root(&self) -> Result<Option<String>, EnvError> {
        read_var("GOROOT")
    }

    fn go_path(&self) -> Result<Option<String>, EnvError> {
        read_var("GOPATH")
    }
}

pub(crate) struct EnvironmentAuditor;

impl EnvironmentAuditor {
    // Both checks are independent and additive. A read error counts the
    // same as a missing or empty value.
    pub(crate) fn audit(source: &dyn EnvironmentSource) -> String {
        let mut msg = String::new();

        if value_is_missing("GOROOT", source.go_root()) {
            msg.push_str(GOROOT_PARAGRAPH);
        }
        if value_is_missing("GOPATH", source.go_path()) {
            msg.push_str(GOPATH_PARAGRAPH);
        }

        if !msg.is_empty() {
            msg.push_str(HELP_SUFFIX);
        }
        msg
    }
}

fn value_is_missing(name: &str, value: Result<Option<String>, EnvError>) -> bool {
    match value {
        Ok(Some(value)) => value.trim().is_empty(),
        Ok(None) => true,
        Err(err) => {
            debug!("Failed to read {name}: {err}");
            true
        }
    }
}
