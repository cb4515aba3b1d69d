use thiserror::Error;

pub(crate) const KNOWN_OS: &[&str] = &["linux", "darwin", "windows", "freebsd", "openbsd"];
pub(crate) const KNOWN_ARCH: &[&str] = &["amd64", "arm64", "386", "arm", "riscv64"];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum SdkVariant {
    Go,
    GoAppEngine,
}

impl SdkVariant {
    pub(crate) fn display_name(&self) -> &'static str {
        match self {
            SdkVariant::Go => "Go",
            SdkVariant::GoAppEngine => "Go App Engine",
        }
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            SdkVariant::Go => "go",
            SdkVariant::GoAppEngine => "go-appengine",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<SdkVariant> {
        match value.to_lowercase().as_str() {
            "go" => Some(SdkVariant::Go),
            "go-appengine" => Some(SdkVariant::GoAppEngine),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ConfigError {
    #[error("configuration missing {0}")]
    MissingField(&'static str),
    #[error("unknown target os '{0}'")]
    UnknownOs(String),
    #[error("unknown target arch '{0}'")]
    UnknownArch(String),
    #[error("configuration variant does not match the entry variant")]
    VariantMismatch,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub(crate) struct GoSdkConfig {
    pub(crate) version: String,
    pub(crate) target_os: String,
    pub(crate) target_arch: String,
    pub(crate) go_binary: String,
}

impl GoSdkConfig {
    pub(crate) fn check_valid(&self) -> Result<(), ConfigError> {
        if self.version.trim().is_empty() {
            return Err(ConfigError::MissingField("version"));
        }
        if self.go_binary.trim().is_empty() {
            return Err(ConfigError::MissingField("go binary path"));
        }
        if !KNOWN_OS.contains(&self.target_os.as_str()) {
            return Err(ConfigError::UnknownOs(self.target_os.clone()));
        }
        if !KNOWN_ARCH.contains(&self.target_arch.as_str()) {
            return Err(ConfigError::UnknownArch(self.target_arch.clone()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub(crate) struct AppEngineSdkConfig {
    pub(crate) target_os: Option<String>,
    pub(crate) target_arch: Option<String>,
    pub(crate) api_versions: Vec<String>,
}

impl AppEngineSdkConfig {
    pub(crate) fn check_valid(&self) -> Result<(), ConfigError> {
        if self.target_os.is_none() {
            return Err(ConfigError::MissingField("target os"));
        }
        if self.target_arch.is_none() {
            return Err(ConfigError::MissingField("target arch"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SdkConfig {
    Go(GoSdkConfig),
    AppEngine(AppEngineSdkConfig),
}

impl SdkConfig {
    pub(crate) fn variant(&self) -> SdkVariant {
        match self {
            SdkConfig::Go(_) => SdkVariant::Go,
            SdkConfig::AppEngine(_) => SdkVariant::GoAppEngine,
        }
    }

    pub(crate) fn check_valid(&self) -> Result<(), ConfigError> {
        match self {
            SdkConfig::Go(data) => data.check_valid(),
            SdkConfig::AppEngine(data) => data.check_valid(),
        }
    }

    pub(crate) fn check_valid_for(&self, variant: SdkVariant) -> Result<(), ConfigError> {
        if self.variant() != variant {
            return Err(ConfigError::VariantMismatch);
        }
        self.check_valid()
    }
}
