use std::path::PathBuf;

use derive_more::Display;
use serde::{Deserialize, Serialize};

pub const GIT_LOG_MAX_LIMIT: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} is invalid: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

/// Minimal client-side checks run before a command crosses the bridge.
///
/// The backend remains the authority; these only catch input that can never
/// succeed so the user gets feedback without a round trip.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for () {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

fn require_path(
    field: &'static str,
    value: &std::path::Path,
) -> Result<(), ValidationError> {
    if value.as_os_str().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CleanType {
    #[display("downloads")]
    Downloads,
    #[display("metadata")]
    Metadata,
    #[default]
    #[display("all")]
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanCache {
    pub clean_type: CleanType,
    /// Move files to the OS trash instead of deleting them.
    pub use_trash: bool,
}

impl Validate for CleanCache {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallEnvironment {
    pub env_type: String,
    pub version: String,
    pub provider: Option<String>,
    pub force: bool,
}

impl Validate for InstallEnvironment {
    fn validate(&self) -> Result<(), ValidationError> {
        require("env_type", &self.env_type)?;
        require("version", &self.version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UninstallEnvironment {
    pub env_type: String,
    pub version: String,
}

impl Validate for UninstallEnvironment {
    fn validate(&self) -> Result<(), ValidationError> {
        require("env_type", &self.env_type)?;
        require("version", &self.version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetGlobalVersion {
    pub env_type: String,
    pub version: String,
}

impl Validate for SetGlobalVersion {
    fn validate(&self) -> Result<(), ValidationError> {
        require("env_type", &self.env_type)?;
        require("version", &self.version)
    }
}

/// Pin a version for one project directory (writes its version file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetLocalVersion {
    pub env_type: String,
    pub version: String,
    pub project_path: PathBuf,
}

impl Validate for SetLocalVersion {
    fn validate(&self) -> Result<(), ValidationError> {
        require("env_type", &self.env_type)?;
        require("version", &self.version)?;
        require_path("project_path", &self.project_path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectEnvironments {
    pub start_path: PathBuf,
}

impl Validate for DetectEnvironments {
    fn validate(&self) -> Result<(), ValidationError> {
        require_path("start_path", &self.start_path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoPath {
    pub repo_path: PathBuf,
}

impl Validate for RepoPath {
    fn validate(&self) -> Result<(), ValidationError> {
        require_path("repo_path", &self.repo_path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitLog {
    pub repo_path: PathBuf,
    pub limit: usize,
}

impl Validate for GitLog {
    fn validate(&self) -> Result<(), ValidationError> {
        require_path("repo_path", &self.repo_path)?;
        if self.limit == 0 || self.limit > GIT_LOG_MAX_LIMIT {
            return Err(ValidationError::InvalidValue {
                field: "limit",
                reason: "must be between 1 and 1000",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCommit {
    pub repo_path: PathBuf,
    pub message: String,
    pub amend: bool,
    /// Stage all tracked modifications before committing.
    pub all: bool,
}

impl Validate for CreateCommit {
    fn validate(&self) -> Result<(), ValidationError> {
        require_path("repo_path", &self.repo_path)?;
        require("message", &self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StashPush {
    pub repo_path: PathBuf,
    pub message: Option<String>,
    pub include_untracked: bool,
}

impl Validate for StashPush {
    fn validate(&self) -> Result<(), ValidationError> {
        require_path("repo_path", &self.repo_path)
    }
}

/// Parameters shared by push and pull.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSync {
    pub repo_path: PathBuf,
    pub remote: Option<String>,
    pub branch: Option<String>,
}

impl Validate for RemoteSync {
    fn validate(&self) -> Result<(), ValidationError> {
        require_path("repo_path", &self.repo_path)?;
        if let Some(remote) = &self.remote {
            require("remote", remote)?;
        }
        if let Some(branch) = &self.branch {
            require("branch", branch)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    pub repo_path: PathBuf,
    pub branch: String,
}

impl Validate for Checkout {
    fn validate(&self) -> Result<(), ValidationError> {
        require_path("repo_path", &self.repo_path)?;
        require("branch", &self.branch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateShim {
    pub binary_name: String,
    pub env_type: String,
    pub version: Option<String>,
    pub target_path: PathBuf,
}

impl Validate for CreateShim {
    fn validate(&self) -> Result<(), ValidationError> {
        require("binary_name", &self.binary_name)?;
        if self.binary_name.contains(['/', '\\']) {
            return Err(ValidationError::InvalidValue {
                field: "binary_name",
                reason: "must not contain path separators",
            });
        }
        require("env_type", &self.env_type)?;
        require_path("target_path", &self.target_path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveShim {
    pub binary_name: String,
}

impl Validate for RemoveShim {
    fn validate(&self) -> Result<(), ValidationError> {
        require("binary_name", &self.binary_name)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EnvVarScope {
    #[default]
    Process,
    User,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEnvVars {
    pub scope: EnvVarScope,
}

impl Validate for ListEnvVars {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

fn validate_env_key(key: &str) -> Result<(), ValidationError> {
    require("key", key)?;
    if key.contains('=') || key.contains('\0') {
        return Err(ValidationError::InvalidValue {
            field: "key",
            reason: "must not contain '=' or NUL",
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetEnvVar {
    pub key: String,
    pub value: String,
    pub scope: EnvVarScope,
}

impl Validate for SetEnvVar {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_env_key(&self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveEnvVar {
    pub key: String,
    pub scope: EnvVarScope,
}

impl Validate for RemoveEnvVar {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_env_key(&self.key)
    }
}

/// Addresses one native window by its label (e.g. `"main"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowTarget {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetWindowFlag {
    pub label: String,
    pub enabled: bool,
}
