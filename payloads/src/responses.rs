use std::path::PathBuf;

use derive_more::Display;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::requests::{CleanType, EnvVarScope};

/// Result of asking the updater whether a newer desktop build exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInfo {
    pub current_version: String,
    pub latest_version: Option<String>,
    pub update_available: bool,
    pub release_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub os: String,
    pub arch: String,
    pub os_version: Option<String>,
    pub hostname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub version: String,
    pub build_date: Option<String>,
}

/// Combined view shown on the about page. Never sent over the bridge as a
/// single command; the UI assembles it from [`AppInfo`] and [`PlatformInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub app_version: String,
    pub os: String,
    pub arch: String,
    pub os_version: Option<String>,
    pub hostname: Option<String>,
}

impl SystemInfo {
    pub fn assemble(app: AppInfo, platform: PlatformInfo) -> Self {
        Self {
            app_version: app.version,
            os: platform.os,
            arch: platform.arch,
            os_version: platform.os_version,
            hostname: platform.hostname,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entry_count: usize,
    pub size: u64,
    pub size_human: String,
    pub location: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheInfo {
    pub download_cache: CacheStats,
    pub metadata_cache: CacheStats,
    pub total_size: u64,
    pub total_size_human: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupFile {
    pub path: PathBuf,
    pub size: u64,
    pub size_human: String,
    pub entry_type: String,
    pub created_at: Option<Timestamp>,
}

/// What a clean of a given type would remove, computed without deleting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupPreview {
    pub clean_type: CleanType,
    pub files: Vec<CleanupFile>,
    pub total_count: usize,
    pub total_size: u64,
    pub total_size_human: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanResult {
    pub freed_bytes: u64,
    pub freed_human: String,
    pub deleted_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheIssue {
    pub entry_key: String,
    pub issue_type: String,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResult {
    pub is_healthy: bool,
    pub valid_entries: usize,
    pub missing_files: usize,
    pub corrupted_files: usize,
    pub size_mismatches: usize,
    pub details: Vec<CacheIssue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairResult {
    pub removed_entries: usize,
    pub recovered_bytes: u64,
    pub freed_human: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledVersion {
    pub version: String,
    pub install_path: PathBuf,
    pub size: Option<u64>,
    pub installed_at: Option<Timestamp>,
    pub is_current: bool,
}

/// One managed runtime (node, python, go, ...) as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub env_type: String,
    pub provider: String,
    pub current_version: Option<String>,
    pub installed_versions: Vec<InstalledVersion>,
    /// Whether the provider for this runtime is usable on this machine.
    pub available: bool,
}

impl Environment {
    pub fn is_installed(&self) -> bool {
        !self.installed_versions.is_empty()
    }
}

/// Where a detected version came from, in the backend's precedence order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VersionSource {
    LocalFile,
    Manifest,
    GlobalFile,
    SystemDefault,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedEnvironment {
    pub env_type: String,
    pub version: String,
    pub source: VersionSource,
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitFileStatus {
    pub path: String,
    /// Porcelain two-letter status, e.g. `" M"` or `"??"`.
    pub status: String,
    pub staged: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitStatus {
    pub branch: Option<String>,
    pub upstream: Option<String>,
    pub ahead: u32,
    pub behind: u32,
    pub files: Vec<GitFileStatus>,
}

impl GitStatus {
    pub fn is_clean(&self) -> bool {
        self.files.is_empty()
    }

    pub fn staged_count(&self) -> usize {
        self.files.iter().filter(|f| f.staged).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitCommit {
    pub hash: String,
    pub author: String,
    pub message: String,
    pub date: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitBranch {
    pub name: String,
    pub is_current: bool,
    pub is_remote: bool,
    pub upstream: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitStash {
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitOperationResult {
    pub summary: String,
}

/// Authoritative state of a native window, as last read from the OS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    pub is_maximized: bool,
    pub is_minimized: bool,
    pub is_fullscreen: bool,
    pub is_always_on_top: bool,
    pub is_focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShimInfo {
    pub binary_name: String,
    pub env_type: String,
    pub version: Option<String>,
    pub target_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStatus {
    pub shim_dir: PathBuf,
    pub is_in_path: bool,
    /// Shell snippet the user can run when automatic setup is not possible.
    pub add_command: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
    pub scope: EnvVarScope,
}
