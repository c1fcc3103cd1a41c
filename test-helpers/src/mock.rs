//! Realistic backend responses for a developer machine with a few runtimes
//! installed, a small package cache and one git checkout.

use std::path::PathBuf;

use jiff::Timestamp;
use payloads::requests::{CleanType, EnvVarScope};
use payloads::{
    AppInfo, CacheInfo, CacheStats, CleanResult, CleanupFile, CleanupPreview,
    EnvVar, Environment, GitBranch, GitCommit, GitFileStatus, GitStash, GitStatus,
    InstalledVersion, PathStatus, PlatformInfo, ShimInfo, UpdateInfo, WindowState,
};

fn at(timestamp: &str) -> Timestamp {
    timestamp.parse().expect("fixture timestamp should parse")
}

pub fn sample_app_info() -> AppInfo {
    AppInfo {
        version: "0.4.2".into(),
        build_date: Some("2025-05-30".into()),
    }
}

pub fn sample_platform() -> PlatformInfo {
    PlatformInfo {
        os: "linux".into(),
        arch: "x86_64".into(),
        os_version: Some("6.8.0".into()),
        hostname: Some("devbox".into()),
    }
}

pub fn sample_update_info() -> UpdateInfo {
    UpdateInfo {
        current_version: "0.4.2".into(),
        latest_version: Some("0.5.0".into()),
        update_available: true,
        release_notes: Some("Faster environment detection".into()),
    }
}

fn cache_stats(entry_count: usize, size: u64, size_human: &str, dir: &str) -> CacheStats {
    CacheStats {
        entry_count,
        size,
        size_human: size_human.into(),
        location: PathBuf::from(format!("/home/dev/.cache/envdesk/{dir}")),
    }
}

pub fn sample_cache_info() -> CacheInfo {
    CacheInfo {
        download_cache: cache_stats(12, 734_003_200, "700.0 MB", "downloads"),
        metadata_cache: cache_stats(48, 2_097_152, "2.0 MB", "metadata"),
        total_size: 736_100_352,
        total_size_human: "702.0 MB".into(),
    }
}

/// Cache info after [`sample_clean_result`] was applied.
pub fn sample_cache_info_after_clean() -> CacheInfo {
    CacheInfo {
        download_cache: cache_stats(0, 0, "0 B", "downloads"),
        metadata_cache: cache_stats(48, 2_097_152, "2.0 MB", "metadata"),
        total_size: 2_097_152,
        total_size_human: "2.0 MB".into(),
    }
}

pub fn sample_clean_preview(clean_type: CleanType) -> CleanupPreview {
    let files = vec![
        CleanupFile {
            path: "/home/dev/.cache/envdesk/downloads/node-v20.11.1-linux-x64.tar.xz"
                .into(),
            size: 524_288_000,
            size_human: "500.0 MB".into(),
            entry_type: "download".into(),
            created_at: Some(at("2025-03-02T10:15:00Z")),
        },
        CleanupFile {
            path: "/home/dev/.cache/envdesk/downloads/go1.22.1.linux-amd64.tar.gz"
                .into(),
            size: 209_715_200,
            size_human: "200.0 MB".into(),
            entry_type: "download".into(),
            created_at: Some(at("2025-04-11T08:00:00Z")),
        },
    ];
    CleanupPreview {
        clean_type,
        total_count: files.len(),
        total_size: 734_003_200,
        total_size_human: "700.0 MB".into(),
        files,
    }
}

pub fn empty_clean_preview(clean_type: CleanType) -> CleanupPreview {
    CleanupPreview {
        clean_type,
        files: vec![],
        total_count: 0,
        total_size: 0,
        total_size_human: "0 B".into(),
    }
}

pub fn sample_clean_result() -> CleanResult {
    CleanResult {
        freed_bytes: 734_003_200,
        freed_human: "700.0 MB".into(),
        deleted_count: 12,
    }
}

fn installed(version: &str, env_type: &str, is_current: bool) -> InstalledVersion {
    InstalledVersion {
        version: version.into(),
        install_path: PathBuf::from(format!("/home/dev/.envdesk/{env_type}/{version}")),
        size: Some(104_857_600),
        installed_at: Some(at("2025-02-14T09:30:00Z")),
        is_current,
    }
}

/// Node installed, Python available but not installed, Go unavailable, Rust
/// installed.
pub fn sample_environments() -> Vec<Environment> {
    vec![
        Environment {
            env_type: "node".into(),
            provider: "fnm".into(),
            current_version: Some("20.11.1".into()),
            installed_versions: vec![
                installed("18.19.0", "node", false),
                installed("20.11.1", "node", true),
            ],
            available: true,
        },
        Environment {
            env_type: "python".into(),
            provider: "pyenv".into(),
            current_version: None,
            installed_versions: vec![],
            available: true,
        },
        Environment {
            env_type: "go".into(),
            provider: "goenv".into(),
            current_version: None,
            installed_versions: vec![],
            available: false,
        },
        Environment {
            env_type: "rust".into(),
            provider: "rustup".into(),
            current_version: Some("1.86.0".into()),
            installed_versions: vec![installed("1.86.0", "rust", true)],
            available: true,
        },
    ]
}

/// `count` available runtimes named `runtime-0`, `runtime-1`, ...
pub fn many_environments(count: usize) -> Vec<Environment> {
    (0..count)
        .map(|i| Environment {
            env_type: format!("runtime-{i}"),
            provider: "asdf".into(),
            current_version: None,
            installed_versions: vec![],
            available: true,
        })
        .collect()
}

pub fn sample_git_status() -> GitStatus {
    GitStatus {
        branch: Some("main".into()),
        upstream: Some("origin/main".into()),
        ahead: 1,
        behind: 0,
        files: vec![
            GitFileStatus {
                path: "src/lib.rs".into(),
                status: "M ".into(),
                staged: true,
            },
            GitFileStatus {
                path: "notes.txt".into(),
                status: "??".into(),
                staged: false,
            },
        ],
    }
}

pub fn clean_git_status() -> GitStatus {
    GitStatus {
        files: vec![],
        ahead: 0,
        ..sample_git_status()
    }
}

pub fn sample_git_commit() -> GitCommit {
    GitCommit {
        hash: "3f9c2a1b7d4e5f60718293a4b5c6d7e8f9a0b1c2".into(),
        author: "Dana Developer".into(),
        message: "Add cache cleanup preview".into(),
        date: at("2025-05-29T16:42:00Z"),
    }
}

pub fn sample_git_log() -> Vec<GitCommit> {
    vec![
        sample_git_commit(),
        GitCommit {
            hash: "a1b2c3d4e5f60718293a4b5c6d7e8f9a0b1c2d3e".into(),
            author: "Dana Developer".into(),
            message: "Initial commit".into(),
            date: at("2025-05-01T09:00:00Z"),
        },
    ]
}

pub fn sample_git_branches() -> Vec<GitBranch> {
    vec![
        GitBranch {
            name: "main".into(),
            is_current: true,
            is_remote: false,
            upstream: Some("origin/main".into()),
        },
        GitBranch {
            name: "feature/shims".into(),
            is_current: false,
            is_remote: false,
            upstream: None,
        },
    ]
}

pub fn sample_git_stashes() -> Vec<GitStash> {
    vec![GitStash {
        index: 0,
        message: "WIP on main: 3f9c2a1 Add cache cleanup preview".into(),
    }]
}

pub fn sample_shims() -> Vec<ShimInfo> {
    vec![ShimInfo {
        binary_name: "node".into(),
        env_type: "node".into(),
        version: Some("20.11.1".into()),
        target_path: "/home/dev/.envdesk/node/20.11.1/bin/node".into(),
    }]
}

pub fn sample_path_status(is_in_path: bool) -> PathStatus {
    PathStatus {
        shim_dir: "/home/dev/.envdesk/shims".into(),
        is_in_path,
        add_command: r#"export PATH="$HOME/.envdesk/shims:$PATH""#.into(),
    }
}

pub fn sample_env_vars(scope: EnvVarScope) -> Vec<EnvVar> {
    vec![EnvVar {
        key: "EDITOR".into(),
        value: "nvim".into(),
        scope,
    }]
}

pub fn maximized_window() -> WindowState {
    WindowState {
        is_maximized: true,
        is_focused: true,
        ..WindowState::default()
    }
}
