use std::{rc::Rc, time::Duration};

use futures::{FutureExt, future::LocalBoxFuture};
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::{
    AppInfo, BackendErrorBody, CacheInfo, CleanResult, CleanupPreview,
    DetectedEnvironment, EnvVar, Environment, ErrorKind, GitBranch, GitCommit,
    GitOperationResult, GitStash, GitStatus, PathStatus, PlatformInfo,
    RepairResult, ShimInfo, UpdateInfo, VerifyResult, WindowState,
    ValidationError, classify_message, requests,
};

/// Carries one command across the bridge and returns its raw JSON result.
///
/// Futures are local: the UI runs on a single cooperative event loop and
/// nothing here is shared across threads.
pub trait Transport {
    fn invoke<'a>(
        &'a self,
        command: &'a str,
        args: Value,
    ) -> LocalBoxFuture<'a, Result<Value, ClientError>>;
}

/// Bridge transport that talks to the backend's local HTTP endpoint.
pub struct HttpTransport {
    pub address: String,
    pub inner_client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            inner_client: reqwest::Client::new(),
            timeout: None,
        }
    }

    /// Apply a per-request timeout at the HTTP layer.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn format_url(&self, command: &str) -> String {
        format!("{}/api/invoke/{command}", self.address.trim_end_matches('/'))
    }

    async fn post(&self, command: &str, args: Value) -> Result<Value, ClientError> {
        let mut request = self.inner_client.post(self.format_url(command)).json(&args);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!(command, "invoking bridge command");
        let response = request.send().await.map_err(|e| self.map_reqwest(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_reqwest(e))?;
        if !status.is_success() {
            tracing::debug!(command, %status, "bridge command failed");
        }
        decode_response(status, &text)
    }

    fn map_reqwest(&self, error: reqwest::Error) -> ClientError {
        if error.is_timeout() {
            return ClientError::Timeout(self.timeout.unwrap_or_default());
        }
        tracing::debug!(%error, "bridge request failed");
        ClientError::Network(error)
    }
}

impl Transport for HttpTransport {
    fn invoke<'a>(
        &'a self,
        command: &'a str,
        args: Value,
    ) -> LocalBoxFuture<'a, Result<Value, ClientError>> {
        self.post(command, args).boxed_local()
    }
}

/// Turn a bridge response into a JSON value or a [`ClientError`].
///
/// A 2xx with an empty body decodes to `null`. A failure body is parsed as
/// [`BackendErrorBody`] when possible and otherwise classified from its text.
pub fn decode_response(status: StatusCode, text: &str) -> Result<Value, ClientError> {
    if !status.is_success() {
        if let Ok(body) = serde_json::from_str::<BackendErrorBody>(text) {
            return Err(ClientError::Backend {
                kind: body.kind,
                message: body.message,
            });
        }
        let message = if text.trim().is_empty() {
            format!("Backend responded with {status}")
        } else {
            text.trim().to_string()
        };
        return Err(ClientError::backend(message));
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}

/// Typed facade over the bridge commands.
#[derive(Clone)]
pub struct APIClient {
    transport: Rc<dyn Transport>,
}

/// Helper methods for invoking commands
impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self::with_transport(Rc::new(HttpTransport::new(address)))
    }

    pub fn with_transport(transport: Rc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        command: &str,
        args: &impl Serialize,
    ) -> Result<T, ClientError> {
        let args = serde_json::to_value(args)?;
        let value = self.transport.invoke(command, args).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn call_empty(
        &self,
        command: &str,
        args: &impl Serialize,
    ) -> Result<(), ClientError> {
        let args = serde_json::to_value(args)?;
        self.transport.invoke(command, args).await?;
        Ok(())
    }
}

/// About page and updater
impl APIClient {
    pub async fn app_info(&self) -> Result<AppInfo, ClientError> {
        self.call("app_info", &json!({})).await
    }

    pub async fn check_for_update(&self) -> Result<UpdateInfo, ClientError> {
        self.call("check_for_update", &json!({})).await
    }

    pub async fn platform_info(&self) -> Result<PlatformInfo, ClientError> {
        self.call("platform_info", &json!({})).await
    }
}

/// Package cache
impl APIClient {
    pub async fn cache_info(&self) -> Result<CacheInfo, ClientError> {
        self.call("cache_info", &json!({})).await
    }

    /// List what a clean would remove without touching the disk.
    pub async fn cache_clean_preview(
        &self,
        clean_type: requests::CleanType,
    ) -> Result<CleanupPreview, ClientError> {
        self.call("cache_clean_preview", &json!({ "clean_type": clean_type }))
            .await
    }

    pub async fn cache_clean(
        &self,
        details: &requests::CleanCache,
    ) -> Result<CleanResult, ClientError> {
        self.call("cache_clean", details).await
    }

    pub async fn cache_verify(&self) -> Result<VerifyResult, ClientError> {
        self.call("cache_verify", &json!({})).await
    }

    pub async fn cache_repair(&self) -> Result<RepairResult, ClientError> {
        self.call("cache_repair", &json!({})).await
    }
}

/// Runtime environments
impl APIClient {
    pub async fn env_list(&self) -> Result<Vec<Environment>, ClientError> {
        self.call("env_list", &json!({})).await
    }

    pub async fn env_install(
        &self,
        details: &requests::InstallEnvironment,
    ) -> Result<(), ClientError> {
        self.call_empty("env_install", details).await
    }

    pub async fn env_uninstall(
        &self,
        details: &requests::UninstallEnvironment,
    ) -> Result<(), ClientError> {
        self.call_empty("env_uninstall", details).await
    }

    pub async fn env_set_global(
        &self,
        details: &requests::SetGlobalVersion,
    ) -> Result<(), ClientError> {
        self.call_empty("env_set_global", details).await
    }

    pub async fn env_set_local(
        &self,
        details: &requests::SetLocalVersion,
    ) -> Result<(), ClientError> {
        self.call_empty("env_set_local", details).await
    }

    pub async fn env_detect(
        &self,
        details: &requests::DetectEnvironments,
    ) -> Result<Vec<DetectedEnvironment>, ClientError> {
        self.call("env_detect", details).await
    }
}

/// Git repositories
impl APIClient {
    pub async fn git_status(
        &self,
        repo: &requests::RepoPath,
    ) -> Result<GitStatus, ClientError> {
        self.call("git_status", repo).await
    }

    pub async fn git_log(
        &self,
        details: &requests::GitLog,
    ) -> Result<Vec<GitCommit>, ClientError> {
        self.call("git_log", details).await
    }

    pub async fn git_branches(
        &self,
        repo: &requests::RepoPath,
    ) -> Result<Vec<GitBranch>, ClientError> {
        self.call("git_branches", repo).await
    }

    pub async fn git_stash_list(
        &self,
        repo: &requests::RepoPath,
    ) -> Result<Vec<GitStash>, ClientError> {
        self.call("git_stash_list", repo).await
    }

    pub async fn git_commit(
        &self,
        details: &requests::CreateCommit,
    ) -> Result<GitCommit, ClientError> {
        self.call("git_commit", details).await
    }

    pub async fn git_stash_push(
        &self,
        details: &requests::StashPush,
    ) -> Result<GitOperationResult, ClientError> {
        self.call("git_stash_push", details).await
    }

    pub async fn git_push(
        &self,
        details: &requests::RemoteSync,
    ) -> Result<GitOperationResult, ClientError> {
        self.call("git_push", details).await
    }

    pub async fn git_pull(
        &self,
        details: &requests::RemoteSync,
    ) -> Result<GitOperationResult, ClientError> {
        self.call("git_pull", details).await
    }

    pub async fn git_checkout(
        &self,
        details: &requests::Checkout,
    ) -> Result<GitOperationResult, ClientError> {
        self.call("git_checkout", details).await
    }
}

/// Shims and PATH
impl APIClient {
    pub async fn shim_list(&self) -> Result<Vec<ShimInfo>, ClientError> {
        self.call("shim_list", &json!({})).await
    }

    pub async fn shim_create(
        &self,
        details: &requests::CreateShim,
    ) -> Result<ShimInfo, ClientError> {
        self.call("shim_create", details).await
    }

    pub async fn shim_remove(
        &self,
        details: &requests::RemoveShim,
    ) -> Result<(), ClientError> {
        self.call_empty("shim_remove", details).await
    }

    pub async fn path_status(&self) -> Result<PathStatus, ClientError> {
        self.call("path_status", &json!({})).await
    }

    /// Ask the backend to add the shim directory to the user's PATH.
    pub async fn path_setup(&self) -> Result<(), ClientError> {
        self.call_empty("path_setup", &json!({})).await
    }
}

/// Environment variables
impl APIClient {
    pub async fn env_var_list(
        &self,
        details: &requests::ListEnvVars,
    ) -> Result<Vec<EnvVar>, ClientError> {
        self.call("env_var_list", details).await
    }

    pub async fn env_var_set(
        &self,
        details: &requests::SetEnvVar,
    ) -> Result<(), ClientError> {
        self.call_empty("env_var_set", details).await
    }

    pub async fn env_var_remove(
        &self,
        details: &requests::RemoveEnvVar,
    ) -> Result<(), ClientError> {
        self.call_empty("env_var_remove", details).await
    }
}

/// Native window management
impl APIClient {
    pub async fn window_state(
        &self,
        target: &requests::WindowTarget,
    ) -> Result<WindowState, ClientError> {
        self.call("window_state", target).await
    }

    pub async fn window_minimize(
        &self,
        target: &requests::WindowTarget,
    ) -> Result<(), ClientError> {
        self.call_empty("window_minimize", target).await
    }

    pub async fn window_toggle_maximize(
        &self,
        target: &requests::WindowTarget,
    ) -> Result<(), ClientError> {
        self.call_empty("window_toggle_maximize", target).await
    }

    pub async fn window_set_fullscreen(
        &self,
        details: &requests::SetWindowFlag,
    ) -> Result<(), ClientError> {
        self.call_empty("window_set_fullscreen", details).await
    }

    pub async fn window_set_always_on_top(
        &self,
        details: &requests::SetWindowFlag,
    ) -> Result<(), ClientError> {
        self.call_empty("window_set_always_on_top", details).await
    }

    pub async fn window_close(
        &self,
        target: &requests::WindowTarget,
    ) -> Result<(), ClientError> {
        self.call_empty("window_close", target).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A failure reported by the backend, with its category.
    #[error("{message}")]
    Backend { kind: ErrorKind, message: String },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("Unexpected response from backend: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Request was cancelled")]
    Cancelled,
    /// Rejected locally; the command was never sent.
    #[error("{0}")]
    Invalid(#[from] ValidationError),
}

impl ClientError {
    /// A backend failure that arrived as plain text.
    pub fn backend(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Backend {
            kind: classify_message(&message),
            message,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Backend { kind, .. } => *kind,
            Self::Network(_) => ErrorKind::Network,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Decode(_) => ErrorKind::Internal,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Invalid(_) => ErrorKind::InvalidInput,
        }
    }
}
