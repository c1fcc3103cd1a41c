use std::path::PathBuf;

use payloads::requests::{Checkout, CreateCommit, GitLog, RemoteSync, RepoPath, StashPush};
use payloads::{GitBranch, GitCommit, GitOperationResult, GitStash, GitStatus};

use super::{Action, HookContext, Resource};
use crate::contexts::toast::Toast;

pub const DEFAULT_LOG_LIMIT: usize = 50;

/// One repository's state and the commands that change it.
#[derive(Clone)]
pub struct GitHooks {
    pub repo: RepoPath,
    pub status: Resource<GitStatus>,
    pub log: Resource<Vec<GitCommit>>,
    pub branches: Resource<Vec<GitBranch>>,
    pub stashes: Resource<Vec<GitStash>>,
    pub commit: Action<CreateCommit, GitCommit>,
    pub stash: Action<StashPush, GitOperationResult>,
    pub push: Action<RemoteSync, GitOperationResult>,
    pub pull: Action<RemoteSync, GitOperationResult>,
    pub checkout: Action<Checkout, GitOperationResult>,
}

fn summary_toast<P>(_: &P, result: &GitOperationResult) -> Toast {
    Toast::success(result.summary.clone())
}

pub fn use_git(ctx: &HookContext, repo_path: PathBuf, log_limit: usize) -> GitHooks {
    let repo = RepoPath { repo_path };

    let client = ctx.client.clone();
    let status = Resource::with_params(
        "git_status",
        "git_status_failed",
        repo.clone(),
        move |details| {
            let client = client.clone();
            async move { client.git_status(&details).await }
        },
    )
    .with_timeout(ctx.request_timeout);

    let client = ctx.client.clone();
    let details = GitLog {
        repo_path: repo.repo_path.clone(),
        limit: log_limit,
    };
    let log = Resource::with_params(
        "git_log",
        "git_log_failed",
        details,
        move |details| {
            let client = client.clone();
            async move { client.git_log(&details).await }
        },
    )
    .with_timeout(ctx.request_timeout);

    let client = ctx.client.clone();
    let branches = Resource::with_params(
        "git_branches",
        "git_branches_failed",
        repo.clone(),
        move |details| {
            let client = client.clone();
            async move { client.git_branches(&details).await }
        },
    )
    .with_timeout(ctx.request_timeout);

    let client = ctx.client.clone();
    let stashes = Resource::with_params(
        "git_stashes",
        "git_stash_failed",
        repo.clone(),
        move |details| {
            let client = client.clone();
            async move { client.git_stash_list(&details).await }
        },
    )
    .with_timeout(ctx.request_timeout);

    let client = ctx.client.clone();
    let commit = Action::new("Commit", ctx.toasts.clone(), move |details| {
        let client = client.clone();
        async move { client.git_commit(&details).await }
    })
    .refreshes(&status)
    .refreshes(&log)
    .with_success_toast(|_: &CreateCommit, commit: &GitCommit| {
        let short = commit.hash.get(..7).unwrap_or(&commit.hash);
        Toast::success(format!("Committed {short}"))
    });

    let client = ctx.client.clone();
    let stash = Action::new("Stash", ctx.toasts.clone(), move |details| {
        let client = client.clone();
        async move { client.git_stash_push(&details).await }
    })
    .refreshes(&status)
    .refreshes(&stashes)
    .with_success_toast(summary_toast);

    let client = ctx.client.clone();
    let push = Action::new("Push", ctx.toasts.clone(), move |details| {
        let client = client.clone();
        async move { client.git_push(&details).await }
    })
    .refreshes(&status)
    .with_success_toast(summary_toast);

    let client = ctx.client.clone();
    let pull = Action::new("Pull", ctx.toasts.clone(), move |details| {
        let client = client.clone();
        async move { client.git_pull(&details).await }
    })
    .refreshes(&status)
    .refreshes(&log)
    .with_success_toast(summary_toast);

    let client = ctx.client.clone();
    let checkout = Action::new("Checkout", ctx.toasts.clone(), move |details| {
        let client = client.clone();
        async move { client.git_checkout(&details).await }
    })
    .refreshes(&status)
    .refreshes(&branches)
    .refreshes(&log)
    .with_success_toast(|details: &Checkout, _: &GitOperationResult| {
        Toast::success(format!("Switched to {}", details.branch))
    });

    GitHooks {
        repo,
        status,
        log,
        branches,
        stashes,
        commit,
        stash,
        push,
        pull,
        checkout,
    }
}

impl GitHooks {
    pub async fn refresh_all(&self) {
        futures::join!(
            self.status.refresh(),
            self.log.refresh(),
            self.branches.refresh(),
            self.stashes.refresh(),
        );
    }

    pub fn unmount(&self) {
        self.status.unmount();
        self.log.unmount();
        self.branches.unmount();
        self.stashes.unmount();
    }
}
