use std::collections::BTreeSet;

use serde::Deserialize;
use thiserror::Error;

use crate::command_adapter;
use crate::command_runner::CommandRunner;
use crate::doctor::is_executable_in_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCandidate {
    /// Display name, e.g. "owner/repo". Not necessarily unique.
    pub name: String,
    /// Clone URL; unique within a merged candidate list.
    pub url: String,
}

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("gh CLI not found in PATH; install it from https://cli.github.com")]
    CliMissing,
    #[error("gh returned no repositories; check authentication with `gh auth status`{detail}")]
    NoRepositories { detail: String },
}

#[derive(Debug, Deserialize)]
struct RepoRecord {
    #[serde(rename = "nameWithOwner")]
    name_with_owner: String,
    url: String,
}

/// Lists up to `limit` repositories for the authenticated user (`owner` =
/// None) or a named owner. The error carries a human-readable detail and is
/// tolerated per source by `load_repo_candidates`.
pub fn list_repositories(
    runner: &dyn CommandRunner,
    owner: Option<&str>,
    limit: usize,
) -> Result<Vec<RepoCandidate>, String> {
    let limit_value = limit.to_string();
    let mut args = vec!["repo", "list"];
    if let Some(owner) = owner {
        args.push(owner);
    }
    args.extend(["--limit", &limit_value, "--json", "nameWithOwner,url"]);

    let output = command_adapter::run_program(runner, "gh", &args, None)?;
    let output = command_adapter::ensure_success(&args, output)
        .map_err(|failure| format!("gh {} (exit {}): {}", failure.command, failure.status, failure.stderr))?;

    let records: Vec<RepoRecord> = serde_json::from_str(&output.stdout)
        .map_err(|error| format!("failed to parse gh output: {error}"))?;

    Ok(records
        .into_iter()
        .map(|record| RepoCandidate {
            name: record.name_with_owner,
            url: record.url,
        })
        .collect())
}

/// Merges listing results, dropping exact url duplicates (first occurrence
/// wins) and sorting case-insensitively by display name.
pub fn merge_candidates(sources: Vec<Vec<RepoCandidate>>) -> Vec<RepoCandidate> {
    let mut seen = BTreeSet::new();
    let mut merged: Vec<RepoCandidate> = sources
        .into_iter()
        .flatten()
        .filter(|candidate| seen.insert(candidate.url.clone()))
        .collect();

    merged.sort_by(|left, right| {
        left.name
            .to_lowercase()
            .cmp(&right.name.to_lowercase())
            .then_with(|| left.name.cmp(&right.name))
    });
    merged
}

/// Fetches the user's own repositories and the configured organization's,
/// merged per `merge_candidates`. One source failing is tolerated as long
/// as the other contributes entries; an entirely empty result is an error
/// that distinguishes a missing `gh` binary from an authenticated-but-empty
/// (or auth-failed) listing.
pub fn load_repo_candidates(
    runner: &dyn CommandRunner,
    organization: &str,
    limit: usize,
) -> Result<Vec<RepoCandidate>, GithubError> {
    load_with_lookup(runner, organization, limit, is_executable_in_path("gh"))
}

fn load_with_lookup(
    runner: &dyn CommandRunner,
    organization: &str,
    limit: usize,
    gh_in_path: bool,
) -> Result<Vec<RepoCandidate>, GithubError> {
    let mut owners = vec![None];
    if !organization.trim().is_empty() {
        owners.push(Some(organization));
    }

    let mut sources = Vec::new();
    let mut last_failure = None;
    for owner in owners {
        match list_repositories(runner, owner, limit) {
            Ok(candidates) => sources.push(candidates),
            Err(detail) => last_failure = Some(detail),
        }
    }

    let merged = merge_candidates(sources);
    if merged.is_empty() {
        return Err(empty_result_error(gh_in_path, last_failure));
    }

    Ok(merged)
}

fn empty_result_error(gh_in_path: bool, last_failure: Option<String>) -> GithubError {
    if !gh_in_path {
        return GithubError::CliMissing;
    }

    GithubError::NoRepositories {
        detail: last_failure
            .map(|detail| format!(" ({detail})"))
            .unwrap_or_default(),
    }
}
