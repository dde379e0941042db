use anyhow::Result;
use devenv_core::github::{RepoCandidate, load_repo_candidates};

use crate::App;

impl<'a> App<'a> {
    /// Returns the merged, deduplicated, sorted repository candidate list,
    /// fetching it on the first call and serving it from memory afterwards.
    /// A failed load leaves the cache empty so the next invocation retries.
    pub fn ensure_repos_loaded(&self) -> Result<Vec<RepoCandidate>> {
        if let Some(cached) = self.repo_cache.borrow().as_ref() {
            return Ok(cached.clone());
        }

        let candidates = load_repo_candidates(
            self.runner,
            &self.config.setup.organization,
            self.config.setup.repo_list_limit,
        )?;

        *self.repo_cache.borrow_mut() = Some(candidates.clone());
        Ok(candidates)
    }

    pub fn repos_cached(&self) -> bool {
        self.repo_cache.borrow().is_some()
    }
}
