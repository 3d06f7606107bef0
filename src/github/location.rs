// src/github/location.rs
// =============================================================================
// Identifies the folder we are going to download.
//
// A RepositoryLocation is built once per run, either from a browser URL like
//   https://github.com/spf13/cobra/tree/main/docs
// or directly from its four parts, and is read-only afterwards.
// =============================================================================

use crate::error::{Error, Result};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocation {
    owner: String,
    repo: String,
    branch: String,
    /// Folder inside the repository, empty for the repository root
    path: String,
}

impl RepositoryLocation {
    /// Builds a location from its parts.
    ///
    /// Owner, repo and branch must be non-empty; `path` may be empty and has
    /// surrounding slashes removed.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
        path: impl Into<String>,
    ) -> Result<Self> {
        let owner = owner.into();
        let repo = repo.into();
        let branch = branch.into();
        let path = path.into().trim_matches('/').to_string();

        for (field, value) in [("owner", &owner), ("repo", &repo), ("branch", &branch)] {
            if value.is_empty() {
                return Err(Error::InvalidLocation(format!("{} must not be empty", field)));
            }
        }

        Ok(Self {
            owner,
            repo,
            branch,
            path,
        })
    }

    /// Parses a github.com folder URL of the form
    /// `https://github.com/<owner>/<repo>/tree/<branch>/<path...>`
    pub fn parse(raw_url: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidUrl {
            url: raw_url.to_string(),
            reason: reason.to_string(),
        };

        let parsed = Url::parse(raw_url).map_err(|e| invalid(&e.to_string()))?;

        match parsed.host_str() {
            Some("github.com") | Some("www.github.com") => {}
            _ => return Err(invalid("url must be a github.com link")),
        }

        let parts: Vec<&str> = parsed
            .path()
            .trim_matches('/')
            .split('/')
            .filter(|p| !p.is_empty())
            .collect();

        if parts.len() < 4 || parts[2] != "tree" {
            return Err(invalid("expected the format '/owner/repo/tree/branch/path'"));
        }

        Self::new(parts[0], parts[1], parts[3], parts[4..].join("/"))
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Contents API address for the folder this location points at
    pub fn listing_url(&self, api_base: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.path,
            self.branch
        )
    }

    /// `<last folder name>.zip`, or `<repo>.zip` for the repository root
    pub fn default_archive_name(&self) -> String {
        let stem = self
            .path
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(self.repo.as_str());
        format!("{}.zip", stem)
    }
}
