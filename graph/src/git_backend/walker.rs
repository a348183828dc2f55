use anyhow::{Context, Result};
use git2::{Commit, Repository, Sort};
use std::path::Path;

use crate::core::CommitRecord;

/// Reads commit history from a local repository
pub struct GitWalker {
    repo: Repository,
}

impl GitWalker {
    /// Open the repository at `path`, or discover one from the environment
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let repo = match path {
            Some(path) => Repository::open(path),
            None => Repository::open_from_env(),
        }
        .context("Failed to open repository")?;

        Ok(Self { repo })
    }

    /// Commits reachable from HEAD, newest first, up to `limit`
    pub fn default_branch_history(&self, limit: Option<usize>) -> Result<Vec<CommitRecord>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk
            .push_head()
            .context("Repository has no HEAD commit")?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        let mut records = Vec::new();
        for oid in revwalk {
            if limit.is_some_and(|limit| records.len() >= limit) {
                break;
            }

            let commit = self.repo.find_commit(oid?)?;
            records.push(commit_to_record(&commit));
        }

        tracing::debug!(commits = records.len(), "walked local history");
        Ok(records)
    }

    /// Name of the branch HEAD points at, if it is a branch
    pub fn head_branch(&self) -> Option<String> {
        let head = self.repo.head().ok()?;
        if head.is_branch() {
            head.shorthand().map(str::to_string)
        } else {
            None
        }
    }
}

fn commit_to_record(commit: &Commit) -> CommitRecord {
    let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
    CommitRecord::new(
        commit.id().to_string(),
        message,
        commit.parent_ids().map(|oid| oid.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Oid, Signature};
    use tempfile::TempDir;

    fn create_test_repo() -> Result<(TempDir, Repository)> {
        let dir = TempDir::new()?;
        let repo = Repository::init(dir.path())?;

        // Configure repo
        let mut config = repo.config()?;
        config.set_str("user.name", "Test User")?;
        config.set_str("user.email", "test@example.com")?;

        Ok((dir, repo))
    }

    fn commit_to_repo(repo: &Repository, message: &str, parents: &[&Commit], update_ref: Option<&str>) -> Result<Oid> {
        let sig = Signature::now("Test User", "test@example.com")?;
        let tree_id = {
            let mut index = repo.index()?;
            index.write_tree()?
        };
        let tree = repo.find_tree(tree_id)?;

        Ok(repo.commit(update_ref, &sig, &sig, message, &tree, parents)?)
    }

    #[test]
    fn test_single_commit() -> Result<()> {
        let (dir, repo) = create_test_repo()?;
        let oid = commit_to_repo(&repo, "Initial commit", &[], Some("HEAD"))?;

        let walker = GitWalker::open(Some(dir.path()))?;
        let records = walker.default_branch_history(None)?;

        assert_eq!(records, vec![CommitRecord::root(oid.to_string(), "Initial commit")]);
        Ok(())
    }

    #[test]
    fn test_linear_history_with_limit() -> Result<()> {
        let (dir, repo) = create_test_repo()?;

        let oid1 = commit_to_repo(&repo, "First commit", &[], Some("HEAD"))?;
        let commit1 = repo.find_commit(oid1)?;
        let oid2 = commit_to_repo(&repo, "Second commit", &[&commit1], Some("HEAD"))?;
        let commit2 = repo.find_commit(oid2)?;
        let oid3 = commit_to_repo(&repo, "Third commit", &[&commit2], Some("HEAD"))?;

        let walker = GitWalker::open(Some(dir.path()))?;

        let all = walker.default_branch_history(None)?;
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, oid3.to_string());
        assert_eq!(all[0].parent_ids.as_slice(), [oid2.to_string()]);

        let page = walker.default_branch_history(Some(2))?;
        assert_eq!(page.len(), 2);
        // The oldest commit falls off the page and becomes a placeholder later
        assert_eq!(page[1].parent_ids.as_slice(), [oid1.to_string()]);
        Ok(())
    }

    #[test]
    fn test_merge_commit() -> Result<()> {
        let (dir, repo) = create_test_repo()?;

        let base_oid = commit_to_repo(&repo, "Base commit", &[], Some("HEAD"))?;
        let base_commit = repo.find_commit(base_oid)?;

        let branch1_oid = commit_to_repo(&repo, "Branch 1", &[&base_commit], Some("HEAD"))?;
        let branch1_commit = repo.find_commit(branch1_oid)?;

        // Branch 2 is not on HEAD until the merge
        let branch2_oid = commit_to_repo(&repo, "Branch 2", &[&base_commit], None)?;
        let branch2_commit = repo.find_commit(branch2_oid)?;

        commit_to_repo(&repo, "Merge", &[&branch1_commit, &branch2_commit], Some("HEAD"))?;

        let walker = GitWalker::open(Some(dir.path()))?;
        let records = walker.default_branch_history(None)?;

        assert_eq!(records.len(), 4);
        assert_eq!(records.iter().filter(|r| r.is_merge()).count(), 1);
        assert_eq!(records.iter().filter(|r| r.is_root()).count(), 1);
        Ok(())
    }

    #[test]
    fn test_empty_repository_has_no_head() -> Result<()> {
        let (dir, _repo) = create_test_repo()?;
        let walker = GitWalker::open(Some(dir.path()))?;

        assert!(walker.default_branch_history(None).is_err());
        assert_eq!(walker.head_branch(), None);
        Ok(())
    }
}
