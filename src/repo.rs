//! Local git repository access.
//!
//! [`GitRepository`] implements the [`Vcs`](traits::Vcs) port on top of
//! `git2`. Network operations authenticate through the ssh agent or the
//! configured git credential helper, so the tool works with whatever access
//! the developer's own git setup already has.
use chrono::{DateTime, FixedOffset};
use color_eyre::eyre::eyre;
use git2::{AnnotatedCommit, RemoteCallbacks};
use log::*;
use std::{collections::HashMap, path::Path};

use crate::{
    Result,
    repo::{
        traits::Vcs,
        types::{LogEntry, StatusEntry, is_release_tag},
    },
};

/// Version control port.
pub mod traits;

/// Log and status types.
pub mod types;

/// Credential callbacks are retried by libgit2 until they succeed, so give
/// up after a few attempts instead of looping forever.
const MAX_AUTH_ATTEMPTS: usize = 3;

/// Create authentication callbacks for fetch and push.
///
/// SSH remotes use the running ssh agent, HTTPS remotes the credential helper
/// from the git configuration. Rejected reference updates surface as errors.
fn auth_callbacks<'r>(config: git2::Config) -> RemoteCallbacks<'r> {
    let mut attempts = 0;
    let mut callbacks = RemoteCallbacks::new();

    callbacks.credentials(move |url, username, allowed| {
        attempts += 1;
        if attempts > MAX_AUTH_ATTEMPTS {
            return Err(git2::Error::from_str(&format!(
                "authentication failed for {url}"
            )));
        }

        if allowed.contains(git2::CredentialType::SSH_KEY) {
            return git2::Cred::ssh_key_from_agent(username.unwrap_or("git"));
        }

        if allowed.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
            return git2::Cred::credential_helper(&config, url, username);
        }

        git2::Cred::default()
    });

    callbacks.push_update_reference(|refname, status| match status {
        Some(message) => Err(git2::Error::from_str(&format!(
            "push of {refname} rejected: {message}"
        ))),
        None => Ok(()),
    });

    callbacks
}

/// Format a commit time in its own offset as `YYYY-MM-DD HH:MM:SS +ZZZZ`.
fn format_commit_time(time: git2::Time) -> String {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60);

    match (DateTime::from_timestamp(time.seconds(), 0), offset) {
        (Some(utc), Some(offset)) => utc
            .with_timezone(&offset)
            .format("%Y-%m-%d %H:%M:%S %z")
            .to_string(),
        _ => String::new(),
    }
}

/// Git repository of the project being worked on.
pub struct GitRepository {
    repo: git2::Repository,
}

impl GitRepository {
    /// Open the repository containing `path`.
    pub fn open(path: &Path) -> Result<Self> {
        debug!("opening repository at {}", path.display());
        let repo = git2::Repository::discover(path)?;
        Ok(Self { repo })
    }

    fn signature(&self) -> Result<git2::Signature<'static>> {
        let config = self.repo.config()?.snapshot()?;
        let user = config.get_str("user.name")?;
        let email = config.get_str("user.email")?;
        debug!("using signature: user: {user}, email: {email}");
        Ok(git2::Signature::now(user, email)?)
    }

    fn callbacks(&self) -> Result<RemoteCallbacks<'static>> {
        Ok(auth_callbacks(self.repo.config()?))
    }

    fn push_refspecs(&self, remote: &str, refspecs: &[String]) -> Result<()> {
        let mut push_opts = git2::PushOptions::new();
        push_opts.remote_callbacks(self.callbacks()?);

        let mut remote = self.repo.find_remote(remote)?;
        remote.push(refspecs, Some(&mut push_opts))?;

        Ok(())
    }

    /// Map of commit id to the names of the tags pointing at it.
    fn tags_by_commit(&self) -> Result<HashMap<git2::Oid, Vec<String>>> {
        let mut tags: HashMap<git2::Oid, Vec<String>> = HashMap::new();

        for name in self.repo.tag_names(None)?.iter().flatten() {
            let commit = self
                .repo
                .revparse_single(&format!("refs/tags/{name}"))?
                .peel_to_commit()?;
            tags.entry(commit.id()).or_default().push(name.to_string());
        }

        Ok(tags)
    }

    /// Merge a commit into the checked out branch `into`.
    fn merge_commit(
        &self,
        into: &str,
        their: &AnnotatedCommit<'_>,
        message: &str,
    ) -> Result<()> {
        let (analysis, _) = self.repo.merge_analysis(&[their])?;

        if analysis.is_up_to_date() {
            info!("{into} is already up to date");
            return Ok(());
        }

        if analysis.is_fast_forward() {
            info!("fast-forwarding {into}");
            let ref_name = format!("refs/heads/{into}");
            let mut reference = self.repo.find_reference(&ref_name)?;
            reference.set_target(their.id(), message)?;
            self.repo.set_head(&ref_name)?;
            let mut checkout = git2::build::CheckoutBuilder::new();
            checkout.force();
            self.repo.checkout_head(Some(&mut checkout))?;
            return Ok(());
        }

        self.repo.merge(&[their], None, None)?;

        let mut index = self.repo.index()?;
        if index.has_conflicts() {
            warn!("merge into {into} left conflicts in the working tree");
            return Ok(());
        }

        let tree = self.repo.find_tree(index.write_tree()?)?;
        let head = self.repo.head()?.peel_to_commit()?;
        let theirs = self.repo.find_commit(their.id())?;
        let signature = self.signature()?;

        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&head, &theirs],
        )?;
        self.repo.cleanup_state()?;

        Ok(())
    }
}

impl Vcs for GitRepository {
    fn is_clean(&self) -> Result<bool> {
        Ok(self.status_entries()?.is_empty())
    }

    fn status_entries(&self) -> Result<Vec<StatusEntry>> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;

        Ok(statuses
            .iter()
            .filter_map(|entry| {
                entry
                    .path()
                    .map(|path| StatusEntry::from_status(path, entry.status()))
            })
            .collect())
    }

    fn staged_diff(&self) -> Result<String> {
        let head_tree = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_tree().ok());

        let diff =
            self.repo
                .diff_tree_to_index(head_tree.as_ref(), None, None)?;

        let mut patch = String::new();
        diff.print(git2::DiffFormat::Patch, |_delta, _hunk, line| {
            if matches!(line.origin(), '+' | '-' | ' ') {
                patch.push(line.origin());
            }
            patch.push_str(&String::from_utf8_lossy(line.content()));
            true
        })?;

        Ok(patch)
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        let name = head
            .shorthand()
            .ok_or_else(|| eyre!("HEAD does not point at a branch"))?;
        Ok(name.to_string())
    }

    fn branch_exists(&self, branch: &str) -> Result<bool> {
        Ok(self
            .repo
            .find_branch(branch, git2::BranchType::Local)
            .is_ok())
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        info!("checking out branch: {branch}");
        let ref_name = format!("refs/heads/{branch}");
        let target = self.repo.revparse_single(&ref_name)?;
        let mut checkout = git2::build::CheckoutBuilder::new();
        checkout.safe();
        self.repo.checkout_tree(&target, Some(&mut checkout))?;
        self.repo.set_head(&ref_name)?;
        Ok(())
    }

    fn create_branch(&self, branch: &str) -> Result<()> {
        info!("creating branch: {branch}");
        let commit = self.repo.head()?.peel_to_commit()?;
        self.repo.branch(branch, &commit, false)?;
        self.checkout(branch)
    }

    fn pull(&self, remote: &str) -> Result<()> {
        let branch = self.current_branch()?;
        info!("pulling {branch} from {remote}");

        let mut fetch_opts = git2::FetchOptions::new();
        fetch_opts.remote_callbacks(self.callbacks()?);

        let mut origin = self.repo.find_remote(remote)?;
        origin.fetch(&[branch.as_str()], Some(&mut fetch_opts), None)?;
        drop(origin);

        let fetch_head = self.repo.find_reference("FETCH_HEAD")?;
        let their = self.repo.reference_to_annotated_commit(&fetch_head)?;

        self.merge_commit(
            &branch,
            &their,
            &format!("Merge branch '{branch}' of {remote}"),
        )
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        info!("pushing branch {branch} to {remote}");
        self.push_refspecs(
            remote,
            &[format!("refs/heads/{branch}:refs/heads/{branch}")],
        )
    }

    fn add_all(&self) -> Result<()> {
        debug!("adding changed files to index");
        let mut index = self.repo.index()?;
        index.add_all(["*"], git2::IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"], None)?;
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        debug!("committing changes with msg: {message}");
        let mut index = self.repo.index()?;
        let tree = self.repo.find_tree(index.write_tree()?)?;
        let signature = self.signature()?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(err) if err.code() == git2::ErrorCode::UnbornBranch => None,
            Err(err) => return Err(err.into()),
        };
        let parents = parent.iter().collect::<Vec<&git2::Commit>>();

        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        Ok(())
    }

    fn merge(&self, from: &str, into: &str) -> Result<()> {
        info!("merging {from} into {into}");
        self.checkout(into)?;

        let reference =
            self.repo.find_reference(&format!("refs/heads/{from}"))?;
        let their = self.repo.reference_to_annotated_commit(&reference)?;

        self.merge_commit(
            into,
            &their,
            &format!("Merge branch '{from}' into {into}"),
        )
    }

    fn log(&self, branch: &str) -> Result<Vec<LogEntry>> {
        let tags = self.tags_by_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_ref(&format!("refs/heads/{branch}"))?;
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;

        revwalk
            .map(|oid| -> Result<LogEntry> {
                let oid = oid?;
                let commit = self.repo.find_commit(oid)?;
                Ok(LogEntry {
                    id: oid.to_string(),
                    message: commit.summary().unwrap_or_default().to_string(),
                    date: format_commit_time(commit.time()),
                    tags: tags.get(&oid).cloned().unwrap_or_default(),
                })
            })
            .collect()
    }

    fn all_tags(&self) -> Result<Vec<String>> {
        Ok(self
            .repo
            .tag_names(None)?
            .iter()
            .flatten()
            .map(String::from)
            .collect())
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        Ok(self
            .all_tags()?
            .into_iter()
            .filter(|tag| is_release_tag(tag))
            .filter_map(|tag| {
                semver::Version::parse(&tag[1..])
                    .ok()
                    .map(|version| (version, tag))
            })
            .max_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, tag)| tag))
    }

    fn add_tag(&self, tag: &str) -> Result<()> {
        info!("tagging HEAD as {tag}");
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo.tag_lightweight(tag, head.as_object(), false)?;
        Ok(())
    }

    fn push_tags(&self, remote: &str) -> Result<()> {
        let refspecs = self
            .all_tags()?
            .iter()
            .map(|tag| format!("refs/tags/{tag}:refs/tags/{tag}"))
            .collect::<Vec<String>>();

        if refspecs.is_empty() {
            return Ok(());
        }

        info!("pushing {} tags to {remote}", refspecs.len());
        self.push_refspecs(remote, &refspecs)
    }
}
