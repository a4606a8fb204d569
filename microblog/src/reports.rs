//! Abuse reports attached to posts.
//!
//! [`ReportNetwork`] wraps a [`Network`] and keeps a post -> reports index
//! next to it. Mutators are forwarded so the index never points at a post or
//! reporter that has left the network.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{NetworkError, NetworkResult};
use crate::id::PostId;
use crate::network::Network;
use crate::post::Post;
use crate::validators::check_username;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Spam,
    Violence,
    Terrorism,
    Harassment,
    HateSpeech,
    Other,
}

impl ReportKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::Violence => "violence",
            Self::Terrorism => "terrorism",
            Self::Harassment => "harassment",
            Self::HateSpeech => "hate_speech",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub username: String,
    pub kind: ReportKind,
}

/// A network whose posts can be reported by members.
#[derive(Debug, Clone, Default)]
pub struct ReportNetwork {
    network: Network,
    reports: BTreeMap<PostId, Vec<Report>>,
}

impl ReportNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same failure modes as [`Network::from_posts`]; starts with no reports.
    pub fn from_posts(posts: &[Post]) -> NetworkResult<Self> {
        Ok(Self::from_network(Network::from_posts(posts)?))
    }

    pub fn from_network(network: Network) -> Self {
        Self {
            network,
            reports: BTreeMap::new(),
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    /// `username` reports post `id`.
    ///
    /// The reporter must be a member other than the author, and may report a
    /// given post only once.
    pub fn add_report(
        &mut self,
        username: &str,
        id: PostId,
        kind: ReportKind,
    ) -> NetworkResult<()> {
        check_username(username)?;
        if !self.network.is_member(username) {
            return Err(NetworkError::absent_user(username));
        }
        let post = self.network.canonical_post(id)?;
        if post.author() == username {
            return Err(NetworkError::AuthorReport {
                username: username.to_string(),
                post: id,
            });
        }

        let reports = self.reports.entry(post.id()).or_default();
        if reports.iter().any(|report| report.username == username) {
            return Err(NetworkError::DuplicateReport {
                username: username.to_string(),
                post: id,
            });
        }
        reports.push(Report {
            username: username.to_string(),
            kind,
        });
        debug!("'{username}' reported post {id} as {kind}");
        Ok(())
    }

    /// Reports filed against post `id`, oldest first.
    pub fn reports_for(&self, id: PostId) -> &[Report] {
        self.reports.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every reported post with its reports.
    pub fn reported_posts(&self) -> impl Iterator<Item = (PostId, &[Report])> {
        self.reports.iter().map(|(id, reports)| (*id, reports.as_slice()))
    }

    pub fn report_count(&self) -> usize {
        self.reports.values().map(Vec::len).sum()
    }

    pub fn create_user(&mut self, username: &str) -> NetworkResult<()> {
        self.network.create_user(username)
    }

    pub fn delete_user(&mut self, username: &str) -> NetworkResult<Vec<Post>> {
        let removed = self.network.delete_user(username)?;
        self.forget_posts(&removed);
        for reports in self.reports.values_mut() {
            reports.retain(|report| report.username != username);
        }
        self.reports.retain(|_, reports| !reports.is_empty());
        Ok(removed)
    }

    pub fn create_post(&mut self, author: &str, text: &str) -> NetworkResult<PostId> {
        self.network.create_post(author, text)
    }

    pub fn edit_post(&mut self, id: PostId, text: &str) -> NetworkResult<()> {
        self.network.edit_post(id, text)
    }

    pub fn delete_post(&mut self, id: PostId) -> NetworkResult<Post> {
        let removed = self.network.delete_post(id)?;
        self.reports.remove(&id);
        Ok(removed)
    }

    pub fn delete_all_posts(&mut self, username: &str) -> NetworkResult<Vec<Post>> {
        let removed = self.network.delete_all_posts(username)?;
        self.forget_posts(&removed);
        Ok(removed)
    }

    pub fn add_like(&mut self, username: &str, id: PostId) -> NetworkResult<()> {
        self.network.add_like(username, id)
    }

    pub fn remove_like(&mut self, username: &str, id: PostId) -> NetworkResult<()> {
        self.network.remove_like(username, id)
    }

    fn forget_posts(&mut self, posts: &[Post]) {
        for post in posts {
            self.reports.remove(&post.id());
        }
    }
}
