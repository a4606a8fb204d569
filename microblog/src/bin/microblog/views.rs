//! Serializable views over network state, shown through [`OutputManager`].
//!
//! [`OutputManager`]: crate::output::OutputManager

use comfy_table::{Cell, Table};
use microblog::examples::tour::TourStep;
use microblog::render::Renderer;
use microblog::{FollowerMap, Network, Post, PostIndex};
use serde::Serialize;

use crate::output::{GlobalOptions, TableDisplay};

fn renderer(options: &GlobalOptions) -> Renderer {
    Renderer::new(options.no_color)
}

/// A list of post copies.
#[derive(Serialize)]
#[serde(transparent)]
pub struct PostList(pub Vec<Post>);

impl TableDisplay for PostList {
    fn to_tables(&self, options: &GlobalOptions) -> Vec<Table> {
        vec![renderer(options).posts(&self.0)]
    }

    fn to_compact(&self) -> String {
        let ids: Vec<String> = self.0.iter().map(|post| post.id().to_string()).collect();
        format!("{} posts: {}", self.0.len(), ids.join(" "))
    }
}

/// A titled list of usernames.
#[derive(Serialize)]
pub struct UserList {
    #[serde(skip)]
    pub title: &'static str,
    pub users: Vec<String>,
}

impl TableDisplay for UserList {
    fn to_tables(&self, _options: &GlobalOptions) -> Vec<Table> {
        let mut table = Table::new();
        table.set_header(vec![Cell::new(self.title)]);
        for user in &self.users {
            table.add_row(vec![user.clone()]);
        }
        vec![table]
    }

    fn to_compact(&self) -> String {
        self.users.join(" ")
    }
}

/// Followers plus the post index.
#[derive(Serialize)]
pub struct NetworkState<'a> {
    pub followers: &'a FollowerMap,
    pub posts: &'a PostIndex,
    #[serde(skip)]
    network: &'a Network,
}

impl<'a> NetworkState<'a> {
    pub fn new(network: &'a Network) -> Self {
        Self {
            followers: network.followers(),
            posts: network.posts(),
            network,
        }
    }
}

impl TableDisplay for NetworkState<'_> {
    fn to_tables(&self, options: &GlobalOptions) -> Vec<Table> {
        let renderer = renderer(options);
        vec![
            renderer.followers(self.network),
            renderer.authorship(self.network),
            renderer.posts(self.network.all_posts()),
        ]
    }

    fn to_compact(&self) -> String {
        format!(
            "{} users, {} posts",
            self.network.user_count(),
            self.network.post_count()
        )
    }
}

/// The steps of a tour run, for JSON and compact output.
#[derive(Serialize)]
#[serde(transparent)]
pub struct TourTranscript(pub Vec<TourStep>);

impl TableDisplay for TourTranscript {
    fn to_tables(&self, _options: &GlobalOptions) -> Vec<Table> {
        let mut table = Table::new();
        table.set_header(vec![Cell::new("step")]);
        for step in &self.0 {
            table.add_row(vec![step.title.clone()]);
        }
        vec![table]
    }

    fn to_compact(&self) -> String {
        format!("tour finished after {} steps", self.0.len())
    }
}

/// Result of the invariant check.
#[derive(Serialize)]
pub struct CheckReport {
    pub consistent: bool,
    pub violation: Option<String>,
    pub users: usize,
    pub posts: usize,
}

impl CheckReport {
    pub fn new(network: &Network) -> Self {
        let violation = network.check_invariants().err().map(|err| err.to_string());
        Self {
            consistent: violation.is_none(),
            violation,
            users: network.user_count(),
            posts: network.post_count(),
        }
    }
}

impl TableDisplay for CheckReport {
    fn to_tables(&self, _options: &GlobalOptions) -> Vec<Table> {
        let mut table = Table::new();
        table.add_row(vec!["consistent".to_string(), self.consistent.to_string()]);
        table.add_row(vec!["users".to_string(), self.users.to_string()]);
        table.add_row(vec!["posts".to_string(), self.posts.to_string()]);
        if let Some(violation) = &self.violation {
            table.add_row(vec!["violation".to_string(), violation.clone()]);
        }
        vec![table]
    }

    fn to_compact(&self) -> String {
        match &self.violation {
            Some(violation) => format!("inconsistent: {violation}"),
            None => "consistent".to_string(),
        }
    }
}
