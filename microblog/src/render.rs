//! Human-readable rendering of network state. Read-only.

use comfy_table::{Attribute, Cell, Table, presets};

use crate::network::Network;
use crate::post::Post;
use crate::reports::ReportNetwork;

/// Renders tables with either box-drawing or plain ASCII borders.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    pub ascii: bool,
}

impl Renderer {
    pub fn new(ascii: bool) -> Self {
        Self { ascii }
    }

    fn table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        if self.ascii {
            table.load_preset(presets::ASCII_FULL);
        } else {
            table.load_preset(presets::UTF8_FULL_CONDENSED);
        }
        table.set_header(
            headers
                .iter()
                .map(|header| Cell::new(header).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
        table
    }

    /// One row per member: who they follow.
    pub fn followers(&self, network: &Network) -> Table {
        let mut table = self.table(&["user", "follows"]);
        for (user, following) in network.followers() {
            table.add_row(vec![user.clone(), join(following.iter())]);
        }
        table
    }

    /// One row per member: the ids of their posts.
    pub fn authorship(&self, network: &Network) -> Table {
        let mut table = self.table(&["user", "posts"]);
        for (user, posts) in network.posts() {
            table.add_row(vec![user.clone(), join(posts.keys())]);
        }
        table
    }

    /// One row per post: author, likers and text.
    pub fn posts<'a, I>(&self, posts: I) -> Table
    where
        I: IntoIterator<Item = &'a Post>,
    {
        let mut table = self.table(&["id", "author", "likes", "text"]);
        for post in posts {
            table.add_row(vec![
                post.id().to_string(),
                post.author().to_string(),
                join(post.likers().iter()),
                post.text().to_string(),
            ]);
        }
        table
    }

    pub fn reports(&self, social: &ReportNetwork) -> Table {
        let mut table = self.table(&["post", "reports"]);
        for (id, reports) in social.reported_posts() {
            let rendered = reports
                .iter()
                .map(|report| format!("{}:{}", report.username, report.kind))
                .collect::<Vec<_>>()
                .join(" ");
            table.add_row(vec![id.to_string(), rendered]);
        }
        table
    }

    /// Followers, authorship and likes, one table after the other.
    pub fn state(&self, network: &Network) -> String {
        format!(
            "{}\n{}\n{}",
            self.followers(network),
            self.authorship(network),
            self.posts(network.all_posts())
        )
    }
}

fn join<T: ToString>(items: impl Iterator<Item = T>) -> String {
    items.map(|item| item.to_string()).collect::<Vec<_>>().join(" ")
}
