use anyhow::{Context, Result};
use microblog::Network;

use crate::examples::ExampleGroup;
use crate::output::OutputManager;
use crate::views::{CheckReport, NetworkState, PostList, UserList};

pub const SHOW_EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Network State",
    commands: &[
        "microblog show                              # Followers, authorship and likes",
        "microblog --dataset seed.toml show          # Same, for a seed file",
        "microblog --output json show                # Machine-readable state",
    ],
}];

pub const QUERY_EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Queries",
    commands: &[
        "microblog influencers                       # Users followed more than they follow",
        "microblog mentions                          # Users mentioned with @name",
        "microblog written-by b                      # Posts authored by 'b'",
        "microblog search hello WELCOME hi           # Posts containing any word",
    ],
}];

pub const CHECK_EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Consistency",
    commands: &[
        "microblog check                             # Verify follower/post invariants",
        "microblog --output compact check            # One-line result",
    ],
}];

pub fn handle_show(network: &Network, output: &OutputManager) -> Result<()> {
    output.heading("Network");
    output.display(&NetworkState::new(network))
}

pub fn handle_influencers(network: &Network, output: &OutputManager) -> Result<()> {
    let users = network.influencers().context("Follower relation is malformed")?;
    output.heading("Influencers");
    output.display(&UserList {
        title: "influencer",
        users,
    })
}

pub fn handle_mentions(network: &Network, output: &OutputManager) -> Result<()> {
    output.heading("Mentioned users");
    output.display(&UserList {
        title: "mentioned",
        users: network.mentioned_users().into_iter().collect(),
    })
}

pub fn handle_written_by(network: &Network, user: &str, output: &OutputManager) -> Result<()> {
    let posts = network
        .written_by(user)
        .with_context(|| format!("Cannot list posts by '{user}'"))?;
    output.heading(&format!("Posts written by '{user}'"));
    output.display(&PostList(posts))
}

pub fn handle_search(network: &Network, words: &[String], output: &OutputManager) -> Result<()> {
    let posts = network.containing(words).context("Invalid search words")?;
    output.verbose(&format!("{} of {} posts matched", posts.len(), network.post_count()));
    output.heading(&format!("Posts containing any of: {}", words.join(", ")));
    output.display(&PostList(posts))
}

pub fn handle_check(network: &Network, output: &OutputManager) -> Result<()> {
    let report = CheckReport::new(network);
    output.display(&report)?;
    match &report.violation {
        None => {
            output.success("All invariants hold");
            Ok(())
        }
        Some(violation) => {
            output.error(violation);
            anyhow::bail!("Network is inconsistent")
        }
    }
}
