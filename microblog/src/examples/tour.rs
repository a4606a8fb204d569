//! Microblog Tour
//!
//! A scripted walkthrough over the sample dataset that exercises every query
//! and mutator, checking the network invariants after each mutation. This
//! serves as both documentation and an integration test.

use anyhow::{Context, Result, ensure};
use serde::Serialize;

use crate::id::{PostId, PostIdAllocator};
use crate::network::{Network, derive_followers, influencers};
use crate::post::Post;
use crate::render::Renderer;
use crate::reports::{ReportKind, ReportNetwork};
use crate::seed::Seed;

/// Words searched for during the tour.
pub const SEARCH_WORDS: [&str; 4] = ["hello", "bye", "WELCOME", "hi"];

/// One titled step of the tour and what it produced.
#[derive(Debug, Clone, Serialize)]
pub struct TourStep {
    pub title: String,
    pub output: String,
}

struct Transcript {
    renderer: Renderer,
    steps: Vec<TourStep>,
}

impl Transcript {
    fn record(&mut self, title: impl Into<String>, output: impl Into<String>) {
        self.steps.push(TourStep {
            title: title.into(),
            output: output.into(),
        });
    }

    /// Records the full state after a mutation, refusing to continue if the
    /// mutation left the network inconsistent.
    fn snapshot(&mut self, title: &str, network: &Network) -> Result<()> {
        network
            .check_invariants()
            .with_context(|| format!("invariants broken after: {title}"))?;
        let output = self.renderer.state(network);
        self.record(title, output);
        Ok(())
    }

    fn posts(&mut self, title: &str, posts: &[Post]) {
        let output = self.renderer.posts(posts).to_string();
        self.record(title, output);
    }
}

/// Run the complete tour.
///
/// This demonstrates:
/// 1. Deriving a network from a post list
/// 2. Influencers, mentions, authorship and word search
/// 3. Creating users and posts, liking and unliking
/// 4. Deleting posts and users with follow repair
/// 5. Reporting posts
pub fn run(renderer: Renderer) -> Result<Vec<TourStep>> {
    let mut transcript = Transcript {
        renderer,
        steps: Vec::new(),
    };

    let posts = Seed::sample().into_posts(&mut PostIdAllocator::new())?;
    transcript.posts("Seed posts", &posts);

    let mut network = Network::from_posts(&posts)?;
    transcript.snapshot("Derived network", &network)?;

    let followers = derive_followers(&posts)?;
    ensure!(&followers == network.followers(), "derivation disagrees with construction");
    transcript.record("Influencers", influencers(&followers)?.join(" "));

    let mentioned: Vec<String> = network.mentioned_users().into_iter().collect();
    transcript.record("Mentioned users", mentioned.join(" "));

    transcript.posts("Posts written by 'b'", &network.written_by("b")?);
    transcript.posts(
        &format!("Posts containing any of {SEARCH_WORDS:?}"),
        &network.containing(&SEARCH_WORDS)?,
    );

    network.create_user("z")?;
    transcript.snapshot("Created user 'z'", &network)?;

    let first_post = network.create_post("g", "First Post!")?;
    transcript.snapshot("'g' published a post", &network)?;

    network.add_like("z", first_post)?;
    transcript.snapshot("'z' liked the new post by 'g'", &network)?;

    let by_d = PostId::new(3);
    network.remove_like("f", by_d)?;
    transcript.snapshot("'f' unliked post 3 by 'd'", &network)?;

    network.edit_post(by_d, "HI, how are you?")?;
    transcript.snapshot("'d' fixed a typo in post 3", &network)?;

    network.delete_post(by_d)?;
    transcript.snapshot("Deleted post 3 by 'd'", &network)?;

    network.delete_user("b")?;
    transcript.snapshot("Deleted user 'b'", &network)?;

    let mut social = ReportNetwork::from_posts(&posts)?;
    social.add_report("c", by_d, ReportKind::Terrorism)?;
    social.add_report("a", by_d, ReportKind::Violence)?;
    social.add_report("b", PostId::new(1), ReportKind::Spam)?;
    let output = transcript.renderer.reports(&social).to_string();
    transcript.record("Reports", output);

    Ok(transcript.steps)
}
