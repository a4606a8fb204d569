//! Runnable walkthroughs of the public API.

pub mod tour;
