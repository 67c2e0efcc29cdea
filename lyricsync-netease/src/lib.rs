//! A barebones client for the NetEase Cloud Music API, covering only the
//! endpoints needed to follow what a user is listening to.
#![deny(missing_docs)]

mod client;
pub use client::*;

mod record;
pub use record::*;

mod lyric;
pub use lyric::*;

mod request;
