mod auth;
mod client;
pub mod domain;
mod freee_url;

pub(crate) use freee_url::*;

pub use auth::*;
pub use client::*;
