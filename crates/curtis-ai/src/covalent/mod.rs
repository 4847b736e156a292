//! Client for text generation served by Covalent.
//!
//! The backend exposes `POST /generate` (whole completion as a JSON string)
//! and `POST /stream` (raw UTF-8 chunks), both taking
//! `{"prompt": ..., "max_new_tokens": ...}` and an optional `x-api-key`.

mod api;
mod client;
mod config;

#[cfg(test)]
mod tests;

pub use client::CovalentClient;
pub use config::CovalentConfig;

pub(crate) use client::{send_checked, TEXT_TO_IMAGE_PATH};
