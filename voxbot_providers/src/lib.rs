#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! HTTP clients for the hosted vendor endpoints.
//!
//! Each call runs at most once; there is no automatic retry. Failures map
//! onto [`voxbot_core::ProviderError`]: 401/403 become `Authentication`,
//! everything else network- or body-shaped becomes `Service` or
//! `MalformedResponse`.

mod openai;

pub use openai::OpenAiProvider;
