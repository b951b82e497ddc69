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

//! Configuration for the voxbot CLI, stored at `~/voxbot/config.json`.

mod schema;

pub use schema::{
    ChatDefaults, Config, PersonaConfig, ProviderConfig, ProvidersConfig, VoiceConfig,
};
