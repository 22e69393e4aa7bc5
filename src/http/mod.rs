//! HTTP layer: shared request helper with uniform status mapping.
//!
//! Every REST wrapper goes through [`PanelHttp`] so the status-to-error
//! mapping exists exactly once.

pub(crate) mod client;

pub(crate) use client::PanelHttp;
