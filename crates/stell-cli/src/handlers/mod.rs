//! Command handlers that delegate to `AppCore`.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call `AppCore` methods (edits always go through a draft and the Save Gate)
//!   3. Format output for the terminal
//!
//! Handlers should NOT:
//! - Access the settings store directly
//! - Contain business logic

pub mod audit;
pub mod common;
pub mod config;
pub mod paths;
pub mod redirects;
pub mod robots;
pub mod seo;
pub mod session;
pub mod settings;
pub mod sitemap;
