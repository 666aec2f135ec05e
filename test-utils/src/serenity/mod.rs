//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity objects by deserializing JSON, simulating
//! what Discord's API would return.
//!
//! # Available Factories
//!
//! - `embed::create_test_embed` - Create Serenity Embed objects
//! - `user::create_test_user` - Create Serenity User objects

pub mod embed;
pub mod user;

pub use embed::create_test_embed;
pub use user::create_test_user;
