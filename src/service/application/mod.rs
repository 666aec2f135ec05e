//! Booster recruitment: the intake conversation, staff review and profiles.

pub mod api;
pub mod flow;
pub mod intake;
pub mod oracle;
pub mod profile;
pub mod rank;
pub mod review;
pub mod token;
