//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let ticket = factory::ticket::TicketFactory::new(&db)
//!     .user_id("123456789")
//!     .kind("report")
//!     .build()
//!     .await?;
//!
//! let application = factory::create_application(&db).await?;
//! ```

pub mod application;
pub mod helpers;
pub mod ticket;

pub use application::create_application;
pub use ticket::create_ticket;
