//! Request handlers.
//!
//! Each submodule maps one resource's HTTP verbs onto the
//! [`services`](crate::services) layer and shapes the response. Every
//! handler except login and registration requires an [`AuthUser`].
//!
//! [`AuthUser`]: crate::middleware::auth::AuthUser

pub mod auth;
pub mod folders;
pub mod notes;
pub mod tags;
pub mod users;
