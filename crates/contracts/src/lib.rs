//! Wire types and client-side rules shared by the frontend.
//!
//! Nothing in here touches the browser, so the whole crate is tested on the
//! host target.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
pub mod usecases;
