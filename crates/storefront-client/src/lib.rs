//! # storefront-client
//!
//! Client for the remote store API.
//!
//! ## Modules
//!
//! - `http`: transport abstraction and its reqwest implementation
//! - `gateway`: authenticated send with a single refresh-and-retry on 401
//! - `auth_api`: HTTP implementation of the auth service
//! - `categories`: category search, lookup, create, and update
//! - `dashboard`: dashboard summary
//! - `dto`: wire formats of the store API

pub mod auth_api;
pub mod categories;
pub mod dashboard;
pub mod dto;
pub mod gateway;
pub mod http;

pub use auth_api::HttpAuthService;
pub use categories::CategoryApi;
pub use dashboard::DashboardService;
pub use gateway::RequestGateway;
pub use http::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};
