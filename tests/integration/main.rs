//! Integration tests against an in-process mock of the store API.

mod helpers;

mod auth_test;
mod category_test;
mod gateway_test;
