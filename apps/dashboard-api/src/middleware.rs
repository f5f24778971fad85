//! # ミドルウェア

mod authn;

pub use authn::{AuthnState, require_session};
