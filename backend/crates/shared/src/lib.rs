//! Shared Kernel - vocabulary shared by every bounded context
//!
//! - Unified error type ([`error::app_error::AppError`]) with HTTP mapping
//! - Typed external identifiers ([`id::Id`])
//!
//! Only things with the same meaning in `auth` and `qa` belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
