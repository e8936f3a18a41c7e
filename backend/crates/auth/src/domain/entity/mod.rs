pub mod access_token;
pub mod credentials;
pub mod user;
