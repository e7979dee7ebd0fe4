pub mod credentials;
pub mod handlers;

pub use credentials::CredentialsProvider;
