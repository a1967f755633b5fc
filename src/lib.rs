pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod git;
pub mod menu;
pub mod report;
pub mod util;
pub mod validate;
pub mod workflow;

pub use config::Config;
pub use credentials::{Credential, CredentialStore, Session};
pub use error::OpError;
pub use workflow::{Outcome, Workflow};
