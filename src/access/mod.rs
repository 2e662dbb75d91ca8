pub mod remote;
pub mod traits;

pub use remote::RemoteSessionGate;
pub use traits::{AccessGate, AnonymousGate, Identity, SessionCredentials, SESSION_COOKIE};
