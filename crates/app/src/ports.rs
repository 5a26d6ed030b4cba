//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the browser.
//! Futures returned by ports are not `Send`: every browser API lives on the
//! single UI thread.

pub mod browser;
pub mod credential_source;
pub mod http;
pub mod preferences;
pub mod timer;

pub use browser::Browser;
pub use credential_source::CredentialSource;
pub use http::HttpTransport;
pub use preferences::PreferenceStore;
pub use timer::Timer;
