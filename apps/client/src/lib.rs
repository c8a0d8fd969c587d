//! Client side of the portfolio: typed access to the content API, the
//! admin session gate, and the list helpers the admin forms use.

pub mod api;
pub mod error;
pub mod forms;
pub mod session;

pub use api::{base_url_for_host, is_local_host, PortfolioClient, LOCAL_API_URL};
pub use error::ClientError;
pub use session::{require_session, AdminSession};
