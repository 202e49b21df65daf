//! Typed client and provider adapter for the Fox IP allowlist service.
//!
//! ```no_run
//! let client = foxip::ClientBuilder::new()
//!     .address("http://fox.local:8080")
//!     .build()?;
//!
//! for ip_info in client.get_ip_info_group("office")? {
//!     println!("{}: {}", ip_info.env, ip_info.cidrs.join(", "));
//! }
//! # Ok::<(), foxip::Error>(())
//! ```

mod core;

/*-------------------------------------------------------------------------------------------------
  Library Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::api_url::{build_api_url, API_PREFIX};
pub use crate::core::client::{
    create_ip_info, delete_ip_info, get_ip_info, get_ip_info_all, get_ip_info_group,
    update_ip_info, Client, ClientBuilder, HttpResponse, DEFAULT_TIMEOUT,
};
pub use crate::core::envelope::{
    decode_many, decode_one, encode_many, encode_one, Pong, IP_INFO_ARR_PATH, IP_INFO_PATH,
};
pub use crate::core::errors::{Error, Result};
pub use crate::core::ip_info::{IpInfo, MANAGED_BY};
pub use crate::core::provider::{
    Diagnostic, DiagnosticSeverity, IpAllState, IpEnvPlan, IpEnvState, IpGroupState, PingState,
    Provider, ProviderConfig,
};

/*--------------------------------------------------------------------------------------
  Re-exports
--------------------------------------------------------------------------------------*/

pub use reqwest::Method;

pub mod datetime {
    pub use crate::core::datetime::{is_zero, to_rfc3339_seconds, zero};
}
