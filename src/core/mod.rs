/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod api_url;
pub mod client;
pub mod datetime;
pub mod envelope;
pub mod errors;
pub mod ip_info;
pub mod provider;
