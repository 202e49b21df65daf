//! Typed provider adapter.
//!
//! Maps the IP allowlist API onto the resource and data-source lifecycle of an
//! infrastructure-as-code host: one `fox_ip_env` resource (create, read, update, delete) and the
//! `fox_ping`, `fox_ip_env`, `fox_ip_group` and `fox_ip_all` data sources. State is carried in
//! plain structs with fixed field names; a host adapter translates them to its own attribute
//! representation.

use crate::core::client::{Client, ClientBuilder};
use crate::core::datetime::to_rfc3339_seconds;
use crate::core::errors::{Error, Result};
use crate::core::ip_info::IpInfo;
use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Id of the `fox_ip_all` data source.
pub const ALL_ID: &str = "all";

/*-------------------------------------------------------------------------------------------------
  Provider Configuration
-------------------------------------------------------------------------------------------------*/

/// Provider-level configuration block.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ProviderConfig {
    /// Base address of the Fox service, e.g. `http://fox.local:8080`.
    pub address: String,
}

/*-------------------------------------------------------------------------------------------------
  State
-------------------------------------------------------------------------------------------------*/

/// State of one env, shared by the `fox_ip_env` resource and data source.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct IpEnvState {
    pub id: String,
    pub env: String,
    pub groups: Vec<String>,
    pub cidrs: Vec<String>,
    /// RFC3339, UTC, second precision.
    pub created: String,
    /// RFC3339, UTC, second precision.
    pub last_modified: String,
}

impl From<&IpInfo> for IpEnvState {
    fn from(ip_info: &IpInfo) -> Self {
        Self {
            id: ip_info.env.clone(),
            env: ip_info.env.clone(),
            groups: ip_info.groups.clone(),
            cidrs: ip_info.cidrs.clone(),
            created: to_rfc3339_seconds(&ip_info.created),
            last_modified: to_rfc3339_seconds(&ip_info.last_modified),
        }
    }
}

impl From<IpInfo> for IpEnvState {
    fn from(ip_info: IpInfo) -> Self {
        Self::from(&ip_info)
    }
}

/// Desired configuration of a `fox_ip_env` resource.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct IpEnvPlan {
    pub env: String,
    pub groups: Vec<String>,
    pub cidrs: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct IpGroupState {
    pub id: String,
    pub group: String,
    pub ip_infos: Vec<IpEnvState>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct IpAllState {
    pub id: String,
    pub ip_infos: Vec<IpEnvState>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PingState {
    /// Unix seconds at read time, so the data source is refreshed on every run.
    pub id: String,
    pub message: String,
}

/*-------------------------------------------------------------------------------------------------
  Diagnostics
-------------------------------------------------------------------------------------------------*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// A message surfaced to the end user by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            summary: summary.into(),
            detail: None,
        }
    }

    pub fn warning(summary: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            summary: summary.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl From<&Error> for Diagnostic {
    fn from(error: &Error) -> Self {
        let summary = match error {
            Error::Transport(_) => "request api fail",
            Error::UnexpectedStatus(_) => "http response not ok",
            Error::Decode(_) => "json decode fail",
            Error::InvalidAddress { .. } => "invalid configuration",
            Error::EmptyAttribute(_) | Error::ImmutableEnv { .. } => "invalid state",
            Error::Csv(_) | Error::Io(_) => "output fail",
        };
        Diagnostic::error(summary).with_detail(format!("error: {error}"))
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            DiagnosticSeverity::Error => "Error",
            DiagnosticSeverity::Warning => "Warning",
        };
        match &self.detail {
            Some(detail) => write!(f, "{severity}: {}\n  {detail}", self.summary),
            None => write!(f, "{severity}: {}", self.summary),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Provider
-------------------------------------------------------------------------------------------------*/

/// A configured provider; every operation goes through the same immutable [Client].
#[derive(Debug, Clone)]
pub struct Provider {
    client: Client,
}

impl Provider {
    /// Validate the provider configuration and build its client.
    pub fn configure(config: &ProviderConfig) -> Result<Self> {
        debug!("Use Fox address ({})", config.address);
        let client = ClientBuilder::default().address(&config.address).build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /*-------------------------------------------------------------------------
      Data Sources
    -------------------------------------------------------------------------*/

    /// `fox_ping` data source.
    pub fn read_ping(&self) -> Result<PingState> {
        let pong = self.client.ping()?;
        Ok(PingState {
            id: Utc::now().timestamp().to_string(),
            message: pong.message,
        })
    }

    /// `fox_ip_env` data source.
    pub fn read_ip_env(&self, id: &str) -> Result<IpEnvState> {
        if id.is_empty() {
            return Err(Error::EmptyAttribute("id"));
        }
        let ip_info = self.client.get_ip_info(id)?;
        Ok(IpEnvState {
            id: id.to_string(),
            ..IpEnvState::from(ip_info)
        })
    }

    /// `fox_ip_group` data source.
    pub fn read_ip_group(&self, group: &str) -> Result<IpGroupState> {
        if group.is_empty() {
            return Err(Error::EmptyAttribute("group"));
        }
        let ip_infos = self.client.get_ip_info_group(group)?;
        Ok(IpGroupState {
            id: group.to_string(),
            group: group.to_string(),
            ip_infos: ip_infos.iter().map(IpEnvState::from).collect(),
        })
    }

    /// `fox_ip_all` data source.
    pub fn read_ip_all(&self) -> Result<IpAllState> {
        let ip_infos = self.client.get_ip_info_all()?;
        Ok(IpAllState {
            id: ALL_ID.to_string(),
            ip_infos: ip_infos.iter().map(IpEnvState::from).collect(),
        })
    }

    /*-------------------------------------------------------------------------
      Resource: fox_ip_env
    -------------------------------------------------------------------------*/

    /// Create the env, then read it back; the resource id is the env name.
    ///
    /// Once the service has accepted the create, the env exists and its id is always returned.
    /// A failed read-back yields state seeded from the plan (timestamps empty) together with a
    /// warning diagnostic; the next refresh fills in the rest.
    pub fn create_ip_env(&self, plan: &IpEnvPlan) -> Result<(IpEnvState, Vec<Diagnostic>)> {
        if plan.env.is_empty() {
            return Err(Error::EmptyAttribute("env"));
        }
        self.client
            .create_ip_info(&plan.env, &plan.groups, &plan.cidrs)?;
        info!("Created env {}", plan.env);

        match self.read_ip_env(&plan.env) {
            Ok(state) => Ok((state, Vec::new())),
            Err(error) => {
                warn!("Created env {} but reading it back failed: {}", plan.env, error);
                let state = IpEnvState {
                    id: plan.env.clone(),
                    env: plan.env.clone(),
                    groups: plan.groups.clone(),
                    cidrs: plan.cidrs.clone(),
                    created: String::new(),
                    last_modified: String::new(),
                };
                let diagnostic = Diagnostic::warning("read after create fail")
                    .with_detail(format!("error: {error}"));
                Ok((state, vec![diagnostic]))
            }
        }
    }

    /// Refresh resource state from the service.
    pub fn read_ip_env_resource(&self, state: &IpEnvState) -> Result<IpEnvState> {
        if state.id.is_empty() {
            return Err(Error::EmptyAttribute("envID"));
        }
        self.read_ip_env(&state.id)
    }

    /// Apply changed groups or cidrs, then read back. Renaming the env is rejected.
    pub fn update_ip_env(&self, prior: &IpEnvState, plan: &IpEnvPlan) -> Result<IpEnvState> {
        if prior.id.is_empty() {
            return Err(Error::EmptyAttribute("envID"));
        }
        if plan.env != prior.env {
            return Err(Error::ImmutableEnv {
                from: prior.env.clone(),
                to: plan.env.clone(),
            });
        }

        if plan.groups != prior.groups || plan.cidrs != prior.cidrs {
            self.client
                .update_ip_info(&prior.id, &plan.groups, &plan.cidrs)?;
            info!("Updated env {}", prior.id);
        } else {
            debug!("Env {} has no changes", prior.id);
        }

        self.read_ip_env(&prior.id)
    }

    pub fn delete_ip_env(&self, state: &IpEnvState) -> Result<()> {
        if state.id.is_empty() {
            return Err(Error::EmptyAttribute("envID"));
        }
        self.client.delete_ip_info(&state.id)?;
        info!("Deleted env {}", state.id);
        Ok(())
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
