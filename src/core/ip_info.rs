use crate::core::datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/*-------------------------------------------------------------------------------------------------
  IP Info
-------------------------------------------------------------------------------------------------*/

/// Value sent as `managedBy` when creating an env.
pub const MANAGED_BY: &str = "tfc";

/// One environment's allowlist record.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IpInfo {
    /// Record identifier; mirrors `env`.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,

    /// Environment name, unique server-side and immutable after creation.
    #[serde(deserialize_with = "null_as_default")]
    pub env: String,

    /// Group names the env is tagged with, in server order.
    #[serde(rename = "groupArr", deserialize_with = "null_as_default")]
    pub groups: Vec<String>,

    /// Allowlisted ranges in CIDR notation, in server order.
    #[serde(rename = "cidrArr", deserialize_with = "null_as_default")]
    pub cidrs: Vec<String>,

    #[serde(with = "crate::core::datetime")]
    pub created: DateTime<Utc>,

    #[serde(with = "crate::core::datetime")]
    pub last_modified: DateTime<Utc>,
}

impl Default for IpInfo {
    fn default() -> Self {
        Self {
            id: String::new(),
            env: String::new(),
            groups: Vec::new(),
            cidrs: Vec::new(),
            created: datetime::zero(),
            last_modified: datetime::zero(),
        }
    }
}

impl IpInfo {
    /// True for the record decoded from an absent or `null` envelope key.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/*--------------------------------------------------------------------------------------
  Write Request Body
--------------------------------------------------------------------------------------*/

/// JSON body for POST and PUT on `ip-envs/{env}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WriteRequest<'a> {
    pub group_arr: &'a [String],
    pub cidr_arr: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_by: Option<&'static str>,
}

impl<'a> WriteRequest<'a> {
    pub fn create(groups: &'a [String], cidrs: &'a [String]) -> Self {
        Self {
            group_arr: groups,
            cidr_arr: cidrs,
            managed_by: Some(MANAGED_BY),
        }
    }

    pub fn update(groups: &'a [String], cidrs: &'a [String]) -> Self {
        Self {
            group_arr: groups,
            cidr_arr: cidrs,
            managed_by: None,
        }
    }
}

/// Decode `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
