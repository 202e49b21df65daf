use crate::core::errors::Result;
use crate::core::ip_info::IpInfo;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/*-------------------------------------------------------------------------------------------------
  Response Envelope
-------------------------------------------------------------------------------------------------*/

/// Key path of a single record inside the response envelope.
pub const IP_INFO_PATH: &str = "res.ipInfo";

/// Key path of a record sequence inside the response envelope.
pub const IP_INFO_ARR_PATH: &str = "res.ipInfoArr";

/*--------------------------------------------------------------------------------------
  Decode
--------------------------------------------------------------------------------------*/

/// Extract the single record at `path` (dotted) from an envelope body.
///
/// An absent or `null` key decodes to [IpInfo::default]; invalid JSON or a field type
/// mismatch is an [Error::Decode](crate::Error::Decode).
pub fn decode_one(envelope: &[u8], path: &str) -> Result<IpInfo> {
    decode(envelope, path)
}

/// Extract the record sequence at `path` (dotted) from an envelope body, keeping server order.
/// An absent or `null` key decodes to an empty sequence.
pub fn decode_many(envelope: &[u8], path: &str) -> Result<Vec<IpInfo>> {
    decode(envelope, path)
}

/// Decode the sub-document at `path`, or `T::default()` when the path is absent.
pub fn decode<T>(envelope: &[u8], path: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let root: Value = serde_json::from_slice(envelope)?;
    match extract(&root, path) {
        None | Some(Value::Null) => {
            log::debug!("Envelope key `{}` not found; using zero value", path);
            Ok(T::default())
        }
        Some(value) => Ok(T::deserialize(value)?),
    }
}

/// Walk a dotted key path through nested JSON objects.
fn extract<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.')
        .filter(|key| !key.is_empty())
        .try_fold(root, |value, key| value.get(key))
}

/*--------------------------------------------------------------------------------------
  Encode
--------------------------------------------------------------------------------------*/

#[derive(Serialize)]
struct Envelope<T> {
    res: T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OneRes<'a> {
    ip_info: &'a IpInfo,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ManyRes<'a> {
    ip_info_arr: &'a [IpInfo],
}

/// Wrap a single record in the `{"res":{"ipInfo":...}}` envelope.
pub fn encode_one(ip_info: &IpInfo) -> Result<String> {
    let envelope = Envelope {
        res: OneRes { ip_info },
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Wrap a record sequence in the `{"res":{"ipInfoArr":[...]}}` envelope.
pub fn encode_many(ip_infos: &[IpInfo]) -> Result<String> {
    let envelope = Envelope {
        res: ManyRes {
            ip_info_arr: ip_infos,
        },
    };
    Ok(serde_json::to_string(&envelope)?)
}

/*--------------------------------------------------------------------------------------
  Ping Response
--------------------------------------------------------------------------------------*/

/// Body of `GET ping`; not wrapped in an envelope.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Pong {
    pub message: String,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
