use foxip::{IpAllState, IpGroupState};
use log::{info, warn};

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Group Results
--------------------------------------------------------------------------------------*/

pub fn group(state: &IpGroupState) {
    let count_envs = state.ip_infos.len();
    if count_envs > 0 {
        info!("Found {count_envs} env(s) tagged with group {}", state.group);
    } else {
        warn!("Did not find any env tagged with group {}", state.group);
    }
}

/*--------------------------------------------------------------------------------------
  All Results
--------------------------------------------------------------------------------------*/

pub fn all(state: &IpAllState) {
    let count_envs = state.ip_infos.len();
    let count_cidrs: usize = state.ip_infos.iter().map(|env| env.cidrs.len()).sum();
    info!("Found {count_envs} env(s) allowing {count_cidrs} CIDR(s)");
}
