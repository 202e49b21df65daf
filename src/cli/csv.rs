use foxip::{IpEnvState, Result};
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Save Env Records to CSV File
-------------------------------------------------------------------------------------------------*/

pub fn save(states: &[IpEnvState], path: &PathBuf) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    // Write header
    writer.serialize(["Env", "Groups", "CIDRs", "Created", "Last Modified"])?;

    // Write env records
    for state in states {
        let record = (
            &state.env,
            state.groups.join(", "),
            state.cidrs.join(", "),
            &state.created,
            &state.last_modified,
        );
        writer.serialize(record)?;
    }

    writer.flush()?;

    log::info!("Saved {} env record(s) to {:?}", states.len(), path);
    Ok(())
}
