use crate::cli::utils::parse_cidr;
use crate::cli::OutputFormat;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::*;
use foxip::{IpEnvState, PingState, Result};
use std::collections::BTreeSet;

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Env Table
--------------------------------------------------------------------------------------*/

pub fn env_table(states: &[IpEnvState]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(
        ["Env", "Groups", "CIDRs", "Created", "Last Modified"].map(|header| {
            Cell::new(header)
                .add_attribute(Attribute::Bold)
                .fg(Color::Green)
        }),
    );

    for state in states {
        table.add_row(vec![
            Cell::new(&state.env).add_attribute(Attribute::Bold),
            Cell::new(state.groups.join(", ")),
            Cell::new(state.cidrs.join("\n")),
            Cell::new(&state.created),
            Cell::new(&state.last_modified),
        ]);
    }

    println!("{table}");

    // Print env-table summary
    let env_count = states.len();
    let group_count = states
        .iter()
        .flat_map(|state| state.groups.iter())
        .collect::<BTreeSet<_>>()
        .len();
    let cidr_count: usize = states.iter().map(|state| state.cidrs.len()).sum();

    let mut summary_table = Table::new();
    summary_table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic);

    summary_table.add_row(vec![Cell::new(env_count), Cell::new("Envs")]);
    summary_table.add_row(vec![Cell::new(group_count), Cell::new("Groups")]);
    summary_table.add_row(vec![Cell::new(cidr_count), Cell::new("CIDRs")]);

    if let Some(column) = summary_table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    println!("{summary_table}");
}

/*--------------------------------------------------------------------------------------
  JSON
--------------------------------------------------------------------------------------*/

pub fn json(states: &[IpEnvState]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(states)?);
    Ok(())
}

/*--------------------------------------------------------------------------------------
  CIDRs In CIDR Format
--------------------------------------------------------------------------------------*/

pub fn cidrs_in_cidr_format(states: &[IpEnvState]) {
    for cidr in states.iter().flat_map(|state| state.cidrs.iter()) {
        println!("{cidr}");
    }
}

/*--------------------------------------------------------------------------------------
  CIDRs In Netmask Format
--------------------------------------------------------------------------------------*/

pub fn cidrs_in_netmask_format(states: &[IpEnvState]) {
    for network in states
        .iter()
        .flat_map(|state| state.cidrs.iter())
        .filter_map(|cidr| parse_cidr(cidr))
    {
        println!("{} {}", network.network(), network.mask());
    }
}

/*--------------------------------------------------------------------------------------
  Ping
--------------------------------------------------------------------------------------*/

pub fn ping(state: &PingState, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(state)?),
        _ => println!("{}", state.message),
    }
    Ok(())
}
