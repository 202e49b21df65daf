use ipnetwork::IpNetwork;
use log::warn;

/*-------------------------------------------------------------------------------------------------
  Utility Functions
-------------------------------------------------------------------------------------------------*/

/// Parse a CIDR string for display; unparseable values are logged and skipped.
pub fn parse_cidr(cidr: &str) -> Option<IpNetwork> {
    cidr.parse()
        .inspect_err(|error| warn!("Invalid CIDR {:?}: {}", cidr, error))
        .ok()
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
