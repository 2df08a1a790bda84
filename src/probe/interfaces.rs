//! Local IPv4 address enumeration.

use std::net::{IpAddr, Ipv4Addr};

use tracing::debug;

use crate::error::ProbeError;

/// An address bound to a named interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceAddr {
    /// Interface name (e.g. `eth0`).
    pub name: String,
    /// Bound address.
    pub ip: IpAddr,
}

/// Whether an address is internal to the host (loopback or unspecified).
pub fn is_internal(ip: &IpAddr) -> bool {
    ip.is_loopback() || ip.is_unspecified()
}

/// Keep only non-internal IPv4 addresses, preserving order and dropping duplicates.
pub fn external_ipv4<I>(addrs: I) -> Vec<Ipv4Addr>
where
    I: IntoIterator<Item = InterfaceAddr>,
{
    let mut out = Vec::new();
    for addr in addrs {
        match addr.ip {
            IpAddr::V4(v4) if !is_internal(&addr.ip) => {
                if !out.contains(&v4) {
                    debug!(interface = %addr.name, ip = %v4, "External IPv4 address");
                    out.push(v4);
                }
            }
            _ => debug!(interface = %addr.name, ip = %addr.ip, "Skipping address"),
        }
    }
    out
}

/// Every address currently configured on the host.
pub fn list_interfaces() -> Result<Vec<InterfaceAddr>, ProbeError> {
    let ifaces = if_addrs::get_if_addrs().map_err(ProbeError::InterfaceEnumeration)?;

    Ok(ifaces
        .into_iter()
        .map(|iface| InterfaceAddr {
            ip: iface.ip(),
            name: iface.name,
        })
        .collect())
}

/// Non-internal IPv4 addresses of this host.
pub fn local_ipv4_addresses() -> Result<Vec<Ipv4Addr>, ProbeError> {
    Ok(external_ipv4(list_interfaces()?))
}
