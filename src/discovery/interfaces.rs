//! Host network interface enumeration.

use std::net::{IpAddr, Ipv4Addr};

/// Address family of an interface address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    V4,
    V6,
}

/// One address bound to a host interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkAddress {
    pub address: IpAddr,
    /// Loopback addresses are internal: not reachable from other hosts.
    pub is_internal: bool,
    pub family: AddressFamily,
}

impl NetworkAddress {
    pub fn new(address: IpAddr, is_internal: bool) -> Self {
        let family = match address {
            IpAddr::V4(_) => AddressFamily::V4,
            IpAddr::V6(_) => AddressFamily::V6,
        };
        Self {
            address,
            is_internal,
            family,
        }
    }

    /// The IPv4 address, if this is a non-internal IPv4 entry.
    pub fn external_ipv4(&self) -> Option<Ipv4Addr> {
        match (self.family, self.address) {
            (AddressFamily::V4, IpAddr::V4(v4)) if !self.is_internal => Some(v4),
            _ => None,
        }
    }
}

/// Every address on every interface, in the order the OS reports them.
pub fn enumerate() -> std::io::Result<Vec<NetworkAddress>> {
    let interfaces = get_if_addrs::get_if_addrs()?;

    Ok(interfaces
        .into_iter()
        .map(|iface| NetworkAddress::new(iface.ip(), iface.is_loopback()))
        .collect())
}

/// Non-internal IPv4 addresses, enumeration order kept, no dedup.
pub fn external_ipv4(addresses: &[NetworkAddress]) -> Vec<Ipv4Addr> {
    addresses
        .iter()
        .filter_map(NetworkAddress::external_ipv4)
        .collect()
}
