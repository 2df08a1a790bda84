//! Network probe: check the service from every local IPv4 address.

pub mod interfaces;
pub mod runner;

pub use interfaces::{external_ipv4, local_ipv4_addresses, InterfaceAddr};
pub use runner::{
    render_instructions, render_report, NetworkProbe, ProbeOutcome, ProbeReport, Reachability,
};
