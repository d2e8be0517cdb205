use colored::*;

use netswitch_common::failure;
use netswitch_core::adapter::{self, AdapterExt};

use crate::terminal::{colors, print};

/// Lists every adapter that would be offered for selection, one tree per
/// adapter. Rejected interfaces only show up at debug level.
pub fn adapters() -> anyhow::Result<()> {
    print::header("active wired adapters");

    let (kept, rejected) = adapter::scan();
    for (interface, reason) in &rejected {
        tracing::debug!("skipping {}: {:?}", interface.name, reason);
    }

    if kept.is_empty() {
        failure!("No active wired adapter found.");
        return Ok(());
    }

    for (idx, interface) in kept.iter().enumerate() {
        print::tree_head(idx, &interface.name);

        let mut details: Vec<(String, ColoredString)> = Vec::new();
        if !interface.description.is_empty() {
            details.push(("Desc".to_string(), interface.description.normal()));
        }
        for addr in interface.ipv4_addrs() {
            details.push(("IPv4".to_string(), addr.to_string().color(colors::IPV4_ADDR)));
        }

        print::as_tree_one_level(details);
    }

    print::end_of_program();
    Ok(())
}
