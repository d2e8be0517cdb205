use std::path::Path;

use colored::*;

use netswitch_common::failure;
use netswitch_common::profile;

use crate::terminal::{colors, print};

/// Lists the profiles the config file defines, one tree per profile.
pub fn profiles(config: &Path) -> anyhow::Result<()> {
    print::header("network profiles");

    let profiles = match profile::load_profiles(config) {
        Ok(profiles) => profiles,
        Err(error) => {
            failure!("{error}");
            return Ok(());
        }
    };

    for (idx, profile) in profiles.iter().enumerate() {
        print::tree_head(idx, &profile.name);

        let mut details: Vec<(String, ColoredString)> = vec![
            ("ip".to_string(), profile.ip.to_string().color(colors::IPV4_ADDR)),
            ("gateway".to_string(), profile.gateway.to_string().normal()),
            ("subnet".to_string(), profile.subnet.to_string().normal()),
        ];
        if let Some(dns1) = profile.dns1 {
            details.push(("dns1".to_string(), dns1.to_string().normal()));
        }
        if let Some(dns2) = profile.dns2 {
            details.push(("dns2".to_string(), dns2.to_string().normal()));
        }

        print::as_tree_one_level(details);
    }

    print::end_of_program();
    Ok(())
}
