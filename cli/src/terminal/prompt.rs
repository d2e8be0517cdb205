use dialoguer::{Select, theme::ColorfulTheme};
use netswitch_common::profile::NetworkProfile;
use pnet::datalink::NetworkInterface;

/// Arrow-key selection of the adapter to configure.
pub fn select_adapter(adapters: &[NetworkInterface]) -> anyhow::Result<&NetworkInterface> {
    let items: Vec<String> = adapters.iter().map(format_adapter).collect();
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select the adapter to configure")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(&adapters[choice])
}

/// Arrow-key selection of the profile to apply.
pub fn select_profile(profiles: &[NetworkProfile]) -> anyhow::Result<&NetworkProfile> {
    let items: Vec<String> = profiles.iter().map(NetworkProfile::summary).collect();
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select the profile to apply")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(&profiles[choice])
}

fn format_adapter(adapter: &NetworkInterface) -> String {
    if adapter.description.is_empty() {
        adapter.name.clone()
    } else {
        format!("{} - {}", adapter.name, adapter.description)
    }
}
