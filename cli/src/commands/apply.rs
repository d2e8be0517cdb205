use std::path::Path;

use is_root::is_root;
use pnet::datalink::NetworkInterface;

use netswitch_common::profile::{self, NetworkProfile};
use netswitch_common::{failure, success, warning};
use netswitch_core::runner::SystemRunner;
use netswitch_core::{adapter, apply as applier};

use crate::terminal::{input, print, prompt, spinner};

/// The interactive run: privilege check, adapter pick, profile pick, apply,
/// then a keypress-gated exit so a double-clicked console window stays
/// readable.
pub fn apply(
    config: &Path,
    adapter_name: Option<String>,
    profile_name: Option<String>,
) -> anyhow::Result<()> {
    let interactive = adapter_name.is_none() || profile_name.is_none();

    if !is_root() {
        failure!("Administrator rights are required to change adapter settings.");
        wait_before_exit(interactive);
        anyhow::bail!("insufficient privileges");
    }

    print::header("active wired adapters");
    let adapters = adapter::active_wired_adapters();
    if adapters.is_empty() {
        failure!("No active wired adapter found.");
        return Ok(());
    }

    let selected_adapter = match &adapter_name {
        Some(name) => find_adapter(&adapters, name)?,
        None => prompt::select_adapter(&adapters)?,
    };
    success!("Adapter selected: {}", selected_adapter.name);

    let profiles = match profile::load_profiles(config) {
        Ok(profiles) => profiles,
        Err(error) => {
            failure!("{error}");
            return Ok(());
        }
    };

    let selected_profile = match &profile_name {
        Some(name) => find_profile(&profiles, name)?,
        None => prompt::select_profile(&profiles)?,
    };
    success!("Profile selected: {}", selected_profile.summary());

    let plan = applier::netsh_plan(&selected_adapter.name, selected_profile);
    let report = {
        let _guard = spinner::start("Applying network settings...");
        applier::apply(&SystemRunner, &plan, |label| {
            spinner::set_message(label.to_string())
        })
    };

    if report.all_succeeded() {
        success!("Network settings applied.");
    } else {
        failure!(
            "{} of {} steps reported errors.",
            report.steps_failed,
            report.steps_run
        );
    }

    warning!("An IP clashing with another adapter may not apply cleanly.");
    print::print_status("Check the result under: Run (Win+R) -> ncpa.cpl");
    wait_before_exit(interactive);
    print::end_of_program();

    Ok(())
}

fn wait_before_exit(interactive: bool) {
    if interactive {
        print::print_status("Press space to exit.");
        input::wait_for_exit_key();
    }
}

fn find_adapter<'a>(
    adapters: &'a [NetworkInterface],
    name: &str,
) -> anyhow::Result<&'a NetworkInterface> {
    adapters
        .iter()
        .find(|adapter| adapter.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow::anyhow!("no active wired adapter named '{name}'"))
}

fn find_profile<'a>(
    profiles: &'a [NetworkProfile],
    name: &str,
) -> anyhow::Result<&'a NetworkProfile> {
    profiles
        .iter()
        .find(|profile| profile.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow::anyhow!("no profile named '{name}' in the config file"))
}
