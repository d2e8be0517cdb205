use netswitch_common::profile::NetworkProfile;

use crate::runner::{CommandRunner, CommandStep, NETSH};

/// Outcome of an apply run. Failed steps are counted, never retried or
/// rolled back.
#[derive(Debug, PartialEq, Eq)]
pub struct ApplyReport {
    pub steps_run: usize,
    pub steps_failed: usize,
}

impl ApplyReport {
    pub fn all_succeeded(&self) -> bool {
        self.steps_failed == 0
    }
}

/// Builds the fixed netsh sequence for assigning a profile to an adapter:
/// set the static address, clear existing DNS entries, then set the primary
/// and secondary DNS servers when the profile defines them.
pub fn netsh_plan(adapter: &str, profile: &NetworkProfile) -> Vec<CommandStep> {
    let mut plan = vec![
        CommandStep {
            label: format!(
                "Setting IP address... (ip: {}, subnet: {}, gateway: {})",
                profile.ip, profile.subnet, profile.gateway
            ),
            program: NETSH,
            args: argv(&[
                "interface",
                "ipv4",
                "set",
                "address",
                adapter,
                "static",
                &profile.ip.to_string(),
                &profile.subnet.to_string(),
                &profile.gateway.to_string(),
            ]),
        },
        CommandStep {
            label: "Clearing existing DNS servers...".to_string(),
            program: NETSH,
            args: argv(&["interface", "ipv4", "delete", "dns", adapter, "all", "no"]),
        },
    ];

    if let Some(dns1) = profile.dns1 {
        plan.push(CommandStep {
            label: format!("Setting primary DNS server... (dns1: {dns1})"),
            program: NETSH,
            args: argv(&[
                "interface",
                "ipv4",
                "set",
                "dns",
                adapter,
                "static",
                &dns1.to_string(),
                "no",
            ]),
        });
    }
    if let Some(dns2) = profile.dns2 {
        plan.push(CommandStep {
            label: format!("Setting secondary DNS server... (dns2: {dns2})"),
            program: NETSH,
            args: argv(&[
                "interface",
                "ipv4",
                "add",
                "dns",
                adapter,
                &dns2.to_string(),
                "index=2",
                "no",
            ]),
        });
    }

    plan
}

/// Executes the plan strictly in order, one command at a time. Output is
/// surfaced through the log pipeline and `on_status` drives whatever
/// progress display the caller has; a failing step never stops the
/// remaining ones.
pub fn apply<R: CommandRunner>(
    runner: &R,
    plan: &[CommandStep],
    mut on_status: impl FnMut(&str),
) -> ApplyReport {
    let mut steps_failed = 0;

    for step in plan {
        on_status(&step.label);

        match runner.run(step) {
            Ok(output) => {
                if !output.stdout.trim().is_empty() {
                    tracing::debug!("{}", output.stdout.trim());
                }
                if !output.stderr.trim().is_empty() {
                    tracing::error!("{}", output.stderr.trim());
                }
                if output.reported_error() {
                    steps_failed += 1;
                }
            }
            Err(error) => {
                tracing::error!("{error}");
                steps_failed += 1;
            }
        }
    }

    ApplyReport {
        steps_run: plan.len(),
        steps_failed,
    }
}

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{RunnerError, StepOutput};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::net::Ipv4Addr;

    fn profile(dns1: Option<&str>, dns2: Option<&str>) -> NetworkProfile {
        NetworkProfile {
            name: "office".to_string(),
            ip: Ipv4Addr::new(192, 168, 0, 20),
            gateway: Ipv4Addr::new(192, 168, 0, 1),
            subnet: Ipv4Addr::new(255, 255, 255, 0),
            dns1: dns1.map(|addr| addr.parse().unwrap()),
            dns2: dns2.map(|addr| addr.parse().unwrap()),
        }
    }

    fn joined_args(plan: &[CommandStep]) -> Vec<String> {
        plan.iter().map(|step| step.args.join(" ")).collect()
    }

    #[test]
    fn full_plan_runs_all_four_commands_in_order() {
        let plan = netsh_plan("Ethernet", &profile(Some("8.8.8.8"), Some("8.8.4.4")));
        assert_eq!(
            joined_args(&plan),
            vec![
                "interface ipv4 set address Ethernet static 192.168.0.20 255.255.255.0 192.168.0.1",
                "interface ipv4 delete dns Ethernet all no",
                "interface ipv4 set dns Ethernet static 8.8.8.8 no",
                "interface ipv4 add dns Ethernet 8.8.4.4 index=2 no",
            ]
        );
        assert!(plan.iter().all(|step| step.program == NETSH));
    }

    #[test]
    fn plan_without_dns_issues_no_dns_set_commands() {
        let plan = netsh_plan("Ethernet", &profile(None, None));
        assert_eq!(
            joined_args(&plan),
            vec![
                "interface ipv4 set address Ethernet static 192.168.0.20 255.255.255.0 192.168.0.1",
                "interface ipv4 delete dns Ethernet all no",
            ]
        );
    }

    #[test]
    fn primary_dns_alone_skips_the_secondary_add() {
        let plan = netsh_plan("Ethernet", &profile(Some("1.1.1.1"), None));
        assert_eq!(plan.len(), 3);
        assert!(plan[2].args.contains(&"1.1.1.1".to_string()));
        assert!(!joined_args(&plan).iter().any(|args| args.contains("index=2")));
    }

    #[test]
    fn secondary_dns_alone_is_still_added_at_index_two() {
        // The two DNS fields are independent optional steps, matching the
        // per-field checks the apply sequence has always done.
        let plan = netsh_plan("Ethernet", &profile(None, Some("8.8.4.4")));
        assert_eq!(plan.len(), 3);
        assert_eq!(
            plan[2].args.join(" "),
            "interface ipv4 add dns Ethernet 8.8.4.4 index=2 no"
        );
    }

    #[test]
    fn adapter_names_with_spaces_stay_a_single_argument() {
        let plan = netsh_plan("Local Area Connection", &profile(None, None));
        assert!(plan[0].args.contains(&"Local Area Connection".to_string()));
    }

    struct ScriptedRunner {
        outputs: RefCell<VecDeque<Result<StepOutput, RunnerError>>>,
        seen: RefCell<Vec<String>>,
    }

    impl ScriptedRunner {
        fn new(outputs: Vec<Result<StepOutput, RunnerError>>) -> Self {
            Self {
                outputs: RefCell::new(outputs.into()),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, step: &CommandStep) -> Result<StepOutput, RunnerError> {
            self.seen.borrow_mut().push(step.args.join(" "));
            self.outputs.borrow_mut().pop_front().unwrap()
        }
    }

    fn ok_output() -> Result<StepOutput, RunnerError> {
        Ok(StepOutput {
            code: Some(0),
            ..StepOutput::default()
        })
    }

    fn failed_output() -> Result<StepOutput, RunnerError> {
        Ok(StepOutput {
            code: Some(1),
            stderr: "The interface name is invalid.".to_string(),
            ..StepOutput::default()
        })
    }

    #[test]
    fn apply_runs_every_step_in_plan_order() {
        let plan = netsh_plan("Ethernet", &profile(Some("8.8.8.8"), Some("8.8.4.4")));
        let runner = ScriptedRunner::new(vec![ok_output(), ok_output(), ok_output(), ok_output()]);
        let mut labels = Vec::new();

        let report = apply(&runner, &plan, |label| labels.push(label.to_string()));

        assert_eq!(runner.seen.borrow().clone(), joined_args(&plan));
        assert_eq!(labels.len(), 4);
        assert!(report.all_succeeded());
    }

    #[test]
    fn a_failing_step_does_not_stop_the_rest() {
        let plan = netsh_plan("Ethernet", &profile(Some("8.8.8.8"), None));
        let runner = ScriptedRunner::new(vec![failed_output(), ok_output(), ok_output()]);

        let report = apply(&runner, &plan, |_| {});

        assert_eq!(runner.seen.borrow().len(), 3);
        assert_eq!(
            report,
            ApplyReport {
                steps_run: 3,
                steps_failed: 1
            }
        );
    }

    #[test]
    fn a_launch_error_counts_as_a_failed_step() {
        let plan = netsh_plan("Ethernet", &profile(None, None));
        let runner = ScriptedRunner::new(vec![
            Err(RunnerError::Launch {
                program: NETSH.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            }),
            ok_output(),
        ]);

        let report = apply(&runner, &plan, |_| {});

        assert_eq!(runner.seen.borrow().len(), 2);
        assert_eq!(report.steps_failed, 1);
    }
}
