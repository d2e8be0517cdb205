use std::net::Ipv4Addr;

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;

#[cfg(target_os = "linux")]
use linux_impl::{is_physical, is_wireless};
#[cfg(target_os = "macos")]
use macos_impl::{is_physical, is_wireless};
#[cfg(target_os = "windows")]
use windows_impl::{is_physical, is_wireless};

/// Why an interface was rejected by the wired-adapter filter.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RejectReason {
    /// The interface is operationally down.
    IsDown,
    /// Loopback interfaces are never candidates.
    IsLoopback,
    /// Wireless, virtual or point-to-point links are not wired Ethernet.
    NotWired,
    /// The interface carries no usable IPv4 unicast address.
    NoIpv4,
}

/// Checks a single interface against the "wired Ethernet, up, IPv4-capable"
/// filter. The wired test is injected so the core logic stays testable with
/// mock interfaces.
pub fn eligible(
    interface: &NetworkInterface,
    is_wired: impl Fn(&NetworkInterface) -> bool,
) -> Result<(), RejectReason> {
    if !interface.is_up() {
        return Err(RejectReason::IsDown);
    }
    if interface.is_loopback() {
        return Err(RejectReason::IsLoopback);
    }
    if interface.is_point_to_point() || !is_wired(interface) {
        return Err(RejectReason::NotWired);
    }
    if !has_ipv4(interface) {
        return Err(RejectReason::NoIpv4);
    }

    Ok(())
}

/// Splits interfaces into eligible adapters and rejected ones paired with
/// the reason, preserving enumeration order.
pub fn classify(
    interfaces: Vec<NetworkInterface>,
    is_wired: impl Fn(&NetworkInterface) -> bool,
) -> (Vec<NetworkInterface>, Vec<(NetworkInterface, RejectReason)>) {
    let mut kept = Vec::new();
    let mut rejected = Vec::new();

    for interface in interfaces {
        match eligible(&interface, &is_wired) {
            Ok(()) => kept.push(interface),
            Err(reason) => rejected.push((interface, reason)),
        }
    }

    (kept, rejected)
}

/// Enumerates the system's interfaces and classifies them with the
/// platform's wired detection.
pub fn scan() -> (Vec<NetworkInterface>, Vec<(NetworkInterface, RejectReason)>) {
    classify(datalink::interfaces(), platform_is_wired)
}

/// Active wired adapters only, the list presented for selection.
pub fn active_wired_adapters() -> Vec<NetworkInterface> {
    let (kept, rejected) = scan();
    for (interface, reason) in &rejected {
        tracing::debug!("skipping {}: {:?}", interface.name, reason);
    }
    kept
}

fn has_ipv4(interface: &NetworkInterface) -> bool {
    interface.ips.iter().any(|net| match net {
        IpNetwork::V4(v4) => !v4.ip().is_unspecified(),
        IpNetwork::V6(_) => false,
    })
}

fn platform_is_wired(interface: &NetworkInterface) -> bool {
    is_physical(interface) && !is_wireless(interface)
}

/// Convenience accessors for the pieces of an interface the tool displays.
pub trait AdapterExt {
    fn ipv4_addrs(&self) -> Vec<Ipv4Addr>;
}

impl AdapterExt for NetworkInterface {
    fn ipv4_addrs(&self) -> Vec<Ipv4Addr> {
        self.ips
            .iter()
            .filter_map(|net| match net {
                IpNetwork::V4(v4) => Some(v4.ip()),
                IpNetwork::V6(_) => None,
            })
            .collect()
    }
}

#[cfg(target_os = "linux")]
mod linux_impl {
    use pnet::datalink::NetworkInterface;
    use std::path::Path;

    pub fn is_physical(interface: &NetworkInterface) -> bool {
        Path::new(&format!("/sys/class/net/{}/device", interface.name)).exists()
    }

    pub fn is_wireless(interface: &NetworkInterface) -> bool {
        Path::new(&format!("/sys/class/net/{}/wireless", interface.name)).exists()
    }
}

#[cfg(target_os = "macos")]
mod macos_impl {
    use pnet::datalink::NetworkInterface;
    use std::collections::HashSet;
    use std::process::Command;
    use std::sync::OnceLock;

    struct HardwarePorts {
        physical: HashSet<String>,
        wireless: HashSet<String>,
    }

    /// Queries `networksetup` once and caches the answer for the run.
    fn hardware_ports() -> &'static HardwarePorts {
        static PORTS: OnceLock<HardwarePorts> = OnceLock::new();

        PORTS.get_or_init(|| {
            let mut physical = HashSet::new();
            let mut wireless = HashSet::new();

            if let Ok(output) = Command::new("networksetup")
                .arg("-listallhardwareports")
                .output()
            {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let mut current_port = String::new();
                for line in stdout.lines() {
                    if let Some(port) = line.strip_prefix("Hardware Port: ") {
                        current_port = port.trim().to_string();
                    }
                    if let Some(device) = line.strip_prefix("Device: ") {
                        let device = device.trim().to_string();
                        if current_port.contains("Wi-Fi") || current_port.contains("AirPort") {
                            wireless.insert(device.clone());
                        }
                        physical.insert(device);
                    }
                }
            }

            HardwarePorts { physical, wireless }
        })
    }

    pub fn is_physical(interface: &NetworkInterface) -> bool {
        hardware_ports().physical.contains(&interface.name)
    }

    pub fn is_wireless(interface: &NetworkInterface) -> bool {
        hardware_ports().wireless.contains(&interface.name)
    }
}

#[cfg(target_os = "windows")]
mod windows_impl {
    use pnet::datalink::NetworkInterface;

    // pnet exposes no medium flag on Windows, so medium detection falls back
    // to the adapter description reported by the OS.
    const WIRELESS_HINTS: &[&str] = &["wi-fi", "wireless", "802.11", "wlan", "bluetooth"];
    const VIRTUAL_HINTS: &[&str] = &[
        "virtual", "vmware", "hyper-v", "vethernet", "loopback", "tap", "tun", "wintun",
    ];

    pub fn is_physical(interface: &NetworkInterface) -> bool {
        let description = interface.description.to_lowercase();
        !VIRTUAL_HINTS.iter().any(|hint| description.contains(hint))
    }

    pub fn is_wireless(interface: &NetworkInterface) -> bool {
        let description = interface.description.to_lowercase();
        WIRELESS_HINTS.iter().any(|hint| description.contains(hint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnet::datalink::MacAddr;
    use pnet::ipnetwork::IpNetwork;

    const IFF_UP: u32 = 1;
    const IFF_BROADCAST: u32 = 1 << 1;
    const IFF_LOOPBACK: u32 = 1 << 3;
    const IFF_POINTTOPOINT: u32 = 1 << 4;

    fn mock_interface(
        name: &str,
        description: &str,
        ips: Vec<IpNetwork>,
        flags: u32,
    ) -> NetworkInterface {
        NetworkInterface {
            name: name.to_string(),
            description: description.to_string(),
            index: 0,
            mac: Some(MacAddr(0x1, 0x2, 0x3, 0x4, 0x5, 0x6)),
            ips,
            flags,
        }
    }

    fn v4(addr: &str) -> IpNetwork {
        IpNetwork::V4(addr.parse().unwrap())
    }

    fn v6(addr: &str) -> IpNetwork {
        IpNetwork::V6(addr.parse().unwrap())
    }

    fn wired(_: &NetworkInterface) -> bool {
        true
    }

    #[test]
    fn up_wired_ipv4_interface_is_eligible() {
        let interface = mock_interface(
            "eth0",
            "Intel(R) Ethernet Connection",
            vec![v4("192.168.1.100/24")],
            IFF_UP | IFF_BROADCAST,
        );
        assert_eq!(eligible(&interface, wired), Ok(()));
    }

    #[test]
    fn down_interface_is_rejected() {
        let interface = mock_interface("eth0", "", vec![v4("192.168.1.100/24")], IFF_BROADCAST);
        assert_eq!(eligible(&interface, wired), Err(RejectReason::IsDown));
    }

    #[test]
    fn loopback_is_rejected() {
        let interface = mock_interface(
            "lo",
            "",
            vec![v4("127.0.0.1/8")],
            IFF_UP | IFF_LOOPBACK,
        );
        assert_eq!(eligible(&interface, wired), Err(RejectReason::IsLoopback));
    }

    #[test]
    fn wireless_interface_is_rejected_by_the_predicate() {
        let interface = mock_interface(
            "wlan0",
            "Wireless LAN",
            vec![v4("192.168.1.101/24")],
            IFF_UP | IFF_BROADCAST,
        );
        let not_wired = |_: &NetworkInterface| false;
        assert_eq!(eligible(&interface, not_wired), Err(RejectReason::NotWired));
    }

    #[test]
    fn point_to_point_link_is_rejected() {
        let interface = mock_interface(
            "tun0",
            "",
            vec![v4("10.8.0.2/24")],
            IFF_UP | IFF_POINTTOPOINT,
        );
        assert_eq!(eligible(&interface, wired), Err(RejectReason::NotWired));
    }

    #[test]
    fn ipv6_only_interface_is_rejected() {
        let interface = mock_interface(
            "eth1",
            "",
            vec![v6("fe80::1234:5678:abcd:ef01/64")],
            IFF_UP | IFF_BROADCAST,
        );
        assert_eq!(eligible(&interface, wired), Err(RejectReason::NoIpv4));
    }

    #[test]
    fn interface_without_addresses_is_rejected() {
        let interface = mock_interface("eth2", "", vec![], IFF_UP | IFF_BROADCAST);
        assert_eq!(eligible(&interface, wired), Err(RejectReason::NoIpv4));
    }

    #[test]
    fn unspecified_ipv4_does_not_count() {
        let interface = mock_interface("eth3", "", vec![v4("0.0.0.0/0")], IFF_UP | IFF_BROADCAST);
        assert_eq!(eligible(&interface, wired), Err(RejectReason::NoIpv4));
    }

    #[test]
    fn classify_splits_kept_from_rejected() {
        let interfaces = vec![
            mock_interface("eth0", "", vec![v4("192.168.1.100/24")], IFF_UP | IFF_BROADCAST),
            mock_interface("lo", "", vec![v4("127.0.0.1/8")], IFF_UP | IFF_LOOPBACK),
            mock_interface("eth1", "", vec![v4("10.0.0.2/24")], 0),
        ];

        let (kept, rejected) = classify(interfaces, wired);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "eth0");
        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0].1, RejectReason::IsLoopback);
        assert_eq!(rejected[1].1, RejectReason::IsDown);
    }

    #[test]
    fn ipv4_addrs_filters_out_ipv6() {
        let interface = mock_interface(
            "eth0",
            "",
            vec![v4("192.168.1.100/24"), v6("fe80::1/64")],
            IFF_UP,
        );
        assert_eq!(
            interface.ipv4_addrs(),
            vec!["192.168.1.100".parse::<Ipv4Addr>().unwrap()]
        );
    }
}
