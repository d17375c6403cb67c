//! Identifier canonicalization
//!
//! JSON keys and field-definition file names are turned into exported
//! identifiers in two steps: the raw text is split into tokens and each
//! token is capitalized, then an ordered table of vendor-specific
//! corrections rewrites whole tokens (or runs of whole tokens) into their
//! canonical spelling, e.g. `dhcpd_dns_1` becomes `DHCPDDNS1`.
//!
//! The correction tables are plain data. They live in
//! [`GeneratorConfig`](crate::config::GeneratorConfig) and are passed to
//! every naming call, so tests can swap them without touching shared state.

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

/// A single find/replace pair applied to identifier tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// Token text to match (capitalized, e.g. `Dhcpd`)
    pub old: String,
    /// Canonical spelling (e.g. `DHCPD`)
    pub new: String,
}

impl Replacement {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }
}

/// Ordered table of identifier corrections
///
/// At every token position the correction whose `old` text spans the most
/// characters wins, so a composite such as `Dhcpdv6` is never rewritten by
/// the shorter `Dhcpd` rule. Among equally long matches the first entry in
/// the table wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameCorrections {
    replacements: Vec<Replacement>,
}

impl NameCorrections {
    /// Create a table from `(old, new)` pairs
    pub fn new<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        Self {
            replacements: pairs
                .into_iter()
                .map(|(old, new)| Replacement::new(old, new))
                .collect(),
        }
    }

    /// Corrections applied to JSON keys when deriving field names
    pub fn field_defaults() -> Self {
        Self::new([
            ("Dhcpdv6", "DHCPDV6"),
            ("Dhcpd", "DHCPD"),
            ("Idx", "IDX"),
            ("Ipsec", "IPSec"),
            ("Ipv6", "IPV6"),
            ("Openvpn", "OpenVPN"),
            ("Tftp", "TFTP"),
            ("Wlangroup", "WLANGroup"),
            ("Bc", "Broadcast"),
            ("Dhcp", "DHCP"),
            ("Dns", "DNS"),
            ("Dpi", "DPI"),
            ("Dtim", "DTIM"),
            ("Firewallgroup", "FirewallGroup"),
            ("Fixedip", "FixedIP"),
            ("Icmp", "ICMP"),
            ("Id", "ID"),
            ("Igmp", "IGMP"),
            ("Ip", "IP"),
            ("Leasetime", "LeaseTime"),
            ("Mac", "MAC"),
            ("Mcastenhance", "MulticastEnhance"),
            ("Minrssi", "MinRSSI"),
            ("Monthdays", "MonthDays"),
            ("Nat", "NAT"),
            ("Networkconf", "Network"),
            ("Networkgroup", "NetworkGroup"),
            ("Pd", "PD"),
            ("Pmf", "PMF"),
            ("Portconf", "PortProfile"),
            ("Qos", "QOS"),
            ("Radiusprofile", "RADIUSProfile"),
            ("Radius", "RADIUS"),
            ("Ssid", "SSID"),
            ("Startdate", "StartDate"),
            ("Starttime", "StartTime"),
            ("Stopdate", "StopDate"),
            ("Stoptime", "StopTime"),
            ("Tcp", "TCP"),
            ("Udp", "UDP"),
            ("Usergroup", "UserGroup"),
            ("Utc", "UTC"),
            ("Vlan", "VLAN"),
            ("Vpn", "VPN"),
            ("Wan", "WAN"),
            ("Wep", "WEP"),
            ("Wlan", "WLAN"),
            ("Wpa", "WPA"),
        ])
    }

    /// Corrections applied to field-definition file stems when deriving
    /// resource names
    pub fn file_defaults() -> Self {
        Self::new([
            ("WlanConf", "WLAN"),
            ("NetworkConf", "Network"),
            ("PortConf", "PortProfile"),
            ("RadiusProfile", "RADIUSProfile"),
            ("ApGroups", "APGroup"),
            ("Dhcp", "DHCP"),
            ("Wlan", "WLAN"),
        ])
    }

    /// Append a correction to the end of the table
    pub fn push(&mut self, old: impl Into<String>, new: impl Into<String>) {
        self.replacements.push(Replacement::new(old, new));
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    /// Tokenize `raw`, capitalize each token and apply the corrections
    pub fn canonicalize(&self, raw: &str) -> String {
        self.apply(&tokenize(raw))
    }

    fn apply(&self, tokens: &[String]) -> String {
        let mut out = String::new();
        let mut i = 0;
        while i < tokens.len() {
            match self.longest_match(&tokens[i..]) {
                Some((replacement, consumed)) => {
                    out.push_str(&replacement.new);
                    i += consumed;
                }
                None => {
                    out.push_str(&tokens[i]);
                    i += 1;
                }
            }
        }
        out
    }

    /// Find the correction matching the most leading tokens of `tokens`.
    /// Returns the replacement and how many tokens it consumes.
    fn longest_match(&self, tokens: &[String]) -> Option<(&Replacement, usize)> {
        let mut best: Option<(&Replacement, usize)> = None;
        for replacement in &self.replacements {
            let Some(consumed) = covering_tokens(&replacement.old, tokens) else {
                continue;
            };
            let longer = best.is_none_or(|(b, _)| replacement.old.len() > b.old.len());
            if longer {
                best = Some((replacement, consumed));
            }
        }
        best
    }
}

/// Number of leading tokens whose concatenation equals `old` exactly
fn covering_tokens(old: &str, tokens: &[String]) -> Option<usize> {
    if old.is_empty() {
        return None;
    }
    let mut rest = old;
    for (n, token) in tokens.iter().enumerate() {
        rest = rest.strip_prefix(token.as_str())?;
        if rest.is_empty() {
            return Some(n + 1);
        }
    }
    None
}

/// Split an identifier into capitalized tokens.
///
/// Non-alphanumeric characters separate tokens and are dropped. Inside an
/// alphanumeric run a new token starts at every letter/digit transition
/// and at every lower-to-upper case transition.
fn tokenize(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for c in raw.chars() {
        if !c.is_ascii_alphanumeric() {
            flush(&mut tokens, &mut current);
            prev = None;
            continue;
        }
        if let Some(p) = prev {
            let boundary = p.is_ascii_digit() != c.is_ascii_digit()
                || (p.is_ascii_lowercase() && c.is_ascii_uppercase());
            if boundary {
                flush(&mut tokens, &mut current);
            }
        }
        current.push(c);
        prev = Some(c);
    }
    flush(&mut tokens, &mut current);
    tokens
}

fn flush(tokens: &mut Vec<String>, current: &mut String) {
    if current.is_empty() {
        return;
    }
    let mut chars = current.chars();
    let token = match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    };
    tokens.push(token);
    current.clear();
}

/// Derive the exported field identifier for a JSON key
pub fn field_name(key: &str, corrections: &NameCorrections) -> String {
    corrections.canonicalize(key)
}

/// Derive the resource name for a field-definition file stem
pub fn resource_name(file_stem: &str, corrections: &NameCorrections) -> String {
    corrections.canonicalize(file_stem)
}

/// Lower snake case, used for setting paths and output file names
pub fn snake_case(name: &str) -> String {
    name.to_case(Case::Snake)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_reps() -> NameCorrections {
        NameCorrections::new([("Dhcpd", "DHCPD"), ("Ip", "IP")])
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("x_ssh_keys"), vec!["X", "Ssh", "Keys"]);
        assert_eq!(tokenize("dhcpdv6_ra"), vec!["Dhcpdv", "6", "Ra"]);
        assert_eq!(tokenize("WlanConf"), vec!["Wlan", "Conf"]);
        assert_eq!(tokenize("DynamicDNS"), vec!["Dynamic", "DNS"]);
        assert_eq!(tokenize("6e_enabled"), vec!["6", "E", "Enabled"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_canonicalize_basic() {
        let reps = test_reps();
        assert_eq!(reps.canonicalize("dhcpd_enabled"), "DHCPDEnabled");
        assert_eq!(reps.canonicalize("dhcpd_ip_mac"), "DHCPDIPMac");
        assert_eq!(reps.canonicalize("something_else"), "SomethingElse");
        assert_eq!(reps.canonicalize(""), "");
    }

    #[test]
    fn test_whole_token_only() {
        let reps = test_reps();
        // "Ipaddr" is one token and must not become "IPaddr"
        assert_eq!(reps.canonicalize("ipaddr"), "Ipaddr");
        // "Hidden" contains "id" but is not the token "Id"
        assert_eq!(
            NameCorrections::field_defaults().canonicalize("attr_hidden_id"),
            "AttrHiddenID"
        );
    }

    #[test]
    fn test_longest_correction_wins() {
        let reps = NameCorrections::field_defaults();
        assert_eq!(reps.canonicalize("dhcpdv6_enabled"), "DHCPDV6Enabled");
        assert_eq!(reps.canonicalize("ipv6_mode"), "IPV6Mode");
        assert_eq!(reps.canonicalize("wlangroup_id"), "WLANGroupID");
        assert_eq!(reps.canonicalize("dhcpd_dns_1"), "DHCPDDNS1");
        assert_eq!(reps.canonicalize("bc_filter_enabled"), "BroadcastFilterEnabled");

        // table order does not matter for composite tokens
        let reversed = NameCorrections::new([("Dhcpd", "DHCPD"), ("Dhcpdv6", "DHCPDV6")]);
        assert_eq!(reversed.canonicalize("dhcpdv6_start"), "DHCPDV6Start");
    }

    #[test]
    fn test_file_corrections() {
        let reps = NameCorrections::file_defaults();
        assert_eq!(reps.canonicalize("WlanConf"), "WLAN");
        assert_eq!(reps.canonicalize("NetworkConf"), "Network");
        assert_eq!(reps.canonicalize("ApGroups"), "APGroup");
        assert_eq!(reps.canonicalize("DhcpOption"), "DHCPOption");
        assert_eq!(reps.canonicalize("SettingGlobalAp"), "SettingGlobalAp");
    }

    #[test]
    fn test_table_is_swappable() {
        let mut reps = NameCorrections::default();
        assert!(reps.is_empty());
        assert_eq!(field_name("ssid_name", &reps), "SsidName");
        reps.push("Ssid", "SSID");
        assert_eq!(reps.len(), 1);
        assert_eq!(field_name("ssid_name", &reps), "SSIDName");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("GlobalAp"), "global_ap");
        assert_eq!(snake_case("Usg"), "usg");
        assert_eq!(snake_case("SuperSdn"), "super_sdn");
    }
}
