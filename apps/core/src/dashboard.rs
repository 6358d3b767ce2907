//! Terminal status panel.
//!
//! Every value here is fixed decoration: there is no node, network or wallet
//! behind it.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct SystemStatus {
    pub operational: bool,
    pub node_online: bool,
    pub response_time_ms: u32,
    pub network_load_pct: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkStatus {
    pub network: &'static str,
    pub block_height: u64,
    pub tps: u32,
    pub health_pct: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TerminalStatus {
    pub system: SystemStatus,
    pub network: NetworkStatus,
    pub wallet_connected: bool,
    pub recent_activity: Vec<String>,
}

impl TerminalStatus {
    pub fn snapshot() -> Self {
        Self {
            system: SystemStatus {
                operational: true,
                node_online: true,
                response_time_ms: 45,
                network_load_pct: 32,
            },
            network: NetworkStatus {
                network: "Mainnet",
                block_height: 224_571_337,
                tps: 4_298,
                health_pct: 98.9,
            },
            wallet_connected: false,
            recent_activity: Vec::new(),
        }
    }
}

/// Formats an integer with comma thousands separators.
fn grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_off = |b: bool, yes: &'static str, no: &'static str| if b { yes } else { no };

        writeln!(
            f,
            "System Status    {}",
            on_off(self.system.operational, "Operational", "Degraded")
        )?;
        writeln!(
            f,
            "  Node Status    {}",
            on_off(self.system.node_online, "Online", "Offline")
        )?;
        writeln!(f, "  Response Time  {}ms", self.system.response_time_ms)?;
        writeln!(f, "  Network Load   {}%", self.system.network_load_pct)?;
        writeln!(f, "Network Status   {}", self.network.network)?;
        writeln!(f, "  Block Height   {}", grouped(self.network.block_height))?;
        writeln!(f, "  TPS            {}", grouped(u64::from(self.network.tps)))?;
        writeln!(f, "  Network Health {:.1}%", self.network.health_pct)?;
        writeln!(
            f,
            "Wallet Status    {}",
            on_off(self.wallet_connected, "Connected", "Disconnected")
        )?;
        if !self.wallet_connected {
            writeln!(f, "  Connect wallet to start trading")?;
        }
        writeln!(f, "Recent Activity  (last 24h)")?;
        if self.recent_activity.is_empty() {
            write!(f, "  No recent activity")
        } else {
            write!(f, "  {}", self.recent_activity.join("\n  "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped() {
        assert_eq!(grouped(0), "0");
        assert_eq!(grouped(999), "999");
        assert_eq!(grouped(4298), "4,298");
        assert_eq!(grouped(224_571_337), "224,571,337");
    }

    #[test]
    fn test_snapshot_render() {
        let rendered = TerminalStatus::snapshot().to_string();
        assert!(rendered.contains("224,571,337"));
        assert!(rendered.contains("4,298"));
        assert!(rendered.contains("98.9%"));
        assert!(rendered.contains("Disconnected"));
        assert!(rendered.contains("No recent activity"));
    }
}
