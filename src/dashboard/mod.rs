//! Dashboard statistics view.
//!
//! A read-only projection of backend-computed aggregates: the console only
//! formats counts, the property-status breakdown, and the agent performance
//! blocks. The one piece of arithmetic done locally is the percentage per
//! status slice.

pub mod refresh;

pub use refresh::Generation;

use crate::client::{ApiClient, ApiError};
use crate::models::{AgentPerformance, DashboardStats, PropertyStatusBreakdown};
use anyhow::Result;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

/// Render the stats block shown by `propconnect dashboard`.
pub fn render(stats: &DashboardStats) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "=== PropConnect Dashboard ===");
    let _ = writeln!(out);
    let _ = writeln!(out, "Totals:");
    let _ = writeln!(out, "  Properties: {}", stats.total_properties);
    let _ = writeln!(out, "  Agents:     {}", stats.total_agents);
    let _ = writeln!(out, "  Users:      {}", stats.total_users);
    let _ = writeln!(out, "  Inquiries:  {}", stats.total_inquiries);

    if let Some(breakdown) = &stats.property_status {
        let _ = writeln!(out);
        let _ = writeln!(out, "Property Status:");
        for (label, value) in status_slices(breakdown) {
            let _ = writeln!(
                out,
                "  {:<14} {:>6}  {:>5.1}%",
                label,
                value,
                percent(value, breakdown.total)
            );
        }
    }

    if let Some(agent) = &stats.top_selling_agent {
        let _ = writeln!(out);
        let _ = writeln!(out, "Top Selling Agent:");
        write_agent(&mut out, agent, "sold");
    }

    if let Some(agent) = &stats.least_active_agent {
        let _ = writeln!(out);
        let _ = writeln!(out, "Least Active Agent:");
        write_agent(&mut out, agent, "listings");
    }

    out
}

/// Non-zero slices only, matching what the status chart shows.
fn status_slices(breakdown: &PropertyStatusBreakdown) -> Vec<(&'static str, u64)> {
    [
        ("Active", breakdown.active),
        ("Sold", breakdown.sold),
        ("Rented", breakdown.rented),
        ("Inactive", breakdown.inactive),
        ("Under Review", breakdown.under_review),
    ]
    .into_iter()
    .filter(|(_, value)| *value > 0)
    .collect()
}

pub fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

fn write_agent(out: &mut String, agent: &AgentPerformance, unit: &str) {
    let _ = writeln!(out, "  {} ({} {})", agent.agent_name, agent.count, unit);
    if let Some(email) = &agent.agent_email {
        let _ = writeln!(out, "  {}", email);
    }
    if let Some(phone) = &agent.agent_phone {
        let _ = writeln!(out, "  {}", phone);
    }
}

/// Re-poll stats on a fixed interval until Ctrl+C. Polls run as detached
/// tasks; the generation counter makes sure only the newest in-flight
/// response gets printed, so an out-of-order slow response can never show
/// stale numbers over fresh ones.
pub async fn watch(api: Arc<ApiClient>, interval_secs: u64) -> Result<()> {
    let counter = Arc::new(Generation::new());
    let (tx, mut rx) = mpsc::channel::<(u64, Result<DashboardStats, ApiError>)>(4);

    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let generation = counter.begin();
                let api = api.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = api.dashboard_stats().await;
                    let _ = tx.send((generation, result)).await;
                });
            }
            Some((generation, result)) = rx.recv() => {
                if !counter.is_current(generation) {
                    continue;
                }
                match result {
                    Ok(stats) => {
                        print!("{}", render(&stats));
                        println!();
                        println!("(refreshing every {}s, Ctrl+C to stop)", interval_secs.max(1));
                    }
                    Err(ApiError::Unauthorized) => {
                        return Err(ApiError::Unauthorized.into());
                    }
                    Err(e) => {
                        warn!("Stats refresh failed: {}", e);
                    }
                }
            }
            _ = &mut shutdown => {
                println!();
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> DashboardStats {
        DashboardStats {
            total_properties: 120,
            total_agents: 8,
            total_users: 340,
            total_inquiries: 45,
            property_status: Some(PropertyStatusBreakdown {
                active: 40,
                sold: 30,
                rented: 20,
                inactive: 0,
                under_review: 10,
                total: 100,
            }),
            top_selling_agent: Some(AgentPerformance {
                agent_id: Some(7),
                agent_name: "Priya Sharma".to_string(),
                agent_email: Some("priya@propconnect.example".to_string()),
                agent_phone: None,
                count: 12,
            }),
            least_active_agent: None,
        }
    }

    #[test]
    fn test_percent_guards_division_by_zero() {
        assert_eq!(percent(5, 0), 0.0);
        assert!((percent(1, 3) - 33.333).abs() < 0.01);
        assert_eq!(percent(50, 100), 50.0);
    }

    #[test]
    fn test_render_includes_counts_and_breakdown() {
        let text = render(&stats());
        assert!(text.contains("Properties: 120"));
        assert!(text.contains("Inquiries:  45"));
        assert!(text.contains("Sold"));
        assert!(text.contains("40.0%")); // active 40/100
        assert!(text.contains("Priya Sharma (12 sold)"));
    }

    #[test]
    fn test_zero_valued_slices_are_omitted() {
        let text = render(&stats());
        assert!(!text.contains("Inactive"));

        let slices = status_slices(&stats().property_status.unwrap());
        assert_eq!(slices.len(), 4);
    }

    #[test]
    fn test_render_without_optional_sections() {
        let bare = DashboardStats {
            total_properties: 1,
            ..Default::default()
        };
        let text = render(&bare);
        assert!(text.contains("Properties: 1"));
        assert!(!text.contains("Property Status"));
        assert!(!text.contains("Agent"));
    }
}
