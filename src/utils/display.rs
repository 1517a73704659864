//! Display and printing utilities

use tracing::{error, info, warn};
use crate::types::{
    ExecutionResult, ExecutionStatus, Opportunity, OpportunityKind, ScanStats,
};

pub fn print_opportunity(opp: &Opportunity) {
    let kind = match opp.kind {
        OpportunityKind::Triangular => "TRIANGULAR",
        OpportunityKind::CrossVenue => "CROSS-VENUE",
    };

    if opp.profitable {
        warn!("\n🎯 {} OPPORTUNITY #{}", kind, opp.id);
        warn!("📍 Path: {}", opp.path_label());
        warn!("💰 Profit: {:.3}%", opp.profit_pct);
        for leg in &opp.legs {
            warn!(
                "   {} | {} {} → {} {}",
                leg.venue, leg.amount_in, leg.token_in.symbol, leg.amount_out, leg.token_out.symbol
            );
        }
    } else {
        // Near-miss: above the reporting floor but below the profit floor.
        // Visible for tuning, never actionable.
        info!(
            "🔎 near-miss {} {} at {:.3}%",
            kind.to_lowercase(),
            opp.path_label(),
            opp.profit_pct
        );
    }
}

pub fn print_execution_result(result: &ExecutionResult) {
    match result.status {
        ExecutionStatus::Executed => {
            warn!("\n✅ EXECUTED #{}", result.id);
            warn!("📍 Path: {}", result.opportunity.path_label());
            warn!("💰 Expected Profit: {:.3}%", result.opportunity.profit_pct);
            if let Some(gas) = result.gas_cost_estimate {
                warn!("⛽ Gas Estimate: {:.6} CORE", gas);
            }
        }
        ExecutionStatus::Simulated => {
            info!(
                "📊 SIMULATION ONLY - {} at {:.3}% ({})",
                result.opportunity.path_label(),
                result.opportunity.profit_pct,
                result.reason.as_deref().unwrap_or("read-only mode"),
            );
        }
        ExecutionStatus::Skipped => {
            info!(
                "⏭️  skipped {} - {}",
                result.opportunity.path_label(),
                result.reason.as_deref().unwrap_or("unspecified"),
            );
        }
        ExecutionStatus::Failed => {
            error!(
                "❌ decision failed for {} - {}",
                result.opportunity.path_label(),
                result.reason.as_deref().unwrap_or("unknown error"),
            );
        }
    }
}

pub fn print_summary(stats: &ScanStats, ledger_len: usize, uptime_secs: u64) {
    info!("\n📈 Session Statistics ({} minutes)", uptime_secs / 60);
    info!("   Scans: {}", stats.scan_count);
    info!("   Opportunities found: {}", stats.opportunities_found);
    info!("   Executed: {}", stats.executed_count);
    info!("   Ledger entries: {}", ledger_len);
    info!(
        "   Simulated profit: {:.4} (sum of profit fractions, not settled PnL)",
        stats.simulated_profit_accum
    );
}
