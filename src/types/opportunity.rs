//! Scored arbitrage opportunity types

use chrono::{DateTime, Utc};
use serde::Serialize;
use super::{Quote, TokenRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OpportunityKind {
    Triangular,
    CrossVenue,
}

/// A scored price discrepancy found during one scan tick.
///
/// Value object: produced fresh each tick, never mutated. `profitable` is
/// derived from `profit_pct` against the profitability floor at construction
/// and has no other source of truth.
#[derive(Debug, Clone, Serialize)]
pub struct Opportunity {
    pub id: String,
    pub kind: OpportunityKind,
    /// Ordered leg quotes: a closed 3-cycle for Triangular, exactly two
    /// (buy venue first, sell venue second) for CrossVenue.
    pub legs: Vec<Quote>,
    /// Venue names in leg order; a single entry for Triangular.
    pub venues: Vec<String>,
    pub profit_pct: f64,
    pub profitable: bool,
    pub detected_at: DateTime<Utc>,
}

impl Opportunity {
    pub fn new(
        kind: OpportunityKind,
        legs: Vec<Quote>,
        venues: Vec<String>,
        profit_pct: f64,
        profit_floor_pct: f64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            legs,
            venues,
            profit_pct,
            // Strict inequality: the floor itself is not profitable
            profitable: profit_pct > profit_floor_pct,
            detected_at: Utc::now(),
        }
    }

    /// The token the cycle starts (and for triangular, ends) with.
    pub fn principal(&self) -> &TokenRef {
        &self.legs[0].token_in
    }

    /// Human-readable path, e.g. `WCORE → ICE → SCORE → WCORE` or
    /// `WCORE/ICE icecreamswap → archerswap`.
    pub fn path_label(&self) -> String {
        match self.kind {
            OpportunityKind::Triangular => {
                let mut out = String::new();
                for leg in &self.legs {
                    out.push_str(&leg.token_in.symbol);
                    out.push_str(" → ");
                }
                out.push_str(&self.legs[0].token_in.symbol);
                out
            }
            OpportunityKind::CrossVenue => format!(
                "{}/{} {} → {}",
                self.legs[0].token_in.symbol,
                self.legs[0].token_out.symbol,
                self.venues[0],
                self.venues[1],
            ),
        }
    }
}
