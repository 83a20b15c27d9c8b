use crate::domain::entities::decision::ValidatedDecision;
use crate::domain::entities::player::{Catalog, PlayerId};
use crate::domain::entities::roster::AccountSnapshot;
use crate::domain::values::execution::{ExecutionMode, ExecutionReport};
use crate::domain::values::game_rules::GameRules;
use std::fmt::Write;

/// Inputs for the operator-facing run summary.
pub struct RunSummary<'a> {
    pub mode: ExecutionMode,
    pub decision: &'a ValidatedDecision,
    pub account: &'a AccountSnapshot,
    pub catalog: &'a Catalog,
    pub rules: &'a GameRules,
    pub execution: Option<&'a ExecutionReport>,
}

impl RunSummary<'_> {
    pub fn render(&self) -> String {
        let d = self.decision;
        let name = |id: PlayerId| self.catalog.name_of(id);
        let mut out = String::new();

        let _ = writeln!(out, "{} | mode: {}", d.gameweek(), self.mode);
        if let Some(report) = self.execution {
            let _ = writeln!(out, "Outcome: {} (run {})", report.outcome(), report.run_id);
        }

        let _ = writeln!(out, "\nChip: {}", d.chip());

        let _ = writeln!(out, "\nTransfers:");
        if d.transfers().is_empty() {
            let _ = writeln!(out, "  none");
        }
        for pair in d.transfers() {
            let _ = writeln!(out, "  OUT {} -> IN {}", name(pair.element_out), name(pair.element_in));
        }

        let order = self.projected_order();
        let (starters, bench) = order.split_at(self.rules.starting_size.min(order.len()));
        let _ = writeln!(out, "\nStarting XI:");
        for id in starters {
            let _ = writeln!(out, "  {}", self.describe(*id));
        }
        let _ = writeln!(out, "\nBench:");
        for id in bench {
            let _ = writeln!(out, "  {}", self.describe(*id));
        }

        let armband = |id: Option<PlayerId>| id.map(name).unwrap_or_else(|| "unchanged".into());
        let _ = writeln!(
            out,
            "\nCaptain: {} | Vice: {}",
            armband(d.captain_id()),
            armband(d.vice_captain_id())
        );

        if !d.advisories().is_empty() {
            let _ = writeln!(out, "\nAdvisories:");
            for advisory in d.advisories() {
                let _ = writeln!(out, "  - {advisory}");
            }
        }

        if !d.reasoning().is_empty() {
            let _ = writeln!(out, "\nRationale:\n  {}", d.reasoning());
        }

        let _ = write!(out, "\nBank: {}", self.bank_line());
        out
    }

    /// Squad in slot order after the decision: the explicit ordering if given,
    /// otherwise the current slots with incoming players in their predecessors' places.
    fn projected_order(&self) -> Vec<PlayerId> {
        if let Some(order) = self.decision.lineup_order() {
            return order.to_vec();
        }
        self.account
            .roster
            .ids()
            .into_iter()
            .map(|id| {
                self.decision
                    .transfers()
                    .iter()
                    .find(|t| t.element_out == id)
                    .map_or(id, |t| t.element_in)
            })
            .collect()
    }

    fn describe(&self, id: PlayerId) -> String {
        match self.catalog.get(id) {
            Some(p) => format!("{} ({}, {})", p.web_name, p.position.short_name(), p.status),
            None => id.to_string(),
        }
    }

    fn bank_line(&self) -> String {
        let Some(bank) = self.account.bank else {
            return "unknown".into();
        };
        let mut after = bank as i64;
        for pair in self.decision.transfers() {
            let sell = self
                .account
                .roster
                .get(pair.element_out)
                .and_then(|e| e.selling_price.or(e.purchase_price));
            let buy = self.catalog.get(pair.element_in).map(|p| p.cost);
            match (sell, buy) {
                (Some(sell), Some(buy)) => after += sell as i64 - buy as i64,
                _ => return format!("{} before transfers", money(bank as i64)),
            }
        }
        format!("{} -> {}", money(bank as i64), money(after))
    }
}

/// Tenths of a currency unit as "£x.ym".
fn money(tenths: i64) -> String {
    let sign = if tenths < 0 { "-" } else { "" };
    let abs = tenths.unsigned_abs();
    format!("{sign}£{}.{}m", abs / 10, abs % 10)
}
