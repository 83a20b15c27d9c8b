use crate::domain::entities::decision::ValidatedDecision;
use crate::domain::entities::player::Catalog;
use crate::domain::entities::roster::Roster;
use crate::domain::error::DomainError;
use crate::domain::values::transfer::TransferRequest;

/// Prices validated transfer pairs into the exact payload for the remote mutation.
pub struct TransferPlanner;

impl TransferPlanner {
    /// Output order matches the decision's transfer order.
    ///
    /// Any missing reference means the roster or catalog changed after
    /// validation; that is fatal for the run and never retried here.
    pub fn plan(
        validated: &ValidatedDecision,
        roster: &Roster,
        catalog: &Catalog,
    ) -> Result<Vec<TransferRequest>, DomainError> {
        if roster.membership() != validated.source_squad() {
            return Err(DomainError::StaleSnapshot(format!(
                "roster changed since validation for {}: validated {:?}, now {:?}",
                validated.gameweek(),
                validated.source_squad(),
                roster.membership()
            )));
        }

        validated
            .transfers()
            .iter()
            .map(|pair| {
                let entry = roster.get(pair.element_out).ok_or_else(|| {
                    DomainError::StaleSnapshot(format!(
                        "outgoing player {} not in roster",
                        pair.element_out
                    ))
                })?;
                let selling_price = entry
                    .selling_price
                    .or(entry.purchase_price)
                    .ok_or_else(|| {
                        DomainError::StaleSnapshot(format!(
                            "no selling or purchase price for player {}",
                            pair.element_out
                        ))
                    })?;
                let incoming = catalog.get(pair.element_in).ok_or_else(|| {
                    DomainError::StaleSnapshot(format!(
                        "incoming player {} not in catalog",
                        pair.element_in
                    ))
                })?;
                Ok(TransferRequest {
                    element_out: pair.element_out,
                    element_in: pair.element_in,
                    selling_price,
                    purchase_price: incoming.cost,
                })
            })
            .collect()
    }
}
