//! Report row projector.
//!
//! Converts per-employee aggregates into the display-ready rows the
//! workbook renderer consumes. Because each `PersonAggregate` holds both
//! variants, settlement rows can net against the advance figures without
//! an ordering dependency between the two projections.

use super::aggregate::{RecapAggregates, RecapService};
use super::types::{ReportRow, SheetVariant, TripMetadata};

impl RecapService {
    /// Projects aggregates into ordered rows for one sheet variant.
    ///
    /// Ordinals are assigned sequentially starting at 1 in the order
    /// aggregates first appeared. Destination and travel date come
    /// verbatim from trip metadata and are identical on every row.
    #[must_use]
    pub fn project(
        aggregates: &RecapAggregates,
        metadata: &TripMetadata,
        variant: SheetVariant,
    ) -> Vec<ReportRow> {
        aggregates
            .iter()
            .enumerate()
            .map(|(index, aggregate)| {
                let totals = match variant {
                    SheetVariant::Advance => aggregate.advance,
                    SheetVariant::Settlement => aggregate.settlement,
                };

                let (advance_grand_total, amount_payable) = match variant {
                    SheetVariant::Advance => (None, None),
                    // Settlement owed = settlement total - advance total.
                    SheetVariant::Settlement => (
                        Some(aggregate.advance.grand_total),
                        Some(aggregate.settlement.grand_total - aggregate.advance.grand_total),
                    ),
                };

                #[allow(clippy::cast_possible_truncation)]
                let ordinal = (index + 1) as u32;

                ReportRow {
                    ordinal,
                    name: aggregate.name.clone(),
                    employee_id: aggregate.employee_id.clone(),
                    position: aggregate.position.clone(),
                    rank: aggregate.rank.clone(),
                    spd_number: aggregate.spd_number.clone(),
                    destination: metadata.destination_city.clone(),
                    travel_date: metadata.departure_date,
                    totals,
                    advance_grand_total,
                    amount_payable,
                }
            })
            .collect()
    }
}
