//! Transaction aggregation engine.
//!
//! Folds each assignee's expense lines into one `PersonAggregate` per
//! unique employee id. Pure function over its input: fresh state per call,
//! no I/O.

use std::collections::HashMap;

use super::error::RecapError;
use super::types::{
    AllowancePolicy, Assignee, PaymentClass, PersonAggregate, RawTransaction, RecapReport,
    SheetVariant, TransactionCategory, TransportLeg, TripMetadata, VariantTotals,
};

/// Aggregates keyed by employee id, preserving first-appearance order.
///
/// Row numbers on the rendered sheets come from this order, so it is kept
/// explicitly instead of relying on map iteration order.
#[derive(Debug, Default)]
pub struct RecapAggregates {
    order: Vec<String>,
    by_employee: HashMap<String, PersonAggregate>,
}

impl RecapAggregates {
    /// Returns the aggregate for an employee id, if present.
    #[must_use]
    pub fn get(&self, employee_id: &str) -> Option<&PersonAggregate> {
        self.by_employee.get(employee_id)
    }

    /// Iterates aggregates in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = &PersonAggregate> {
        self.order
            .iter()
            .filter_map(|id| self.by_employee.get(id))
    }

    /// Number of distinct employees aggregated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no employee materialized an aggregate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn entry(&mut self, assignee: &Assignee, policy: &AllowancePolicy) -> &mut PersonAggregate {
        if !self.by_employee.contains_key(&assignee.employee_id) {
            self.order.push(assignee.employee_id.clone());
        }
        self.by_employee
            .entry(assignee.employee_id.clone())
            .or_insert_with(|| PersonAggregate::new(assignee, policy))
    }
}

/// Aggregation and projection entry points.
pub struct RecapService;

impl RecapService {
    /// Folds all assignees' transactions into per-employee aggregates.
    ///
    /// Assignees with an empty employee id are skipped; a transaction with
    /// `subtotal <= 0` never changes any aggregate field. An employee whose
    /// every transaction is filtered never materializes an aggregate.
    ///
    /// # Errors
    ///
    /// Returns `RecapError::EmptyAssignees` when no assignees are supplied.
    pub fn aggregate(
        assignees: &[Assignee],
        policy: &AllowancePolicy,
    ) -> Result<RecapAggregates, RecapError> {
        if assignees.is_empty() {
            return Err(RecapError::EmptyAssignees);
        }

        let mut aggregates = RecapAggregates::default();

        for assignee in assignees {
            if assignee.employee_id.is_empty() {
                continue;
            }

            for tx in &assignee.transactions {
                // Zero/negative subtotals are extraction noise.
                if tx.subtotal <= 0 {
                    continue;
                }

                let aggregate = aggregates.entry(assignee, policy);
                fold_transaction(aggregate, tx);
            }
        }

        Ok(aggregates)
    }

    /// Validates metadata, aggregates, and projects both sheet variants.
    ///
    /// # Errors
    ///
    /// Returns `RecapError` on invalid date ordering or empty input.
    pub fn build_report(
        metadata: &TripMetadata,
        assignees: &[Assignee],
        policy: &AllowancePolicy,
    ) -> Result<RecapReport, RecapError> {
        metadata.validate()?;
        let aggregates = Self::aggregate(assignees, policy)?;

        Ok(RecapReport {
            metadata: metadata.clone(),
            advance_rows: Self::project(&aggregates, metadata, SheetVariant::Advance),
            settlement_rows: Self::project(&aggregates, metadata, SheetVariant::Settlement),
        })
    }
}

fn fold_transaction(aggregate: &mut PersonAggregate, tx: &RawTransaction) {
    match tx.category {
        TransactionCategory::Accommodation => match tx.payment_class {
            // An advance-paid night is always also part of the final
            // settlement, so advance lines accumulate into both variants.
            PaymentClass::Advance => {
                apply_lodging(&mut aggregate.advance, tx);
                apply_lodging(&mut aggregate.settlement, tx);
            }
            PaymentClass::Settlement => apply_lodging(&mut aggregate.settlement, tx),
        },
        TransactionCategory::Transport => match tx.payment_class {
            PaymentClass::Advance => {
                apply_transport(&mut aggregate.advance, tx);
                apply_transport(&mut aggregate.settlement, tx);
            }
            PaymentClass::Settlement => apply_transport(&mut aggregate.settlement, tx),
        },
        // Residual bucket; feeds other_total for the line's own
        // classification only.
        TransactionCategory::Allowance | TransactionCategory::Other => match tx.payment_class {
            PaymentClass::Advance => aggregate.advance.other_total += tx.subtotal,
            PaymentClass::Settlement => aggregate.settlement.other_total += tx.subtotal,
        },
    }

    aggregate.advance.recompute_grand_total();
    aggregate.settlement.recompute_grand_total();
}

fn apply_lodging(totals: &mut VariantTotals, tx: &RawTransaction) {
    if let Some(nights) = tx.total_nights {
        if nights > 0 {
            totals.lodging_nights += nights;
        }
    }
    // Last write wins: extraction may emit one line per night-block and
    // later entries are assumed authoritative.
    if tx.amount > 0 {
        totals.lodging_rate_per_night = tx.amount;
    }
    totals.lodging_total += tx.subtotal;
}

fn apply_transport(totals: &mut VariantTotals, tx: &RawTransaction) {
    if tx.is_flight() {
        totals.flight_total += tx.subtotal;
    }

    if tx.is_ground_vehicle() {
        match tx.transport_leg {
            Some(TransportLeg::Origin) => totals.ground_origin_total += tx.subtotal,
            Some(TransportLeg::Region) => totals.ground_region_total += tx.subtotal,
            Some(TransportLeg::Local) => totals.ground_local_total += tx.subtotal,
            None => {}
        }
    }

    // The running transport total counts every transport line regardless
    // of sub-bucket.
    totals.transport_total += tx.subtotal;
}
