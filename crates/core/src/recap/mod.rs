//! Travel-expense recap: transaction aggregation and report row projection.

pub mod aggregate;
pub mod error;
pub mod project;
pub mod types;


pub use aggregate::{RecapAggregates, RecapService};
pub use error::RecapError;
pub use types::{
    AllowancePolicy, Assignee, PaymentClass, PersonAggregate, RawTransaction, RecapReport,
    ReportRow, SheetVariant, TransactionCategory, TransportLeg, TripMetadata, VariantTotals,
};
