//! Recap data types.
//!
//! All currency amounts are integer rupiah. Classification strings coming
//! from extraction or API callers are normalized into enums exactly once,
//! here, and never re-parsed at accumulation sites.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::RecapError;

/// Expense category of a transaction line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategory {
    /// Lodging (hotel) line.
    Accommodation,
    /// Flight or ground transport line.
    Transport,
    /// Daily allowance line.
    Allowance,
    /// Anything else.
    Other,
}

impl TransactionCategory {
    /// Parses a free-text category label. Unknown labels map to `Other`.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "accommodation" => Self::Accommodation,
            "transport" => Self::Transport,
            "allowance" => Self::Allowance,
            _ => Self::Other,
        }
    }
}

/// Which of the two recap sheets a transaction's value contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentClass {
    /// Paid in advance ("uang muka"); contributes to both sheets.
    Advance,
    /// Reconciled after travel ("rampung"); contributes to the
    /// settlement sheet only.
    Settlement,
}

impl PaymentClass {
    /// Parses the source label. The upstream data carries both
    /// `"uang muka"` and `"uang_muka"` spellings; anything else
    /// (including an empty label) is a settlement line.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        let normalized = label.trim().to_lowercase().replace('_', " ");
        match normalized.as_str() {
            "uang muka" | "advance" => Self::Advance,
            _ => Self::Settlement,
        }
    }
}

/// Ground-transport leg classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportLeg {
    /// Touches the trip's origin airport/city ("transport_asal").
    Origin,
    /// Within the destination region ("transport_daerah").
    Region,
    /// Other ground legs ("transport_darat").
    Local,
}

impl TransportLeg {
    /// Parses the source label; unknown or empty labels yield `None`.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase().replace(' ', "_");
        match normalized.as_str() {
            "transport_asal" => Some(Self::Origin),
            "transport_daerah" => Some(Self::Region),
            "transport_darat" => Some(Self::Local),
            _ => None,
        }
    }
}

/// One extracted expense line item. Immutable once built; consumed exactly
/// once by the aggregation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTransaction {
    /// Payer/traveler name as matched to the trip roster.
    pub name: String,
    /// Expense category.
    pub category: TransactionCategory,
    /// Free-text subtype, e.g. "hotel", "flight", "taxi".
    pub subtype: String,
    /// Unit amount in rupiah (per-night rate for accommodation).
    pub amount: i64,
    /// Number of nights; meaningful only for accommodation.
    pub total_nights: Option<i64>,
    /// Line total in rupiah, independently supplied by extraction.
    pub subtotal: i64,
    /// Advance vs settlement classification.
    pub payment_class: PaymentClass,
    /// Free-text description of the line.
    pub description: String,
    /// Ground-transport leg, when applicable.
    pub transport_leg: Option<TransportLeg>,
}

impl RawTransaction {
    /// True for air-travel transport lines.
    #[must_use]
    pub fn is_flight(&self) -> bool {
        self.subtype.trim().eq_ignore_ascii_case("flight")
    }

    /// True for ground-vehicle transport lines that bucket by leg.
    #[must_use]
    pub fn is_ground_vehicle(&self) -> bool {
        matches!(
            self.subtype.trim().to_lowercase().as_str(),
            "taxi" | "grab" | "gojek"
        )
    }
}

/// One traveling employee and their roster identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignee {
    /// Employee name.
    pub name: String,
    /// Travel-order (SPD) number.
    pub spd_number: String,
    /// Employee id (NIP); the de-duplication key across assignees.
    pub employee_id: String,
    /// Position title.
    pub position: String,
    /// Civil-service rank ("golongan").
    pub rank: String,
    /// Expense lines attributed to this employee.
    pub transactions: Vec<RawTransaction>,
}

/// Daily-allowance policy supplied to the aggregation engine.
///
/// The rates differ per jurisdiction and budget year, so they are an input
/// rather than constants baked into the fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowancePolicy {
    /// Number of allowance days per trip.
    pub days: i64,
    /// Allowance rate per day in rupiah.
    pub rate_per_day: i64,
}

impl AllowancePolicy {
    /// Total allowance per employee.
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.days * self.rate_per_day
    }
}

impl Default for AllowancePolicy {
    fn default() -> Self {
        Self {
            days: 2,
            rate_per_day: 688_000,
        }
    }
}

/// One side (advance or settlement) of a person's derived figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantTotals {
    /// Allowance days (from policy, identical for every employee).
    pub allowance_days: i64,
    /// Allowance rate per day (from policy).
    pub allowance_rate_per_day: i64,
    /// Allowance total (days x rate).
    pub allowance_total: i64,
    /// Sum of lodging nights.
    pub lodging_nights: i64,
    /// Per-night lodging rate; last non-zero amount wins.
    pub lodging_rate_per_night: i64,
    /// Sum of lodging subtotals.
    pub lodging_total: i64,
    /// Sum of flight subtotals.
    pub flight_total: i64,
    /// Ground transport touching the origin airport/city.
    pub ground_origin_total: i64,
    /// Ground transport within the destination region.
    pub ground_region_total: i64,
    /// Other ground transport.
    pub ground_local_total: i64,
    /// Sum of ALL transport subtotals (flight + ground, bucketed or not).
    pub transport_total: i64,
    /// Residual bucket for allowance/other lines. Tracked but excluded
    /// from `grand_total`; see DESIGN.md.
    pub other_total: i64,
    /// allowance_total + lodging_total + transport_total, recomputed
    /// after every fold.
    pub grand_total: i64,
}

impl VariantTotals {
    /// Seeds a fresh variant with the allowance figures. The allowance is
    /// never derived from transactions; every employee carries it.
    #[must_use]
    pub fn seeded(policy: &AllowancePolicy) -> Self {
        Self {
            allowance_days: policy.days,
            allowance_rate_per_day: policy.rate_per_day,
            allowance_total: policy.total(),
            ..Self::default()
        }
    }

    /// Recomputes the grand total from the three structured buckets.
    pub fn recompute_grand_total(&mut self) {
        self.grand_total = self.allowance_total + self.lodging_total + self.transport_total;
    }
}

/// One record of derived totals per unique employee, holding both the
/// advance and settlement figure sets in parallel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonAggregate {
    /// Employee name (from the assignee that first created the record).
    pub name: String,
    /// Employee id (NIP).
    pub employee_id: String,
    /// Position title.
    pub position: String,
    /// Civil-service rank.
    pub rank: String,
    /// Travel-order number.
    pub spd_number: String,
    /// Advance figures.
    pub advance: VariantTotals,
    /// Settlement figures.
    pub settlement: VariantTotals,
}

impl PersonAggregate {
    /// Creates a fresh aggregate for an assignee with both variants seeded
    /// from the allowance policy.
    #[must_use]
    pub fn new(assignee: &Assignee, policy: &AllowancePolicy) -> Self {
        let mut advance = VariantTotals::seeded(policy);
        let mut settlement = VariantTotals::seeded(policy);
        advance.recompute_grand_total();
        settlement.recompute_grand_total();

        Self {
            name: assignee.name.clone(),
            employee_id: assignee.employee_id.clone(),
            position: assignee.position.clone(),
            rank: assignee.rank.clone(),
            spd_number: assignee.spd_number.clone(),
            advance,
            settlement,
        }
    }
}

/// Trip-level constants shared by all rows on a sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripMetadata {
    /// Assignment start date.
    pub start_date: NaiveDate,
    /// Assignment end date.
    pub end_date: NaiveDate,
    /// Travel-order issue date.
    pub spd_date: NaiveDate,
    /// Departure date.
    pub departure_date: NaiveDate,
    /// Return date.
    pub return_date: NaiveDate,
    /// Receipt signature date, verbatim from the source document.
    pub receipt_signature_date: String,
    /// Destination city.
    pub destination_city: String,
    /// Activity purpose from the travel order.
    pub activity_purpose: String,
}

impl TripMetadata {
    /// Validates cross-field date ordering.
    pub fn validate(&self) -> Result<(), RecapError> {
        if self.start_date > self.end_date {
            return Err(RecapError::InvalidDateRange {
                label: "assignment",
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.departure_date > self.return_date {
            return Err(RecapError::InvalidDateRange {
                label: "travel",
                start: self.departure_date,
                end: self.return_date,
            });
        }
        Ok(())
    }
}

/// Which recap sheet a projected row targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetVariant {
    /// Advance-payment recap ("uang muka").
    Advance,
    /// Settlement recap ("rampung").
    Settlement,
}

/// The projected, display-ready structure consumed by the workbook
/// renderer. One row per `PersonAggregate`, in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// 1-based row number.
    pub ordinal: u32,
    /// Employee name.
    pub name: String,
    /// Employee id (NIP).
    pub employee_id: String,
    /// Position title.
    pub position: String,
    /// Civil-service rank.
    pub rank: String,
    /// Travel-order number.
    pub spd_number: String,
    /// Destination city, verbatim from trip metadata.
    pub destination: String,
    /// Travel date (departure), verbatim from trip metadata.
    pub travel_date: NaiveDate,
    /// Figures for the targeted sheet variant.
    pub totals: VariantTotals,
    /// Advance grand total; populated on settlement rows for netting.
    pub advance_grand_total: Option<i64>,
    /// Settlement grand total minus advance grand total; settlement rows
    /// only.
    pub amount_payable: Option<i64>,
}

/// A fully projected recap ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecapReport {
    /// Trip-level constants.
    pub metadata: TripMetadata,
    /// Rows for the advance sheet.
    pub advance_rows: Vec<ReportRow>,
    /// Rows for the settlement sheet.
    pub settlement_rows: Vec<ReportRow>,
}

#[cfg(test)]
mod parse_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("accommodation", TransactionCategory::Accommodation)]
    #[case("Accommodation", TransactionCategory::Accommodation)]
    #[case("TRANSPORT", TransactionCategory::Transport)]
    #[case("allowance", TransactionCategory::Allowance)]
    #[case("other", TransactionCategory::Other)]
    #[case("mystery", TransactionCategory::Other)]
    #[case("", TransactionCategory::Other)]
    fn test_category_parse(#[case] label: &str, #[case] expected: TransactionCategory) {
        assert_eq!(TransactionCategory::parse(label), expected);
    }

    #[rstest]
    #[case("uang muka", PaymentClass::Advance)]
    #[case("uang_muka", PaymentClass::Advance)]
    #[case("Uang Muka", PaymentClass::Advance)]
    #[case("advance", PaymentClass::Advance)]
    #[case("rampung", PaymentClass::Settlement)]
    #[case("settlement", PaymentClass::Settlement)]
    #[case("", PaymentClass::Settlement)]
    fn test_payment_class_parse(#[case] label: &str, #[case] expected: PaymentClass) {
        assert_eq!(PaymentClass::parse(label), expected);
    }

    #[rstest]
    #[case("transport_asal", Some(TransportLeg::Origin))]
    #[case("Transport Asal", Some(TransportLeg::Origin))]
    #[case("transport_daerah", Some(TransportLeg::Region))]
    #[case("transport_darat", Some(TransportLeg::Local))]
    #[case("", None)]
    #[case("pesawat", None)]
    fn test_transport_leg_parse(#[case] label: &str, #[case] expected: Option<TransportLeg>) {
        assert_eq!(TransportLeg::parse(label), expected);
    }

    #[test]
    fn test_allowance_policy_total() {
        let policy = AllowancePolicy::default();
        assert_eq!(policy.total(), 1_376_000);

        let custom = AllowancePolicy {
            days: 3,
            rate_per_day: 500_000,
        };
        assert_eq!(custom.total(), 1_500_000);
    }

    #[test]
    fn test_trip_metadata_validate() {
        let mut metadata = TripMetadata {
            start_date: NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 10, 22).unwrap(),
            spd_date: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
            departure_date: NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2025, 10, 22).unwrap(),
            receipt_signature_date: "22 Oktober 2025".to_string(),
            destination_city: "Surabaya".to_string(),
            activity_purpose: "Monitoring dan Evaluasi".to_string(),
        };
        assert!(metadata.validate().is_ok());

        metadata.return_date = NaiveDate::from_ymd_opt(2025, 10, 19).unwrap();
        assert!(matches!(
            metadata.validate(),
            Err(RecapError::InvalidDateRange { label: "travel", .. })
        ));
    }
}
