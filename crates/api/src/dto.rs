//! Wire DTOs shared by the extraction and report endpoints.
//!
//! The frontend receives the extraction output and posts it back to the
//! report endpoint, so both sides speak the same shape: camelCase trip
//! fields, snake_case assignee/transaction fields, free-text
//! classification labels. Normalization into domain enums happens here,
//! once.

use serde::{Deserialize, Serialize};

use perjadin_core::extract::TripReport;
use perjadin_core::recap::{
    Assignee, PaymentClass, RawTransaction, TransactionCategory, TransportLeg, TripMetadata,
};
use perjadin_shared::AppError;
use perjadin_shared::datetime::parse_iso_date;

use crate::error::ApiError;

/// Trip report as it travels over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripReportDto {
    /// Assignment start date (`YYYY-MM-DD`).
    pub start_date: String,
    /// Assignment end date (`YYYY-MM-DD`).
    pub end_date: String,
    /// Activity purpose from the travel order.
    #[serde(default)]
    pub activity_purpose: String,
    /// Destination city.
    #[serde(default)]
    pub destination_city: String,
    /// Travel-order issue date (`YYYY-MM-DD`).
    pub spd_date: String,
    /// Departure date (`YYYY-MM-DD`).
    pub departure_date: String,
    /// Return date (`YYYY-MM-DD`).
    pub return_date: String,
    /// Receipt signature date, free text.
    #[serde(default)]
    pub receipt_signature_date: String,
    /// Assignees with grouped transactions.
    #[serde(default)]
    pub assignees: Vec<AssigneeDto>,
}

/// One assignee on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssigneeDto {
    /// Employee name.
    #[serde(default)]
    pub name: String,
    /// Travel-order number.
    #[serde(default)]
    pub spd_number: String,
    /// Employee id (NIP).
    #[serde(default)]
    pub employee_id: String,
    /// Position title.
    #[serde(default)]
    pub position: String,
    /// Civil-service rank.
    #[serde(default)]
    pub rank: String,
    /// Expense lines.
    #[serde(default)]
    pub transactions: Vec<TransactionDto>,
}

/// One expense line on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDto {
    /// Payer name.
    #[serde(default)]
    pub name: String,
    /// Free-text category label ("accommodation" | "transport" | ...).
    #[serde(rename = "type", default)]
    pub category: String,
    /// Free-text subtype ("hotel", "flight", "taxi", ...).
    #[serde(default)]
    pub subtype: String,
    /// Unit amount in rupiah.
    #[serde(default)]
    pub amount: i64,
    /// Nights, for accommodation lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_night: Option<i64>,
    /// Line total in rupiah.
    #[serde(default)]
    pub subtotal: i64,
    /// Payment classification label ("uang muka" | "rampung" | ...).
    #[serde(default)]
    pub payment_type: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Ground-transport leg label ("transport_asal" | ...).
    #[serde(default)]
    pub transport_detail: String,
}

impl TripReportDto {
    /// Parses and normalizes the wire shape into domain types.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the field when a date fails to
    /// parse.
    pub fn into_domain(self) -> Result<(TripMetadata, Vec<Assignee>), ApiError> {
        let date = |field: &str, value: &str| {
            parse_iso_date(value)
                .map_err(|e| ApiError(AppError::Validation(format!("{field}: {e}"))))
        };

        let metadata = TripMetadata {
            start_date: date("startDate", &self.start_date)?,
            end_date: date("endDate", &self.end_date)?,
            spd_date: date("spdDate", &self.spd_date)?,
            departure_date: date("departureDate", &self.departure_date)?,
            return_date: date("returnDate", &self.return_date)?,
            receipt_signature_date: self.receipt_signature_date,
            destination_city: self.destination_city,
            activity_purpose: self.activity_purpose,
        };

        let assignees = self
            .assignees
            .into_iter()
            .map(|a| Assignee {
                name: a.name,
                spd_number: a.spd_number,
                employee_id: a.employee_id,
                position: a.position,
                rank: a.rank,
                transactions: a
                    .transactions
                    .into_iter()
                    .map(|t| RawTransaction {
                        name: t.name,
                        category: TransactionCategory::parse(&t.category),
                        subtype: t.subtype,
                        amount: t.amount,
                        total_nights: t.total_night,
                        subtotal: t.subtotal,
                        payment_class: PaymentClass::parse(&t.payment_type),
                        description: t.description,
                        transport_leg: TransportLeg::parse(&t.transport_detail),
                    })
                    .collect(),
            })
            .collect();

        Ok((metadata, assignees))
    }
}

impl From<&TripReport> for TripReportDto {
    fn from(report: &TripReport) -> Self {
        let iso = |d: chrono::NaiveDate| d.format("%Y-%m-%d").to_string();
        let metadata = &report.metadata;

        Self {
            start_date: iso(metadata.start_date),
            end_date: iso(metadata.end_date),
            activity_purpose: metadata.activity_purpose.clone(),
            destination_city: metadata.destination_city.clone(),
            spd_date: iso(metadata.spd_date),
            departure_date: iso(metadata.departure_date),
            return_date: iso(metadata.return_date),
            receipt_signature_date: metadata.receipt_signature_date.clone(),
            assignees: report
                .assignees
                .iter()
                .map(|a| AssigneeDto {
                    name: a.name.clone(),
                    spd_number: a.spd_number.clone(),
                    employee_id: a.employee_id.clone(),
                    position: a.position.clone(),
                    rank: a.rank.clone(),
                    transactions: a
                        .transactions
                        .iter()
                        .map(|t| TransactionDto {
                            name: t.name.clone(),
                            category: category_label(t.category).to_string(),
                            subtype: t.subtype.clone(),
                            amount: t.amount,
                            total_night: t.total_nights,
                            subtotal: t.subtotal,
                            payment_type: payment_label(t.payment_class).to_string(),
                            description: t.description.clone(),
                            transport_detail: leg_label(t.transport_leg).to_string(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

fn category_label(category: TransactionCategory) -> &'static str {
    match category {
        TransactionCategory::Accommodation => "accommodation",
        TransactionCategory::Transport => "transport",
        TransactionCategory::Allowance => "allowance",
        TransactionCategory::Other => "other",
    }
}

fn payment_label(class: PaymentClass) -> &'static str {
    match class {
        PaymentClass::Advance => "uang muka",
        PaymentClass::Settlement => "rampung",
    }
}

fn leg_label(leg: Option<TransportLeg>) -> &'static str {
    match leg {
        Some(TransportLeg::Origin) => "transport_asal",
        Some(TransportLeg::Region) => "transport_daerah",
        Some(TransportLeg::Local) => "transport_darat",
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "startDate": "2025-10-20",
            "endDate": "2025-10-22",
            "activityPurpose": "Monev",
            "destinationCity": "Surabaya",
            "spdDate": "2025-10-15",
            "departureDate": "2025-10-20",
            "returnDate": "2025-10-22",
            "receiptSignatureDate": "22 Oktober 2025",
            "assignees": [{
                "name": "Budi Santoso",
                "spd_number": "SPD-001",
                "employee_id": "197001011990031001",
                "position": "Analis Kebijakan",
                "rank": "III/c",
                "transactions": [{
                    "name": "Budi Santoso",
                    "type": "accommodation",
                    "subtype": "hotel",
                    "amount": 300000,
                    "total_night": 2,
                    "subtotal": 600000,
                    "payment_type": "uang_muka",
                    "description": "Hotel",
                    "transport_detail": ""
                }]
            }]
        })
    }

    #[test]
    fn test_into_domain_normalizes_labels() {
        let dto: TripReportDto = serde_json::from_value(sample_json()).unwrap();
        let (metadata, assignees) = dto.into_domain().expect("should map");

        assert_eq!(metadata.destination_city, "Surabaya");
        let tx = &assignees[0].transactions[0];
        assert_eq!(tx.category, TransactionCategory::Accommodation);
        // Underscore spelling normalizes to the same class.
        assert_eq!(tx.payment_class, PaymentClass::Advance);
        assert_eq!(tx.transport_leg, None);
    }

    #[test]
    fn test_into_domain_rejects_bad_date() {
        let mut json = sample_json();
        json["spdDate"] = serde_json::json!("15 Oktober 2025");
        let dto: TripReportDto = serde_json::from_value(json).unwrap();
        let err = dto.into_domain().unwrap_err();
        assert_eq!(err.0.status_code(), 400);
        assert!(err.0.to_string().contains("spdDate"));
    }

    #[test]
    fn test_wire_round_trip_preserves_classification() {
        let dto: TripReportDto = serde_json::from_value(sample_json()).unwrap();
        let (metadata, assignees) = dto.into_domain().unwrap();
        let report = TripReport {
            metadata,
            assignees,
        };
        let back = TripReportDto::from(&report);
        let (_, again) = back.into_domain().unwrap();
        assert_eq!(
            again[0].transactions[0].payment_class,
            PaymentClass::Advance
        );
    }
}
