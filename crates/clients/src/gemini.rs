//! Gemini vision extraction client.
//!
//! Sends the uploaded documents inline (base64) together with an
//! Indonesian extraction prompt, and parses the model's JSON answer into
//! the domain trip report.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use perjadin_core::extract::{Document, DocumentExtractor, ExtractError, TripReport};
use perjadin_core::recap::{
    Assignee, PaymentClass, RawTransaction, TransactionCategory, TransportLeg, TripMetadata,
};
use perjadin_shared::datetime::parse_iso_date;

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client implementing `DocumentExtractor`.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client with the given key, model and request timeout.
    #[must_use]
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key,
            model,
            base_url: API_BASE_URL.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

#[async_trait]
impl DocumentExtractor for GeminiClient {
    async fn extract(&self, documents: &[Document]) -> Result<TripReport, ExtractError> {
        if self.api_key.is_empty() {
            return Err(ExtractError::NotConfigured);
        }

        let mut parts = vec![json!({ "text": extraction_prompt() })];
        for doc in documents {
            parts.push(json!({
                "inline_data": {
                    "mime_type": doc.mime_type,
                    "data": BASE64.encode(&doc.content),
                }
            }));
        }
        let body = json!({ "contents": [{ "parts": parts }] });

        debug!(documents = documents.len(), model = %self.model, "calling extraction model");

        let response = self
            .http
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractError::Upstream(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ExtractError::Upstream(e.to_string()))?;

        if !status.is_success() {
            return Err(ExtractError::Upstream(format!(
                "status {status}: {text}"
            )));
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| ExtractError::MalformedResponse(format!("response wrapper: {e}")))?;

        let raw = envelope
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| {
                ExtractError::MalformedResponse("empty candidates or parts".to_string())
            })?;

        parse_report(raw)
    }
}

/// Parses the model's (possibly fenced) JSON answer into the trip report.
pub fn parse_report(raw: &str) -> Result<TripReport, ExtractError> {
    let clean = strip_json_fences(raw);
    let wire: WireReport = serde_json::from_str(clean)
        .map_err(|e| ExtractError::MalformedResponse(format!("{e} (raw: {clean})")))?;
    wire.into_domain()
}

fn strip_json_fences(s: &str) -> &str {
    s.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```JSON")
        .trim_end_matches("```")
        .trim()
}

fn extraction_prompt() -> &'static str {
    r#"Baca semua dokumen berikut (gambar atau PDF).
Ekstrak setiap transaksi dan tampilkan dalam format JSON valid berikut ini:

{
  "startDate": "YYYY-MM-DD",
  "endDate": "YYYY-MM-DD",
  "activityPurpose": "TUJUAN_AKTIVITAS",
  "destinationCity": "KOTA_TUJUAN",
  "spdDate": "YYYY-MM-DD",
  "departureDate": "YYYY-MM-DD",
  "returnDate": "YYYY-MM-DD",
  "receiptSignatureDate": "Tanggal hari ini atau tanggal yang paling baru",
  "assignees": [
    {
      "name": "NAMA_PEGAWAI",
      "spd_number": "NOMOR_SPD",
      "employee_id": "NIP_PEGAWAI",
      "position": "JABATAN_PEGAWAI",
      "rank": "GOLONGAN_PEGAWAI",
      "transactions": [
        {
          "name": "NAMA_PEMESAN_TRANSAKSI",
          "type": "accommodation | transport | other",
          "subtype": "hotel | flight | train | taxi | ...",
          "amount": number,
          "total_night": number,
          "subtotal": number,
          "description": string,
          "transport_detail": "transport_asal | transport_daerah | transport_darat"
        }
      ]
    }
  ]
}

- Kembalikan hasil hanya dalam JSON valid (tanpa teks tambahan).
- Jangan bungkus JSON dengan tanda kutip atau karakter escape.
- Jika total_night tidak ada, field tersebut boleh dihapus.
- Pastikan angka hanya berupa digit (tanpa simbol mata uang).
- Nama pemesan transaksi harus sesuai dengan nama di surat tugas.
- Jangan menggunakan nama driver sebagai nama transaksi.
- Group semua transaksi di bawah setiap assignee."#
}

// Wire types for the model's JSON answer.

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireReport {
    start_date: String,
    end_date: String,
    #[serde(default)]
    activity_purpose: String,
    #[serde(default)]
    destination_city: String,
    spd_date: String,
    departure_date: String,
    return_date: String,
    #[serde(default)]
    receipt_signature_date: String,
    #[serde(default)]
    assignees: Vec<WireAssignee>,
}

#[derive(Deserialize)]
struct WireAssignee {
    #[serde(default)]
    name: String,
    #[serde(default)]
    spd_number: String,
    #[serde(default)]
    employee_id: String,
    #[serde(default)]
    position: String,
    #[serde(default)]
    rank: String,
    #[serde(default)]
    transactions: Vec<WireTransaction>,
}

#[derive(Deserialize)]
struct WireTransaction {
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    category: String,
    #[serde(default)]
    subtype: String,
    #[serde(default)]
    amount: i64,
    #[serde(default)]
    total_night: Option<i64>,
    #[serde(default)]
    subtotal: i64,
    #[serde(default)]
    payment_type: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    transport_detail: String,
}

impl WireReport {
    fn into_domain(self) -> Result<TripReport, ExtractError> {
        let date = |field: &str, value: &str| {
            parse_iso_date(value).map_err(|e| {
                ExtractError::MalformedResponse(format!("{field}: {e}"))
            })
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
            .map(WireAssignee::into_domain)
            .collect();

        Ok(TripReport {
            metadata,
            assignees,
        })
    }
}

impl WireAssignee {
    fn into_domain(self) -> Assignee {
        Assignee {
            name: self.name,
            spd_number: self.spd_number,
            employee_id: self.employee_id,
            position: self.position,
            rank: self.rank,
            transactions: self
                .transactions
                .into_iter()
                .map(WireTransaction::into_domain)
                .collect(),
        }
    }
}

impl WireTransaction {
    fn into_domain(self) -> RawTransaction {
        RawTransaction {
            name: self.name,
            category: TransactionCategory::parse(&self.category),
            subtype: self.subtype,
            amount: self.amount,
            total_nights: self.total_night,
            subtotal: self.subtotal,
            payment_class: PaymentClass::parse(&self.payment_type),
            description: self.description,
            transport_leg: TransportLeg::parse(&self.transport_detail),
        }
    }
}
