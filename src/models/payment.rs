//! Fee invoice record.

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Partial,
    Pending,
    Overdue,
    #[serde(other)]
    Other,
}

/// Invoice document from the `payments` collection. `student` holds the
/// external student id, not an ObjectId. All amounts are untrusted input;
/// `remaining_amount` is stored denormalized and passed through as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub student: String,
    pub invoice_number: String,
    pub term: String,
    pub academic_year: String,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(default)]
    pub remaining_amount: f64,
    pub payment_status: PaymentStatus,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    pub id: String,
    pub invoice_number: String,
    pub term: String,
    pub academic_year: String,
    pub total: f64,
    pub paid_amount: f64,
    pub remaining_amount: f64,
    pub payment_status: PaymentStatus,
    pub date: DateTime<Utc>,
}

impl From<&Payment> for PaymentView {
    fn from(p: &Payment) -> Self {
        Self {
            id: p.id.to_hex(),
            invoice_number: p.invoice_number.clone(),
            term: p.term.clone(),
            academic_year: p.academic_year.clone(),
            total: p.total,
            paid_amount: p.paid_amount,
            remaining_amount: p.remaining_amount,
            payment_status: p.payment_status,
            date: p.date,
        }
    }
}
