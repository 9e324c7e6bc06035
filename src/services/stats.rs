//! Pure statistics folds over raw per-record collections. No I/O here:
//! filtering by term or year happens upstream, which keeps these functions
//! independently testable.

use serde::Serialize;

use crate::models::payment::{Payment, PaymentStatus};
use crate::models::student::{AttendanceRecord, AttendanceStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceStats {
    pub present: usize,
    pub absent: usize,
    pub total: usize,
    pub percentage: u32,
}

/// Fold an attendance list into counts and a rounded percentage.
/// The percentage is defined as 0 for an empty list.
pub fn attendance_stats(attendance: &[AttendanceRecord]) -> AttendanceStats {
    let total = attendance.len();
    let present = attendance
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count();
    let absent = total - present;
    let percentage = if total == 0 {
        0
    } else {
        ((present as f64 / total as f64) * 100.0).round() as u32
    };
    AttendanceStats {
        present,
        absent,
        total,
        percentage,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub paid: usize,
    pub partial: usize,
    pub pending: usize,
    pub overdue: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub total_paid: f64,
    pub total_due: f64,
    pub counts: StatusCounts,
}

/// Fold a list of invoices into totals and per-status counts.
///
/// `total_paid` sums `paidAmount` across all supplied invoices regardless of
/// status; `total_due` sums the stored `remainingAmount` (untrusted input,
/// passed through as-is).
pub fn payment_summary(payments: &[Payment]) -> PaymentSummary {
    let mut summary = PaymentSummary::default();
    for payment in payments {
        summary.total_paid += payment.paid_amount;
        summary.total_due += payment.remaining_amount;
        match payment.payment_status {
            PaymentStatus::Paid => summary.counts.paid += 1,
            PaymentStatus::Partial => summary.counts.partial += 1,
            PaymentStatus::Pending => summary.counts.pending += 1,
            PaymentStatus::Overdue => summary.counts.overdue += 1,
            PaymentStatus::Other => {}
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;
    use chrono::Utc;

    fn record(status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            date: Utc::now(),
            status,
            subject: None,
            remarks: None,
        }
    }

    fn invoice(paid: f64, remaining: f64, status: PaymentStatus) -> Payment {
        Payment {
            id: ObjectId::new(),
            student: "S001".to_string(),
            invoice_number: "INV-1".to_string(),
            term: "Term 1".to_string(),
            academic_year: "2024".to_string(),
            total: paid + remaining,
            paid_amount: paid,
            remaining_amount: remaining,
            payment_status: status,
            date: Utc::now(),
        }
    }

    #[test]
    fn empty_attendance_is_zero_percent() {
        let stats = attendance_stats(&[]);
        assert_eq!(
            stats,
            AttendanceStats {
                present: 0,
                absent: 0,
                total: 0,
                percentage: 0
            }
        );
    }

    #[test]
    fn three_of_four_rounds_to_75() {
        let list = vec![
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Absent),
        ];
        assert_eq!(attendance_stats(&list).percentage, 75);
    }

    #[test]
    fn four_of_five_present() {
        let list = vec![
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Absent),
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Present),
        ];
        let stats = attendance_stats(&list);
        assert_eq!(stats.present, 4);
        assert_eq!(stats.absent, 1);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.percentage, 80);
    }

    #[test]
    fn unknown_status_counts_as_not_present() {
        let list = vec![record(AttendanceStatus::Present), record(AttendanceStatus::Other)];
        let stats = attendance_stats(&list);
        assert_eq!(stats.present, 1);
        assert_eq!(stats.absent, 1);
        assert_eq!(stats.percentage, 50);
    }

    #[test]
    fn attendance_stats_is_pure() {
        let list = vec![record(AttendanceStatus::Present), record(AttendanceStatus::Absent)];
        assert_eq!(attendance_stats(&list), attendance_stats(&list));
    }

    #[test]
    fn payment_summary_sums_regardless_of_status() {
        let payments = vec![
            invoice(500.0, 0.0, PaymentStatus::Paid),
            invoice(200.0, 300.0, PaymentStatus::Partial),
            invoice(0.0, 400.0, PaymentStatus::Pending),
            invoice(0.0, 250.0, PaymentStatus::Overdue),
        ];
        let summary = payment_summary(&payments);
        assert_eq!(summary.total_paid, 700.0);
        assert_eq!(summary.total_due, 950.0);
        assert_eq!(summary.counts.paid, 1);
        assert_eq!(summary.counts.partial, 1);
        assert_eq!(summary.counts.pending, 1);
        assert_eq!(summary.counts.overdue, 1);
    }

    #[test]
    fn payment_summary_of_nothing_is_zero() {
        assert_eq!(payment_summary(&[]), PaymentSummary::default());
    }
}
