use chrono::NaiveDate;

use super::VacationRequest;

/// Two inclusive date ranges overlap iff they share at least one calendar day.
pub fn intervals_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Check that no two approved requests of the same employee overlap.
pub fn approved_are_disjoint(requests: &[VacationRequest]) -> bool {
    let approved: Vec<&VacationRequest> = requests.iter().filter(|r| r.is_approved()).collect();

    approved.iter().enumerate().all(|(i, a)| {
        approved[i + 1..].iter().all(|b| {
            a.employee != b.employee
                || !intervals_overlap(a.start_date, a.end_date, b.start_date, b.end_date)
        })
    })
}

/// Validate that `days` can be taken from `balance` without going below zero.
/// Only consulted when the sufficient-balance policy is enabled.
pub fn validate_deduction(balance: i32, days: i32) -> Result<(), DeductionError> {
    if days > balance {
        return Err(DeductionError::InsufficientBalance {
            balance,
            requested: days,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeductionError {
    InsufficientBalance { balance: i32, requested: i32 },
}

impl std::fmt::Display for DeductionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeductionError::InsufficientBalance { balance, requested } => {
                write!(
                    f,
                    "Deducting {} vacation days would exceed the remaining balance of {}",
                    requested, balance
                )
            }
        }
    }
}

impl std::error::Error for DeductionError {}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::{RequestId, VacationType};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_request(id: RequestId, start: &str, end: &str) -> VacationRequest {
        let mut request = VacationRequest::new(
            "EMP001",
            VacationType::Annual,
            "Leave",
            date(start),
            date(end),
            Utc::now(),
        );
        request.id = id;
        request
    }

    fn approved(id: RequestId, start: &str, end: &str) -> VacationRequest {
        let mut request = make_request(id, start, end);
        request.approve("EMP002");
        request
    }

    #[test]
    fn test_intervals_overlap_inclusive_bounds() {
        let (s, e) = (date("2024-06-01"), date("2024-06-05"));

        // Touching on the last day counts
        assert!(intervals_overlap(s, e, date("2024-06-05"), date("2024-06-10")));
        // Touching on the first day counts
        assert!(intervals_overlap(s, e, date("2024-05-25"), date("2024-06-01")));
        // Contained and containing
        assert!(intervals_overlap(s, e, date("2024-06-02"), date("2024-06-03")));
        assert!(intervals_overlap(s, e, date("2024-05-01"), date("2024-07-01")));
        // Adjacent but disjoint
        assert!(!intervals_overlap(s, e, date("2024-06-06"), date("2024-06-08")));
        assert!(!intervals_overlap(s, e, date("2024-05-20"), date("2024-05-31")));
    }

    #[test]
    fn test_approved_are_disjoint() {
        let ok = vec![
            approved(1, "2024-06-01", "2024-06-05"),
            approved(2, "2024-06-06", "2024-06-10"),
            make_request(3, "2024-06-02", "2024-06-08"),
        ];
        assert!(approved_are_disjoint(&ok));

        let broken = vec![
            approved(1, "2024-06-01", "2024-06-05"),
            approved(2, "2024-06-05", "2024-06-10"),
        ];
        assert!(!approved_are_disjoint(&broken));
    }

    #[test]
    fn test_validate_deduction() {
        assert!(validate_deduction(24, 5).is_ok());
        assert!(validate_deduction(5, 5).is_ok());
        assert_eq!(
            validate_deduction(3, 5),
            Err(DeductionError::InsufficientBalance {
                balance: 3,
                requested: 5
            })
        );
    }
}
