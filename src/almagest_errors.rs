use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AlmagestError {
    #[error("Invalid month: {0} (must be from 1 to 12)")]
    InvalidMonth(i32),

    #[error("Invalid day {day} for {year}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: f64 },

    #[error("Invalid day of year {day} for year {year}")]
    InvalidDayOfYear { year: i32, day: u32 },

    #[error("Invalid observer: {0}")]
    InvalidObserver(String),

    #[error("Unsupported body for this computation: {0}")]
    UnsupportedBody(&'static str),

    #[error("Invalid coefficient series: {0}")]
    InvalidSeries(String),

    #[error("Interpolating factor out of range: {0} (must be strictly between -1 and 1)")]
    OutOfRange(f64),

    #[error("{solver} did not converge after {passes} passes")]
    Bailout { solver: &'static str, passes: usize },
}

impl PartialEq for AlmagestError {
    fn eq(&self, other: &Self) -> bool {
        use AlmagestError::*;
        match (self, other) {
            (InvalidMonth(a), InvalidMonth(b)) => a == b,
            (
                InvalidDay {
                    year: y1,
                    month: m1,
                    day: d1,
                },
                InvalidDay {
                    year: y2,
                    month: m2,
                    day: d2,
                },
            ) => y1 == y2 && m1 == m2 && d1.to_bits() == d2.to_bits(),
            (InvalidDayOfYear { year: y1, day: d1 }, InvalidDayOfYear { year: y2, day: d2 }) => {
                y1 == y2 && d1 == d2
            }
            (InvalidObserver(a), InvalidObserver(b)) => a == b,
            (UnsupportedBody(a), UnsupportedBody(b)) => a == b,
            (InvalidSeries(a), InvalidSeries(b)) => a == b,

            // NaN factors compare equal to themselves
            (OutOfRange(a), OutOfRange(b)) => a.to_bits() == b.to_bits(),

            (
                Bailout {
                    solver: s1,
                    passes: p1,
                },
                Bailout {
                    solver: s2,
                    passes: p2,
                },
            ) => s1 == s2 && p1 == p2,

            _ => false,
        }
    }
}

#[cfg(test)]
mod almagest_errors_test {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AlmagestError::InvalidMonth(13).to_string(),
            "Invalid month: 13 (must be from 1 to 12)"
        );
        assert_eq!(
            AlmagestError::InvalidDay {
                year: 2023,
                month: 2,
                day: 29.0
            }
            .to_string(),
            "Invalid day 29 for 2023-02"
        );
        assert_eq!(
            AlmagestError::Bailout {
                solver: "geocentric_planet",
                passes: 20
            }
            .to_string(),
            "geocentric_planet did not converge after 20 passes"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(AlmagestError::OutOfRange(1.0), AlmagestError::OutOfRange(1.0));
        assert_ne!(AlmagestError::OutOfRange(1.0), AlmagestError::OutOfRange(-1.0));
        assert_ne!(
            AlmagestError::InvalidMonth(0),
            AlmagestError::InvalidSeries("0".into())
        );
    }
}
