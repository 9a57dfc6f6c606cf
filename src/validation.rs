//! Form validation for the seven measurement fields.
//!
//! Every field is checked, and every problem is reported in one pass, so the
//! operator sees all mistakes together instead of fixing them one at a time.

use crate::model::{Field, MeasurementInput, RawFields};

/// Result of validating one form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Valid(MeasurementInput),
    Invalid(Vec<String>),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }
}

/// Parse a raw field value, rejecting blanks, non-numbers and non-finite values.
pub fn parse_measurement(input: Option<&str>, field: Field) -> Result<f64, String> {
    let required = || format!("{} is required and must be a number", field.key());

    let trimmed = input.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(required());
    }

    match trimmed.parse::<f64>() {
        Ok(val) if val.is_finite() => Ok(val),
        _ => Err(required()),
    }
}

/// Check a parsed value against the field's inclusive range.
pub fn check_range(value: f64, field: Field) -> Result<f64, String> {
    let range = field.range();
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "{} must be between {} and {}{}",
            field.label(),
            range.start(),
            range.end(),
            field.unit()
        ))
    }
}

/// Validate a whole form. Parse errors are listed first, then range errors,
/// each group in field order.
pub fn validate(raw: &RawFields) -> ValidationOutcome {
    let mut parse_errors = Vec::new();
    let mut range_errors = Vec::new();
    let mut values = [0.0_f64; 7];

    for (slot, field) in Field::ALL.into_iter().enumerate() {
        match parse_measurement(raw.get(field.key()).map(String::as_str), field) {
            Ok(val) => {
                if let Err(e) = check_range(val, field) {
                    range_errors.push(e);
                }
                values[slot] = val;
            }
            Err(e) => parse_errors.push(e),
        }
    }

    if !parse_errors.is_empty() || !range_errors.is_empty() {
        parse_errors.extend(range_errors);
        return ValidationOutcome::Invalid(parse_errors);
    }

    let [nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall] = values;
    ValidationOutcome::Valid(MeasurementInput {
        nitrogen,
        phosphorus,
        potassium,
        temperature,
        humidity,
        ph,
        rainfall,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raw() -> RawFields {
        [
            ("N", "90"),
            ("P", "42"),
            ("K", "43"),
            ("temperature", "20.8"),
            ("humidity", "82"),
            ("ph", "6.5"),
            ("rainfall", "202.9"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn errors(outcome: ValidationOutcome) -> Vec<String> {
        match outcome {
            ValidationOutcome::Invalid(errors) => errors,
            ValidationOutcome::Valid(input) => panic!("expected errors, got {:?}", input),
        }
    }

    #[test]
    fn sample_form_is_valid() {
        match validate(&sample_raw()) {
            ValidationOutcome::Valid(input) => {
                assert_eq!(input.nitrogen, 90.0);
                assert_eq!(input.temperature, 20.8);
                assert_eq!(input.rainfall, 202.9);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn each_missing_field_reports_exactly_one_error() {
        for field in Field::ALL {
            let mut raw = sample_raw();
            raw.remove(field.key());
            let errs = errors(validate(&raw));
            assert_eq!(
                errs,
                vec![format!("{} is required and must be a number", field.key())]
            );
        }
    }

    #[test]
    fn each_non_numeric_field_reports_exactly_one_error() {
        for bad in ["", "   ", "abc", "12abc", "NaN", "inf"] {
            for field in Field::ALL {
                let mut raw = sample_raw();
                raw.insert(field.key().to_string(), bad.to_string());
                let errs = errors(validate(&raw));
                assert_eq!(errs.len(), 1, "field {} value {:?}", field, bad);
                assert!(errs[0].starts_with(field.key()));
            }
        }
    }

    #[test]
    fn range_violations_accumulate() {
        let mut raw = sample_raw();
        raw.insert("N".into(), "250".into());
        raw.insert("temperature".into(), "-60".into());
        raw.insert("humidity".into(), "101".into());
        raw.insert("ph".into(), "15".into());
        raw.insert("rainfall".into(), "1200".into());
        let errs = errors(validate(&raw));
        assert_eq!(
            errs,
            vec![
                "N must be between 0 and 200",
                "Temperature must be between -50 and 60°C",
                "Humidity must be between 0 and 100%",
                "pH must be between 0 and 14",
                "Rainfall must be between 0 and 1000mm",
            ]
        );
    }

    #[test]
    fn parse_and_range_errors_share_one_outcome() {
        let mut raw = sample_raw();
        raw.insert("K".into(), "-1".into());
        raw.remove("P");
        let errs = errors(validate(&raw));
        assert_eq!(
            errs,
            vec![
                "P is required and must be a number",
                "K must be between 0 and 200",
            ]
        );
    }

    #[test]
    fn nitrogen_boundaries() {
        for ok in ["0", "200"] {
            let mut raw = sample_raw();
            raw.insert("N".into(), ok.into());
            assert!(validate(&raw).is_valid(), "N={} should be valid", ok);
        }
        for bad in ["-0.0001", "200.0001"] {
            let mut raw = sample_raw();
            raw.insert("N".into(), bad.into());
            assert_eq!(
                errors(validate(&raw)),
                vec!["N must be between 0 and 200"],
                "N={} should be invalid",
                bad
            );
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let mut raw = sample_raw();
        raw.insert("ph".into(), "  7.0 ".into());
        assert!(validate(&raw).is_valid());
    }
}
