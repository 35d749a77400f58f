//! Field validators shared by every entity.
//!
//! The free functions are plain predicates. [`Causes`] wraps them into a
//! collector that records a `{field, message}` pair for each failed rule.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Cause;

/// Lowest physically meaningful temperature, in Celsius.
pub const ABSOLUTE_ZERO: f64 = -273.15;
/// Upper bound accepted for warehouse temperatures.
pub const MAX_TEMPERATURE: f64 = 1000.0;
/// Maximum length of any free-text column.
pub const MAX_TEXT_LEN: usize = 255;

static TELEPHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\(?[0-9]{2}\)?(?-u:\s))?([0-9]{4,5}-[0-9]{4})$")
        .expect("telephone pattern compiles")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

static CEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}-?[0-9]{3}$").expect("cep pattern compiles"));

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Character-count bounds, inclusive on both ends.
pub fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

pub fn is_positive<T: PartialOrd + Default>(value: T) -> bool {
    value > T::default()
}

pub fn is_negative<T: PartialOrd + Default>(value: T) -> bool {
    value < T::default()
}

pub fn is_zero<T: PartialEq + Default>(value: T) -> bool {
    value == T::default()
}

pub fn is_between<T: PartialOrd>(value: T, min: T, max: T) -> bool {
    value >= min && value <= max
}

/// Brazilian-style telephone: optional two-digit area code, then `NNNN-NNNN` or `NNNNN-NNNN`.
pub fn is_telephone(value: &str) -> bool {
    TELEPHONE.is_match(value)
}

pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Brazilian postal code, with or without the hyphen.
pub fn is_cep(value: &str) -> bool {
    CEP.is_match(value)
}

/// Collects validation causes for one entity.
#[derive(Debug, Default)]
pub struct Causes(Vec<Cause>);

impl Causes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.0.push(Cause::new(field, message));
        self
    }

    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.push(field, message);
        }
        self
    }

    /// Non-blank and at most [`MAX_TEXT_LEN`] characters.
    pub fn text(&mut self, field: &str, value: &str) -> &mut Self {
        if is_blank(value) {
            self.push(field, "cannot be blank")
        } else if !length_between(value, 1, MAX_TEXT_LEN) {
            self.push(field, format!("must be at most {MAX_TEXT_LEN} characters"))
        } else {
            self
        }
    }

    pub fn positive<T: PartialOrd + Default>(&mut self, field: &str, value: T) -> &mut Self {
        self.check(is_positive(value), field, "must be greater than 0")
    }

    pub fn non_negative<T: PartialOrd + Default>(&mut self, field: &str, value: T) -> &mut Self {
        self.check(
            !is_negative(value),
            field,
            "must be greater than or equal to 0",
        )
    }

    /// Not colder than absolute zero.
    pub fn temperature(&mut self, field: &str, value: f64) -> &mut Self {
        self.check(
            value >= ABSOLUTE_ZERO,
            field,
            "must be greater than or equal to -273.15",
        )
    }

    pub fn between<T: PartialOrd + std::fmt::Display + Copy>(
        &mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> &mut Self {
        if is_between(value, min, max) {
            self
        } else {
            self.push(field, format!("must be between {min} and {max}"))
        }
    }

    pub fn telephone(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(is_telephone(value), field, "invalid telephone format")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<Cause> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telephone_accepts_area_code_variants() {
        assert!(is_telephone("11 91332-3232"));
        assert!(is_telephone("(11) 91332-3232"));
        assert!(is_telephone("4444-5555"));
        assert!(is_telephone("91332-3232"));
    }

    #[test]
    fn telephone_rejects_malformed_numbers() {
        assert!(!is_telephone("11913323232"));
        assert!(!is_telephone("11 913-3232"));
        assert!(!is_telephone("(11)91332-3232"));
        assert!(!is_telephone(""));
    }

    #[test]
    fn only_ascii_digits_and_spaces_count() {
        assert!(!is_telephone("١١ ٩١٣٣٢-٣٢٣٢"));
        assert!(!is_telephone("１１ ９１３３２-３２３２"));
        assert!(!is_telephone("11\u{00A0}91332-3232"));
        assert!(!is_cep("٠١٣١٠-١٠٠"));
    }

    #[test]
    fn email_and_cep() {
        assert!(is_email("ops@fresh.com.br"));
        assert!(!is_email("ops@fresh"));
        assert!(is_cep("01310-100"));
        assert!(is_cep("01310100"));
        assert!(!is_cep("0131-0100"));
    }

    #[test]
    fn numeric_predicates() {
        assert!(is_positive(1));
        assert!(!is_positive(0.0));
        assert!(is_negative(-0.5));
        assert!(is_zero(0_i64));
        assert!(is_between(-273.15, ABSOLUTE_ZERO, MAX_TEMPERATURE));
        assert!(!is_between(1000.01, ABSOLUTE_ZERO, MAX_TEMPERATURE));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(length_between("ação", 4, 4));
        assert!(!length_between("", 1, 255));
        assert!(!length_between(&"x".repeat(256), 1, 255));
    }

    #[test]
    fn collector_records_each_failed_rule() {
        let mut causes = Causes::new();
        causes
            .text("address", "   ")
            .text("company_name", &"a".repeat(300))
            .positive("height", 0.0)
            .non_negative("current_quantity", -1)
            .temperature("minimum_temperature", -300.0)
            .between(
                "minimum_temperature",
                2000.0,
                ABSOLUTE_ZERO,
                MAX_TEMPERATURE,
            )
            .telephone("telephone", "abc");

        let causes = causes.into_vec();
        assert_eq!(causes.len(), 7);
        assert_eq!(causes[0], Cause::new("address", "cannot be blank"));
        assert_eq!(causes[1].message, "must be at most 255 characters");
        assert_eq!(causes[5].message, "must be between -273.15 and 1000");
        assert_eq!(causes[6].message, "invalid telephone format");
    }

    #[test]
    fn collector_stays_empty_for_valid_input() {
        let mut causes = Causes::new();
        causes
            .text("address", "Rua 1")
            .positive("height", 1.5)
            .telephone("telephone", "11 91332-3232");
        assert!(causes.is_empty());
    }
}
