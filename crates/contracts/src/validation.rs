//! Правила валидации полей карточки клиента.
//!
//! Every rule is a pure predicate over the raw input string and returns a
//! tagged error instead of a boolean so the form can render a
//! field-specific message. Empty input is valid everywhere: "required" is
//! the form's concern, not the validator's.

use chrono::NaiveDate;

/// Ошибки проверки телефона
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneError {
    /// Characters outside `+ digits space ( ) -`, or raw length not 10-20
    InvalidFormat,
    /// Fewer than 10 digits after stripping separators
    InsufficientDigits,
    /// More than 15 digits after stripping separators
    ExcessiveDigits,
}

/// Ошибки проверки email
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailError {
    InvalidFormat,
}

/// Ошибки проверки даты
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateError {
    InvalidFormat,
    FutureDate,
}

/// Ошибки проверки автомобильного номера
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateError {
    InvalidFormat,
    /// Shape is fine but the region code is outside 1-999
    InvalidRegion,
}

/// Телефон: `+`, цифры, пробелы, скобки и дефисы; 10-15 цифр.
pub fn validate_phone(value: &str) -> Result<(), PhoneError> {
    if value.is_empty() {
        return Ok(());
    }

    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '(' | ')' | '-'));
    if !allowed {
        return Err(PhoneError::InvalidFormat);
    }

    let digits = value.chars().filter(char::is_ascii_digit).count();
    if digits < 10 {
        return Err(PhoneError::InsufficientDigits);
    }
    if digits > 15 {
        return Err(PhoneError::ExcessiveDigits);
    }

    if !(10..=20).contains(&value.chars().count()) {
        return Err(PhoneError::InvalidFormat);
    }
    Ok(())
}

/// Email: простая структурная проверка `local@domain.tld`.
pub fn validate_email(value: &str) -> Result<(), EmailError> {
    if value.is_empty() {
        return Ok(());
    }

    let local_char = |c: char| c.is_ascii_alphanumeric() || "._%+-".contains(c);
    let domain_char = |c: char| c.is_ascii_alphanumeric() || ".-".contains(c);

    let Some((local, domain)) = value.split_once('@') else {
        return Err(EmailError::InvalidFormat);
    };
    if local.is_empty() || !local.chars().all(local_char) {
        return Err(EmailError::InvalidFormat);
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return Err(EmailError::InvalidFormat);
    };
    if host.is_empty() || !host.chars().all(domain_char) {
        return Err(EmailError::InvalidFormat);
    }
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(EmailError::InvalidFormat);
    }
    Ok(())
}

/// Дата (`YYYY-MM-DD`) не позже сегодняшней.
///
/// `today` is supplied by the caller so the rule stays clock-free.
/// Unparseable input is rejected as `InvalidFormat` rather than silently
/// accepted.
pub fn validate_past_date(value: &str, today: NaiveDate) -> Result<(), DateError> {
    if value.is_empty() {
        return Ok(());
    }

    let date =
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| DateError::InvalidFormat)?;
    if date > today {
        return Err(DateError::FutureDate);
    }
    Ok(())
}

/// Letters legal on a regional vehicle plate: the Cyrillic set plus the
/// Latin look-alikes, both cases.
fn is_plate_letter(c: char) -> bool {
    const CYR: &str = "АВЕКМНОРСТУХ";
    const LAT: &str = "ABEKMHOPCTYX";
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => CYR.contains(u) || LAT.contains(u),
        _ => false,
    }
}

/// Автомобильный номер: буква + 3 цифры + 2 буквы + код региона (2-3 цифры),
/// регистр не важен. Например `А222АА77` или `A123BC777`.
pub fn validate_car_number(value: &str) -> Result<(), PlateError> {
    if value.is_empty() {
        return Ok(());
    }

    let chars: Vec<char> = value.chars().collect();
    if !(8..=9).contains(&chars.len()) {
        return Err(PlateError::InvalidFormat);
    }

    let shape_ok = is_plate_letter(chars[0])
        && chars[1..4].iter().all(|c| c.is_ascii_digit())
        && chars[4..6].iter().all(|c| is_plate_letter(*c))
        && chars[6..].iter().all(|c| c.is_ascii_digit());
    if !shape_ok {
        return Err(PlateError::InvalidFormat);
    }

    let region: String = chars[6..].iter().collect();
    let region: u32 = region.parse().map_err(|_| PlateError::InvalidFormat)?;
    if !(1..=999).contains(&region) {
        return Err(PlateError::InvalidRegion);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn phone_accepts_formatted_numbers() {
        assert_eq!(validate_phone("+7 (999) 123-45-67"), Ok(()));
        assert_eq!(validate_phone("79991234567"), Ok(()));
        assert_eq!(validate_phone(""), Ok(()));
    }

    #[test]
    fn phone_rejects_foreign_characters() {
        assert_eq!(validate_phone("abc"), Err(PhoneError::InvalidFormat));
        assert_eq!(
            validate_phone("+7 999 123 45 67x"),
            Err(PhoneError::InvalidFormat)
        );
    }

    #[test]
    fn phone_rejects_short_and_long_digit_counts() {
        assert_eq!(validate_phone("12345"), Err(PhoneError::InsufficientDigits));
        assert_eq!(
            validate_phone("1234567890123456"),
            Err(PhoneError::ExcessiveDigits)
        );
    }

    #[test]
    fn email_structural_check() {
        assert_eq!(validate_email(""), Ok(()));
        assert_eq!(validate_email("ivanov@example.com"), Ok(()));
        assert_eq!(validate_email("a.b+c@mail.co"), Ok(()));
        assert_eq!(validate_email("no-at-sign"), Err(EmailError::InvalidFormat));
        assert_eq!(validate_email("a@b"), Err(EmailError::InvalidFormat));
        assert_eq!(validate_email("a@b.c"), Err(EmailError::InvalidFormat));
        assert_eq!(validate_email("@example.com"), Err(EmailError::InvalidFormat));
    }

    #[test]
    fn past_date_allows_today_and_before() {
        let today = day("2026-08-25");
        assert_eq!(validate_past_date("", today), Ok(()));
        assert_eq!(validate_past_date("1990-05-12", today), Ok(()));
        assert_eq!(validate_past_date("2026-08-25", today), Ok(()));
        assert_eq!(
            validate_past_date("2026-08-26", today),
            Err(DateError::FutureDate)
        );
        assert_eq!(
            validate_past_date("not a date", today),
            Err(DateError::InvalidFormat)
        );
    }

    #[test]
    fn car_number_accepts_both_alphabets_any_case() {
        assert_eq!(validate_car_number(""), Ok(()));
        assert_eq!(validate_car_number("А222АА77"), Ok(()));
        assert_eq!(validate_car_number("A123BC77"), Ok(()));
        assert_eq!(validate_car_number("a123bc777"), Ok(()));
    }

    #[test]
    fn car_number_rejects_bad_shape_and_region() {
        assert_eq!(validate_car_number("AB123C7"), Err(PlateError::InvalidFormat));
        assert_eq!(validate_car_number("Z123BC77"), Err(PlateError::InvalidFormat));
        assert_eq!(
            validate_car_number("A123BC000"),
            Err(PlateError::InvalidRegion)
        );
    }
}
