//! GS1 check digit computation for EAN-8, UPC-A (12), EAN-13 and GTIN-14 codes.

/// Lengths accepted once the code is compacted.
pub const VALID_LENGTHS: [usize; 4] = [8, 12, 13, 14];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EanError {
    #[error("EANCode is structured with numbers.")]
    NotNumeric,

    #[error("EANCode length isn't correct: expected 8, 12, 13 or 14 digits, found {0}.")]
    WrongLength(usize),

    #[error("Checksum fails.")]
    ChecksumFails
}

/// Removes the separators people usually type inside a barcode number.
pub fn compact(number: &str) -> String {
    number
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_digits(number: &str) -> bool {
    !number.is_empty() && number.chars().all(|c| c.is_ascii_digit())
}

/// Computes the check digit for `body`, the code without its trailing check digit.
///
/// Digits are weighted 3, 1, 3, 1, ... starting from the rightmost one.
pub fn calc_check_digit(body: &str) -> Result<u32, EanError> {
    let sum = body
        .chars()
        .rev()
        .enumerate()
        .try_fold(0u32, |acc, (i, c)| {
            let digit = c.to_digit(10).ok_or(EanError::NotNumeric)?;
            let weight = if i % 2 == 0 { 3 } else { 1 };
            Ok(acc + weight * digit)
        })?;

    Ok((10 - sum % 10) % 10)
}

/// Validates a code and returns its compacted form.
///
/// Rules are checked in order: digits only, accepted length, check digit.
pub fn validate(number: &str) -> Result<String, EanError> {
    let number = compact(number);

    if !is_digits(&number) {
        return Err(EanError::NotNumeric);
    }
    if !VALID_LENGTHS.contains(&number.len()) {
        return Err(EanError::WrongLength(number.len()));
    }

    let (body, check) = number.split_at(number.len() - 1);
    let expected = calc_check_digit(body)?;
    match check.chars().next().and_then(|c| c.to_digit(10)) {
        Some(actual) if actual == expected => Ok(number),
        _ => Err(EanError::ChecksumFails)
    }
}

pub fn is_valid(number: &str) -> bool {
    validate(number).is_ok()
}
