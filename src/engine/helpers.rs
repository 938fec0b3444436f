use crate::error::{invalid_postal_code_error, Error};

/// Keeps only the digits and insists on exactly eight of them.
pub fn postal_code_digits(input: &str) -> Result<String, Error> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != 8 {
        return Err(invalid_postal_code_error());
    }

    Ok(digits)
}

#[test]
fn accepts_masked_and_bare_codes() {
    assert_eq!(postal_code_digits("01001-000").unwrap(), "01001000");
    assert_eq!(postal_code_digits("01001000").unwrap(), "01001000");
    assert_eq!(postal_code_digits(" 18.035-000 ").unwrap(), "18035000");
}

#[test]
fn rejects_wrong_lengths() {
    assert_eq!(postal_code_digits("").unwrap_err(), invalid_postal_code_error());
    assert_eq!(postal_code_digits("0100100").unwrap_err(), invalid_postal_code_error());
    assert_eq!(postal_code_digits("010010001").unwrap_err(), invalid_postal_code_error());
    assert_eq!(postal_code_digits("abcdefgh").unwrap_err(), invalid_postal_code_error());
}
