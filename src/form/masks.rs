pub const POSTAL_CODE_DIGITS: usize = 8;
pub const PHONE_DIGITS: usize = 11;

/// A fully typed phone, `(DD) DDDDD-DDDD`, is 15 characters; 14 still
/// accepts the older 8-digit landline layout.
pub const MIN_PHONE_LENGTH: usize = 14;

pub fn digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// `01001000` → `01001-000`.
pub fn mask_postal_code(input: &str) -> String {
    let mut v = digits(input);
    v.truncate(POSTAL_CODE_DIGITS);

    if v.len() > 5 {
        v.insert(5, '-');
    }

    v
}

/// `11999998888` → `(11) 99999-8888`.
///
/// The area code is wrapped as soon as a third digit arrives and the hyphen
/// goes before the last four digits once at least five follow the area code.
pub fn mask_phone(input: &str) -> String {
    let mut v = digits(input);
    v.truncate(PHONE_DIGITS);

    if v.len() > 2 {
        v = format!("({}) {}", &v[..2], &v[2..]);
    }

    let trailing_digits = v.chars().rev().take_while(|c| c.is_ascii_digit()).count();
    if trailing_digits >= 5 {
        v.insert(v.len() - 4, '-');
    }

    v
}

#[test]
fn postal_code_mask() {
    assert_eq!(mask_postal_code("01001000"), "01001-000");
    assert_eq!(mask_postal_code("01001-000"), "01001-000");
    assert_eq!(mask_postal_code("010010001234"), "01001-000");
    assert_eq!(mask_postal_code("abc0100"), "0100");
    assert_eq!(mask_postal_code("010010"), "01001-0");
    assert_eq!(mask_postal_code(""), "");
}

#[test]
fn phone_mask_at_digit_count_boundaries() {
    let cases = [
        ("", ""),
        ("5", "5"),
        ("55", "55"),
        ("551", "(55) 1"),
        ("5511999", "(55) 1-1999"),
        ("5511999988", "(55) 1199-9988"),
        ("55119999888", "(55) 11999-9888"),
        ("551199998888", "(55) 11999-9888"),
    ];

    for (input, expected) in cases {
        assert_eq!(mask_phone(input), expected, "input {:?}", input);
    }
}

#[test]
fn phone_mask_truncates_before_formatting() {
    assert_eq!(mask_phone("551199998888877"), "(55) 11999-9888");
    assert_eq!(mask_phone("(15) 99645-2232"), "(15) 99645-2232");
}

#[test]
fn phone_mask_lengths() {
    assert_eq!(mask_phone("11999998888").len(), 15);
    assert_eq!(mask_phone("1133334444").len(), MIN_PHONE_LENGTH);
    assert!(mask_phone("113333444").len() < MIN_PHONE_LENGTH);
}
