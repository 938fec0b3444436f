/// The only code that grants a discount.
pub const VALID_COUPON: &str = "DESCONTO10";

/// Fraction of the base value taken off when the coupon applies.
pub const COUPON_DISCOUNT_RATE: f64 = 0.10;

/// Strips every whitespace character and uppercases the rest.
pub fn normalize(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// An unknown or empty code is not an error, it just does not apply.
pub fn applies(code: Option<&str>) -> bool {
    match code {
        Some(code) => normalize(code) == VALID_COUPON,
        None => false,
    }
}

#[test]
fn coupon_matching_ignores_case_and_whitespace() {
    assert!(applies(Some("desconto10")));
    assert!(applies(Some(" DESCONTO10 ")));
    assert!(applies(Some("DeScOnTo10")));
    assert!(applies(Some("DESC ONTO\t10")));
}

#[test]
fn other_coupons_do_not_apply() {
    assert!(!applies(Some("DESCONTO20")));
    assert!(!applies(Some("")));
    assert!(!applies(Some("   ")));
    assert!(!applies(None));
}
