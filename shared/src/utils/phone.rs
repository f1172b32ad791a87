//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Chinese mobile phone number: 11 digits, `1` then `3`-`9`
static CHINA_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^1[3-9]\d{9}$").expect("phone regex is valid")
});

/// Length of an accepted phone number
pub const PHONE_NUMBER_LENGTH: usize = 11;

/// Check whether a phone number is well formed.
///
/// The input is matched as-is: separators, spaces, a `+86` prefix or
/// full-width digits all make the number invalid. Callers must reject the
/// request instead of trying to repair the input.
///
/// # Examples
///
/// ```
/// use sepm_shared::utils::phone::is_valid_phone_number;
///
/// assert!(is_valid_phone_number("13800138000"));
/// assert!(!is_valid_phone_number("12800138000"));
/// assert!(!is_valid_phone_number("+8613800138000"));
/// ```
pub fn is_valid_phone_number(phone: &str) -> bool {
    CHINA_MOBILE_REGEX.is_match(phone)
}

/// Mask a phone number for display and logs (e.g., 138****8000)
pub fn mask_phone_number(phone: &str) -> String {
    if phone.is_ascii() && phone.len() >= 7 {
        format!("{}****{}", &phone[0..3], &phone[phone.len() - 4..])
    } else {
        "****".to_string()
    }
}
