// Helpers for safe logging

/// Masks phone numbers for safe logging
/// Keeps the country code prefix and the last two digits
///
/// # Example
/// ```ignore
/// let masked = safe_phone_log("+6281234567890");
/// // Returns: "+62*********90"
/// ```
pub fn safe_phone_log(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() > 5 {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{}{}{}", head, "*".repeat(chars.len() - 5), tail)
    } else {
        "***".to_string()
    }
}

/// Masks tokens for safe logging
/// Shows only first and last 4 characters
///
/// # Example
/// ```ignore
/// let masked = safe_token_log("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");
/// // Returns: "eyJh...CJ9"
/// ```
pub fn safe_token_log(token: &str) -> String {
    if token.len() > 8 && token.is_ascii() {
        format!("{}...{}", &token[..4], &token[token.len() - 4..])
    } else {
        "***".to_string()
    }
}

/// Blanks every `password` member of a JSON document and masks `token` members
pub fn redact_secrets(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, inner) in map.iter_mut() {
                if key.to_lowercase().contains("password") {
                    *inner = serde_json::Value::String("***".to_string());
                } else if key == "token" {
                    let masked = inner.as_str().map(safe_token_log).unwrap_or_default();
                    *inner = serde_json::Value::String(masked);
                } else {
                    redact_secrets(inner);
                }
            }
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(redact_secrets),
        _ => {}
    }
}
