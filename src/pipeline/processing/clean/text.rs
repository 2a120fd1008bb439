/// Capitalize the first letter of every word and lower-case the rest.
///
/// A word starts at any letter not preceded by another letter, so
/// `"o'neil"` becomes `"O'Neil"` and `"SEATTLE-north"` becomes `"Seattle-North"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}

/// Trim a field in place, leaving missing values alone.
pub fn trim_field(field: &mut Option<String>) {
    if let Some(value) = field {
        let trimmed = value.trim();
        if trimmed.len() != value.len() {
            *value = trimmed.to_string();
        }
    }
}

pub fn title_case_field(field: &mut Option<String>) {
    if let Some(value) = field {
        *value = title_case(value);
    }
}
