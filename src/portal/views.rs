//! Presentation helpers shared by the portal screens.

use chrono::{DateTime, Utc};

/// Badge classes the stylesheet knows about; anything else renders with the
/// default pending badge.
const KNOWN_STATUS_CLASSES: &[&str] = &[
    "under-review",
    "not-eligible",
    "pending",
    "accepted",
    "rejected",
];

/// CSS badge class for a status label: case-insensitive, spaces to hyphens.
/// Unknown values fall back to `status-pending`.
pub fn status_badge_class(status: &str) -> String {
    let slug = status.trim().to_ascii_lowercase().replace(' ', "-");
    if KNOWN_STATUS_CLASSES.contains(&slug.as_str()) {
        format!("status-{slug}")
    } else {
        "status-pending".to_string()
    }
}

/// Rupee amount with Indian digit grouping: `2,50,000`, `52,500.50`.
pub fn format_inr(amount: f64) -> String {
    let negative = amount < 0.0;
    let amount = amount.abs();
    let mut rupees = amount.trunc() as u64;
    let mut paise = ((amount - amount.trunc()) * 100.0).round() as u64;
    if paise >= 100 {
        rupees += 1;
        paise = 0;
    }

    let mut rendered = group_indian(rupees);
    if paise > 0 {
        rendered.push_str(&format!(".{paise:02}"));
    }
    if negative {
        format!("-{rendered}")
    } else {
        rendered
    }
}

// Last three digits stand alone; the rest groups in pairs from the right.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Date as shown on list cards: `dd/mm/yyyy`.
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y").to_string()
}

/// Timestamp as shown on detail screens: `dd/mm/yyyy, HH:MM:SS`.
pub fn format_date_time(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y, %H:%M:%S").to_string()
}
