use langpack::{LanguageCode, SyncOutcome, days_since};

const MAX_TITLE_WIDTH: usize = 50;

/// Age of a stored timestamp in whole days.
pub fn age(timestamp: Option<i64>) -> String {
    match timestamp {
        None => "never".to_owned(),
        Some(at) => match days_since(at) {
            0 => "today".to_owned(),
            1 => "1 day ago".to_owned(),
            days => format!("{days} days ago"),
        },
    }
}

pub fn outcome_label(outcome: SyncOutcome) -> &'static str {
    match outcome {
        SyncOutcome::New => "installed",
        SyncOutcome::Updated => "updated",
        SyncOutcome::Failed => "failed",
    }
}

pub fn code_list(codes: &[LanguageCode]) -> String {
    if codes.is_empty() {
        return "-".to_owned();
    }
    codes
        .iter()
        .map(LanguageCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn title(title: Option<&str>) -> String {
    truncate(title.unwrap_or(""), MAX_TITLE_WIDTH)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_owned()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}

#[cfg(test)]
mod tests {
    use langpack::now_epoch_secs;

    use super::*;

    #[test]
    fn truncate_short_string_unchanged() {
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn truncate_handles_unicode() {
        assert_eq!(truncate("café latte", 5), "café…");
    }

    #[test]
    fn age_is_reported_in_days() {
        let now = now_epoch_secs();
        assert_eq!(age(None), "never");
        assert_eq!(age(Some(now)), "today");
        assert_eq!(age(Some(now - 86_400 - 10)), "1 day ago");
        assert_eq!(age(Some(now - 5 * 86_400 - 10)), "5 days ago");
    }

    #[test]
    fn empty_code_list_is_a_dash() {
        assert_eq!(code_list(&[]), "-");
        assert_eq!(
            code_list(&[LanguageCode::new("fr"), LanguageCode::new("de")]),
            "fr, de"
        );
    }
}
