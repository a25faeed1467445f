use once_cell::sync::Lazy;
use regex::Regex;

static REDACT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(authorization:\s*)(.+)",
        r"(?i)(bearer\s+)([A-Za-z0-9\-._~+/]+=*)",
        r"(?i)((?:access_token|token)=)([^\s&]+)",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Redacts values that look like credentials in a string before it is logged.
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for re in REDACT_PATTERNS.iter() {
        redacted = re
            .replace_all(&redacted, |caps: &regex::Captures| {
                let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{}<redacted>", prefix)
            })
            .to_string();
    }
    redacted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_bearer_tokens() {
        let line = "request failed: Authorization: Bearer eyJhbGciOi.abc";
        assert_eq!(redact_sensitive(line), "request failed: Authorization: <redacted>");
        assert_eq!(redact_sensitive("sent bearer abc.def"), "sent bearer <redacted>");
    }

    #[test]
    fn redacts_query_tokens() {
        assert_eq!(
            redact_sensitive("GET /v1/fulfillers?access_token=secret&showArchived=true"),
            "GET /v1/fulfillers?access_token=<redacted>&showArchived=true"
        );
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(redact_sensitive("no secrets here"), "no secrets here");
    }
}
