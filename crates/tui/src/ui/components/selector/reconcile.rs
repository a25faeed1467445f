//! Decides which remote loads a mount or a prop change calls for.
//!
//! These functions only compare props; the widget turns the returned
//! triggers into effects tagged with its mount generation.

use super::props::SelectorProps;

/// A load the widget should start, or a local reset it should apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    FetchCatalog { access_token: String, include_archived: bool },
    LoadRecency { access_token: String },
    /// The token went away; drop the fetched catalog.
    ResetCatalog,
}

/// Loads started when the widget is mounted.
///
/// The catalog fetch is skipped when the host supplied fulfillers. The
/// recency load only depends on the token.
pub fn on_mount(props: &SelectorProps) -> Vec<Trigger> {
    let Some(token) = props.token() else {
        return Vec::new();
    };
    let mut triggers = Vec::with_capacity(2);
    if props.fulfillers.is_none() {
        triggers.push(Trigger::FetchCatalog {
            access_token: token.to_string(),
            include_archived: props.include_archived,
        });
    }
    triggers.push(Trigger::LoadRecency {
        access_token: token.to_string(),
    });
    triggers
}

/// Loads caused by replacing `previous` with `next`.
///
/// A token change refetches with the new token and the next archived flag
/// and reloads the recency list. An archived flag change on its own only
/// refetches while a token is present.
pub fn reconcile(previous: &SelectorProps, next: &SelectorProps) -> Vec<Trigger> {
    if previous.token() != next.token() {
        let Some(token) = next.token() else {
            return vec![Trigger::ResetCatalog];
        };
        return vec![
            Trigger::FetchCatalog {
                access_token: token.to_string(),
                include_archived: next.include_archived,
            },
            Trigger::LoadRecency {
                access_token: token.to_string(),
            },
        ];
    }

    if previous.include_archived != next.include_archived
        && let Some(token) = next.token()
    {
        return vec![Trigger::FetchCatalog {
            access_token: token.to_string(),
            include_archived: next.include_archived,
        }];
    }
    Vec::new()
}
