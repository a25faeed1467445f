//! View-model for the selector's option list.

use fulfillers_types::{CompositeKey, Fulfiller, FulfillerCatalog};
use ratatui::text::{Line, Span};

use super::title::{LabelContext, get_title, line_text};

/// What an option stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// A real fulfiller; the only kind that can be selected.
    Fulfiller,
    /// The catalog failed to load; the label carries the error text.
    LoadError,
    /// A catalog request is in flight.
    Loading,
    /// No catalog and nothing in flight.
    NoData,
    /// The filter query matched nothing.
    NoResults,
}

/// One row of the option list.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionItem {
    pub value: Option<CompositeKey>,
    pub fulfiller_id: Option<String>,
    pub label: Line<'static>,
    pub kind: OptionKind,
}

impl OptionItem {
    fn placeholder(kind: OptionKind, label: Line<'static>) -> Self {
        Self {
            value: None,
            fulfiller_id: None,
            label,
            kind,
        }
    }

    pub fn is_actionable(&self) -> bool {
        self.kind == OptionKind::Fulfiller && self.value.is_some()
    }

    /// Label text without styling.
    pub fn text(&self) -> String {
        line_text(&self.label)
    }
}

/// Build the option list for the current catalog.
///
/// With no catalog a single placeholder is produced: `loading` while a
/// request is in flight, `no-data` otherwise. A failed load shows its
/// synthetic entry with the error text as the whole label.
pub fn build_options(catalog: Option<&FulfillerCatalog>, fetching: bool, query: &str, ctx: &LabelContext<'_>) -> Vec<OptionItem> {
    // An empty catalog with a fetch in flight reads as loading.
    let Some(catalog) = catalog.filter(|catalog| !(fetching && catalog.is_empty())) else {
        return vec![if fetching {
            OptionItem::placeholder(
                OptionKind::Loading,
                Line::from(vec![
                    Span::styled("⟳ ", ctx.theme.accent_emphasis_style()),
                    Span::styled(ctx.localizer.translate("loading", ctx.language), ctx.theme.text_secondary_style()),
                ]),
            )
        } else {
            OptionItem::placeholder(
                OptionKind::NoData,
                Line::from(Span::styled(
                    ctx.localizer.translate("no-data", ctx.language),
                    ctx.theme.text_secondary_style(),
                )),
            )
        }];
    };

    let mut options = Vec::with_capacity(catalog.len());
    for fulfiller in catalog {
        if fulfiller.is_load_error() {
            options.push(OptionItem {
                value: Some(fulfiller.composite_key()),
                fulfiller_id: Some(fulfiller.fulfiller_id.clone()),
                label: Line::from(Span::styled(fulfiller.name.clone(), ctx.theme.status_error())),
                kind: OptionKind::LoadError,
            });
            continue;
        }
        if !matches_query(fulfiller, query) {
            continue;
        }
        options.push(OptionItem {
            value: Some(fulfiller.composite_key()),
            fulfiller_id: Some(fulfiller.fulfiller_id.clone()),
            label: get_title(fulfiller, ctx),
            kind: OptionKind::Fulfiller,
        });
    }

    if options.is_empty() {
        let text = if query.trim().is_empty() {
            ctx.localizer.translate("no-data", ctx.language)
        } else {
            ctx.localizer.translate("no-results-found", ctx.language)
        };
        let kind = if query.trim().is_empty() { OptionKind::NoData } else { OptionKind::NoResults };
        options.push(OptionItem::placeholder(kind, Line::from(Span::styled(text, ctx.theme.text_secondary_style()))));
    }
    options
}

/// Case-insensitive substring match against id, internal id and name.
pub fn matches_query(fulfiller: &Fulfiller, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fulfiller.name.to_lowercase().contains(&needle)
        || fulfiller.fulfiller_id.to_lowercase().contains(&needle)
        || fulfiller.internal_fulfiller_id.to_string().contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::NordTheme;
    use fulfillers_types::DisplayFlags;
    use fulfillers_util::Localizer;

    fn with_ctx<R>(f: impl FnOnce(&LabelContext<'_>) -> R) -> R {
        let localizer = Localizer::embedded();
        let theme = NordTheme::new();
        let ctx = LabelContext {
            flags: DisplayFlags::default(),
            localizer: &localizer,
            language: "eng",
            theme: &theme,
        };
        f(&ctx)
    }

    fn catalog() -> FulfillerCatalog {
        FulfillerCatalog::new(vec![
            Fulfiller::new("zz", 3, "Zenith"),
            Fulfiller::new("aa", 1, "Acme"),
            Fulfiller::new("mm", 2, "Midway"),
        ])
    }

    #[test]
    fn absent_catalog_shows_single_loading_or_no_data_entry() {
        with_ctx(|ctx| {
            let loading = build_options(None, true, "", ctx);
            assert_eq!(loading.len(), 1);
            assert_eq!(loading[0].kind, OptionKind::Loading);
            assert!(loading[0].text().contains(&ctx.localizer.translate("loading", "eng")));

            let idle = build_options(None, false, "", ctx);
            assert_eq!(idle.len(), 1);
            assert_eq!(idle[0].kind, OptionKind::NoData);
            assert_eq!(idle[0].text(), ctx.localizer.translate("no-data", "eng"));
            assert!(!idle[0].is_actionable());
        });
    }

    #[test]
    fn options_follow_catalog_order() {
        with_ctx(|ctx| {
            let options = build_options(Some(&catalog()), false, "", ctx);
            let ids: Vec<_> = options.iter().map(|o| o.fulfiller_id.clone().unwrap()).collect();
            assert_eq!(ids, vec!["aa", "mm", "zz"]);
            assert!(options.iter().all(OptionItem::is_actionable));
            assert_eq!(options[0].value.as_ref().unwrap().as_str(), "aa 1 Acme");
        });
    }

    #[test]
    fn load_error_is_a_single_inert_entry() {
        with_ctx(|ctx| {
            let options = build_options(Some(&FulfillerCatalog::load_error("boom")), false, "", ctx);
            assert_eq!(options.len(), 1);
            assert_eq!(options[0].fulfiller_id.as_deref(), Some("-1"));
            assert_eq!(options[0].text(), "boom");
            assert_eq!(options[0].kind, OptionKind::LoadError);
            assert!(!options[0].is_actionable());
        });
    }

    #[test]
    fn query_filters_by_name_id_and_internal_id() {
        with_ctx(|ctx| {
            let by_name = build_options(Some(&catalog()), false, "MID", ctx);
            assert_eq!(by_name.len(), 1);
            assert_eq!(by_name[0].fulfiller_id.as_deref(), Some("mm"));

            let by_internal = build_options(Some(&catalog()), false, "3", ctx);
            assert_eq!(by_internal[0].fulfiller_id.as_deref(), Some("zz"));
        });
    }

    #[test]
    fn unmatched_query_shows_no_results() {
        with_ctx(|ctx| {
            let options = build_options(Some(&catalog()), false, "nothing like this", ctx);
            assert_eq!(options.len(), 1);
            assert_eq!(options[0].kind, OptionKind::NoResults);
            assert_eq!(options[0].text(), ctx.localizer.translate("no-results-found", "eng"));
        });
    }

    #[test]
    fn empty_catalog_reads_as_no_data() {
        with_ctx(|ctx| {
            let options = build_options(Some(&FulfillerCatalog::default()), false, "", ctx);
            assert_eq!(options.len(), 1);
            assert_eq!(options[0].kind, OptionKind::NoData);

            let refetching = build_options(Some(&FulfillerCatalog::default()), true, "", ctx);
            assert_eq!(refetching.len(), 1);
            assert_eq!(refetching[0].kind, OptionKind::Loading);
        });
    }
}
