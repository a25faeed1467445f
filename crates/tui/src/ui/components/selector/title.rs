//! Option label formatting.
//!
//! A label is built from up to three fields of a fulfiller depending on the
//! host's display flags. Internal ids are always shown muted; an archived
//! fulfiller mutes the whole label whatever its shape.

use fulfillers_types::{DisplayFlags, Fulfiller};
use fulfillers_util::Localizer;
use ratatui::text::{Line, Span};

use crate::ui::theme::Theme;

/// The eight label layouts a flag combination can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitleShape {
    /// `name`
    NameOnly,
    /// `id`
    IdOnly,
    /// `internalId`
    InternalIdOnly,
    /// `name (id)`
    NameAndId,
    /// `name (internalId)`
    NameAndInternalId,
    /// `name (id / internalId)`
    NameIdAndInternalId,
    /// `id / internalId`
    IdAndInternalId,
    /// Translated "misconfigured" text; no field was enabled.
    Misconfigured,
}

impl TitleShape {
    pub fn for_flags(flags: DisplayFlags) -> Self {
        match (flags.include_name, flags.include_id, flags.include_internal_id) {
            (true, true, true) => Self::NameIdAndInternalId,
            (true, true, false) => Self::NameAndId,
            (true, false, true) => Self::NameAndInternalId,
            (true, false, false) => Self::NameOnly,
            (false, true, true) => Self::IdAndInternalId,
            (false, true, false) => Self::IdOnly,
            (false, false, true) => Self::InternalIdOnly,
            (false, false, false) => Self::Misconfigured,
        }
    }
}

/// Everything label formatting needs besides the fulfiller itself.
#[derive(Clone, Copy)]
pub struct LabelContext<'a> {
    pub flags: DisplayFlags,
    pub localizer: &'a Localizer,
    pub language: &'a str,
    pub theme: &'a dyn Theme,
}

/// Render the option label for `fulfiller`.
pub fn get_title(fulfiller: &Fulfiller, ctx: &LabelContext<'_>) -> Line<'static> {
    let theme = ctx.theme;
    let plain = |text: String| Span::styled(text, theme.text_primary_style());
    let muted = |text: String| Span::styled(text, theme.text_muted_style());

    let name = || plain(fulfiller.name.clone());
    let id = || plain(fulfiller.fulfiller_id.clone());
    let internal_id = || muted(fulfiller.internal_fulfiller_id.to_string());

    let spans = match TitleShape::for_flags(ctx.flags) {
        TitleShape::NameIdAndInternalId => vec![
            name(),
            plain(" (".into()),
            id(),
            plain(" / ".into()),
            internal_id(),
            plain(")".into()),
        ],
        TitleShape::NameAndId => vec![name(), plain(" (".into()), id(), plain(")".into())],
        TitleShape::NameAndInternalId => vec![name(), plain(" (".into()), internal_id(), plain(")".into())],
        TitleShape::NameOnly => vec![name()],
        TitleShape::IdAndInternalId => vec![id(), plain(" / ".into()), internal_id()],
        TitleShape::IdOnly => vec![id()],
        TitleShape::InternalIdOnly => vec![internal_id()],
        TitleShape::Misconfigured => vec![plain(ctx.localizer.translate("misconfigured", ctx.language))],
    };

    if fulfiller.archived {
        let muted_style = theme.text_muted_style();
        let spans: Vec<Span<'static>> = spans.into_iter().map(|span| span.style(muted_style)).collect();
        return Line::from(spans).style(muted_style);
    }
    Line::from(spans)
}

/// Flatten a line into its text.
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::NordTheme;
    use std::collections::HashSet;

    fn ctx<'a>(flags: DisplayFlags, localizer: &'a Localizer, theme: &'a NordTheme) -> LabelContext<'a> {
        LabelContext {
            flags,
            localizer,
            language: "eng",
            theme,
        }
    }

    fn acme() -> Fulfiller {
        Fulfiller::new("acme-1", 77, "Acme")
    }

    #[test]
    fn each_flag_combination_has_its_own_shape() {
        let shapes: HashSet<TitleShape> = DisplayFlags::all().map(TitleShape::for_flags).collect();
        assert_eq!(shapes.len(), 8);
        for flags in DisplayFlags::all() {
            assert_eq!(TitleShape::for_flags(flags) == TitleShape::Misconfigured, flags.is_misconfigured());
        }
    }

    #[test]
    fn label_text_per_shape() {
        let localizer = Localizer::embedded();
        let theme = NordTheme::new();
        let expected = [
            (DisplayFlags::new(true, true, true), "Acme (acme-1 / 77)"),
            (DisplayFlags::new(true, true, false), "Acme (acme-1)"),
            (DisplayFlags::new(true, false, true), "Acme (77)"),
            (DisplayFlags::new(true, false, false), "Acme"),
            (DisplayFlags::new(false, true, true), "acme-1 / 77"),
            (DisplayFlags::new(false, true, false), "acme-1"),
            (DisplayFlags::new(false, false, true), "77"),
        ];
        for (flags, text) in expected {
            assert_eq!(line_text(&get_title(&acme(), &ctx(flags, &localizer, &theme))), text, "{flags:?}");
        }
    }

    #[test]
    fn misconfigured_label_is_translated() {
        let localizer = Localizer::embedded();
        let theme = NordTheme::new();
        let mut context = ctx(DisplayFlags::new(false, false, false), &localizer, &theme);
        context.language = "deu";
        let line = get_title(&acme(), &context);
        assert_eq!(line_text(&line), localizer.translate("misconfigured", "deu"));
    }

    #[test]
    fn internal_id_is_muted() {
        let localizer = Localizer::embedded();
        let theme = NordTheme::new();
        let line = get_title(&acme(), &ctx(DisplayFlags::new(true, false, true), &localizer, &theme));
        let internal = line.spans.iter().find(|span| span.content == "77").unwrap();
        assert_eq!(internal.style, theme.text_muted_style());
        let name = line.spans.iter().find(|span| span.content == "Acme").unwrap();
        assert_eq!(name.style, theme.text_primary_style());
    }

    #[test]
    fn archived_fulfillers_are_muted_in_every_shape() {
        let localizer = Localizer::embedded();
        let theme = NordTheme::new();
        let archived = acme().archived(true);
        for flags in DisplayFlags::all() {
            let line = get_title(&archived, &ctx(flags, &localizer, &theme));
            assert_eq!(line.style, theme.text_muted_style(), "{flags:?}");
            assert!(line.spans.iter().all(|span| span.style == theme.text_muted_style()), "{flags:?}");
        }
    }
}
