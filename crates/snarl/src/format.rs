// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use crate::Snarl;

const SEPARATOR: &str = ": ";

/// Rendering style of a [`Snarl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// The main error message. Same as `{}`.
    Short,
    /// The main error message followed by every wrapped message, joined with `": "`. Same as `{:#}`.
    Long,
    /// The short form in double quotes, with special characters escaped.
    Quoted,
}

impl Verb {
    /// Maps a single-character verb to a style: `'s'` short, `'v'` long, `'q'` quoted.
    #[must_use]
    pub fn from_char(verb: char) -> Option<Self> {
        match verb {
            's' => Some(Self::Short),
            'v' => Some(Self::Long),
            'q' => Some(Self::Quoted),
            _ => None,
        }
    }
}

impl Snarl {
    /// Returns a [`Display`](fmt::Display) adapter for the long form.
    ///
    /// ```rust
    /// let error = snarl::snarl!("base", "layer 1", "layer 2").unwrap();
    /// assert_eq!(error.long().to_string(), "base: layer 1: layer 2");
    /// ```
    #[must_use]
    pub fn long(&self) -> Long<'_> {
        Long(self)
    }

    /// Returns a [`Display`](fmt::Display) adapter for the quoted form.
    ///
    /// ```rust
    /// let error = snarl::snarl!("say \"hi\"").unwrap();
    /// assert_eq!(error.quoted().to_string(), r#""say \"hi\"""#);
    /// ```
    #[must_use]
    pub fn quoted(&self) -> Quoted<'_> {
        Quoted(self)
    }

    /// Renders the composite in the given style.
    #[must_use]
    pub fn render(&self, verb: Verb) -> String {
        match verb {
            Verb::Short => self.to_string(),
            Verb::Long => self.long().to_string(),
            Verb::Quoted => self.quoted().to_string(),
        }
    }

    /// Renders the composite for a single-character verb (see [`Verb::from_char`]).
    ///
    /// Unknown verbs render as an empty string.
    #[must_use]
    pub fn format_verb(&self, verb: char) -> String {
        Verb::from_char(verb).map(|verb| self.render(verb)).unwrap_or_default()
    }
}

/// Long form of a [`Snarl`], created by [`Snarl::long`].
#[derive(Debug, Clone, Copy)]
pub struct Long<'a>(&'a Snarl);

impl fmt::Display for Long<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.main_error())?;
        for wrapped in self.0.wrapped() {
            write!(f, "{SEPARATOR}{wrapped}")?;
        }
        Ok(())
    }
}

/// Quoted form of a [`Snarl`], created by [`Snarl::quoted`].
#[derive(Debug, Clone, Copy)]
pub struct Quoted<'a>(&'a Snarl);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0.main_error().to_string())
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_from_chars() {
        assert_eq!(Verb::from_char('s'), Some(Verb::Short));
        assert_eq!(Verb::from_char('v'), Some(Verb::Long));
        assert_eq!(Verb::from_char('q'), Some(Verb::Quoted));
        assert_eq!(Verb::from_char('d'), None);
    }

    #[test]
    fn render_all_styles() {
        let error = Snarl::compose("base", ["layer 1", "layer 2"]).unwrap();
        insta::assert_snapshot!(error.render(Verb::Short), @"base");
        insta::assert_snapshot!(error.render(Verb::Long), @"base: layer 1: layer 2");
        insta::assert_snapshot!(error.render(Verb::Quoted), @r#""base""#);
    }

    #[test]
    fn unknown_verb_renders_nothing() {
        let error = Snarl::compose("base", ["layer"]).unwrap();
        assert_eq!(error.format_verb('x'), "");
        assert_eq!(error.format_verb('v'), "base: layer");
    }

    #[test]
    fn long_form_without_wrapped_is_short_form() {
        let error = Snarl::new("alone").unwrap();
        assert_eq!(error.long().to_string(), "alone");
    }

    #[test]
    fn nested_wrapped_composites_render_short() {
        let inner = Snarl::compose("inner", ["hidden"]).unwrap();
        let outer = Snarl::compose("outer", [inner]).unwrap();
        assert_eq!(format!("{outer:#}"), "outer: inner");
    }

    #[test]
    fn quoted_escapes_control_characters() {
        let error = Snarl::new("line\nbreak\t\"q\"").unwrap();
        assert_eq!(error.quoted().to_string(), r#""line\nbreak\t\"q\"""#);
    }

    #[test]
    fn long_form_keeps_empty_annotations() {
        let error = Snarl::compose("a", ["", "c"]).unwrap();
        assert_eq!(error.long().to_string(), "a: : c");
    }
}
