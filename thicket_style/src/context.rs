// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution context for relative units.

use kurbo::Size;
use thicket_property::LengthBasis;

/// The font size used when nothing else supplies one.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Everything a relative value may resolve against.
///
/// The context is a plain value: parsing never reads any other state.
/// Absent bases are reported as
/// [`ParseError::UnresolvedBasis`](crate::ParseError::UnresolvedBasis) rather
/// than treated as zero.
///
/// # Example
///
/// ```rust
/// use kurbo::Size;
/// use thicket_property::LengthBasis;
/// use thicket_style::ResolveCx;
///
/// let cx = ResolveCx::new()
///     .with_basis(Size::new(200.0, 100.0))
///     .with_percent_of(LengthBasis::Height);
/// assert_eq!(cx.percent_basis(), Some(100.0));
/// assert_eq!(ResolveCx::new().percent_basis(), None);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ResolveCx {
    basis: Option<Size>,
    viewport: Option<Size>,
    font_size: Option<f64>,
    parent_font_size: Option<f64>,
    percent_of: LengthBasis,
}

impl ResolveCx {
    /// Creates a context with no bases.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the containing size percentages resolve against.
    #[must_use]
    pub fn with_basis(mut self, basis: Size) -> Self {
        self.basis = Some(basis);
        self
    }

    /// Sets or clears the containing size.
    #[must_use]
    pub fn with_optional_basis(mut self, basis: Option<Size>) -> Self {
        self.basis = basis;
        self
    }

    /// Sets the viewport for `vw`/`vh`.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Option<Size>) -> Self {
        self.viewport = viewport;
        self
    }

    /// Sets the node's own computed font size, the basis for `em`.
    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// Sets the parent's computed font size.
    #[must_use]
    pub fn with_parent_font_size(mut self, font_size: f64) -> Self {
        self.parent_font_size = Some(font_size);
        self
    }

    /// Selects what `%` means for the value being parsed.
    #[must_use]
    pub fn with_percent_of(mut self, basis: LengthBasis) -> Self {
        self.percent_of = basis;
        self
    }

    /// Returns the containing size.
    #[must_use]
    pub fn basis(&self) -> Option<Size> {
        self.basis
    }

    /// Returns the viewport size.
    #[must_use]
    pub fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    /// Returns the extent `100%` refers to.
    #[must_use]
    pub fn percent_basis(&self) -> Option<f64> {
        match self.percent_of {
            LengthBasis::Width => self.basis.map(|b| b.width),
            LengthBasis::Height => self.basis.map(|b| b.height),
            LengthBasis::Diagonal => self
                .basis
                .map(|b| ((b.width * b.width + b.height * b.height) / 2.0).sqrt()),
            LengthBasis::FontSize => self.parent_font_size,
        }
    }

    /// Returns the length of `1em`.
    ///
    /// A font size resolves `em` against the parent's font size; everything
    /// else against the node's own.
    #[must_use]
    pub fn em_basis(&self) -> Option<f64> {
        match self.percent_of {
            LengthBasis::FontSize => self.parent_font_size,
            _ => self.font_size.or(self.parent_font_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_is_normalized() {
        let cx = ResolveCx::new()
            .with_basis(Size::new(300.0, 400.0))
            .with_percent_of(LengthBasis::Diagonal);
        let expected = (250_000.0_f64 / 2.0).sqrt();
        assert!((cx.percent_basis().unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn font_size_percentages_use_parent() {
        let cx = ResolveCx::new()
            .with_font_size(20.0)
            .with_parent_font_size(10.0)
            .with_percent_of(LengthBasis::FontSize);
        assert_eq!(cx.percent_basis(), Some(10.0));
        assert_eq!(cx.em_basis(), Some(10.0));
        assert_eq!(cx.with_percent_of(LengthBasis::Width).em_basis(), Some(20.0));
    }

    #[test]
    fn missing_basis_stays_missing() {
        let cx = ResolveCx::new();
        assert_eq!(cx.percent_basis(), None);
        assert_eq!(cx.em_basis(), None);
        assert_eq!(cx.viewport(), None);
    }
}
