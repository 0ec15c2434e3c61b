//! Selection state held by the product detail view.
//!
//! The state is nothing more than which of color/size is chosen plus the
//! highlighted media item. Selecting never checks stock; stock only gates the
//! purchase actions.

use crate::availability::resolve_availability;
use crate::error::CoreError;
use crate::media::{initial_media, resolve_active_media};
use crate::model::{ColorVariant, MediaItem, Product, SizeVariant};
use crate::pricing::{resolve_price, PriceBreakdown};

/// Which selections are currently non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    NoSelection,
    ColorOnly,
    SizeOnly,
    ColorAndSize,
}

/// Indices into the product's variant lists plus the highlighted media.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub color: Option<usize>,
    pub size: Option<usize>,
    pub media: Option<MediaItem>,
}

impl Selection {
    /// First color, first size, and the media from [`initial_media`].
    #[must_use]
    pub fn initial(product: &Product) -> Self {
        Self {
            color: (!product.colors.is_empty()).then_some(0),
            size: (!product.sizes.is_empty()).then_some(0),
            media: initial_media(product).cloned(),
        }
    }

    #[must_use]
    pub fn state(&self) -> SelectionState {
        match (self.color.is_some(), self.size.is_some()) {
            (false, false) => SelectionState::NoSelection,
            (true, false) => SelectionState::ColorOnly,
            (false, true) => SelectionState::SizeOnly,
            (true, true) => SelectionState::ColorAndSize,
        }
    }
}

/// A loaded product together with the user's current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    product: Product,
    selection: Selection,
}

impl ProductView {
    pub fn new(product: Product) -> Self {
        let selection = Selection::initial(&product);
        Self { product, selection }
    }

    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn state(&self) -> SelectionState {
        self.selection.state()
    }

    #[must_use]
    pub fn selected_color(&self) -> Option<&ColorVariant> {
        self.selection.color.and_then(|i| self.product.colors.get(i))
    }

    #[must_use]
    pub fn selected_size(&self) -> Option<&SizeVariant> {
        self.selection.size.and_then(|i| self.product.sizes.get(i))
    }

    #[must_use]
    pub fn selected_media(&self) -> Option<&MediaItem> {
        self.selection.media.as_ref()
    }

    /// Selects the color at `index`.
    ///
    /// When that color has its own media the highlighted item jumps to its
    /// first entry; otherwise the highlighted item is left alone.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::VariantIndexOutOfRange`] if `index` is past the
    /// end of the color list.
    pub fn select_color(&mut self, index: usize) -> Result<(), CoreError> {
        let color = self
            .product
            .colors
            .get(index)
            .ok_or(CoreError::VariantIndexOutOfRange {
                axis: "color",
                index,
                len: self.product.colors.len(),
            })?;

        if let Some(first) = color.media.first() {
            self.selection.media = Some(first.clone());
        }
        self.selection.color = Some(index);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`CoreError::UnknownVariant`] if no color has that name.
    pub fn select_color_named(&mut self, name: &str) -> Result<(), CoreError> {
        let index = self
            .product
            .color_index(name)
            .ok_or_else(|| CoreError::UnknownVariant {
                axis: "color",
                name: name.to_owned(),
            })?;
        self.select_color(index)
    }

    /// Selects the size at `index`. Never touches media.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::VariantIndexOutOfRange`] if `index` is past the
    /// end of the size list.
    pub fn select_size(&mut self, index: usize) -> Result<(), CoreError> {
        if index >= self.product.sizes.len() {
            return Err(CoreError::VariantIndexOutOfRange {
                axis: "size",
                index,
                len: self.product.sizes.len(),
            });
        }
        self.selection.size = Some(index);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`CoreError::UnknownVariant`] if no size has that name.
    pub fn select_size_named(&mut self, name: &str) -> Result<(), CoreError> {
        let index = self
            .product
            .size_index(name)
            .ok_or_else(|| CoreError::UnknownVariant {
                axis: "size",
                name: name.to_owned(),
            })?;
        self.select_size(index)
    }

    /// Highlights the item at `index` of the active gallery (thumbnail click).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownMedia`] if `index` is outside the active
    /// gallery.
    pub fn select_media(&mut self, index: usize) -> Result<(), CoreError> {
        let active = self.active_media();
        let item = active.get(index).cloned().ok_or(CoreError::UnknownMedia {
            index,
            len: active.len(),
        })?;
        self.selection.media = Some(item);
        Ok(())
    }

    #[must_use]
    pub fn active_media(&self) -> &[MediaItem] {
        resolve_active_media(&self.product, self.selected_color())
    }

    #[must_use]
    pub fn price(&self) -> PriceBreakdown {
        resolve_price(self.product.base_price, self.product.promotion_percent)
    }

    /// Whether add-to-cart and buy-now are enabled for this selection.
    #[must_use]
    pub fn is_available(&self) -> bool {
        resolve_availability(&self.product, self.selected_size(), self.selected_color())
    }

    #[must_use]
    pub fn into_product(self) -> Product {
        self.product
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{color, product, size};
    use crate::model::Stock;

    fn dressed_product() -> Product {
        let mut p = product();
        p.colors = vec![
            color("Noir", Stock::Untracked, &["noir-1.jpg", "noir-2.jpg"]),
            color("Sable", Stock::Untracked, &[]),
            color("Olive", Stock::Untracked, &["olive-1.jpg"]),
        ];
        p.sizes = vec![size("M", Stock::Tracked(0)), size("L", Stock::Tracked(5))];
        p
    }

    #[test]
    fn initial_selection_takes_first_of_each_axis() {
        let view = ProductView::new(dressed_product());
        assert_eq!(view.selected_color().map(|c| c.name.as_str()), Some("Noir"));
        assert_eq!(view.selected_size().map(|s| s.name.as_str()), Some("M"));
        assert_eq!(view.selected_media().map(|m| m.src.as_str()), Some("noir-1.jpg"));
        assert_eq!(view.state(), SelectionState::ColorAndSize);
    }

    #[test]
    fn state_reflects_populated_axes() {
        let mut p = product();
        assert_eq!(ProductView::new(p.clone()).state(), SelectionState::NoSelection);

        p.colors = vec![color("Noir", Stock::Untracked, &[])];
        assert_eq!(ProductView::new(p.clone()).state(), SelectionState::ColorOnly);

        p.colors.clear();
        p.sizes = vec![size("M", Stock::Untracked)];
        assert_eq!(ProductView::new(p).state(), SelectionState::SizeOnly);
    }

    #[test]
    fn media_follows_color_and_not_size() {
        let mut view = ProductView::new(dressed_product());
        view.select_color(0).unwrap();
        view.select_color(2).unwrap();
        assert_eq!(view.selected_media().map(|m| m.src.as_str()), Some("olive-1.jpg"));

        view.select_size(1).unwrap();
        assert_eq!(view.selected_media().map(|m| m.src.as_str()), Some("olive-1.jpg"));
    }

    #[test]
    fn color_without_media_keeps_highlighted_item() {
        let mut view = ProductView::new(dressed_product());
        view.select_media(1).unwrap();
        view.select_color_named("sable").unwrap();
        assert_eq!(view.selected_media().map(|m| m.src.as_str()), Some("noir-2.jpg"));
        // Sable has no gallery, so the first declared color's gallery shows.
        assert_eq!(view.active_media()[0].src, "noir-1.jpg");
    }

    #[test]
    fn out_of_stock_size_can_be_selected_but_not_bought() {
        let mut view = ProductView::new(dressed_product());
        view.select_size_named("M").unwrap();
        assert_eq!(view.selected_size().map(|s| s.name.as_str()), Some("M"));
        assert!(!view.is_available());

        view.select_size_named("L").unwrap();
        assert!(view.is_available());
    }

    #[test]
    fn unknown_names_and_indices_are_rejected() {
        let mut view = ProductView::new(dressed_product());
        assert_eq!(
            view.select_size_named("XXL"),
            Err(CoreError::UnknownVariant {
                axis: "size",
                name: "XXL".to_owned()
            })
        );
        assert!(matches!(
            view.select_color(9),
            Err(CoreError::VariantIndexOutOfRange { axis: "color", index: 9, len: 3 })
        ));
        assert!(matches!(
            view.select_media(5),
            Err(CoreError::UnknownMedia { index: 5, len: 2 })
        ));
        // Failed selections leave state untouched.
        assert_eq!(view.selected_size().map(|s| s.name.as_str()), Some("M"));
    }
}
