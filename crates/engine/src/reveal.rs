//! Reveal-on-scroll markers.
//!
//! Sections and cards start with the `loading` class; cards get a staggered
//! `animation-delay`. The host reports elements entering the viewport and
//! each one is revealed once with `loaded`.

use tracing::debug;

use crate::dom::{NodeId, PageDom};

pub const LOADING_CLASS: &str = "loading";
pub const LOADED_CLASS: &str = "loaded";

const PRODUCT_CARD_STAGGER_SECS: f64 = 0.1;
const FEATURE_CARD_STAGGER_SECS: f64 = 0.2;

/// Elements waiting to be revealed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealSet {
    pending: Vec<NodeId>,
}

impl RevealSet {
    /// Mark sections, product cards and feature cards as loading.
    pub fn mark<D: PageDom + ?Sized>(dom: &mut D) -> Self {
        let mut pending = dom.elements_by_tag("section");
        for section in &pending {
            dom.add_class(*section, LOADING_CLASS);
        }
        pending.extend(stagger(dom, "product-card", PRODUCT_CARD_STAGGER_SECS));
        pending.extend(stagger(dom, "feature-card", FEATURE_CARD_STAGGER_SECS));
        debug!(targets = pending.len(), "reveal targets marked");
        Self { pending }
    }

    pub fn pending(&self) -> &[NodeId] {
        &self.pending
    }

    /// Reveal `node` if it is still waiting. Returns whether it was revealed.
    pub fn reveal<D: PageDom + ?Sized>(&mut self, dom: &mut D, node: NodeId) -> bool {
        let Some(position) = self.pending.iter().position(|candidate| *candidate == node) else {
            return false;
        };
        self.pending.remove(position);
        dom.add_class(node, LOADED_CLASS);
        true
    }
}

fn stagger<D: PageDom + ?Sized>(dom: &mut D, class: &str, step_secs: f64) -> Vec<NodeId> {
    let cards = dom.elements_by_class(class);
    for (index, card) in cards.iter().enumerate() {
        dom.set_style_property(*card, "animation-delay", &format!("{:.1}s", index as f64 * step_secs));
        dom.add_class(*card, LOADING_CLASS);
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_page;

    #[test]
    fn cards_are_staggered_and_revealed_once() {
        let mut dom = parse_page(
            r#"<section id="products"><div class="product-card"></div><div class="product-card"></div></section>
            <section id="features"><div class="feature-card"></div><div class="feature-card"></div></section>"#,
        );
        let mut reveal = RevealSet::mark(&mut dom);
        assert_eq!(reveal.pending().len(), 6);

        let features = dom.elements_by_class("feature-card");
        assert_eq!(dom.style_property(features[1], "animation-delay").as_deref(), Some("0.2s"));
        let products = dom.elements_by_class("product-card");
        assert_eq!(dom.style_property(products[0], "animation-delay").as_deref(), Some("0.0s"));
        assert_eq!(dom.style_property(products[1], "animation-delay").as_deref(), Some("0.1s"));
        assert!(dom.has_class(products[1], LOADING_CLASS));

        assert!(reveal.reveal(&mut dom, products[1]));
        assert!(dom.has_class(products[1], LOADED_CLASS));
        assert!(!reveal.reveal(&mut dom, products[1]));
        assert_eq!(reveal.pending().len(), 5);
    }
}
