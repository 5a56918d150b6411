//! Fragment builders for the repeated list sections.

use sitebind_types::{Feature, FooterLink, NavItem, Product, SocialMedia};
use sitebind_util::price_label;

use crate::dom::Fragment;

pub fn about_paragraph(text: &str) -> Fragment {
    Fragment::new("p").class("about-text").text(text)
}

pub fn nav_item(item: &NavItem) -> Fragment {
    Fragment::new("li")
        .class("nav-item")
        .child(Fragment::new("a").class("nav-link").attr("href", &item.href).text(&item.name))
}

pub fn product_card(product: &Product, currency: &str) -> Fragment {
    let image = Fragment::new("div").class("product-image").child(
        Fragment::new("img")
            .attr("src", &product.image)
            .attr("alt", &product.alt)
            .class("img-fluid"),
    );
    let content = Fragment::new("div")
        .class("product-content")
        .child(Fragment::new("h5").class("product-title").text(&product.name))
        .child(
            Fragment::new("p")
                .class("product-price")
                .text(price_label(currency, product.price)),
        )
        .child(
            Fragment::new("a")
                .attr("href", &product.link)
                .class("btn btn-outline-primary btn-sm")
                .text("View on Facebook"),
        );

    Fragment::new("div")
        .class("col-md-6 col-lg-3")
        .child(Fragment::new("div").class("product-card").child(image).child(content))
}

pub fn feature_card(feature: &Feature) -> Fragment {
    Fragment::new("div").class("col-md-4 text-center").child(
        Fragment::new("div")
            .class("feature-card")
            .child(Fragment::new("div").class("feature-icon").child(Fragment::new("i").attr("class", &feature.icon)))
            .child(Fragment::new("h5").class("feature-title").text(&feature.title))
            .child(Fragment::new("p").class("feature-text").text(&feature.description)),
    )
}

/// Links for every platform with a URL, facebook first.
pub fn social_links(social: &SocialMedia) -> Vec<Fragment> {
    social
        .platforms()
        .into_iter()
        .map(|(platform, url)| {
            Fragment::new("a")
                .attr("href", url)
                .class("social-link")
                .class(platform.slug())
                .attr("aria-label", platform.label())
                .child(Fragment::new("i").attr("class", platform.icon_class()))
        })
        .collect()
}

pub fn footer_link(link: &FooterLink) -> Fragment {
    Fragment::new("a")
        .attr("href", &link.href)
        .class("footer-link")
        .text(&link.name)
}
