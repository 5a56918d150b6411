//! Typed records for the repeated list sections of the content document.
//!
//! Every record is deserialized leniently: missing string fields become empty
//! strings so a partially filled entry still renders instead of dropping the
//! whole section.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Entry of `site.navigation`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavItem {
    /// Link label.
    pub name: String,
    /// Link target, usually an in-page anchor such as `#about`.
    pub href: String,
}

/// Entry of `footer.links`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterLink {
    pub name: String,
    pub href: String,
}

/// Entry of `collection.products`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Image URL shown on the card.
    pub image: String,
    /// Alt text for the product image.
    pub alt: String,
    pub name: String,
    /// Numeric price. Numeric strings such as `"1200"` are accepted as well.
    #[serde(deserialize_with = "deserialize_price")]
    pub price: Option<f64>,
    /// External product page.
    pub link: String,
}

/// Entry of `features.items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
    /// Icon class list, e.g. `fas fa-gem`.
    pub icon: String,
    pub title: String,
    pub description: String,
}

/// `site.socialMedia` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialMedia {
    pub facebook: Option<String>,
    pub instagram: Option<String>,
}

impl SocialMedia {
    /// Platforms with a non-empty URL, in render order.
    pub fn platforms(&self) -> Vec<(SocialPlatform, &str)> {
        [
            (SocialPlatform::Facebook, self.facebook.as_deref()),
            (SocialPlatform::Instagram, self.instagram.as_deref()),
        ]
        .into_iter()
        .filter_map(|(platform, url)| url.filter(|url| !url.trim().is_empty()).map(|url| (platform, url)))
        .collect()
    }
}

/// Social platforms the footer knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialPlatform {
    Facebook,
    Instagram,
}

impl SocialPlatform {
    /// Lowercase identifier used in class names.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
        }
    }

    /// Capitalized label used for `aria-label`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
        }
    }

    /// Font Awesome brand icon class.
    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Facebook => "fab fa-facebook-f",
            Self::Instagram => "fab fa-instagram",
        }
    }
}

/// `config.emailService` overrides carried by the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmailServiceConfig {
    pub recipient_email: Option<String>,
    pub endpoint: Option<String>,
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_accepts_numeric_string_price() {
        let product: Product = serde_json::from_value(json!({"name": "Shawl", "price": "1,250"})).unwrap();
        assert_eq!(product.price, Some(1250.0));
        assert_eq!(product.image, "");
    }

    #[test]
    fn social_platforms_skip_blank_urls() {
        let social = SocialMedia {
            facebook: Some("  ".into()),
            instagram: Some("https://instagram.com/shop".into()),
        };
        let platforms = social.platforms();
        assert_eq!(platforms, vec![(SocialPlatform::Instagram, "https://instagram.com/shop")]);
    }

    #[test]
    fn email_service_uses_camel_case_keys() {
        let config: EmailServiceConfig =
            serde_json::from_value(json!({"recipientEmail": "shop@example.com", "endpoint": "https://mail.example.com/send"})).unwrap();
        assert_eq!(config.recipient_email.as_deref(), Some("shop@example.com"));
        assert_eq!(config.endpoint.as_deref(), Some("https://mail.example.com/send"));
    }
}
