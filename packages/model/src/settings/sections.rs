//! Per-type section settings.
//!
//! All settings structs deserialize with defaults, so a partially stored
//! settings object still loads.

use serde::{Deserialize, Serialize};

use super::blocks::{
    Amenity, Announcement, ColumnItem, ContentBlock, FaqItem, FooterBlock, GalleryItem, Link, NewsletterBlock, Slide,
    Testimonial,
};

fn default_color_scheme() -> String {
    "scheme-1".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagePosition {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerHeight {
    Small,
    #[default]
    Medium,
    Large,
    AdaptToImage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GalleryLayout {
    #[default]
    Grid,
    Masonry,
    Carousel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderSettings {
    pub logo: Option<String>,
    pub menu: Vec<Link>,
    pub sticky: bool,
    pub show_search: bool,
    pub color_scheme: String,
}

impl Default for HeaderSettings {
    fn default() -> Self {
        Self {
            logo: None,
            menu: Vec::new(),
            sticky: true,
            show_search: true,
            color_scheme: default_color_scheme(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnouncementBarSettings {
    pub blocks: Vec<Announcement>,
    pub autoplay: bool,
    pub color_scheme: String,
}

impl Default for AnnouncementBarSettings {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            autoplay: false,
            color_scheme: default_color_scheme(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterSettings {
    pub blocks: Vec<FooterBlock>,
    pub copyright: String,
    pub show_payment_icons: bool,
    pub color_scheme: String,
}

impl Default for FooterSettings {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            copyright: String::new(),
            show_payment_icons: true,
            color_scheme: default_color_scheme(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageBannerSettings {
    pub image: Option<String>,
    pub heading: String,
    pub subheading: String,
    pub button: Option<Link>,
    /// Overlay opacity in percent
    pub overlay_opacity: u8,
    pub height: BannerHeight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlideshowSettings {
    pub slides: Vec<Slide>,
    pub autoplay: bool,
    pub speed_seconds: u32,
    pub show_arrows: bool,
}

impl Default for SlideshowSettings {
    fn default() -> Self {
        Self {
            slides: Vec::new(),
            autoplay: false,
            speed_seconds: 5,
            show_arrows: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MulticolumnsSettings {
    pub heading: String,
    pub columns_desktop: u8,
    pub items: Vec<ColumnItem>,
    pub color_scheme: String,
}

impl Default for MulticolumnsSettings {
    fn default() -> Self {
        Self {
            heading: String::new(),
            columns_desktop: 3,
            items: Vec::new(),
            color_scheme: default_color_scheme(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GallerySettings {
    pub heading: String,
    pub layout: GalleryLayout,
    pub items: Vec<GalleryItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageWithTextSettings {
    pub image: Option<String>,
    pub image_position: ImagePosition,
    pub blocks: Vec<ContentBlock>,
    pub color_scheme: String,
}

impl Default for ImageWithTextSettings {
    fn default() -> Self {
        Self {
            image: None,
            image_position: ImagePosition::Left,
            blocks: Vec::new(),
            color_scheme: default_color_scheme(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeaturedCollectionSettings {
    pub heading: String,
    /// Collection handle, resolved by the storefront at render time
    pub collection: Option<String>,
    pub products_to_show: u32,
    pub columns_desktop: u8,
    pub show_view_all: bool,
}

impl Default for FeaturedCollectionSettings {
    fn default() -> Self {
        Self {
            heading: "Featured collection".to_string(),
            collection: None,
            products_to_show: 4,
            columns_desktop: 4,
            show_view_all: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaqSettings {
    pub heading: String,
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestimonialsSettings {
    pub heading: String,
    pub items: Vec<Testimonial>,
    pub autoplay: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RichTextSettings {
    pub blocks: Vec<ContentBlock>,
    pub alignment: Alignment,
    pub color_scheme: String,
}

impl Default for RichTextSettings {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            alignment: Alignment::Center,
            color_scheme: default_color_scheme(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactFormSettings {
    pub heading: String,
    pub show_phone: bool,
    pub submit_label: String,
}

impl Default for ContactFormSettings {
    fn default() -> Self {
        Self {
            heading: "Contact form".to_string(),
            show_phone: true,
            submit_label: "Send".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsletterSettings {
    pub blocks: Vec<NewsletterBlock>,
    pub color_scheme: String,
}

impl Default for NewsletterSettings {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            color_scheme: default_color_scheme(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomListSettings {
    pub heading: String,
    pub rooms_to_show: u32,
    pub show_prices: bool,
}

impl Default for RoomListSettings {
    fn default() -> Self {
        Self {
            heading: "Our rooms".to_string(),
            rooms_to_show: 6,
            show_prices: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomDetailsSettings {
    pub show_amenities: bool,
    pub show_gallery: bool,
    pub booking_label: String,
}

impl Default for RoomDetailsSettings {
    fn default() -> Self {
        Self {
            show_amenities: true,
            show_gallery: true,
            booking_label: "Book now".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomAmenitiesSettings {
    pub heading: String,
    pub items: Vec<Amenity>,
}
