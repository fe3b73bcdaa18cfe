//! Child block shapes.
//!
//! Every child block has an `id` (unique within its parent array) and a
//! `visible` flag. Blocks with more than one shape flatten a `type`-tagged
//! content enum next to those two fields:
//!
//! ```json
//! { "id": "column-3", "visible": true, "type": "icon", "icon": "bed", "title": "Rooms", "text": "" }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ChildBlock;
use crate::error::ModelError;

fn default_visible() -> bool {
    true
}

/// Shape marker for child arrays with a single block shape
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SingleShape;

impl FromStr for SingleShape {
    type Err = ModelError;

    fn from_str(_: &str) -> Result<Self, Self::Err> {
        Ok(SingleShape)
    }
}

/// Declares a shape enum together with its wire tags
macro_rules! block_shape {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $tag:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            #[default]
            $($variant),+
        }

        impl $name {
            pub fn tag(self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($tag => Ok($name::$variant),)+
                    other => Err(ModelError::UnknownBlockShape(other.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.tag())
            }
        }
    };
}

/// Implements [`ChildBlock`] for a struct with `id` and `visible` fields
macro_rules! impl_child_block {
    ($ty:ident, shape = $shape:ty, prefix = $prefix:literal, defaults = $defaults:expr) => {
        impl ChildBlock for $ty {
            type Shape = $shape;
            const ID_PREFIX: &'static str = $prefix;

            fn with_defaults(id: String, shape: Self::Shape) -> Self {
                let build: fn(String, $shape) -> $ty = $defaults;
                build(id, shape)
            }

            fn id(&self) -> &str {
                &self.id
            }

            fn is_visible(&self) -> bool {
                self.visible
            }

            fn set_visible(&mut self, visible: bool) {
                self.visible = visible;
            }
        }
    };
}

/// Labelled URL used by buttons and menus
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Announcement bar

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl_child_block!(Announcement, shape = SingleShape, prefix = "announcement", defaults = |id, _| Announcement {
    id,
    visible: true,
    text: "Welcome to our store".to_string(),
    link: None,
});

// ---------------------------------------------------------------------------
// Footer

block_shape!(FooterShape {
    LinkList => "link_list",
    Text => "text",
    Social => "social",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FooterContent {
    LinkList {
        #[serde(default)]
        heading: String,
        #[serde(default)]
        links: Vec<Link>,
    },
    Text {
        #[serde(default)]
        heading: String,
        #[serde(default)]
        body: String,
    },
    Social {
        #[serde(default)]
        heading: String,
        #[serde(default = "default_visible", rename = "showIcons")]
        show_icons: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterBlock {
    pub id: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(flatten)]
    pub content: FooterContent,
}

impl FooterBlock {
    pub fn shape(&self) -> FooterShape {
        match self.content {
            FooterContent::LinkList { .. } => FooterShape::LinkList,
            FooterContent::Text { .. } => FooterShape::Text,
            FooterContent::Social { .. } => FooterShape::Social,
        }
    }
}

impl_child_block!(FooterBlock, shape = FooterShape, prefix = "footer-block", defaults = |id, shape| {
    let content = match shape {
        FooterShape::LinkList => FooterContent::LinkList {
            heading: "Quick links".to_string(),
            links: Vec::new(),
        },
        FooterShape::Text => FooterContent::Text {
            heading: "About us".to_string(),
            body: String::new(),
        },
        FooterShape::Social => FooterContent::Social {
            heading: "Follow us".to_string(),
            show_icons: true,
        },
    };
    FooterBlock { id, visible: true, content }
});

// ---------------------------------------------------------------------------
// Slideshow

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub subheading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<Link>,
}

impl_child_block!(Slide, shape = SingleShape, prefix = "slide", defaults = |id, _| Slide {
    id,
    visible: true,
    image: None,
    heading: "Image slide".to_string(),
    subheading: "Tell your brand's story through images".to_string(),
    button: None,
});

// ---------------------------------------------------------------------------
// Multicolumns

block_shape!(ColumnShape {
    Icon => "icon",
    Image => "image",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnContent {
    Icon {
        #[serde(default)]
        icon: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        text: String,
    },
    Image {
        #[serde(default)]
        image: Option<String>,
        #[serde(default)]
        title: String,
        #[serde(default)]
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnItem {
    pub id: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(flatten)]
    pub content: ColumnContent,
}

impl ColumnItem {
    pub fn shape(&self) -> ColumnShape {
        match self.content {
            ColumnContent::Icon { .. } => ColumnShape::Icon,
            ColumnContent::Image { .. } => ColumnShape::Image,
        }
    }
}

impl_child_block!(ColumnItem, shape = ColumnShape, prefix = "column", defaults = |id, shape| {
    let content = match shape {
        ColumnShape::Icon => ColumnContent::Icon {
            icon: "star".to_string(),
            title: "Column".to_string(),
            text: String::new(),
        },
        ColumnShape::Image => ColumnContent::Image {
            image: None,
            title: "Column".to_string(),
            text: String::new(),
        },
    };
    ColumnItem { id, visible: true, content }
});

// ---------------------------------------------------------------------------
// Gallery

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub caption: String,
}

impl_child_block!(GalleryItem, shape = SingleShape, prefix = "gallery-item", defaults = |id, _| GalleryItem {
    id,
    visible: true,
    image: None,
    caption: String::new(),
});

// ---------------------------------------------------------------------------
// Image with text / rich text

block_shape!(ContentShape {
    Heading => "heading",
    Text => "text",
    Button => "button",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlockKind {
    Heading {
        #[serde(default)]
        text: String,
    },
    Text {
        #[serde(default)]
        text: String,
    },
    Button {
        #[serde(default)]
        label: String,
        #[serde(default)]
        url: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(flatten)]
    pub content: ContentBlockKind,
}

impl ContentBlock {
    pub fn shape(&self) -> ContentShape {
        match self.content {
            ContentBlockKind::Heading { .. } => ContentShape::Heading,
            ContentBlockKind::Text { .. } => ContentShape::Text,
            ContentBlockKind::Button { .. } => ContentShape::Button,
        }
    }
}

impl_child_block!(ContentBlock, shape = ContentShape, prefix = "block", defaults = |id, shape| {
    let content = match shape {
        ContentShape::Heading => ContentBlockKind::Heading {
            text: "Heading".to_string(),
        },
        ContentShape::Text => ContentBlockKind::Text {
            text: "Pair text with an image to focus on your chosen product.".to_string(),
        },
        ContentShape::Button => ContentBlockKind::Button {
            label: "Button label".to_string(),
            url: String::new(),
        },
    };
    ContentBlock { id, visible: true, content }
});

// ---------------------------------------------------------------------------
// FAQ

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    pub id: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

impl_child_block!(FaqItem, shape = SingleShape, prefix = "faq", defaults = |id, _| FaqItem {
    id,
    visible: true,
    question: "Question".to_string(),
    answer: String::new(),
});

// ---------------------------------------------------------------------------
// Testimonials

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub author: String,
    #[serde(default = "default_rating")]
    pub rating: u8,
}

fn default_rating() -> u8 {
    5
}

impl_child_block!(Testimonial, shape = SingleShape, prefix = "testimonial", defaults = |id, _| Testimonial {
    id,
    visible: true,
    quote: "Add a customer quote".to_string(),
    author: String::new(),
    rating: default_rating(),
});

// ---------------------------------------------------------------------------
// Newsletter

block_shape!(NewsletterShape {
    Heading => "heading",
    Paragraph => "paragraph",
    EmailForm => "email_form",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NewsletterContent {
    Heading {
        #[serde(default)]
        text: String,
    },
    Paragraph {
        #[serde(default)]
        text: String,
    },
    EmailForm {
        #[serde(default)]
        placeholder: String,
        #[serde(default, rename = "buttonLabel")]
        button_label: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterBlock {
    pub id: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(flatten)]
    pub content: NewsletterContent,
}

impl NewsletterBlock {
    pub fn shape(&self) -> NewsletterShape {
        match self.content {
            NewsletterContent::Heading { .. } => NewsletterShape::Heading,
            NewsletterContent::Paragraph { .. } => NewsletterShape::Paragraph,
            NewsletterContent::EmailForm { .. } => NewsletterShape::EmailForm,
        }
    }
}

impl_child_block!(NewsletterBlock, shape = NewsletterShape, prefix = "newsletter-block", defaults = |id, shape| {
    let content = match shape {
        NewsletterShape::Heading => NewsletterContent::Heading {
            text: "Subscribe to our emails".to_string(),
        },
        NewsletterShape::Paragraph => NewsletterContent::Paragraph {
            text: "Be the first to know about new rooms and exclusive offers.".to_string(),
        },
        NewsletterShape::EmailForm => NewsletterContent::EmailForm {
            placeholder: "Email".to_string(),
            button_label: "Subscribe".to_string(),
        },
    };
    NewsletterBlock { id, visible: true, content }
});

// ---------------------------------------------------------------------------
// Room amenities

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub label: String,
}

impl_child_block!(Amenity, shape = SingleShape, prefix = "amenity", defaults = |id, _| Amenity {
    id,
    visible: true,
    icon: "wifi".to_string(),
    label: "Free Wi-Fi".to_string(),
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_item_wire_shape() {
        let item = ColumnItem::with_defaults("c1".to_string(), ColumnShape::Icon);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["id"], "c1");
        assert_eq!(json["type"], "icon");
        assert_eq!(json["visible"], true);
        assert_eq!(json["icon"], "star");

        let back: ColumnItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_missing_visible_defaults_to_true() {
        let slide: Slide = serde_json::from_str(r#"{ "id": "slide-1", "heading": "Summer" }"#).unwrap();
        assert!(slide.visible);
        assert_eq!(slide.heading, "Summer");
    }

    #[test]
    fn test_shape_tags_parse() {
        assert_eq!("image".parse::<ColumnShape>().unwrap(), ColumnShape::Image);
        assert_eq!("email_form".parse::<NewsletterShape>().unwrap(), NewsletterShape::EmailForm);
        assert!("video".parse::<ColumnShape>().is_err());
        assert_eq!(ColumnShape::default(), ColumnShape::Icon);
    }

    #[test]
    fn test_defaults_follow_shape() {
        let block = NewsletterBlock::with_defaults("b1".to_string(), NewsletterShape::EmailForm);
        assert_eq!(block.shape(), NewsletterShape::EmailForm);

        let footer = FooterBlock::with_defaults("f1".to_string(), FooterShape::Social);
        assert_eq!(footer.shape(), FooterShape::Social);
        assert!(footer.is_visible());
    }
}
