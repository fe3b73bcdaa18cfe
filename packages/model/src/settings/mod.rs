//! # Section Settings
//!
//! `SectionSettings` is a tagged union with one concrete struct per section
//! type. Unknown type tags keep their raw JSON untouched so a page authored
//! by a newer editor survives a load/save cycle.
//!
//! ## Typed access
//!
//! - [`SectionKind`] ties a settings struct to its [`SectionType`].
//! - [`BlockContainer`] marks settings that own an array of child blocks.
//! - [`BlockList`] is the shape-independent view of a child array used by
//!   reorder, visibility toggles, deletes and JSON patches.

mod blocks;
mod sections;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::reorder::move_item;
use crate::section::SectionType;
use crate::selection::ChildKind;

pub use blocks::*;
pub use sections::*;

/// A nested, independently editable element of a section
pub trait ChildBlock: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + 'static {
    /// Discriminator for blocks that come in several shapes
    type Shape: Copy + Default + fmt::Debug + FromStr;

    /// Prefix for generated ids
    const ID_PREFIX: &'static str;

    /// A new block of the given shape with editor defaults
    fn with_defaults(id: String, shape: Self::Shape) -> Self;

    fn id(&self) -> &str;

    fn is_visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);
}

/// Settings struct bound to one section type
pub trait SectionKind: Clone + Default + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + 'static {
    const TYPE: SectionType;

    fn from_settings(settings: &SectionSettings) -> Option<&Self>;

    fn from_settings_mut(settings: &mut SectionSettings) -> Option<&mut Self>;

    fn into_settings(self) -> SectionSettings;
}

/// Settings that own an ordered array of child blocks
pub trait BlockContainer: SectionKind {
    type Block: ChildBlock;

    /// Routing tag used in child selection refs
    const CHILD_KIND: ChildKind;

    fn blocks(&self) -> &[Self::Block];

    fn blocks_mut(&mut self) -> &mut Vec<Self::Block>;
}

/// Error from patching a child block with a JSON object
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("Patch does not fit the block shape: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("Block is not a JSON object")]
    NotAnObject,
}

/// Shape-independent view of a child block array
pub trait BlockList {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ids(&self) -> Vec<&str>;

    fn position(&self, id: &str) -> Option<usize>;

    fn is_visible(&self, id: &str) -> Option<bool>;

    /// Stable move; false if either index is out of range
    fn move_block(&mut self, from: usize, to: usize) -> bool;

    /// Flip `visible` on the matching block only
    fn toggle_visible(&mut self, id: &str) -> bool;

    fn remove_block(&mut self, id: &str) -> bool;

    /// Append a block with defaults; `shape` is a wire tag, `None` means the default shape
    fn push_default(&mut self, id: String, shape: Option<&str>) -> bool;

    /// Shallow-merge `patch` into the matching block; `id` is never overwritten
    fn patch(&mut self, id: &str, patch: &Map<String, Value>) -> Result<bool, PatchError>;

    fn id_prefix(&self) -> &'static str;

    fn to_json(&self, id: &str) -> Option<Value>;
}

impl<B: ChildBlock> BlockList for Vec<B> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn ids(&self) -> Vec<&str> {
        self.iter().map(|b| b.id()).collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.iter().position(|b| b.id() == id)
    }

    fn is_visible(&self, id: &str) -> Option<bool> {
        self.iter().find(|b| b.id() == id).map(|b| b.is_visible())
    }

    fn move_block(&mut self, from: usize, to: usize) -> bool {
        move_item(self, from, to)
    }

    fn toggle_visible(&mut self, id: &str) -> bool {
        match self.iter_mut().find(|b| b.id() == id) {
            Some(block) => {
                let visible = block.is_visible();
                block.set_visible(!visible);
                true
            }
            None => false,
        }
    }

    fn remove_block(&mut self, id: &str) -> bool {
        let before = Vec::len(self);
        self.retain(|b| b.id() != id);
        Vec::len(self) != before
    }

    fn push_default(&mut self, id: String, shape: Option<&str>) -> bool {
        let shape = match shape {
            Some(tag) => match tag.parse::<B::Shape>() {
                Ok(shape) => shape,
                Err(_) => return false,
            },
            None => B::Shape::default(),
        };
        self.push(B::with_defaults(id, shape));
        true
    }

    fn patch(&mut self, id: &str, patch: &Map<String, Value>) -> Result<bool, PatchError> {
        let Some(block) = self.iter_mut().find(|b| b.id() == id) else {
            return Ok(false);
        };

        let mut fields = match serde_json::to_value(&*block)? {
            Value::Object(fields) => fields,
            _ => return Err(PatchError::NotAnObject),
        };
        for (key, value) in patch {
            if key != "id" {
                fields.insert(key.clone(), value.clone());
            }
        }

        *block = serde_json::from_value(Value::Object(fields))?;
        Ok(true)
    }

    fn id_prefix(&self) -> &'static str {
        B::ID_PREFIX
    }

    fn to_json(&self, id: &str) -> Option<Value> {
        self.iter()
            .find(|b| b.id() == id)
            .and_then(|b| serde_json::to_value(b).ok())
    }
}

/// Typed settings of a section
#[derive(Debug, Clone, PartialEq)]
pub enum SectionSettings {
    Header(HeaderSettings),
    AnnouncementBar(AnnouncementBarSettings),
    Footer(FooterSettings),
    ImageBanner(ImageBannerSettings),
    Slideshow(SlideshowSettings),
    Multicolumns(MulticolumnsSettings),
    Gallery(GallerySettings),
    ImageWithText(ImageWithTextSettings),
    FeaturedCollection(FeaturedCollectionSettings),
    Faq(FaqSettings),
    Testimonials(TestimonialsSettings),
    RichText(RichTextSettings),
    ContactForm(ContactFormSettings),
    Newsletter(NewsletterSettings),
    RoomList(RoomListSettings),
    RoomDetails(RoomDetailsSettings),
    RoomAmenities(RoomAmenitiesSettings),

    /// Type tag this build does not know; rendered as a placeholder
    Unknown { type_tag: String, settings: Value },
}

impl SectionSettings {
    /// Editor defaults for a freshly added section
    pub fn defaults_for(section_type: SectionType) -> Self {
        match section_type {
            SectionType::Header => HeaderSettings::default().into(),
            SectionType::AnnouncementBar => AnnouncementBarSettings::default().into(),
            SectionType::Footer => FooterSettings::default().into(),
            SectionType::ImageBanner => ImageBannerSettings::default().into(),
            SectionType::Slideshow => SlideshowSettings::default().into(),
            SectionType::Multicolumns => MulticolumnsSettings::default().into(),
            SectionType::Gallery => GallerySettings::default().into(),
            SectionType::ImageWithText => ImageWithTextSettings::default().into(),
            SectionType::FeaturedCollection => FeaturedCollectionSettings::default().into(),
            SectionType::Faq => FaqSettings::default().into(),
            SectionType::Testimonials => TestimonialsSettings::default().into(),
            SectionType::RichText => RichTextSettings::default().into(),
            SectionType::ContactForm => ContactFormSettings::default().into(),
            SectionType::Newsletter => NewsletterSettings::default().into(),
            SectionType::RoomList => RoomListSettings::default().into(),
            SectionType::RoomDetails => RoomDetailsSettings::default().into(),
            SectionType::RoomAmenities => RoomAmenitiesSettings::default().into(),
        }
    }

    /// Type settings stored under `type_tag`
    ///
    /// `type_tag` must already be canonical; legacy tags land in `Unknown`.
    pub fn from_json(type_tag: &str, settings: Value) -> Result<Self, serde_json::Error> {
        let settings = match settings {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };

        let Some(section_type) = SectionType::from_tag(type_tag) else {
            return Ok(SectionSettings::Unknown {
                type_tag: type_tag.to_string(),
                settings,
            });
        };

        Ok(match section_type {
            SectionType::Header => SectionSettings::Header(serde_json::from_value(settings)?),
            SectionType::AnnouncementBar => SectionSettings::AnnouncementBar(serde_json::from_value(settings)?),
            SectionType::Footer => SectionSettings::Footer(serde_json::from_value(settings)?),
            SectionType::ImageBanner => SectionSettings::ImageBanner(serde_json::from_value(settings)?),
            SectionType::Slideshow => SectionSettings::Slideshow(serde_json::from_value(settings)?),
            SectionType::Multicolumns => SectionSettings::Multicolumns(serde_json::from_value(settings)?),
            SectionType::Gallery => SectionSettings::Gallery(serde_json::from_value(settings)?),
            SectionType::ImageWithText => SectionSettings::ImageWithText(serde_json::from_value(settings)?),
            SectionType::FeaturedCollection => SectionSettings::FeaturedCollection(serde_json::from_value(settings)?),
            SectionType::Faq => SectionSettings::Faq(serde_json::from_value(settings)?),
            SectionType::Testimonials => SectionSettings::Testimonials(serde_json::from_value(settings)?),
            SectionType::RichText => SectionSettings::RichText(serde_json::from_value(settings)?),
            SectionType::ContactForm => SectionSettings::ContactForm(serde_json::from_value(settings)?),
            SectionType::Newsletter => SectionSettings::Newsletter(serde_json::from_value(settings)?),
            SectionType::RoomList => SectionSettings::RoomList(serde_json::from_value(settings)?),
            SectionType::RoomDetails => SectionSettings::RoomDetails(serde_json::from_value(settings)?),
            SectionType::RoomAmenities => SectionSettings::RoomAmenities(serde_json::from_value(settings)?),
        })
    }

    /// Raw JSON form, as persisted
    pub fn to_json(&self) -> Value {
        // Settings structs only hold strings, numbers, bools and string-keyed
        // maps, so serialization cannot fail.
        let value = match self {
            SectionSettings::Header(s) => serde_json::to_value(s),
            SectionSettings::AnnouncementBar(s) => serde_json::to_value(s),
            SectionSettings::Footer(s) => serde_json::to_value(s),
            SectionSettings::ImageBanner(s) => serde_json::to_value(s),
            SectionSettings::Slideshow(s) => serde_json::to_value(s),
            SectionSettings::Multicolumns(s) => serde_json::to_value(s),
            SectionSettings::Gallery(s) => serde_json::to_value(s),
            SectionSettings::ImageWithText(s) => serde_json::to_value(s),
            SectionSettings::FeaturedCollection(s) => serde_json::to_value(s),
            SectionSettings::Faq(s) => serde_json::to_value(s),
            SectionSettings::Testimonials(s) => serde_json::to_value(s),
            SectionSettings::RichText(s) => serde_json::to_value(s),
            SectionSettings::ContactForm(s) => serde_json::to_value(s),
            SectionSettings::Newsletter(s) => serde_json::to_value(s),
            SectionSettings::RoomList(s) => serde_json::to_value(s),
            SectionSettings::RoomDetails(s) => serde_json::to_value(s),
            SectionSettings::RoomAmenities(s) => serde_json::to_value(s),
            SectionSettings::Unknown { settings, .. } => return settings.clone(),
        };
        value.unwrap_or_default()
    }

    pub fn into_json(self) -> Value {
        match self {
            SectionSettings::Unknown { settings, .. } => settings,
            typed => typed.to_json(),
        }
    }

    pub fn section_type(&self) -> Option<SectionType> {
        Some(match self {
            SectionSettings::Header(_) => SectionType::Header,
            SectionSettings::AnnouncementBar(_) => SectionType::AnnouncementBar,
            SectionSettings::Footer(_) => SectionType::Footer,
            SectionSettings::ImageBanner(_) => SectionType::ImageBanner,
            SectionSettings::Slideshow(_) => SectionType::Slideshow,
            SectionSettings::Multicolumns(_) => SectionType::Multicolumns,
            SectionSettings::Gallery(_) => SectionType::Gallery,
            SectionSettings::ImageWithText(_) => SectionType::ImageWithText,
            SectionSettings::FeaturedCollection(_) => SectionType::FeaturedCollection,
            SectionSettings::Faq(_) => SectionType::Faq,
            SectionSettings::Testimonials(_) => SectionType::Testimonials,
            SectionSettings::RichText(_) => SectionType::RichText,
            SectionSettings::ContactForm(_) => SectionType::ContactForm,
            SectionSettings::Newsletter(_) => SectionType::Newsletter,
            SectionSettings::RoomList(_) => SectionType::RoomList,
            SectionSettings::RoomDetails(_) => SectionType::RoomDetails,
            SectionSettings::RoomAmenities(_) => SectionType::RoomAmenities,
            SectionSettings::Unknown { .. } => return None,
        })
    }

    pub fn type_tag(&self) -> &str {
        match self {
            SectionSettings::Unknown { type_tag, .. } => type_tag,
            typed => typed.section_type().map(SectionType::tag).unwrap_or_default(),
        }
    }

    /// Child routing tag, if this section owns child blocks
    pub fn child_kind(&self) -> Option<ChildKind> {
        self.section_type().and_then(SectionType::child_kind)
    }

    /// Shape-independent view of the child array
    pub fn blocks(&self) -> Option<&dyn BlockList> {
        let list: &dyn BlockList = match self {
            SectionSettings::AnnouncementBar(s) => &s.blocks,
            SectionSettings::Footer(s) => &s.blocks,
            SectionSettings::Slideshow(s) => &s.slides,
            SectionSettings::Multicolumns(s) => &s.items,
            SectionSettings::Gallery(s) => &s.items,
            SectionSettings::ImageWithText(s) => &s.blocks,
            SectionSettings::Faq(s) => &s.items,
            SectionSettings::Testimonials(s) => &s.items,
            SectionSettings::RichText(s) => &s.blocks,
            SectionSettings::Newsletter(s) => &s.blocks,
            SectionSettings::RoomAmenities(s) => &s.items,
            SectionSettings::Header(_)
            | SectionSettings::ImageBanner(_)
            | SectionSettings::FeaturedCollection(_)
            | SectionSettings::ContactForm(_)
            | SectionSettings::RoomList(_)
            | SectionSettings::RoomDetails(_)
            | SectionSettings::Unknown { .. } => return None,
        };
        Some(list)
    }

    pub fn blocks_mut(&mut self) -> Option<&mut dyn BlockList> {
        let list: &mut dyn BlockList = match self {
            SectionSettings::AnnouncementBar(s) => &mut s.blocks,
            SectionSettings::Footer(s) => &mut s.blocks,
            SectionSettings::Slideshow(s) => &mut s.slides,
            SectionSettings::Multicolumns(s) => &mut s.items,
            SectionSettings::Gallery(s) => &mut s.items,
            SectionSettings::ImageWithText(s) => &mut s.blocks,
            SectionSettings::Faq(s) => &mut s.items,
            SectionSettings::Testimonials(s) => &mut s.items,
            SectionSettings::RichText(s) => &mut s.blocks,
            SectionSettings::Newsletter(s) => &mut s.blocks,
            SectionSettings::RoomAmenities(s) => &mut s.items,
            SectionSettings::Header(_)
            | SectionSettings::ImageBanner(_)
            | SectionSettings::FeaturedCollection(_)
            | SectionSettings::ContactForm(_)
            | SectionSettings::RoomList(_)
            | SectionSettings::RoomDetails(_)
            | SectionSettings::Unknown { .. } => return None,
        };
        Some(list)
    }
}

/// Binds settings structs to their enum variant and section type
macro_rules! section_kind {
    ($($settings:ident => $variant:ident),+ $(,)?) => {
        $(
            impl SectionKind for $settings {
                const TYPE: SectionType = SectionType::$variant;

                fn from_settings(settings: &SectionSettings) -> Option<&Self> {
                    match settings {
                        SectionSettings::$variant(s) => Some(s),
                        _ => None,
                    }
                }

                fn from_settings_mut(settings: &mut SectionSettings) -> Option<&mut Self> {
                    match settings {
                        SectionSettings::$variant(s) => Some(s),
                        _ => None,
                    }
                }

                fn into_settings(self) -> SectionSettings {
                    SectionSettings::$variant(self)
                }
            }

            impl From<$settings> for SectionSettings {
                fn from(settings: $settings) -> Self {
                    SectionSettings::$variant(settings)
                }
            }
        )+
    };
}

section_kind! {
    HeaderSettings => Header,
    AnnouncementBarSettings => AnnouncementBar,
    FooterSettings => Footer,
    ImageBannerSettings => ImageBanner,
    SlideshowSettings => Slideshow,
    MulticolumnsSettings => Multicolumns,
    GallerySettings => Gallery,
    ImageWithTextSettings => ImageWithText,
    FeaturedCollectionSettings => FeaturedCollection,
    FaqSettings => Faq,
    TestimonialsSettings => Testimonials,
    RichTextSettings => RichText,
    ContactFormSettings => ContactForm,
    NewsletterSettings => Newsletter,
    RoomListSettings => RoomList,
    RoomDetailsSettings => RoomDetails,
    RoomAmenitiesSettings => RoomAmenities,
}

/// Binds child-bearing settings to their block array
macro_rules! block_container {
    ($($settings:ident . $field:ident : $block:ident => $kind:expr),+ $(,)?) => {
        $(
            impl BlockContainer for $settings {
                type Block = $block;
                const CHILD_KIND: ChildKind = $kind;

                fn blocks(&self) -> &[Self::Block] {
                    &self.$field
                }

                fn blocks_mut(&mut self) -> &mut Vec<Self::Block> {
                    &mut self.$field
                }
            }
        )+
    };
}

block_container! {
    AnnouncementBarSettings.blocks: Announcement => ChildKind::Child,
    FooterSettings.blocks: FooterBlock => ChildKind::Child,
    SlideshowSettings.slides: Slide => ChildKind::Slide,
    MulticolumnsSettings.items: ColumnItem => ChildKind::Child,
    GallerySettings.items: GalleryItem => ChildKind::Child,
    ImageWithTextSettings.blocks: ContentBlock => ChildKind::Child,
    FaqSettings.items: FaqItem => ChildKind::Child,
    TestimonialsSettings.items: Testimonial => ChildKind::Child,
    RichTextSettings.blocks: ContentBlock => ChildKind::Child,
    NewsletterSettings.blocks: NewsletterBlock => ChildKind::Child,
    RoomAmenitiesSettings.items: Amenity => ChildKind::Child,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_match_type() {
        for section_type in SectionType::ALL {
            let settings = SectionSettings::defaults_for(section_type);
            assert_eq!(settings.section_type(), Some(section_type));
            assert_eq!(settings.type_tag(), section_type.tag());
            assert_eq!(settings.child_kind().is_some(), settings.blocks().is_some());
        }
    }

    #[test]
    fn test_json_round_trip_for_every_type() {
        for section_type in SectionType::ALL {
            let settings = SectionSettings::defaults_for(section_type);
            let back = SectionSettings::from_json(section_type.tag(), settings.to_json()).unwrap();
            assert_eq!(back, settings);
        }
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings = SectionSettings::from_json("slideshow", json!({ "autoplay": true })).unwrap();
        let slideshow = SlideshowSettings::from_settings(&settings).unwrap();

        assert!(slideshow.autoplay);
        assert_eq!(slideshow.speed_seconds, 5);
        assert!(slideshow.slides.is_empty());
    }

    #[test]
    fn test_null_settings_load_as_defaults() {
        let settings = SectionSettings::from_json("faq", Value::Null).unwrap();
        assert_eq!(settings, SectionSettings::Faq(FaqSettings::default()));
    }

    #[test]
    fn test_unknown_type_keeps_raw_settings() {
        let raw = json!({ "spin": 42, "nested": { "a": [1, 2] } });
        let settings = SectionSettings::from_json("MysteryWidget", raw.clone()).unwrap();

        assert_eq!(settings.section_type(), None);
        assert_eq!(settings.type_tag(), "MysteryWidget");
        assert_eq!(settings.to_json(), raw);
        assert!(settings.blocks().is_none());
    }

    #[test]
    fn test_mismatched_settings_are_rejected() {
        let result = SectionSettings::from_json("multicolumns", json!({ "items": "not a list" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_block_list_patch_merges_fields() {
        let mut items = vec![
            ColumnItem::with_defaults("c1".to_string(), ColumnShape::Icon),
            ColumnItem::with_defaults("c2".to_string(), ColumnShape::Icon),
        ];

        let patch = json!({ "title": "Spa", "id": "hijack" });
        let changed = items.patch("c1", patch.as_object().unwrap()).unwrap();

        assert!(changed);
        assert_eq!(items[0].id, "c1");
        match &items[0].content {
            ColumnContent::Icon { title, icon, .. } => {
                assert_eq!(title, "Spa");
                assert_eq!(icon, "star");
            }
            other => panic!("unexpected content: {other:?}"),
        }
        assert_eq!(items[1], ColumnItem::with_defaults("c2".to_string(), ColumnShape::Icon));
    }

    #[test]
    fn test_block_list_patch_rejects_wrong_types() {
        let mut items = vec![Testimonial::with_defaults("t1".to_string(), SingleShape)];
        let patch = json!({ "rating": "five" });

        assert!(items.patch("t1", patch.as_object().unwrap()).is_err());
        assert_eq!(items[0].rating, 5);
    }

    #[test]
    fn test_block_list_push_default_with_shape() {
        let mut items: Vec<ColumnItem> = Vec::new();

        assert!(items.push_default("c1".to_string(), Some("image")));
        assert!(!items.push_default("c2".to_string(), Some("video")));
        assert!(items.push_default("c3".to_string(), None));

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].shape(), ColumnShape::Image);
        assert_eq!(items[1].shape(), ColumnShape::Icon);
    }

    #[test]
    fn test_typed_access() {
        let mut settings: SectionSettings = MulticolumnsSettings::default().into();

        assert!(MulticolumnsSettings::from_settings(&settings).is_some());
        assert!(SlideshowSettings::from_settings(&settings).is_none());

        MulticolumnsSettings::from_settings_mut(&mut settings).unwrap().heading = "Why stay".to_string();
        assert_eq!(settings.to_json()["heading"], "Why stay");
    }
}
