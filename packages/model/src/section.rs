//! # Sections and Groups
//!
//! A page is four ordered groups of sections:
//!
//! ```text
//! header   ─ announcement bar, header
//! aside    ─ drawers, overlays
//! template ─ the page body (banners, slideshows, columns, ...)
//! footer   ─ footer, newsletter
//! ```
//!
//! Section ids are unique across all four groups. A section never moves
//! between groups.

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, ModelError};
use crate::normalize::canonical_type_tag;
use crate::selection::ChildKind;
use crate::settings::{SectionKind, SectionSettings};
use crate::snapshot::RawSection;

/// One of the four named regions of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupId {
    Header,
    Aside,
    Template,
    Footer,
}

impl GroupId {
    pub const ALL: [GroupId; 4] = [GroupId::Header, GroupId::Aside, GroupId::Template, GroupId::Footer];

    pub fn as_str(self) -> &'static str {
        match self {
            GroupId::Header => "header",
            GroupId::Aside => "aside",
            GroupId::Template => "template",
            GroupId::Footer => "footer",
        }
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which page template is open in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    #[default]
    Home,
    Room,
    Collection,
    Page,
    Checkout,
}

/// Canonical section type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Header,
    AnnouncementBar,
    Footer,
    ImageBanner,
    Slideshow,
    Multicolumns,
    Gallery,
    ImageWithText,
    FeaturedCollection,
    Faq,
    Testimonials,
    RichText,
    ContactForm,
    Newsletter,
    RoomList,
    RoomDetails,
    RoomAmenities,
}

impl SectionType {
    pub const ALL: [SectionType; 17] = [
        SectionType::Header,
        SectionType::AnnouncementBar,
        SectionType::Footer,
        SectionType::ImageBanner,
        SectionType::Slideshow,
        SectionType::Multicolumns,
        SectionType::Gallery,
        SectionType::ImageWithText,
        SectionType::FeaturedCollection,
        SectionType::Faq,
        SectionType::Testimonials,
        SectionType::RichText,
        SectionType::ContactForm,
        SectionType::Newsletter,
        SectionType::RoomList,
        SectionType::RoomDetails,
        SectionType::RoomAmenities,
    ];

    /// Canonical wire tag
    pub fn tag(self) -> &'static str {
        match self {
            SectionType::Header => "header",
            SectionType::AnnouncementBar => "announcement_bar",
            SectionType::Footer => "footer",
            SectionType::ImageBanner => "image_banner",
            SectionType::Slideshow => "slideshow",
            SectionType::Multicolumns => "multicolumns",
            SectionType::Gallery => "gallery",
            SectionType::ImageWithText => "image_with_text",
            SectionType::FeaturedCollection => "featured_collection",
            SectionType::Faq => "faq",
            SectionType::Testimonials => "testimonials",
            SectionType::RichText => "rich_text",
            SectionType::ContactForm => "contact_form",
            SectionType::Newsletter => "newsletter",
            SectionType::RoomList => "room_list",
            SectionType::RoomDetails => "room_details",
            SectionType::RoomAmenities => "room_amenities",
        }
    }

    /// Look up a canonical tag (legacy spellings are not accepted here)
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Label used when a section of this type is first added
    pub fn default_name(self) -> &'static str {
        match self {
            SectionType::Header => "Header",
            SectionType::AnnouncementBar => "Announcement bar",
            SectionType::Footer => "Footer",
            SectionType::ImageBanner => "Image banner",
            SectionType::Slideshow => "Slideshow",
            SectionType::Multicolumns => "Multicolumn",
            SectionType::Gallery => "Image gallery",
            SectionType::ImageWithText => "Image with text",
            SectionType::FeaturedCollection => "Featured collection",
            SectionType::Faq => "FAQ",
            SectionType::Testimonials => "Testimonials",
            SectionType::RichText => "Rich text",
            SectionType::ContactForm => "Contact form",
            SectionType::Newsletter => "Newsletter",
            SectionType::RoomList => "Rooms",
            SectionType::RoomDetails => "Room details",
            SectionType::RoomAmenities => "Room amenities",
        }
    }

    /// Routing tag for this type's child blocks, if it has any
    pub fn child_kind(self) -> Option<ChildKind> {
        match self {
            SectionType::Slideshow => Some(ChildKind::Slide),
            SectionType::AnnouncementBar
            | SectionType::Footer
            | SectionType::Multicolumns
            | SectionType::Gallery
            | SectionType::ImageWithText
            | SectionType::Faq
            | SectionType::Testimonials
            | SectionType::RichText
            | SectionType::Newsletter
            | SectionType::RoomAmenities => Some(ChildKind::Child),
            SectionType::Header
            | SectionType::ImageBanner
            | SectionType::FeaturedCollection
            | SectionType::ContactForm
            | SectionType::RoomList
            | SectionType::RoomDetails => None,
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Accepts canonical tags and the legacy spellings the normalizer knows
impl std::str::FromStr for SectionType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionType::from_tag(canonical_type_tag(s)).ok_or_else(|| ModelError::UnknownSectionType(s.to_string()))
    }
}

/// A top-level, independently configurable page block
///
/// The section's type is carried by its settings variant, so settings always
/// match type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSection", into = "RawSection")]
pub struct Section {
    pub id: String,
    pub name: String,
    pub visible: bool,
    pub settings: SectionSettings,
}

impl Section {
    pub fn new(id: impl Into<String>, name: impl Into<String>, settings: impl Into<SectionSettings>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            visible: true,
            settings: settings.into(),
        }
    }

    /// `None` for sections whose type tag is not known to this build
    pub fn section_type(&self) -> Option<SectionType> {
        self.settings.section_type()
    }

    pub fn type_tag(&self) -> &str {
        self.settings.type_tag()
    }

    /// Typed view of the settings, if this section is of kind `S`
    pub fn settings_as<S: SectionKind>(&self) -> Option<&S> {
        S::from_settings(&self.settings)
    }

    pub fn settings_as_mut<S: SectionKind>(&mut self) -> Option<&mut S> {
        S::from_settings_mut(&mut self.settings)
    }
}

impl TryFrom<RawSection> for Section {
    type Error = LoadError;

    fn try_from(raw: RawSection) -> Result<Self, Self::Error> {
        let settings = SectionSettings::from_json(&raw.type_tag, raw.settings).map_err(|source| {
            LoadError::InvalidSettings {
                section_id: raw.id.clone(),
                type_tag: raw.type_tag.clone(),
                source,
            }
        })?;

        Ok(Section {
            id: raw.id,
            name: raw.name,
            visible: raw.visible,
            settings,
        })
    }
}

impl From<Section> for RawSection {
    fn from(section: Section) -> Self {
        let type_tag = section.type_tag().to_string();
        RawSection {
            id: section.id,
            type_tag,
            name: section.name,
            visible: section.visible,
            settings: section.settings.into_json(),
        }
    }
}

/// The four ordered groups of a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGroups {
    #[serde(default)]
    pub header_group: Vec<Section>,
    #[serde(default)]
    pub aside_group: Vec<Section>,
    #[serde(default)]
    pub template: Vec<Section>,
    #[serde(default)]
    pub footer_group: Vec<Section>,
}

impl PageGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, group: GroupId) -> &Vec<Section> {
        match group {
            GroupId::Header => &self.header_group,
            GroupId::Aside => &self.aside_group,
            GroupId::Template => &self.template,
            GroupId::Footer => &self.footer_group,
        }
    }

    pub fn get_mut(&mut self, group: GroupId) -> &mut Vec<Section> {
        match group {
            GroupId::Header => &mut self.header_group,
            GroupId::Aside => &mut self.aside_group,
            GroupId::Template => &mut self.template,
            GroupId::Footer => &mut self.footer_group,
        }
    }

    /// Every section in page order, tagged with its group
    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &Section)> {
        GroupId::ALL
            .into_iter()
            .flat_map(move |group| self.get(group).iter().map(move |section| (group, section)))
    }

    /// Locate a section by id across all groups
    pub fn locate(&self, section_id: &str) -> Option<(GroupId, usize)> {
        GroupId::ALL.into_iter().find_map(|group| {
            self.get(group)
                .iter()
                .position(|s| s.id == section_id)
                .map(|index| (group, index))
        })
    }

    pub fn section(&self, group: GroupId, section_id: &str) -> Option<&Section> {
        self.get(group).iter().find(|s| s.id == section_id)
    }

    pub fn section_mut(&mut self, group: GroupId, section_id: &str) -> Option<&mut Section> {
        self.get_mut(group).iter_mut().find(|s| s.id == section_id)
    }

    pub fn len(&self) -> usize {
        GroupId::ALL.into_iter().map(|g| self.get(g).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{HeaderSettings, MulticolumnsSettings};

    fn sample_groups() -> PageGroups {
        let mut groups = PageGroups::new();
        groups.header_group.push(Section::new("h1", "Header", HeaderSettings::default()));
        groups.template.push(Section::new("s1", "Columns", MulticolumnsSettings::default()));
        groups.template.push(Section::new("s2", "More columns", MulticolumnsSettings::default()));
        groups
    }

    #[test]
    fn test_section_type_tags_round_trip() {
        for section_type in SectionType::ALL {
            assert_eq!(SectionType::from_tag(section_type.tag()), Some(section_type));
        }
        assert_eq!(SectionType::from_tag("ImageBanner"), None);
    }

    #[test]
    fn test_section_type_from_str_accepts_legacy_tags() {
        assert_eq!("faq".parse::<SectionType>(), Ok(SectionType::Faq));
        assert_eq!("ImageBanner".parse::<SectionType>(), Ok(SectionType::ImageBanner));
        assert_eq!(
            "MysteryWidget".parse::<SectionType>(),
            Err(ModelError::UnknownSectionType("MysteryWidget".to_string()))
        );
    }

    #[test]
    fn test_section_type_serde_matches_tag() {
        for section_type in SectionType::ALL {
            let json = serde_json::to_value(section_type).unwrap();
            assert_eq!(json, serde_json::Value::String(section_type.tag().to_string()));
        }
    }

    #[test]
    fn test_locate_across_groups() {
        let groups = sample_groups();

        assert_eq!(groups.locate("h1"), Some((GroupId::Header, 0)));
        assert_eq!(groups.locate("s2"), Some((GroupId::Template, 1)));
        assert_eq!(groups.locate("missing"), None);
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn test_iter_is_in_page_order() {
        let groups = sample_groups();
        let ids: Vec<&str> = groups.iter().map(|(_, s)| s.id.as_str()).collect();
        assert_eq!(ids, vec!["h1", "s1", "s2"]);
    }

    #[test]
    fn test_section_serializes_with_type_tag() {
        let section = Section::new("s1", "Columns", MulticolumnsSettings::default());
        let json = serde_json::to_value(&section).unwrap();

        assert_eq!(json["id"], "s1");
        assert_eq!(json["type"], "multicolumns");
        assert_eq!(json["visible"], true);
        assert!(json["settings"]["items"].is_array());

        let back: Section = serde_json::from_value(json).unwrap();
        assert_eq!(back, section);
    }
}
