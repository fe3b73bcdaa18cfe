//! # Legacy Type Normalizer
//!
//! Pages saved by older editors carry historical spellings of section type
//! tags (`"ImageBanner"`, `"multicolumn"`, `"image-with-text"`, ...). This
//! pass rewrites them to the canonical tags on load.
//!
//! - Only `type` is touched: ids, names, visibility, settings and order are
//!   left alone.
//! - Tags the table does not know pass through unchanged.
//! - Canonical tags map to themselves, so the pass is idempotent.

use tracing::{debug, warn};

use crate::section::{PageGroups, Section, SectionType};
use crate::settings::SectionSettings;
use crate::snapshot::{PageSnapshot, RawSection};

/// Historical tag → canonical type
const LEGACY_TYPE_TAGS: &[(&str, SectionType)] = &[
    ("Header", SectionType::Header),
    ("AnnouncementBar", SectionType::AnnouncementBar),
    ("announcement-bar", SectionType::AnnouncementBar),
    ("Announcement", SectionType::AnnouncementBar),
    ("Footer", SectionType::Footer),
    ("ImageBanner", SectionType::ImageBanner),
    ("image-banner", SectionType::ImageBanner),
    ("Banner", SectionType::ImageBanner),
    ("Slideshow", SectionType::Slideshow),
    ("SlideShow", SectionType::Slideshow),
    ("slide_show", SectionType::Slideshow),
    ("Multicolumn", SectionType::Multicolumns),
    ("Multicolumns", SectionType::Multicolumns),
    ("MultiColumns", SectionType::Multicolumns),
    ("multicolumn", SectionType::Multicolumns),
    ("multi_column", SectionType::Multicolumns),
    ("Gallery", SectionType::Gallery),
    ("ImageGallery", SectionType::Gallery),
    ("image_gallery", SectionType::Gallery),
    ("ImageWithText", SectionType::ImageWithText),
    ("image-with-text", SectionType::ImageWithText),
    ("FeaturedCollection", SectionType::FeaturedCollection),
    ("featured-collection", SectionType::FeaturedCollection),
    ("Faq", SectionType::Faq),
    ("FAQ", SectionType::Faq),
    ("Collapsible", SectionType::Faq),
    ("collapsible_content", SectionType::Faq),
    ("Testimonials", SectionType::Testimonials),
    ("Testimonial", SectionType::Testimonials),
    ("RichText", SectionType::RichText),
    ("rich-text", SectionType::RichText),
    ("ContactForm", SectionType::ContactForm),
    ("contact-form", SectionType::ContactForm),
    ("Newsletter", SectionType::Newsletter),
    ("EmailSignup", SectionType::Newsletter),
    ("RoomList", SectionType::RoomList),
    ("Rooms", SectionType::RoomList),
    ("rooms", SectionType::RoomList),
    ("RoomDetails", SectionType::RoomDetails),
    ("RoomDetail", SectionType::RoomDetails),
    ("room_detail", SectionType::RoomDetails),
    ("RoomAmenities", SectionType::RoomAmenities),
    ("Amenities", SectionType::RoomAmenities),
];

/// Canonical spelling of a type tag; unknown tags are returned unchanged
pub fn canonical_type_tag(tag: &str) -> &str {
    if SectionType::from_tag(tag).is_some() {
        return tag;
    }

    LEGACY_TYPE_TAGS
        .iter()
        .find(|(legacy, _)| *legacy == tag)
        .map(|(_, section_type)| section_type.tag())
        .unwrap_or(tag)
}

/// True if `tag` is a historical spelling the normalizer rewrites
pub fn is_legacy_type_tag(tag: &str) -> bool {
    canonical_type_tag(tag) != tag
}

/// Rewrite one raw section's tag in place; returns whether it changed
fn normalize_raw_section(section: &mut RawSection) -> bool {
    let canonical = canonical_type_tag(&section.type_tag);
    if canonical == section.type_tag {
        return false;
    }

    debug!(section_id = %section.id, from = %section.type_tag, to = canonical, "Rewriting legacy section type");
    section.type_tag = canonical.to_string();
    true
}

/// Normalize every section of a snapshot in place; returns the number rewritten
pub fn normalize_snapshot_in_place(snapshot: &mut PageSnapshot) -> usize {
    snapshot
        .sections_mut()
        .map(normalize_raw_section)
        .filter(|changed| *changed)
        .count()
}

/// Pure form of [`normalize_snapshot_in_place`]
pub fn normalize_snapshot(snapshot: &PageSnapshot) -> PageSnapshot {
    let mut normalized = snapshot.clone();
    normalize_snapshot_in_place(&mut normalized);
    normalized
}

/// Normalize typed groups
///
/// Only `Unknown` sections can still carry a legacy tag. They are retyped
/// when their raw settings fit the canonical type; otherwise they are kept
/// as they are.
pub fn normalize_groups(groups: &PageGroups) -> PageGroups {
    let mut normalized = groups.clone();
    for group in crate::section::GroupId::ALL {
        for section in normalized.get_mut(group) {
            retype_legacy_section(section);
        }
    }
    normalized
}

fn retype_legacy_section(section: &mut Section) {
    let SectionSettings::Unknown { type_tag, settings } = &section.settings else {
        return;
    };

    let canonical = canonical_type_tag(type_tag);
    if canonical == type_tag {
        return;
    }

    match SectionSettings::from_json(canonical, settings.clone()) {
        Ok(typed) => {
            debug!(section_id = %section.id, from = %type_tag, to = canonical, "Retyping legacy section");
            section.settings = typed;
        }
        Err(e) => {
            warn!(section_id = %section.id, type_tag = %type_tag, error = %e, "Legacy section settings do not fit canonical type");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(id: &str, type_tag: &str) -> RawSection {
        RawSection {
            id: id.to_string(),
            type_tag: type_tag.to_string(),
            name: id.to_string(),
            visible: true,
            settings: json!({}),
        }
    }

    #[test]
    fn test_canonical_type_tag() {
        assert_eq!(canonical_type_tag("ImageBanner"), "image_banner");
        assert_eq!(canonical_type_tag("multicolumn"), "multicolumns");
        assert_eq!(canonical_type_tag("image_banner"), "image_banner");
        assert_eq!(canonical_type_tag("MysteryWidget"), "MysteryWidget");
    }

    #[test]
    fn test_legacy_table_only_targets_canonical_tags() {
        for (legacy, section_type) in LEGACY_TYPE_TAGS {
            assert!(SectionType::from_tag(legacy).is_none(), "{legacy} shadows a canonical tag");
            assert_eq!(canonical_type_tag(section_type.tag()), section_type.tag());
        }
    }

    #[test]
    fn test_normalize_snapshot_rewrites_only_type() {
        let mut snapshot = PageSnapshot::default();
        let mut banner = raw("b1", "ImageBanner");
        banner.visible = false;
        banner.settings = json!({ "heading": "Stay with us" });
        snapshot.template.push(banner);
        snapshot.template.push(raw("m1", "MysteryWidget"));
        snapshot.footer_group.push(raw("f1", "footer"));

        let normalized = normalize_snapshot(&snapshot);

        assert_eq!(normalized.template[0].type_tag, "image_banner");
        assert_eq!(normalized.template[0].id, "b1");
        assert!(!normalized.template[0].visible);
        assert_eq!(normalized.template[0].settings, json!({ "heading": "Stay with us" }));
        assert_eq!(normalized.template[1].type_tag, "MysteryWidget");
        assert_eq!(normalized.footer_group[0].type_tag, "footer");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut snapshot = PageSnapshot::default();
        snapshot.header_group.push(raw("h", "Header"));
        snapshot.template.push(raw("a", "SlideShow"));
        snapshot.template.push(raw("b", "rich_text"));
        snapshot.aside_group.push(raw("c", "Unheard"));

        let once = normalize_snapshot(&snapshot);
        let twice = normalize_snapshot(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_in_place_reports_rewrites() {
        let mut snapshot = PageSnapshot::default();
        snapshot.template.push(raw("a", "ImageBanner"));
        snapshot.template.push(raw("b", "image_banner"));

        assert_eq!(normalize_snapshot_in_place(&mut snapshot), 1);
        assert_eq!(normalize_snapshot_in_place(&mut snapshot), 0);
    }

    #[test]
    fn test_normalize_groups_retypes_unknown_legacy_sections() {
        let mut groups = PageGroups::new();
        groups.template.push(Section::new(
            "s1",
            "Banner",
            SectionSettings::Unknown {
                type_tag: "ImageBanner".to_string(),
                settings: json!({ "heading": "Hi" }),
            },
        ));
        groups.template.push(Section::new(
            "s2",
            "Widget",
            SectionSettings::Unknown {
                type_tag: "MysteryWidget".to_string(),
                settings: json!({}),
            },
        ));

        let normalized = normalize_groups(&groups);

        assert_eq!(normalized.template[0].section_type(), Some(SectionType::ImageBanner));
        assert_eq!(normalized.template[0].settings.to_json()["heading"], "Hi");
        assert_eq!(normalized.template[1], groups.template[1]);
        assert_eq!(normalize_groups(&normalized), normalized);
    }
}
