//! The page configuration document: shared design plus per-viewport placements.

use crate::constraints;
use crate::element::{ElementId, ElementKind};
use crate::geometry::{ElementPosition, Viewport};
use crate::snap::Sibling;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Title given to a freshly added link.
pub const NEW_LINK_TITLE: &str = "New Link";
/// URL given to a freshly added link.
pub const NEW_LINK_URL: &str = "https://";

/// How the page background is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    #[default]
    Solid,
    Gradient,
    Image,
}

/// Two-stop background gradient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    pub from: String,
    pub to: String,
    /// CSS direction keyword, e.g. `to bottom right`.
    pub direction: String,
}

/// Resolved background, selected by [`Design::background_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background<'a> {
    Solid(&'a str),
    Gradient(&'a Gradient),
    /// Image URL with the solid color shown while it loads.
    Image { url: &'a str, fallback: &'a str },
}

/// Colors and radii shared by both viewports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    pub background_color: String,
    pub background_type: BackgroundType,
    pub background_gradient: Gradient,
    pub background_image: String,
    pub button_color: String,
    pub button_text_color: String,
    pub text_color: String,
    pub button_border_radius: u32,
}

impl Default for Design {
    fn default() -> Self {
        Self {
            background_color: "#070c0e".to_string(),
            background_type: BackgroundType::Solid,
            background_gradient: Gradient {
                from: "#070c0e".to_string(),
                to: "#1a1a2e".to_string(),
                direction: "to bottom right".to_string(),
            },
            background_image: String::new(),
            button_color: "#9fd2d1".to_string(),
            button_text_color: "#070c0e".to_string(),
            text_color: "#f2f7f7".to_string(),
            button_border_radius: 8,
        }
    }
}

impl Design {
    pub fn background(&self) -> Background<'_> {
        match self.background_type {
            BackgroundType::Solid => Background::Solid(&self.background_color),
            BackgroundType::Gradient => Background::Gradient(&self.background_gradient),
            BackgroundType::Image => Background::Image {
                url: &self.background_image,
                fallback: &self.background_color,
            },
        }
    }
}

/// Optional overrides for the profile name text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Optional overrides for the bio text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BioStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub bio: String,
    pub avatar_url: String,
    /// Avatar placement.
    pub position: ElementPosition,
    /// Bio placement; absent until the bio is first moved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio_position: Option<ElementPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_style: Option<NameStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio_style: Option<BioStyle>,
}

/// Per-link style overrides. `None` falls back to the design.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStyleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_border_radius: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

/// Effective style of a link button after applying overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStyle {
    pub background_color: String,
    pub text_color: String,
    pub border_radius: u32,
    pub font_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: u64,
    pub title: String,
    pub url: String,
    /// 1-based display order, contiguous within a viewport.
    pub order: u32,
    pub position: ElementPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_border_radius: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

impl Link {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        url: impl Into<String>,
        order: u32,
        position: ElementPosition,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            order,
            position,
            custom_color: None,
            custom_text_color: None,
            custom_border_radius: None,
            font_size: None,
        }
    }

    pub fn element_id(&self) -> ElementId {
        ElementId::Link(self.id)
    }

    pub fn style_overrides(&self) -> LinkStyleOverrides {
        LinkStyleOverrides {
            custom_color: self.custom_color.clone(),
            custom_text_color: self.custom_text_color.clone(),
            custom_border_radius: self.custom_border_radius,
            font_size: self.font_size,
        }
    }

    pub fn set_style_overrides(&mut self, overrides: LinkStyleOverrides) {
        self.custom_color = overrides.custom_color;
        self.custom_text_color = overrides.custom_text_color;
        self.custom_border_radius = overrides.custom_border_radius;
        self.font_size = overrides.font_size;
    }

    /// Apply the design defaults for anything this link does not override.
    pub fn resolved_style(&self, design: &Design, viewport: Viewport) -> LinkStyle {
        LinkStyle {
            background_color: self
                .custom_color
                .clone()
                .unwrap_or_else(|| design.button_color.clone()),
            text_color: self
                .custom_text_color
                .clone()
                .unwrap_or_else(|| design.button_text_color.clone()),
            border_radius: self
                .custom_border_radius
                .unwrap_or(design.button_border_radius),
            font_size: self.font_size.unwrap_or(default_link_font_size(viewport)),
        }
    }
}

/// Profile and links placed on one viewport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub profile: Profile,
    pub links: Vec<Link>,
}

/// Bio rectangle used until the bio has been placed explicitly.
pub const fn default_bio_position(viewport: Viewport) -> ElementPosition {
    match viewport {
        Viewport::Mobile => ElementPosition::new(10, 160, 260, 45),
        Viewport::Desktop => ElementPosition::new(240, 248, 368, 50),
    }
}

/// Size restored by "reset size" in the properties panel.
pub const fn default_size(kind: ElementKind, viewport: Viewport) -> (i32, i32) {
    match (viewport, kind) {
        (Viewport::Mobile, ElementKind::Avatar) => (96, 96),
        (Viewport::Mobile, ElementKind::Bio) => (260, 45),
        (Viewport::Mobile, ElementKind::Link) => (260, 40),
        (Viewport::Desktop, ElementKind::Avatar) => (128, 128),
        (Viewport::Desktop, ElementKind::Bio) => (368, 50),
        (Viewport::Desktop, ElementKind::Link) => (368, 50),
    }
}

/// Font size of link labels without an override.
pub const fn default_link_font_size(viewport: Viewport) -> u32 {
    match viewport {
        Viewport::Mobile => 14,
        Viewport::Desktop => 16,
    }
}

/// Placement rules for appended links: column x, size, first y and vertical gap.
struct NewLinkLayout {
    x: i32,
    width: i32,
    height: i32,
    first_y: i32,
    gap: i32,
}

const fn new_link_layout(viewport: Viewport) -> NewLinkLayout {
    match viewport {
        Viewport::Mobile => NewLinkLayout {
            x: 10,
            width: 260,
            height: 40,
            first_y: 220,
            gap: 15,
        },
        Viewport::Desktop => NewLinkLayout {
            x: 350,
            width: 200,
            height: 50,
            first_y: 320,
            gap: 20,
        },
    }
}

impl ViewportConfig {
    /// Current placement of an element, or `None` for an unknown link.
    ///
    /// An unset bio position reads as the viewport default.
    pub fn element_position(&self, id: ElementId, viewport: Viewport) -> Option<ElementPosition> {
        match id {
            ElementId::Avatar => Some(self.profile.position),
            ElementId::Bio => Some(
                self.profile
                    .bio_position
                    .unwrap_or(default_bio_position(viewport)),
            ),
            ElementId::Link(link_id) => self.link(link_id).map(|l| l.position),
        }
    }

    /// Write a placement. Returns `false` if the element does not exist.
    pub fn set_element_position(&mut self, id: ElementId, position: ElementPosition) -> bool {
        match id {
            ElementId::Avatar => {
                self.profile.position = position;
                true
            }
            ElementId::Bio => {
                self.profile.bio_position = Some(position);
                true
            }
            ElementId::Link(link_id) => match self.link_mut(link_id) {
                Some(link) => {
                    link.position = position;
                    true
                }
                None => false,
            },
        }
    }

    pub fn link(&self, id: u64) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    pub fn link_mut(&mut self, id: u64) -> Option<&mut Link> {
        self.links.iter_mut().find(|l| l.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        match id {
            ElementId::Avatar | ElementId::Bio => true,
            ElementId::Link(link_id) => self.link(link_id).is_some(),
        }
    }

    /// Links sorted by display order.
    pub fn links_ordered(&self) -> Vec<&Link> {
        let mut links: Vec<&Link> = self.links.iter().collect();
        links.sort_by_key(|l| l.order);
        links
    }

    /// Every placed element except `exclude`, as alignment candidates.
    ///
    /// The bio only takes part once it has an explicit position.
    pub fn siblings(&self, exclude: ElementId) -> Vec<Sibling> {
        let mut out = Vec::with_capacity(self.links.len() + 2);
        out.push(Sibling::new(ElementId::Avatar, self.profile.position));
        if let Some(bio) = self.profile.bio_position {
            out.push(Sibling::new(ElementId::Bio, bio));
        }
        out.extend(
            self.links
                .iter()
                .map(|l| Sibling::new(l.element_id(), l.position)),
        );
        out.retain(|s| s.id != exclude);
        out
    }

    /// Topmost element under a canvas point.
    ///
    /// Links paint above the profile, later links above earlier ones.
    pub fn element_at(&self, point: Point, viewport: Viewport) -> Option<ElementId> {
        let mut links = self.links_ordered();
        links.reverse();
        if let Some(link) = links.into_iter().find(|l| l.position.contains(point)) {
            return Some(link.element_id());
        }
        [ElementId::Bio, ElementId::Avatar]
            .into_iter()
            .find(|&id| {
                self.element_position(id, viewport)
                    .is_some_and(|p| p.contains(point))
            })
    }

    /// Placement for a link appended below the last one.
    pub fn next_link_geometry(&self, viewport: Viewport) -> ElementPosition {
        let layout = new_link_layout(viewport);
        let y = self
            .links
            .iter()
            .max_by_key(|l| l.order)
            .map(|last| last.position.y + last.position.height + layout.gap)
            .unwrap_or(layout.first_y);
        constraints::clamp_position(
            ElementKind::Link,
            viewport,
            &ElementPosition::new(layout.x, y, layout.width, layout.height),
        )
    }

    /// Append a default link with the given id at the end of the order.
    pub fn push_link(&mut self, id: u64, viewport: Viewport) -> ElementId {
        let position = self.next_link_geometry(viewport);
        let order = self.links.len() as u32 + 1;
        self.links
            .push(Link::new(id, NEW_LINK_TITLE, NEW_LINK_URL, order, position));
        ElementId::Link(id)
    }

    /// Remove a link and close the gap in the order.
    pub fn remove_link(&mut self, id: u64) -> Option<Link> {
        self.links.sort_by_key(|l| l.order);
        let index = self.links.iter().position(|l| l.id == id)?;
        let removed = self.links.remove(index);
        self.renumber_links();
        Some(removed)
    }

    /// Move `dragged` into the slot currently held by `target`.
    ///
    /// Orders are reassigned `1..=n` afterwards. Returns `false` if either id
    /// is unknown or both are the same link.
    pub fn reorder_links(&mut self, dragged: u64, target: u64) -> bool {
        if dragged == target {
            return false;
        }
        self.links.sort_by_key(|l| l.order);
        let (Some(from), Some(to)) = (
            self.links.iter().position(|l| l.id == dragged),
            self.links.iter().position(|l| l.id == target),
        ) else {
            return false;
        };
        let link = self.links.remove(from);
        self.links.insert(to, link);
        self.renumber_links();
        true
    }

    /// Assign orders from the current list position.
    fn renumber_links(&mut self) {
        for (index, link) in self.links.iter_mut().enumerate() {
            link.order = index as u32 + 1;
        }
    }

    pub fn max_link_id(&self) -> Option<u64> {
        self.links.iter().map(|l| l.id).max()
    }
}

/// The whole editable document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    pub design: Design,
    pub mobile: ViewportConfig,
    pub desktop: ViewportConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        let profile = |position, bio_position| Profile {
            name: "Your Name".to_string(),
            bio: "Your short and catchy bio goes here!".to_string(),
            avatar_url: "https://avatar.vercel.sh/your-name".to_string(),
            position,
            bio_position: Some(bio_position),
            name_style: None,
            bio_style: None,
        };
        let links = |first, second| {
            vec![
                Link::new(1, "My Website", "https://example.com", 1, first),
                Link::new(2, "Twitter / X", "https://twitter.com", 2, second),
            ]
        };

        Self {
            design: Design::default(),
            mobile: ViewportConfig {
                profile: profile(
                    ElementPosition::new(92, 50, 96, 96),
                    default_bio_position(Viewport::Mobile),
                ),
                links: links(
                    ElementPosition::new(10, 220, 260, 40),
                    ElementPosition::new(10, 275, 260, 40),
                ),
            },
            desktop: ViewportConfig {
                profile: profile(
                    ElementPosition::new(360, 100, 128, 128),
                    default_bio_position(Viewport::Desktop),
                ),
                links: links(
                    ElementPosition::new(360, 320, 200, 50),
                    ElementPosition::new(360, 390, 200, 50),
                ),
            },
        }
    }
}

impl PageConfig {
    pub fn viewport(&self, viewport: Viewport) -> &ViewportConfig {
        match viewport {
            Viewport::Mobile => &self.mobile,
            Viewport::Desktop => &self.desktop,
        }
    }

    pub fn viewport_mut(&mut self, viewport: Viewport) -> &mut ViewportConfig {
        match viewport {
            Viewport::Mobile => &mut self.mobile,
            Viewport::Desktop => &mut self.desktop,
        }
    }

    /// Swap in a whole viewport subtree.
    pub fn replace_viewport(&mut self, viewport: Viewport, config: ViewportConfig) {
        *self.viewport_mut(viewport) = config;
    }

    pub fn element_position(&self, viewport: Viewport, id: ElementId) -> Option<ElementPosition> {
        self.viewport(viewport).element_position(id, viewport)
    }

    /// Largest link id in either viewport.
    pub fn max_link_id(&self) -> u64 {
        Viewport::ALL
            .into_iter()
            .filter_map(|vp| self.viewport(vp).max_link_id())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_document() {
        let doc = PageConfig::default();
        assert_eq!(doc.design.button_color, "#9fd2d1");
        assert_eq!(doc.mobile.profile.position, ElementPosition::new(92, 50, 96, 96));
        assert_eq!(doc.desktop.links[1].position, ElementPosition::new(360, 390, 200, 50));
        assert_eq!(doc.max_link_id(), 2);
        for vp in Viewport::ALL {
            let config = doc.viewport(vp);
            for link in &config.links {
                assert!(constraints::is_valid(ElementKind::Link, vp, &link.position));
            }
            assert!(constraints::is_valid(
                ElementKind::Avatar,
                vp,
                &config.profile.position
            ));
        }
    }

    #[test]
    fn test_bio_defaults_lazily() {
        let mut config = PageConfig::default().mobile;
        config.profile.bio_position = None;
        assert_eq!(
            config.element_position(ElementId::Bio, Viewport::Mobile),
            Some(ElementPosition::new(10, 160, 260, 45))
        );
        assert!(config.siblings(ElementId::Avatar).iter().all(|s| s.id != ElementId::Bio));

        let bio = ElementPosition::new(10, 170, 260, 45);
        assert!(config.set_element_position(ElementId::Bio, bio));
        assert!(config.siblings(ElementId::Avatar).iter().any(|s| s.id == ElementId::Bio));
    }

    #[test]
    fn test_siblings_exclude_target() {
        let config = PageConfig::default().mobile;
        let siblings = config.siblings(ElementId::Link(1));
        assert_eq!(siblings.len(), 3);
        assert!(siblings.iter().all(|s| s.id != ElementId::Link(1)));
    }

    #[test]
    fn test_unknown_link_is_soft() {
        let mut config = PageConfig::default().mobile;
        assert_eq!(config.element_position(ElementId::Link(99), Viewport::Mobile), None);
        assert!(!config.set_element_position(ElementId::Link(99), ElementPosition::default()));
    }

    #[test]
    fn test_unset_overrides_are_omitted() {
        let overrides = LinkStyleOverrides {
            font_size: Some(18),
            ..Default::default()
        };
        let json = serde_json::to_string(&overrides).unwrap();
        assert_eq!(json, r#"{"fontSize":18}"#);
        assert_eq!(serde_json::to_string(&LinkStyleOverrides::default()).unwrap(), "{}");
    }

    #[test]
    fn test_element_at_prefers_links() {
        let config = PageConfig::default().mobile;
        assert_eq!(
            config.element_at(Point::new(20.0, 230.0), Viewport::Mobile),
            Some(ElementId::Link(1))
        );
        assert_eq!(
            config.element_at(Point::new(140.0, 100.0), Viewport::Mobile),
            Some(ElementId::Avatar)
        );
        assert_eq!(
            config.element_at(Point::new(20.0, 180.0), Viewport::Mobile),
            Some(ElementId::Bio)
        );
        assert_eq!(config.element_at(Point::new(5.0, 5.0), Viewport::Mobile), None);
    }

    #[test]
    fn test_push_link_below_last() {
        let mut config = PageConfig::default().mobile;
        let id = config.push_link(3, Viewport::Mobile);
        assert_eq!(id, ElementId::Link(3));
        let link = config.link(3).unwrap();
        assert_eq!(link.order, 3);
        assert_eq!(link.position, ElementPosition::new(10, 330, 260, 40));
        assert_eq!(link.title, NEW_LINK_TITLE);

        let mut desktop = PageConfig::default().desktop;
        desktop.links.clear();
        desktop.push_link(7, Viewport::Desktop);
        assert_eq!(desktop.links[0].position, ElementPosition::new(350, 320, 200, 50));
    }

    #[test]
    fn test_push_link_clamped_to_canvas() {
        let mut config = PageConfig::default().mobile;
        for id in 3..20 {
            config.push_link(id, Viewport::Mobile);
        }
        for link in &config.links {
            assert!(constraints::is_valid(ElementKind::Link, Viewport::Mobile, &link.position));
        }
    }

    #[test]
    fn test_reorder_links() {
        let mut config = PageConfig::default().mobile;
        config.push_link(3, Viewport::Mobile);
        config.links[0].order = 10;
        config.links[1].order = 20;
        config.links[2].order = 30;

        assert!(config.reorder_links(3, 1));
        let ids: Vec<u64> = config.links_ordered().iter().map(|l| l.id).collect();
        let orders: Vec<u32> = config.links_ordered().iter().map(|l| l.order).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(orders, vec![1, 2, 3]);

        assert!(!config.reorder_links(2, 2));
        assert!(!config.reorder_links(2, 42));
    }

    #[test]
    fn test_remove_link_renumbers() {
        let mut config = PageConfig::default().mobile;
        config.push_link(3, Viewport::Mobile);
        let removed = config.remove_link(1).unwrap();
        assert_eq!(removed.title, "My Website");
        let orders: Vec<(u64, u32)> = config.links.iter().map(|l| (l.id, l.order)).collect();
        assert_eq!(orders, vec![(2, 1), (3, 2)]);
        assert!(config.remove_link(1).is_none());
    }

    #[test]
    fn test_resolved_link_style() {
        let doc = PageConfig::default();
        let mut link = doc.mobile.links[0].clone();
        let style = link.resolved_style(&doc.design, Viewport::Mobile);
        assert_eq!(style.background_color, "#9fd2d1");
        assert_eq!(style.border_radius, 8);
        assert_eq!(style.font_size, 14);

        link.custom_color = Some("#ff0000".to_string());
        link.font_size = Some(20);
        let style = link.resolved_style(&doc.design, Viewport::Desktop);
        assert_eq!(style.background_color, "#ff0000");
        assert_eq!(style.text_color, "#070c0e");
        assert_eq!(style.font_size, 20);
    }

    #[test]
    fn test_background_view() {
        let mut design = Design::default();
        assert_eq!(design.background(), Background::Solid("#070c0e"));
        design.background_type = BackgroundType::Image;
        design.background_image = "https://example.com/bg.png".to_string();
        assert_eq!(
            design.background(),
            Background::Image {
                url: "https://example.com/bg.png",
                fallback: "#070c0e"
            }
        );
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(PageConfig::default()).unwrap();
        assert_eq!(json["design"]["backgroundType"], "solid");
        assert_eq!(json["design"]["buttonBorderRadius"], 8);
        assert_eq!(json["mobile"]["profile"]["avatarUrl"], "https://avatar.vercel.sh/your-name");
        assert_eq!(json["mobile"]["profile"]["bioPosition"]["width"], 260);
        assert_eq!(json["desktop"]["links"][0]["order"], 1);
        assert!(json["mobile"]["links"][0].get("customColor").is_none());
        assert!(json["mobile"]["profile"].get("nameStyle").is_none());
    }
}
