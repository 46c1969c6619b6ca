//! Sidebar navigation model.
//!
//! [`NavigationConfig`] describes site identity and the sidebar tree that an
//! external site tool renders as page chrome. The value is plain data: no
//! computed fields, no derived state, and every sequence keeps its authored
//! order.
//!
//! # Example
//!
//! ```
//! use docnav_config::{NavigationConfig, SidebarGroup, SidebarItem};
//!
//! let config = NavigationConfig::new("Atri", "Atri docs", "/atri_qq/").with_group(
//!     SidebarGroup::new("开始")
//!         .with_item(SidebarItem::new("配置你的项目", "/primary/configure"))
//!         .with_item(SidebarItem::new("运行你的插件", "/primary/run")),
//! );
//!
//! assert_eq!(config.sidebar[0].items[1].link, "/primary/run");
//! assert_eq!(config.resolve_link("/primary/run"), "/atri_qq/primary/run");
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// Site identity and sidebar tree.
///
/// Input also accepts the site tool's own layout, where the base path is
/// `base` and the sidebar sits under `themeConfig`. Output always uses the
/// flat layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNavigationConfig")]
pub struct NavigationConfig {
    /// Display name of the site.
    pub title: String,
    /// Short tagline.
    pub description: String,
    /// Root URL path the site is served under (e.g. `/docs/`).
    #[serde(rename = "basePath")]
    pub base_path: String,
    /// Navigation groups in rendering order.
    pub sidebar: Vec<SidebarGroup>,
}

/// Accepted input layouts before the sidebar location is settled.
#[derive(Deserialize)]
struct RawNavigationConfig {
    title: String,
    description: String,
    #[serde(rename = "basePath", alias = "base_path", alias = "base")]
    base_path: String,
    #[serde(default, deserialize_with = "present")]
    sidebar: Option<Vec<SidebarGroup>>,
    #[serde(
        rename = "themeConfig",
        alias = "theme_config",
        default,
        deserialize_with = "present"
    )]
    theme_config: Option<ThemeConfig>,
}

/// Mark a field as present without an `Option` layer in unknown-key paths.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
struct ThemeConfig {
    sidebar: Vec<SidebarGroup>,
}

impl TryFrom<RawNavigationConfig> for NavigationConfig {
    type Error = &'static str;

    fn try_from(raw: RawNavigationConfig) -> Result<Self, Self::Error> {
        let sidebar = match (raw.sidebar, raw.theme_config) {
            (Some(sidebar), None) | (None, Some(ThemeConfig { sidebar })) => sidebar,
            (Some(_), Some(_)) => {
                return Err("sidebar is set both at top level and in themeConfig");
            }
            (None, None) => return Err("missing field `sidebar`"),
        };
        Ok(Self {
            title: raw.title,
            description: raw.description,
            base_path: raw.base_path,
            sidebar,
        })
    }
}

/// Headed group of sidebar links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarGroup {
    /// Group heading.
    pub text: String,
    /// Whether readers may collapse the group.
    ///
    /// `None` leaves the decision to the consuming tool, which is not the
    /// same as an explicit `Some(false)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,
    /// Links in rendering order.
    pub items: Vec<SidebarItem>,
}

/// Single sidebar link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarItem {
    /// Link label.
    pub text: String,
    /// Site-relative link target, opaque to this crate.
    pub link: String,
}

impl NavigationConfig {
    /// Create a configuration with an empty sidebar.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        base_path: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            base_path: base_path.into(),
            sidebar: Vec::new(),
        }
    }

    /// Append a group after the existing ones.
    #[must_use]
    pub fn with_group(mut self, group: SidebarGroup) -> Self {
        self.sidebar.push(group);
        self
    }

    /// Find the first group with the given heading.
    #[must_use]
    pub fn group(&self, text: &str) -> Option<&SidebarGroup> {
        self.sidebar.iter().find(|group| group.text == text)
    }

    /// Join a site-relative link onto the base path.
    ///
    /// Targets are not checked for existence. Links that do not start with
    /// `/` (external URLs, anchors) are returned unchanged.
    #[must_use]
    pub fn resolve_link(&self, link: &str) -> String {
        let Some(relative) = link.strip_prefix('/') else {
            return link.to_owned();
        };
        let base = self.base_path.trim_end_matches('/');
        format!("{base}/{relative}")
    }
}

impl SidebarGroup {
    /// Create a group with no items and no collapsibility preference.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            collapsible: None,
            items: Vec::new(),
        }
    }

    /// Set an explicit collapsibility preference.
    #[must_use]
    pub fn collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = Some(collapsible);
        self
    }

    /// Append an item after the existing ones.
    #[must_use]
    pub fn with_item(mut self, item: SidebarItem) -> Self {
        self.items.push(item);
        self
    }

    /// Find the first item pointing at `link`.
    #[must_use]
    pub fn item(&self, link: &str) -> Option<&SidebarItem> {
        self.items.iter().find(|item| item.link == link)
    }
}

impl SidebarItem {
    /// Create a link with the given label and target.
    #[must_use]
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn getting_started() -> SidebarGroup {
        SidebarGroup::new("开始")
            .with_item(SidebarItem::new("配置你的项目", "/primary/configure"))
            .with_item(SidebarItem::new("运行你的插件", "/primary/run"))
    }

    #[test]
    fn test_builder_preserves_item_order() {
        let config = NavigationConfig::new("Atri", "Atri docs", "/atri_qq/").with_group(getting_started());

        let links: Vec<_> = config.sidebar[0]
            .items
            .iter()
            .map(|item| item.link.as_str())
            .collect();
        assert_eq!(links, vec!["/primary/configure", "/primary/run"]);
    }

    #[test]
    fn test_builder_preserves_group_order() {
        let config = NavigationConfig::new("Atri", "Atri docs", "/atri_qq/")
            .with_group(getting_started())
            .with_group(
                SidebarGroup::new("其他").with_item(SidebarItem::new("关于插件ABI", "/other/abi")),
            );

        let headings: Vec<_> = config.sidebar.iter().map(|g| g.text.as_str()).collect();
        assert_eq!(headings, vec!["开始", "其他"]);
    }

    #[test]
    fn test_new_group_has_no_collapsible_preference() {
        let group = SidebarGroup::new("开始");
        assert_eq!(group.collapsible, None);
        assert_eq!(group.collapsible(false).collapsible, Some(false));
    }

    #[test]
    fn test_group_lookup_by_text() {
        let config = NavigationConfig::new("Atri", "Atri docs", "/").with_group(getting_started());

        assert!(config.group("开始").is_some());
        assert!(config.group("其他").is_none());
    }

    #[test]
    fn test_item_lookup_by_link() {
        let group = getting_started();

        assert_eq!(group.item("/primary/run").unwrap().text, "运行你的插件");
        assert!(group.item("/primary/missing").is_none());
    }

    #[test]
    fn test_resolve_link_joins_base_path() {
        let config = NavigationConfig::new("Atri", "Atri docs", "/atri_qq/");
        assert_eq!(
            config.resolve_link("/primary/configure"),
            "/atri_qq/primary/configure"
        );
    }

    #[test]
    fn test_resolve_link_with_root_base_path() {
        let config = NavigationConfig::new("Atri", "Atri docs", "/");
        assert_eq!(config.resolve_link("/other/abi"), "/other/abi");
    }

    #[test]
    fn test_resolve_link_without_trailing_slash_in_base() {
        let config = NavigationConfig::new("Atri", "Atri docs", "/atri_qq");
        assert_eq!(config.resolve_link("/other/abi"), "/atri_qq/other/abi");
    }

    #[test]
    fn test_resolve_link_leaves_external_links() {
        let config = NavigationConfig::new("Atri", "Atri docs", "/atri_qq/");
        assert_eq!(
            config.resolve_link("https://example.com/abi"),
            "https://example.com/abi"
        );
    }

    #[test]
    fn test_serialization_uses_consumer_keys() {
        let config = NavigationConfig::new("Atri", "Atri docs", "/atri_qq/").with_group(getting_started());

        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["basePath"], "/atri_qq/");
        assert!(json.get("base_path").is_none());
        assert_eq!(json["sidebar"][0]["items"][0]["link"], "/primary/configure");
    }

    #[test]
    fn test_serialization_omits_absent_collapsible() {
        let config = NavigationConfig::new("Atri", "Atri docs", "/")
            .with_group(getting_started().collapsible(true))
            .with_group(SidebarGroup::new("其他"));

        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["sidebar"][0]["collapsible"], true);
        assert!(json["sidebar"][1].get("collapsible").is_none());
    }

    #[test]
    fn test_deserialization_accepts_base_aliases() {
        for key in ["basePath", "base_path", "base"] {
            let json = format!(
                r#"{{"title": "Atri", "description": "Atri docs", "{key}": "/atri_qq/", "sidebar": []}}"#
            );
            let config: NavigationConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(config.base_path, "/atri_qq/");
        }
    }

    #[test]
    fn test_deserialization_accepts_theme_config_sidebar() {
        let json = r#"{
            "title": "Atri",
            "description": "Atri docs",
            "base": "/atri_qq/",
            "themeConfig": {
                "sidebar": [
                    {"text": "开始", "collapsible": true, "items": [
                        {"text": "配置你的项目", "link": "/primary/configure"}
                    ]}
                ]
            }
        }"#;

        let config: NavigationConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.base_path, "/atri_qq/");
        assert_eq!(config.sidebar[0].items[0].link, "/primary/configure");
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("themeConfig").is_none());
        assert_eq!(json["sidebar"][0]["text"], "开始");
    }

    #[test]
    fn test_deserialization_rejects_sidebar_in_both_places() {
        let json = r#"{
            "title": "Atri",
            "description": "Atri docs",
            "basePath": "/",
            "sidebar": [],
            "themeConfig": {"sidebar": []}
        }"#;

        let err = serde_json::from_str::<NavigationConfig>(json).unwrap_err();

        assert!(err.to_string().contains("both at top level and in themeConfig"));
    }

    #[test]
    fn test_deserialization_requires_sidebar() {
        let json = r#"{"title": "Atri", "description": "Atri docs", "basePath": "/"}"#;

        let err = serde_json::from_str::<NavigationConfig>(json).unwrap_err();

        assert!(err.to_string().contains("missing field `sidebar`"));
    }

    #[test]
    fn test_deserialization_keeps_collapsible_absence() {
        let json = r#"{
            "title": "Atri",
            "description": "Atri docs",
            "basePath": "/",
            "sidebar": [
                {"text": "开始", "collapsible": true, "items": []},
                {"text": "其他", "items": []}
            ]
        }"#;

        let config: NavigationConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.sidebar[0].collapsible, Some(true));
        assert_eq!(config.sidebar[1].collapsible, None);
    }

    #[test]
    fn test_deserialization_requires_link() {
        let json = r#"{
            "title": "Atri",
            "description": "Atri docs",
            "basePath": "/",
            "sidebar": [{"text": "开始", "items": [{"text": "配置你的项目"}]}]
        }"#;

        let err = serde_json::from_str::<NavigationConfig>(json).unwrap_err();

        assert!(err.to_string().contains("missing field `link`"));
    }
}
