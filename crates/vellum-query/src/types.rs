//! Typed site records.
//!
//! Each record deserialises from a stored document using the content API's
//! camelCase field names. Uploads and rich text are kept as raw JSON: an
//! upload is either a media id or, when populated, the media object.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use vellum_core::{Document, Result, Status};
use vellum_schema::collections::{CITY_PAGES, PAGES, SERVICES, SETTINGS, STATE_PAGES};

/// A record type bound to the collection it is stored in.
pub trait Record: DeserializeOwned {
    /// Registry name of the collection or global.
    const COLLECTION: &'static str;

    /// Convert a stored document.
    fn from_document(doc: Document) -> Result<Self> {
        Ok(serde_json::from_value(Value::Object(doc))?)
    }
}

/// Treat an explicit `null` like a missing field.
fn null_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// SEO metadata shared by every collection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

/// Page layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageTemplate {
    #[default]
    Default,
    FullWidth,
    Sidebar,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub featured_image: Option<Value>,
    #[serde(flatten)]
    pub seo: SeoMeta,
    #[serde(default, deserialize_with = "null_default")]
    pub template: PageTemplate,
    #[serde(default, deserialize_with = "null_default")]
    pub show_in_nav: bool,
    #[serde(default)]
    pub nav_order: Option<f64>,
    #[serde(default, deserialize_with = "null_default")]
    pub status: Status,
}

impl Record for Page {
    const COLLECTION: &'static str = PAGES;
}

/// A loan product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub icon: Option<Value>,
    #[serde(flatten)]
    pub seo: SeoMeta,
    #[serde(default, deserialize_with = "null_default")]
    pub status: Status,
}

impl Record for Service {
    const COLLECTION: &'static str = SERVICES;
}

/// A state landing page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatePage {
    pub id: String,
    pub state: String,
    pub state_code: String,
    pub slug: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub seo: SeoMeta,
    #[serde(default)]
    pub compliance_info: Option<Value>,
    #[serde(default)]
    pub max_loan_amount: Option<f64>,
    #[serde(default)]
    pub interest_rate_info: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub status: Status,
}

impl Record for StatePage {
    const COLLECTION: &'static str = STATE_PAGES;
}

/// Entry in a city page's landmark, highway or neighbouring town list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// A city landing page. Belongs to the state page with the same
/// `state_code`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityPage {
    pub id: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub state_code: Option<String>,
    pub slug: String,
    #[serde(default)]
    pub area_code: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub landmarks: Vec<NamedItem>,
    #[serde(default, deserialize_with = "null_default")]
    pub highways: Vec<NamedItem>,
    #[serde(default, deserialize_with = "null_default")]
    pub neighboring_towns: Vec<NamedItem>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub seo: SeoMeta,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default, deserialize_with = "null_default")]
    pub status: Status,
}

impl Record for CityPage {
    const COLLECTION: &'static str = CITY_PAGES;
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultSeo {
    #[serde(default)]
    pub title_template: Option<String>,
    #[serde(default)]
    pub default_description: Option<String>,
    #[serde(default)]
    pub og_image: Option<Value>,
}

impl DefaultSeo {
    /// Render a page title through the template (`%s` is the page title).
    pub fn title(&self, page_title: &str) -> String {
        match &self.title_template {
            Some(template) => template.replace("%s", page_title),
            None => page_title.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalDisclaimers {
    #[serde(default)]
    pub global_disclaimer: Option<String>,
    #[serde(default)]
    pub apr_disclosure: Option<String>,
    #[serde(default)]
    pub lender_disclosure: Option<String>,
}

/// Site-wide settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub site_name: String,
    #[serde(default)]
    pub logo: Option<Value>,
    #[serde(default, deserialize_with = "null_default")]
    pub contact_info: ContactInfo,
    #[serde(default, deserialize_with = "null_default")]
    pub social_links: SocialLinks,
    #[serde(default, deserialize_with = "null_default")]
    pub default_seo: DefaultSeo,
    #[serde(default, deserialize_with = "null_default")]
    pub legal_disclaimers: LegalDisclaimers,
}

impl Record for Settings {
    const COLLECTION: &'static str = SETTINGS;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_page_from_document() {
        let page = Page::from_document(doc(json!({
            "id": "p1",
            "title": "About",
            "slug": "about",
            "metaTitle": "About us",
            "template": "full-width",
            "showInNav": true,
            "navOrder": 2,
            "status": "published"
        })))
        .unwrap();
        assert_eq!(page.template, PageTemplate::FullWidth);
        assert_eq!(page.seo.meta_title.as_deref(), Some("About us"));
        assert_eq!(page.nav_order, Some(2.0));
        assert_eq!(page.status, Status::Published);
    }

    #[test]
    fn test_page_minimal_uses_defaults() {
        let page =
            Page::from_document(doc(json!({"id": "p1", "title": "A", "slug": "a"}))).unwrap();
        assert_eq!(page.template, PageTemplate::Default);
        assert!(!page.show_in_nav);
        assert_eq!(page.nav_order, None);
        assert_eq!(page.status, Status::Draft);
    }

    #[test]
    fn test_city_page_lists_and_nulls() {
        let city = CityPage::from_document(doc(json!({
            "id": "c1",
            "city": "Austin",
            "state": "Texas",
            "stateCode": "TX",
            "slug": "austin-texas",
            "areaCode": "512",
            "landmarks": [{"id": "l1", "name": "Capitol"}],
            "highways": null
        })))
        .unwrap();
        assert_eq!(city.landmarks[0].name, "Capitol");
        assert!(city.highways.is_empty());
        assert!(city.neighboring_towns.is_empty());
        assert_eq!(city.area_code.as_deref(), Some("512"));
    }

    #[test]
    fn test_settings_groups() {
        let settings = Settings::from_document(doc(json!({
            "siteName": "Direct Title Loans",
            "contactInfo": {"phone": "555-0100"},
            "defaultSeo": {"titleTemplate": "%s | Direct Title Loans"}
        })))
        .unwrap();
        assert_eq!(settings.contact_info.phone.as_deref(), Some("555-0100"));
        assert_eq!(settings.social_links, SocialLinks::default());
        assert_eq!(
            settings.default_seo.title("Texas"),
            "Texas | Direct Title Loans"
        );
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let err = Service::from_document(doc(json!({"id": "s1", "slug": "x"}))).unwrap_err();
        assert!(matches!(err, vellum_core::Error::Serialization(_)));
    }

    #[test]
    fn test_serializes_camel_case() {
        let state = StatePage {
            id: "s1".into(),
            state: "California".into(),
            state_code: "CA".into(),
            slug: "california".into(),
            title: None,
            seo: SeoMeta::default(),
            compliance_info: None,
            max_loan_amount: Some(2500.0),
            interest_rate_info: None,
            status: Status::Published,
        };
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["stateCode"], "CA");
        assert_eq!(value["maxLoanAmount"], 2500.0);
        assert!(value.get("metaTitle").is_none());
    }
}
