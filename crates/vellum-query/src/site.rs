//! Public read helpers used to render the site.
//!
//! Every helper reads as [`Caller::Anonymous`], so the visibility policy
//! limits results to published records. Listings come back in store order
//! and are capped; single lookups take the first match and return `None`
//! when there is none.

use vellum_acl::Caller;
use vellum_core::traits::{DEFAULT_CITY_LIMIT, DEFAULT_LIST_LIMIT};
use vellum_core::{Condition, ConfigProvider, Direction, FindOptions, Result, Where};
use vellum_schema::collection::SLUG_FIELD;
use vellum_store::{ContentService, ContentStore};

use crate::navigation;
use crate::types::{CityPage, Page, Record, Service, Settings, StatePage};

const STATE_CODE_FIELD: &str = "stateCode";
const SHOW_IN_NAV_FIELD: &str = "showInNav";
const NAV_ORDER_FIELD: &str = "navOrder";

/// Relationship depth for city pages, so uploads come back populated.
pub const CITY_DEPTH: u8 = 2;

/// Typed, visitor-facing queries over a [`ContentService`].
pub struct SiteQueries<S: ContentStore> {
    service: ContentService<S>,
    caller: Caller,
    list_limit: usize,
    city_limit: usize,
}

impl<S: ContentStore> SiteQueries<S> {
    /// Create helpers with the default caps (100, and 500 for cities).
    pub fn new(service: ContentService<S>) -> Self {
        Self {
            service,
            caller: Caller::Anonymous,
            list_limit: DEFAULT_LIST_LIMIT,
            city_limit: DEFAULT_CITY_LIMIT,
        }
    }

    /// Create helpers with the caps from `config`.
    pub fn from_config<C: ConfigProvider>(service: ContentService<S>, config: &C) -> Self {
        Self::new(service).with_limits(config.list_limit(), config.city_limit())
    }

    pub fn with_limits(mut self, list_limit: usize, city_limit: usize) -> Self {
        self.list_limit = list_limit;
        self.city_limit = city_limit;
        self
    }

    pub fn list_limit(&self) -> usize {
        self.list_limit
    }

    pub fn city_limit(&self) -> usize {
        self.city_limit
    }

    async fn list<T: Record>(&self, filter: Where, options: &FindOptions) -> Result<Vec<T>> {
        let docs = self
            .service
            .find(&self.caller, T::COLLECTION, filter, options)
            .await?;
        log::debug!("{}: {} visible", T::COLLECTION, docs.len());
        docs.into_iter().map(T::from_document).collect()
    }

    async fn first<T: Record>(&self, filter: Where, depth: u8) -> Result<Option<T>> {
        self.service
            .find_one(&self.caller, T::COLLECTION, filter, depth)
            .await?
            .map(T::from_document)
            .transpose()
    }

    fn by_slug(slug: &str) -> Where {
        Where::new().and(Condition::equals(SLUG_FIELD, slug))
    }

    fn capped(&self) -> FindOptions {
        FindOptions::default().with_limit(self.list_limit)
    }

    // ------------------------------------------------------------------------
    // Services
    // ------------------------------------------------------------------------

    pub async fn list_services(&self) -> Result<Vec<Service>> {
        self.list(Where::new(), &self.capped()).await
    }

    pub async fn get_service_by_slug(&self, slug: &str) -> Result<Option<Service>> {
        self.first(Self::by_slug(slug), 0).await
    }

    // ------------------------------------------------------------------------
    // State pages
    // ------------------------------------------------------------------------

    pub async fn list_state_pages(&self) -> Result<Vec<StatePage>> {
        self.list(Where::new(), &self.capped()).await
    }

    pub async fn get_state_page_by_slug(&self, slug: &str) -> Result<Option<StatePage>> {
        self.first(Self::by_slug(slug), 0).await
    }

    /// Look up a state page by its two-letter code, ignoring case.
    pub async fn get_state_page_by_code(&self, code: &str) -> Result<Option<StatePage>> {
        let filter = Where::new().and(Condition::equals_ignore_case(STATE_CODE_FIELD, code));
        self.first(filter, 0).await
    }

    // ------------------------------------------------------------------------
    // City pages
    // ------------------------------------------------------------------------

    /// City pages, optionally narrowed to one state code (ignoring case).
    pub async fn list_city_pages(&self, state_code: Option<&str>) -> Result<Vec<CityPage>> {
        let filter = Where::new()
            .and_maybe(state_code.map(|c| Condition::equals_ignore_case(STATE_CODE_FIELD, c)));
        let options = FindOptions::default()
            .with_limit(self.city_limit)
            .with_depth(CITY_DEPTH);
        self.list(filter, &options).await
    }

    pub async fn get_city_page_by_slug(&self, slug: &str) -> Result<Option<CityPage>> {
        self.first(Self::by_slug(slug), CITY_DEPTH).await
    }

    pub async fn list_city_pages_by_state(&self, state_code: &str) -> Result<Vec<CityPage>> {
        self.list_city_pages(Some(state_code)).await
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    pub async fn get_settings(&self) -> Result<Settings> {
        let doc = self
            .service
            .read_global(&self.caller, Settings::COLLECTION)
            .await?;
        Settings::from_document(doc)
    }

    // ------------------------------------------------------------------------
    // Pages
    // ------------------------------------------------------------------------

    pub async fn list_pages(&self) -> Result<Vec<Page>> {
        self.list(Where::new(), &self.capped()).await
    }

    pub async fn get_page_by_slug(&self, slug: &str) -> Result<Option<Page>> {
        self.first(Self::by_slug(slug), 0).await
    }

    /// Pages for the site menu, ascending `navOrder`.
    pub async fn list_nav_pages(&self) -> Result<Vec<Page>> {
        let filter = Where::new().and(Condition::equals(SHOW_IN_NAV_FIELD, true));
        let options = self.capped().with_sort(NAV_ORDER_FIELD, Direction::Asc);
        let pages = self.list(filter, &options).await?;
        Ok(navigation::nav_pages(pages))
    }
}
