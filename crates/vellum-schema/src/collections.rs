//! The site's standard content types.
//!
//! Pages, services, state landing pages and city landing pages are
//! collections; site settings is a global. Every collection carries a
//! unique slug, a draft/published status and SEO metadata.

use vellum_core::Status;
use vellum_core::status::STATUS_FIELD;

use crate::collection::{CollectionSchema, SLUG_FIELD, SlugSource};
use crate::field::FieldDescriptor;

pub const PAGES: &str = "pages";
pub const SERVICES: &str = "services";
pub const STATE_PAGES: &str = "state-pages";
pub const CITY_PAGES: &str = "city-pages";
pub const SETTINGS: &str = "settings";

/// Collection that uploads point at.
pub const MEDIA: &str = "media";

pub const META_TITLE_MAX: usize = 70;
pub const META_DESCRIPTION_MAX: usize = 160;
pub const EXCERPT_MAX: usize = 300;
pub const SHORT_DESCRIPTION_MAX: usize = 200;
pub const STATE_CODE_LEN: usize = 2;
pub const AREA_CODE_MAX: usize = 3;

pub const DEFAULT_SITE_NAME: &str = "Direct Title Loans";
pub const DEFAULT_TITLE_TEMPLATE: &str = "%s | Direct Title Loans";

/// Page layout variants.
pub const PAGE_TEMPLATES: [&str; 3] = ["default", "full-width", "sidebar"];

fn slug_field() -> FieldDescriptor {
    FieldDescriptor::text(SLUG_FIELD).required().unique()
}

fn status_field() -> FieldDescriptor {
    let options: Vec<&'static str> = Status::ALL.iter().map(Status::as_str).collect();
    FieldDescriptor::select(STATUS_FIELD, &options).default_value(Status::default().as_str())
}

fn seo_fields() -> [FieldDescriptor; 2] {
    [
        FieldDescriptor::text("metaTitle").max_length(META_TITLE_MAX),
        FieldDescriptor::textarea("metaDescription").max_length(META_DESCRIPTION_MAX),
    ]
}

fn named_items(name: &'static str) -> FieldDescriptor {
    FieldDescriptor::array(name, vec![FieldDescriptor::text("name").required()])
}

/// Generic site pages (about, contact, how it works).
pub fn pages() -> CollectionSchema {
    let mut fields = vec![
        FieldDescriptor::text("title").required(),
        slug_field(),
        FieldDescriptor::rich_text("content"),
        FieldDescriptor::textarea("excerpt").max_length(EXCERPT_MAX),
        FieldDescriptor::upload("featuredImage", MEDIA),
    ];
    fields.extend(seo_fields());
    fields.extend([
        FieldDescriptor::select("template", &PAGE_TEMPLATES).default_value(PAGE_TEMPLATES[0]),
        FieldDescriptor::checkbox("showInNav").default_value(false),
        FieldDescriptor::number("navOrder"),
        status_field(),
    ]);
    CollectionSchema::collection(PAGES, "Pages", SlugSource::Field("title"), fields)
}

/// Loan products offered by the site.
pub fn services() -> CollectionSchema {
    let mut fields = vec![
        FieldDescriptor::text("title").required(),
        slug_field(),
        FieldDescriptor::textarea("shortDescription").max_length(SHORT_DESCRIPTION_MAX),
        FieldDescriptor::rich_text("description"),
        FieldDescriptor::upload("icon", MEDIA),
    ];
    fields.extend(seo_fields());
    fields.push(status_field());
    CollectionSchema::collection(SERVICES, "Services", SlugSource::Field("title"), fields)
}

/// State landing pages with compliance details.
pub fn state_pages() -> CollectionSchema {
    let mut fields = vec![
        FieldDescriptor::text("state").required(),
        FieldDescriptor::text("stateCode")
            .required()
            .exact_length(STATE_CODE_LEN),
        slug_field(),
        FieldDescriptor::text("title"),
    ];
    fields.extend(seo_fields());
    fields.extend([
        FieldDescriptor::rich_text("complianceInfo"),
        FieldDescriptor::number("maxLoanAmount"),
        FieldDescriptor::text("interestRateInfo"),
        status_field(),
    ]);
    CollectionSchema::collection(
        STATE_PAGES,
        "State Pages",
        SlugSource::Field("state"),
        fields,
    )
}

/// City landing pages, children of a state page by `stateCode`.
///
/// `areaCode` is a phone area code and is constrained on its own; it is
/// unrelated to the two-letter `stateCode`.
pub fn city_pages() -> CollectionSchema {
    let mut fields = vec![
        FieldDescriptor::text("city").required(),
        FieldDescriptor::text("state").required(),
        FieldDescriptor::text("stateCode").max_length(STATE_CODE_LEN),
        slug_field(),
        FieldDescriptor::text("areaCode").max_length(AREA_CODE_MAX),
        named_items("landmarks"),
        named_items("highways"),
        named_items("neighboringTowns"),
        FieldDescriptor::text("title"),
    ];
    fields.extend(seo_fields());
    fields.extend([FieldDescriptor::rich_text("body"), status_field()]);
    CollectionSchema::collection(
        CITY_PAGES,
        "City Pages",
        SlugSource::Composite("city", "state"),
        fields,
    )
}

/// Site-wide settings singleton.
pub fn settings() -> CollectionSchema {
    CollectionSchema::global(
        SETTINGS,
        "Settings",
        vec![
            FieldDescriptor::text("siteName")
                .required()
                .default_value(DEFAULT_SITE_NAME),
            FieldDescriptor::upload("logo", MEDIA),
            FieldDescriptor::group(
                "contactInfo",
                vec![
                    FieldDescriptor::text("phone"),
                    FieldDescriptor::email("email"),
                    FieldDescriptor::textarea("address"),
                ],
            ),
            FieldDescriptor::group(
                "socialLinks",
                vec![
                    FieldDescriptor::text("facebook"),
                    FieldDescriptor::text("twitter"),
                    FieldDescriptor::text("instagram"),
                    FieldDescriptor::text("linkedin"),
                    FieldDescriptor::text("youtube"),
                ],
            ),
            FieldDescriptor::group(
                "defaultSeo",
                vec![
                    FieldDescriptor::text("titleTemplate").default_value(DEFAULT_TITLE_TEMPLATE),
                    FieldDescriptor::textarea("defaultDescription")
                        .max_length(META_DESCRIPTION_MAX),
                    FieldDescriptor::upload("ogImage", MEDIA),
                ],
            ),
            FieldDescriptor::group(
                "legalDisclaimers",
                vec![
                    FieldDescriptor::textarea("globalDisclaimer"),
                    FieldDescriptor::textarea("aprDisclosure"),
                    FieldDescriptor::textarea("lenderDisclosure"),
                ],
            ),
        ],
    )
}
