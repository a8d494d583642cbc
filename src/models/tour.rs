//! Tour data models
//!
//! This module defines the raw WordPress post shape returned by the CMS,
//! the normalized [`TourRecord`] served to the presentation layer, and the
//! static catalog used whenever the CMS cannot be consulted.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::content::{clean_content, clean_opt, excerpt, page_title, DEFAULT_EXCERPT_LENGTH};

/// Description used when neither an excerpt nor content is available
pub const DEFAULT_DESCRIPTION: &str =
    "Discover the beauty of Cape Town with this amazing tour experience.";
pub const DEFAULT_PRICE: &str = "Contact for pricing";
pub const DEFAULT_DURATION: &str = "Full day";
pub const DEFAULT_CATEGORY: &str = "adventure";
pub const DEFAULT_MEETING_POINT: &str = "V&A Waterfront, Cape Town";
/// Bundled image used when the CMS supplies none
pub const PLACEHOLDER_IMAGE: &str = "/pexels-taryn-elliott-4873264.jpg";

pub const DEFAULT_GROUP_SIZE: &str = "Small Group";
pub const DEFAULT_RATING: &str = "4.9";
pub const DEFAULT_REVIEW_COUNT: &str = "127";

/// Per-person price assumed when a tour price has no digits in it
pub const DEFAULT_BASE_PRICE: f64 = 899.0;

/// A WordPress `{ "rendered": "..." }` wrapper
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

/// Custom fields attached to a tour post (the ACF attribute bag)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TourFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub tour_price: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub tour_duration: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub tour_category: Option<String>,

    #[serde(default, deserialize_with = "lenient_gallery")]
    pub tour_gallery: Vec<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub tour_itinerary: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub tour_included: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub tour_bring: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub meeting_point: Option<String>,
}

/// Relations embedded by `?_embed`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Embedded {
    #[serde(default, rename = "wp:featuredmedia")]
    pub featured_media: Vec<MediaItem>,
}

/// An embedded media attachment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub source_url: Option<String>,
}

/// Tour post as returned by `/wp/v2/tours`
#[derive(Debug, Clone, Deserialize)]
pub struct RawTour {
    pub id: u64,

    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,

    #[serde(default)]
    pub title: Rendered,

    #[serde(default)]
    pub excerpt: Option<Rendered>,

    #[serde(default)]
    pub content: Option<Rendered>,

    /// WordPress sends `[]` or `false` instead of an object when no field is set
    #[serde(default, deserialize_with = "lenient_fields")]
    pub acf: Option<TourFields>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub featured_image_url: Option<String>,

    #[serde(default, rename = "_embedded")]
    pub embedded: Option<Embedded>,
}

impl RawTour {
    fn fields(&self) -> TourFields {
        self.acf.clone().unwrap_or_default()
    }

    /// Featured image URL, then the first embedded media, if any
    pub fn image_url(&self) -> Option<&str> {
        non_empty(self.featured_image_url.as_deref()).or_else(|| {
            self.embedded
                .as_ref()
                .and_then(|embedded| embedded.featured_media.first())
                .and_then(|media| non_empty(media.source_url.as_deref()))
        })
    }

    /// Cleaned editorial excerpt, else an excerpt of the content, else the default sentence
    pub fn description(&self) -> String {
        let editorial = self
            .excerpt
            .as_ref()
            .map(|e| clean_content(&e.rendered))
            .unwrap_or_default();
        if !editorial.is_empty() {
            return editorial;
        }

        let derived = self
            .content
            .as_ref()
            .map(|c| excerpt(&c.rendered, DEFAULT_EXCERPT_LENGTH))
            .unwrap_or_default();
        if !derived.is_empty() {
            return derived;
        }

        DEFAULT_DESCRIPTION.to_string()
    }
}

/// Normalized tour served to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourRecord {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Full body text
    pub content: String,
    pub price: String,
    pub duration: String,
    pub category: String,
    pub image_url: String,
    pub gallery: Vec<String>,
    pub itinerary: String,
    pub included: String,
    pub what_to_bring: String,
    pub meeting_point: String,
    pub slug: Option<String>,
    pub group_size: String,
    pub rating: String,
    pub review_count: String,
}

impl TourRecord {
    /// Per-person price parsed from the display price
    ///
    /// Keeps digits and dots (`"R1,200"` is 1200) and falls back to
    /// [`DEFAULT_BASE_PRICE`] when nothing numeric remains.
    pub fn base_price(&self) -> f64 {
        let numeric: String = self
            .price
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        numeric.parse().unwrap_or(DEFAULT_BASE_PRICE)
    }

    /// Price for a whole party
    pub fn total_price(&self, participants: u32) -> f64 {
        self.base_price() * f64::from(participants)
    }

    /// Browser title for this tour's detail page
    pub fn page_title(&self) -> String {
        page_title(Some(&self.title))
    }
}

/// Normalize a CMS post
impl From<RawTour> for TourRecord {
    fn from(raw: RawTour) -> Self {
        let fields = raw.fields();
        let image_url = raw.image_url().unwrap_or(PLACEHOLDER_IMAGE).to_string();
        let description = raw.description();
        let content = clean_opt(raw.content.as_ref().map(|c| c.rendered.as_str()));

        TourRecord {
            id: raw.id,
            title: clean_content(&raw.title.rendered),
            description,
            content,
            price: or_default(fields.tour_price, DEFAULT_PRICE),
            duration: or_default(fields.tour_duration, DEFAULT_DURATION),
            category: or_default(fields.tour_category, DEFAULT_CATEGORY),
            image_url,
            gallery: fields.tour_gallery,
            itinerary: clean_opt(fields.tour_itinerary.as_deref()),
            included: clean_opt(fields.tour_included.as_deref()),
            what_to_bring: clean_opt(fields.tour_bring.as_deref()),
            meeting_point: or_default(fields.meeting_point, DEFAULT_MEETING_POINT),
            slug: raw.slug,
            group_size: DEFAULT_GROUP_SIZE.to_string(),
            rating: DEFAULT_RATING.to_string(),
            review_count: DEFAULT_REVIEW_COUNT.to_string(),
        }
    }
}

/// The three tours served when the CMS is unreachable or disabled
pub fn fallback_catalog() -> Vec<TourRecord> {
    vec![
        fallback_tour(FallbackTour {
            id: 1,
            title: "Table Mountain Cable Car & City Tour",
            description: "Experience breathtaking panoramic views from the top of Table Mountain and explore Cape Town's vibrant city center.",
            price: "R850",
            duration: "4 hours",
            category: "adventure",
            image: "/pexels-taryn-elliott-4873264.jpg",
            rating: "4.9",
            review_count: "147",
            itinerary: "Morning pickup \u{2192} Table Mountain Cable Car \u{2192} City Bowl tour \u{2192} V&A Waterfront \u{2192} Return",
            included: "Transportation, Cable car tickets, Professional guide",
            what_to_bring: "Comfortable shoes, warm jacket, camera",
            meeting_point: "V&A Waterfront, Cape Town",
        }),
        fallback_tour(FallbackTour {
            id: 2,
            title: "Cape Peninsula & Penguin Tour",
            description: "Journey along the scenic Chapman's Peak and visit the famous penguin colony at Boulders Beach.",
            price: "R1,200",
            duration: "Full day",
            category: "nature",
            image: "/pexels-taryn-elliott-6790337.jpg",
            rating: "4.8",
            review_count: "203",
            itinerary: "Hout Bay \u{2192} Seal Island boat trip \u{2192} Chapman's Peak \u{2192} Boulders Beach penguins \u{2192} Cape Point \u{2192} Wine tasting",
            included: "Transportation, Entrance fees, Boat trip, Wine tasting",
            what_to_bring: "Sun hat, sunscreen, comfortable walking shoes",
            meeting_point: "V&A Waterfront, Cape Town",
        }),
        fallback_tour(FallbackTour {
            id: 3,
            title: "Stellenbosch Wine Safari",
            description: "Discover world-class wines in the heart of South Africa's wine country with expert tastings and vineyard tours.",
            price: "R950",
            duration: "6 hours",
            category: "wine",
            image: "/pexels-taryn-elliott-7608000 (1).jpg",
            rating: "4.9",
            review_count: "184",
            itinerary: "Stellenbosch wine route \u{2192} 3 wine estates \u{2192} Cellar tours \u{2192} Gourmet lunch \u{2192} Franschhoek visit",
            included: "Transportation, Wine tastings, Gourmet lunch, Professional guide",
            what_to_bring: "Comfortable clothes, designated driver mindset",
            meeting_point: "Cape Town city center",
        }),
    ]
}

/// Generic record shown on a detail page whose tour could not be loaded
pub fn default_tour(id: u64) -> TourRecord {
    TourRecord {
        id,
        title: "Cape Town Tour Experience".to_string(),
        description: "Discover the beauty of Cape Town with our expert guides.".to_string(),
        content: "Join us for an unforgettable Cape Town experience...".to_string(),
        price: "From R899".to_string(),
        duration: "Full Day".to_string(),
        category: DEFAULT_CATEGORY.to_string(),
        image_url: PLACEHOLDER_IMAGE.to_string(),
        gallery: vec![
            "/pexels-taryn-elliott-4873264.jpg".to_string(),
            "/pexels-shalom-shore-408430-1077326.jpg".to_string(),
            "/pexels-jean-paul-wettstein-677916508-33618890.jpg".to_string(),
        ],
        itinerary: "Hotel pickup, Tour activities, Return to hotel".to_string(),
        included: "Professional guide, Hotel transfers, All entrance fees".to_string(),
        what_to_bring: String::new(),
        meeting_point: DEFAULT_MEETING_POINT.to_string(),
        slug: None,
        group_size: DEFAULT_GROUP_SIZE.to_string(),
        rating: DEFAULT_RATING.to_string(),
        review_count: DEFAULT_REVIEW_COUNT.to_string(),
    }
}

struct FallbackTour {
    id: u64,
    title: &'static str,
    description: &'static str,
    price: &'static str,
    duration: &'static str,
    category: &'static str,
    image: &'static str,
    rating: &'static str,
    review_count: &'static str,
    itinerary: &'static str,
    included: &'static str,
    what_to_bring: &'static str,
    meeting_point: &'static str,
}

fn fallback_tour(tour: FallbackTour) -> TourRecord {
    TourRecord {
        id: tour.id,
        title: tour.title.to_string(),
        description: tour.description.to_string(),
        content: tour.description.to_string(),
        price: tour.price.to_string(),
        duration: tour.duration.to_string(),
        category: tour.category.to_string(),
        image_url: tour.image.to_string(),
        gallery: Vec::new(),
        itinerary: tour.itinerary.to_string(),
        included: tour.included.to_string(),
        what_to_bring: tour.what_to_bring.to_string(),
        meeting_point: tour.meeting_point.to_string(),
        slug: None,
        group_size: DEFAULT_GROUP_SIZE.to_string(),
        rating: tour.rating.to_string(),
        review_count: tour.review_count.to_string(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

/// Accept strings and numbers; treat `false`, `null` and anything else as absent
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_fields<'de, D>(deserializer: D) -> Result<Option<TourFields>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => serde_json::from_value(value)
            .map(Some)
            .map_err(D::Error::custom),
        _ => Ok(None),
    }
}

/// Gallery entries arrive as URL strings or as image objects with a `url`
fn lenient_gallery<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        _ => return Ok(Vec::new()),
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(url) => Some(url),
            Value::Object(map) => map.get("url").and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .filter(|url| !url.trim().is_empty())
        .collect())
}
