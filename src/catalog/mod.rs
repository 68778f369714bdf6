//! Product, review, and recommendation endpoints and records.

use chrono::NaiveDateTime;
use serde::Deserialize;

pub mod products;
pub mod recommendations;
pub mod reviews;

/// A product record, as returned by the product and search endpoints.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Product {
    /// The product's unique ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Brand name, if known.
    #[serde(default)]
    pub brand: Option<String>,
    /// Model identifier, if known.
    #[serde(default)]
    pub model: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Name of the category the product belongs to.
    #[serde(default)]
    pub category: Option<String>,
    /// ID of the category the product belongs to.
    #[serde(default)]
    pub category_id: Option<i64>,
    /// URL of the product image.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Lower bound of the observed price range.
    #[serde(default)]
    pub price_min: Option<f64>,
    /// Upper bound of the observed price range.
    #[serde(default)]
    pub price_max: Option<f64>,
    /// Free-form specification document; its schema varies by category.
    #[serde(default)]
    pub specifications: Option<serde_json::Value>,
    /// Mean review rating, 0 when unreviewed.
    #[serde(default)]
    pub average_rating: f64,
    /// Number of published reviews.
    #[serde(default)]
    pub review_count: i64,
    /// Number of product-page views.
    #[serde(default)]
    pub view_count: i64,
    /// When the product was added.
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// The author summary embedded in a review.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReviewAuthor {
    /// The author's user ID.
    pub id: i64,
    /// The author's username.
    pub username: String,
    /// URL of the author's avatar image.
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

/// A published product review.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Review {
    /// The review's unique ID.
    pub id: i64,
    /// The review's author.
    #[serde(default)]
    pub user: ReviewAuthor,
    /// The reviewed product.
    pub product_id: i64,
    /// Star rating, 1–5.
    pub rating: i32,
    /// Optional headline.
    #[serde(default)]
    pub title: Option<String>,
    /// Review body.
    pub content: String,
    /// Listed upsides.
    #[serde(default)]
    pub pros: Option<Vec<String>>,
    /// Listed downsides.
    #[serde(default)]
    pub cons: Option<Vec<String>>,
    /// Whether the purchase was verified.
    #[serde(default)]
    pub verified_purchase: bool,
    /// Number of "helpful" votes.
    #[serde(default)]
    pub helpful_votes: i64,
    /// Total number of votes.
    #[serde(default)]
    pub total_votes: i64,
    /// Attached image URLs.
    #[serde(default)]
    pub images: Option<Vec<String>>,
    /// When the review was published.
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    /// When the review was last edited.
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// An uploaded review image record.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReviewImage {
    /// The image's unique ID.
    #[serde(default)]
    pub id: Option<i64>,
    /// Stored filename.
    #[serde(default)]
    pub filename: Option<String>,
    /// URL of the full-size image.
    pub main_url: String,
    /// URL of the thumbnail rendition.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Alternative text for accessibility.
    #[serde(default)]
    pub alt_text: Option<String>,
    /// Optional caption.
    #[serde(default)]
    pub caption: Option<String>,
}

/// A recommended product: a [`Product`] plus the recommendation engine's
/// scoring metadata.
#[derive(Clone, Debug, Deserialize)]
pub struct Recommendation {
    /// The recommended product.
    #[serde(flatten)]
    pub product: Product,
    /// Relevance score assigned by the recommendation engine.
    #[serde(default)]
    pub recommendation_score: Option<f64>,
    /// Human-readable reasons for the recommendation.
    #[serde(default)]
    pub recommendation_reasons: Option<Vec<String>>,
}
