//! Review listing, submission, voting, and image upload.

use serde::{Deserialize, Serialize};

use crate::catalog::{Review, ReviewImage};
use crate::error::RequestError;
use crate::{Form, Part, ReviewHub};

/// A page of reviews for one product.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReviewPage {
    /// The reviews for the requested page.
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Total number of reviews for the product.
    #[serde(default)]
    pub total: i64,
    /// Total number of pages.
    #[serde(default)]
    pub pages: i64,
    /// The page these reviews belong to.
    #[serde(default)]
    pub current_page: i64,
}

/// Fields submitted when publishing a review.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NewReview {
    /// The reviewed product.
    pub product_id: i64,
    /// Star rating, 1–5.
    pub rating: i32,
    /// Optional headline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Review body.
    pub content: String,
    /// Listed upsides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pros: Option<Vec<String>>,
    /// Listed downsides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cons: Option<Vec<String>>,
    /// Whether the purchase was verified.
    pub verified_purchase: bool,
}

/// Request builder for [`ReviewHub::product_reviews`].
pub struct ReviewListBuilder<'a> {
    client: &'a ReviewHub,
    product_id: i64,
    page: Option<String>,
    per_page: Option<String>,
    sort_by: Option<&'a str>,
}

#[derive(Deserialize)]
struct CreateReviewResponse {
    review: Review,
}

#[derive(Deserialize)]
struct UploadImageResponse {
    image: ReviewImage,
}

impl ReviewHub {
    /// Fetches a paginated list of reviews for a product.
    ///
    /// # Example
    /// ```rust,ignore
    /// let page = hub
    ///     .product_reviews(42)
    ///     .sort_by("most_helpful")
    ///     .per_page(10)
    ///     .call()
    ///     .await?;
    /// ```
    #[must_use]
    pub const fn product_reviews(&self, product_id: i64) -> ReviewListBuilder<'_> {
        ReviewListBuilder {
            client: self,
            product_id,
            page: None,
            per_page: None,
            sort_by: None,
        }
    }

    /// Publishes a review. Requires a signed-in, verified user.
    pub async fn create_review(&self, review: &NewReview) -> Result<Review, RequestError> {
        let url = self.endpoint("/api/reviews");

        let response = self
            .request_post_json(&url, review)
            .send()
            .await
            .map_err(|error| RequestError::from_transport(&error))?;

        if response.status().is_success() {
            let payload = response
                .json::<CreateReviewResponse>()
                .await
                .map_err(|error| RequestError::ParseError(error.to_string()))?;

            return Ok(payload.review);
        }

        Err(RequestError::from_response(response).await)
    }

    /// Marks a review helpful or unhelpful. Requires a signed-in user.
    pub async fn vote_review(&self, review_id: i64, is_helpful: bool) -> Result<(), RequestError> {
        let url = self.endpoint(&format!("/api/reviews/{review_id}/vote"));

        #[derive(Serialize)]
        struct Vote {
            is_helpful: bool,
        }

        let response = self
            .request_post_json(&url, &Vote { is_helpful })
            .send()
            .await
            .map_err(|error| RequestError::from_transport(&error))?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(RequestError::from_response(response).await)
    }

    /// Attaches an image to a review. Requires a signed-in user.
    ///
    /// # Example
    /// ```rust,ignore
    /// use reviewhub_rs::Part;
    ///
    /// let bytes = std::fs::read("./photo.jpg")?;
    /// let part = Part::bytes(bytes)
    ///     .file_name("photo.jpg")
    ///     .mime_str("image/jpeg")?;
    ///
    /// let image = hub.upload_review_image(review.id, part, None).await?;
    /// println!("{}", image.main_url);
    /// ```
    pub async fn upload_review_image(
        &self,
        review_id: i64,
        image: Part,
        caption: Option<&str>,
    ) -> Result<ReviewImage, RequestError> {
        let url = self.endpoint("/api/images/upload/review");

        let mut form = Form::new()
            .part("image", image)
            .text("review_id", review_id.to_string());

        if let Some(caption) = caption {
            form = form.text("caption", caption.to_string());
        }

        let response = self
            .request_post_form(&url, form)
            .send()
            .await
            .map_err(|error| RequestError::from_transport(&error))?;

        if response.status().is_success() {
            let payload = response
                .json::<UploadImageResponse>()
                .await
                .map_err(|error| RequestError::ParseError(error.to_string()))?;

            return Ok(payload.image);
        }

        Err(RequestError::from_response(response).await)
    }
}

impl<'a> ReviewListBuilder<'a> {
    /// The page of the paginated list *(default: 1)*.
    pub fn page(mut self, page: u16) -> Self {
        self.page = Some(page.to_string());
        self
    }

    /// Max returned reviews per page *(default: 10)*.
    pub fn per_page(mut self, per_page: u16) -> Self {
        self.per_page = Some(per_page.to_string());
        self
    }

    /// Review ordering: `newest` (default), `oldest`, `highest_rated`,
    /// `lowest_rated`, or `most_helpful`.
    pub const fn sort_by(mut self, sort_by: &'a str) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    /// Execute the request and return the paginated reviews.
    pub async fn call(self) -> Result<ReviewPage, RequestError> {
        let url = self
            .client
            .endpoint(&format!("/api/products/{}/reviews", self.product_id));

        let mut query_parameters: Vec<(&str, &str)> = vec![];

        if let Some(page) = self.page.as_deref() {
            query_parameters.push(("page", page));
        }

        if let Some(per_page) = self.per_page.as_deref() {
            query_parameters.push(("per_page", per_page));
        }

        if let Some(sort_by) = self.sort_by {
            query_parameters.push(("sort_by", sort_by));
        }

        let response = self
            .client
            .request_get(&url, Some(query_parameters))
            .send()
            .await
            .map_err(|error| RequestError::from_transport(&error))?;

        if response.status().is_success() {
            return response
                .json::<ReviewPage>()
                .await
                .map_err(|error| RequestError::ParseError(error.to_string()));
        }

        Err(RequestError::from_response(response).await)
    }
}
