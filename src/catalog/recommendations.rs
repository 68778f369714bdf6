//! Recommendation widgets: personalized, similar, and trending products.

use serde::{Deserialize, Serialize};

use crate::ReviewHub;
use crate::catalog::Recommendation;
use crate::error::RequestError;

#[derive(Deserialize)]
struct UserRecommendationsResponse {
    #[serde(default)]
    recommendations: Vec<Recommendation>,
}

#[derive(Deserialize)]
struct SimilarProductsResponse {
    #[serde(default)]
    similar_products: Vec<Recommendation>,
}

#[derive(Deserialize)]
struct TrendingProductsResponse {
    #[serde(default)]
    trending_products: Vec<Recommendation>,
}

impl ReviewHub {
    /// Fetches personalized recommendations for the signed-in user.
    pub async fn user_recommendations(
        &self,
        limit: u16,
    ) -> Result<Vec<Recommendation>, RequestError> {
        let url = self.endpoint("/api/recommendations/user");
        let limit = limit.to_string();
        let params = vec![("limit", limit.as_str())];

        let response = self
            .request_get(&url, Some(params))
            .send()
            .await
            .map_err(|error| RequestError::from_transport(&error))?;

        if response.status().is_success() {
            let payload = response
                .json::<UserRecommendationsResponse>()
                .await
                .map_err(|error| RequestError::ParseError(error.to_string()))?;

            return Ok(payload.recommendations);
        }

        Err(RequestError::from_response(response).await)
    }

    /// Fetches products similar to the given one. Works anonymously.
    pub async fn similar_products(
        &self,
        product_id: i64,
        limit: u16,
    ) -> Result<Vec<Recommendation>, RequestError> {
        let url = self.endpoint(&format!("/api/recommendations/similar/{product_id}"));
        let limit = limit.to_string();
        let params = vec![("limit", limit.as_str())];

        let response = self
            .request_get(&url, Some(params))
            .send()
            .await
            .map_err(|error| RequestError::from_transport(&error))?;

        if response.status().is_success() {
            let payload = response
                .json::<SimilarProductsResponse>()
                .await
                .map_err(|error| RequestError::ParseError(error.to_string()))?;

            return Ok(payload.similar_products);
        }

        Err(RequestError::from_response(response).await)
    }

    /// Fetches currently trending products, optionally within one
    /// category. Works anonymously.
    pub async fn trending_products(
        &self,
        category_id: Option<i64>,
        limit: u16,
    ) -> Result<Vec<Recommendation>, RequestError> {
        let url = self.endpoint("/api/recommendations/trending");

        let limit = limit.to_string();
        let category_id = category_id.map(|id| id.to_string());

        let mut params = vec![("limit", limit.as_str())];
        if let Some(category_id) = category_id.as_deref() {
            params.push(("category_id", category_id));
        }

        let response = self
            .request_get(&url, Some(params))
            .send()
            .await
            .map_err(|error| RequestError::from_transport(&error))?;

        if response.status().is_success() {
            let payload = response
                .json::<TrendingProductsResponse>()
                .await
                .map_err(|error| RequestError::ParseError(error.to_string()))?;

            return Ok(payload.trending_products);
        }

        Err(RequestError::from_response(response).await)
    }

    /// Reports a product interaction to the recommendation engine.
    /// Requires a signed-in user.
    ///
    /// `interaction_type` is one of the backend's interaction names, e.g.
    /// `"view"`, `"review"`, or `"purchase"`.
    pub async fn track_interaction(
        &self,
        product_id: i64,
        interaction_type: &str,
        rating: Option<i32>,
    ) -> Result<(), RequestError> {
        let url = self.endpoint("/api/interactions/track");

        #[derive(Serialize)]
        struct Interaction<'a> {
            product_id: i64,
            interaction_type: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            rating: Option<i32>,
        }

        let response = self
            .request_post_json(
                &url,
                &Interaction {
                    product_id,
                    interaction_type,
                    rating,
                },
            )
            .send()
            .await
            .map_err(|error| RequestError::from_transport(&error))?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(RequestError::from_response(response).await)
    }
}
