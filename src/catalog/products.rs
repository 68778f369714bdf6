//! Product fetch and search.

use serde::Deserialize;

use crate::ReviewHub;
use crate::catalog::Product;
use crate::error::RequestError;

/// A page of product search results.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProductSearchResults {
    /// The matching products for the requested page.
    #[serde(default)]
    pub products: Vec<Product>,
    /// Total number of matches.
    #[serde(default)]
    pub total: i64,
    /// Total number of pages.
    #[serde(default)]
    pub pages: i64,
    /// The page these results belong to.
    #[serde(default)]
    pub current_page: i64,
}

/// Request builder for [`ReviewHub::search_products`].
pub struct ProductSearchBuilder<'a> {
    client: &'a ReviewHub,
    query: &'a str,
    category: Option<&'a str>,
    brand: Option<&'a str>,
    price_min: Option<String>,
    price_max: Option<String>,
    rating_min: Option<String>,
    has_reviews: Option<bool>,
    sort_by: Option<&'a str>,
    page: Option<String>,
    per_page: Option<String>,
}

#[derive(Deserialize)]
struct ProductResponse {
    product: Product,
}

#[derive(Deserialize)]
struct SuggestionsResponse {
    #[serde(default)]
    suggestions: Vec<String>,
}

impl ReviewHub {
    /// Fetches a single product.
    ///
    /// # Example
    /// ```rust,ignore
    /// let product = hub.product(42).await?;
    /// println!("{} — {:.1}★", product.name, product.average_rating);
    /// ```
    pub async fn product(&self, product_id: i64) -> Result<Product, RequestError> {
        let url = self.endpoint(&format!("/api/products/{product_id}"));

        let response = self
            .request_get(&url, None)
            .send()
            .await
            .map_err(|error| RequestError::from_transport(&error))?;

        if response.status().is_success() {
            let payload = response
                .json::<ProductResponse>()
                .await
                .map_err(|error| RequestError::ParseError(error.to_string()))?;

            return Ok(payload.product);
        }

        Err(RequestError::from_response(response).await)
    }

    /// Searches the product catalog.
    ///
    /// # Example
    /// ```rust,ignore
    /// let results = hub
    ///     .search_products("noise cancelling headphones")
    ///     .category("audio")
    ///     .rating_min(4)
    ///     .per_page(20)
    ///     .call()
    ///     .await?;
    ///
    /// for product in results.products {
    ///     println!("{}", product.name);
    /// }
    /// ```
    #[must_use]
    pub const fn search_products<'a>(&'a self, query: &'a str) -> ProductSearchBuilder<'a> {
        ProductSearchBuilder {
            client: self,
            query,
            category: None,
            brand: None,
            price_min: None,
            price_max: None,
            rating_min: None,
            has_reviews: None,
            sort_by: None,
            page: None,
            per_page: None,
        }
    }

    /// Fetches type-ahead suggestions for a partial query.
    ///
    /// `kind` is `"products"` or `"users"`.
    pub async fn search_suggestions(
        &self,
        query: &str,
        kind: &str,
    ) -> Result<Vec<String>, RequestError> {
        let url = self.endpoint("/api/search/suggestions");
        let params = vec![("q", query), ("type", kind)];

        let response = self
            .request_get(&url, Some(params))
            .send()
            .await
            .map_err(|error| RequestError::from_transport(&error))?;

        if response.status().is_success() {
            let payload = response
                .json::<SuggestionsResponse>()
                .await
                .map_err(|error| RequestError::ParseError(error.to_string()))?;

            return Ok(payload.suggestions);
        }

        Err(RequestError::from_response(response).await)
    }
}

impl<'a> ProductSearchBuilder<'a> {
    /// Restrict matches to a category name.
    pub const fn category(mut self, category: &'a str) -> Self {
        self.category = Some(category);
        self
    }

    /// Restrict matches to a brand.
    pub const fn brand(mut self, brand: &'a str) -> Self {
        self.brand = Some(brand);
        self
    }

    /// Lower bound on price.
    pub fn price_min(mut self, price_min: f64) -> Self {
        self.price_min = Some(price_min.to_string());
        self
    }

    /// Upper bound on price.
    pub fn price_max(mut self, price_max: f64) -> Self {
        self.price_max = Some(price_max.to_string());
        self
    }

    /// Minimum average rating, 1–5.
    pub fn rating_min(mut self, rating_min: u8) -> Self {
        self.rating_min = Some(rating_min.to_string());
        self
    }

    /// Only return products that have at least one review.
    pub const fn has_reviews(mut self, has_reviews: bool) -> Self {
        self.has_reviews = Some(has_reviews);
        self
    }

    /// Result ordering *(default: `relevance`)*.
    pub const fn sort_by(mut self, sort_by: &'a str) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    /// The page of the paginated results *(default: 1)*.
    pub fn page(mut self, page: u16) -> Self {
        self.page = Some(page.to_string());
        self
    }

    /// Max returned products per page *(default: 20)*.
    pub fn per_page(mut self, per_page: u16) -> Self {
        self.per_page = Some(per_page.to_string());
        self
    }

    /// Execute the search and return the paginated results.
    pub async fn call(self) -> Result<ProductSearchResults, RequestError> {
        let url = self.client.endpoint("/api/search/products");

        let mut query_parameters: Vec<(&str, &str)> = vec![("q", self.query)];

        if let Some(category) = self.category {
            query_parameters.push(("category", category));
        }

        if let Some(brand) = self.brand {
            query_parameters.push(("brand", brand));
        }

        if let Some(price_min) = self.price_min.as_deref() {
            query_parameters.push(("price_min", price_min));
        }

        if let Some(price_max) = self.price_max.as_deref() {
            query_parameters.push(("price_max", price_max));
        }

        if let Some(rating_min) = self.rating_min.as_deref() {
            query_parameters.push(("rating_min", rating_min));
        }

        if let Some(has_reviews) = self.has_reviews {
            query_parameters.push(("has_reviews", if has_reviews { "true" } else { "false" }));
        }

        if let Some(sort_by) = self.sort_by {
            query_parameters.push(("sort_by", sort_by));
        }

        if let Some(page) = self.page.as_deref() {
            query_parameters.push(("page", page));
        }

        if let Some(per_page) = self.per_page.as_deref() {
            query_parameters.push(("per_page", per_page));
        }

        let response = self
            .client
            .request_get(&url, Some(query_parameters))
            .send()
            .await
            .map_err(|error| RequestError::from_transport(&error))?;

        if response.status().is_success() {
            return response
                .json::<ProductSearchResults>()
                .await
                .map_err(|error| RequestError::ParseError(error.to_string()));
        }

        Err(RequestError::from_response(response).await)
    }
}
