//! Admin endpoints: dashboard statistics and user management.
//!
//! All endpoints here require a signed-in admin; a non-admin account gets
//! [`RequestError::Forbidden`].

use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::{ReviewHub, User};

/// Platform-wide counters shown on the admin dashboard.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DashboardOverview {
    /// Total registered users.
    #[serde(default)]
    pub total_users: i64,
    /// Total active products.
    #[serde(default)]
    pub total_products: i64,
    /// Total active reviews.
    #[serde(default)]
    pub total_reviews: i64,
    /// Total categories.
    #[serde(default)]
    pub total_categories: i64,
    /// Users who signed up in the last 30 days.
    #[serde(default)]
    pub new_users_30d: i64,
    /// Reviews published in the last 30 days.
    #[serde(default)]
    pub new_reviews_30d: i64,
    /// Users active in the last 30 days.
    #[serde(default)]
    pub active_users_30d: i64,
    /// Mean rating across all active reviews.
    #[serde(default)]
    pub average_rating: f64,
}

/// A category ranked by product count on the admin dashboard.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TopCategory {
    /// Category name.
    pub name: String,
    /// Number of active products in the category.
    #[serde(default)]
    pub product_count: i64,
}

/// The admin dashboard payload.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DashboardStats {
    /// Platform-wide counters.
    #[serde(default)]
    pub overview: DashboardOverview,
    /// Categories ranked by product count.
    #[serde(default)]
    pub top_categories: Vec<TopCategory>,
}

/// A page of users from the admin user listing.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AdminUserPage {
    /// The users for the requested page.
    #[serde(default)]
    pub users: Vec<User>,
    /// Total number of matching users.
    #[serde(default)]
    pub total: i64,
    /// Total number of pages.
    #[serde(default)]
    pub pages: i64,
    /// The page these users belong to.
    #[serde(default)]
    pub current_page: i64,
    /// Page size used by the listing.
    #[serde(default)]
    pub per_page: i64,
}

/// Request builder for [`ReviewHub::admin_users`].
pub struct AdminUserListBuilder<'a> {
    client: &'a ReviewHub,
    page: Option<String>,
    per_page: Option<String>,
    search: Option<&'a str>,
    sort_by: Option<&'a str>,
    order: Option<&'a str>,
}

impl ReviewHub {
    /// Fetches the admin dashboard statistics.
    pub async fn admin_dashboard(&self) -> Result<DashboardStats, RequestError> {
        let url = self.endpoint("/api/admin/dashboard");

        let response = self
            .request_get(&url, None)
            .send()
            .await
            .map_err(|error| RequestError::from_transport(&error))?;

        if response.status().is_success() {
            return response
                .json::<DashboardStats>()
                .await
                .map_err(|error| RequestError::ParseError(error.to_string()));
        }

        Err(RequestError::from_response(response).await)
    }

    /// Fetches a paginated, searchable user listing.
    ///
    /// # Example
    /// ```rust,ignore
    /// let page = hub
    ///     .admin_users()
    ///     .search("doe")
    ///     .sort_by("last_login")
    ///     .order("desc")
    ///     .call()
    ///     .await?;
    /// ```
    #[must_use]
    pub const fn admin_users(&self) -> AdminUserListBuilder<'_> {
        AdminUserListBuilder {
            client: self,
            page: None,
            per_page: None,
            search: None,
            sort_by: None,
            order: None,
        }
    }

    /// Activates or deactivates a user account.
    pub async fn set_user_status(
        &self,
        user_id: i64,
        is_active: bool,
    ) -> Result<(), RequestError> {
        let url = self.endpoint(&format!("/api/admin/users/{user_id}/status"));

        #[derive(Serialize)]
        struct StatusUpdate {
            is_active: bool,
        }

        let response = self
            .request_put_json(&url, &StatusUpdate { is_active })
            .send()
            .await
            .map_err(|error| RequestError::from_transport(&error))?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(RequestError::from_response(response).await)
    }
}

impl<'a> AdminUserListBuilder<'a> {
    /// The page of the paginated list *(default: 1)*.
    pub fn page(mut self, page: u16) -> Self {
        self.page = Some(page.to_string());
        self
    }

    /// Max returned users per page *(default: 20)*.
    pub fn per_page(mut self, per_page: u16) -> Self {
        self.per_page = Some(per_page.to_string());
        self
    }

    /// Substring match against username, email, and names.
    pub const fn search(mut self, search: &'a str) -> Self {
        self.search = Some(search);
        self
    }

    /// Column to sort by *(default: `created_at`)*.
    pub const fn sort_by(mut self, sort_by: &'a str) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    /// Sort direction: `asc` or `desc` *(default: `desc`)*.
    pub const fn order(mut self, order: &'a str) -> Self {
        self.order = Some(order);
        self
    }

    /// Execute the request and return the paginated users.
    pub async fn call(self) -> Result<AdminUserPage, RequestError> {
        let url = self.client.endpoint("/api/admin/users");

        let mut query_parameters: Vec<(&str, &str)> = vec![];

        if let Some(page) = self.page.as_deref() {
            query_parameters.push(("page", page));
        }

        if let Some(per_page) = self.per_page.as_deref() {
            query_parameters.push(("per_page", per_page));
        }

        if let Some(search) = self.search {
            query_parameters.push(("search", search));
        }

        if let Some(sort_by) = self.sort_by {
            query_parameters.push(("sort_by", sort_by));
        }

        if let Some(order) = self.order {
            query_parameters.push(("order", order));
        }

        let response = self
            .client
            .request_get(&url, Some(query_parameters))
            .send()
            .await
            .map_err(|error| RequestError::from_transport(&error))?;

        if response.status().is_success() {
            return response
                .json::<AdminUserPage>()
                .await
                .map_err(|error| RequestError::ParseError(error.to_string()));
        }

        Err(RequestError::from_response(response).await)
    }
}
