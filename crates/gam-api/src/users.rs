// User endpoints
//
// Console operator accounts. Usernames are immutable after creation;
// the update payload deliberately has no username field.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{ListQuery, Paged, UserCreate, UserDto, UserUpdate};

impl ApiClient {
    /// List users, paged.
    ///
    /// `GET /api/users`
    pub async fn list_users(&self, query: &ListQuery) -> Result<Paged<UserDto>, Error> {
        let mut url = self.api_url("users")?;
        query.apply(&mut url);
        self.get_paged(url).await
    }

    /// Get the account behind the current session. A 401 here means the
    /// persisted session id is no longer valid.
    ///
    /// `GET /api/users/me`
    pub async fn current_user(&self) -> Result<UserDto, Error> {
        let url = self.api_url("users/me")?;
        self.get(url).await
    }

    /// Get a single user.
    ///
    /// `GET /api/users/{id}`
    pub async fn get_user(&self, id: i64) -> Result<UserDto, Error> {
        let url = self.api_url(&format!("users/{id}"))?;
        self.get(url).await
    }

    /// Create a user.
    ///
    /// `POST /api/users`
    pub async fn create_user(&self, req: &UserCreate) -> Result<UserDto, Error> {
        let url = self.api_url("users")?;
        debug!(username = %req.username, privilege = req.privilege, "creating user");
        self.post(url, req).await
    }

    /// Update a user's password, privilege, enabled flag, or timeout.
    ///
    /// `PATCH /api/users/{id}`
    pub async fn update_user(&self, id: i64, req: &UserUpdate) -> Result<UserDto, Error> {
        let url = self.api_url(&format!("users/{id}"))?;
        self.patch(url, req).await
    }

    /// Delete a user.
    ///
    /// `DELETE /api/users/{id}`
    pub async fn delete_user(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("users/{id}"))?;
        debug!(id, "deleting user");
        self.delete(url).await
    }
}
