use crate::{
    error::{ClientError, ClientResult},
    models::{
        Account, Envelope, FavoriteRequest, FavoriteResponse, MovieRecord, Paginated, SessionToken,
    },
    services::{
        client::ApiClient,
        transport::{fetch_json, ApiRequest},
    },
};

impl ApiClient {
    /// Account owning `token`
    pub async fn get_account(&self, token: &SessionToken) -> ClientResult<Account> {
        let url = self.url("/api/account/", &[("session_id", token.as_str())])?;
        let account: Envelope<Account> =
            fetch_json(self.transport.as_ref(), ApiRequest::get(url), "account").await?;
        Ok(account.data)
    }

    /// Favorite movies of an account
    ///
    /// The token is supplied by the caller; the client keeps no session
    /// storage of its own.
    pub async fn get_favorite_movies(
        &self,
        account_id: u64,
        token: &SessionToken,
    ) -> ClientResult<Paginated<MovieRecord>> {
        let url = self.url(
            &format!("/api/account/{}/favorite/movies", account_id),
            &[("session_id", token.as_str())],
        )?;
        let favorites: Envelope<Paginated<MovieRecord>> =
            fetch_json(self.transport.as_ref(), ApiRequest::get(url), "favorite movies").await?;

        tracing::debug!(
            account_id,
            count = favorites.data.results.len(),
            "Favorite movies fetched"
        );

        Ok(favorites.data)
    }

    /// Adds a movie to (or removes it from) the account's favorites
    pub async fn mark_favorite(
        &self,
        account_id: u64,
        token: &SessionToken,
        favorite: &FavoriteRequest,
    ) -> ClientResult<FavoriteResponse> {
        let url = self.url(
            &format!("/api/account/{}/favorite", account_id),
            &[("session_id", token.as_str())],
        )?;
        let body = serde_json::to_value(favorite)
            .map_err(|e| ClientError::InvalidInput(format!("Invalid favorite request: {}", e)))?;
        let response: Envelope<FavoriteResponse> = fetch_json(
            self.transport.as_ref(),
            ApiRequest::post(url, body),
            "favorite response",
        )
        .await?;
        Ok(response.data)
    }
}
