use crate::{
    error::{ClientError, ClientResult},
    models::{
        AverageScores, Backdrop, CastMember, Envelope, MovieDetails, MovieId, MovieKey,
        MovieRecord, Paginated,
    },
    services::{
        client::ApiClient,
        transport::{fetch_json, ApiRequest, RawResponse},
    },
};

/// Image URL for a movie's backdrop, or `None` when it has no backdrop
///
/// `image_url` and the path are joined with a `/` as-is, so a path that
/// already starts with one produces a double slash.
pub fn image_source(image_url: &str, movie: &impl Backdrop) -> Option<String> {
    movie
        .backdrop_path()
        .map(|path| format!("{}/{}", image_url.trim_end_matches('/'), path))
}

/// True if any movie in `list` has an id numerically equal to `id`
///
/// Both sides are coerced to numbers first, so `"7"` matches `7`.
pub fn contains(list: &[MovieRecord], id: impl Into<MovieKey>) -> bool {
    let Some(target) = id.into().as_number() else {
        return false;
    };
    list.iter().any(|movie| movie.id.as_number() == Some(target))
}

impl ApiClient {
    /// Deletes a movie. The raw response is returned without interpreting
    /// its status.
    pub async fn delete_movie(&self, id: MovieId) -> ClientResult<RawResponse> {
        let request = ApiRequest::delete(self.url(&format!("/api/movie/{}", id), &[])?);
        let response = self.transport.send(request).await?;

        tracing::info!(movie_id = id, status = response.status.as_u16(), "Movie delete sent");

        Ok(response)
    }

    pub fn image_source(&self, movie: &impl Backdrop) -> Option<String> {
        image_source(&self.config.image_url, movie)
    }

    pub async fn get_movie(&self, id: MovieId) -> ClientResult<MovieDetails> {
        let url = self.url(&format!("/api/movie/{}", id), &[])?;
        fetch_json(self.transport.as_ref(), ApiRequest::get(url), "movie details").await
    }

    pub async fn get_movie_cast(&self, id: MovieId) -> ClientResult<Vec<CastMember>> {
        let url = self.url(&format!("/api/movie/{}/cast", id), &[])?;
        let cast: Envelope<Vec<CastMember>> =
            fetch_json(self.transport.as_ref(), ApiRequest::get(url), "movie cast").await?;
        Ok(cast.data)
    }

    /// The `amount` most popular movies, starting at `page`
    pub async fn top_movies(&self, amount: u32, page: u32) -> ClientResult<Paginated<MovieRecord>> {
        let page = page.max(1).to_string();
        let url = self.url(
            &format!("/api/movie/top-movies/{}", amount),
            &[("page", page.as_str())],
        )?;
        let top: Envelope<Paginated<MovieRecord>> =
            fetch_json(self.transport.as_ref(), ApiRequest::get(url), "top movies").await?;
        Ok(top.data)
    }

    /// Average score chart for the given movies
    pub async fn average_scores(&self, ids: &[MovieId]) -> ClientResult<AverageScores> {
        if ids.is_empty() {
            return Err(ClientError::InvalidInput(
                "At least one movie id is required".to_string(),
            ));
        }

        let movie_ids = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let url = self.url(
            "/api/movie/average-scores",
            &[("movie_ids", movie_ids.as_str())],
        )?;
        let scores: Envelope<AverageScores> =
            fetch_json(self.transport.as_ref(), ApiRequest::get(url), "average scores").await?;
        Ok(scores.data)
    }
}
