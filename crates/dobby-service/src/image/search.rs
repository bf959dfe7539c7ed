//! Image name search.

use std::sync::Arc;

use tracing::debug;

use dobby_core::error::AppError;
use dobby_database::store::ImageStore;
use dobby_entity::image::Image;

use crate::context::RequestContext;

/// Case-insensitive substring search over the caller's visible images.
#[derive(Clone)]
pub struct SearchService {
    images: Arc<dyn ImageStore>,
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(images: Arc<dyn ImageStore>) -> Self {
        Self { images }
    }

    /// Searches active images owned by or shared with the caller. A blank
    /// query matches nothing.
    pub async fn search(&self, ctx: &RequestContext, query: &str) -> Result<Vec<Image>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let results = self.images.search(ctx.user_id, query).await?;
        debug!(user_id = %ctx.user_id, hits = results.len(), "Image search");
        Ok(results)
    }
}
