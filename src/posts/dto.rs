use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::posts::repo::PostWithAuthor;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedPostResponse {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct PostListItem {
    pub id: Uuid,
    pub content: String,
    pub author_email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<PostWithAuthor> for PostListItem {
    fn from(post: PostWithAuthor) -> Self {
        Self {
            id: post.id,
            content: post.content,
            author_email: post.author_email,
            created_at: post.created_at,
        }
    }
}
