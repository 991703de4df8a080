use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user record, owned by the identity provider. This service only reads
/// it to resolve display names; it never creates or mutates one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// A stored comment row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub movie_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: i64,
}

/// A comment joined with its author's display name - the wire shape the
/// presentation layer consumes. Serialized in camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub movie_id: i64,
    pub user_id: i64,
    pub username: String,
    pub content: String,
    pub created_at: i64,
}

impl CommentView {
    pub fn new(comment: Comment, username: String) -> Self {
        Self {
            id: comment.id,
            movie_id: comment.movie_id,
            user_id: comment.user_id,
            username,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub movie_id: i64,
    pub content: String,
}

/// One trailer entry from the upstream catalog. Fields the proxy does not
/// inspect ride along in `extra` so the payload survives unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The upstream videos envelope. Only `results` is typed; every other
/// envelope field passes through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoListing {
    #[serde(default)]
    pub results: Vec<Video>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
