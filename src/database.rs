use anyhow::Result;
use chrono::Utc;
use sqlx::{sqlite::SqlitePool, Row};
use tracing::warn;

use crate::models::{Comment, CommentView, User};

// Async comment store with SQLx connection pool. User and session rows are
// owned by the identity provider; this store only reads them.
pub struct CommentDatabase {
    pub pool: SqlitePool,
}

impl CommentDatabase {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url).await?;
        Ok(CommentDatabase { pool })
    }

    pub async fn init(&self) -> Result<()> {
        // Users table - written by the identity provider, read here for
        // username resolution
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                created INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        // Sessions table - written by the identity provider, read here to
        // resolve bearer tokens
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY,
                user_id INTEGER NOT NULL,
                created INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        // Comments table - the one collection this service owns
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS comments (
                id INTEGER PRIMARY KEY,
                movie_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                content TEXT NOT NULL,
                created INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_comments_movie_created
             ON comments(movie_id, created)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn insert_comment(
        &self,
        user_id: i64,
        movie_id: i64,
        content: &str,
    ) -> Result<Comment> {
        let now = Utc::now().timestamp_millis();

        let result = sqlx::query(
            "INSERT INTO comments (movie_id, user_id, content, created) VALUES (?, ?, ?, ?)",
        )
        .bind(movie_id)
        .bind(user_id)
        .bind(content)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();

        Ok(Comment {
            id,
            movie_id,
            user_id,
            content: content.to_string(),
            created_at: now,
        })
    }

    /// Comments for one movie, newest first, each joined with its author's
    /// username. Rows whose author no longer resolves are skipped.
    pub async fn comments_for_movie(&self, movie_id: i64) -> Result<Vec<CommentView>> {
        let rows = sqlx::query(
            "SELECT c.id, c.movie_id, c.user_id, c.content, c.created, u.username
             FROM comments c LEFT JOIN users u ON u.id = c.user_id
             WHERE c.movie_id = ?
             ORDER BY c.created DESC, c.id DESC",
        )
        .bind(movie_id)
        .fetch_all(&self.pool)
        .await?;

        let mut comments = Vec::with_capacity(rows.len());
        for row in rows {
            let username: Option<String> = row.get("username");
            match username {
                Some(username) => comments.push(CommentView {
                    id: row.get("id"),
                    movie_id: row.get("movie_id"),
                    user_id: row.get("user_id"),
                    username,
                    content: row.get("content"),
                    created_at: row.get("created"),
                }),
                None => {
                    let comment_id: i64 = row.get("id");
                    let user_id: i64 = row.get("user_id");
                    warn!(
                        "Skipping comment {} for movie {}: author {} no longer resolves",
                        comment_id, movie_id, user_id
                    );
                }
            }
        }

        Ok(comments)
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, username FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| User {
            id: row.get("id"),
            username: row.get("username"),
        }))
    }

    /// Resolve a bearer token to the user it identifies, if any.
    pub async fn user_for_session(&self, token: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT u.id, u.username
             FROM sessions s JOIN users u ON u.id = s.user_id
             WHERE s.token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| User {
            id: row.get("id"),
            username: row.get("username"),
        }))
    }
}
