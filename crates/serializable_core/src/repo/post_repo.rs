//! Post repository and bound post records.
//!
//! Relations: `user` (single).

use super::user_repo::load_user;
use super::{bind_rows, ensure_connection_ready, Bound, RepoResult};
use crate::model::post::{NewPost, Post, PostId, POST_SCHEMA};
use crate::model::user::UserId;
use crate::schema::{EntitySchema, FieldDescriptor};
use crate::serialize::{
    Record, RecordSet, Related, RelationError, RelationResult, SerializeError, SerializeResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::Value;

const POST_SELECT_SQL: &str = "SELECT id, user_id, text, created_at FROM posts";

/// Repository interface for posts.
pub trait PostRepository<'conn> {
    fn create_post(&self, post: &NewPost) -> RepoResult<Bound<'conn, Post>>;
    fn get_post(&self, id: PostId) -> RepoResult<Option<Bound<'conn, Post>>>;
    /// Lists all posts in insertion (id) order.
    fn list_posts(&self) -> RepoResult<RecordSet<Bound<'conn, Post>>>;
    /// Lists one user's posts in insertion (id) order.
    fn list_posts_for_user(&self, user_id: UserId) -> RepoResult<RecordSet<Bound<'conn, Post>>>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl<'conn> PostRepository<'conn> for SqlitePostRepository<'conn> {
    fn create_post(&self, post: &NewPost) -> RepoResult<Bound<'conn, Post>> {
        let row = self.conn.query_row(
            "INSERT INTO posts (user_id, text) VALUES (?1, ?2)
             RETURNING id, user_id, text, created_at;",
            params![post.user_id, post.text.as_str()],
            parse_post_row,
        )?;
        Ok(Bound::new(self.conn, row))
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<Bound<'conn, Post>>> {
        let post = self
            .conn
            .query_row(
                &format!("{POST_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_post_row,
            )
            .optional()?;
        Ok(post.map(|row| Bound::new(self.conn, row)))
    }

    fn list_posts(&self) -> RepoResult<RecordSet<Bound<'conn, Post>>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} ORDER BY id ASC;"))?;
        let rows = stmt
            .query_map([], parse_post_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(bind_rows(self.conn, rows))
    }

    fn list_posts_for_user(&self, user_id: UserId) -> RepoResult<RecordSet<Bound<'conn, Post>>> {
        let rows = load_posts_for_user(self.conn, user_id)?;
        Ok(bind_rows(self.conn, rows))
    }
}

pub(crate) fn load_posts_for_user(conn: &Connection, user_id: UserId) -> RepoResult<Vec<Post>> {
    let mut stmt = conn.prepare(&format!(
        "{POST_SELECT_SQL} WHERE user_id = ?1 ORDER BY id ASC;"
    ))?;
    let rows = stmt
        .query_map([user_id], parse_post_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn parse_post_row(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        text: row.get("text")?,
        created_at: row.get("created_at")?,
    })
}

impl Record for Bound<'_, Post> {
    fn schema(&self) -> SerializeResult<&EntitySchema> {
        Ok(&*POST_SCHEMA)
    }

    fn field_value(&self, field: &FieldDescriptor) -> SerializeResult<Value> {
        match field.name() {
            "id" => Ok(Value::from(self.id)),
            "user" => Ok(Value::from(self.user_id)),
            "text" => Ok(Value::from(self.text.as_str())),
            "created_at" => Ok(Value::from(self.created_at)),
            other => Err(SerializeError::unreadable_field("post", other)),
        }
    }

    fn relation(&self, name: &str) -> RelationResult<Related<'_>> {
        match name {
            "user" => {
                let user =
                    load_user(self.conn(), self.user_id)?.ok_or(RelationError::DoesNotExist)?;
                Ok(Related::single(Bound::new(self.conn(), user)))
            }
            _ => Err(RelationError::NoSuchAttribute),
        }
    }
}
