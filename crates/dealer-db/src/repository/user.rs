//! User accounts, keyed by username.

use sqlx::FromRow;

use super::{Entity, Repository, SqliteQuery};
use crate::error::DbResult;
use dealer_core::User;

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub username: String,
    pub password: Option<String>,
}

impl Entity for User {
    type Row = UserRow;

    const NAME: &'static str = "user";
    const TABLE: &'static str = "users";
    const KEY: &'static str = "username";
    const COLUMNS: &'static [&'static str] = &["password"];

    fn key(&self) -> &str {
        &self.username
    }

    fn from_row(row: UserRow) -> Self {
        User {
            username: row.username,
            password: row.password.unwrap_or_default(),
        }
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(self.password.as_str())
    }
}

impl Repository<User> {
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        self.get_by_id(username).await
    }

    /// Creates an account; an existing username is a `UniqueViolation`.
    pub async fn add_user(&self, username: &str, password: &str) -> DbResult<User> {
        let user = User::new(username, password);
        self.add(&user).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::DbError;

    #[tokio::test]
    async fn test_add_and_find_user() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let users = db.users();

        users.add_user("admin", "admin123").await.unwrap();

        let found = users.get_by_username("admin").await.unwrap().unwrap();
        assert!(found.password_matches("admin123"));
        assert_eq!(users.get_by_username("Admin").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.users().add_user("admin", "a").await.unwrap();

        let err = db.users().add_user("admin", "b").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
