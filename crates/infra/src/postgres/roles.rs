//! Postgres role repository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use shopadmin_core::{RepositoryError, RoleId, UserId, UserRef};
use shopadmin_roles::{Role, RoleDetail, RoleRepository, RoleWithCount};

use super::backend;

pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn role_from_row(row: &PgRow) -> Result<Role, sqlx::Error> {
    Ok(Role {
        id: RoleId::from_uuid(row.try_get::<Uuid, _>("id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
    })
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn find(&self, id: RoleId) -> Result<Option<Role>, RepositoryError> {
        let row = sqlx::query("SELECT id, name, description FROM roles WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        row.map(|r| role_from_row(&r)).transpose().map_err(backend)
    }

    async fn find_detailed(&self, id: RoleId) -> Result<Option<RoleDetail>, RepositoryError> {
        let Some(role) = self.find(id).await? else {
            return Ok(None);
        };

        let rows = sqlx::query(
            "SELECT u.id, u.name FROM users u \
             JOIN role_user ru ON ru.user_id = u.id \
             WHERE ru.role_id = $1 \
             ORDER BY u.name",
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        let users = rows
            .iter()
            .map(|row| {
                Ok::<_, sqlx::Error>(UserRef::new(
                    UserId::from_uuid(row.try_get::<Uuid, _>("id")?),
                    row.try_get::<String, _>("name")?,
                ))
            })
            .collect::<Result<_, _>>()
            .map_err(backend)?;

        Ok(Some(RoleDetail { role, users }))
    }

    async fn list_with_counts(&self) -> Result<Vec<RoleWithCount>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT r.id, r.name, r.description, COUNT(ru.user_id) AS user_count \
             FROM roles r \
             LEFT JOIN role_user ru ON ru.role_id = r.id \
             GROUP BY r.id, r.name, r.description \
             ORDER BY r.name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.iter()
            .map(|row| {
                let role = role_from_row(row)?;
                let user_count: i64 = row.try_get("user_count")?;
                Ok(RoleWithCount {
                    role,
                    user_count: user_count as u64,
                })
            })
            .collect::<Result<_, sqlx::Error>>()
            .map_err(backend)
    }

    async fn name_taken(
        &self,
        name: &str,
        exclude: Option<RoleId>,
    ) -> Result<bool, RepositoryError> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM roles WHERE name = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(exclude.map(|id| *id.as_uuid()))
        .fetch_one(&self.pool)
        .await
        .map_err(backend)
    }

    async fn user_count(&self, id: RoleId) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM role_user WHERE role_id = $1")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(backend)?;
        Ok(count as u64)
    }

    async fn insert(&self, role: &Role) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO roles (id, name, description) VALUES ($1, $2, $3)")
            .bind(role.id.as_uuid())
            .bind(&role.name)
            .bind(&role.description)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn update(&self, role: &Role) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE roles SET name = $2, description = $3 WHERE id = $1")
            .bind(role.id.as_uuid())
            .bind(&role.name)
            .bind(&role.description)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn delete(&self, id: RoleId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }
}
