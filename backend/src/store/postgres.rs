use async_trait::async_trait;
use catalog_lib::Category;
use diesel::{
    dsl::exists, AsChangeset, ExpressionMethods, Insertable, OptionalExtension, QueryDsl,
    Queryable, Selectable, SelectableHelper,
};
use diesel_async::{pooled_connection::deadpool::Object, AsyncPgConnection, RunQueryDsl};
use eyre::Context;

use super::{CategoryStore, StoreError};
use crate::{db::DbPool, schema::category};

/// A row of the `category` table.
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = category)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct CategoryRow {
    id: i32,
    name: String,
    description: Option<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

/// Every column except `id`. Used both for inserts and for full replacement.
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = category)]
#[diesel(treat_none_as_null = true)]
struct CategoryFields<'a> {
    name: &'a str,
    description: Option<&'a str>,
}

impl<'a> From<&'a Category> for CategoryFields<'a> {
    fn from(category: &'a Category) -> Self {
        CategoryFields {
            name: &category.name,
            description: category.description.as_deref(),
        }
    }
}

/// A [CategoryStore] backed by the `category` table in postgres.
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn connection(&self) -> eyre::Result<Object<AsyncPgConnection>> {
        self.pool
            .get()
            .await
            .wrap_err("Failed to get database connection")
    }
}

#[async_trait]
impl CategoryStore for PgStore {
    async fn list(&self) -> eyre::Result<Vec<Category>> {
        let mut db = self.connection().await?;

        let rows = category::table
            .select(CategoryRow::as_select())
            .order(category::id.asc())
            .load(&mut db)
            .await
            .wrap_err("Failed to query db for categories")?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find(&self, id: i32) -> eyre::Result<Option<Category>> {
        let mut db = self.connection().await?;

        let row = category::table
            .find(id)
            .select(CategoryRow::as_select())
            .first(&mut db)
            .await
            .optional()
            .wrap_err_with(|| format!("Failed to query db for category {id}"))?;

        Ok(row.map(Category::from))
    }

    async fn exists(&self, id: i32) -> eyre::Result<bool> {
        let mut db = self.connection().await?;

        diesel::select(exists(category::table.find(id)))
            .get_result(&mut db)
            .await
            .wrap_err_with(|| format!("Failed to check if category {id} exists"))
    }

    async fn insert(&self, new: &Category) -> eyre::Result<Category> {
        let mut db = self.connection().await?;

        let row = diesel::insert_into(category::table)
            .values(CategoryFields::from(new))
            .returning(CategoryRow::as_returning())
            .get_result(&mut db)
            .await
            .wrap_err("Failed to insert category")?;

        Ok(row.into())
    }

    async fn update(&self, id: i32, changes: &Category) -> Result<(), StoreError> {
        let mut db = self.connection().await?;

        let updated_rows = diesel::update(category::table.find(id))
            .set(CategoryFields::from(changes))
            .execute(&mut db)
            .await
            .wrap_err_with(|| format!("Failed to update category {id}"))?;

        match updated_rows {
            1 => Ok(()),
            _ => Err(StoreError::Conflict { id }),
        }
    }

    async fn remove(&self, id: i32) -> eyre::Result<Option<Category>> {
        let mut db = self.connection().await?;

        let row = diesel::delete(category::table.find(id))
            .returning(CategoryRow::as_returning())
            .get_result(&mut db)
            .await
            .optional()
            .wrap_err_with(|| format!("Failed to delete category {id}"))?;

        Ok(row.map(Category::from))
    }
}
