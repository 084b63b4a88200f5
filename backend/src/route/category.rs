use actix_web::{
    delete, get,
    http::header,
    post, put,
    web::{self, Json},
    HttpRequest, HttpResponse,
};
use catalog_lib::Category;
use eyre::Context;

use crate::{
    error::{Error, Result},
    serialize::Ser,
    store::{CategoryStore, StoreError},
};

/// Get all categories, ordered by id
#[get("/category")]
pub async fn list_categories(store: web::Data<dyn CategoryStore>) -> Result<Ser<Category>> {
    let categories = list_inner(store.get_ref()).await?;
    Ok(Ser(categories))
}

pub async fn list_inner(store: &dyn CategoryStore) -> Result<Vec<Category>> {
    Ok(store.list().await?)
}

/// Get a single category
#[get("/category/{id}", name = "get_category")]
pub async fn get_category(
    store: web::Data<dyn CategoryStore>,
    path: web::Path<i32>,
) -> Result<Json<Category>> {
    let category = get_inner(store.get_ref(), path.into_inner()).await?;
    Ok(Json(category))
}

pub async fn get_inner(store: &dyn CategoryStore, id: i32) -> Result<Category> {
    store.find(id).await?.ok_or(Error::NotFound)
}

/// Create a new category
#[post("/category")]
pub async fn create_category(
    req: HttpRequest,
    store: web::Data<dyn CategoryStore>,
    body: Json<Category>,
) -> Result<HttpResponse> {
    let category = create_inner(store.get_ref(), body.into_inner()).await?;

    let location = req
        .url_for("get_category", [category.id.to_string()])
        .wrap_err("Failed to build location of new category")?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location.as_str()))
        .json(category))
}

pub async fn create_inner(store: &dyn CategoryStore, new: Category) -> Result<Category> {
    let category = store.insert(&new).await?;
    log::info!("created category {} ({:?})", category.id, category.name);
    Ok(category)
}

/// Replace every field of a category
#[put("/category/{id}")]
pub async fn replace_category(
    store: web::Data<dyn CategoryStore>,
    path: web::Path<i32>,
    body: Json<Category>,
) -> Result<Json<Category>> {
    let category = replace_inner(store.get_ref(), path.into_inner(), body.into_inner()).await?;
    Ok(Json(category))
}

/// Conflicting writes are not retried. If the category is gone the caller gets a 404, otherwise
/// the conflict is passed on as an internal error.
pub async fn replace_inner(
    store: &dyn CategoryStore,
    id: i32,
    category: Category,
) -> Result<Category> {
    if category.id != id {
        return Err(Error::BadRequest(format!(
            "id in path ({id}) does not match id in body ({})",
            category.id
        )));
    }

    match store.update(id, &category).await {
        Ok(()) => Ok(category),
        Err(conflict @ StoreError::Conflict { .. }) => {
            if store.exists(id).await? {
                Err(conflict.into())
            } else {
                Err(Error::NotFound)
            }
        }
        Err(e) => Err(e.into()),
    }
}

/// Delete a category, responding with what it used to contain
#[delete("/category/{id}")]
pub async fn delete_category(
    store: web::Data<dyn CategoryStore>,
    path: web::Path<i32>,
) -> Result<Json<Category>> {
    let category = delete_inner(store.get_ref(), path.into_inner()).await?;
    Ok(Json(category))
}

pub async fn delete_inner(store: &dyn CategoryStore, id: i32) -> Result<Category> {
    let category = store.remove(id).await?.ok_or(Error::NotFound)?;
    log::info!("deleted category {id}");
    Ok(category)
}
