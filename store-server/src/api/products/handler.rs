//! Product API Handlers
//!
//! Create takes multipart form data (the admin panel posts the image file
//! together with the fields). Update accepts either multipart or plain
//! JSON; when a new image file is present it replaces the stored URL.
//! Uploads run before any database write.

use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::Json;
use http::header::CONTENT_TYPE;

use crate::api::DeleteResponse;
use crate::core::AppState;
use crate::db::repository::product;
use crate::utils::validation::{
    validate_optional_text, validate_price, validate_required_text, validate_sizes,
    validate_stock, MAX_NAME_LEN, MAX_NOTE_LEN,
};
use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::{AppError, AppResult, ErrorCode};

/// Fields collected from a multipart product form
#[derive(Default)]
struct ProductForm {
    name: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    stock: Option<i64>,
    category_id: Option<i64>,
    sizes: Option<Vec<String>>,
    /// (filename, bytes)
    image: Option<(String, Vec<u8>)>,
}

async fn parse_product_form(mut multipart: Multipart) -> AppResult<ProductForm> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::invalid_request(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "name" => form.name = Some(read_text(field).await?),
            "description" => form.description = Some(read_text(field).await?),
            "price" => {
                let text = read_text(field).await?;
                let price: f64 = text
                    .trim()
                    .parse()
                    .map_err(|_| AppError::validation("price must be a number"))?;
                form.price = Some(price);
            }
            "stock" => {
                let text = read_text(field).await?;
                let stock: i64 = text
                    .trim()
                    .parse()
                    .map_err(|_| AppError::validation("stock must be an integer"))?;
                form.stock = Some(stock);
            }
            "categoryId" => {
                let text = read_text(field).await?;
                let text = text.trim();
                if !text.is_empty() {
                    let id: i64 = text
                        .parse()
                        .map_err(|_| AppError::validation("categoryId must be an id"))?;
                    form.category_id = Some(id);
                }
            }
            // Repeated fields, or a single JSON array value
            "sizes" | "sizes[]" => {
                let text = read_text(field).await?;
                let sizes = form.sizes.get_or_insert_with(Vec::new);
                if text.trim_start().starts_with('[') {
                    let parsed: Vec<String> = serde_json::from_str(&text)
                        .map_err(|_| AppError::validation("sizes must be a list of labels"))?;
                    sizes.extend(parsed);
                } else {
                    sizes.push(text);
                }
            }
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::invalid_request(format!("Read error: {e}")))?
                    .to_vec();
                // An empty file input submits a zero-length part; treat as absent
                if !data.is_empty() {
                    form.image = Some((filename, data));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::invalid_request(format!("Read error: {e}")))
}

fn validate_update(data: &ProductUpdate) -> AppResult<()> {
    if let Some(ref name) = data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    if let Some(price) = data.price {
        validate_price(price)?;
    }
    if let Some(stock) = data.stock {
        validate_stock(stock)?;
    }
    if let Some(ref sizes) = data.sizes {
        validate_sizes(sizes)?;
    }
    Ok(())
}

/// GET /products - all products with nested category
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = product::find_all(&state.pool).await?;
    Ok(Json(products))
}

/// GET /products/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let product = product::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::ProductNotFound, format!("Product {id} not found"))
    })?;
    Ok(Json(product))
}

/// POST /products - multipart form (fields + optional image file)
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Product>> {
    let form = parse_product_form(multipart).await?;

    let name = form
        .name
        .ok_or_else(|| AppError::validation("name is required"))?;
    let price = form
        .price
        .ok_or_else(|| AppError::validation("price is required"))?;
    let stock = form
        .stock
        .ok_or_else(|| AppError::validation("stock is required"))?;

    validate_required_text(&name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&form.description, "description", MAX_NOTE_LEN)?;
    validate_price(price)?;
    validate_stock(stock)?;
    let sizes = form.sizes.unwrap_or_default();
    validate_sizes(&sizes)?;

    // Upload first: a storage failure must abort before any database write
    let image = match form.image {
        Some((filename, data)) => Some(state.images.upload(&filename, data).await?),
        None => None,
    };

    let payload = ProductCreate {
        name,
        description: form.description,
        price,
        stock,
        sizes,
        image,
        category_id: form.category_id,
    };

    let product = product::create(&state.pool, payload).await?;
    tracing::info!(id = product.id, name = %product.name, "Product created");
    Ok(Json(product))
}

/// PATCH /products/:id - multipart or JSON, image optional
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    req: Request,
) -> AppResult<Json<Product>> {
    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let (mut payload, image) = if is_multipart {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| AppError::invalid_request(format!("Malformed multipart body: {e}")))?;
        let form = parse_product_form(multipart).await?;
        let update = ProductUpdate {
            name: form.name,
            description: form.description,
            price: form.price,
            stock: form.stock,
            sizes: form.sizes,
            image: None,
            category_id: form.category_id,
        };
        (update, form.image)
    } else {
        let Json(update) = Json::<ProductUpdate>::from_request(req, &())
            .await
            .map_err(|e| AppError::invalid_request(format!("Malformed JSON body: {e}")))?;
        (update, None)
    };

    validate_update(&payload)?;

    // 404 before touching storage
    if product::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::with_message(
            ErrorCode::ProductNotFound,
            format!("Product {id} not found"),
        ));
    }

    if let Some((filename, data)) = image {
        payload.image = Some(state.images.upload(&filename, data).await?);
    }

    let product = product::update(&state.pool, id, payload).await?;
    Ok(Json(product))
}

/// DELETE /products/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = product::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::with_message(
            ErrorCode::ProductNotFound,
            format!("Product {id} not found"),
        ));
    }

    tracing::info!(id, "Product deleted");
    Ok(Json(DeleteResponse::new(format!("Product {id} deleted"))))
}
