// src/db/marketplace_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::marketplace::{
        Order, OrderItem, Payment, PaymentPayload, Product, ProductFilter, ProductListing,
        ProductPayload, ProductReview, ReviewPayload, Shipping, ShippingPayload, Store,
        StorePayload, StoreReview,
    },
};

// Lojas, catálogo público, pedidos e avaliações.
// O catálogo é aberto; as escritas são escopadas pelo dono da loja.
#[derive(Clone)]
pub struct MarketplaceRepository {
    pool: PgPool,
}

impl MarketplaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Lojas
    // ---

    // Visíveis para o dono direto ou para o dono da fazenda vinculada.
    pub async fn list_stores(
        &self,
        user_id: Uuid,
        farm: Option<Uuid>,
    ) -> Result<Vec<Store>, AppError> {
        let stores = sqlx::query_as::<_, Store>(
            r#"
            SELECT s.* FROM stores s
            WHERE (s.owner_id = $1
                   OR EXISTS (SELECT 1 FROM farms f WHERE f.id = s.farm_id AND f.owner_id = $1))
              AND ($2::uuid IS NULL OR s.farm_id = $2)
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(farm)
        .fetch_all(&self.pool)
        .await?;
        Ok(stores)
    }

    pub async fn get_store(
        &self,
        store_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Store>, AppError> {
        let store = sqlx::query_as::<_, Store>(
            r#"
            SELECT s.* FROM stores s
            WHERE s.id = $1
              AND (s.owner_id = $2
                   OR EXISTS (SELECT 1 FROM farms f WHERE f.id = s.farm_id AND f.owner_id = $2))
            "#,
        )
        .bind(store_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(store)
    }

    // Consulta interna sem escopo: alvo de avaliações e chat de produto,
    // onde quem pergunta não é o dono da loja.
    pub async fn find_store(&self, store_id: Uuid) -> Result<Option<Store>, AppError> {
        let store = sqlx::query_as::<_, Store>("SELECT * FROM stores WHERE id = $1")
            .bind(store_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(store)
    }

    pub async fn store_owned(&self, store_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let owned = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM stores WHERE id = $1 AND owner_id = $2)",
        )
        .bind(store_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(owned)
    }

    pub async fn create_store(
        &self,
        owner_id: Uuid,
        payload: &StorePayload,
    ) -> Result<Store, AppError> {
        let store = sqlx::query_as::<_, Store>(
            r#"
            INSERT INTO stores (
                owner_id, farm_id, name, description, owner_name, owner_phone,
                owner_email, countries_of_operation, total_value, is_verified
            )
            VALUES (
                $1, $2, $3, COALESCE($4, ''), COALESCE($5, 'Unknown'), COALESCE($6, ''),
                COALESCE($7, ''), COALESCE($8, ''), COALESCE($9, 0), COALESCE($10, FALSE)
            )
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(payload.farm_id)
        .bind(&payload.name)
        .bind(payload.description.as_deref())
        .bind(payload.owner_name.as_deref())
        .bind(payload.owner_phone.as_deref())
        .bind(payload.owner_email.as_deref())
        .bind(payload.countries_of_operation.as_deref())
        .bind(payload.total_value)
        .bind(payload.is_verified)
        .fetch_one(&self.pool)
        .await?;
        Ok(store)
    }

    pub async fn update_store(
        &self,
        store_id: Uuid,
        owner_id: Uuid,
        payload: &StorePayload,
    ) -> Result<Option<Store>, AppError> {
        let store = sqlx::query_as::<_, Store>(
            r#"
            UPDATE stores SET
                name = $3,
                farm_id = COALESCE($4, farm_id),
                description = COALESCE($5, description),
                owner_name = COALESCE($6, owner_name),
                owner_phone = COALESCE($7, owner_phone),
                owner_email = COALESCE($8, owner_email),
                countries_of_operation = COALESCE($9, countries_of_operation),
                total_value = COALESCE($10, total_value),
                is_verified = COALESCE($11, is_verified),
                updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(owner_id)
        .bind(&payload.name)
        .bind(payload.farm_id)
        .bind(payload.description.as_deref())
        .bind(payload.owner_name.as_deref())
        .bind(payload.owner_phone.as_deref())
        .bind(payload.owner_email.as_deref())
        .bind(payload.countries_of_operation.as_deref())
        .bind(payload.total_value)
        .bind(payload.is_verified)
        .fetch_optional(&self.pool)
        .await?;
        Ok(store)
    }

    pub async fn delete_store(&self, store_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM stores WHERE id = $1 AND owner_id = $2")
            .bind(store_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Catálogo de produtos
    // ---

    // Lista pública com filtros e a média de avaliações agregada.
    // A ordenação só aceita colunas conhecidas; qualquer outra coisa
    // cai no padrão (mais recentes primeiro).
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductListing>, AppError> {
        let order_clause = match filter.ordering.as_deref() {
            Some("price") => "p.price ASC",
            Some("-price") => "p.price DESC",
            Some("rating") => "average_rating ASC NULLS FIRST",
            Some("-rating") => "average_rating DESC NULLS LAST",
            Some("created_at") => "p.created_at ASC",
            _ => "p.created_at DESC",
        };
        let sql = format!(
            r#"
            SELECT
                p.*,
                AVG(r.rating)::numeric(3,2) AS average_rating,
                COUNT(r.id) AS reviews_count
            FROM products p
            LEFT JOIN product_reviews r ON r.product_id = p.id
            WHERE ($1::uuid IS NULL OR p.store_id = $1)
              AND ($2::text IS NULL OR p.title ILIKE '%' || $2 || '%'
                   OR p.description ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR p.category = $3)
              AND ($4::numeric IS NULL OR p.price >= $4)
              AND ($5::numeric IS NULL OR p.price <= $5)
            GROUP BY p.id
            ORDER BY {order_clause}
            "#
        );
        let products = sqlx::query_as::<_, ProductListing>(&sql)
            .bind(filter.store)
            .bind(filter.q.as_deref())
            .bind(filter.category.as_deref())
            .bind(filter.min_price)
            .bind(filter.max_price)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    pub async fn get_product(&self, product_id: Uuid) -> Result<Option<ProductListing>, AppError> {
        let product = sqlx::query_as::<_, ProductListing>(
            r#"
            SELECT
                p.*,
                AVG(r.rating)::numeric(3,2) AS average_rating,
                COUNT(r.id) AS reviews_count
            FROM products p
            LEFT JOIN product_reviews r ON r.product_id = p.id
            WHERE p.id = $1
            GROUP BY p.id
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    // A coleta de origem precisa vir de uma fazenda do próprio vendedor.
    pub async fn produce_owned(
        &self,
        produce_id: Uuid,
        owner_id: Uuid,
    ) -> Result<bool, AppError> {
        let owned = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM produce_collections p
                JOIN farms f ON f.id = p.farm_id
                WHERE p.id = $1 AND f.owner_id = $2
            )
            "#,
        )
        .bind(produce_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(owned)
    }

    pub async fn create_product(
        &self,
        owner_id: Uuid,
        payload: &ProductPayload,
    ) -> Result<Product, AppError> {
        if !self.store_owned(payload.store_id, owner_id).await? {
            return Err(AppError::NotFound("Store"));
        }
        if let Some(produce_id) = payload.source_produce_id {
            if !self.produce_owned(produce_id, owner_id).await? {
                return Err(AppError::NotFound("Produce collection"));
            }
        }
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (
                store_id, title, description, category, price, stock_quantity,
                unit, is_dropshippable, total_value, expiration_date,
                source_produce_id, image_url
            )
            VALUES ($1, $2, COALESCE($3, ''), $4, $5, $6, $7, $8,
                    COALESCE($9, $5 * $6), $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(payload.store_id)
        .bind(&payload.title)
        .bind(payload.description.as_deref())
        .bind(&payload.category)
        .bind(payload.price)
        .bind(payload.stock_quantity)
        .bind(&payload.unit)
        .bind(payload.is_dropshippable)
        .bind(payload.total_value)
        .bind(payload.expiration_date)
        .bind(payload.source_produce_id)
        .bind(payload.image_url.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn update_product(
        &self,
        product_id: Uuid,
        owner_id: Uuid,
        payload: &ProductPayload,
    ) -> Result<Option<Product>, AppError> {
        if let Some(produce_id) = payload.source_produce_id {
            if !self.produce_owned(produce_id, owner_id).await? {
                return Err(AppError::NotFound("Produce collection"));
            }
        }
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products p SET
                title = $3, description = COALESCE($4, p.description), category = $5,
                price = $6, stock_quantity = $7, unit = $8, is_dropshippable = $9,
                total_value = COALESCE($10, $6 * $7), expiration_date = $11,
                source_produce_id = $12, image_url = COALESCE($13, p.image_url),
                updated_at = NOW()
            FROM stores s
            WHERE p.id = $1 AND s.id = p.store_id AND s.owner_id = $2
            RETURNING p.*
            "#,
        )
        .bind(product_id)
        .bind(owner_id)
        .bind(&payload.title)
        .bind(payload.description.as_deref())
        .bind(&payload.category)
        .bind(payload.price)
        .bind(payload.stock_quantity)
        .bind(&payload.unit)
        .bind(payload.is_dropshippable)
        .bind(payload.total_value)
        .bind(payload.expiration_date)
        .bind(payload.source_produce_id)
        .bind(payload.image_url.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn delete_product(&self, product_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM products p
            USING stores s
            WHERE p.id = $1 AND s.id = p.store_id AND s.owner_id = $2
            "#,
        )
        .bind(product_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Pedidos (as escritas rodam dentro da transação do serviço)
    // ---

    // Trava a linha do produto para o cálculo/baixa de estoque.
    pub async fn lock_product<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        store_id: Uuid,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = $1 AND store_id = $2 FOR UPDATE",
        )
        .bind(product_id)
        .bind(store_id)
        .fetch_optional(executor)
        .await?;
        Ok(product)
    }

    pub async fn decrement_stock<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        quantity: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE products SET stock_quantity = stock_quantity - $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(product_id)
        .bind(quantity)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn insert_order<'e, E>(
        &self,
        executor: E,
        buyer_id: Uuid,
        store_id: Uuid,
        total_amount: Decimal,
        status: &str,
        shipping_address: Option<&str>,
        transport_mode: Option<&str>,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (buyer_id, store_id, total_amount, status, shipping_address, transport_mode)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(buyer_id)
        .bind(store_id)
        .bind(total_amount)
        .bind(status)
        .bind(shipping_address)
        .bind(transport_mode)
        .fetch_one(executor)
        .await?;
        Ok(order)
    }

    pub async fn insert_order_item<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        product_id: Uuid,
        quantity: Decimal,
        price_per_unit: Decimal,
        subtotal: Decimal,
    ) -> Result<OrderItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, price_per_unit, subtotal)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .bind(price_per_unit)
        .bind(subtotal)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    // Pedidos visíveis: os que o usuário fez e os recebidos pelas lojas dele.
    pub async fn list_orders(&self, user_id: Uuid) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT o.* FROM orders o
            JOIN stores s ON s.id = o.store_id
            WHERE o.buyer_id = $1 OR s.owner_id = $1
            ORDER BY o.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    pub async fn get_order(&self, order_id: Uuid, user_id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT o.* FROM orders o
            JOIN stores s ON s.id = o.store_id
            WHERE o.id = $1 AND (o.buyer_id = $2 OR s.owner_id = $2)
            "#,
        )
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }

    pub async fn list_order_items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, AppError> {
        let items =
            sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE order_id = $1")
                .bind(order_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(items)
    }

    pub async fn update_order_status(
        &self,
        order_id: Uuid,
        user_id: Uuid,
        status: &str,
        shipping_address: Option<&str>,
        transport_mode: Option<&str>,
    ) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders o SET
                status = $3,
                shipping_address = COALESCE($4, o.shipping_address),
                transport_mode = COALESCE($5, o.transport_mode),
                updated_at = NOW()
            FROM stores s
            WHERE o.id = $1 AND s.id = o.store_id AND (o.buyer_id = $2 OR s.owner_id = $2)
            RETURNING o.*
            "#,
        )
        .bind(order_id)
        .bind(user_id)
        .bind(status)
        .bind(shipping_address)
        .bind(transport_mode)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }

    // ---
    // Pagamentos e envios
    // ---

    pub async fn order_visible(&self, order_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let visible = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM orders o
                JOIN stores s ON s.id = o.store_id
                WHERE o.id = $1 AND (o.buyer_id = $2 OR s.owner_id = $2)
            )
            "#,
        )
        .bind(order_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(visible)
    }

    pub async fn create_payment(
        &self,
        user_id: Uuid,
        payload: &PaymentPayload,
    ) -> Result<Payment, AppError> {
        if !self.order_visible(payload.order_id, user_id).await? {
            return Err(AppError::NotFound("Order"));
        }
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (order_id, amount, method, provider, provider_reference, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(payload.order_id)
        .bind(payload.amount)
        .bind(&payload.method)
        .bind(&payload.provider)
        .bind(payload.provider_reference.as_deref())
        .bind(&payload.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(payment)
    }

    pub async fn list_payments(&self, order_id: Uuid, user_id: Uuid) -> Result<Vec<Payment>, AppError> {
        if !self.order_visible(order_id, user_id).await? {
            return Err(AppError::NotFound("Order"));
        }
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE order_id = $1 ORDER BY created_at DESC",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(payments)
    }

    pub async fn create_shipping(
        &self,
        user_id: Uuid,
        payload: &ShippingPayload,
    ) -> Result<Shipping, AppError> {
        if !self.order_visible(payload.order_id, user_id).await? {
            return Err(AppError::NotFound("Order"));
        }
        let shipping = sqlx::query_as::<_, Shipping>(
            r#"
            INSERT INTO shippings (
                order_id, provider, tracking_number, status,
                estimated_delivery_date, shipped_at, delivered_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(payload.order_id)
        .bind(&payload.provider)
        .bind(payload.tracking_number.as_deref())
        .bind(&payload.status)
        .bind(payload.estimated_delivery_date)
        .bind(payload.shipped_at)
        .bind(payload.delivered_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(shipping)
    }

    pub async fn list_shippings(&self, order_id: Uuid, user_id: Uuid) -> Result<Vec<Shipping>, AppError> {
        if !self.order_visible(order_id, user_id).await? {
            return Err(AppError::NotFound("Order"));
        }
        let shippings = sqlx::query_as::<_, Shipping>("SELECT * FROM shippings WHERE order_id = $1")
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(shippings)
    }

    // ---
    // Avaliações (uma por usuário, a constraint UNIQUE garante)
    // ---

    pub async fn list_store_reviews(&self, store_id: Uuid) -> Result<Vec<StoreReview>, AppError> {
        let reviews = sqlx::query_as::<_, StoreReview>(
            "SELECT * FROM store_reviews WHERE store_id = $1 ORDER BY created_at DESC",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    pub async fn create_store_review(
        &self,
        store_id: Uuid,
        user_id: Uuid,
        payload: &ReviewPayload,
    ) -> Result<StoreReview, AppError> {
        sqlx::query_as::<_, StoreReview>(
            r#"
            INSERT INTO store_reviews (store_id, user_id, rating, comment)
            VALUES ($1, $2, $3, COALESCE($4, ''))
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(user_id)
        .bind(payload.rating)
        .bind(payload.comment.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("You have already reviewed this store.".into());
                }
            }
            e.into()
        })
    }

    pub async fn list_product_reviews(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<ProductReview>, AppError> {
        let reviews = sqlx::query_as::<_, ProductReview>(
            "SELECT * FROM product_reviews WHERE product_id = $1 ORDER BY created_at DESC",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    pub async fn create_product_review(
        &self,
        product_id: Uuid,
        user_id: Uuid,
        payload: &ReviewPayload,
    ) -> Result<ProductReview, AppError> {
        sqlx::query_as::<_, ProductReview>(
            r#"
            INSERT INTO product_reviews (product_id, user_id, rating, comment)
            VALUES ($1, $2, $3, COALESCE($4, ''))
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(user_id)
        .bind(payload.rating)
        .bind(payload.comment.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("You have already reviewed this product.".into());
                }
            }
            e.into()
        })
    }
}
