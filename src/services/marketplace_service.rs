// src/services/marketplace_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::MarketplaceRepository,
    models::marketplace::{CreateOrderPayload, OrderDetail, OrderItemPayload},
};

// Orquestra a criação de pedidos: trava os produtos, confere estoque,
// calcula os subtotais no servidor e grava tudo em uma transação só.
#[derive(Clone)]
pub struct MarketplaceService {
    repo: MarketplaceRepository,
    pool: PgPool,
}

// Subtotal de um item e total do pedido são sempre recalculados aqui;
// o que o cliente manda como subtotal é ignorado.
pub fn item_subtotal(item: &OrderItemPayload) -> Decimal {
    item.quantity * item.price_per_unit
}

pub fn order_total(items: &[OrderItemPayload]) -> Decimal {
    items.iter().map(item_subtotal).sum()
}

impl MarketplaceService {
    pub fn new(repo: MarketplaceRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn create_order(
        &self,
        buyer_id: Uuid,
        payload: &CreateOrderPayload,
    ) -> Result<OrderDetail, AppError> {
        let total = order_total(&payload.items);

        let mut tx = self.pool.begin().await?;

        // Confere cada produto com a linha travada, para que duas compras
        // simultâneas não vendam o mesmo estoque.
        for item in &payload.items {
            let product = self
                .repo
                .lock_product(&mut *tx, item.product_id, payload.store_id)
                .await?
                .ok_or(AppError::NotFound("Product"))?;

            if product.stock_quantity < item.quantity {
                return Err(AppError::Conflict(format!(
                    "Insufficient stock for '{}'.",
                    product.title
                )));
            }
        }

        let order = self
            .repo
            .insert_order(
                &mut *tx,
                buyer_id,
                payload.store_id,
                total,
                &payload.status,
                payload.shipping_address.as_deref(),
                payload.transport_mode.as_deref(),
            )
            .await?;

        let mut items = Vec::with_capacity(payload.items.len());
        for item in &payload.items {
            let subtotal = item_subtotal(item);
            let saved = self
                .repo
                .insert_order_item(
                    &mut *tx,
                    order.id,
                    item.product_id,
                    item.quantity,
                    item.price_per_unit,
                    subtotal,
                )
                .await?;
            self.repo
                .decrement_stock(&mut *tx, item.product_id, item.quantity)
                .await?;
            items.push(saved);
        }

        tx.commit().await?;

        tracing::info!(order_id = %order.id, buyer_id = %buyer_id, total = %total, "Pedido criado");
        Ok(OrderDetail { order, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(quantity: Decimal, price: Decimal) -> OrderItemPayload {
        OrderItemPayload {
            product_id: Uuid::new_v4(),
            quantity,
            price_per_unit: price,
        }
    }

    #[test]
    fn subtotal_is_quantity_times_price() {
        let it = item(dec!(3), dec!(2.50));
        assert_eq!(item_subtotal(&it), dec!(7.50));
    }

    #[test]
    fn total_sums_all_items() {
        let items = vec![item(dec!(2), dec!(10)), item(dec!(1.5), dec!(4))];
        assert_eq!(order_total(&items), dec!(26.0));
    }

    #[test]
    fn total_of_empty_order_is_zero() {
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }
}
