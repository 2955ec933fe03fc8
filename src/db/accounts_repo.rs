// src/db/accounts_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::accounts::{
        CreateWalletPayload, DigitalWallet, OnboardingPayload, OnboardingProgress,
        RegisterUserPayload, UpdateMePayload, User,
    },
};

// Repositório de usuários, carteiras e onboarding.
#[derive(Clone)]
pub struct AccountsRepository {
    pool: PgPool,
}

impl AccountsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    // Cria o usuário, mapeando as violações de unicidade para erros
    // específicos (email e username têm constraints próprias).
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        payload: &RegisterUserPayload,
        password_hash: &str,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, phone, country_code, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&payload.username)
        .bind(&payload.email)
        .bind(password_hash)
        .bind(payload.phone.as_deref())
        .bind(payload.country_code.as_deref())
        .bind(payload.role.clone())
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    let constraint = db_err.constraint().unwrap_or_default();
                    if constraint.contains("email") {
                        return AppError::EmailAlreadyExists;
                    }
                    if constraint.contains("username") {
                        return AppError::UsernameAlreadyExists;
                    }
                }
            }
            e.into()
        })
    }

    pub async fn update_last_login(&self, user_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // Atualização parcial do próprio perfil (COALESCE mantém o que não veio).
    pub async fn update_me(
        &self,
        user_id: Uuid,
        payload: &UpdateMePayload,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                phone = COALESCE($2, phone),
                country_code = COALESCE($3, country_code),
                role = COALESCE($4, role),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(payload.phone.as_deref())
        .bind(payload.country_code.as_deref())
        .bind(payload.role.clone())
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    // ---
    // Carteira digital
    // ---

    pub async fn get_wallet(&self, user_id: Uuid) -> Result<Option<DigitalWallet>, AppError> {
        let wallet =
            sqlx::query_as::<_, DigitalWallet>("SELECT * FROM digital_wallets WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(wallet)
    }

    pub async fn create_wallet(
        &self,
        user_id: Uuid,
        payload: &CreateWalletPayload,
    ) -> Result<DigitalWallet, AppError> {
        let wallet = sqlx::query_as::<_, DigitalWallet>(
            r#"
            INSERT INTO digital_wallets (user_id, balance, currency, bank_cards, coupons)
            VALUES (
                $1,
                COALESCE($2, 0),
                COALESCE($3, 'USD'),
                COALESCE($4, '{}'::jsonb),
                COALESCE($5, '[]'::jsonb)
            )
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(payload.balance)
        .bind(payload.currency.as_deref())
        .bind(payload.bank_cards.as_ref())
        .bind(payload.coupons.as_ref())
        .fetch_one(&self.pool)
        .await?;
        Ok(wallet)
    }

    // ---
    // Onboarding
    // ---

    pub async fn list_onboarding(&self, user_id: Uuid) -> Result<Vec<OnboardingProgress>, AppError> {
        let steps = sqlx::query_as::<_, OnboardingProgress>(
            "SELECT * FROM onboarding_progress WHERE user_id = $1 ORDER BY step ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(steps)
    }

    pub async fn record_onboarding(
        &self,
        user_id: Uuid,
        payload: &OnboardingPayload,
    ) -> Result<OnboardingProgress, AppError> {
        let step = sqlx::query_as::<_, OnboardingProgress>(
            r#"
            INSERT INTO onboarding_progress (user_id, step, status, completed_at)
            VALUES ($1, $2, COALESCE($3, 'pending'), $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&payload.step)
        .bind(payload.status.as_deref())
        .bind(payload.completed_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(step)
    }
}
