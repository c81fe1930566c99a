//! Subscription plans offered to instructors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    /// Price in centavos.
    pub price_cents: i64,
    pub duration_days: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlanResponse {
    pub plan: Plan,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePlanDto {
    #[validate(length(min = 1, max = 120, message = "Nome deve ter entre 1 e 120 caracteres"))]
    #[schema(example = "Plano Mensal")]
    pub name: String,
    #[validate(range(min = 0, message = "Preço não pode ser negativo"))]
    #[schema(example = 9900)]
    pub price_cents: i64,
    #[validate(range(min = 1, max = 3650, message = "Duração deve ser entre 1 e 3650 dias"))]
    #[schema(example = 30)]
    pub duration_days: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePlanDto {
    #[validate(length(min = 1, max = 120, message = "Nome deve ter entre 1 e 120 caracteres"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "Preço não pode ser negativo"))]
    pub price_cents: Option<i64>,
    #[validate(range(min = 1, max = 3650, message = "Duração deve ser entre 1 e 3650 dias"))]
    pub duration_days: Option<i32>,
    pub is_active: Option<bool>,
}

impl UpdatePlanDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price_cents.is_none()
            && self.duration_days.is_none()
            && self.is_active.is_none()
    }

    /// Applies the present fields to `plan`.
    pub fn apply(&self, plan: &mut Plan) {
        if let Some(name) = &self.name {
            plan.name = name.clone();
        }
        if let Some(price_cents) = self.price_cents {
            plan.price_cents = price_cents;
        }
        if let Some(duration_days) = self.duration_days {
            plan.duration_days = duration_days;
        }
        if let Some(is_active) = self.is_active {
            plan.is_active = is_active;
        }
    }
}
