// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::token,
        handlers::auth::refresh,

        // --- Accounts ---
        handlers::accounts::get_me,
        handlers::accounts::update_me,
        handlers::accounts::get_wallet,
        handlers::accounts::create_wallet,
        handlers::accounts::list_onboarding,
        handlers::accounts::record_onboarding,

        // --- Farms ---
        handlers::farms::list_farms,
        handlers::farms::get_farm,
        handlers::farms::create_farm,
        handlers::farms::update_farm,
        handlers::farms::delete_farm,
        handlers::farms::list_fields,
        handlers::farms::get_field,
        handlers::farms::create_field,
        handlers::farms::update_field,
        handlers::farms::delete_field,
        handlers::farms::list_environmental_data,
        handlers::farms::create_environmental_data,

        // --- Crops ---
        handlers::crops::list_crops,
        handlers::crops::get_crop,
        handlers::crops::create_crop,
        handlers::crops::update_crop,
        handlers::crops::delete_crop,
        handlers::crops::list_tasks,
        handlers::crops::create_task,
        handlers::crops::update_task,
        handlers::crops::delete_task,
        handlers::crops::list_assignments,
        handlers::crops::create_assignment,
        handlers::crops::delete_assignment,
        handlers::crops::list_expenses,
        handlers::crops::create_expense,
        handlers::crops::delete_expense,

        // --- Livestock ---
        handlers::livestock::list_units,
        handlers::livestock::get_unit,
        handlers::livestock::create_unit,
        handlers::livestock::update_unit,
        handlers::livestock::delete_unit,
        handlers::livestock::list_animals,
        handlers::livestock::get_animal,
        handlers::livestock::create_animal,
        handlers::livestock::update_animal,
        handlers::livestock::delete_animal,
        handlers::livestock::list_reproductive_records,
        handlers::livestock::create_reproductive_record,
        handlers::livestock::list_tasks,
        handlers::livestock::create_task,
        handlers::livestock::update_task,
        handlers::livestock::delete_task,
        handlers::livestock::list_assignments,
        handlers::livestock::create_assignment,
        handlers::livestock::list_expenses,
        handlers::livestock::create_expense,
        handlers::livestock::list_medical_records,
        handlers::livestock::create_medical_record,

        // --- Inventory ---
        handlers::inventory::list_items,
        handlers::inventory::get_item,
        handlers::inventory::create_item,
        handlers::inventory::update_item,
        handlers::inventory::delete_item,
        handlers::inventory::list_production_records,
        handlers::inventory::create_production_record,
        handlers::inventory::delete_production_record,

        // --- Produce ---
        handlers::produce::list_collections,
        handlers::produce::get_collection,
        handlers::produce::create_collection,
        handlers::produce::update_collection,
        handlers::produce::delete_collection,
        handlers::produce::summary,

        // --- Marketplace ---
        handlers::marketplace::list_stores,
        handlers::marketplace::get_store,
        handlers::marketplace::create_store,
        handlers::marketplace::update_store,
        handlers::marketplace::delete_store,
        handlers::marketplace::list_products,
        handlers::marketplace::get_product,
        handlers::marketplace::create_product,
        handlers::marketplace::update_product,
        handlers::marketplace::delete_product,
        handlers::marketplace::list_orders,
        handlers::marketplace::get_order,
        handlers::marketplace::create_order,
        handlers::marketplace::update_order,
        handlers::marketplace::list_payments,
        handlers::marketplace::create_payment,
        handlers::marketplace::list_shippings,
        handlers::marketplace::create_shipping,
        handlers::marketplace::list_store_reviews,
        handlers::marketplace::create_store_review,
        handlers::marketplace::list_product_reviews,
        handlers::marketplace::create_product_review,

        // --- Workforce ---
        handlers::workforce::list_employees,
        handlers::workforce::get_employee,
        handlers::workforce::create_employee,
        handlers::workforce::update_employee,
        handlers::workforce::delete_employee,
        handlers::workforce::list_machinery,
        handlers::workforce::create_machinery,
        handlers::workforce::delete_machinery,
        handlers::workforce::list_equipment,
        handlers::workforce::create_equipment,
        handlers::workforce::delete_equipment,
        handlers::workforce::list_professionals,
        handlers::workforce::get_my_professional,
        handlers::workforce::list_featured_professionals,
        handlers::workforce::list_top_rated_professionals,
        handlers::workforce::get_professional,
        handlers::workforce::create_professional,
        handlers::workforce::update_my_professional,
        handlers::workforce::list_professional_reviews,
        handlers::workforce::create_professional_review,
        handlers::workforce::respond_professional_review,
        handlers::workforce::mark_review_helpful,
        handlers::workforce::list_jobs,
        handlers::workforce::list_my_postings,
        handlers::workforce::get_job,
        handlers::workforce::create_job,
        handlers::workforce::update_job,
        handlers::workforce::delete_job,
        handlers::workforce::hire,
        handlers::workforce::list_applications,
        handlers::workforce::create_application,
        handlers::workforce::withdraw_application,

        // --- Communications ---
        handlers::communications::list_conversations,
        handlers::communications::get_conversation,
        handlers::communications::create_conversation,
        handlers::communications::start_product_chat,
        handlers::communications::leave_conversation,
        handlers::communications::list_messages,
        handlers::communications::create_message,
        handlers::communications::mark_read,

        // --- AI ---
        handlers::ai::chat,
        handlers::ai::list_logs,
        handlers::ai::list_predictions,
        handlers::ai::create_prediction,
        handlers::ai::list_alerts,
        handlers::ai::create_alert,
        handlers::ai::resolve_alert,

        // --- Analytics ---
        handlers::analytics::list_finances,
        handlers::analytics::create_finance,
        handlers::analytics::delete_finance,
        handlers::analytics::finance_summary,
        handlers::analytics::list_aggregates,
        handlers::analytics::list_reports,
        handlers::analytics::create_report,
    ),
    components(
        schemas(
            // --- Accounts ---
            models::accounts::UserRole,
            models::accounts::User,
            models::accounts::DigitalWallet,
            models::accounts::OnboardingProgress,
            models::accounts::RegisterUserPayload,
            models::accounts::LoginUserPayload,
            models::accounts::RefreshPayload,
            models::accounts::UpdateMePayload,
            models::accounts::TokenPairResponse,
            models::accounts::AccessResponse,
            models::accounts::CreateWalletPayload,
            models::accounts::OnboardingPayload,

            // --- Farms ---
            models::farms::FarmType,
            models::farms::SizeUnit,
            models::farms::Farm,
            models::farms::Field,
            models::farms::EnvironmentalData,
            models::farms::FarmPayload,
            models::farms::FieldPayload,
            models::farms::EnvironmentalDataPayload,

            // --- Crops ---
            models::crops::Crop,
            models::crops::CropTask,
            models::crops::CropEmployeeAssignment,
            models::crops::CropExpense,
            models::crops::CropPayload,
            models::crops::CropTaskPayload,
            models::crops::CropAssignmentPayload,
            models::crops::CropExpensePayload,

            // --- Livestock ---
            models::livestock::LivestockUnit,
            models::livestock::Animal,
            models::livestock::AnimalReproductiveRecord,
            models::livestock::LivestockTask,
            models::livestock::LivestockEmployeeAssignment,
            models::livestock::LivestockExpense,
            models::livestock::AnimalMedicalRecord,
            models::livestock::LivestockUnitPayload,
            models::livestock::AnimalPayload,
            models::livestock::ReproductiveRecordPayload,
            models::livestock::LivestockTaskPayload,
            models::livestock::LivestockAssignmentPayload,
            models::livestock::LivestockExpensePayload,
            models::livestock::MedicalRecordPayload,

            // --- Inventory ---
            models::inventory::InventoryItem,
            models::inventory::ProductionRecord,
            models::inventory::InventoryItemPayload,
            models::inventory::ProductionRecordPayload,

            // --- Produce ---
            models::produce::ProduceSource,
            models::produce::ProduceUnit,
            models::produce::ProduceCollection,
            models::produce::ProduceCollectionPayload,
            models::produce::ProduceSummary,

            // --- Marketplace ---
            models::marketplace::Store,
            models::marketplace::Product,
            models::marketplace::ProductListing,
            models::marketplace::Order,
            models::marketplace::OrderItem,
            models::marketplace::OrderDetail,
            models::marketplace::Payment,
            models::marketplace::Shipping,
            models::marketplace::StoreReview,
            models::marketplace::ProductReview,
            models::marketplace::StorePayload,
            models::marketplace::ProductPayload,
            models::marketplace::OrderItemPayload,
            models::marketplace::CreateOrderPayload,
            models::marketplace::UpdateOrderPayload,
            models::marketplace::PaymentPayload,
            models::marketplace::ShippingPayload,
            models::marketplace::ReviewPayload,

            // --- Workforce ---
            models::workforce::Specialty,
            models::workforce::Availability,
            models::workforce::JobStatus,
            models::workforce::ApplicationStatus,
            models::workforce::PaymentType,
            models::workforce::Employee,
            models::workforce::Machinery,
            models::workforce::Equipment,
            models::workforce::ProfessionalProfile,
            models::workforce::ProfessionalReview,
            models::workforce::JobPosting,
            models::workforce::JobApplication,
            models::workforce::EmployeePayload,
            models::workforce::MachineryPayload,
            models::workforce::ProfessionalProfilePayload,
            models::workforce::ProfessionalReviewPayload,
            models::workforce::RespondReviewPayload,
            models::workforce::JobPostingPayload,
            models::workforce::JobApplicationPayload,
            models::workforce::HirePayload,

            // --- Communications ---
            models::communications::Conversation,
            models::communications::ConversationDetail,
            models::communications::ConversationParticipant,
            models::communications::Message,
            models::communications::ConversationPayload,
            models::communications::StartProductChatPayload,
            models::communications::MessagePayload,
            models::communications::ChatFrame,

            // --- AI ---
            models::ai::AiLog,
            models::ai::Prediction,
            models::ai::Alert,
            models::ai::ChatTurn,
            models::ai::ChatPayload,
            models::ai::ChatResponse,
            models::ai::PredictionPayload,
            models::ai::AlertPayload,

            // --- Analytics ---
            models::analytics::FarmFinance,
            models::analytics::AnalyticsAggregate,
            models::analytics::Report,
            models::analytics::FarmFinancePayload,
            models::analytics::ReportPayload,
            models::analytics::FinanceSummary,
            models::analytics::CategoryTotal,
        )
    ),
    tags(
        (name = "Accounts", description = "Registro, tokens, perfil, carteira e onboarding"),
        (name = "Farms", description = "Fazendas, talhões e dados ambientais"),
        (name = "Crops", description = "Culturas, tarefas e despesas"),
        (name = "Livestock", description = "Lotes, animais e registros de criação"),
        (name = "Inventory", description = "Estoque e registros de produção"),
        (name = "Produce", description = "Coletas de produção por fazenda"),
        (name = "Marketplace", description = "Lojas, produtos, pedidos e avaliações"),
        (name = "Workforce", description = "Funcionários, ativos e rede de profissionais"),
        (name = "Communications", description = "Conversas e mensagens"),
        (name = "AI", description = "Assistente, previsões e alertas"),
        (name = "Analytics", description = "Finanças, agregados e relatórios")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
