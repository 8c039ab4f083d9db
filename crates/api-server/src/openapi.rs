use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::{dashboard_routes, opportunity_routes, user_routes, view, AppState};

#[derive(OpenApi)]
#[openapi(
    info(title = "YieldScope API", description = "Yield opportunity dashboard"),
    paths(
        opportunity_routes::list_platforms,
        opportunity_routes::browse_opportunities,
        opportunity_routes::get_opportunity,
        opportunity_routes::get_history,
        dashboard_routes::get_dashboard,
        dashboard_routes::get_saved,
        dashboard_routes::get_premium,
        user_routes::get_current_user,
        user_routes::update_subscription,
        user_routes::save_opportunity,
        user_routes::unsave_opportunity,
    ),
    components(schemas(
        yield_core::Platform,
        yield_core::YieldOpportunity,
        yield_core::HistoricalYieldDataPoint,
        yield_core::User,
        yield_core::RiskLevel,
        yield_core::SubscriptionLevel,
        yield_screener::FilterCriteria,
        yield_screener::ActiveFilter,
        yield_screener::ApyTier,
        yield_screener::Tab,
        yield_screener::GatedDetail,
        yield_screener::RiskAssessment,
        view::OpportunityCard,
        view::TabView,
        view::BrowseView,
        view::DashboardView,
        view::SavedView,
        view::DetailView,
        view::PlanView,
        view::PlanFeature,
        view::PremiumView,
        user_routes::SubscriptionRequest,
    )),
    tags(
        (name = "Opportunities", description = "Browse, detail and history"),
        (name = "Dashboard", description = "Home, saved and premium pages"),
        (name = "Users", description = "Subscription and saved opportunities")
    )
)]
pub struct ApiDoc;

pub fn openapi_routes() -> Router<AppState> {
    Router::new().route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}
