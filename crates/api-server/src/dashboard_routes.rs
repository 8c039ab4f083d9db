//! Dashboard API Routes
//!
//! Home page, saved list and premium plan page.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use yield_screener::{top_n, FilterCriteria, OpportunityFilter, Tab, TOP_OPPORTUNITIES};

use crate::opportunity_routes::load_context;
use crate::view::{tab_views, DashboardView, OpportunityCard, PremiumView, SavedView};
use crate::{ApiResponse, AppError, AppState, UserQuery};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct DashboardQuery {
    pub user_id: Option<String>,
    /// all | stablecoins | volatile | premium | saved
    pub tab: Option<String>,
}

impl DashboardQuery {
    /// Only the home page tabs are accepted here.
    fn tab(&self) -> Result<Tab, AppError> {
        let Some(raw) = self.tab.as_deref().filter(|t| !t.trim().is_empty()) else {
            return Ok(Tab::All);
        };
        let tab: Tab = raw.parse().map_err(AppError::BadRequest)?;
        if !Tab::DASHBOARD.contains(&tab) {
            return Err(AppError::BadRequest(format!("tab '{}' is not available on the dashboard", tab)));
        }
        Ok(tab)
    }
}

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/saved", get(get_saved))
        .route("/api/premium", get(get_premium))
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Top three of the selected tab and its full list", body = DashboardView),
        (status = 400, description = "Tab not offered on the dashboard")
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let tab = query.tab()?;
    let user_query = UserQuery {
        user_id: query.user_id.clone(),
    };
    let ctx = load_context(&state, state.user_id(&user_query)).await?;
    let user = Some(&ctx.user);

    let listed = OpportunityFilter::new(&ctx.platforms)
        .with_user(user)
        .apply(&ctx.opportunities, &FilterCriteria::for_tab(tab));
    // The top strip follows the selected tab
    let top = top_n(&listed, TOP_OPPORTUNITIES);

    Ok(Json(ApiResponse::success(DashboardView {
        top_opportunities: OpportunityCard::build_all(&top, &ctx.platforms, user),
        tabs: tab_views(&Tab::DASHBOARD, tab),
        opportunities: OpportunityCard::build_all(&listed, &ctx.platforms, user),
    })))
}

#[utoipa::path(
    get,
    path = "/api/saved",
    params(UserQuery),
    responses((status = 200, description = "The caller's saved opportunities", body = SavedView)),
    tag = "Dashboard"
)]
pub async fn get_saved(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ApiResponse<SavedView>>, AppError> {
    let ctx = load_context(&state, state.user_id(&query)).await?;
    let user = Some(&ctx.user);

    // Saved order follows the reference list, not the APY ranking
    let saved: Vec<_> = ctx
        .opportunities
        .iter()
        .filter(|opp| ctx.user.has_saved(&opp.id))
        .cloned()
        .collect();
    let opportunities = OpportunityCard::build_all(&saved, &ctx.platforms, user);

    Ok(Json(ApiResponse::success(SavedView {
        total: opportunities.len(),
        opportunities,
    })))
}

#[utoipa::path(
    get,
    path = "/api/premium",
    params(UserQuery),
    responses((status = 200, description = "Subscription plans for the caller", body = PremiumView)),
    tag = "Dashboard"
)]
pub async fn get_premium(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ApiResponse<PremiumView>>, AppError> {
    let user = state.provider.get_user(state.user_id(&query)).await?;
    Ok(Json(ApiResponse::success(PremiumView::for_user(&user))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_tab_whitelist() {
        let query = |tab: &str| DashboardQuery {
            user_id: None,
            tab: Some(tab.to_string()),
        };

        assert_eq!(query("").tab().unwrap(), Tab::All);
        assert_eq!(query("premium").tab().unwrap(), Tab::Premium);
        assert!(matches!(query("lending").tab(), Err(AppError::BadRequest(_))));
        assert!(matches!(query("nonsense").tab(), Err(AppError::BadRequest(_))));
    }
}
