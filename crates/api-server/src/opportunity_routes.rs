//! Opportunity API Routes
//!
//! Browse list with filters, detail page and APY history.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use yield_core::{
    HistoricalYieldDataPoint, Platform, RiskLevel, User, YieldError, YieldOpportunity, UPGRADE_MESSAGE,
};
use yield_screener::{gate_detail, is_locked, FilterCriteria, OpportunityFilter, Tab};

use crate::view::{tab_views, BrowseView, DetailView, OpportunityCard};
use crate::{ApiResponse, AppError, AppState, UserQuery};

/// Query params for the browse list. Empty values mean "no filter".
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct BrowseQuery {
    pub user_id: Option<String>,
    /// all | stablecoins | volatile | lending | liquidity | premium | saved
    pub tab: Option<String>,
    pub search: Option<String>,
    /// Platform id
    pub platform: Option<String>,
    /// low | medium | high
    pub risk: Option<String>,
    /// Minimum APY in percent
    pub min_apy: Option<String>,
}

impl BrowseQuery {
    pub fn criteria(&self) -> Result<FilterCriteria, AppError> {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let tab = match non_empty(&self.tab) {
            Some(tab) => tab.parse::<Tab>().map_err(AppError::BadRequest)?,
            None => Tab::All,
        };
        let risk_level = non_empty(&self.risk)
            .map(|risk| risk.parse::<RiskLevel>().map_err(AppError::BadRequest))
            .transpose()?;
        let min_apy = non_empty(&self.min_apy)
            .map(|raw| match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(AppError::BadRequest(format!("min_apy must be a number, got '{}'", raw))),
            })
            .transpose()?;

        Ok(FilterCriteria {
            tab,
            search: self.search.clone().filter(|s| !s.is_empty()),
            platform_id: non_empty(&self.platform),
            risk_level,
            min_apy,
        })
    }

    fn user_query(&self) -> UserQuery {
        UserQuery {
            user_id: self.user_id.clone(),
        }
    }
}

/// Data every list view starts from: the viewer, platforms, and the
/// opportunity list as served for the viewer's subscription level.
pub(crate) struct ViewContext {
    pub user: User,
    pub platforms: Vec<Platform>,
    pub opportunities: Vec<YieldOpportunity>,
}

pub(crate) async fn load_context(state: &AppState, user_id: &str) -> Result<ViewContext, AppError> {
    let user = state.provider.get_user(user_id).await?;
    let (platforms, opportunities) = tokio::try_join!(
        state.provider.list_platforms(),
        state.provider.list_opportunities(user.subscription_level),
    )?;

    Ok(ViewContext {
        user,
        platforms,
        opportunities,
    })
}

pub fn opportunity_routes() -> Router<AppState> {
    Router::new()
        .route("/api/platforms", get(list_platforms))
        .route("/api/opportunities", get(browse_opportunities))
        .route("/api/opportunities/:id", get(get_opportunity))
        .route("/api/opportunities/:id/history", get(get_history))
}

#[utoipa::path(
    get,
    path = "/api/platforms",
    responses((status = 200, description = "All platforms", body = [Platform])),
    tag = "Opportunities"
)]
pub async fn list_platforms(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Platform>>>, AppError> {
    let platforms = state.provider.list_platforms().await?;
    Ok(Json(ApiResponse::success(platforms)))
}

#[utoipa::path(
    get,
    path = "/api/opportunities",
    params(BrowseQuery),
    responses(
        (status = 200, description = "Filtered opportunities sorted by APY", body = BrowseView),
        (status = 400, description = "Unknown tab or risk level")
    ),
    tag = "Opportunities"
)]
pub async fn browse_opportunities(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<ApiResponse<BrowseView>>, AppError> {
    let criteria = query.criteria()?;
    let user_query = query.user_query();
    let ctx = load_context(&state, state.user_id(&user_query)).await?;

    let filter = OpportunityFilter::new(&ctx.platforms).with_user(Some(&ctx.user));
    let matched = filter.apply(&ctx.opportunities, &criteria);
    let active_filters = filter.active_filters(&criteria);
    let opportunities = OpportunityCard::build_all(&matched, &ctx.platforms, Some(&ctx.user));

    Ok(Json(ApiResponse::success(BrowseView {
        tabs: tab_views(&Tab::BROWSE, criteria.tab),
        total: opportunities.len(),
        active_filters,
        criteria,
        platforms: ctx.platforms,
        opportunities,
    })))
}

#[utoipa::path(
    get,
    path = "/api/opportunities/{id}",
    params(("id" = String, Path, description = "Opportunity id"), UserQuery),
    responses(
        (status = 200, description = "Opportunity detail, gated by subscription", body = DetailView),
        (status = 404, description = "Unknown opportunity or platform")
    ),
    tag = "Opportunities"
)]
pub async fn get_opportunity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ApiResponse<DetailView>>, AppError> {
    let ctx = load_context(&state, state.user_id(&query)).await?;

    let opportunity = ctx
        .opportunities
        .iter()
        .find(|o| o.id == id)
        .ok_or_else(|| YieldError::opportunity_not_found(&id))?;
    if !ctx.platforms.iter().any(|p| p.id == opportunity.platform_id) {
        return Err(YieldError::platform_not_found(&opportunity.platform_id).into());
    }

    // Locked viewers never trigger a history fetch
    let history = if is_locked(opportunity, Some(&ctx.user)) {
        None
    } else {
        Some(state.provider.get_history(&opportunity.id).await?)
    };

    Ok(Json(ApiResponse::success(DetailView {
        opportunity: OpportunityCard::build(opportunity, &ctx.platforms, Some(&ctx.user)),
        premium: gate_detail(opportunity, Some(&ctx.user), history),
    })))
}

#[utoipa::path(
    get,
    path = "/api/opportunities/{id}/history",
    params(("id" = String, Path, description = "Opportunity id"), UserQuery),
    responses(
        (status = 200, description = "Daily APY for the last 30 days", body = [HistoricalYieldDataPoint]),
        (status = 403, description = "Premium opportunity, viewer is on the free plan"),
        (status = 404, description = "Unknown opportunity")
    ),
    tag = "Opportunities"
)]
pub async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ApiResponse<Vec<HistoricalYieldDataPoint>>>, AppError> {
    let user = state.provider.get_user(state.user_id(&query)).await?;
    let opportunities = state.provider.list_opportunities(user.subscription_level).await?;

    if let Some(opportunity) = opportunities.iter().find(|o| o.id == id) {
        if is_locked(opportunity, Some(&user)) {
            return Err(AppError::Locked(UPGRADE_MESSAGE.to_string()));
        }
    }

    let history = state.provider.get_history(&id).await?;
    Ok(Json(ApiResponse::success(history)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_query_to_criteria() {
        let query = BrowseQuery {
            tab: Some("volatile".to_string()),
            search: Some(String::new()),
            platform: Some(String::new()),
            risk: Some("HIGH".to_string()),
            min_apy: Some(" 5 ".to_string()),
            ..BrowseQuery::default()
        };

        let criteria = query.criteria().unwrap();
        assert_eq!(criteria.tab, Tab::Volatile);
        assert_eq!(criteria.search, None);
        assert_eq!(criteria.platform_id, None);
        assert_eq!(criteria.risk_level, Some(RiskLevel::High));
        assert_eq!(criteria.min_apy, Some(5.0));
    }

    #[test]
    fn test_browse_query_min_apy() {
        let query = |min_apy: &str| BrowseQuery {
            min_apy: Some(min_apy.to_string()),
            ..BrowseQuery::default()
        };

        assert_eq!(query("").criteria().unwrap().min_apy, None);
        assert_eq!(query("7.5").criteria().unwrap().min_apy, Some(7.5));
        assert!(matches!(query("abc").criteria(), Err(AppError::BadRequest(_))));
        assert!(matches!(query("NaN").criteria(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_browse_query_rejects_unknown_tab() {
        let query = BrowseQuery {
            tab: Some("bonds".to_string()),
            ..BrowseQuery::default()
        };
        assert!(matches!(query.criteria(), Err(AppError::BadRequest(_))));
    }
}
