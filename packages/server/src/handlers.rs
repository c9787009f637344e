use actix_web::{HttpResponse, Resource, web};
use revassign_server_models::{
    CreatePrRequest, MergePrRequest, PrResponse, ReassignRequest, ReassignResponse,
    SetIsActiveRequest, SetIsActiveResponse, StatsResponse, Team, TeamName, TeamResponse, UserId,
    UserReviewsResponse,
};

use crate::error::{self, ApiError};
use crate::state::AppState;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(resource("/team/add").route(web::post().to(add_team)))
        .service(resource("/team/get").route(web::get().to(get_team)))
        .service(resource("/team/deactivate").route(web::post().to(deactivate_team)))
        .service(resource("/users/setIsActive").route(web::post().to(set_is_active)))
        .service(resource("/users/getReview").route(web::get().to(get_review)))
        .service(resource("/pullRequest/create").route(web::post().to(create_pr)))
        .service(resource("/pullRequest/merge").route(web::post().to(merge_pr)))
        .service(resource("/pullRequest/reassign").route(web::post().to(reassign_pr)))
        .service(resource("/stats/assignments").route(web::get().to(assignment_stats)));
}

fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::to(error::method_not_allowed))
}

pub async fn add_team(
    state: web::Data<AppState>,
    body: web::Json<Team>,
) -> Result<HttpResponse, ApiError> {
    let team = state.service.add_team(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(TeamResponse { team }))
}

pub async fn get_team(
    state: web::Data<AppState>,
    query: web::Query<TeamName>,
) -> Result<HttpResponse, ApiError> {
    let team = state.service.get_team(&query.team_name).await?;

    Ok(HttpResponse::Ok().json(team))
}

pub async fn deactivate_team(
    state: web::Data<AppState>,
    body: web::Json<TeamName>,
) -> Result<HttpResponse, ApiError> {
    let report = state.service.deactivate_team(&body.team_name).await?;

    Ok(HttpResponse::Ok().json(report))
}

pub async fn set_is_active(
    state: web::Data<AppState>,
    body: web::Json<SetIsActiveRequest>,
) -> Result<HttpResponse, ApiError> {
    let (user, cascade) = state
        .service
        .set_user_active(&body.user_id, body.is_active)
        .await?;

    Ok(HttpResponse::Ok().json(SetIsActiveResponse { user, cascade }))
}

pub async fn get_review(
    state: web::Data<AppState>,
    query: web::Query<UserId>,
) -> Result<HttpResponse, ApiError> {
    let UserId { user_id } = query.into_inner();
    let pull_requests = state.service.get_reviews(&user_id).await?;

    Ok(HttpResponse::Ok().json(UserReviewsResponse {
        user_id,
        pull_requests,
    }))
}

pub async fn create_pr(
    state: web::Data<AppState>,
    body: web::Json<CreatePrRequest>,
) -> Result<HttpResponse, ApiError> {
    let pr = state
        .service
        .create_pr(
            &body.pull_request_id,
            &body.pull_request_name,
            &body.author_id,
        )
        .await?;

    Ok(HttpResponse::Created().json(PrResponse { pr }))
}

pub async fn merge_pr(
    state: web::Data<AppState>,
    body: web::Json<MergePrRequest>,
) -> Result<HttpResponse, ApiError> {
    let pr = state.service.merge_pr(&body.pull_request_id).await?;

    Ok(HttpResponse::Ok().json(PrResponse { pr }))
}

pub async fn reassign_pr(
    state: web::Data<AppState>,
    body: web::Json<ReassignRequest>,
) -> Result<HttpResponse, ApiError> {
    let reassigned = state
        .service
        .reassign_pr(&body.pull_request_id, &body.old_user_id)
        .await?;

    Ok(HttpResponse::Ok().json(ReassignResponse {
        pr: reassigned.pr,
        replaced_by: reassigned.replaced_by,
    }))
}

pub async fn assignment_stats(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let stats = state.service.assignment_stats().await?;

    Ok(HttpResponse::Ok().json(StatsResponse { stats }))
}
