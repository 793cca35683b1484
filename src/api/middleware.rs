use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::header;

use crate::api::{AppState, models::ApiError};
use crate::core::{errors::SalonError, models::user::User};

/// The authenticated caller, reloaded from the store on every request.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

fn bearer_token(req: &Request) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}

pub async fn auth_middleware(State(service): State<AppState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let token = bearer_token(&req).ok_or(SalonError::MissingToken)?;
    let user = service.authenticate(&token).await?;
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}
