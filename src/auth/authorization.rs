use crate::auth::middleware::AuthenticatedUser;
use crate::error::{AppError, AppResult};

/// Only admins may change the catalogue.
pub fn require_admin(user: Option<&AuthenticatedUser>) -> AppResult<&AuthenticatedUser> {
    let user = user.ok_or(AppError::Unauthorized)?;
    if !user.0.is_admin() {
        return Err(AppError::Forbidden(
            "Only administrators can modify the catalogue".to_string(),
        ));
    }
    Ok(user)
}
