use crate::core::errors::SalonError;

pub fn hash_password(password: &str, cost: u32) -> Result<String, SalonError> {
    bcrypt::hash(password, cost).map_err(|e| SalonError::InternalServerError(format!("Password hashing error: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, SalonError> {
    bcrypt::verify(password, hash)
        .map_err(|e| SalonError::InternalServerError(format!("Password verification error: {}", e)))
}
