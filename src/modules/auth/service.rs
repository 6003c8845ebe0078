use sqlx::PgPool;

use crate::modules::users::model::User;
use crate::utils::errors::AppError;
use crate::utils::password::{DUMMY_HASH, verify_password};

/// Credential row, private to the auth path. The only place the password hash
/// ever leaves the database.
#[derive(sqlx::FromRow)]
struct CredentialRow {
    #[sqlx(flatten)]
    user: User,
    password: String,
}

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    /// Verify an email/password pair.
    ///
    /// Unknown email and wrong password return the identical error, and the
    /// unknown-email path still runs a bcrypt verification against a fixed
    /// dummy hash so the two failures cost roughly the same.
    pub async fn authenticate(
        db: &PgPool,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, name, email, role, designation, dob, aadhar_number, pan_number,
                    room_number, profile_picture, phone_number, country_code,
                    emergency_contact_name, emergency_contact_relation, emergency_contact_phone,
                    emergency_country_code, employee_id, office_location, floor, desk_number,
                    office_phone, date_created, password
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .map_err(AppError::storage)?;

        match row {
            Some(row) => {
                if verify_password(password, &row.password)? {
                    Ok(row.user)
                } else {
                    Err(AppError::unauthorized(INVALID_CREDENTIALS))
                }
            }
            None => {
                // burn the same bcrypt cost as the known-email path
                let _ = verify_password(password, DUMMY_HASH);
                Err(AppError::unauthorized(INVALID_CREDENTIALS))
            }
        }
    }
}
