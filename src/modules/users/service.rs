use sqlx::PgPool;
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{CreateUserDto, RoleCounts, UpdateUserDto, User, UserRole};

/// Every column except the password hash, which never leaves the auth path.
const USER_COLUMNS: &str = "id, name, email, role, designation, dob, aadhar_number, pan_number, \
     room_number, profile_picture, phone_number, country_code, emergency_contact_name, \
     emergency_contact_relation, emergency_contact_phone, emergency_country_code, employee_id, \
     office_location, floor, desk_number, office_phone, date_created";

pub struct UserService;

impl UserService {
    pub async fn list(db: &PgPool) -> Result<Vec<User>, AppError> {
        let users =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY name"))
                .fetch_all(db)
                .await
                .map_err(AppError::storage)?;

        Ok(users)
    }

    pub async fn get(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(db)
                .await
                .map_err(AppError::storage)?
                .ok_or_else(|| AppError::not_found(format!("User with id {} not found", id)))?;

        Ok(user)
    }

    pub async fn search(db: &PgPool, query: &str) -> Result<Vec<User>, AppError> {
        let pattern = format!("%{}%", query);
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE name ILIKE $1 OR email ILIKE $1 OR designation ILIKE $1
             ORDER BY name"
        ))
        .bind(&pattern)
        .fetch_all(db)
        .await
        .map_err(AppError::storage)?;

        Ok(users)
    }

    pub async fn create(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (
                name, email, password, role, designation, dob, aadhar_number, pan_number,
                room_number, phone_number, country_code, emergency_contact_name,
                emergency_contact_relation, emergency_contact_phone, emergency_country_code,
                employee_id, office_location, floor, desk_number, office_phone
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                     $18, $19, $20)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(dto.role)
        .bind(&dto.designation)
        .bind(dto.dob)
        .bind(&dto.aadhar_number)
        .bind(&dto.pan_number)
        .bind(&dto.room_number)
        .bind(&dto.phone_number)
        .bind(&dto.country_code)
        .bind(&dto.emergency_contact_name)
        .bind(&dto.emergency_contact_relation)
        .bind(&dto.emergency_contact_phone)
        .bind(&dto.emergency_country_code)
        .bind(&dto.employee_id)
        .bind(&dto.office_location)
        .bind(&dto.floor)
        .bind(&dto.desk_number)
        .bind(&dto.office_phone)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if AppError::is_unique_violation(&e) {
                AppError::conflict("Email already in use")
            } else {
                AppError::storage(e)
            }
        })?;

        Ok(user)
    }

    /// Sparse-merge update. Each column is written only when the DTO marks it
    /// for writing; everything else keeps its stored value byte-for-byte.
    /// `date_created` is never part of the SET list.
    pub async fn update(db: &PgPool, id: Uuid, dto: UpdateUserDto) -> Result<User, AppError> {
        let hashed_password = match &dto.password {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET
                name = CASE WHEN $2 THEN $3 ELSE name END,
                email = CASE WHEN $4 THEN $5 ELSE email END,
                role = CASE WHEN $6 THEN $7 ELSE role END,
                designation = CASE WHEN $8 THEN $9 ELSE designation END,
                password = CASE WHEN $10 THEN $11 ELSE password END,
                dob = CASE WHEN $12 THEN $13 ELSE dob END,
                aadhar_number = CASE WHEN $14 THEN $15 ELSE aadhar_number END,
                pan_number = CASE WHEN $16 THEN $17 ELSE pan_number END,
                room_number = CASE WHEN $18 THEN $19 ELSE room_number END,
                profile_picture = CASE WHEN $20 THEN $21 ELSE profile_picture END,
                phone_number = CASE WHEN $22 THEN $23 ELSE phone_number END,
                country_code = CASE WHEN $24 THEN $25 ELSE country_code END,
                emergency_contact_name = CASE WHEN $26 THEN $27 ELSE emergency_contact_name END,
                emergency_contact_relation =
                    CASE WHEN $28 THEN $29 ELSE emergency_contact_relation END,
                emergency_contact_phone = CASE WHEN $30 THEN $31 ELSE emergency_contact_phone END,
                emergency_country_code = CASE WHEN $32 THEN $33 ELSE emergency_country_code END,
                employee_id = CASE WHEN $34 THEN $35 ELSE employee_id END,
                office_location = CASE WHEN $36 THEN $37 ELSE office_location END,
                floor = CASE WHEN $38 THEN $39 ELSE floor END,
                desk_number = CASE WHEN $40 THEN $41 ELSE desk_number END,
                office_phone = CASE WHEN $42 THEN $43 ELSE office_phone END
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.name.is_some())
        .bind(&dto.name)
        .bind(dto.email.is_some())
        .bind(&dto.email)
        .bind(dto.role.is_some())
        .bind(dto.role)
        .bind(dto.designation.is_some())
        .bind(&dto.designation)
        .bind(hashed_password.is_some())
        .bind(&hashed_password)
        .bind(dto.dob.is_write())
        .bind(dto.dob.write_value())
        .bind(dto.aadhar_number.is_write())
        .bind(dto.aadhar_number.write_value())
        .bind(dto.pan_number.is_write())
        .bind(dto.pan_number.write_value())
        .bind(dto.room_number.is_write())
        .bind(dto.room_number.write_value())
        .bind(dto.profile_picture.is_write())
        .bind(dto.profile_picture.write_value())
        .bind(dto.phone_number.is_write())
        .bind(dto.phone_number.write_value())
        .bind(dto.country_code.is_write())
        .bind(dto.country_code.write_value())
        .bind(dto.emergency_contact_name.is_write())
        .bind(dto.emergency_contact_name.write_value())
        .bind(dto.emergency_contact_relation.is_write())
        .bind(dto.emergency_contact_relation.write_value())
        .bind(dto.emergency_contact_phone.is_write())
        .bind(dto.emergency_contact_phone.write_value())
        .bind(dto.emergency_country_code.is_write())
        .bind(dto.emergency_country_code.write_value())
        .bind(dto.employee_id.is_write())
        .bind(dto.employee_id.write_value())
        .bind(dto.office_location.is_write())
        .bind(dto.office_location.write_value())
        .bind(dto.floor.is_write())
        .bind(dto.floor.write_value())
        .bind(dto.desk_number.is_write())
        .bind(dto.desk_number.write_value())
        .bind(dto.office_phone.is_write())
        .bind(dto.office_phone.write_value())
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if AppError::is_unique_violation(&e) {
                AppError::conflict("Email already in use")
            } else {
                AppError::storage(e)
            }
        })?
        .ok_or_else(|| AppError::not_found(format!("User with id {} not found", id)))?;

        Ok(user)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::storage)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "User with id {} not found",
                id
            )));
        }

        Ok(())
    }

    pub async fn count_by_role(db: &PgPool) -> Result<RoleCounts, AppError> {
        let rows: Vec<(UserRole, i64)> =
            sqlx::query_as("SELECT role, COUNT(*) FROM users GROUP BY role")
                .fetch_all(db)
                .await
                .map_err(AppError::storage)?;

        let mut counts = RoleCounts {
            admin: 0,
            poweruser: 0,
            user: 0,
        };
        for (role, count) in rows {
            match role {
                UserRole::Admin => counts.admin = count,
                UserRole::PowerUser => counts.poweruser = count,
                UserRole::User => counts.user = count,
            }
        }

        Ok(counts)
    }
}
