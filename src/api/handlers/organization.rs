use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::domain::organization::{
    Branch, BranchDetails, Company, CompanyChanges, CompanyDetails, CompanyOverview, Department,
    DepartmentChanges, DepartmentDetails, Location, LocationChanges, LocationDetails, LookupDetails,
    LookupEntry, LookupKind,
};
use crate::domain::repositories::{
    CompanyRepository, DepartmentRepository, LocationRepository, LookupRepository,
};
use crate::infrastructure::repositories::{
    PostgresCompanyRepository, PostgresDepartmentRepository, PostgresLocationRepository,
    PostgresLookupRepository,
};

// ===== Companies =====

async fn find_company(repo: &PostgresCompanyRepository, id: Uuid) -> Result<Company, ApiError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Company not found"))
}

/// POST /api/companies
pub async fn create_company(
    State(pool): State<PgPool>,
    Json(req): Json<CompanyDetails>,
) -> Result<(StatusCode, Json<Company>), ApiError> {
    let company = Company::new(req)?;
    PostgresCompanyRepository::new(pool).save(&company).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

/// GET /api/companies
pub async fn list_companies(State(pool): State<PgPool>) -> Result<Json<Vec<Company>>, ApiError> {
    Ok(Json(PostgresCompanyRepository::new(pool).list().await?))
}

/// Company with its branches and departments
///
/// GET /api/companies/:id
pub async fn get_company(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyOverview>, ApiError> {
    PostgresCompanyRepository::new(pool)
        .overview(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Company not found"))
}

/// PUT /api/companies/:id
pub async fn update_company(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(changes): Json<CompanyChanges>,
) -> Result<Json<Company>, ApiError> {
    let repo = PostgresCompanyRepository::new(pool);
    let mut company = find_company(&repo, id).await?;
    company.apply(changes)?;
    repo.save(&company).await?;
    Ok(Json(company))
}

/// DELETE /api/companies/:id
pub async fn delete_company(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    PostgresCompanyRepository::new(pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/companies/:id/branches
pub async fn create_branch(
    State(pool): State<PgPool>,
    Path(company_id): Path<Uuid>,
    Json(req): Json<BranchDetails>,
) -> Result<(StatusCode, Json<Branch>), ApiError> {
    let repo = PostgresCompanyRepository::new(pool);
    find_company(&repo, company_id).await?;

    let branch = Branch::new(company_id, req)?;
    repo.add_branch(&branch).await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

/// GET /api/companies/:id/branches
pub async fn list_branches(
    State(pool): State<PgPool>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Vec<Branch>>, ApiError> {
    let repo = PostgresCompanyRepository::new(pool);
    find_company(&repo, company_id).await?;
    Ok(Json(repo.branches(company_id).await?))
}

// ===== Departments =====

async fn find_department(
    repo: &PostgresDepartmentRepository,
    id: Uuid,
) -> Result<Department, ApiError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Department not found"))
}

/// POST /api/departments
pub async fn create_department(
    State(pool): State<PgPool>,
    Json(req): Json<DepartmentDetails>,
) -> Result<(StatusCode, Json<Department>), ApiError> {
    let companies = PostgresCompanyRepository::new(pool.clone());
    find_company(&companies, req.company_id).await?;

    let department = Department::new(req)?;
    department.check_branch(&companies.branches(department.company_id).await?)?;
    PostgresDepartmentRepository::new(pool)
        .save(&department)
        .await?;
    Ok((StatusCode::CREATED, Json(department)))
}

/// GET /api/departments
pub async fn list_departments(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<Department>>, ApiError> {
    Ok(Json(PostgresDepartmentRepository::new(pool).list().await?))
}

/// GET /api/departments/:id
pub async fn get_department(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<Department>, ApiError> {
    let repo = PostgresDepartmentRepository::new(pool);
    Ok(Json(find_department(&repo, id).await?))
}

/// PUT /api/departments/:id
pub async fn update_department(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(changes): Json<DepartmentChanges>,
) -> Result<Json<Department>, ApiError> {
    let repo = PostgresDepartmentRepository::new(pool.clone());
    let mut department = find_department(&repo, id).await?;
    let moves_branch = changes.branch_id.is_some();
    department.apply(changes)?;
    if moves_branch {
        let branches = PostgresCompanyRepository::new(pool)
            .branches(department.company_id)
            .await?;
        department.check_branch(&branches)?;
    }
    repo.save(&department).await?;
    Ok(Json(department))
}

/// DELETE /api/departments/:id
pub async fn delete_department(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    PostgresDepartmentRepository::new(pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Locations =====

async fn find_location(repo: &PostgresLocationRepository, id: Uuid) -> Result<Location, ApiError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Location not found"))
}

/// POST /api/locations
pub async fn create_location(
    State(pool): State<PgPool>,
    Json(req): Json<LocationDetails>,
) -> Result<(StatusCode, Json<Location>), ApiError> {
    let location = Location::new(req)?;
    PostgresLocationRepository::new(pool).save(&location).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

/// GET /api/locations
pub async fn list_locations(State(pool): State<PgPool>) -> Result<Json<Vec<Location>>, ApiError> {
    Ok(Json(PostgresLocationRepository::new(pool).list().await?))
}

/// Active locations ordered by name
///
/// GET /api/locations/active
pub async fn list_active_locations(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<Location>>, ApiError> {
    Ok(Json(PostgresLocationRepository::new(pool).list_active().await?))
}

/// GET /api/locations/:id
pub async fn get_location(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<Location>, ApiError> {
    let repo = PostgresLocationRepository::new(pool);
    Ok(Json(find_location(&repo, id).await?))
}

/// PUT /api/locations/:id
pub async fn update_location(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(changes): Json<LocationChanges>,
) -> Result<Json<Location>, ApiError> {
    let repo = PostgresLocationRepository::new(pool);
    let mut location = find_location(&repo, id).await?;
    let renamed = location.apply(changes)?;

    // A clashing new name surfaces as 409 here
    repo.save(&location).await?;
    if let Some(name) = renamed {
        tracing::info!(location_id = %id, name = %name, "Location renamed");
    }
    Ok(Json(location))
}

/// DELETE /api/locations/:id
pub async fn delete_location(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    PostgresLocationRepository::new(pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Categories and suppliers =====

async fn create_lookup(
    pool: PgPool,
    kind: LookupKind,
    details: LookupDetails,
) -> Result<(StatusCode, Json<LookupEntry>), ApiError> {
    let entry = LookupEntry::new(kind, details)?;
    PostgresLookupRepository::new(pool).create(kind, &entry).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// POST /api/categories
pub async fn create_category(
    State(pool): State<PgPool>,
    Json(req): Json<LookupDetails>,
) -> Result<(StatusCode, Json<LookupEntry>), ApiError> {
    create_lookup(pool, LookupKind::Category, req).await
}

/// GET /api/categories
pub async fn list_categories(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<LookupEntry>>, ApiError> {
    let entries = PostgresLookupRepository::new(pool)
        .list(LookupKind::Category)
        .await?;
    Ok(Json(entries))
}

/// POST /api/suppliers
pub async fn create_supplier(
    State(pool): State<PgPool>,
    Json(req): Json<LookupDetails>,
) -> Result<(StatusCode, Json<LookupEntry>), ApiError> {
    create_lookup(pool, LookupKind::Supplier, req).await
}

/// GET /api/suppliers
pub async fn list_suppliers(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<LookupEntry>>, ApiError> {
    let entries = PostgresLookupRepository::new(pool)
        .list(LookupKind::Supplier)
        .await?;
    Ok(Json(entries))
}
