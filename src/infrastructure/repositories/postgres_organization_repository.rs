use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{conflict_on_unique, delete_by_id};
use crate::domain::organization::{
    Branch, Company, CompanyOverview, Department, Location, LookupEntry, LookupKind,
};
use crate::domain::repositories::{
    CompanyRepository, DepartmentRepository, LocationRepository, LookupRepository,
    RepositoryError, RepositoryResult,
};

// ===== Companies =====

/// PostgreSQL implementation of CompanyRepository
pub struct PostgresCompanyRepository {
    pool: PgPool,
}

impl PostgresCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn save(&self, company: &Company) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO companies (id, name, email, phone, address, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                address = EXCLUDED.address,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.email)
        .bind(&company.phone)
        .bind(&company.address)
        .bind(company.created_at)
        .bind(company.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            conflict_on_unique(e, &format!("Company '{}' already exists", company.name))
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Company>> {
        let company = sqlx::query_as(
            "SELECT id, name, email, phone, address, created_at, updated_at FROM companies WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(company)
    }

    async fn overview(&self, id: Uuid) -> RepositoryResult<Option<CompanyOverview>> {
        let Some(company) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let departments = sqlx::query_as::<_, Department>(
            r#"
            SELECT id, company_id, branch_id, name, description, created_at, updated_at
            FROM departments
            WHERE company_id = $1
            ORDER BY name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool);

        let (branches, departments) = tokio::try_join!(self.branches(id), async {
            departments.await.map_err(RepositoryError::from)
        })?;

        Ok(Some(CompanyOverview {
            company,
            branches,
            departments,
        }))
    }

    async fn list(&self) -> RepositoryResult<Vec<Company>> {
        let companies = sqlx::query_as(
            "SELECT id, name, email, phone, address, created_at, updated_at FROM companies ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(companies)
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        delete_by_id(&self.pool, "companies", "Company", id).await
    }

    async fn add_branch(&self, branch: &Branch) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO branches (id, company_id, name, address, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(branch.id)
        .bind(branch.company_id)
        .bind(&branch.name)
        .bind(&branch.address)
        .bind(branch.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            conflict_on_unique(
                e,
                &format!("Branch '{}' already exists for this company", branch.name),
            )
        })?;

        Ok(())
    }

    async fn branches(&self, company_id: Uuid) -> RepositoryResult<Vec<Branch>> {
        let branches = sqlx::query_as(
            r#"
            SELECT id, company_id, name, address, created_at
            FROM branches
            WHERE company_id = $1
            ORDER BY name
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(branches)
    }
}

// ===== Departments =====

/// PostgreSQL implementation of DepartmentRepository
pub struct PostgresDepartmentRepository {
    pool: PgPool,
}

impl PostgresDepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentRepository for PostgresDepartmentRepository {
    async fn save(&self, department: &Department) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO departments (
                id, company_id, branch_id, name, description, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                branch_id = EXCLUDED.branch_id,
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(department.id)
        .bind(department.company_id)
        .bind(department.branch_id)
        .bind(&department.name)
        .bind(&department.description)
        .bind(department.created_at)
        .bind(department.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            conflict_on_unique(
                e,
                &format!("Department '{}' already exists for this company", department.name),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Department>> {
        let department = sqlx::query_as(
            r#"
            SELECT id, company_id, branch_id, name, description, created_at, updated_at
            FROM departments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(department)
    }

    async fn list(&self) -> RepositoryResult<Vec<Department>> {
        let departments = sqlx::query_as(
            r#"
            SELECT id, company_id, branch_id, name, description, created_at, updated_at
            FROM departments
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(departments)
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        delete_by_id(&self.pool, "departments", "Department", id).await
    }
}

// ===== Locations =====

/// PostgreSQL implementation of LocationRepository
pub struct PostgresLocationRepository {
    pool: PgPool,
}

impl PostgresLocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepository {
    async fn save(&self, location: &Location) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO locations (id, name, address, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                address = EXCLUDED.address,
                is_active = EXCLUDED.is_active,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(location.id)
        .bind(&location.name)
        .bind(&location.address)
        .bind(location.is_active)
        .bind(location.created_at)
        .bind(location.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            conflict_on_unique(e, &format!("Location '{}' already exists", location.name))
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Location>> {
        let location = sqlx::query_as(
            "SELECT id, name, address, is_active, created_at, updated_at FROM locations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(location)
    }

    async fn list(&self) -> RepositoryResult<Vec<Location>> {
        let locations = sqlx::query_as(
            "SELECT id, name, address, is_active, created_at, updated_at FROM locations ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(locations)
    }

    async fn list_active(&self) -> RepositoryResult<Vec<Location>> {
        let locations = sqlx::query_as(
            r#"
            SELECT id, name, address, is_active, created_at, updated_at
            FROM locations
            WHERE is_active
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(locations)
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        delete_by_id(&self.pool, "locations", "Location", id).await
    }
}

// ===== Lookups =====

/// PostgreSQL implementation of LookupRepository
pub struct PostgresLookupRepository {
    pool: PgPool,
}

impl PostgresLookupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LookupRepository for PostgresLookupRepository {
    async fn create(&self, kind: LookupKind, entry: &LookupEntry) -> RepositoryResult<()> {
        sqlx::query(&format!(
            "INSERT INTO {} (id, name, created_at) VALUES ($1, $2, $3)",
            kind.table()
        ))
        .bind(entry.id)
        .bind(&entry.name)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            conflict_on_unique(
                e,
                &format!("{} '{}' already exists", kind.label(), entry.name),
            )
        })?;

        Ok(())
    }

    async fn list(&self, kind: LookupKind) -> RepositoryResult<Vec<LookupEntry>> {
        let entries = sqlx::query_as(&format!(
            "SELECT id, name, created_at FROM {} ORDER BY name",
            kind.table()
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}
