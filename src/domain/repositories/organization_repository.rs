use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryResult;
use crate::domain::organization::{
    Branch, Company, CompanyOverview, Department, Location, LookupEntry, LookupKind,
};

/// Repository trait for companies and their branches
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Save a company (insert or update); a taken name yields `Conflict`
    async fn save(&self, company: &Company) -> RepositoryResult<()>;

    /// Find a company by its ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Company>>;

    /// A company with its branches and departments
    async fn overview(&self, id: Uuid) -> RepositoryResult<Option<CompanyOverview>>;

    /// All companies, by name
    async fn list(&self) -> RepositoryResult<Vec<Company>>;

    /// Delete a company and, by cascade, its branches and departments
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;

    /// Insert a branch; a name taken within the company yields `Conflict`
    async fn add_branch(&self, branch: &Branch) -> RepositoryResult<()>;

    /// Branches of one company, by name
    async fn branches(&self, company_id: Uuid) -> RepositoryResult<Vec<Branch>>;
}

/// Repository trait for departments
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Save a department (insert or update)
    async fn save(&self, department: &Department) -> RepositoryResult<()>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Department>>;

    async fn list(&self) -> RepositoryResult<Vec<Department>>;

    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}

/// Repository trait for hub locations
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Save a location (insert or update); a taken name yields `Conflict`
    async fn save(&self, location: &Location) -> RepositoryResult<()>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Location>>;

    async fn list(&self) -> RepositoryResult<Vec<Location>>;

    /// Active locations, by name
    async fn list_active(&self) -> RepositoryResult<Vec<Location>>;

    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}

/// Repository trait for the category and supplier lookup tables
#[async_trait]
pub trait LookupRepository: Send + Sync {
    async fn create(&self, kind: LookupKind, entry: &LookupEntry) -> RepositoryResult<()>;

    async fn list(&self, kind: LookupKind) -> RepositoryResult<Vec<LookupEntry>>;
}
