// Organisational structure: companies, their branches and departments,
// hub locations and the category/supplier lookups used by assets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{optional_text, require_text, DomainError, DomainResult};
use super::user::value_objects::Email;

// ===== Companies =====

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyDetails {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn new(details: CompanyDetails) -> DomainResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: require_text(&details.name, "Company name")?,
            email: Email::optional(details.email)?,
            phone: optional_text(details.phone),
            address: optional_text(details.address),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, changes: CompanyChanges) -> DomainResult<()> {
        if let Some(name) = changes.name {
            self.name = require_text(&name, "Company name")?;
        }
        if changes.email.is_some() {
            self.email = Email::optional(changes.email)?;
        }
        if changes.phone.is_some() {
            self.phone = optional_text(changes.phone);
        }
        if changes.address.is_some() {
            self.address = optional_text(changes.address);
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// A company together with its branches and departments
#[derive(Debug, Clone, Serialize)]
pub struct CompanyOverview {
    #[serde(flatten)]
    pub company: Company,
    pub branches: Vec<Branch>,
    pub departments: Vec<Department>,
}

// ===== Branches =====

#[derive(Debug, Clone, Deserialize)]
pub struct BranchDetails {
    pub name: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Branch {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Branch {
    pub fn new(company_id: Uuid, details: BranchDetails) -> DomainResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            company_id,
            name: require_text(&details.name, "Branch name")?,
            address: optional_text(details.address),
            created_at: Utc::now(),
        })
    }
}

// ===== Departments =====

#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentDetails {
    pub company_id: Uuid,
    pub branch_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentChanges {
    pub branch_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Department {
    pub id: Uuid,
    pub company_id: Uuid,
    pub branch_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Department {
    pub fn new(details: DepartmentDetails) -> DomainResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            company_id: details.company_id,
            branch_id: details.branch_id,
            name: require_text(&details.name, "Department name")?,
            description: optional_text(details.description),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, changes: DepartmentChanges) -> DomainResult<()> {
        if let Some(name) = changes.name {
            self.name = require_text(&name, "Department name")?;
        }
        if changes.description.is_some() {
            self.description = optional_text(changes.description);
        }
        self.branch_id = changes.branch_id.or(self.branch_id);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// The branch, when set, must be one of `company_branches`
    pub fn check_branch(&self, company_branches: &[Branch]) -> DomainResult<()> {
        match self.branch_id {
            Some(branch_id)
                if !company_branches
                    .iter()
                    .any(|b| b.id == branch_id && b.company_id == self.company_id) =>
            {
                Err(DomainError::validation(
                    "Branch does not belong to the department's company",
                ))
            }
            _ => Ok(()),
        }
    }
}

// ===== Locations =====

#[derive(Debug, Clone, Deserialize)]
pub struct LocationDetails {
    pub name: String,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationChanges {
    pub name: Option<String>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    pub fn new(details: LocationDetails) -> DomainResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: require_text(&details.name, "Location name")?,
            address: optional_text(details.address),
            is_active: details.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update, returning the new name when it changed
    pub fn apply(&mut self, changes: LocationChanges) -> DomainResult<Option<String>> {
        let mut renamed = None;
        if let Some(name) = changes.name {
            let name = require_text(&name, "Location name")?;
            if name != self.name {
                self.name = name.clone();
                renamed = Some(name);
            }
        }
        if changes.address.is_some() {
            self.address = optional_text(changes.address);
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
        Ok(renamed)
    }
}

// ===== Lookups =====

/// Simple named reference tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Category,
    Supplier,
}

impl LookupKind {
    pub fn table(&self) -> &'static str {
        match self {
            LookupKind::Category => "categories",
            LookupKind::Supplier => "suppliers",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LookupKind::Category => "Category",
            LookupKind::Supplier => "Supplier",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookupDetails {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LookupEntry {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl LookupEntry {
    pub fn new(kind: LookupKind, details: LookupDetails) -> DomainResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: require_text(&details.name, &format!("{} name", kind.label()))?,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_requires_name() {
        let result = Company::new(CompanyDetails::default());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn company_rejects_bad_email() {
        let result = Company::new(CompanyDetails {
            name: "Hub Ltd".into(),
            email: Some("nope".into()),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn company_update() {
        let mut company = Company::new(CompanyDetails {
            name: "Hub Ltd".into(),
            ..Default::default()
        })
        .unwrap();
        company
            .apply(CompanyChanges {
                name: Some(" Hub Holdings ".into()),
                phone: Some("+234 800".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(company.name, "Hub Holdings");
        assert_eq!(company.phone.as_deref(), Some("+234 800"));
    }

    #[test]
    fn branch_belongs_to_company() {
        let company_id = Uuid::new_v4();
        let branch = Branch::new(
            company_id,
            BranchDetails {
                name: "Yaba".into(),
                address: None,
            },
        )
        .unwrap();
        assert_eq!(branch.company_id, company_id);
    }

    #[test]
    fn department_branch_must_share_company() {
        let company_id = Uuid::new_v4();
        let own = Branch::new(
            company_id,
            BranchDetails {
                name: "Yaba".into(),
                address: None,
            },
        )
        .unwrap();
        let foreign = Branch::new(
            Uuid::new_v4(),
            BranchDetails {
                name: "Lekki".into(),
                address: None,
            },
        )
        .unwrap();
        let department = |branch_id| {
            Department::new(DepartmentDetails {
                company_id,
                branch_id,
                name: "Facilities".into(),
                description: None,
            })
            .unwrap()
        };
        let branches = [own.clone()];

        assert!(department(None).check_branch(&branches).is_ok());
        assert!(department(Some(own.id)).check_branch(&branches).is_ok());
        assert!(matches!(
            department(Some(foreign.id)).check_branch(&branches),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn department_update_keeps_branch_when_absent() {
        let branch_id = Uuid::new_v4();
        let mut department = Department::new(DepartmentDetails {
            company_id: Uuid::new_v4(),
            branch_id: Some(branch_id),
            name: "Facilities".into(),
            description: None,
        })
        .unwrap();
        department
            .apply(DepartmentChanges {
                description: Some("Keeps the lights on".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(department.branch_id, Some(branch_id));
        assert_eq!(department.description.as_deref(), Some("Keeps the lights on"));
    }

    #[test]
    fn location_defaults_active() {
        let location = Location::new(LocationDetails {
            name: "Floor 2".into(),
            address: None,
            is_active: None,
        })
        .unwrap();
        assert!(location.is_active);
    }

    #[test]
    fn location_rename_is_reported() {
        let mut location = Location::new(LocationDetails {
            name: "Floor 2".into(),
            address: None,
            is_active: None,
        })
        .unwrap();

        let same = location
            .apply(LocationChanges {
                name: Some("Floor 2".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(same, None);

        let renamed = location
            .apply(LocationChanges {
                name: Some("Rooftop".into()),
                is_active: Some(false),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(renamed.as_deref(), Some("Rooftop"));
        assert!(!location.is_active);
    }

    #[test]
    fn lookup_error_names_kind() {
        let err = LookupEntry::new(LookupKind::Supplier, LookupDetails { name: "".into() })
            .unwrap_err();
        assert_eq!(err.to_string(), "Supplier name cannot be empty");
    }
}
