use crate::db::{DbConnection, DbPool};
use crate::domain::{
    buyer_group::{BuyerGroupMember, NewBuyerGroupMember},
    company::{Company, CompanyPatch, NewCompany},
    email_message::{EmailMessage, NewEmailMessage},
    lead::{Lead, NewLead},
    person::{NewPerson, Person, PersonPatch},
    prospect::{NewProspect, Prospect},
    user::{NewUser, User},
    workspace::{NewWorkspace, Workspace},
};
use crate::repository::errors::RepositoryResult;

pub mod buyer_group;
pub mod company;
pub mod email_message;
pub mod errors;
pub mod lead;
pub mod person;
pub mod prospect;
pub mod user;
pub mod workspace;

/// Diesel-backed implementation of every repository trait in this module.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone)]
pub struct CompanyListQuery {
    pub workspace_id: i32,
    /// Restrict to companies with no industry yet (enrichment candidates).
    pub missing_industry: bool,
    pub include_deleted: bool,
    pub pagination: Option<Pagination>,
}

impl CompanyListQuery {
    pub fn new(workspace_id: i32) -> Self {
        Self {
            workspace_id,
            missing_industry: false,
            include_deleted: false,
            pagination: None,
        }
    }

    pub fn missing_industry(mut self) -> Self {
        self.missing_industry = true;
        self
    }

    pub fn include_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct PersonListQuery {
    pub workspace_id: i32,
    pub company_id: Option<i32>,
    /// Restrict to people with no email yet (enrichment candidates).
    pub missing_email: bool,
    /// Restrict to people that have a job title (classification candidates).
    pub with_title: bool,
    pub include_deleted: bool,
    pub pagination: Option<Pagination>,
}

impl PersonListQuery {
    pub fn new(workspace_id: i32) -> Self {
        Self {
            workspace_id,
            company_id: None,
            missing_email: false,
            with_title: false,
            include_deleted: false,
            pagination: None,
        }
    }

    pub fn company(mut self, company_id: i32) -> Self {
        self.company_id = Some(company_id);
        self
    }

    pub fn missing_email(mut self) -> Self {
        self.missing_email = true;
        self
    }

    pub fn with_title(mut self) -> Self {
        self.with_title = true;
        self
    }

    pub fn include_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct UserListQuery {
    pub workspace_id: i32,
    /// Restrict to users never invited.
    pub uninvited_only: bool,
}

impl UserListQuery {
    pub fn new(workspace_id: i32) -> Self {
        Self {
            workspace_id,
            uninvited_only: false,
        }
    }

    pub fn uninvited_only(mut self) -> Self {
        self.uninvited_only = true;
        self
    }
}

pub trait WorkspaceReader {
    fn get_workspace_by_slug(&self, slug: &str) -> RepositoryResult<Option<Workspace>>;
    fn list_workspaces(&self) -> RepositoryResult<Vec<Workspace>>;
}

pub trait WorkspaceWriter {
    fn create_workspace(&self, new_workspace: &NewWorkspace) -> RepositoryResult<Workspace>;
}

pub trait UserReader {
    fn get_user_by_email(&self, workspace_id: i32, email: &str) -> RepositoryResult<Option<User>>;
    fn list_users(&self, query: UserListQuery) -> RepositoryResult<Vec<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn mark_user_invited(&self, user_id: i32) -> RepositoryResult<()>;
}

pub trait CompanyReader {
    fn get_company_by_id(&self, id: i32) -> RepositoryResult<Option<Company>>;
    fn find_company_by_domain(
        &self,
        workspace_id: i32,
        domain: &str,
    ) -> RepositoryResult<Option<Company>>;
    fn find_company_by_name(
        &self,
        workspace_id: i32,
        name: &str,
    ) -> RepositoryResult<Option<Company>>;
    fn list_companies(&self, query: CompanyListQuery) -> RepositoryResult<(usize, Vec<Company>)>;
}

pub trait CompanyWriter {
    fn create_company(&self, new_company: &NewCompany) -> RepositoryResult<Company>;
    fn patch_company(&self, company_id: i32, patch: &CompanyPatch) -> RepositoryResult<Company>;
    /// Repoints every reference from `drop_ids` onto `keep_id`, applies the
    /// fill patch to the keeper and soft-deletes the rest, atomically.
    fn merge_companies(
        &self,
        keep_id: i32,
        drop_ids: &[i32],
        fill: &CompanyPatch,
    ) -> RepositoryResult<usize>;
}

pub trait PersonReader {
    fn get_person_by_id(&self, id: i32) -> RepositoryResult<Option<Person>>;
    fn find_person_by_email(
        &self,
        workspace_id: i32,
        email: &str,
    ) -> RepositoryResult<Option<Person>>;
    fn find_person_by_name_and_company(
        &self,
        workspace_id: i32,
        name: &str,
        company_id: Option<i32>,
    ) -> RepositoryResult<Option<Person>>;
    fn list_people(&self, query: PersonListQuery) -> RepositoryResult<(usize, Vec<Person>)>;
}

pub trait PersonWriter {
    fn create_person(&self, new_person: &NewPerson) -> RepositoryResult<Person>;
    fn patch_person(&self, person_id: i32, patch: &PersonPatch) -> RepositoryResult<Person>;
    /// Repoints leads, prospects, buyer-group rows and email messages from
    /// `drop_ids` onto `keep_id`, applies the fill patch to the keeper and
    /// soft-deletes the rest, atomically.
    fn merge_people(
        &self,
        keep_id: i32,
        drop_ids: &[i32],
        fill: &PersonPatch,
    ) -> RepositoryResult<usize>;
}

pub trait LeadReader {
    fn find_lead_by_person(&self, person_id: i32) -> RepositoryResult<Option<Lead>>;
}

pub trait LeadWriter {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
}

pub trait ProspectReader {
    fn find_prospect_by_person(&self, person_id: i32) -> RepositoryResult<Option<Prospect>>;
}

pub trait ProspectWriter {
    fn create_prospect(&self, new_prospect: &NewProspect) -> RepositoryResult<Prospect>;
}

pub trait BuyerGroupReader {
    fn list_buyer_group_members(
        &self,
        company_id: i32,
    ) -> RepositoryResult<Vec<BuyerGroupMember>>;
}

pub trait BuyerGroupWriter {
    /// Inserts or updates the membership row for (company, person).
    fn upsert_buyer_group_member(
        &self,
        member: &NewBuyerGroupMember,
    ) -> RepositoryResult<BuyerGroupMember>;
}

pub trait EmailMessageReader {
    fn list_email_messages(&self, workspace_id: i32) -> RepositoryResult<Vec<EmailMessage>>;
}

pub trait EmailMessageWriter {
    fn create_email_message(&self, message: &NewEmailMessage) -> RepositoryResult<EmailMessage>;
    fn mark_email_sent(&self, message_id: i32) -> RepositoryResult<()>;
    fn mark_email_failed(&self, message_id: i32) -> RepositoryResult<()>;
}
