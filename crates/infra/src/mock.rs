//! # テスト用モック
//!
//! ユースケース・ハンドラのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! applydesk-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 文字列の並び順は Rust の `str` 比較で、PostgreSQL の照合順序とは一致しない。
//! 一意制約はグループコード・コードの重複のみ再現する。外部キーと `ON DELETE CASCADE` は再現しない。

use std::{
   cmp::Ordering,
   collections::HashMap,
   sync::{
      Arc,
      Mutex,
      atomic::{AtomicUsize, Ordering as AtomicOrdering},
   },
};

use applydesk_domain::{
   admin::{Admin, AdminFilter, AdminSortField},
   alert::{Alert, AlertFilter, AlertId, AlertSortField},
   applicant::{Applicant, ApplicantFilter, ApplicantId, ApplicantSortField},
   code::{
      Code,
      CodeFilter,
      CodeId,
      CodeSortField,
      GroupCode,
      GroupCodeFilter,
      GroupCodeId,
      GroupCodeSortField,
   },
   comment::{Comment, CommentId},
   pagination::{SortDirection, SortOrder},
   sidebar::{Sidebar, SidebarFilter, SidebarId, SidebarSortField},
};
use async_trait::async_trait;
use uuid::Uuid;

use crate::{
   error::InfraError,
   repository::{
      AlertRepository,
      ApplicantRepository,
      CodeRepository,
      CommentRepository,
      GroupCodeRepository,
      PagedRepository,
      SidebarRepository,
   },
   s3::{PresignPutRequest, S3Client},
   session::{SessionData, SessionManager},
};

/// 大文字小文字を区別しない部分一致
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
   haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// `order` の順に比較し、同値なら ID の昇順で並べてから `skip`/`take` で切り出す
fn sort_and_slice<T, F: Copy>(
   mut items: Vec<T>,
   order: &[SortOrder<F>],
   compare: impl Fn(&T, &T, F) -> Ordering,
   id: impl Fn(&T) -> Uuid,
   skip: i64,
   take: i64,
) -> Vec<T> {
   items.sort_by(|a, b| {
      order
         .iter()
         .map(|o| match o.direction {
            SortDirection::Asc => compare(a, b, o.field),
            SortDirection::Desc => compare(a, b, o.field).reverse(),
         })
         .find(|ord| ord.is_ne())
         .unwrap_or_else(|| id(a).cmp(&id(b)))
   });
   items
      .into_iter()
      .skip(usize::try_from(skip).unwrap_or(0))
      .take(usize::try_from(take).unwrap_or(0))
      .collect()
}

fn len_as_i64(len: usize) -> i64 {
   i64::try_from(len).unwrap_or(i64::MAX)
}

/// `is_target` に一致する要素を `item` で置き換える。一致しなければ `false`
fn replace_where<T: Clone>(
   items: &Mutex<Vec<T>>,
   item: &T,
   is_target: impl Fn(&T) -> bool,
) -> bool {
   let mut items = items.lock().unwrap();
   match items.iter_mut().find(|existing| is_target(existing)) {
      Some(existing) => {
         *existing = item.clone();
         true
      }
      None => false,
   }
}

/// `is_target` に一致する要素を削除する。一致しなければ `false`
fn remove_where<T>(items: &Mutex<Vec<T>>, is_target: impl Fn(&T) -> bool) -> bool {
   let mut items = items.lock().unwrap();
   let before = items.len();
   items.retain(|item| !is_target(item));
   items.len() != before
}

// ===== MockAdminRepository =====

#[derive(Clone, Default)]
pub struct MockAdminRepository {
   admins: Arc<Mutex<Vec<Admin>>>,
}

impl MockAdminRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn add(&self, admin: Admin) {
      self.admins.lock().unwrap().push(admin);
   }

   fn filtered(&self, filter: &AdminFilter) -> Vec<Admin> {
      self
         .admins
         .lock()
         .unwrap()
         .iter()
         .filter(|a| {
            filter.search.as_deref().is_none_or(|s| {
               contains_ignore_case(&a.name, s) || contains_ignore_case(&a.email, s)
            })
         })
         .filter(|a| filter.role.is_none_or(|r| a.role == r))
         .cloned()
         .collect()
   }
}

#[async_trait]
impl PagedRepository for MockAdminRepository {
   type Item = Admin;
   type Filter = AdminFilter;
   type SortField = AdminSortField;

   async fn count(&self, filter: &AdminFilter) -> Result<i64, InfraError> {
      Ok(len_as_i64(self.filtered(filter).len()))
   }

   async fn find_many(
      &self,
      filter: &AdminFilter,
      order: &[SortOrder<AdminSortField>],
      skip: i64,
      take: i64,
   ) -> Result<Vec<Admin>, InfraError> {
      Ok(sort_and_slice(
         self.filtered(filter),
         order,
         |a, b, field| match field {
            AdminSortField::Name => a.name.cmp(&b.name),
            AdminSortField::Email => a.email.cmp(&b.email),
            AdminSortField::CreatedAt => a.created_at.cmp(&b.created_at),
         },
         |a| *a.id.as_uuid(),
         skip,
         take,
      ))
   }
}

// ===== MockApplicantRepository =====

#[derive(Clone, Default)]
pub struct MockApplicantRepository {
   applicants: Arc<Mutex<Vec<Applicant>>>,
}

impl MockApplicantRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn add(&self, applicant: Applicant) {
      self.applicants.lock().unwrap().push(applicant);
   }

   fn filtered(&self, filter: &ApplicantFilter) -> Vec<Applicant> {
      self
         .applicants
         .lock()
         .unwrap()
         .iter()
         .filter(|a| {
            filter.search.as_deref().is_none_or(|s| {
               contains_ignore_case(a.name().as_str(), s)
                  || contains_ignore_case(a.email().as_str(), s)
            })
         })
         .filter(|a| filter.status.is_none_or(|s| a.status() == s))
         .filter(|a| {
            filter
               .visa_type
               .as_deref()
               .is_none_or(|v| a.visa_type().is_some_and(|vt| vt.as_str() == v))
         })
         .cloned()
         .collect()
   }
}

#[async_trait]
impl PagedRepository for MockApplicantRepository {
   type Item = Applicant;
   type Filter = ApplicantFilter;
   type SortField = ApplicantSortField;

   async fn count(&self, filter: &ApplicantFilter) -> Result<i64, InfraError> {
      Ok(len_as_i64(self.filtered(filter).len()))
   }

   async fn find_many(
      &self,
      filter: &ApplicantFilter,
      order: &[SortOrder<ApplicantSortField>],
      skip: i64,
      take: i64,
   ) -> Result<Vec<Applicant>, InfraError> {
      Ok(sort_and_slice(
         self.filtered(filter),
         order,
         |a, b, field| match field {
            ApplicantSortField::Name => a.name().as_str().cmp(b.name().as_str()),
            ApplicantSortField::Status => {
               let (a, b): (&'static str, &'static str) = (a.status().into(), b.status().into());
               a.cmp(b)
            }
            ApplicantSortField::CreatedAt => a.created_at().cmp(&b.created_at()),
            ApplicantSortField::UpdatedAt => a.updated_at().cmp(&b.updated_at()),
         },
         |a| *a.id().as_uuid(),
         skip,
         take,
      ))
   }
}

#[async_trait]
impl ApplicantRepository for MockApplicantRepository {
   async fn find_by_id(&self, id: &ApplicantId) -> Result<Option<Applicant>, InfraError> {
      Ok(self
         .applicants
         .lock()
         .unwrap()
         .iter()
         .find(|a| a.id() == id)
         .cloned())
   }

   async fn insert(&self, applicant: &Applicant) -> Result<(), InfraError> {
      self.applicants.lock().unwrap().push(applicant.clone());
      Ok(())
   }

   async fn update(&self, applicant: &Applicant) -> Result<bool, InfraError> {
      Ok(replace_where(&self.applicants, applicant, |a| {
         a.id() == applicant.id()
      }))
   }

   async fn delete(&self, id: &ApplicantId) -> Result<bool, InfraError> {
      Ok(remove_where(&self.applicants, |a| a.id() == id))
   }
}

// ===== MockGroupCodeRepository =====

#[derive(Clone, Default)]
pub struct MockGroupCodeRepository {
   group_codes: Arc<Mutex<Vec<GroupCode>>>,
}

impl MockGroupCodeRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn add(&self, group_code: GroupCode) {
      self.group_codes.lock().unwrap().push(group_code);
   }

   fn filtered(&self, filter: &GroupCodeFilter) -> Vec<GroupCode> {
      self
         .group_codes
         .lock()
         .unwrap()
         .iter()
         .filter(|g| {
            filter.search.as_deref().is_none_or(|s| {
               contains_ignore_case(&g.code, s) || contains_ignore_case(&g.name, s)
            })
         })
         .cloned()
         .collect()
   }
}

#[async_trait]
impl PagedRepository for MockGroupCodeRepository {
   type Item = GroupCode;
   type Filter = GroupCodeFilter;
   type SortField = GroupCodeSortField;

   async fn count(&self, filter: &GroupCodeFilter) -> Result<i64, InfraError> {
      Ok(len_as_i64(self.filtered(filter).len()))
   }

   async fn find_many(
      &self,
      filter: &GroupCodeFilter,
      order: &[SortOrder<GroupCodeSortField>],
      skip: i64,
      take: i64,
   ) -> Result<Vec<GroupCode>, InfraError> {
      Ok(sort_and_slice(
         self.filtered(filter),
         order,
         |a, b, field| match field {
            GroupCodeSortField::Code => a.code.cmp(&b.code),
            GroupCodeSortField::Name => a.name.cmp(&b.name),
            GroupCodeSortField::CreatedAt => a.created_at.cmp(&b.created_at),
         },
         |g| *g.id.as_uuid(),
         skip,
         take,
      ))
   }
}

#[async_trait]
impl GroupCodeRepository for MockGroupCodeRepository {
   async fn find_by_id(&self, id: &GroupCodeId) -> Result<Option<GroupCode>, InfraError> {
      Ok(self
         .group_codes
         .lock()
         .unwrap()
         .iter()
         .find(|g| &g.id == id)
         .cloned())
   }

   async fn insert(&self, group_code: &GroupCode) -> Result<(), InfraError> {
      let mut group_codes = self.group_codes.lock().unwrap();
      if group_codes.iter().any(|g| g.code == group_code.code) {
         return Err(InfraError::unique_violation("group_codes_code_key"));
      }
      group_codes.push(group_code.clone());
      Ok(())
   }

   async fn update(&self, group_code: &GroupCode) -> Result<bool, InfraError> {
      if self
         .group_codes
         .lock()
         .unwrap()
         .iter()
         .any(|g| g.id != group_code.id && g.code == group_code.code)
      {
         return Err(InfraError::unique_violation("group_codes_code_key"));
      }
      Ok(replace_where(&self.group_codes, group_code, |g| {
         g.id == group_code.id
      }))
   }

   async fn delete(&self, id: &GroupCodeId) -> Result<bool, InfraError> {
      Ok(remove_where(&self.group_codes, |g| &g.id == id))
   }
}

// ===== MockCodeRepository =====

#[derive(Clone, Default)]
pub struct MockCodeRepository {
   codes: Arc<Mutex<Vec<Code>>>,
}

impl MockCodeRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn add(&self, code: Code) {
      self.codes.lock().unwrap().push(code);
   }

   fn filtered(&self, filter: &CodeFilter) -> Vec<Code> {
      self
         .codes
         .lock()
         .unwrap()
         .iter()
         .filter(|c| {
            filter.search.as_deref().is_none_or(|s| {
               contains_ignore_case(&c.code, s) || contains_ignore_case(&c.label, s)
            })
         })
         .filter(|c| {
            filter
               .group_code_id
               .as_ref()
               .is_none_or(|g| &c.group_code_id == g)
         })
         .cloned()
         .collect()
   }
}

#[async_trait]
impl PagedRepository for MockCodeRepository {
   type Item = Code;
   type Filter = CodeFilter;
   type SortField = CodeSortField;

   async fn count(&self, filter: &CodeFilter) -> Result<i64, InfraError> {
      Ok(len_as_i64(self.filtered(filter).len()))
   }

   async fn find_many(
      &self,
      filter: &CodeFilter,
      order: &[SortOrder<CodeSortField>],
      skip: i64,
      take: i64,
   ) -> Result<Vec<Code>, InfraError> {
      Ok(sort_and_slice(
         self.filtered(filter),
         order,
         |a, b, field| match field {
            CodeSortField::Code => a.code.cmp(&b.code),
            CodeSortField::Label => a.label.cmp(&b.label),
            CodeSortField::SortOrder => a.sort_order.cmp(&b.sort_order),
            CodeSortField::CreatedAt => a.created_at.cmp(&b.created_at),
         },
         |c| *c.id.as_uuid(),
         skip,
         take,
      ))
   }
}

impl MockCodeRepository {
   fn is_duplicate(&self, code: &Code) -> bool {
      self.codes.lock().unwrap().iter().any(|c| {
         c.id != code.id && c.group_code_id == code.group_code_id && c.code == code.code
      })
   }
}

#[async_trait]
impl CodeRepository for MockCodeRepository {
   async fn find_by_id(&self, id: &CodeId) -> Result<Option<Code>, InfraError> {
      Ok(self
         .codes
         .lock()
         .unwrap()
         .iter()
         .find(|c| &c.id == id)
         .cloned())
   }

   async fn insert(&self, code: &Code) -> Result<(), InfraError> {
      if self.is_duplicate(code) {
         return Err(InfraError::unique_violation("codes_group_code_id_code_key"));
      }
      self.codes.lock().unwrap().push(code.clone());
      Ok(())
   }

   async fn update(&self, code: &Code) -> Result<bool, InfraError> {
      if self.is_duplicate(code) {
         return Err(InfraError::unique_violation("codes_group_code_id_code_key"));
      }
      Ok(replace_where(&self.codes, code, |c| c.id == code.id))
   }

   async fn delete(&self, id: &CodeId) -> Result<bool, InfraError> {
      Ok(remove_where(&self.codes, |c| &c.id == id))
   }
}

// ===== MockSidebarRepository =====

#[derive(Clone, Default)]
pub struct MockSidebarRepository {
   sidebars: Arc<Mutex<Vec<Sidebar>>>,
}

impl MockSidebarRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn add(&self, sidebar: Sidebar) {
      self.sidebars.lock().unwrap().push(sidebar);
   }

   fn filtered(&self, filter: &SidebarFilter) -> Vec<Sidebar> {
      self
         .sidebars
         .lock()
         .unwrap()
         .iter()
         .filter(|s| {
            filter.search.as_deref().is_none_or(|term| {
               contains_ignore_case(&s.label, term) || contains_ignore_case(&s.path, term)
            })
         })
         .cloned()
         .collect()
   }
}

#[async_trait]
impl PagedRepository for MockSidebarRepository {
   type Item = Sidebar;
   type Filter = SidebarFilter;
   type SortField = SidebarSortField;

   async fn count(&self, filter: &SidebarFilter) -> Result<i64, InfraError> {
      Ok(len_as_i64(self.filtered(filter).len()))
   }

   async fn find_many(
      &self,
      filter: &SidebarFilter,
      order: &[SortOrder<SidebarSortField>],
      skip: i64,
      take: i64,
   ) -> Result<Vec<Sidebar>, InfraError> {
      Ok(sort_and_slice(
         self.filtered(filter),
         order,
         |a, b, field| match field {
            SidebarSortField::Label => a.label.cmp(&b.label),
            SidebarSortField::Position => a.position.cmp(&b.position),
            SidebarSortField::CreatedAt => a.created_at.cmp(&b.created_at),
         },
         |s| *s.id.as_uuid(),
         skip,
         take,
      ))
   }
}

#[async_trait]
impl SidebarRepository for MockSidebarRepository {
   async fn find_by_id(&self, id: &SidebarId) -> Result<Option<Sidebar>, InfraError> {
      Ok(self
         .sidebars
         .lock()
         .unwrap()
         .iter()
         .find(|s| &s.id == id)
         .cloned())
   }

   async fn insert(&self, sidebar: &Sidebar) -> Result<(), InfraError> {
      self.sidebars.lock().unwrap().push(sidebar.clone());
      Ok(())
   }

   async fn update(&self, sidebar: &Sidebar) -> Result<bool, InfraError> {
      Ok(replace_where(&self.sidebars, sidebar, |s| s.id == sidebar.id))
   }

   async fn delete(&self, id: &SidebarId) -> Result<bool, InfraError> {
      Ok(remove_where(&self.sidebars, |s| &s.id == id))
   }
}

// ===== MockAlertRepository =====

#[derive(Clone, Default)]
pub struct MockAlertRepository {
   alerts: Arc<Mutex<Vec<Alert>>>,
}

impl MockAlertRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn add(&self, alert: Alert) {
      self.alerts.lock().unwrap().push(alert);
   }

   fn filtered(&self, filter: &AlertFilter) -> Vec<Alert> {
      self
         .alerts
         .lock()
         .unwrap()
         .iter()
         .filter(|a| {
            filter.search.as_deref().is_none_or(|s| {
               contains_ignore_case(a.title().as_str(), s)
                  || contains_ignore_case(a.message().as_str(), s)
            })
         })
         .filter(|a| filter.level.is_none_or(|l| a.level() == l))
         .filter(|a| filter.is_read.is_none_or(|r| a.is_read() == r))
         .filter(|a| {
            filter
               .applicant_id
               .as_ref()
               .is_none_or(|id| a.applicant_id() == Some(id))
         })
         .cloned()
         .collect()
   }
}

#[async_trait]
impl PagedRepository for MockAlertRepository {
   type Item = Alert;
   type Filter = AlertFilter;
   type SortField = AlertSortField;

   async fn count(&self, filter: &AlertFilter) -> Result<i64, InfraError> {
      Ok(len_as_i64(self.filtered(filter).len()))
   }

   async fn find_many(
      &self,
      filter: &AlertFilter,
      order: &[SortOrder<AlertSortField>],
      skip: i64,
      take: i64,
   ) -> Result<Vec<Alert>, InfraError> {
      Ok(sort_and_slice(
         self.filtered(filter),
         order,
         |a, b, field| match field {
            AlertSortField::Title => a.title().as_str().cmp(b.title().as_str()),
            AlertSortField::Level => a.level().cmp(&b.level()),
            AlertSortField::CreatedAt => a.created_at().cmp(&b.created_at()),
         },
         |a| *a.id().as_uuid(),
         skip,
         take,
      ))
   }
}

#[async_trait]
impl AlertRepository for MockAlertRepository {
   async fn find_by_id(&self, id: &AlertId) -> Result<Option<Alert>, InfraError> {
      Ok(self
         .alerts
         .lock()
         .unwrap()
         .iter()
         .find(|a| a.id() == id)
         .cloned())
   }

   async fn insert(&self, alert: &Alert) -> Result<(), InfraError> {
      self.alerts.lock().unwrap().push(alert.clone());
      Ok(())
   }

   async fn update(&self, alert: &Alert) -> Result<bool, InfraError> {
      Ok(replace_where(&self.alerts, alert, |a| a.id() == alert.id()))
   }

   async fn delete(&self, id: &AlertId) -> Result<bool, InfraError> {
      Ok(remove_where(&self.alerts, |a| a.id() == id))
   }
}

// ===== MockCommentRepository =====

/// コメントのモック
///
/// 件数取得（`count_older_than` / `count_excluding`）の呼び出し回数を記録する。
#[derive(Clone, Default)]
pub struct MockCommentRepository {
   comments:    Arc<Mutex<Vec<Comment>>>,
   count_calls: Arc<AtomicUsize>,
}

impl MockCommentRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn add(&self, comment: Comment) {
      self.comments.lock().unwrap().push(comment);
   }

   /// 件数取得が呼ばれた回数
   pub fn count_calls(&self) -> usize {
      self.count_calls.load(AtomicOrdering::SeqCst)
   }

   fn thread(&self, applicant_id: &ApplicantId) -> Vec<Comment> {
      let mut thread: Vec<Comment> = self
         .comments
         .lock()
         .unwrap()
         .iter()
         .filter(|c| c.applicant_id() == applicant_id)
         .cloned()
         .collect();
      thread.sort_by(Comment::cmp_newest_first);
      thread
   }
}

#[async_trait]
impl CommentRepository for MockCommentRepository {
   async fn insert(&self, comment: &Comment) -> Result<(), InfraError> {
      self.comments.lock().unwrap().push(comment.clone());
      Ok(())
   }

   async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, InfraError> {
      Ok(self
         .comments
         .lock()
         .unwrap()
         .iter()
         .find(|c| c.id() == id)
         .cloned())
   }

   async fn find_page(
      &self,
      applicant_id: &ApplicantId,
      after: Option<&Comment>,
      take: i64,
   ) -> Result<Vec<Comment>, InfraError> {
      Ok(self
         .thread(applicant_id)
         .into_iter()
         .filter(|c| after.is_none_or(|cursor| c.is_older_than(cursor)))
         .take(usize::try_from(take).unwrap_or(0))
         .collect())
   }

   async fn count_older_than(&self, comment: &Comment) -> Result<i64, InfraError> {
      self.count_calls.fetch_add(1, AtomicOrdering::SeqCst);
      let count = self
         .thread(comment.applicant_id())
         .iter()
         .filter(|c| c.is_older_than(comment))
         .count();
      Ok(len_as_i64(count))
   }

   async fn count_excluding(
      &self,
      applicant_id: &ApplicantId,
      ids: &[CommentId],
   ) -> Result<i64, InfraError> {
      self.count_calls.fetch_add(1, AtomicOrdering::SeqCst);
      let count = self
         .thread(applicant_id)
         .iter()
         .filter(|c| !ids.contains(c.id()))
         .count();
      Ok(len_as_i64(count))
   }
}

// ===== MockSessionManager =====

#[derive(Clone, Default)]
pub struct MockSessionManager {
   sessions: Arc<Mutex<HashMap<String, SessionData>>>,
}

impl MockSessionManager {
   pub fn new() -> Self {
      Self::default()
   }
}

#[async_trait]
impl SessionManager for MockSessionManager {
   async fn create(&self, data: &SessionData) -> Result<String, InfraError> {
      let session_id = Uuid::new_v4().to_string();
      self
         .sessions
         .lock()
         .unwrap()
         .insert(session_id.clone(), data.clone());
      Ok(session_id)
   }

   async fn get(&self, session_id: &str) -> Result<Option<SessionData>, InfraError> {
      Ok(self.sessions.lock().unwrap().get(session_id).cloned())
   }

   async fn delete(&self, session_id: &str) -> Result<(), InfraError> {
      self.sessions.lock().unwrap().remove(session_id);
      Ok(())
   }
}

// ===== MockS3Client =====

/// 発行した URL にキーと有効期限を埋め込むモック
#[derive(Clone, Default)]
pub struct MockS3Client;

impl MockS3Client {
   pub fn new() -> Self {
      Self
   }
}

#[async_trait]
impl S3Client for MockS3Client {
   async fn presign_put(&self, request: PresignPutRequest<'_>) -> Result<String, InfraError> {
      Ok(format!(
         "https://mock-s3.example.com/{}?X-Amz-Expires={}",
         request.object_key,
         request.expires_in.as_secs()
      ))
   }
}

#[cfg(test)]
mod tests {
   use applydesk_domain::admin::{AdminId, AdminRole};
   use chrono::{DateTime, Utc};
   use pretty_assertions::assert_eq;

   use super::*;

   fn admin(name: &str, role: AdminRole, created_at: DateTime<Utc>) -> Admin {
      Admin {
         id: AdminId::new(),
         name: name.to_string(),
         email: format!("{name}@example.com"),
         role,
         created_at,
         updated_at: created_at,
      }
   }

   #[tokio::test]
   async fn test_モックは絞り込みと並び替えを適用する() {
      let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
      let sut = MockAdminRepository::new();
      sut.add(admin("suzuki", AdminRole::Staff, now));
      sut.add(admin("sato", AdminRole::Staff, now));
      sut.add(admin("tanaka", AdminRole::Admin, now));

      let filter = AdminFilter {
         search: None,
         role:   Some(AdminRole::Staff),
      };
      let result = sut
         .find_many(&filter, &[SortOrder::asc(AdminSortField::Name)], 0, 10)
         .await
         .unwrap();

      let names: Vec<&str> = result.iter().map(|a| a.name.as_str()).collect();
      assert_eq!(names, vec!["sato", "suzuki"]);
      assert_eq!(sut.count(&filter).await.unwrap(), 2);
   }

   #[tokio::test]
   async fn test_モックはグループ内のコード重複を拒否する() {
      let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
      let group_code_id = GroupCodeId::new();
      let code = |value: &str| Code {
         id:            CodeId::new(),
         group_code_id: group_code_id.clone(),
         code:          value.to_string(),
         label:         value.to_string(),
         sort_order:    0,
         created_at:    now,
         updated_at:    now,
      };
      let sut = MockCodeRepository::new();
      sut.insert(&code("ssw")).await.unwrap();

      let duplicate = sut.insert(&code("ssw")).await.unwrap_err();
      let other_group = Code {
         group_code_id: GroupCodeId::new(),
         ..code("ssw")
      };

      assert!(duplicate.is_unique_violation());
      assert!(sut.insert(&other_group).await.is_ok());
      assert!(sut.delete(&other_group.id).await.unwrap());
      assert!(!sut.delete(&other_group.id).await.unwrap());
   }
}
