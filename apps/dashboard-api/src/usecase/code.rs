//! # コードマスタユースケース
//!
//! グループコードとコードの一覧・登録・更新・削除。
//! コード値の重複は 409、存在しないグループコードへの紐づけは 400 を返す。

use std::sync::Arc;

use applydesk_domain::{
   clock::Clock,
   code::{
      Code,
      CodeDraft,
      CodeFilter,
      CodeId,
      CodeKey,
      CodeLabel,
      GroupCode,
      GroupCodeDraft,
      GroupCodeFilter,
      GroupCodeId,
      GroupCodeName,
   },
   pagination::{PageRequest, SortKey},
};
use applydesk_infra::{
   InfraError,
   repository::{CodeRepository, GroupCodeRepository},
};
use applydesk_shared::PaginatedResponse;

use super::{
   helpers::{FindResultExt, WriteResultExt, found_or_not_found},
   pagination::paginate,
};
use crate::error::CoreError;

/// グループコード登録・更新の入力（未検証）
pub struct GroupCodeInput {
   pub code: String,
   pub name: String,
}

impl GroupCodeInput {
   fn validate(self) -> Result<GroupCodeDraft, CoreError> {
      Ok(GroupCodeDraft {
         code: CodeKey::new(self.code)?,
         name: GroupCodeName::new(self.name)?,
      })
   }
}

/// コード登録・更新の入力（未検証）
pub struct CodeInput {
   pub group_code_id: GroupCodeId,
   pub code:          String,
   pub label:         String,
   pub sort_order:    i32,
}

impl CodeInput {
   fn validate(self) -> Result<CodeDraft, CoreError> {
      Ok(CodeDraft {
         group_code_id: self.group_code_id,
         code:          CodeKey::new(self.code)?,
         label:         CodeLabel::new(self.label)?,
         sort_order:    self.sort_order,
      })
   }
}

/// コードマスタユースケース
pub struct CodeUseCaseImpl {
   group_codes: Arc<dyn GroupCodeRepository>,
   codes:       Arc<dyn CodeRepository>,
   clock:       Arc<dyn Clock>,
}

impl CodeUseCaseImpl {
   pub fn new(
      group_codes: Arc<dyn GroupCodeRepository>,
      codes: Arc<dyn CodeRepository>,
      clock: Arc<dyn Clock>,
   ) -> Self {
      Self {
         group_codes,
         codes,
         clock,
      }
   }

   // ===== グループコード =====

   pub async fn list_group_codes(
      &self,
      filter: &GroupCodeFilter,
      request: PageRequest,
      sort: &[SortKey],
   ) -> Result<PaginatedResponse<GroupCode>, CoreError> {
      paginate(self.group_codes.as_ref(), filter, request, sort).await
   }

   #[tracing::instrument(skip_all)]
   pub async fn create_group_code(&self, input: GroupCodeInput) -> Result<GroupCode, CoreError> {
      let draft = input.validate()?;
      let group_code = GroupCode::new(GroupCodeId::new(), draft, self.clock.now());

      self
         .group_codes
         .insert(&group_code)
         .await
         .or_conflict(&duplicate_group_code(&group_code.code))?;

      tracing::info!(
         group_code_id = %group_code.id,
         code = %group_code.code,
         "グループコードを登録しました"
      );
      Ok(group_code)
   }

   #[tracing::instrument(skip_all, fields(%id))]
   pub async fn update_group_code(
      &self,
      id: &GroupCodeId,
      input: GroupCodeInput,
   ) -> Result<GroupCode, CoreError> {
      let draft = input.validate()?;
      let updated = self
         .group_codes
         .find_by_id(id)
         .await
         .or_not_found("グループコード", id)?
         .apply(draft, self.clock.now());

      let found = self
         .group_codes
         .update(&updated)
         .await
         .or_conflict(&duplicate_group_code(&updated.code))?;
      found_or_not_found(found, "グループコード", id)?;

      Ok(updated)
   }

   /// グループコードを削除する（配下のコードも削除される）
   #[tracing::instrument(skip_all, fields(%id))]
   pub async fn delete_group_code(&self, id: &GroupCodeId) -> Result<(), CoreError> {
      let found = self.group_codes.delete(id).await?;
      found_or_not_found(found, "グループコード", id)?;

      tracing::info!("グループコードを削除しました");
      Ok(())
   }

   // ===== コード =====

   pub async fn list_codes(
      &self,
      filter: &CodeFilter,
      request: PageRequest,
      sort: &[SortKey],
   ) -> Result<PaginatedResponse<Code>, CoreError> {
      paginate(self.codes.as_ref(), filter, request, sort).await
   }

   #[tracing::instrument(skip_all)]
   pub async fn create_code(&self, input: CodeInput) -> Result<Code, CoreError> {
      let draft = input.validate()?;
      self.ensure_group_code(&draft.group_code_id).await?;
      let code = Code::new(CodeId::new(), draft, self.clock.now());

      self
         .codes
         .insert(&code)
         .await
         .map_err(|e| code_write_error(e, &code))?;

      tracing::info!(code_id = %code.id, code = %code.code, "コードを登録しました");
      Ok(code)
   }

   #[tracing::instrument(skip_all, fields(%id))]
   pub async fn update_code(&self, id: &CodeId, input: CodeInput) -> Result<Code, CoreError> {
      let draft = input.validate()?;
      let current = self.codes.find_by_id(id).await.or_not_found("コード", id)?;
      self.ensure_group_code(&draft.group_code_id).await?;
      let updated = current.apply(draft, self.clock.now());

      let found = self
         .codes
         .update(&updated)
         .await
         .map_err(|e| code_write_error(e, &updated))?;
      found_or_not_found(found, "コード", id)?;

      Ok(updated)
   }

   #[tracing::instrument(skip_all, fields(%id))]
   pub async fn delete_code(&self, id: &CodeId) -> Result<(), CoreError> {
      let found = self.codes.delete(id).await?;
      found_or_not_found(found, "コード", id)
   }

   /// 紐づけ先のグループコードが存在しなければ 400
   async fn ensure_group_code(&self, id: &GroupCodeId) -> Result<(), CoreError> {
      match self.group_codes.find_by_id(id).await? {
         Some(_) => Ok(()),
         None => Err(CoreError::BadRequest(format!(
            "グループコードが存在しません: {id}"
         ))),
      }
   }
}

fn duplicate_group_code(code: &str) -> String {
   format!("グループコードが重複しています: {code}")
}

/// コード書き込み時の制約違反を変換する
///
/// 外部キー違反は存在確認の後にグループコードが削除された場合に起きる。
fn code_write_error(error: InfraError, code: &Code) -> CoreError {
   if error.is_unique_violation() {
      CoreError::Conflict(format!(
         "グループ内でコードが重複しています: {}",
         code.code
      ))
   } else if error.is_foreign_key_violation() {
      CoreError::BadRequest(format!(
         "グループコードが存在しません: {}",
         code.group_code_id
      ))
   } else {
      error.into()
   }
}
