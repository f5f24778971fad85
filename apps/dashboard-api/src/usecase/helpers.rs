//! ユースケース層の共通ヘルパー

use applydesk_infra::InfraError;

use crate::error::CoreError;

/// リポジトリの `Result<Option<T>, InfraError>` を `Result<T, CoreError>` に変換する
///
/// ```ignore
/// let applicant = self.applicant_repository.find_by_id(&id).await
///     .or_not_found("求職者", &id)?;
/// ```
pub(crate) trait FindResultExt<T> {
   /// `None` の場合は `CoreError::NotFound`、`InfraError` はそのまま `CoreError::Database`
   fn or_not_found(self, entity_name: &str, id: &dyn std::fmt::Display) -> Result<T, CoreError>;
}

impl<T> FindResultExt<T> for Result<Option<T>, InfraError> {
   fn or_not_found(self, entity_name: &str, id: &dyn std::fmt::Display) -> Result<T, CoreError> {
      self?.ok_or_else(|| CoreError::NotFound(format!("{entity_name}が見つかりません: {id}")))
   }
}

/// 書き込み系の `Result<T, InfraError>` の制約違反をクライアント起因のエラーに変換する
pub(crate) trait WriteResultExt<T> {
   /// 一意制約違反を `CoreError::Conflict` にする
   fn or_conflict(self, detail: &str) -> Result<T, CoreError>;

   /// 外部キー制約違反（参照先の不在）を `CoreError::BadRequest` にする
   fn or_missing_reference(self, detail: &str) -> Result<T, CoreError>;
}

impl<T> WriteResultExt<T> for Result<T, InfraError> {
   fn or_conflict(self, detail: &str) -> Result<T, CoreError> {
      self.map_err(|e| {
         if e.is_unique_violation() {
            CoreError::Conflict(detail.to_string())
         } else {
            e.into()
         }
      })
   }

   fn or_missing_reference(self, detail: &str) -> Result<T, CoreError> {
      self.map_err(|e| {
         if e.is_foreign_key_violation() {
            CoreError::BadRequest(detail.to_string())
         } else {
            e.into()
         }
      })
   }
}

/// 更新・削除の結果（対象行の有無）を `Result<(), CoreError>` に変換する
pub(crate) fn found_or_not_found(
   found: bool,
   entity_name: &str,
   id: &dyn std::fmt::Display,
) -> Result<(), CoreError> {
   if found {
      Ok(())
   } else {
      Err(CoreError::NotFound(format!("{entity_name}が見つかりません: {id}")))
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_or_not_found_ok_someは値を返す() {
      let result: Result<Option<i32>, InfraError> = Ok(Some(42));

      assert_eq!(result.or_not_found("テスト", &1).unwrap(), 42);
   }

   #[test]
   fn test_or_not_found_ok_noneはnot_foundエラー() {
      let result: Result<Option<i32>, InfraError> = Ok(None);

      let err = result.or_not_found("求職者", &"abc").unwrap_err();

      assert!(matches!(err, CoreError::NotFound(msg) if msg == "求職者が見つかりません: abc"));
   }

   #[test]
   fn test_or_not_found_errはdatabaseエラー() {
      let result: Result<Option<i32>, InfraError> = Err(InfraError::unexpected("boom"));

      let err = result.or_not_found("求職者", &"abc").unwrap_err();

      assert!(matches!(err, CoreError::Database(_)));
   }

   #[test]
   fn test_一意制約違反はconflict() {
      let result: Result<(), InfraError> = Err(InfraError::unique_violation("codes_key"));

      let err = result.or_conflict("コードが重複しています").unwrap_err();

      assert!(matches!(err, CoreError::Conflict(msg) if msg == "コードが重複しています"));
   }

   #[test]
   fn test_外部キー違反はbad_request() {
      let result: Result<(), InfraError> = Err(InfraError::foreign_key_violation("fk"));

      let err = result.or_missing_reference("求職者が存在しません").unwrap_err();

      assert!(matches!(err, CoreError::BadRequest(_)));
   }

   #[test]
   fn test_制約違反以外はdatabaseエラーのまま() {
      let result: Result<(), InfraError> = Err(InfraError::unexpected("boom"));

      assert!(matches!(result.or_conflict("x"), Err(CoreError::Database(_))));
   }

   #[test]
   fn test_対象行がなければnot_found() {
      assert!(found_or_not_found(true, "アラート", &"a").is_ok());
      assert!(matches!(
         found_or_not_found(false, "アラート", &"a"),
         Err(CoreError::NotFound(msg)) if msg == "アラートが見つかりません: a"
      ));
   }
}
