//! # パスパラメータの ID 解析

use uuid::Uuid;

use crate::error::CoreError;

/// パスパラメータを UUID ベースの ID に変換する
///
/// UUID でなければ 400 を返す。`label` はエラーメッセージに使う（例: `求職者`）。
pub(crate) fn parse_path_id<T>(
   raw: &str,
   label: &str,
   from_uuid: fn(Uuid) -> T,
) -> Result<T, CoreError> {
   Uuid::parse_str(raw)
      .map(from_uuid)
      .map_err(|_| CoreError::BadRequest(format!("{label} ID の形式が不正です: {raw}")))
}
