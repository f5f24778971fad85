//! # 時刻の取得
//!
//! エンティティの作成日時はユースケースが [`Clock`] から取得する。
//! テストでは [`FixedClock`] を注入し、作成日時を決定的にする。

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;
}

/// システム時刻
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 明示的に進めない限り同じ時刻を返す時計
///
/// 同じ時計を共有するユースケースが続けて投稿する場面を再現するため、
/// [`advance`](FixedClock::advance) で時刻を進められる。
pub struct FixedClock {
   now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self {
         now: Mutex::new(now),
      }
   }

   /// 時刻を `by` だけ進める
   pub fn advance(&self, by: Duration) {
      let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
      *now += by;
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      *self.now.lock().unwrap_or_else(PoisonError::into_inner)
   }
}
