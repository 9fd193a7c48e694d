//! 时间工具函数
//!
//! 持久化统一使用 `i64` Unix millis；预约窗口按服务器本地时间判断。

use chrono::{Local, NaiveTime, Utc};

/// Current time as Unix millis
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current local wall-clock time
pub fn local_time() -> NaiveTime {
    Local::now().time()
}
