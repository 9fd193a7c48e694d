//! 类型转换模块
//!
//! 将数据库模型 (db::models) 转换为 API 响应模型 (shared::models)

use crate::db::models as db;
use shared::models as api;

// ============ User ============

impl From<db::User> for api::UserInfo {
    fn from(u: db::User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name,
            email: u.email,
            role: u.role,
            university_id: u.university_id,
            is_active: u.is_active,
        }
    }
}

impl From<db::User> for api::AdminSummary {
    fn from(u: db::User) -> Self {
        api::UserInfo::from(u).into()
    }
}

// ============ Zone ============

impl From<db::Zone> for api::Zone {
    fn from(z: db::Zone) -> Self {
        Self {
            id: z.id.to_string(),
            name: z.name,
            description: z.description,
            is_deleted: z.is_deleted,
            created_at: z.created_at,
            updated_at: z.updated_at,
        }
    }
}

// ============ Slot ============

impl From<db::Slot> for api::Slot {
    fn from(s: db::Slot) -> Self {
        Self {
            id: s.id.to_string(),
            number: s.number,
            zone: s.zone.to_string(),
            status: s.status,
            assigned_to: s.assigned_to.map(|id| id.to_string()),
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Convert a list of db models
pub fn convert_all<D, A: From<D>>(items: Vec<D>) -> Vec<A> {
    items.into_iter().map(A::from).collect()
}
