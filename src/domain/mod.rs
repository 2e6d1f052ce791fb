//! Domain types for docsift
//!
//! This module contains the record model behind a documentation page:
//! - MemberRecord: one documented entity (class, method, field, package)
//! - MemberGroup: a titled block of records (the `.members` sections)
//! - MemberIndex: all groups of one page plus the ancestor linearization
//!
//! Records are materialized once from the generated markup at load time and
//! never created or destroyed afterward, only shown or hidden. The markup is
//! a render target, not a store.

pub mod group;
pub mod record;

pub use group::{MemberGroup, MemberIndex};
pub use record::{Kind, MemberRecord, Visibility};
