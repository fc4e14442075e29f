pub mod acl;
pub mod cursor;
pub mod error;
pub mod extract;
pub mod pagination;
pub mod scope;
