//! 查询上下文
pub mod session;

pub use session::SessionVariables;
