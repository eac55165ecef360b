mod response;
pub use response::{Response, Row};

use crate::{schema::Schema, stmt::Statement, Result};

use std::fmt::Debug;

/// Executes translated statements.
///
/// Drivers receive the statement AST; SQL-backed drivers serialize it with
/// `lariat-sql` while in-process drivers evaluate it directly. Every call is
/// synchronous and blocking; the engine has no suspension points.
pub trait Driver: Debug + Send + Sync + 'static {
    /// Execute a translated statement.
    fn exec(&self, schema: &Schema, stmt: Statement) -> Result<Response>;

    /// Execute raw SQL, bypassing translation.
    ///
    /// The escape hatch for callers that need hand-written statements.
    /// Drivers without a SQL engine reject this.
    fn exec_raw(&self, sql: &str) -> Result<Response>;
}
