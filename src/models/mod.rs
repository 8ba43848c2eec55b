//! Data models and typed partial queries.
//!
//! Each entity comes with four shapes:
//! - the row struct (`Queryable`/`Selectable`) for reads,
//! - a `New*` struct (`Insertable`) for creation,
//! - a `*Changes` struct (`AsChangeset`, all fields optional) for partial
//!   updates; the primary key is deliberately not a member,
//! - a `*Filter` struct with optional fields that compiles to an AND-ed
//!   `WHERE` predicate. Absent fields produce no clause, and a filter with
//!   no fields at all compiles to `None` so repositories can short-circuit
//!   instead of running an unfiltered statement.

mod product;
mod session;
mod user;

pub use product::{NewProduct, Product, ProductChanges, ProductFilter, ProductInput};
pub use session::{NewSession, Session, SessionChanges, SessionFilter};
pub use user::{NewUser, User, UserFilter};

use diesel::expression::BoxableExpression;
use diesel::pg::Pg;
use diesel::sql_types::Bool;

/// A dynamically built `WHERE` predicate over a single table.
///
/// Column references come from the diesel DSL only, never from request
/// input, so filters cannot smuggle arbitrary column names into SQL.
pub type BoxedPredicate<QS> = Box<dyn BoxableExpression<QS, Pg, SqlType = Bool>>;
