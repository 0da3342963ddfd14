// All repository functions are generic over `E: Executor<'e, Database = Postgres>`
// so they accept both a `&PgPool` (direct query) and a `&mut Transaction` (atomic operations).
//
// Id-list updates are single statements: add-to-set is a guarded `array_append`, pull is
// `array_remove`. Updates and deletes return `None` when the row does not exist.

pub mod quiz;
pub mod topic;
pub mod user;
