use crate::config::{Config, ErrorPolicy};
use crate::hydrate::{Hydrator, Record};
use crate::page;
use crate::query::Query;

use lariat_core::driver::{Response, Row};
use lariat_core::schema::{EntityDescriptor, EntityId};
use lariat_core::stmt::{Expr, Select, Statement, TableRef, Value};
use lariat_core::{Driver, Error, Result, Schema};

use std::sync::Arc;

/// Per-entity gateway orchestrating parse, translate, execute and hydrate.
///
/// Owns no translation logic itself and holds no in-progress statement
/// state; chaining happens on immutable [`Query`] values. Cloning is cheap,
/// and every logical chain (including the nested fetches issued by eager
/// relation resolution) runs on its own value.
#[derive(Debug, Clone)]
pub struct Manager {
    driver: Arc<dyn Driver>,
    schema: Arc<Schema>,
    entity: EntityId,
    config: Config,
}

impl Manager {
    pub fn new(
        driver: Arc<dyn Driver>,
        schema: Arc<Schema>,
        entity: &str,
        config: Config,
    ) -> Result<Manager> {
        let entity = schema.expect_entity(entity)?.id;
        Ok(Manager {
            driver,
            schema,
            entity,
            config,
        })
    }

    pub fn entity(&self) -> &EntityDescriptor {
        self.schema.entity(self.entity)
    }

    pub(crate) fn schema(&self) -> &Schema {
        &self.schema
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    /// Fresh gateway for another entity, sharing driver, schema and config.
    pub(crate) fn for_entity(&self, entity: EntityId) -> Manager {
        Manager {
            driver: self.driver.clone(),
            schema: self.schema.clone(),
            entity,
            config: self.config.clone(),
        }
    }

    /// Entry point for fluent chaining; see [`Query`].
    pub fn query(&self) -> Query {
        Query::new()
    }

    /// Fetches every record of the entity.
    pub fn all(&self) -> Result<Vec<Record>> {
        self.select(Query::new())
    }

    /// Fetches records matching the lookup tokens. An empty token list is
    /// equivalent to [`all`](Self::all).
    pub fn filter(&self, tokens: &[&str]) -> Result<Vec<Record>> {
        self.select(Query::new().filter(tokens))
    }

    /// Fetches records NOT matching the lookup tokens.
    pub fn exclude(&self, tokens: &[&str]) -> Result<Vec<Record>> {
        self.select(Query::new().exclude(tokens))
    }

    /// Executes a built query, hydrating one record per row.
    pub fn select(&self, query: Query) -> Result<Vec<Record>> {
        let entity = self.entity();
        let select = query.build_select(&self.schema, entity)?;
        let rows = self.run(Statement::Select(select))?.into_rows()?;
        self.hydrate_rows(entity, &rows)
    }

    /// Fetches exactly one record matching `field=value`.
    pub fn get(&self, field: &str, value: &str) -> Result<Record> {
        let token = format!("{field}={value}");
        let mut records = self.filter(&[&token])?;

        if records.is_empty() {
            return Err(Error::does_not_exist(format!(
                "entity `{}` matching `{token}`",
                self.entity().name
            )));
        }
        if records.len() > 1 {
            return Err(Error::multiple_objects_returned(format!(
                "entity `{}` matching `{token}`: expected 1 row, found {}",
                self.entity().name,
                records.len()
            )));
        }
        Ok(records.remove(0))
    }

    /// Fetches exactly one record by primary key.
    pub fn get_by_id(&self, id: impl Into<Value>) -> Result<Record> {
        self.get_by_id_within(id.into(), &[])
    }

    /// [`get_by_id`](Self::get_by_id) on behalf of a nested relation fetch,
    /// carrying the (entity, primary key) pairs already on the hydration
    /// path.
    pub(crate) fn get_by_id_within(
        &self,
        id: Value,
        ancestry: &[(EntityId, Value)],
    ) -> Result<Record> {
        let entity = self.entity();

        let mut select = Select::new(TableRef::new(&entity.table_name));
        select.filter = Some(Expr::eq(
            Expr::column(&entity.primary_key_field().column_name),
            Expr::Value(id.clone()),
        ));

        let rows = self.run(Statement::Select(select))?.into_rows()?;
        if rows.is_empty() {
            return Err(Error::does_not_exist(format!(
                "entity `{}` with {} = {:?}",
                entity.name,
                entity.primary_key_field().column_name,
                id
            )));
        }
        if rows.len() > 1 {
            return Err(Error::multiple_objects_returned(format!(
                "entity `{}` with {} = {:?}: expected 1 row, found {}",
                entity.name,
                entity.primary_key_field().column_name,
                id,
                rows.len()
            )));
        }
        let mut records = self.hydrate_rows_within(entity, &rows, ancestry)?;
        Ok(records.remove(0))
    }

    /// Fetches records whose primary key is in `ids`, one statement.
    pub(crate) fn records_by_ids(
        &self,
        ids: Vec<Value>,
        ancestry: &[(EntityId, Value)],
    ) -> Result<Vec<Record>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let entity = self.entity();
        let mut select = Select::new(TableRef::new(&entity.table_name));
        select.filter = Some(Expr::in_list(
            Expr::column(&entity.primary_key_field().column_name),
            ids.into_iter().map(Expr::Value).collect(),
        ));

        let rows = self.run(Statement::Select(select))?.into_rows()?;
        self.hydrate_rows_within(entity, &rows, ancestry)
    }

    /// Counts records matching the lookup tokens.
    pub fn count(&self, tokens: &[&str]) -> Result<u64> {
        let select = Query::new()
            .filter(tokens)
            .build_count(&self.schema, self.entity())?;
        self.run(Statement::Select(select))?.into_count()
    }

    /// Fetches one page of records, 1-based.
    ///
    /// A non-positive page number is the empty page. With no explicit order
    /// field, pages order by primary key ascending so paging stays
    /// deterministic.
    pub fn page(&self, number: i64, size: u64, order: &str, tokens: &[&str]) -> Result<Vec<Record>> {
        let Some(offset) = page::offset(number, size) else {
            return Ok(vec![]);
        };

        let order = self.effective_order(order);
        let query = Query::new()
            .filter(tokens)
            .order_by(&[order.as_str()])
            .limit(size)
            .offset(offset);
        self.select(query)
    }

    /// [`page`](Self::page) with the order field's sign flipped.
    pub fn reverse_page(
        &self,
        number: i64,
        size: u64,
        order: &str,
        tokens: &[&str],
    ) -> Result<Vec<Record>> {
        let order = page::reverse(&self.effective_order(order));
        self.page(number, size, &order, tokens)
    }

    fn effective_order(&self, order: &str) -> String {
        if order.is_empty() {
            self.entity().primary_key_field().name.clone()
        } else {
            order.to_string()
        }
    }

    /// Escape hatch: hands raw SQL to the driver, bypassing translation.
    pub fn raw(&self, sql: &str) -> Result<Vec<Row>> {
        self.run_raw(sql)?.into_rows()
    }

    /// Like [`raw`](Self::raw), hydrating rows against a named entity.
    pub fn raw_as(&self, sql: &str, entity: &str) -> Result<Vec<Record>> {
        let entity = self.schema.expect_entity(entity)?;
        let rows = self.run_raw(sql)?.into_rows()?;
        self.hydrate_rows(entity, &rows)
    }

    /// Deletes records matching the lookup tokens, returning the count.
    pub fn delete(&self, tokens: &[&str]) -> Result<u64> {
        let delete = Query::new()
            .filter(tokens)
            .build_delete(&self.schema, self.entity())?;
        self.run(Statement::Delete(delete))?.into_count()
    }

    /// Executes one statement, applying the configured error policy.
    pub(crate) fn run(&self, stmt: Statement) -> Result<Response> {
        let sql = self.config.serializer().serialize(&stmt);
        tracing::debug!(sql = sql.as_str(), "executing statement");

        let empty = empty_response(&stmt);
        match self.driver.exec(&self.schema, stmt) {
            Ok(response) => Ok(response),
            Err(err) => self.fail(err, empty),
        }
    }

    fn run_raw(&self, sql: &str) -> Result<Response> {
        tracing::debug!(sql, "executing raw statement");
        match self.driver.exec_raw(sql) {
            Ok(response) => Ok(response),
            Err(err) => self.fail(err, Response::empty()),
        }
    }

    fn fail(&self, err: Error, empty: Response) -> Result<Response> {
        let err = if err.is_statement_execution() {
            err
        } else {
            Error::statement_execution(err)
        };
        match self.config.error_policy {
            ErrorPolicy::Propagate => Err(err),
            ErrorPolicy::LogAndSuppress => {
                tracing::error!(error = %err, "statement failed, suppressing");
                Ok(empty)
            }
        }
    }

    fn hydrate_rows(&self, entity: &EntityDescriptor, rows: &[Row]) -> Result<Vec<Record>> {
        self.hydrate_rows_within(entity, rows, &[])
    }

    fn hydrate_rows_within(
        &self,
        entity: &EntityDescriptor,
        rows: &[Row],
        ancestry: &[(EntityId, Value)],
    ) -> Result<Vec<Record>> {
        let target = self.for_entity(entity.id);
        let hydrator = Hydrator::new(&target, entity, ancestry);
        rows.iter().map(|row| hydrator.hydrate(row)).collect()
    }
}

/// The empty response matching a statement's shape, used when a failure is
/// suppressed by policy.
fn empty_response(stmt: &Statement) -> Response {
    match stmt {
        Statement::Select(select) if select.returning.is_count() => Response::Count(0),
        Statement::Select(_) => Response::empty(),
        Statement::Delete(_) => Response::Count(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SqlFlavor;
    use lariat_core::schema::{EntityBuilder, FieldBuilder};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Driver double recording serialized statements and replaying canned
    /// responses.
    #[derive(Debug, Default)]
    struct RecordingDriver {
        statements: Mutex<Vec<String>>,
        responses: Mutex<Vec<Result<Response>>>,
    }

    impl RecordingDriver {
        fn push_response(&self, response: Result<Response>) {
            self.responses.lock().unwrap().push(response);
        }

        fn statements(&self) -> Vec<String> {
            self.statements.lock().unwrap().clone()
        }
    }

    impl Driver for RecordingDriver {
        fn exec(&self, _schema: &Schema, stmt: Statement) -> Result<Response> {
            let sql = lariat_sql::Serializer::ansi().serialize(&stmt);
            self.statements.lock().unwrap().push(sql);
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Ok(Response::empty()))
        }

        fn exec_raw(&self, sql: &str) -> Result<Response> {
            self.statements.lock().unwrap().push(sql.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Ok(Response::empty()))
        }
    }

    fn schema() -> Arc<Schema> {
        Arc::new(
            Schema::builder()
                .entity(
                    EntityBuilder::new("book")
                        .id()
                        .field(FieldBuilder::text("title"))
                        .field(FieldBuilder::integer("pages")),
                )
                .build()
                .unwrap(),
        )
    }

    fn manager(driver: Arc<RecordingDriver>, config: Config) -> Manager {
        Manager::new(driver, schema(), "book", config).unwrap()
    }

    #[test]
    fn empty_filter_is_all() {
        let driver = Arc::new(RecordingDriver::default());
        let manager = manager(driver.clone(), Config::default());

        manager.filter(&[]).unwrap();
        manager.all().unwrap();

        let statements = driver.statements();
        assert_eq!(statements[0], statements[1]);
        assert_eq!(statements[0], "SELECT * FROM book;");
    }

    #[test]
    fn page_defaults_to_primary_key_order() {
        let driver = Arc::new(RecordingDriver::default());
        let manager = manager(driver.clone(), Config::default());

        manager.page(2, 10, "", &[]).unwrap();
        manager.reverse_page(1, 5, "", &[]).unwrap();

        let statements = driver.statements();
        assert_eq!(
            statements[0],
            "SELECT * FROM book ORDER BY id ASC LIMIT 10 OFFSET 10;"
        );
        assert_eq!(
            statements[1],
            "SELECT * FROM book ORDER BY id DESC LIMIT 5 OFFSET 0;"
        );
    }

    #[test]
    fn non_positive_page_skips_execution() {
        let driver = Arc::new(RecordingDriver::default());
        let manager = manager(driver.clone(), Config::default());

        assert!(manager.page(0, 10, "", &[]).unwrap().is_empty());
        assert!(manager.page(-1, 10, "title", &[]).unwrap().is_empty());
        assert!(driver.statements().is_empty());
    }

    #[test]
    fn get_errors_are_typed() {
        let driver = Arc::new(RecordingDriver::default());
        let manager = manager(driver.clone(), Config::default());

        driver.push_response(Ok(Response::empty()));
        let err = manager.get("title", "Dune").unwrap_err();
        assert!(err.is_does_not_exist());

        let row = Row::from_pairs(vec![
            ("id".to_string(), Value::I64(1)),
            ("title".to_string(), Value::String("Dune".into())),
            ("pages".to_string(), Value::I64(412)),
        ]);
        driver.push_response(Ok(Response::Rows(vec![row.clone(), row])));
        let err = manager.get("title", "Dune").unwrap_err();
        assert!(err.is_multiple_objects_returned());
    }

    #[test]
    fn failures_propagate_by_default() {
        let driver = Arc::new(RecordingDriver::default());
        let manager = manager(driver.clone(), Config::default());

        driver.push_response(Err(Error::statement_execution_msg("table is locked")));
        let err = manager.all().unwrap_err();
        assert!(err.is_statement_execution());
    }

    #[test]
    fn suppression_policy_returns_empty_results() {
        let driver = Arc::new(RecordingDriver::default());
        let config = Config::default().error_policy(ErrorPolicy::LogAndSuppress);
        let manager = manager(driver.clone(), config);

        driver.push_response(Err(Error::statement_execution_msg("table is locked")));
        assert!(manager.all().unwrap().is_empty());

        driver.push_response(Err(Error::statement_execution_msg("table is locked")));
        assert_eq!(manager.count(&[]).unwrap(), 0);

        driver.push_response(Err(Error::statement_execution_msg("table is locked")));
        assert_eq!(manager.delete(&["pages__lt=10"]).unwrap(), 0);
    }

    #[test]
    fn raw_bypasses_translation() {
        let driver = Arc::new(RecordingDriver::default());
        let manager = manager(driver.clone(), Config::default());

        manager.raw("SELECT 1;").unwrap();
        assert_eq!(driver.statements(), vec!["SELECT 1;".to_string()]);
    }

    #[test]
    fn raw_as_hydrates_against_named_entity() {
        let driver = Arc::new(RecordingDriver::default());
        let manager = manager(driver.clone(), Config::default());

        driver.push_response(Ok(Response::Rows(vec![Row::from_pairs(vec![
            ("id".to_string(), Value::I64(3)),
            ("title".to_string(), Value::String("Dune".into())),
            ("pages".to_string(), Value::F64(412.0)),
        ])])));

        let records = manager.raw_as("SELECT * FROM book;", "book").unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].persisted());
        // Decimal-shaped integer normalized during hydration
        assert_eq!(records[0].value("pages"), Some(&Value::I64(412)));
    }

    #[test]
    fn flavor_changes_logged_sql_only() {
        // The serializer is exercised per config; the driver still receives
        // the statement tree.
        let driver = Arc::new(RecordingDriver::default());
        let config = Config::default().flavor(SqlFlavor::Postgresql);
        let manager = manager(driver.clone(), config);

        manager.filter(&["title__regex=^D"]).unwrap();
        // The recording driver serializes with the ANSI flavor
        assert_eq!(
            driver.statements(),
            vec!["SELECT * FROM book WHERE title REGEXP '^D';".to_string()]
        );
    }
}
