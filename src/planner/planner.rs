//! Query planner
//!
//! Produces an immutable plan from a read request. Selection order is
//! fixed: point lookup, then last-name index query, then partition query.

use serde_json::Value;

use crate::record::{fields, StudentKey};
use crate::store::{KeyCondition, LastEvaluatedKey, PageRequest, TableSchema};

use super::errors::{PlannerError, PlannerResult};
use super::request::QueryRequest;

/// Items requested per page for every range query
pub const PAGE_LIMIT: usize = 5;

/// Fetch of one record by its full key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointLookup {
    pub table_name: String,
    pub key: StudentKey,
}

/// Paged query on the table partition or the last-name index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeQuery {
    pub table_name: String,
    /// `None` queries the table itself
    pub index_name: Option<String>,
    pub key_condition: KeyCondition,
    pub page_limit: usize,
}

impl RangeQuery {
    /// Store request for one page, resuming after `start` when given
    pub fn page_request(&self, start: Option<LastEvaluatedKey>) -> PageRequest {
        PageRequest {
            table_name: self.table_name.clone(),
            index_name: self.index_name.clone(),
            key_condition: self.key_condition.clone(),
            limit: self.page_limit,
            exclusive_start_key: start,
        }
    }
}

/// Immutable read plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    PointLookup(PointLookup),
    RangeQuery(RangeQuery),
}

impl QueryPlan {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            QueryPlan::PointLookup(_) => "POINT_LOOKUP",
            QueryPlan::RangeQuery(q) if q.index_name.is_some() => "INDEX_QUERY",
            QueryPlan::RangeQuery(_) => "TABLE_QUERY",
        }
    }

    /// Log fields describing the plan
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        match self {
            QueryPlan::PointLookup(lookup) => vec![
                ("plan", self.kind().to_string()),
                ("table", lookup.table_name.clone()),
            ],
            QueryPlan::RangeQuery(query) => {
                let mut fields = vec![
                    ("plan", self.kind().to_string()),
                    ("table", query.table_name.clone()),
                    ("key_condition", query.key_condition.expression()),
                    ("page_limit", query.page_limit.to_string()),
                ];
                if let Some(index) = &query.index_name {
                    fields.push(("index", index.clone()));
                }
                fields
            }
        }
    }
}

/// Planner bound to the table and index names of one store
#[derive(Debug, Clone, Copy)]
pub struct QueryPlanner<'a> {
    schema: &'a TableSchema,
}

impl<'a> QueryPlanner<'a> {
    pub fn new(schema: &'a TableSchema) -> Self {
        Self { schema }
    }

    /// Decodes a loosely-typed query object and plans it
    pub fn derive_plan(&self, input: &Value) -> PlannerResult<QueryPlan> {
        self.plan(&QueryRequest::from_value(input))
    }

    /// Plans a decoded request. Extra keys never change the outcome.
    pub fn plan(&self, request: &QueryRequest) -> PlannerResult<QueryPlan> {
        if let (Some(school_id), Some(student_id)) = (&request.school_id, &request.student_id) {
            return Ok(QueryPlan::PointLookup(PointLookup {
                table_name: self.schema.table_name.clone(),
                key: StudentKey::new(school_id, student_id),
            }));
        }

        if let Some(last_name) = &request.student_last_name {
            return Ok(QueryPlan::RangeQuery(RangeQuery {
                table_name: self.schema.table_name.clone(),
                index_name: Some(self.schema.last_name_index.clone()),
                key_condition: KeyCondition::equals(fields::STUDENT_LAST_NAME, last_name),
                page_limit: PAGE_LIMIT,
            }));
        }

        if let Some(school_id) = &request.school_id {
            return Ok(QueryPlan::RangeQuery(RangeQuery {
                table_name: self.schema.table_name.clone(),
                index_name: None,
                key_condition: KeyCondition::equals(fields::SCHOOL_ID, school_id),
                page_limit: PAGE_LIMIT,
            }));
        }

        Err(PlannerError::unsupported_query())
    }
}
