use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use sfauto_client::security::soql;
use sfauto_client::QueryResult;

use crate::error::{Error, ErrorKind, Result};

/// Number of ids placed in one `WHERE Id IN (...)` clause.
pub const ID_BATCH_SIZE: usize = 100;

#[derive(Deserialize)]
struct IdRecord {
    #[serde(rename = "Id")]
    id: String,
}

fn query_error(url: &str, err: sfauto_client::Error) -> Error {
    let url = url.to_string();
    Error::from_client(err, |message| ErrorKind::Query { url, message })
}

impl super::SalesforceRestClient {
    /// Execute a SOQL query and return the first page.
    ///
    /// # Security
    ///
    /// Escape caller-provided values with
    /// `sfauto_client::security::soql::escape_string()` before splicing them
    /// into the query text.
    #[instrument(skip(self))]
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        self.client
            .query(soql)
            .await
            .map_err(|e| query_error(&self.first_page_url(soql), e))
    }

    /// Fetch the page behind a `nextRecordsUrl`.
    #[instrument(skip(self))]
    pub async fn query_more<T: DeserializeOwned>(
        &self,
        next_records_url: &str,
    ) -> Result<QueryResult<T>> {
        self.client
            .query_more(next_records_url)
            .await
            .map_err(|e| query_error(&self.client.url(next_records_url), e))
    }

    /// Execute a SOQL query and return every record, following
    /// `nextRecordsUrl` until the result reports `done`.
    ///
    /// A failing page aborts the whole query; records from earlier pages
    /// are discarded.
    #[instrument(skip(self))]
    pub async fn query_all<T: DeserializeOwned>(&self, soql: &str) -> Result<Vec<T>> {
        let mut page: QueryResult<T> = self.query(soql).await?;
        let mut page_url = self.first_page_url(soql);
        let mut records = std::mem::take(&mut page.records);
        let mut pages = 1usize;

        while !page.done {
            let Some(next) = page.next_records_url.take() else {
                return Err(Error::new(ErrorKind::Query {
                    url: page_url,
                    message: "page is not done but has no nextRecordsUrl".to_string(),
                }));
            };
            page_url = self.client.url(&next);
            page = self.query_more(&next).await?;
            records.append(&mut page.records);
            pages += 1;
        }

        debug!(pages, records = records.len(), "Query complete");
        Ok(records)
    }

    /// Run `soql` filtered to the given ids, in chunks of [`ID_BATCH_SIZE`].
    ///
    /// Each chunk issues `<soql> WHERE Id IN ('..', ..)`, so `soql` must not
    /// carry its own WHERE clause. Results are concatenated in chunk order.
    /// With no ids the query runs once, unfiltered.
    #[instrument(skip(self, ids), fields(ids = ids.len()))]
    pub async fn query_by_id_batch<T, S>(&self, soql: &str, ids: &[S]) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        S: AsRef<str>,
    {
        if ids.is_empty() {
            return self.query_all(soql).await;
        }
        for id in ids {
            super::check_id(id.as_ref())?;
        }

        let mut records = Vec::new();
        for chunk in ids.chunks(ID_BATCH_SIZE) {
            let filtered = format!(
                "{} WHERE Id IN {}",
                soql.trim_end(),
                soql::quoted_list(chunk.iter().map(AsRef::as_ref))
            );
            records.extend(self.query_all::<T>(&filtered).await?);
        }
        Ok(records)
    }

    /// Id of the first `sobject` row matching `where_clause`.
    ///
    /// No match is [`ErrorKind::RecordNotFound`].
    #[instrument(skip(self))]
    pub async fn find_record_id(&self, sobject: &str, where_clause: &str) -> Result<String> {
        super::check_sobject(sobject)?;
        let soql = format!("SELECT Id FROM {sobject} WHERE {where_clause}");
        let page: QueryResult<IdRecord> = self.query(&soql).await?;

        page.records
            .into_iter()
            .next()
            .map(|r| r.id)
            .ok_or_else(|| {
                Error::new(ErrorKind::RecordNotFound {
                    sobject: sobject.to_string(),
                    criteria: where_clause.to_string(),
                })
            })
    }

    /// Like [`find_record_id`](Self::find_record_id), but never fails: a
    /// missing row or any error yields `None`, errors logged at `warn`.
    #[instrument(skip(self))]
    pub async fn find_optional_record_id(
        &self,
        sobject: &str,
        where_clause: &str,
    ) -> Option<String> {
        match self.find_record_id(sobject, where_clause).await {
            Ok(id) => Some(id),
            Err(Error {
                kind: ErrorKind::RecordNotFound { .. },
                ..
            }) => {
                debug!("No matching record");
                None
            }
            Err(e) => {
                warn!(error = %e, "Record lookup failed, continuing without it");
                None
            }
        }
    }

    /// Id of the first `sobject` row whose `field` equals `value`.
    #[instrument(skip(self))]
    pub async fn find_record_id_by_field(
        &self,
        sobject: &str,
        field: &str,
        value: &str,
    ) -> Result<String> {
        super::check_field(field)?;
        let where_clause = format!("{field} = '{}'", soql::escape_string(value));
        self.find_record_id(sobject, &where_clause).await
    }

    /// Ids of every `sobject` row matching all `(field, value)` pairs.
    #[instrument(skip(self))]
    pub async fn find_record_ids_by_fields(
        &self,
        sobject: &str,
        criteria: &[(&str, &str)],
    ) -> Result<Vec<String>> {
        super::check_sobject(sobject)?;
        if criteria.is_empty() {
            return Err(Error::invalid_input("at least one field criterion is required"));
        }

        let mut clauses = Vec::with_capacity(criteria.len());
        for (field, value) in criteria {
            super::check_field(field)?;
            clauses.push(format!("{field} = '{}'", soql::escape_string(value)));
        }
        let soql = format!("SELECT Id FROM {sobject} WHERE {}", clauses.join(" AND "));

        let records: Vec<IdRecord> = self.query_all(&soql).await?;
        Ok(records.into_iter().map(|r| r.id).collect())
    }

    /// Select `fields` from `sobject`, optionally filtered, across all pages.
    #[instrument(skip(self))]
    pub async fn select_records<T: DeserializeOwned>(
        &self,
        sobject: &str,
        fields: &[&str],
        where_clause: Option<&str>,
    ) -> Result<Vec<T>> {
        super::check_sobject(sobject)?;
        let select = soql::select_list(fields)
            .ok_or_else(|| Error::invalid_input(format!("invalid field list: {fields:?}")))?;

        let soql = match where_clause {
            Some(clause) => format!("SELECT {select} FROM {sobject} WHERE {clause}"),
            None => format!("SELECT {select} FROM {sobject}"),
        };
        self.query_all(&soql).await
    }

    fn first_page_url(&self, soql: &str) -> String {
        format!(
            "{}?q={}",
            self.client.rest_url("query"),
            urlencoding::encode(soql)
        )
    }
}
